//! Noise-driven nether-like terrain used to seed demo and test levels.

use fastnoise_lite::{FastNoiseLite, NoiseType};

use bastion_blocks::{BlockState, ids};

use crate::memory::ChunkColumn;

pub struct NetherTerrain {
    height: i32,
    lava_level: i32,
    caves: FastNoiseLite,
    ceiling: FastNoiseLite,
}

impl NetherTerrain {
    pub fn new(seed: i64, height: i32, lava_level: i32) -> Self {
        let seed = (seed ^ (seed >> 32)) as i32;
        let mut caves = FastNoiseLite::with_seed(seed);
        caves.set_noise_type(Some(NoiseType::OpenSimplex2));
        caves.set_frequency(Some(0.03));
        let mut ceiling = FastNoiseLite::with_seed(seed ^ 41_337);
        ceiling.set_noise_type(Some(NoiseType::OpenSimplex2));
        ceiling.set_frequency(Some(0.02));
        Self {
            height,
            lava_level,
            caves,
            ceiling,
        }
    }

    pub fn block_at(&self, wx: i32, y: i32, wz: i32) -> BlockState {
        if y <= 0 || y >= self.height - 1 {
            return BlockState::of(ids::BEDROCK);
        }
        // Open band narrows toward floor and roof; the noise carves caverns in it.
        let mid = self.height as f32 * 0.45;
        let span = self.height as f32 * 0.35;
        let roof_wobble = self.ceiling.get_noise_2d(wx as f32, wz as f32) * 6.0;
        let band = 1.0 - ((y as f32 - mid) / (span + roof_wobble)).abs();
        let density = self.caves.get_noise_3d(wx as f32, y as f32 * 1.5, wz as f32) + band;
        if density > 0.35 {
            if y <= self.lava_level {
                BlockState::of(ids::STILL_LAVA)
            } else {
                BlockState::AIR
            }
        } else if y <= self.lava_level && density > 0.25 {
            BlockState::of(ids::SOUL_SAND)
        } else {
            BlockState::of(ids::NETHERRACK)
        }
    }

    pub fn fill_chunk(&self, chunk: &ChunkColumn) {
        let pos = chunk.pos();
        let (bx, bz) = (pos.min_block_x(), pos.min_block_z());
        chunk.fill_with(|x, y, z| self.block_at(bx + x, y, bz + z));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk_pos::ChunkPos;
    use crate::provider::FullChunk;

    #[test]
    fn floor_and_roof_are_bedrock() {
        let t = NetherTerrain::new(7, 64, 20);
        for (x, z) in [(0, 0), (100, -40), (-7, 9)] {
            assert_eq!(t.block_at(x, 0, z).id, ids::BEDROCK);
            assert_eq!(t.block_at(x, 63, z).id, ids::BEDROCK);
        }
    }

    #[test]
    fn same_seed_same_terrain() {
        let a = NetherTerrain::new(99, 64, 20);
        let b = NetherTerrain::new(99, 64, 20);
        let ca = ChunkColumn::new(ChunkPos::new(2, -3), 64);
        let cb = ChunkColumn::new(ChunkPos::new(2, -3), 64);
        a.fill_chunk(&ca);
        b.fill_chunk(&cb);
        for (x, z) in [(0, 0), (5, 11), (15, 15)] {
            for y in 0..64 {
                assert_eq!(ca.block_id(x, y, z), cb.block_id(x, y, z));
            }
        }
    }

    #[test]
    fn open_cells_below_lava_level_hold_lava() {
        let t = NetherTerrain::new(3, 64, 20);
        for x in -32..32 {
            for y in 1..=20 {
                let b = t.block_at(x, y, 5);
                assert_ne!(b, BlockState::AIR);
            }
        }
    }
}
