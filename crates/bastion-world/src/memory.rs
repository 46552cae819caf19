//! Thread-safe in-memory world: chunk columns behind per-chunk locks.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use bastion_blocks::{BlockId, BlockState};
use bastion_geom::BlockPos;

use crate::chunk_pos::ChunkPos;
use crate::provider::{BlockEntityHost, ChunkManager, FullChunk};
use crate::tag::CompoundTag;
use crate::terrain::NetherTerrain;

pub const CHUNK_WIDTH: usize = 16;

pub struct ChunkColumn {
    pos: ChunkPos,
    height: usize,
    blocks: RwLock<Vec<BlockState>>,
}

impl ChunkColumn {
    pub fn new(pos: ChunkPos, height: usize) -> Self {
        Self {
            pos,
            height,
            blocks: RwLock::new(vec![BlockState::AIR; CHUNK_WIDTH * CHUNK_WIDTH * height]),
        }
    }

    #[inline]
    pub fn pos(&self) -> ChunkPos {
        self.pos
    }

    #[inline]
    pub fn idx(x: usize, y: usize, z: usize) -> usize {
        (y * CHUNK_WIDTH + z) * CHUNK_WIDTH + x
    }

    #[inline]
    fn index(&self, lx: i32, y: i32, lz: i32) -> Option<usize> {
        if lx < 0 || lz < 0 || y < 0 {
            return None;
        }
        let (x, y, z) = (lx as usize, y as usize, lz as usize);
        if x >= CHUNK_WIDTH || z >= CHUNK_WIDTH || y >= self.height {
            return None;
        }
        Some(Self::idx(x, y, z))
    }

    pub fn get_local(&self, lx: i32, y: i32, lz: i32) -> BlockState {
        match self.index(lx, y, lz) {
            Some(i) => self.blocks.read().unwrap_or_else(PoisonError::into_inner)[i],
            None => BlockState::AIR,
        }
    }

    pub fn set_local(&self, lx: i32, y: i32, lz: i32, block: BlockState) {
        if let Some(i) = self.index(lx, y, lz) {
            self.blocks.write().unwrap_or_else(PoisonError::into_inner)[i] = block;
        }
    }

    /// Applies `f` to every cell under a single write lock; `f` receives
    /// chunk-local coordinates.
    pub fn fill_with(&self, mut f: impl FnMut(i32, i32, i32) -> BlockState) {
        let mut blocks = self.blocks.write().unwrap_or_else(PoisonError::into_inner);
        for y in 0..self.height {
            for z in 0..CHUNK_WIDTH {
                for x in 0..CHUNK_WIDTH {
                    blocks[Self::idx(x, y, z)] = f(x as i32, y as i32, z as i32);
                }
            }
        }
    }

    pub fn count_where(&self, pred: impl Fn(BlockState) -> bool) -> usize {
        let blocks = self.blocks.read().unwrap_or_else(PoisonError::into_inner);
        blocks.iter().filter(|b| pred(**b)).count()
    }
}

impl FullChunk for ChunkColumn {
    fn chunk_x(&self) -> i32 {
        self.pos.x
    }

    fn chunk_z(&self) -> i32 {
        self.pos.z
    }

    fn height(&self) -> i32 {
        self.height as i32
    }

    fn block_id(&self, lx: i32, y: i32, lz: i32) -> BlockId {
        self.get_local(lx, y, lz).id
    }

    fn block_meta(&self, lx: i32, y: i32, lz: i32) -> u8 {
        self.get_local(lx, y, lz).meta
    }

    fn set_block(&self, lx: i32, y: i32, lz: i32, id: BlockId, meta: u8) {
        self.set_local(lx, y, lz, BlockState::new(id, meta));
    }

    fn highest_block_at(&self, lx: i32, lz: i32) -> i32 {
        if self.index(lx, 0, lz).is_none() {
            return 0;
        }
        let blocks = self.blocks.read().unwrap_or_else(PoisonError::into_inner);
        let (x, z) = (lx as usize, lz as usize);
        (0..self.height)
            .rev()
            .find(|&y| !blocks[Self::idx(x, y, z)].is_air())
            .map_or(0, |y| y as i32)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    pub loaded_chunks: usize,
    pub block_writes: u64,
    pub block_entities: usize,
}

pub struct MemoryWorld {
    seed: i64,
    height: i32,
    chunks: RwLock<HashMap<ChunkPos, Arc<ChunkColumn>>>,
    block_entities: Mutex<HashMap<BlockPos, CompoundTag>>,
    block_writes: AtomicU64,
}

impl MemoryWorld {
    pub fn new(seed: i64, height: i32) -> Self {
        Self {
            seed,
            height: height.max(1),
            chunks: RwLock::new(HashMap::new()),
            block_entities: Mutex::new(HashMap::new()),
            block_writes: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn chunk_column(&self, pos: ChunkPos) -> Option<Arc<ChunkColumn>> {
        self.chunks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&pos)
            .cloned()
    }

    /// Returns the chunk at `pos`, creating an all-air column if absent.
    pub fn load_chunk(&self, pos: ChunkPos) -> Arc<ChunkColumn> {
        if let Some(chunk) = self.chunk_column(pos) {
            return chunk;
        }
        let mut chunks = self.chunks.write().unwrap_or_else(PoisonError::into_inner);
        chunks
            .entry(pos)
            .or_insert_with(|| Arc::new(ChunkColumn::new(pos, self.height as usize)))
            .clone()
    }

    /// Loads and fills every chunk within `radius` rings of `center`.
    pub fn generate_area(&self, terrain: &NetherTerrain, center: ChunkPos, radius: i32) -> usize {
        let mut count = 0;
        for pos in center.square_around(radius) {
            let chunk = self.load_chunk(pos);
            terrain.fill_chunk(&chunk);
            count += 1;
        }
        log::debug!(target: "world", "generated {} chunk(s) around ({}, {})", count, center.x, center.z);
        count
    }

    pub fn block_entity_at(&self, pos: BlockPos) -> Option<CompoundTag> {
        self.block_entities
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&pos)
            .cloned()
    }

    pub fn block_entities(&self) -> Vec<(BlockPos, CompoundTag)> {
        let mut out: Vec<(BlockPos, CompoundTag)> = self
            .block_entities
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(k, v)| (*k, v.clone()))
            .collect();
        out.sort_by_key(|(p, _)| (p.x, p.y, p.z));
        out
    }

    pub fn stats(&self) -> WorldStats {
        WorldStats {
            loaded_chunks: self.chunks.read().unwrap_or_else(PoisonError::into_inner).len(),
            block_writes: self.block_writes.load(Ordering::Relaxed),
            block_entities: self
                .block_entities
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len(),
        }
    }
}

impl ChunkManager for MemoryWorld {
    fn seed(&self) -> i64 {
        self.seed
    }

    fn block_id_at(&self, x: i32, y: i32, z: i32) -> BlockId {
        self.block_state_at(x, y, z).id
    }

    fn block_meta_at(&self, x: i32, y: i32, z: i32) -> u8 {
        self.block_state_at(x, y, z).meta
    }

    fn block_state_at(&self, x: i32, y: i32, z: i32) -> BlockState {
        match self.chunk_column(ChunkPos::of_block(x, z)) {
            Some(chunk) => chunk.get_local(x & 0xf, y, z & 0xf),
            None => BlockState::AIR,
        }
    }

    fn set_block_at(&self, x: i32, y: i32, z: i32, id: BlockId, meta: u8) {
        if y < 0 || y >= self.height {
            return;
        }
        if let Some(chunk) = self.chunk_column(ChunkPos::of_block(x, z)) {
            chunk.set_local(x & 0xf, y, z & 0xf, BlockState::new(id, meta));
            self.block_writes.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn chunk(&self, chunk_x: i32, chunk_z: i32) -> Option<Arc<dyn FullChunk>> {
        self.chunk_column(ChunkPos::new(chunk_x, chunk_z))
            .map(|c| c as Arc<dyn FullChunk>)
    }
}

impl BlockEntityHost for MemoryWorld {
    fn create_block_entity(&self, id: &str, chunk: &dyn FullChunk, tag: &CompoundTag) -> bool {
        let (Some(x), Some(z)) = (tag.get_int("x"), tag.get_int("z")) else {
            return false;
        };
        if x >> 4 != chunk.chunk_x() || z >> 4 != chunk.chunk_z() {
            log::warn!(target: "world", "block entity {} at ({}, {}) outside chunk ({}, {})",
                id, x, z, chunk.chunk_x(), chunk.chunk_z());
            return false;
        }
        let pos = BlockPos::new(x, tag.int_or("y", 0), z);
        self.block_entities
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(pos, tag.clone());
        log::debug!(target: "world", "created block entity {} at {:?}", id, pos);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bastion_blocks::ids;

    #[test]
    fn writes_to_unloaded_chunks_are_dropped() {
        let world = MemoryWorld::new(1, 64);
        world.set_block_at(5, 10, 5, ids::STONE, 0);
        assert_eq!(world.block_id_at(5, 10, 5), ids::AIR);
        assert_eq!(world.stats().block_writes, 0);
    }

    #[test]
    fn world_coords_route_to_owning_chunk() {
        let world = MemoryWorld::new(1, 64);
        let chunk = world.load_chunk(ChunkPos::new(-1, 2));
        world.set_block_at(-3, 7, 40, ids::NETHER_BRICKS, 0);
        assert_eq!(chunk.get_local(13, 7, 8), BlockState::of(ids::NETHER_BRICKS));
        assert_eq!(world.block_state_at(-3, 7, 40).id, ids::NETHER_BRICKS);
        assert!(world.chunk(0, 2).is_none());
    }

    #[test]
    fn out_of_height_reads_are_air() {
        let world = MemoryWorld::new(1, 16);
        world.load_chunk(ChunkPos::new(0, 0));
        world.set_block_at(0, 16, 0, ids::STONE, 0);
        world.set_block_at(0, -1, 0, ids::STONE, 0);
        assert_eq!(world.block_id_at(0, 16, 0), ids::AIR);
        assert_eq!(world.block_id_at(0, -1, 0), ids::AIR);
    }

    #[test]
    fn highest_block_tracks_topmost_solid() {
        let chunk = ChunkColumn::new(ChunkPos::new(0, 0), 32);
        assert_eq!(chunk.highest_block_at(3, 4), 0);
        chunk.set_block(3, 5, 4, ids::NETHERRACK, 0);
        chunk.set_block(3, 20, 4, ids::GLOWSTONE, 0);
        assert_eq!(chunk.highest_block_at(3, 4), 20);
        assert_eq!(chunk.highest_block_at(16, 4), 0);
    }

    #[test]
    fn block_entity_must_sit_in_given_chunk() {
        let world = MemoryWorld::new(1, 64);
        let chunk = world.load_chunk(ChunkPos::new(1, 1));
        let mut tag = CompoundTag::new();
        tag.put_string("id", "Chest").put_int("x", 20).put_int("y", 30).put_int("z", 17);
        assert!(world.create_block_entity("Chest", chunk.as_ref(), &tag));
        assert!(world.block_entity_at(BlockPos::new(20, 30, 17)).is_some());

        tag.put_int("x", 40);
        assert!(!world.create_block_entity("Chest", chunk.as_ref(), &tag));
        assert_eq!(world.stats().block_entities, 1);
    }
}
