//! Demo catalogue: nether outposts grown from a domed hall through branching
//! corridors. One outpost per 8x8-chunk region.

mod pieces;

use pieces::{CORRIDOR, Corridor, ROOM, Room};

use bastion_blocks::Facing;
use bastion_geom::{BlockPos, BoundingBox};
use bastion_runtime::Populator;
use bastion_structures::{
    BlockActorSink, PieceDecodeError, PieceRegistry, RandomSource, StructureStart,
};
use bastion_world::{ChunkManager, ChunkPos, CompoundTag};
use rand::SeedableRng;
use rand::rngs::SmallRng;

const REGION_CHUNKS: i32 = 8;
/// Start chunks this far away (in chunks) can still reach a chunk.
const SEARCH_RADIUS: i32 = 5;
const BASE_Y: i32 = 48;

pub struct NetherOutpost {
    max_depth: i32,
    registry: PieceRegistry,
}

impl NetherOutpost {
    pub fn new(max_depth: i32) -> Self {
        Self {
            max_depth,
            registry: piece_registry(),
        }
    }

    /// Rebuilds a saved outpost record.
    pub fn restore(&self, tag: &CompoundTag) -> Result<StructureStart, PieceDecodeError> {
        StructureStart::from_tag(tag, &self.registry, self.max_depth)
    }

    fn region_seed(level_seed: i64, region_x: i32, region_z: i32) -> u64 {
        let rx = i64::from(region_x).wrapping_mul(341_873_128_712);
        let rz = i64::from(region_z).wrapping_mul(132_897_987_541);
        (level_seed ^ rx ^ rz) as u64
    }

    /// Chunk holding the root hall of the region's outpost.
    pub fn start_chunk(level_seed: i64, region_x: i32, region_z: i32) -> (i32, i32) {
        let mut rng = SmallRng::seed_from_u64(Self::region_seed(level_seed, region_x, region_z));
        let dx = rng.next_bounded_int(REGION_CHUNKS - 3);
        let dz = rng.next_bounded_int(REGION_CHUNKS - 3);
        (region_x * REGION_CHUNKS + dx, region_z * REGION_CHUNKS + dz)
    }

    /// Lays out the outpost of one region. The same inputs always produce
    /// the same pieces.
    pub fn build_start(&self, level_seed: i64, region_x: i32, region_z: i32) -> StructureStart {
        let (chunk_x, chunk_z) = Self::start_chunk(level_seed, region_x, region_z);
        let mut rng = SmallRng::seed_from_u64(
            Self::region_seed(level_seed, region_x, region_z) ^ 0x5dee_ce66d,
        );
        let y = BASE_Y + rng.next_bounded_int(16);
        let facing = Facing::from_horizontal_index(rng.next_bounded_int(4));
        let corner = BlockPos::new((chunk_x << 4) + 4, y, (chunk_z << 4) + 4);
        let root = Box::new(Room::root(corner, facing));
        StructureStart::generate(chunk_x, chunk_z, root, &mut rng, self.max_depth)
    }

    /// Every outpost whose start chunk lies within `radius` chunks of
    /// `(chunk_x, chunk_z)`.
    pub fn starts_near(
        &self,
        level_seed: i64,
        chunk_x: i32,
        chunk_z: i32,
        radius: i32,
    ) -> Vec<StructureStart> {
        let r = radius.max(0);
        let (rx0, rx1) = (
            (chunk_x - r).div_euclid(REGION_CHUNKS),
            (chunk_x + r).div_euclid(REGION_CHUNKS),
        );
        let (rz0, rz1) = (
            (chunk_z - r).div_euclid(REGION_CHUNKS),
            (chunk_z + r).div_euclid(REGION_CHUNKS),
        );
        let center = ChunkPos::new(chunk_x, chunk_z);
        let mut starts = Vec::new();
        for rz in rz0..=rz1 {
            for rx in rx0..=rx1 {
                let (sx, sz) = Self::start_chunk(level_seed, rx, rz);
                if ChunkPos::new(sx, sz).ring_distance(center) <= r {
                    starts.push(self.build_start(level_seed, rx, rz));
                }
            }
        }
        starts
    }
}

impl Populator for NetherOutpost {
    fn name(&self) -> &str {
        "outpost"
    }

    fn populate(
        &self,
        level: &dyn ChunkManager,
        chunk_x: i32,
        chunk_z: i32,
        random: &mut dyn RandomSource,
        actors: &mut dyn BlockActorSink,
    ) {
        let gen_box = BoundingBox::for_chunk(chunk_x, chunk_z, 0, 255);
        for mut start in self.starts_near(level.seed(), chunk_x, chunk_z, SEARCH_RADIUS) {
            let generated = start.post_process(level, random, &gen_box, chunk_x, chunk_z, actors);
            if generated > 0 {
                log::trace!(
                    target: "structures",
                    "outpost from ({}, {}) wrote {generated} pieces into ({chunk_x}, {chunk_z})",
                    start.chunk_x(),
                    start.chunk_z()
                );
            }
        }
    }
}

fn piece_registry() -> PieceRegistry {
    let mut registry = PieceRegistry::new();
    registry.register(ROOM, Room::decode).register(CORRIDOR, Corridor::decode);
    registry
}
