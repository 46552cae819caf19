use bastion_blocks::{BlockState, ids};
use bastion_world::{ChunkManager, ChunkPos, MemoryWorld};
use proptest::prelude::*;

fn world_xz() -> impl Strategy<Value = i32> {
    -64i32..64
}

proptest! {
    // A write through world coordinates is read back from the owning chunk only
    #[test]
    fn set_then_get_through_owning_chunk(x in world_xz(), y in 0i32..32, z in world_xz(), meta in 0u8..16) {
        let world = MemoryWorld::new(0, 32);
        for pos in ChunkPos::new(0, 0).square_around(4) {
            world.load_chunk(pos);
        }
        world.set_block_at(x, y, z, ids::NETHER_BRICKS, meta);
        prop_assert_eq!(world.block_state_at(x, y, z), BlockState::new(ids::NETHER_BRICKS, meta));

        let chunk = world.chunk_column(ChunkPos::of_block(x, z)).unwrap();
        prop_assert_eq!(chunk.get_local(x & 0xf, y, z & 0xf).id, ids::NETHER_BRICKS);
        prop_assert_eq!(chunk.count_where(|b| !b.is_air()), 1);
    }

    #[test]
    fn square_around_covers_ring_distance(cx in -100i32..100, cz in -100i32..100, r in 0i32..5) {
        let center = ChunkPos::new(cx, cz);
        let all: Vec<ChunkPos> = center.square_around(r).collect();
        prop_assert_eq!(all.len() as i32, (2 * r + 1) * (2 * r + 1));
        prop_assert!(all.iter().all(|p| p.ring_distance(center) <= r));
    }
}
