//! Contracts between the placement core and the host world.
//!
//! All methods take `&self`: implementations synchronise internally so that
//! population tasks on different chunks can run in parallel.

use std::sync::Arc;

use bastion_blocks::{BlockId, BlockState};

use crate::tag::CompoundTag;

/// One loaded 16-wide chunk column, addressed in chunk-local x/z.
pub trait FullChunk: Send + Sync {
    fn chunk_x(&self) -> i32;
    fn chunk_z(&self) -> i32;
    /// Number of addressable y levels, starting at 0.
    fn height(&self) -> i32;
    fn block_id(&self, lx: i32, y: i32, lz: i32) -> BlockId;
    fn block_meta(&self, lx: i32, y: i32, lz: i32) -> u8;
    fn set_block(&self, lx: i32, y: i32, lz: i32, id: BlockId, meta: u8);
    /// Y of the highest non-air block in the column, or 0 when empty.
    fn highest_block_at(&self, lx: i32, lz: i32) -> i32;
}

/// World-space voxel access used by structure placement.
pub trait ChunkManager: Send + Sync {
    fn seed(&self) -> i64;
    fn block_id_at(&self, x: i32, y: i32, z: i32) -> BlockId;
    fn block_meta_at(&self, x: i32, y: i32, z: i32) -> u8;
    fn set_block_at(&self, x: i32, y: i32, z: i32, id: BlockId, meta: u8);
    /// `None` when the chunk is not loaded.
    fn chunk(&self, chunk_x: i32, chunk_z: i32) -> Option<Arc<dyn FullChunk>>;

    fn block_state_at(&self, x: i32, y: i32, z: i32) -> BlockState {
        BlockState::new(self.block_id_at(x, y, z), self.block_meta_at(x, y, z))
    }

    fn set_block_state_at(&self, x: i32, y: i32, z: i32, block: BlockState) {
        self.set_block_at(x, y, z, block.id, block.meta);
    }
}

/// Creates stateful block objects (containers, spawners). Only called from
/// the main thread.
pub trait BlockEntityHost: Send + Sync {
    fn create_block_entity(&self, id: &str, chunk: &dyn FullChunk, tag: &CompoundTag) -> bool;
}
