use bastion_geom::BlockPos;
use bastion_world::CompoundTag;

/// Receives block-entity records produced while writing voxels. The records
/// are turned into live objects later, on the main thread.
pub trait BlockActorSink {
    fn spawn_block_actor(&mut self, tag: CompoundTag);
}

impl BlockActorSink for Vec<CompoundTag> {
    fn spawn_block_actor(&mut self, tag: CompoundTag) {
        self.push(tag);
    }
}

/// Minimal block-entity record: `id` plus world `x`, `y`, `z`.
pub fn block_actor_tag(id: &str, pos: BlockPos) -> CompoundTag {
    let mut tag = CompoundTag::new();
    tag.put_string("id", id)
        .put_int("x", pos.x)
        .put_int("y", pos.y)
        .put_int("z", pos.z);
    tag
}
