#![allow(dead_code)]

use bastion_blocks::{BlockState, Facing, ids};
use bastion_geom::{BlockPos, BoundingBox};
use bastion_structures::{
    BlockActorSink, PieceBase, PieceSink, RandomSource, StructurePiece, orient_box,
};
use bastion_world::{ChunkManager, ChunkPos, CompoundTag, MemoryWorld};

/// A piece with no children that fills its box with bricks.
#[derive(Debug)]
pub struct Block {
    pub base: PieceBase,
}

impl Block {
    pub fn new(bb: BoundingBox, orientation: Option<Facing>) -> Self {
        Self {
            base: PieceBase::with_box(0, bb, orientation),
        }
    }

    pub fn boxed(bb: BoundingBox) -> Box<dyn StructurePiece> {
        Box::new(Self::new(bb, Some(Facing::North)))
    }
}

impl StructurePiece for Block {
    fn piece_type(&self) -> &'static str {
        "Block"
    }

    fn base(&self) -> &PieceBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PieceBase {
        &mut self.base
    }

    fn post_process(
        &mut self,
        level: &dyn ChunkManager,
        _random: &mut dyn RandomSource,
        gen_box: &BoundingBox,
        _chunk_x: i32,
        _chunk_z: i32,
        _actors: &mut dyn BlockActorSink,
    ) -> bool {
        let Some(bb) = self.base.bounding_box else {
            return false;
        };
        let brick = BlockState::of(ids::NETHER_BRICKS);
        self.base.generate_box(
            level,
            gen_box,
            0,
            0,
            0,
            bb.x_span() - 1,
            bb.y_span() - 1,
            bb.z_span() - 1,
            brick,
            brick,
            false,
        );
        true
    }
}

/// A 3x3x3 cell that keeps attaching one more cell to its east side and
/// leaves a chest record in its middle.
#[derive(Debug)]
pub struct Chain {
    pub base: PieceBase,
    pub links: i32,
}

impl Chain {
    pub fn at(anchor: BlockPos, gen_depth: i32) -> Self {
        let bb = orient_box(anchor, -1, 0, 0, 3, 3, 3, Facing::East);
        Self {
            base: PieceBase::with_box(gen_depth, bb, Some(Facing::East)),
            links: gen_depth,
        }
    }

    pub fn decode(tag: &CompoundTag) -> Box<dyn StructurePiece> {
        Box::new(Self {
            base: PieceBase::from_tag(tag),
            links: tag.int_or("Links", 0),
        })
    }
}

impl StructurePiece for Chain {
    fn piece_type(&self) -> &'static str {
        "Chain"
    }

    fn base(&self) -> &PieceBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PieceBase {
        &mut self.base
    }

    fn add_additional_save_data(&self, tag: &mut CompoundTag) {
        tag.put_int("Links", self.links);
    }

    fn add_children(
        &self,
        _root: &dyn StructurePiece,
        pieces: &mut PieceSink<'_>,
        _random: &mut dyn RandomSource,
    ) {
        let Some(bb) = self.base.bounding_box else {
            return;
        };
        let next = Chain::at(BlockPos::new(bb.x1 + 1, bb.y0, bb.z0 + 1), self.base.gen_depth + 1);
        let Some(next_box) = next.base.bounding_box else {
            return;
        };
        if pieces.find_collision_piece(&next_box).is_none() {
            pieces.push(Box::new(next));
        }
    }

    fn post_process(
        &mut self,
        level: &dyn ChunkManager,
        _random: &mut dyn RandomSource,
        gen_box: &BoundingBox,
        _chunk_x: i32,
        _chunk_z: i32,
        actors: &mut dyn BlockActorSink,
    ) -> bool {
        let brick = BlockState::of(ids::NETHER_BRICKS);
        self.base
            .generate_box(level, gen_box, 0, 0, 0, 2, 2, 2, brick, BlockState::AIR, false);
        self.base.queue_block_actor(actors, "Chest", 1, 1, 1, gen_box);
        true
    }
}

/// Loaded, empty world of `radius` chunks around the origin.
pub fn empty_world(height: i32, radius: i32) -> MemoryWorld {
    let world = MemoryWorld::new(7, height);
    for pos in ChunkPos::new(0, 0).square_around(radius) {
        world.load_chunk(pos);
    }
    world
}
