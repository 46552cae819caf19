use bastion_blocks::state::wall;
use bastion_blocks::{BlockState, Facing, ids};
use bastion_geom::{BlockPos, BoundingBox};
use bastion_structures::{
    BlockActorSink, PieceBase, PieceSink, RandomSource, ScatterSelector, StructurePiece, orient_box,
};
use bastion_world::{ChunkManager, CompoundTag};

pub const ROOM: &str = "OutpostRoom";
pub const CORRIDOR: &str = "OutpostCorridor";

/// Children whose center is further than this (per axis) from the root's
/// center are not attached.
const MAX_REACH: i32 = 48;

const AIR: BlockState = BlockState::AIR;
const BRICKS: BlockState = BlockState::of(ids::NETHER_BRICKS);
const FENCE: BlockState = BlockState::of(ids::NETHER_BRICK_FENCE);
const NETHERRACK: BlockState = BlockState::of(ids::NETHERRACK);
const SOUL_SAND: BlockState = BlockState::of(ids::SOUL_SAND);
const GLOWSTONE: BlockState = BlockState::of(ids::GLOWSTONE);
const COBWEB: BlockState = BlockState::of(ids::COBWEB);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Forward,
    Left,
    Right,
}

/// Anchor cell just outside `base`'s box on `side`, and the facing a child
/// attached there should take. `along` offsets the anchor along the wall.
fn exit(base: &PieceBase, side: Side, along: i32) -> Option<(BlockPos, Facing)> {
    let bb = base.bounding_box?;
    let facing = base.orientation()?;
    let y = bb.y0;
    Some(match (side, facing) {
        (Side::Forward, Facing::North) => (BlockPos::new(bb.x0 + along, y, bb.z0 - 1), Facing::North),
        (Side::Forward, Facing::South) => (BlockPos::new(bb.x0 + along, y, bb.z1 + 1), Facing::South),
        (Side::Forward, Facing::West) => (BlockPos::new(bb.x0 - 1, y, bb.z0 + along), Facing::West),
        (Side::Forward, Facing::East) => (BlockPos::new(bb.x1 + 1, y, bb.z0 + along), Facing::East),
        (Side::Left, Facing::North | Facing::South) => {
            (BlockPos::new(bb.x0 - 1, y, bb.z0 + along), Facing::West)
        }
        (Side::Left, Facing::West | Facing::East) => {
            (BlockPos::new(bb.x0 + along, y, bb.z0 - 1), Facing::North)
        }
        (Side::Right, Facing::North | Facing::South) => {
            (BlockPos::new(bb.x1 + 1, y, bb.z0 + along), Facing::East)
        }
        (Side::Right, Facing::West | Facing::East) => {
            (BlockPos::new(bb.x0 + along, y, bb.z1 + 1), Facing::South)
        }
    })
}

fn within_reach(root: &dyn StructurePiece, candidate: &BoundingBox) -> bool {
    let Some(root_box) = root.bounding_box() else {
        return false;
    };
    let (a, b) = (root_box.center(), candidate.center());
    (a.x - b.x).abs() <= MAX_REACH && (a.z - b.z).abs() <= MAX_REACH
}

/// Offers a child at `side` of `parent`. Corridors usually; a room one time
/// in four when `allow_room` is set.
fn attach(
    parent: &PieceBase,
    root: &dyn StructurePiece,
    pieces: &mut PieceSink<'_>,
    random: &mut dyn RandomSource,
    side: Side,
    along: i32,
    allow_room: bool,
) {
    let Some((anchor, facing)) = exit(parent, side, along) else {
        return;
    };
    let depth = parent.gen_depth + 1;
    let child: Box<dyn StructurePiece> = if allow_room && random.next_bounded_int(4) == 0 {
        Box::new(Room::new(depth, anchor, facing))
    } else {
        Box::new(Corridor::new(depth, anchor, facing, random))
    };
    let Some(bb) = child.bounding_box().copied() else {
        return;
    };
    if !within_reach(root, &bb) || pieces.find_collision_piece(&bb).is_some() {
        return;
    }
    pieces.push(child);
}

/// Square hall with a glowstone dome, doors on all four walls and a chest.
#[derive(Debug)]
pub struct Room {
    base: PieceBase,
}

impl Room {
    const SIZE: i32 = 9;

    pub fn root(corner: BlockPos, facing: Facing) -> Self {
        let bb = orient_box(corner, 0, 0, 0, Self::SIZE, Self::SIZE, Self::SIZE, facing);
        Self {
            base: PieceBase::with_box(0, bb, Some(facing)),
        }
    }

    fn new(gen_depth: i32, anchor: BlockPos, facing: Facing) -> Self {
        let bb = orient_box(anchor, -3, 0, 0, Self::SIZE, Self::SIZE, Self::SIZE, facing);
        Self {
            base: PieceBase::with_box(gen_depth, bb, Some(facing)),
        }
    }

    pub fn decode(tag: &CompoundTag) -> Box<dyn StructurePiece> {
        Box::new(Self {
            base: PieceBase::from_tag(tag),
        })
    }
}

impl StructurePiece for Room {
    fn piece_type(&self) -> &'static str {
        ROOM
    }

    fn base(&self) -> &PieceBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PieceBase {
        &mut self.base
    }

    fn add_children(
        &self,
        root: &dyn StructurePiece,
        pieces: &mut PieceSink<'_>,
        random: &mut dyn RandomSource,
    ) {
        for side in [Side::Forward, Side::Left, Side::Right] {
            attach(&self.base, root, pieces, random, side, 3, false);
        }
    }

    fn post_process(
        &mut self,
        level: &dyn ChunkManager,
        random: &mut dyn RandomSource,
        gen_box: &BoundingBox,
        _chunk_x: i32,
        _chunk_z: i32,
        actors: &mut dyn BlockActorSink,
    ) -> bool {
        let b = &self.base;
        let sealed = b.edges_liquid(level, gen_box);

        b.generate_box(level, gen_box, 0, 0, 0, 8, 6, 8, BRICKS, AIR, false);
        let mut walls = ScatterSelector::new(AIR).with(BRICKS, 8).with(NETHERRACK, 1);
        b.generate_box_with(level, gen_box, 0, 1, 0, 8, 5, 8, true, random, &mut walls);

        let door = if sealed { FENCE } else { AIR };
        b.generate_air_box(level, gen_box, 3, 1, 0, 5, 3, 0);
        b.generate_box(level, gen_box, 3, 1, 8, 5, 3, 8, door, door, false);
        b.generate_box(level, gen_box, 0, 1, 3, 0, 3, 5, door, door, false);
        b.generate_box(level, gen_box, 8, 1, 3, 8, 3, 5, door, door, false);

        b.generate_upper_half_sphere(level, gen_box, 1, 6, 1, 7, 8, 7, GLOWSTONE, false);
        b.generate_maybe_box(
            level, gen_box, random, 25, 1, 0, 1, 7, 0, 7, SOUL_SAND, SOUL_SAND, true, true,
        );
        b.place_block(level, BlockState::stairs(Facing::North, false), 4, 0, 0, gen_box);

        b.place_block(level, BlockState::new(ids::CHEST, wall::meta(Facing::South)), 1, 1, 7, gen_box);
        b.queue_block_actor(actors, "Chest", 1, 1, 7, gen_box);

        for (x, z) in [(0, 0), (8, 0), (0, 8), (8, 8)] {
            b.fill_column_down(level, BRICKS, x, -1, z, gen_box);
        }
        true
    }
}

/// Five-wide tunnel, seven long, that keeps the outpost growing forward and
/// may open a side passage.
#[derive(Debug)]
pub struct Corridor {
    base: PieceBase,
    branch: Option<Side>,
}

impl Corridor {
    fn new(gen_depth: i32, anchor: BlockPos, facing: Facing, random: &mut dyn RandomSource) -> Self {
        let bb = orient_box(anchor, -1, 0, 0, 5, 5, 7, facing);
        let branch = match random.next_bounded_int(3) {
            1 => Some(Side::Left),
            2 => Some(Side::Right),
            _ => None,
        };
        Self {
            base: PieceBase::with_box(gen_depth, bb, Some(facing)),
            branch,
        }
    }

    pub fn decode(tag: &CompoundTag) -> Box<dyn StructurePiece> {
        let branch = match tag.int_or("Branch", 0) {
            1 => Some(Side::Left),
            2 => Some(Side::Right),
            _ => None,
        };
        Box::new(Self {
            base: PieceBase::from_tag(tag),
            branch,
        })
    }
}

impl StructurePiece for Corridor {
    fn piece_type(&self) -> &'static str {
        CORRIDOR
    }

    fn base(&self) -> &PieceBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PieceBase {
        &mut self.base
    }

    fn add_additional_save_data(&self, tag: &mut CompoundTag) {
        let branch = match self.branch {
            None | Some(Side::Forward) => 0,
            Some(Side::Left) => 1,
            Some(Side::Right) => 2,
        };
        tag.put_int("Branch", branch);
    }

    fn add_children(
        &self,
        root: &dyn StructurePiece,
        pieces: &mut PieceSink<'_>,
        random: &mut dyn RandomSource,
    ) {
        attach(&self.base, root, pieces, random, Side::Forward, 1, true);
        if let Some(side) = self.branch {
            attach(&self.base, root, pieces, random, side, 2, false);
        }
    }

    fn post_process(
        &mut self,
        level: &dyn ChunkManager,
        random: &mut dyn RandomSource,
        gen_box: &BoundingBox,
        _chunk_x: i32,
        _chunk_z: i32,
        _actors: &mut dyn BlockActorSink,
    ) -> bool {
        let b = &self.base;
        let sealed = b.edges_liquid(level, gen_box);

        b.generate_box(level, gen_box, 0, 0, 0, 4, 4, 6, BRICKS, AIR, false);
        b.generate_air_box(level, gen_box, 1, 1, 0, 3, 3, 0);
        if sealed {
            b.generate_box(level, gen_box, 1, 1, 6, 3, 3, 6, FENCE, FENCE, false);
        } else {
            b.generate_air_box(level, gen_box, 1, 1, 6, 3, 3, 6);
        }
        match self.branch {
            Some(Side::Left) => b.generate_air_box(level, gen_box, 0, 1, 2, 0, 3, 4),
            Some(Side::Right) => b.generate_air_box(level, gen_box, 4, 1, 2, 4, 3, 4),
            _ => {}
        }

        for z in [1, 5] {
            b.maybe_generate_block(level, gen_box, random, 40, 0, 2, z, FENCE);
            b.maybe_generate_block(level, gen_box, random, 40, 4, 2, z, FENCE);
        }
        b.generate_maybe_box(
            level, gen_box, random, 10, 1, 3, 1, 3, 3, 5, COBWEB, COBWEB, false, true,
        );

        for (x, z) in [(0, 0), (4, 0), (0, 6), (4, 6)] {
            b.fill_column_down(level, BRICKS, x, -1, z, gen_box);
        }
        true
    }
}
