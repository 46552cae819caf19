use std::fmt;

use crate::facing::{Facing, Rotation};
use crate::ids::{self, BlockId};

/// Stair meta layout: direction in bits 0..2, upside-down flag in bit 2.
pub mod stairs {
    use crate::facing::Facing;

    pub const EAST: u8 = 0;
    pub const WEST: u8 = 1;
    pub const SOUTH: u8 = 2;
    pub const NORTH: u8 = 3;
    pub const UPSIDE_DOWN: u8 = 0x4;

    #[inline]
    pub fn facing(meta: u8) -> Facing {
        match meta & 0x3 {
            EAST => Facing::East,
            WEST => Facing::West,
            SOUTH => Facing::South,
            _ => Facing::North,
        }
    }

    #[inline]
    pub fn meta(facing: Facing, upside_down: bool) -> u8 {
        let dir = match facing {
            Facing::East => EAST,
            Facing::West => WEST,
            Facing::South => SOUTH,
            Facing::North => NORTH,
        };
        if upside_down { dir | UPSIDE_DOWN } else { dir }
    }
}

/// Wall-facing meta layout used by chests, ladders and furnaces.
pub mod wall {
    use crate::facing::Facing;

    pub const NORTH: u8 = 2;
    pub const SOUTH: u8 = 3;
    pub const WEST: u8 = 4;
    pub const EAST: u8 = 5;

    #[inline]
    pub fn facing(meta: u8) -> Option<Facing> {
        match meta {
            NORTH => Some(Facing::North),
            SOUTH => Some(Facing::South),
            WEST => Some(Facing::West),
            EAST => Some(Facing::East),
            _ => None,
        }
    }

    #[inline]
    pub fn meta(facing: Facing) -> u8 {
        match facing {
            Facing::North => NORTH,
            Facing::South => SOUTH,
            Facing::West => WEST,
            Facing::East => EAST,
        }
    }
}

/// One voxel value: block id plus a 4-bit auxiliary value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BlockState {
    pub id: BlockId,
    pub meta: u8,
}

impl BlockState {
    pub const AIR: BlockState = BlockState { id: ids::AIR, meta: 0 };

    #[inline]
    pub const fn new(id: BlockId, meta: u8) -> Self {
        Self { id, meta: meta & 0xf }
    }

    #[inline]
    pub const fn of(id: BlockId) -> Self {
        Self { id, meta: 0 }
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self.id == ids::AIR
    }

    #[inline]
    pub fn is_liquid(self) -> bool {
        ids::is_liquid(self.id)
    }

    /// Remaps directional meta under `rotation`; non-directional blocks are
    /// returned unchanged.
    pub fn rotate(self, rotation: Rotation) -> BlockState {
        if rotation == Rotation::None {
            return self;
        }
        if ids::is_stairs(self.id) {
            let facing = rotation.rotate(stairs::facing(self.meta));
            let upside_down = self.meta & stairs::UPSIDE_DOWN != 0;
            let meta = (self.meta & !0x7) | stairs::meta(facing, upside_down);
            return BlockState::new(self.id, meta);
        }
        if ids::is_wall_facing(self.id) {
            if let Some(facing) = wall::facing(self.meta) {
                return BlockState::new(self.id, wall::meta(rotation.rotate(facing)));
            }
        }
        self
    }

    #[inline]
    pub fn stairs(facing: Facing, upside_down: bool) -> BlockState {
        BlockState::new(ids::NETHER_BRICKS_STAIRS, stairs::meta(facing, upside_down))
    }
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match ids::name_of(self.id) {
            Some(name) => write!(f, "{name}:{}", self.meta),
            None => write!(f, "#{}:{}", self.id, self.meta),
        }
    }
}
