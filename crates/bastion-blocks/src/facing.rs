/// Horizontal facing of a structure piece or directional block.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Facing {
    South,
    West,
    North,
    East,
}

impl Facing {
    /// Ordered by horizontal index.
    pub const HORIZONTALS: [Facing; 4] = [Facing::South, Facing::West, Facing::North, Facing::East];

    #[inline]
    pub fn horizontal_index(self) -> i32 {
        match self {
            Facing::South => 0,
            Facing::West => 1,
            Facing::North => 2,
            Facing::East => 3,
        }
    }

    #[inline]
    pub fn from_horizontal_index(index: i32) -> Facing {
        Self::HORIZONTALS[index.rem_euclid(4) as usize]
    }

    #[inline]
    pub fn opposite(self) -> Facing {
        match self {
            Facing::South => Facing::North,
            Facing::West => Facing::East,
            Facing::North => Facing::South,
            Facing::East => Facing::West,
        }
    }

    #[inline]
    pub fn clockwise(self) -> Facing {
        match self {
            Facing::North => Facing::East,
            Facing::East => Facing::South,
            Facing::South => Facing::West,
            Facing::West => Facing::North,
        }
    }

    #[inline]
    pub fn counter_clockwise(self) -> Facing {
        match self {
            Facing::North => Facing::West,
            Facing::West => Facing::South,
            Facing::South => Facing::East,
            Facing::East => Facing::North,
        }
    }
}

/// Rotation applied to directional block meta when a piece is placed.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Clockwise180,
    CounterClockwise90,
}

impl Rotation {
    /// South → 180, West → CCW 90, East → CW 90, North or unset → none.
    #[inline]
    pub fn for_orientation(orientation: Option<Facing>) -> Rotation {
        match orientation {
            Some(Facing::South) => Rotation::Clockwise180,
            Some(Facing::West) => Rotation::CounterClockwise90,
            Some(Facing::East) => Rotation::Clockwise90,
            Some(Facing::North) | None => Rotation::None,
        }
    }

    #[inline]
    pub fn rotate(self, facing: Facing) -> Facing {
        match self {
            Rotation::None => facing,
            Rotation::Clockwise90 => facing.clockwise(),
            Rotation::Clockwise180 => facing.opposite(),
            Rotation::CounterClockwise90 => facing.counter_clockwise(),
        }
    }
}
