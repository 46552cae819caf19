//! Integer block geometry for structure placement (no world dependency).
#![forbid(unsafe_code)]

use core::ops::{Add, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Chunk column containing this position (16x16 columns).
    #[inline]
    pub fn chunk_x(self) -> i32 {
        self.x >> 4
    }

    #[inline]
    pub fn chunk_z(self) -> i32 {
        self.z >> 4
    }

    #[inline]
    pub fn local_x(self) -> i32 {
        self.x & 0xf
    }

    #[inline]
    pub fn local_z(self) -> i32 {
        self.z & 0xf
    }
}

impl Add for BlockPos {
    type Output = BlockPos;
    #[inline]
    fn add(self, rhs: BlockPos) -> BlockPos {
        BlockPos::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for BlockPos {
    type Output = BlockPos;
    #[inline]
    fn sub(self, rhs: BlockPos) -> BlockPos {
        BlockPos::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl From<(i32, i32, i32)> for BlockPos {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

/// Axis-aligned integer box, inclusive on all six faces.
///
/// Constructors normalize corner order, so `x0 <= x1`, `y0 <= y1` and
/// `z0 <= z1` always hold. A box may be a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x0: i32,
    pub y0: i32,
    pub z0: i32,
    pub x1: i32,
    pub y1: i32,
    pub z1: i32,
}

impl BoundingBox {
    pub fn new(x0: i32, y0: i32, z0: i32, x1: i32, y1: i32, z1: i32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            z0: z0.min(z1),
            x1: x0.max(x1),
            y1: y0.max(y1),
            z1: z0.max(z1),
        }
    }

    #[inline]
    pub fn from_corners(a: BlockPos, b: BlockPos) -> Self {
        Self::new(a.x, a.y, a.z, b.x, b.y, b.z)
    }

    /// Full-height column box of one chunk, the usual generation-pass box.
    pub fn for_chunk(chunk_x: i32, chunk_z: i32, min_y: i32, max_y: i32) -> Self {
        let x0 = chunk_x << 4;
        let z0 = chunk_z << 4;
        Self::new(x0, min_y, z0, x0 + 15, max_y, z0 + 15)
    }

    #[inline]
    pub fn to_array(self) -> [i32; 6] {
        [self.x0, self.y0, self.z0, self.x1, self.y1, self.z1]
    }

    /// Builds a box from a flat `[x0, y0, z0, x1, y1, z1]` slice.
    /// Returns `None` unless exactly six values are present.
    pub fn from_slice(v: &[i32]) -> Option<Self> {
        match *v {
            [x0, y0, z0, x1, y1, z1] => Some(Self::new(x0, y0, z0, x1, y1, z1)),
            _ => None,
        }
    }

    #[inline]
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x1 >= other.x0
            && self.x0 <= other.x1
            && self.z1 >= other.z0
            && self.z0 <= other.z1
            && self.y1 >= other.y0
            && self.y0 <= other.y1
    }

    #[inline]
    pub fn is_inside(&self, pos: BlockPos) -> bool {
        self.contains(pos.x, pos.y, pos.z)
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= self.x0 && x <= self.x1 && z >= self.z0 && z <= self.z1 && y >= self.y0 && y <= self.y1
    }

    pub fn move_by(&mut self, dx: i32, dy: i32, dz: i32) {
        self.x0 += dx;
        self.y0 += dy;
        self.z0 += dz;
        self.x1 += dx;
        self.y1 += dy;
        self.z1 += dz;
    }

    #[inline]
    pub fn moved(mut self, dx: i32, dy: i32, dz: i32) -> Self {
        self.move_by(dx, dy, dz);
        self
    }

    /// Grows this box to also cover `other`.
    pub fn expand(&mut self, other: &BoundingBox) {
        self.x0 = self.x0.min(other.x0);
        self.y0 = self.y0.min(other.y0);
        self.z0 = self.z0.min(other.z0);
        self.x1 = self.x1.max(other.x1);
        self.y1 = self.y1.max(other.y1);
        self.z1 = self.z1.max(other.z1);
    }

    #[inline]
    pub fn union(mut self, other: &BoundingBox) -> Self {
        self.expand(other);
        self
    }

    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        if !self.intersects(other) {
            return None;
        }
        Some(BoundingBox {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            z0: self.z0.max(other.z0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            z1: self.z1.min(other.z1),
        })
    }

    /// Box inflated by `n` cells on every face.
    #[inline]
    pub fn inflated(&self, n: i32) -> BoundingBox {
        BoundingBox {
            x0: self.x0 - n,
            y0: self.y0 - n,
            z0: self.z0 - n,
            x1: self.x1 + n,
            y1: self.y1 + n,
            z1: self.z1 + n,
        }
    }

    #[inline]
    pub fn x_span(&self) -> i32 {
        self.x1 - self.x0 + 1
    }

    #[inline]
    pub fn y_span(&self) -> i32 {
        self.y1 - self.y0 + 1
    }

    #[inline]
    pub fn z_span(&self) -> i32 {
        self.z1 - self.z0 + 1
    }

    #[inline]
    pub fn min(&self) -> BlockPos {
        BlockPos::new(self.x0, self.y0, self.z0)
    }

    #[inline]
    pub fn max(&self) -> BlockPos {
        BlockPos::new(self.x1, self.y1, self.z1)
    }

    pub fn center(&self) -> BlockPos {
        BlockPos::new(
            self.x0 + (self.x1 - self.x0 + 1) / 2,
            self.y0 + (self.y1 - self.y0 + 1) / 2,
            self.z0 + (self.z1 - self.z0 + 1) / 2,
        )
    }
}

impl From<[i32; 6]> for BoundingBox {
    fn from(v: [i32; 6]) -> Self {
        Self::new(v[0], v[1], v[2], v[3], v[4], v[5])
    }
}

impl From<BoundingBox> for [i32; 6] {
    fn from(b: BoundingBox) -> Self {
        b.to_array()
    }
}
