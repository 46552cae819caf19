use serde::{Deserialize, Serialize};

/// Horizontal chunk column coordinate (16x16 blocks).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    #[inline]
    pub fn of_block(wx: i32, wz: i32) -> Self {
        Self::new(wx >> 4, wz >> 4)
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }

    #[inline]
    pub fn min_block_x(self) -> i32 {
        self.x << 4
    }

    #[inline]
    pub fn min_block_z(self) -> i32 {
        self.z << 4
    }

    /// Chebyshev distance in chunks.
    #[inline]
    pub fn ring_distance(self, other: ChunkPos) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }

    /// All chunk positions within `radius` rings of `self`, row-major.
    pub fn square_around(self, radius: i32) -> impl Iterator<Item = ChunkPos> {
        let r = radius.max(0);
        (-r..=r).flat_map(move |dz| (-r..=r).map(move |dx| self.offset(dx, dz)))
    }
}

impl From<(i32, i32)> for ChunkPos {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkPos> for (i32, i32) {
    fn from(value: ChunkPos) -> Self {
        (value.x, value.z)
    }
}
