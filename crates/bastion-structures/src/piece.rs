use std::fmt;

use bastion_blocks::{Facing, Rotation};
use bastion_geom::{BlockPos, BoundingBox};
use bastion_world::{ChunkManager, CompoundTag};

use crate::actors::BlockActorSink;
use crate::random::RandomSource;
use crate::tree::PieceSink;

/// State every piece carries: placement box, orientation, derived rotation,
/// and generation depth.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PieceBase {
    pub bounding_box: Option<BoundingBox>,
    orientation: Option<Facing>,
    rotation: Rotation,
    pub gen_depth: i32,
}

impl PieceBase {
    pub fn new(gen_depth: i32) -> Self {
        Self {
            gen_depth,
            ..Self::default()
        }
    }

    pub fn with_box(gen_depth: i32, bounding_box: BoundingBox, orientation: Option<Facing>) -> Self {
        let mut base = Self::new(gen_depth);
        base.bounding_box = Some(bounding_box);
        base.set_orientation(orientation);
        base
    }

    /// Restores the common fields. A missing `BB` leaves the box unset. `O`
    /// of -1 (or absent) leaves orientation unset; any other value is taken
    /// as `|O % 4|`.
    pub fn from_tag(tag: &CompoundTag) -> Self {
        let mut base = Self::new(tag.int_or("GD", 0));
        base.bounding_box = tag.get_int_array("BB").and_then(BoundingBox::from_slice);
        let o = tag.int_or("O", -1);
        let orientation = (o != -1).then(|| Facing::from_horizontal_index((o % 4).abs()));
        base.set_orientation(orientation);
        base
    }

    /// Writes `id`, `BB` (only when the box is set), `O` and `GD`.
    pub fn write_tag(&self, piece_type: &str, tag: &mut CompoundTag) {
        tag.put_string("id", piece_type);
        if let Some(bb) = self.bounding_box {
            tag.put_int_array("BB", bb.to_array());
        }
        tag.put_int("O", self.orientation.map_or(-1, Facing::horizontal_index));
        tag.put_int("GD", self.gen_depth);
    }

    #[inline]
    pub fn orientation(&self) -> Option<Facing> {
        self.orientation
    }

    #[inline]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Rotation is always recomputed from orientation; the two never drift.
    pub fn set_orientation(&mut self, orientation: Option<Facing>) {
        self.orientation = orientation;
        self.rotation = Rotation::for_orientation(orientation);
    }

    pub fn move_by(&mut self, dx: i32, dy: i32, dz: i32) {
        if let Some(bb) = self.bounding_box.as_mut() {
            bb.move_by(dx, dy, dz);
        }
    }

    // Local → world. With no orientation or no box the coordinate passes
    // through unchanged.

    #[inline]
    pub fn world_x(&self, x: i32, z: i32) -> i32 {
        match (self.orientation, self.bounding_box.as_ref()) {
            (Some(Facing::North | Facing::South), Some(bb)) => bb.x0 + x,
            (Some(Facing::West), Some(bb)) => bb.x1 - z,
            (Some(Facing::East), Some(bb)) => bb.x0 + z,
            _ => x,
        }
    }

    #[inline]
    pub fn world_y(&self, y: i32) -> i32 {
        match (self.orientation, self.bounding_box.as_ref()) {
            (Some(_), Some(bb)) => y + bb.y0,
            _ => y,
        }
    }

    #[inline]
    pub fn world_z(&self, x: i32, z: i32) -> i32 {
        match (self.orientation, self.bounding_box.as_ref()) {
            (Some(Facing::North), Some(bb)) => bb.z1 - z,
            (Some(Facing::South), Some(bb)) => bb.z0 + z,
            (Some(Facing::West | Facing::East), Some(bb)) => bb.z0 + x,
            _ => z,
        }
    }

    #[inline]
    pub fn world_pos(&self, x: i32, y: i32, z: i32) -> BlockPos {
        BlockPos::new(self.world_x(x, z), self.world_y(y), self.world_z(x, z))
    }
}

/// Builds the world box of a piece whose local footprint starts at
/// `(off_x, off_y, off_z)` relative to an anchor cell, extends
/// `(size_x, size_y, size_z)` cells, and faces `facing`.
///
/// The local footprint's entrance lies on the anchor side, so a child laid
/// out this way connects to the parent exit it was anchored at.
#[allow(clippy::too_many_arguments)]
pub fn orient_box(
    anchor: BlockPos,
    off_x: i32,
    off_y: i32,
    off_z: i32,
    size_x: i32,
    size_y: i32,
    size_z: i32,
    facing: Facing,
) -> BoundingBox {
    let (x, y, z) = (anchor.x, anchor.y, anchor.z);
    let top = y + off_y + size_y - 1;
    match facing {
        Facing::North => BoundingBox::new(
            x + off_x,
            y + off_y,
            z - size_z + 1 + off_z,
            x + size_x - 1 + off_x,
            top,
            z + off_z,
        ),
        Facing::South => BoundingBox::new(
            x + off_x,
            y + off_y,
            z + off_z,
            x + size_x - 1 + off_x,
            top,
            z + size_z - 1 + off_z,
        ),
        Facing::West => BoundingBox::new(
            x - size_z + 1 + off_z,
            y + off_y,
            z + off_x,
            x + off_z,
            top,
            z + size_x - 1 + off_x,
        ),
        Facing::East => BoundingBox::new(
            x + off_z,
            y + off_y,
            z + off_x,
            x + size_z - 1 + off_z,
            top,
            z + size_x - 1 + off_x,
        ),
    }
}

/// A typed room, corridor or junction of a multi-piece structure.
///
/// Implementors own a [`PieceBase`] and supply their contents through
/// [`post_process`](StructurePiece::post_process); children are attached
/// during [`add_children`](StructurePiece::add_children).
pub trait StructurePiece: Send + Sync {
    /// Type id written as `id` in the persisted record.
    fn piece_type(&self) -> &'static str;

    fn base(&self) -> &PieceBase;

    fn base_mut(&mut self) -> &mut PieceBase;

    fn add_additional_save_data(&self, _tag: &mut CompoundTag) {}

    fn add_children(
        &self,
        _root: &dyn StructurePiece,
        _pieces: &mut PieceSink<'_>,
        _random: &mut dyn RandomSource,
    ) {
    }

    /// Writes this piece's voxels clipped to `gen_box`. Returns false when
    /// the piece declined to generate in this chunk.
    #[allow(clippy::too_many_arguments)]
    fn post_process(
        &mut self,
        level: &dyn ChunkManager,
        random: &mut dyn RandomSource,
        gen_box: &BoundingBox,
        chunk_x: i32,
        chunk_z: i32,
        actors: &mut dyn BlockActorSink,
    ) -> bool;

    #[inline]
    fn bounding_box(&self) -> Option<&BoundingBox> {
        self.base().bounding_box.as_ref()
    }

    #[inline]
    fn gen_depth(&self) -> i32 {
        self.base().gen_depth
    }

    #[inline]
    fn orientation(&self) -> Option<Facing> {
        self.base().orientation()
    }

    fn move_by(&mut self, dx: i32, dy: i32, dz: i32) {
        self.base_mut().move_by(dx, dy, dz);
    }

    fn create_tag(&self) -> CompoundTag {
        let mut tag = CompoundTag::new();
        self.base().write_tag(self.piece_type(), &mut tag);
        self.add_additional_save_data(&mut tag);
        tag
    }
}

impl fmt::Debug for dyn StructurePiece + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.piece_type())
            .field("bounding_box", &self.bounding_box())
            .field("orientation", &self.orientation())
            .field("gen_depth", &self.gen_depth())
            .finish()
    }
}
