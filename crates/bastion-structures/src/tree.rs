//! Arena of pieces belonging to one structure, plus the collision search
//! used while growing it.

use bastion_geom::BoundingBox;

use crate::piece::StructurePiece;
use crate::random::RandomSource;

/// Position of a piece within its [`PieceTree`]. Stable: pieces are only
/// ever appended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceIndex(pub usize);

/// First piece, in iteration order, whose box intersects `candidate`.
/// Pieces with no box are skipped.
pub fn find_collision_piece<'a, I>(pieces: I, candidate: &BoundingBox) -> Option<PieceIndex>
where
    I: IntoIterator<Item = &'a Box<dyn StructurePiece>>,
{
    pieces
        .into_iter()
        .position(|p| p.bounding_box().is_some_and(|bb| bb.intersects(candidate)))
        .map(PieceIndex)
}

pub struct PieceTree {
    pieces: Vec<Box<dyn StructurePiece>>,
    max_depth: i32,
}

impl PieceTree {
    pub fn new(max_depth: i32) -> Self {
        Self {
            pieces: Vec::new(),
            max_depth,
        }
    }

    /// Appends without a depth check. Used for roots and restored pieces.
    pub fn push(&mut self, piece: Box<dyn StructurePiece>) -> PieceIndex {
        self.pieces.push(piece);
        PieceIndex(self.pieces.len() - 1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn get(&self, index: PieceIndex) -> Option<&dyn StructurePiece> {
        self.pieces.get(index.0).map(|p| p.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn StructurePiece> {
        self.pieces.iter().map(|p| p.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn StructurePiece>> {
        self.pieces.iter_mut()
    }

    pub fn find_collision_piece(&self, candidate: &BoundingBox) -> Option<PieceIndex> {
        find_collision_piece(&self.pieces, candidate)
    }

    /// Union of every set piece box.
    pub fn enclosing_box(&self) -> Option<BoundingBox> {
        self.pieces
            .iter()
            .filter_map(|p| p.bounding_box().copied())
            .reduce(|acc, bb| acc.union(&bb))
    }

    /// Lets the piece at `index` attach its children, then appends them.
    /// Returns the indices of the new pieces in insertion order.
    pub fn expand(
        &mut self,
        index: PieceIndex,
        root: PieceIndex,
        random: &mut dyn RandomSource,
    ) -> Vec<PieceIndex> {
        let added = {
            let (Some(piece), Some(root)) = (self.pieces.get(index.0), self.pieces.get(root.0)) else {
                return Vec::new();
            };
            let mut sink = PieceSink::new(&self.pieces, self.max_depth);
            piece.add_children(root.as_ref(), &mut sink, random);
            sink.added
        };
        let start = self.pieces.len();
        self.pieces.extend(added);
        (start..self.pieces.len()).map(PieceIndex).collect()
    }
}

impl std::fmt::Debug for PieceTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PieceTree")
            .field("max_depth", &self.max_depth)
            .field("pieces", &self.pieces)
            .finish()
    }
}

/// Write handle given to a piece while it attaches children. Sees both the
/// committed pieces and those added so far in this call.
pub struct PieceSink<'a> {
    existing: &'a [Box<dyn StructurePiece>],
    added: Vec<Box<dyn StructurePiece>>,
    max_depth: i32,
}

impl<'a> PieceSink<'a> {
    pub fn new(existing: &'a [Box<dyn StructurePiece>], max_depth: i32) -> Self {
        Self {
            existing,
            added: Vec::new(),
            max_depth,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.existing.len() + self.added.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find_collision_piece(&self, candidate: &BoundingBox) -> Option<PieceIndex> {
        find_collision_piece(self.existing.iter().chain(&self.added), candidate)
    }

    /// Adds a child unless its depth exceeds the ceiling. Returns its index,
    /// or `None` when it was refused.
    pub fn push(&mut self, piece: Box<dyn StructurePiece>) -> Option<PieceIndex> {
        if piece.gen_depth() > self.max_depth {
            log::trace!(
                target: "structures",
                "refused {} at depth {} (max {})",
                piece.piece_type(),
                piece.gen_depth(),
                self.max_depth
            );
            return None;
        }
        self.added.push(piece);
        Some(PieceIndex(self.len() - 1))
    }
}
