use bastion_geom::BoundingBox;
use bastion_world::{ChunkManager, CompoundTag};

use crate::actors::BlockActorSink;
use crate::piece::StructurePiece;
use crate::random::RandomSource;
use crate::registry::{PieceDecodeError, PieceRegistry};
use crate::tree::PieceTree;

/// One structure instance: its piece tree, the chunk it was started in, and
/// the union of its piece boxes.
#[derive(Debug)]
pub struct StructureStart {
    chunk_x: i32,
    chunk_z: i32,
    tree: PieceTree,
    bounding_box: Option<BoundingBox>,
}

impl StructureStart {
    /// Grows a structure from `root`. Pending pieces are expanded in random
    /// order until none are left; the depth ceiling bounds the tree.
    pub fn generate(
        chunk_x: i32,
        chunk_z: i32,
        root: Box<dyn StructurePiece>,
        random: &mut dyn RandomSource,
        max_depth: i32,
    ) -> Self {
        let mut tree = PieceTree::new(max_depth);
        let root = tree.push(root);
        let mut pending = tree.expand(root, root, random);
        while !pending.is_empty() {
            let pick = random.next_bounded_int(pending.len() as i32) as usize;
            let next = pending.remove(pick.min(pending.len() - 1));
            pending.extend(tree.expand(next, root, random));
        }
        let bounding_box = tree.enclosing_box();
        log::debug!(
            target: "structures",
            "start ({chunk_x}, {chunk_z}): {} pieces, box {:?}",
            tree.len(),
            bounding_box
        );
        Self {
            chunk_x,
            chunk_z,
            tree,
            bounding_box,
        }
    }

    /// Rebuilds a start from already-laid-out pieces.
    pub fn from_pieces(
        chunk_x: i32,
        chunk_z: i32,
        pieces: Vec<Box<dyn StructurePiece>>,
        max_depth: i32,
    ) -> Self {
        let mut tree = PieceTree::new(max_depth);
        for p in pieces {
            tree.push(p);
        }
        let bounding_box = tree.enclosing_box();
        Self {
            chunk_x,
            chunk_z,
            tree,
            bounding_box,
        }
    }

    #[inline]
    pub fn chunk_x(&self) -> i32 {
        self.chunk_x
    }

    #[inline]
    pub fn chunk_z(&self) -> i32 {
        self.chunk_z
    }

    #[inline]
    pub fn bounding_box(&self) -> Option<&BoundingBox> {
        self.bounding_box.as_ref()
    }

    #[inline]
    pub fn pieces(&self) -> &PieceTree {
        &self.tree
    }

    /// Post-processes every piece whose box meets `gen_box`. Returns how many
    /// of them reported generating.
    #[allow(clippy::too_many_arguments)]
    pub fn post_process(
        &mut self,
        level: &dyn ChunkManager,
        random: &mut dyn RandomSource,
        gen_box: &BoundingBox,
        chunk_x: i32,
        chunk_z: i32,
        actors: &mut dyn BlockActorSink,
    ) -> usize {
        if !self.bounding_box.is_some_and(|bb| bb.intersects(gen_box)) {
            return 0;
        }
        let mut generated = 0;
        for piece in self.tree.iter_mut() {
            if !piece.bounding_box().is_some_and(|bb| bb.intersects(gen_box)) {
                continue;
            }
            if piece.post_process(level, random, gen_box, chunk_x, chunk_z, actors) {
                generated += 1;
            }
        }
        generated
    }

    pub fn create_tag(&self) -> CompoundTag {
        let mut tag = CompoundTag::new();
        tag.put_int("ChunkX", self.chunk_x).put_int("ChunkZ", self.chunk_z);
        if let Some(bb) = self.bounding_box {
            tag.put_int_array("BB", bb.to_array());
        }
        tag.put_list("Children", self.tree.iter().map(|p| p.create_tag()).collect());
        tag
    }

    pub fn from_tag(
        tag: &CompoundTag,
        registry: &PieceRegistry,
        max_depth: i32,
    ) -> Result<Self, PieceDecodeError> {
        let pieces = tag
            .get_list("Children")
            .unwrap_or_default()
            .iter()
            .map(|child| registry.decode(child))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_pieces(
            tag.int_or("ChunkX", 0),
            tag.int_or("ChunkZ", 0),
            pieces,
            max_depth,
        ))
    }
}
