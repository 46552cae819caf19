use bastion_geom::BoundingBox;
use bastion_world::ChunkManager;

use crate::piece::PieceBase;

impl PieceBase {
    /// True when any face cell of the piece's box, grown by one and clipped
    /// to `gen_box`, holds a liquid. Pieces use this to refuse generating
    /// into open lava or water.
    pub fn edges_liquid(&self, level: &dyn ChunkManager, gen_box: &BoundingBox) -> bool {
        let Some(scan) = self
            .bounding_box
            .and_then(|bb| bb.inflated(1).intersection(gen_box))
        else {
            return false;
        };
        let BoundingBox { x0, y0, z0, x1, y1, z1 } = scan;
        let liquid = |x: i32, y: i32, z: i32| level.block_state_at(x, y, z).is_liquid();

        for x in x0..=x1 {
            for z in z0..=z1 {
                if liquid(x, y0, z) || liquid(x, y1, z) {
                    return true;
                }
            }
        }
        for x in x0..=x1 {
            for y in y0..=y1 {
                if liquid(x, y, z0) || liquid(x, y, z1) {
                    return true;
                }
            }
        }
        for z in z0..=z1 {
            for y in y0..=y1 {
                if liquid(x0, y, z) || liquid(x1, y, z) {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use bastion_blocks::{BlockState, ids};
    use bastion_geom::BoundingBox;
    use bastion_world::{ChunkManager, ChunkPos, MemoryWorld};

    use crate::piece::PieceBase;

    fn world() -> MemoryWorld {
        let w = MemoryWorld::new(0, 32);
        w.load_chunk(ChunkPos::new(0, 0));
        w
    }

    #[test]
    fn dry_surroundings_report_no_liquid() {
        let w = world();
        let p = PieceBase::with_box(0, BoundingBox::new(4, 4, 4, 8, 8, 8), None);
        assert!(!p.edges_liquid(&w, &BoundingBox::for_chunk(0, 0, 0, 31)));
    }

    #[test]
    fn lava_one_past_the_wall_is_seen() {
        let w = world();
        w.set_block_state_at(9, 6, 6, BlockState::of(ids::STILL_LAVA));
        let p = PieceBase::with_box(0, BoundingBox::new(4, 4, 4, 8, 8, 8), None);
        assert!(p.edges_liquid(&w, &BoundingBox::for_chunk(0, 0, 0, 31)));
    }

    #[test]
    fn lava_outside_the_generation_box_is_ignored() {
        let w = world();
        w.set_block_state_at(9, 6, 6, BlockState::of(ids::LAVA));
        let p = PieceBase::with_box(0, BoundingBox::new(4, 4, 4, 8, 8, 8), None);
        assert!(!p.edges_liquid(&w, &BoundingBox::new(0, 0, 0, 8, 31, 15)));
    }

    #[test]
    fn unset_box_never_edges_liquid() {
        let w = world();
        assert!(!PieceBase::new(0).edges_liquid(&w, &BoundingBox::for_chunk(0, 0, 0, 31)));
    }

    #[test]
    fn piece_far_from_generation_box_sees_nothing() {
        let w = world();
        w.set_block_state_at(40, 5, 40, BlockState::of(ids::STILL_LAVA));
        let p = PieceBase::with_box(0, BoundingBox::new(36, 4, 36, 39, 8, 39), None);
        assert!(!p.edges_liquid(&w, &BoundingBox::for_chunk(0, 0, 0, 31)));
    }
}
