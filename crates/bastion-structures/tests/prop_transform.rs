use bastion_blocks::{Facing, Rotation};
use bastion_geom::{BlockPos, BoundingBox};
use bastion_structures::PieceBase;
use proptest::prelude::*;
use std::collections::HashSet;

fn facing() -> impl Strategy<Value = Facing> {
    prop_oneof![
        Just(Facing::South),
        Just(Facing::West),
        Just(Facing::North),
        Just(Facing::East),
    ]
}

fn small_box() -> impl Strategy<Value = BoundingBox> {
    (-40i32..40, 0i32..100, -40i32..40, 1i32..6, 1i32..5, 1i32..6)
        .prop_map(|(x, y, z, w, h, d)| BoundingBox::new(x, y, z, x + w - 1, y + h - 1, z + d - 1))
}

proptest! {
    #[test]
    fn local_cells_map_onto_the_box(bb in small_box(), f in facing()) {
        let p = PieceBase::with_box(0, bb, Some(f));
        let (w, d) = match f {
            Facing::North | Facing::South => (bb.x_span(), bb.z_span()),
            Facing::West | Facing::East => (bb.z_span(), bb.x_span()),
        };
        let mut seen = HashSet::new();
        for y in 0..bb.y_span() {
            for x in 0..w {
                for z in 0..d {
                    let pos = p.world_pos(x, y, z);
                    prop_assert!(bb.is_inside(pos), "{:?} outside {:?}", pos, bb);
                    prop_assert!(seen.insert(pos));
                }
            }
        }
        let volume = (bb.x_span() * bb.y_span() * bb.z_span()) as usize;
        prop_assert_eq!(seen.len(), volume);
    }

    #[test]
    fn rotation_tracks_orientation(bb in small_box(), f in facing(), g in facing()) {
        let mut p = PieceBase::with_box(0, bb, Some(f));
        p.set_orientation(Some(g));
        prop_assert_eq!(p.rotation(), Rotation::for_orientation(Some(g)));
    }

    #[test]
    fn unset_orientation_passes_through(bb in small_box(), x in -50i32..50, y in 0i32..128, z in -50i32..50) {
        let p = PieceBase::with_box(0, bb, None);
        prop_assert_eq!(p.world_pos(x, y, z), BlockPos::new(x, y, z));
    }

    #[test]
    fn moving_shifts_world_cells(bb in small_box(), f in facing(), dx in -20i32..20, dz in -20i32..20) {
        let mut p = PieceBase::with_box(0, bb, Some(f));
        let before = p.world_pos(1, 0, 0);
        p.move_by(dx, 0, dz);
        prop_assert_eq!(p.world_pos(1, 0, 0), before.offset(dx, 0, dz));
    }
}
