mod common;

use bastion_blocks::ids;
use bastion_geom::{BlockPos, BoundingBox};
use bastion_structures::{
    PieceDecodeError, PieceIndex, PieceRegistry, PieceTree, SequenceRandom, StructurePiece,
    StructureStart, find_collision_piece,
};
use bastion_world::{ChunkManager, CompoundTag};
use common::{Block, Chain, empty_world};
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[test]
fn collision_returns_first_intersecting_piece() {
    let pieces = vec![
        Block::boxed(BoundingBox::new(0, 0, 0, 4, 4, 4)),
        Block::boxed(BoundingBox::new(10, 0, 0, 14, 4, 4)),
        Block::boxed(BoundingBox::new(12, 0, 0, 20, 4, 4)),
    ];
    let candidate = BoundingBox::new(13, 2, 2, 13, 2, 2);
    assert_eq!(find_collision_piece(&pieces, &candidate), Some(PieceIndex(1)));
    let clear = BoundingBox::new(5, 0, 0, 9, 4, 4);
    assert_eq!(find_collision_piece(&pieces, &clear), None);
}

#[test]
fn collision_prefers_earlier_overlapping_piece() {
    let pieces = vec![
        Block::boxed(BoundingBox::new(0, 0, 0, 5, 5, 5)),
        Block::boxed(BoundingBox::new(10, 0, 0, 15, 5, 5)),
        Block::boxed(BoundingBox::new(3, 0, 0, 8, 5, 5)),
    ];
    let candidate = BoundingBox::new(4, 0, 0, 6, 5, 5);
    assert_eq!(find_collision_piece(&pieces, &candidate), Some(PieceIndex(0)));
    let none: Vec<Box<dyn StructurePiece>> = Vec::new();
    assert_eq!(find_collision_piece(&none, &candidate), None);
}

#[test]
fn collision_touching_faces_counts() {
    let pieces = vec![Block::boxed(BoundingBox::new(0, 0, 0, 4, 4, 4))];
    let touching = BoundingBox::new(4, 0, 0, 8, 4, 4);
    assert_eq!(find_collision_piece(&pieces, &touching), Some(PieceIndex(0)));
}

#[test]
fn pieces_without_box_never_collide() {
    let mut boxless = Block::new(BoundingBox::new(0, 0, 0, 1, 1, 1), None);
    boxless.base.bounding_box = None;
    let pieces: Vec<Box<dyn StructurePiece>> = vec![Box::new(boxless)];
    assert_eq!(find_collision_piece(&pieces, &BoundingBox::new(0, 0, 0, 9, 9, 9)), None);
}

#[test]
fn chain_stops_at_depth_ceiling() {
    let mut rng = SmallRng::seed_from_u64(9);
    let root = Box::new(Chain::at(BlockPos::new(0, 10, 1), 0));
    let start = StructureStart::generate(0, 0, root, &mut rng, 3);
    assert_eq!(start.pieces().len(), 4);
    assert!(start.pieces().iter().all(|p| p.gen_depth() <= 3));
    assert_eq!(start.bounding_box(), Some(&BoundingBox::new(0, 10, 0, 11, 12, 2)));
}

#[test]
fn zero_depth_ceiling_keeps_only_root() {
    let mut rng = SequenceRandom::constant(0);
    let root = Box::new(Chain::at(BlockPos::new(0, 10, 1), 0));
    let start = StructureStart::generate(0, 0, root, &mut rng, 0);
    assert_eq!(start.pieces().len(), 1);
}

#[test]
fn expand_appends_children_after_existing() {
    let mut tree = PieceTree::new(30);
    let root = tree.push(Box::new(Chain::at(BlockPos::new(0, 10, 1), 0)));
    let mut rng = SequenceRandom::constant(0);
    let added = tree.expand(root, root, &mut rng);
    assert_eq!(added, vec![PieceIndex(1)]);
    assert_eq!(tree.get(PieceIndex(1)).map(|p| p.gen_depth()), Some(1));
    assert!(tree.expand(PieceIndex(7), root, &mut rng).is_empty());
}

#[test]
fn post_process_touches_only_the_generation_box() {
    let world = empty_world(32, 1);
    let mut rng = SmallRng::seed_from_u64(2);
    let root = Box::new(Chain::at(BlockPos::new(10, 10, 1), 0));
    let mut start = StructureStart::generate(0, 0, root, &mut rng, 3);
    let mut actors: Vec<CompoundTag> = Vec::new();
    let gen_box = BoundingBox::for_chunk(0, 0, 0, 31);
    let generated = start.post_process(&world, &mut rng, &gen_box, 0, 0, &mut actors);

    // cells at x 10..12 and 13..15 lie in chunk 0; the rest is in chunk 1
    assert_eq!(generated, 2);
    assert_eq!(world.block_state_at(10, 10, 0).id, ids::NETHER_BRICKS);
    assert!(world.block_state_at(16, 10, 0).is_air());
    assert_eq!(actors.len(), 2);
    assert!(actors.iter().all(|t| t.get_string("id") == Some("Chest")));
}

#[test]
fn post_process_outside_structure_is_a_no_op() {
    let world = empty_world(32, 2);
    let mut rng = SmallRng::seed_from_u64(2);
    let root = Box::new(Chain::at(BlockPos::new(0, 10, 1), 0));
    let mut start = StructureStart::generate(0, 0, root, &mut rng, 1);
    let mut actors: Vec<CompoundTag> = Vec::new();
    let far = BoundingBox::for_chunk(2, 2, 0, 31);
    assert_eq!(start.post_process(&world, &mut rng, &far, 2, 2, &mut actors), 0);
    assert_eq!(world.stats().block_writes, 0);
}

#[test]
fn start_survives_tag_roundtrip() {
    let mut rng = SmallRng::seed_from_u64(4);
    let root = Box::new(Chain::at(BlockPos::new(0, 10, 1), 0));
    let start = StructureStart::generate(3, -2, root, &mut rng, 2);
    let tag = start.create_tag();

    let mut registry = PieceRegistry::new();
    registry.register("Chain", Chain::decode);
    let restored = StructureStart::from_tag(&tag, &registry, 2).expect("decode");
    assert_eq!((restored.chunk_x(), restored.chunk_z()), (3, -2));
    assert_eq!(restored.bounding_box(), start.bounding_box());
    let depths: Vec<i32> = restored.pieces().iter().map(|p| p.gen_depth()).collect();
    assert_eq!(depths, vec![0, 1, 2]);
    assert_eq!(restored.create_tag(), tag);
}

#[test]
fn unknown_piece_type_is_an_error() {
    let registry = PieceRegistry::new();
    let mut child = CompoundTag::new();
    child.put_string("id", "Nope");
    assert_eq!(
        registry.decode(&child).err(),
        Some(PieceDecodeError::UnknownType("Nope".to_string()))
    );
    assert_eq!(
        registry.decode(&CompoundTag::new()).err(),
        Some(PieceDecodeError::MissingId)
    );
}

#[test]
fn piece_tag_omits_missing_box() {
    let mut chain = Chain::at(BlockPos::new(0, 0, 0), 2);
    chain.base.bounding_box = None;
    let tag = chain.create_tag();
    assert!(!tag.contains("BB"));
    assert_eq!(tag.get_int("O"), Some(3));
    assert_eq!(tag.get_int("Links"), Some(2));
    let back = Chain::decode(&tag);
    assert!(back.bounding_box().is_none());
}

#[test]
fn moving_a_piece_shifts_its_box() {
    let mut chain = Chain::at(BlockPos::new(0, 0, 1), 0);
    chain.move_by(5, 1, -3);
    assert_eq!(chain.bounding_box(), Some(&BoundingBox::new(5, 1, -3, 7, 3, -1)));
}
