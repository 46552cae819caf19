//! Structure pieces: orientation transform, fill primitives, piece trees,
//! collision search, and persistence.
#![forbid(unsafe_code)]

pub mod actors;
pub mod fill;
pub mod piece;
pub mod probe;
pub mod random;
pub mod registry;
pub mod selector;
pub mod start;
pub mod tree;

pub use actors::{BlockActorSink, block_actor_tag};
pub use piece::{PieceBase, StructurePiece, orient_box};
pub use random::{RandomSource, SequenceRandom};
pub use registry::{PieceDecodeError, PieceDecoder, PieceRegistry};
pub use selector::{BlockSelector, ScatterSelector};
pub use start::StructureStart;
pub use tree::{PieceIndex, PieceSink, PieceTree, find_collision_piece};
