//! Block states, block ids, and horizontal facing/rotation.
#![forbid(unsafe_code)]

pub mod facing;
pub mod ids;
pub mod state;

// Re-exports for convenience
pub use facing::{Facing, Rotation};
pub use ids::{BlockId, is_liquid, is_replaceable_by_column};
pub use state::BlockState;
