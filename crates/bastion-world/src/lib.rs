//! Chunk/voxel provider contracts, an in-memory world, level descriptors,
//! tagged records, and population config.
#![forbid(unsafe_code)]

pub mod config;
pub mod level;
pub mod memory;
pub mod provider;
pub mod tag;
pub mod terrain;

mod chunk_pos;

pub use chunk_pos::ChunkPos;
pub use config::{BastionConfig, PopulationConfig, PopulatorRule, WorldConfig, load_config_from_path};
pub use level::{Dimension, GeneratorKind, LevelHandle, LevelId, LevelInfo};
pub use memory::{ChunkColumn, MemoryWorld, WorldStats};
pub use provider::{BlockEntityHost, ChunkManager, FullChunk};
pub use tag::{CompoundTag, Tag};
pub use terrain::NetherTerrain;
