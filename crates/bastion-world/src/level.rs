use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::provider::{BlockEntityHost, ChunkManager};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LevelId(pub u32);

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Overworld,
    Nether,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    Normal,
    Nether,
    Flat,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelInfo {
    pub id: LevelId,
    pub name: String,
    pub dimension: Dimension,
    pub generator: GeneratorKind,
    pub seed: i64,
}

/// Shared handle to a live level: voxel access plus block-entity creation.
#[derive(Clone)]
pub struct LevelHandle {
    pub info: Arc<LevelInfo>,
    pub chunks: Arc<dyn ChunkManager>,
    pub block_entities: Arc<dyn BlockEntityHost>,
}

impl LevelHandle {
    pub fn new<W>(info: LevelInfo, world: Arc<W>) -> Self
    where
        W: ChunkManager + BlockEntityHost + 'static,
    {
        Self {
            info: Arc::new(info),
            chunks: world.clone(),
            block_entities: world,
        }
    }

    #[inline]
    pub fn id(&self) -> LevelId {
        self.info.id
    }
}

impl fmt::Debug for LevelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelHandle")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}
