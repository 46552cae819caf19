use std::sync::Arc;

use bastion_structures::{BlockActorSink, RandomSource};
use bastion_world::ChunkManager;
use hashbrown::HashMap;

/// Writes one kind of structure into a chunk. Runs on worker threads, so it
/// may only touch raw voxels; block entities go through `actors`.
pub trait Populator: Send + Sync {
    fn name(&self) -> &str;

    fn populate(
        &self,
        level: &dyn ChunkManager,
        chunk_x: i32,
        chunk_z: i32,
        random: &mut dyn RandomSource,
        actors: &mut dyn BlockActorSink,
    );
}

/// Populators resolved for one level. Shared unchanged by every task for
/// that level.
pub type PopulatorList = Arc<[Arc<dyn Populator>]>;

/// Resolves the populator keys named in configuration.
pub trait PopulatorCatalog: Send + Sync {
    fn resolve(&self, key: &str) -> Option<Arc<dyn Populator>>;
}

#[derive(Default)]
pub struct StaticCatalog {
    entries: HashMap<String, Arc<dyn Populator>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, populator: Arc<dyn Populator>) -> Self {
        self.insert(key, populator);
        self
    }

    pub fn insert(&mut self, key: &str, populator: Arc<dyn Populator>) {
        self.entries.insert(key.to_string(), populator);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PopulatorCatalog for StaticCatalog {
    fn resolve(&self, key: &str) -> Option<Arc<dyn Populator>> {
        self.entries.get(key).cloned()
    }
}

/// Seed of a chunk's population stream. The chunk terms mix in 32-bit
/// arithmetic and are sign-extended before the level seed is applied, so the
/// value depends only on the level seed and the chunk coordinates.
pub fn population_seed(level_seed: i64, chunk_x: i32, chunk_z: i32) -> u64 {
    let chunk_mix = (0xdead_beef_u32 as i32) ^ chunk_x.wrapping_shl(8) ^ chunk_z;
    (i64::from(chunk_mix) ^ level_seed) as u64
}
