use std::sync::{Arc, PoisonError, RwLock};

use bastion_world::{GeneratorKind, LevelHandle, LevelId, LevelInfo, PopulationConfig};
use hashbrown::HashMap;

use crate::TaskScheduler;
use crate::populator::{Populator, PopulatorCatalog, PopulatorList};
use crate::task::ChunkPopulationTask;

struct LevelEntry {
    handle: LevelHandle,
    populators: PopulatorList,
}

/// Reacts to level lifecycle events: resolves populators when a level
/// loads, schedules population when its chunks are populated, and forgets
/// the level on unload.
pub struct PopulationService<S: TaskScheduler> {
    scheduler: Arc<S>,
    catalog: Arc<dyn PopulatorCatalog>,
    config: PopulationConfig,
    levels: RwLock<HashMap<LevelId, LevelEntry>>,
}

impl<S: TaskScheduler> PopulationService<S> {
    pub fn new(
        scheduler: Arc<S>,
        catalog: Arc<dyn PopulatorCatalog>,
        config: PopulationConfig,
    ) -> Self {
        Self {
            scheduler,
            catalog,
            config,
            levels: RwLock::new(HashMap::new()),
        }
    }

    #[inline]
    pub fn scheduler(&self) -> &Arc<S> {
        &self.scheduler
    }

    /// Populators configured for `info`'s dimension. Flat levels get none
    /// unless `populate_flat` is set.
    pub fn resolve_populators(&self, info: &LevelInfo) -> PopulatorList {
        if info.generator == GeneratorKind::Flat && !self.config.populate_flat {
            return Arc::from(Vec::<Arc<dyn Populator>>::new());
        }
        let mut list: Vec<Arc<dyn Populator>> = Vec::new();
        for rule in self.config.rules.iter().filter(|r| r.dimension == info.dimension) {
            match self.catalog.resolve(&rule.populator) {
                Some(p) => list.push(p),
                None => log::warn!(
                    target: "lifecycle",
                    "no populator named '{}' for {}",
                    rule.populator,
                    info.name
                ),
            }
        }
        Arc::from(list)
    }

    /// Records the level's populator list, replacing any earlier entry.
    /// Returns the number of active populators.
    pub fn on_level_load(&self, level: LevelHandle) -> usize {
        let populators = self.resolve_populators(&level.info);
        let count = populators.len();
        log::info!(
            target: "lifecycle",
            "{} '{}' loaded ({:?}/{:?}): {count} populators",
            level.id(),
            level.info.name,
            level.info.dimension,
            level.info.generator
        );
        self.levels
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(level.id(), LevelEntry { handle: level, populators });
        count
    }

    /// Schedules population of one chunk. Unknown levels and levels with no
    /// populators schedule nothing; returns whether a task was scheduled.
    pub fn on_chunk_populate(&self, level: LevelId, chunk_x: i32, chunk_z: i32) -> bool {
        let task = {
            let levels = self.levels.read().unwrap_or_else(PoisonError::into_inner);
            let Some(entry) = levels.get(&level) else {
                log::trace!(target: "lifecycle", "populate ({chunk_x}, {chunk_z}) for inactive {level}");
                return false;
            };
            if entry.populators.is_empty() {
                return false;
            }
            ChunkPopulationTask {
                level: entry.handle.clone(),
                chunk_x,
                chunk_z,
                populators: Arc::clone(&entry.populators),
            }
        };
        log::trace!(target: "population", "scheduling chunk ({chunk_x}, {chunk_z}) of {level}");
        self.scheduler.schedule_async(task);
        true
    }

    /// Drops the level's entry; later populate events for it are ignored.
    pub fn on_level_unload(&self, level: LevelId) -> bool {
        let removed = self
            .levels
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&level)
            .is_some();
        if removed {
            log::info!(target: "lifecycle", "{level} unloaded");
        }
        removed
    }

    pub fn populators_for(&self, level: LevelId) -> Option<PopulatorList> {
        self.levels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&level)
            .map(|e| Arc::clone(&e.populators))
    }

    pub fn active_levels(&self) -> usize {
        self.levels.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}
