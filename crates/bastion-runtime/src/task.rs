use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use bastion_world::{CompoundTag, LevelHandle};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::populator::{PopulatorList, population_seed};

/// Population of one chunk by every populator resolved for its level.
pub struct ChunkPopulationTask {
    pub level: LevelHandle,
    pub chunk_x: i32,
    pub chunk_z: i32,
    pub populators: PopulatorList,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopulationReport {
    pub chunk_x: i32,
    pub chunk_z: i32,
    pub populators_run: usize,
    pub failed: usize,
    pub block_actors: usize,
    pub elapsed_ms: u32,
}

impl ChunkPopulationTask {
    /// Runs every populator in order against the chunk. Block-actor records
    /// they produce are handed to `schedule_main` as main-thread tasks. A
    /// panicking populator is logged and skipped.
    pub fn run(self, mut schedule_main: impl FnMut(MainThreadTask)) -> PopulationReport {
        let t0 = Instant::now();
        let ChunkPopulationTask {
            level,
            chunk_x,
            chunk_z,
            populators,
        } = self;

        let seed = population_seed(level.info.seed, chunk_x, chunk_z);
        let mut random = SmallRng::seed_from_u64(seed);
        let mut actors: Vec<CompoundTag> = Vec::new();
        let mut failed = 0;

        for populator in populators.iter() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                populator.populate(
                    level.chunks.as_ref(),
                    chunk_x,
                    chunk_z,
                    &mut random,
                    &mut actors,
                )
            }));
            if outcome.is_err() {
                failed += 1;
                log::error!(
                    target: "population",
                    "populator '{}' panicked in chunk ({chunk_x}, {chunk_z}) of {}",
                    populator.name(),
                    level.id()
                );
            }
        }

        let block_actors = actors.len();
        for tag in actors {
            schedule_main(MainThreadTask::SpawnBlockActor(BlockActorSpawnTask {
                level: level.clone(),
                tag,
            }));
        }

        let elapsed_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
        log::debug!(
            target: "population",
            "populated chunk ({chunk_x}, {chunk_z}) of {} in {elapsed_ms}ms: {} populators, {block_actors} block actors queued",
            level.id(),
            populators.len()
        );
        PopulationReport {
            chunk_x,
            chunk_z,
            populators_run: populators.len(),
            failed,
            block_actors,
            elapsed_ms,
        }
    }
}

/// Creates one block entity from its record on the main thread.
pub struct BlockActorSpawnTask {
    pub level: LevelHandle,
    pub tag: CompoundTag,
}

impl BlockActorSpawnTask {
    pub fn run(self) -> bool {
        let Some(id) = self.tag.get_string("id") else {
            log::warn!(target: "population", "block actor record without id dropped");
            return false;
        };
        let (Some(x), Some(z)) = (self.tag.get_int("x"), self.tag.get_int("z")) else {
            log::warn!(target: "population", "block actor '{id}' without position dropped");
            return false;
        };
        let Some(chunk) = self.level.chunks.chunk(x >> 4, z >> 4) else {
            log::warn!(
                target: "population",
                "chunk ({}, {}) of {} not loaded; block actor '{id}' dropped",
                x >> 4,
                z >> 4,
                self.level.id()
            );
            return false;
        };
        let created = self
            .level
            .block_entities
            .create_block_entity(id, chunk.as_ref(), &self.tag);
        log::trace!(target: "population", "block actor '{id}' at ({x}, {z}): created={created}");
        created
    }
}

pub enum MainThreadTask {
    SpawnBlockActor(BlockActorSpawnTask),
}

impl MainThreadTask {
    pub fn run(self) -> bool {
        match self {
            MainThreadTask::SpawnBlockActor(task) => task.run(),
        }
    }
}
