use std::sync::{Arc, Mutex};

use bastion_runtime::{
    ChunkPopulationTask, MainThreadTask, Populator, PopulationService, StaticCatalog, TaskScheduler,
};
use bastion_structures::{BlockActorSink, RandomSource};
use bastion_world::{
    ChunkManager, Dimension, GeneratorKind, LevelHandle, LevelId, LevelInfo, MemoryWorld,
    PopulationConfig, PopulatorRule,
};

#[derive(Default)]
struct RecordingScheduler {
    async_tasks: Mutex<Vec<ChunkPopulationTask>>,
    main_tasks: Mutex<Vec<MainThreadTask>>,
}

impl TaskScheduler for RecordingScheduler {
    fn schedule_async(&self, task: ChunkPopulationTask) {
        self.async_tasks.lock().unwrap().push(task);
    }

    fn schedule_main(&self, task: MainThreadTask) {
        self.main_tasks.lock().unwrap().push(task);
    }
}

struct Noop;

impl Populator for Noop {
    fn name(&self) -> &str {
        "noop"
    }

    fn populate(
        &self,
        _level: &dyn ChunkManager,
        _chunk_x: i32,
        _chunk_z: i32,
        _random: &mut dyn RandomSource,
        _actors: &mut dyn BlockActorSink,
    ) {
    }
}

fn level(id: u32, dimension: Dimension, generator: GeneratorKind) -> LevelHandle {
    let info = LevelInfo {
        id: LevelId(id),
        name: format!("level-{id}"),
        dimension,
        generator,
        seed: 42,
    };
    LevelHandle::new(info, Arc::new(MemoryWorld::new(42, 64)))
}

fn service(config: PopulationConfig) -> PopulationService<RecordingScheduler> {
    let catalog = StaticCatalog::new().with("outpost", Arc::new(Noop));
    PopulationService::new(Arc::new(RecordingScheduler::default()), Arc::new(catalog), config)
}

fn scheduled(s: &PopulationService<RecordingScheduler>) -> usize {
    s.scheduler().async_tasks.lock().unwrap().len()
}

#[test]
fn level_without_populators_schedules_nothing() {
    let s = service(PopulationConfig::default());
    let lvl = level(1, Dimension::Overworld, GeneratorKind::Normal);
    assert_eq!(s.on_level_load(lvl), 0);
    assert!(!s.on_chunk_populate(LevelId(1), 0, 0));
    assert_eq!(scheduled(&s), 0);
}

#[test]
fn one_populator_schedules_one_task_with_the_shared_list() {
    let s = service(PopulationConfig::default());
    let lvl = level(2, Dimension::Nether, GeneratorKind::Nether);
    assert_eq!(s.on_level_load(lvl), 1);
    assert!(s.on_chunk_populate(LevelId(2), 3, -4));

    let tasks = s.scheduler().async_tasks.lock().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!((tasks[0].chunk_x, tasks[0].chunk_z), (3, -4));
    let list = s.populators_for(LevelId(2)).unwrap();
    assert!(Arc::ptr_eq(&tasks[0].populators, &list));
    assert_eq!(tasks[0].populators[0].name(), "noop");
}

#[test]
fn unknown_level_is_ignored() {
    let s = service(PopulationConfig::default());
    assert!(!s.on_chunk_populate(LevelId(9), 0, 0));
    assert_eq!(scheduled(&s), 0);
}

#[test]
fn flat_levels_are_excluded_by_default() {
    let s = service(PopulationConfig::default());
    assert_eq!(s.on_level_load(level(3, Dimension::Nether, GeneratorKind::Flat)), 0);
    assert_eq!(s.active_levels(), 1);
    assert!(!s.on_chunk_populate(LevelId(3), 0, 0));

    let s = service(PopulationConfig {
        populate_flat: true,
        ..PopulationConfig::default()
    });
    assert_eq!(s.on_level_load(level(3, Dimension::Nether, GeneratorKind::Flat)), 1);
}

#[test]
fn unload_drops_later_events() {
    let s = service(PopulationConfig::default());
    s.on_level_load(level(4, Dimension::Nether, GeneratorKind::Nether));
    assert!(s.on_chunk_populate(LevelId(4), 0, 0));
    assert!(s.on_level_unload(LevelId(4)));
    assert!(!s.on_level_unload(LevelId(4)));
    assert!(!s.on_chunk_populate(LevelId(4), 1, 0));
    assert_eq!(scheduled(&s), 1);
    assert_eq!(s.active_levels(), 0);
}

#[test]
fn unknown_populator_keys_are_skipped() {
    let config = PopulationConfig {
        rules: vec![
            PopulatorRule {
                dimension: Dimension::End,
                populator: "missing".into(),
            },
            PopulatorRule {
                dimension: Dimension::End,
                populator: "outpost".into(),
            },
        ],
        ..PopulationConfig::default()
    };
    let s = service(config);
    assert_eq!(s.on_level_load(level(5, Dimension::End, GeneratorKind::Normal)), 1);
}
