//! Chunk population scheduling: worker pool, main-thread hand-off, and the
//! level lifecycle that decides which populators run where.
#![forbid(unsafe_code)]

mod populator;
mod service;
mod task;

pub use populator::{Populator, PopulatorCatalog, PopulatorList, StaticCatalog, population_seed};
pub use service::PopulationService;
pub use task::{BlockActorSpawnTask, ChunkPopulationTask, MainThreadTask, PopulationReport};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, unbounded};
use rayon::{ThreadPool, ThreadPoolBuilder};

/// The two scheduling capabilities population needs: run off-thread, and
/// run on the main thread at a later tick.
pub trait TaskScheduler: Send + Sync {
    fn schedule_async(&self, task: ChunkPopulationTask);

    fn schedule_main(&self, task: MainThreadTask);
}

pub struct Runtime {
    job_tx: Sender<ChunkPopulationTask>,
    main_tx: Sender<MainThreadTask>,
    main_rx: Receiver<MainThreadTask>,
    report_rx: Receiver<PopulationReport>,
    _pool: Arc<ThreadPool>,
    queued: Arc<AtomicUsize>,
    inflight: Arc<AtomicUsize>,
    // scheduled and not yet reported; the only counter idle checks read
    pending: Arc<AtomicUsize>,
    workers: usize,
}

impl Runtime {
    pub fn new(workers: usize) -> Self {
        let workers = workers.max(1);
        let (job_tx, job_rx) = unbounded::<ChunkPopulationTask>();
        let (main_tx, main_rx) = unbounded::<MainThreadTask>();
        let (report_tx, report_rx) = unbounded::<PopulationReport>();

        let queued = Arc::new(AtomicUsize::new(0));
        let inflight = Arc::new(AtomicUsize::new(0));
        let pending = Arc::new(AtomicUsize::new(0));

        let pool = Arc::new(
            ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("bastion-populate-{i}"))
                .build()
                .expect("populate pool"),
        );
        for _ in 0..workers {
            let rx = job_rx.clone();
            let main_tx = main_tx.clone();
            let report_tx = report_tx.clone();
            let queued = queued.clone();
            let inflight = inflight.clone();
            let pending = pending.clone();
            pool.spawn(move || {
                while let Ok(task) = rx.recv() {
                    inflight.fetch_add(1, Ordering::AcqRel);
                    queued.fetch_sub(1, Ordering::AcqRel);
                    let report = task.run(|t| {
                        let _ = main_tx.send(t);
                    });
                    let _ = report_tx.send(report);
                    inflight.fetch_sub(1, Ordering::AcqRel);
                    // released only once the report and main-thread tasks are queued
                    pending.fetch_sub(1, Ordering::AcqRel);
                }
            });
        }

        log::info!(target: "population", "runtime started with {workers} workers");
        Self {
            job_tx,
            main_tx,
            main_rx,
            report_rx,
            _pool: pool,
            queued,
            inflight,
            pending,
            workers,
        }
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs every main-thread task queued so far. Returns how many ran.
    pub fn run_main_thread_tasks(&self, tick: u64) -> usize {
        let tasks: Vec<MainThreadTask> = self.main_rx.try_iter().collect();
        let count = tasks.len();
        for task in tasks {
            task.run();
        }
        if count > 0 {
            log::debug!(target: "population", "tick {tick}: ran {count} main-thread tasks");
        }
        count
    }

    pub fn drain_population_reports(&self) -> Vec<PopulationReport> {
        self.report_rx.try_iter().collect()
    }

    /// True once every scheduled population task has sent its report.
    pub fn is_idle(&self) -> bool {
        self.pending.load(Ordering::Acquire) == 0
    }

    /// Blocks until every scheduled population task has finished.
    pub fn wait_idle(&self) {
        while !self.is_idle() {
            thread::sleep(Duration::from_millis(1));
        }
    }

    /// (queued, inflight, pending main-thread tasks)
    pub fn queue_debug_counts(&self) -> (usize, usize, usize) {
        (
            self.queued.load(Ordering::Relaxed),
            self.inflight.load(Ordering::Relaxed),
            self.main_rx.len(),
        )
    }
}

impl TaskScheduler for Runtime {
    fn schedule_async(&self, task: ChunkPopulationTask) {
        self.pending.fetch_add(1, Ordering::AcqRel);
        self.queued.fetch_add(1, Ordering::AcqRel);
        if self.job_tx.send(task).is_err() {
            self.queued.fetch_sub(1, Ordering::AcqRel);
            self.pending.fetch_sub(1, Ordering::AcqRel);
        }
    }

    fn schedule_main(&self, task: MainThreadTask) {
        let _ = self.main_tx.send(task);
    }
}
