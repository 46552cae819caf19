mod outpost;

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bastion_runtime::{PopulationService, Runtime, StaticCatalog};
use bastion_world::{
    BastionConfig, ChunkPos, CompoundTag, Dimension, GeneratorKind, LevelHandle, LevelId,
    LevelInfo, MemoryWorld, NetherTerrain, WorldStats, load_config_from_path,
};
use clap::Parser;
use serde::Serialize;

use crate::outpost::NetherOutpost;

#[derive(Parser, Debug)]
#[command(name = "bastion", about = "Populate a demo nether level with piece-built outposts")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides world.seed
    #[arg(long, allow_hyphen_values = true)]
    seed: Option<i64>,
    /// Overrides world.radius (chunks around the origin)
    #[arg(long)]
    radius: Option<i32>,
    /// Write a TOML report of world stats and outpost layouts
    #[arg(long, short)]
    out: Option<PathBuf>,
}

#[derive(Serialize)]
struct Report {
    seed: i64,
    radius: i32,
    loaded_chunks: usize,
    block_writes: u64,
    block_entities: usize,
    outposts: Vec<CompoundTag>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None => BastionConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.world.seed = seed;
    }
    if let Some(radius) = args.radius {
        config.world.radius = radius;
    }
    let seed = config.world.seed;
    let radius = config.world.radius.max(0);

    let world = Arc::new(MemoryWorld::new(seed, config.world.height));
    let terrain = NetherTerrain::new(seed, config.world.height, config.world.lava_level);
    let center = ChunkPos::new(0, 0);
    let loaded = world.generate_area(&terrain, center, radius);
    log::info!(target: "lifecycle", "generated {loaded} chunks around {center:?}");

    let runtime = Arc::new(Runtime::new(config.population.resolved_workers()));
    let outpost = Arc::new(NetherOutpost::new(config.population.max_gen_depth));
    let catalog = StaticCatalog::new().with("outpost", outpost.clone());
    let service = PopulationService::new(runtime.clone(), Arc::new(catalog), config.population.clone());

    let level_id = LevelId(1);
    let info = LevelInfo {
        id: level_id,
        name: "nether".into(),
        dimension: Dimension::Nether,
        generator: GeneratorKind::Nether,
        seed,
    };
    service.on_level_load(LevelHandle::new(info, world.clone()));

    let scheduled = center
        .square_around(radius)
        .filter(|pos| service.on_chunk_populate(level_id, pos.x, pos.z))
        .count();
    runtime.wait_idle();

    let reports = runtime.drain_population_reports();
    let failed: usize = reports.iter().map(|r| r.failed).sum();
    let slowest = reports.iter().map(|r| r.elapsed_ms).max().unwrap_or(0);
    let spawned = runtime.run_main_thread_tasks(1);
    log::info!(
        target: "population",
        "{scheduled} chunks scheduled, {} populated ({failed} populator failures, slowest {slowest}ms), {spawned} block actors applied",
        reports.len()
    );
    service.on_level_unload(level_id);

    let stats = world.stats();
    log::info!(
        target: "lifecycle",
        "world: {} chunks, {} block writes, {} block entities",
        stats.loaded_chunks,
        stats.block_writes,
        stats.block_entities
    );

    if let Some(out) = &args.out {
        // records are written as a reload would see them
        let mut outposts = Vec::new();
        for start in outpost.starts_near(seed, center.x, center.z, radius) {
            let restored = outpost.restore(&start.create_tag())?;
            outposts.push(restored.create_tag());
        }
        write_report(out, seed, radius, stats, outposts)?;
    }
    Ok(())
}

fn write_report(
    path: &Path,
    seed: i64,
    radius: i32,
    stats: WorldStats,
    outposts: Vec<CompoundTag>,
) -> Result<(), Box<dyn Error>> {
    let report = Report {
        seed,
        radius,
        loaded_chunks: stats.loaded_chunks,
        block_writes: stats.block_writes,
        block_entities: stats.block_entities,
        outposts,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, toml::to_string_pretty(&report)?)?;
    log::info!(target: "lifecycle", "wrote report to {}", path.display());
    Ok(())
}
