use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::level::Dimension;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct BastionConfig {
    #[serde(default)]
    pub population: PopulationConfig,
    #[serde(default)]
    pub world: WorldConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PopulationConfig {
    /// 0 picks the machine's available parallelism.
    #[serde(default)]
    pub workers: usize,
    #[serde(default = "default_max_gen_depth")]
    pub max_gen_depth: i32,
    #[serde(default)]
    pub populate_flat: bool,
    #[serde(default = "default_rules")]
    pub rules: Vec<PopulatorRule>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PopulatorRule {
    pub dimension: Dimension,
    pub populator: String,
}

fn default_max_gen_depth() -> i32 {
    30
}
fn default_rules() -> Vec<PopulatorRule> {
    vec![PopulatorRule {
        dimension: Dimension::Nether,
        populator: "outpost".into(),
    }]
}
impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            max_gen_depth: default_max_gen_depth(),
            populate_flat: false,
            rules: default_rules(),
        }
    }
}

impl PopulationConfig {
    pub fn resolved_workers(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct WorldConfig {
    #[serde(default)]
    pub seed: i64,
    #[serde(default = "default_height")]
    pub height: i32,
    #[serde(default = "default_lava_level")]
    pub lava_level: i32,
    #[serde(default = "default_radius")]
    pub radius: i32,
}
fn default_height() -> i32 {
    128
}
fn default_lava_level() -> i32 {
    31
}
fn default_radius() -> i32 {
    4
}
impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            height: default_height(),
            lava_level: default_lava_level(),
            radius: default_radius(),
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<BastionConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: BastionConfig = toml::from_str(&s)?;
    Ok(cfg)
}
