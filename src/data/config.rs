//! Optimizer configuration: starting budgets and process parameters.
//! Every key is optional in the JSON file; missing keys keep their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::resources::Resources;
use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "data/optimizer.json";

pub const DEFAULT_ATTACKER_BUDGET: Resources = Resources::new(22_449_840, 14_911_680, 8_420_160);
pub const DEFAULT_DEFENDER_BUDGET: Resources = Resources::new(2_244_984, 1_491_168, 842_016);

pub const DEFAULT_POPULATION_SIZE: usize = 100;
pub const DEFAULT_ELITE_SIZE: usize = 20;
pub const DEFAULT_WORKERS: usize = 8;
pub const DEFAULT_GENERATIONS: usize = 10;
pub const DEFAULT_MAX_ROUNDS: u32 = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub attacker_budget: Resources,
    pub defender_budget: Resources,
    pub population_size: usize,
    /// Parents are drawn from this many best-ranked genomes per side.
    pub elite_size: usize,
    /// Worker threads for pairing evaluation. 0 uses the rayon default.
    pub workers: usize,
    pub generations: usize,
    pub max_rounds: u32,
    /// Fixed seed for a reproducible run; OS entropy when absent.
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            attacker_budget: DEFAULT_ATTACKER_BUDGET,
            defender_budget: DEFAULT_DEFENDER_BUDGET,
            population_size: DEFAULT_POPULATION_SIZE,
            elite_size: DEFAULT_ELITE_SIZE,
            workers: DEFAULT_WORKERS,
            generations: DEFAULT_GENERATIONS,
            max_rounds: DEFAULT_MAX_ROUNDS,
            seed: None,
        }
    }
}

impl OptimizerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::Invalid(
                "population_size must be at least 1".to_string(),
            ));
        }
        if self.elite_size == 0 || self.elite_size > self.population_size {
            return Err(ConfigError::Invalid(format!(
                "elite_size must be within 1..={}, got {}",
                self.population_size, self.elite_size
            )));
        }
        if self.max_rounds == 0 {
            return Err(ConfigError::Invalid(
                "max_rounds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse and validate a config from JSON text.
pub fn parse_config(raw: &str) -> Result<OptimizerConfig, ConfigError> {
    let config: OptimizerConfig = serde_json::from_str(raw)?;
    config.validate()?;
    Ok(config)
}

/// Load config from a JSON file. A missing file yields the defaults; a file
/// that exists but cannot be read or parsed is an error.
pub fn load_config(path: impl AsRef<Path>) -> Result<OptimizerConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(OptimizerConfig::default());
    }
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&raw)?;
    tracing::debug!(path = %path.display(), ?config, "loaded optimizer config");
    Ok(config)
}
