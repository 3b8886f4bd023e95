use std::path::PathBuf;

use thiserror::Error;

use crate::data::catalog::UnitType;
use crate::data::resources::Resources;

/// Contract violations inside the simulator. These mean a caller broke an
/// invariant, so the current run is aborted instead of retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Defect {
    #[error("over allocated on resources: {count} x {cost:?} exceeds {remaining:?}")]
    OverAllocation {
        remaining: Resources,
        cost: Resources,
        count: u64,
    },
    #[error("allocation has {actual} entries, composition expects {expected}")]
    GenomeLength { expected: usize, actual: usize },
    #[error("{unit_type} costs nothing, so any positive share buys unboundedly many")]
    FreeUnit { unit_type: UnitType },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum OptimizerError {
    #[error(transparent)]
    Defect(#[from] Defect),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("score aggregator panicked")]
    AggregatorPanicked,
}
