pub mod catalog;
pub mod config;
pub mod resources;

pub use catalog::{Catalog, UnitStats, UnitType, ATTACKER_COMPOSITION, DEFENDER_COMPOSITION};
pub use config::{load_config, parse_config, OptimizerConfig, DEFAULT_CONFIG_PATH};
pub use resources::Resources;
