//! Stochastic fleet combat and a co-evolving genetic search over attacker and
//! defender fleet compositions.

pub mod cli;
pub mod combat;
pub mod data;
pub mod error;
pub mod optimizer;
pub mod parallel;

pub use error::{ConfigError, Defect, OptimizerError};
