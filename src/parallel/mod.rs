pub mod matrix;
pub mod pool;

pub use matrix::{evaluate_all_pairs, PairScores, PairTask};
pub use pool::WorkerPool;
