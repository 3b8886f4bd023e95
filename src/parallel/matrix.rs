//! All-pairs evaluation: score every (row, column) pairing on the worker pool
//! and fold the results into per-row and per-column totals.
//!
//! Workers only send results; a single aggregator thread owns the score
//! arrays. The call returns once the aggregator has drained the result
//! channel, so every pairing is accounted for before the caller ranks anything.

use std::sync::mpsc;
use std::thread;

use rayon::prelude::*;
use serde::Serialize;

use crate::error::{Defect, OptimizerError};
use crate::parallel::pool::WorkerPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairTask {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug)]
struct PairResult {
    task: PairTask,
    score: Result<f64, Defect>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairScores {
    pub rows: usize,
    pub cols: usize,
    /// Row-major `rows x cols` pairing scores.
    pub matrix: Vec<f64>,
    /// Sum over each row (one entry per attacker).
    pub row_totals: Vec<f64>,
    /// Sum over each column (one entry per defender).
    pub col_totals: Vec<f64>,
}

impl PairScores {
    fn from_matrix(rows: usize, cols: usize, matrix: Vec<f64>) -> Self {
        let mut row_totals = vec![0.0; rows];
        let mut col_totals = vec![0.0; cols];
        for row in 0..rows {
            for col in 0..cols {
                let score = matrix[row * cols + col];
                row_totals[row] += score;
                col_totals[col] += score;
            }
        }
        Self {
            rows,
            cols,
            matrix,
            row_totals,
            col_totals,
        }
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.matrix[row * self.cols + col]
    }
}

/// Score all `rows x cols` pairings with `score_pair` on `pool`.
///
/// Pairings run in no particular order. Totals are folded in index order
/// after the last result arrives, so they do not depend on scheduling.
/// Every pairing runs even if one reports a defect; the first defect
/// received is returned.
pub fn evaluate_all_pairs<F>(
    rows: usize,
    cols: usize,
    pool: &WorkerPool,
    score_pair: F,
) -> Result<PairScores, OptimizerError>
where
    F: Fn(PairTask) -> Result<f64, Defect> + Sync,
{
    let total = rows * cols;
    let (sender, receiver) = mpsc::channel::<PairResult>();

    thread::scope(|scope| {
        let aggregator = scope.spawn(move || {
            let mut matrix = vec![0.0; total];
            let mut defect = None;
            for result in receiver {
                match result.score {
                    Ok(score) => matrix[result.task.row * cols + result.task.col] = score,
                    Err(err) => {
                        defect.get_or_insert(err);
                    }
                }
            }
            (matrix, defect)
        });

        // The last sender clone is dropped when the workers finish, which
        // closes the channel and lets the aggregator drain and stop.
        let score_pair = &score_pair;
        let produced = pool.install(move || {
            (0..total)
                .into_par_iter()
                .map(|index| PairTask {
                    row: index / cols,
                    col: index % cols,
                })
                .for_each_with(sender, |sender, task| {
                    let score = score_pair(task);
                    // The receiver only goes away if the aggregator died, which join reports below.
                    let _ = sender.send(PairResult { task, score });
                });
        });

        let (matrix, defect) = aggregator
            .join()
            .map_err(|_| OptimizerError::AggregatorPanicked)?;
        produced?;
        if let Some(defect) = defect {
            return Err(defect.into());
        }
        Ok(PairScores::from_matrix(rows, cols, matrix))
    })
}
