//! Score one generation's pairing matrix on a single worker and on the full
//! pool, then print timings and speedup.
//!
//! Usage: cargo run --release --bin benchmark_parallel_speedup [population] [workers]

use std::env;
use std::time::Instant;

use fleetlab::combat::Rng;
use fleetlab::data::{Catalog, OptimizerConfig};
use fleetlab::optimizer::fitness::FitnessArena;
use fleetlab::optimizer::genome::{AttackerPopulation, DefenderPopulation};
use fleetlab::parallel::WorkerPool;

fn main() {
    let args: Vec<String> = env::args().collect();
    let population = args.get(1).and_then(|v| v.parse().ok()).unwrap_or(40usize);
    let workers = args.get(2).and_then(|v| v.parse().ok()).unwrap_or(8usize);
    let seed = 12345u64;

    let catalog = Catalog::standard();
    let config = OptimizerConfig::default();
    let arena = FitnessArena::from_config(&catalog, &config);
    let mut rng = Rng::new(seed);
    let attackers = AttackerPopulation::random(population, &mut rng);
    let defenders = DefenderPopulation::random(population, &mut rng);
    let pairings = population * population;

    println!("Pairing matrix: {population} x {population} ({pairings} fights)");
    println!();

    let t0 = Instant::now();
    let single = match arena.evaluate(&attackers, &defenders, &WorkerPool::with_workers(1), seed) {
        Ok(scores) => scores,
        Err(err) => {
            eprintln!("single worker evaluation failed: {err}");
            std::process::exit(1);
        }
    };
    let elapsed_single = t0.elapsed();
    let single_ms = elapsed_single.as_secs_f64() * 1000.0;
    println!(
        "1 worker:    {:.2} ms  ({:.1} fights/s)",
        single_ms,
        pairings as f64 / elapsed_single.as_secs_f64()
    );

    let t0 = Instant::now();
    let pooled = match arena.evaluate(&attackers, &defenders, &WorkerPool::with_workers(workers), seed) {
        Ok(scores) => scores,
        Err(err) => {
            eprintln!("pooled evaluation failed: {err}");
            std::process::exit(1);
        }
    };
    let elapsed_pooled = t0.elapsed();
    let pooled_ms = elapsed_pooled.as_secs_f64() * 1000.0;
    println!(
        "{} workers:   {:.2} ms  ({:.1} fights/s)",
        workers,
        pooled_ms,
        pairings as f64 / elapsed_pooled.as_secs_f64()
    );

    println!();
    println!("Speedup:     {:.2}x", single_ms / pooled_ms);

    assert_eq!(single, pooled, "scores must not depend on worker count");
    println!("(Scores match across worker counts)");
}
