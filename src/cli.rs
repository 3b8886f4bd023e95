use serde::Serialize;

use crate::combat::battle::BattleReport;
use crate::combat::rng::Rng;
use crate::data::catalog::{Catalog, UnitStats, UnitType};
use crate::data::config::{load_config, OptimizerConfig, DEFAULT_CONFIG_PATH};
use crate::optimizer::fitness::FitnessArena;
use crate::optimizer::genome::{AttackerGenome, DefenderGenome, Genome};
use crate::optimizer::{run_coevolution, GenerationReport};

const USAGE: &str = "usage: fleetlab <optimize|simulate|catalog>";
const SIMULATE_USAGE: &str =
    "usage: fleetlab simulate <attacker fractions> <defender fractions> [seed] [config.json]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Optimize,
    Simulate,
    Catalog,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("optimize") => Some(Command::Optimize),
        Some("simulate") => Some(Command::Simulate),
        Some("catalog") => Some(Command::Catalog),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Optimize) => handle_optimize(args),
        Some(Command::Simulate) => handle_simulate(args),
        Some(Command::Catalog) => handle_catalog(),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

#[derive(Debug, Serialize)]
struct OptimizeOutput {
    generations: Vec<GenerationReport>,
    champion_attacker: Option<AttackerGenome>,
    champion_defender: Option<DefenderGenome>,
    final_battle: Option<BattleReport>,
}

#[derive(Debug, Serialize)]
struct CatalogRow<'a> {
    unit: UnitType,
    #[serde(flatten)]
    stats: &'a UnitStats,
}

fn handle_optimize(args: &[String]) -> i32 {
    let path = args.get(2).map(String::as_str).unwrap_or(DEFAULT_CONFIG_PATH);
    let Some(config) = config_or_report(path) else {
        return 1;
    };
    let catalog = Catalog::standard();

    let result = match run_coevolution(&config, &catalog, |_| {}) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("optimization failed: {err}");
            return 1;
        }
    };

    let final_battle = match (&result.champion_attacker, &result.champion_defender) {
        (Some(attacker), Some(defender)) => {
            let arena = FitnessArena::from_config(&catalog, &config);
            let mut rng = config.seed.map(Rng::new).unwrap_or_else(Rng::from_entropy);
            match arena.full_battle(attacker, defender, &mut rng) {
                Ok(report) => Some(report),
                Err(err) => {
                    eprintln!("champion battle failed: {err}");
                    return 1;
                }
            }
        }
        _ => None,
    };

    print_json(&OptimizeOutput {
        generations: result.generations,
        champion_attacker: result.champion_attacker,
        champion_defender: result.champion_defender,
        final_battle,
    })
}

fn handle_simulate(args: &[String]) -> i32 {
    let (Some(raw_attacker), Some(raw_defender)) = (args.get(2), args.get(3)) else {
        eprintln!("{SIMULATE_USAGE}");
        return 2;
    };
    let attacker: AttackerGenome = match parse_genome(raw_attacker) {
        Ok(genome) => genome,
        Err(msg) => {
            eprintln!("invalid attacker fractions: {msg}");
            return 2;
        }
    };
    let defender: DefenderGenome = match parse_genome(raw_defender) {
        Ok(genome) => genome,
        Err(msg) => {
            eprintln!("invalid defender fractions: {msg}");
            return 2;
        }
    };
    let seed = parse_seed(args.get(4));
    let path = args.get(5).map(String::as_str).unwrap_or(DEFAULT_CONFIG_PATH);
    let Some(config) = config_or_report(path) else {
        return 1;
    };

    let catalog = Catalog::standard();
    let arena = FitnessArena::from_config(&catalog, &config);
    let mut rng = seed
        .or(config.seed)
        .map(Rng::new)
        .unwrap_or_else(Rng::from_entropy);

    match arena.full_battle(&attacker, &defender, &mut rng) {
        Ok(report) => print_json(&report),
        Err(err) => {
            eprintln!("simulation failed: {err}");
            1
        }
    }
}

fn handle_catalog() -> i32 {
    let catalog = Catalog::standard();
    let rows: Vec<CatalogRow<'_>> = catalog
        .entries()
        .map(|(unit, stats)| CatalogRow { unit, stats })
        .collect();
    print_json(&rows)
}

fn config_or_report(path: &str) -> Option<OptimizerConfig> {
    match load_config(path) {
        Ok(config) => Some(config),
        Err(err) => {
            eprintln!("config error: {err}");
            None
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize output: {err}");
            1
        }
    }
}

/// Comma-separated fractions, e.g. `0,0,0.5,1`.
pub fn parse_genome<const N: usize>(raw: &str) -> Result<Genome<N>, String> {
    let fractions = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|err| format!("'{}': {err}", part.trim()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(bad) = fractions.iter().find(|f| !(0.0..=1.0).contains(*f)) {
        return Err(format!("{bad} is outside [0, 1]"));
    }
    Genome::from_slice(&fractions).map_err(|err| err.to_string())
}

fn parse_seed(raw: Option<&String>) -> Option<u64> {
    let value = raw?;
    match value.parse::<u64>() {
        Ok(seed) => Some(seed),
        Err(_) => {
            eprintln!("invalid seed '{value}', using a random seed");
            None
        }
    }
}
