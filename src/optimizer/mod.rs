pub mod fitness;
pub mod genetic;
pub mod genome;
pub mod ranking;

use serde::Serialize;

use crate::combat::rng::Rng;
use crate::data::catalog::Catalog;
use crate::data::config::OptimizerConfig;
use crate::error::OptimizerError;
use crate::optimizer::fitness::FitnessArena;
use crate::optimizer::genetic::reproduce;
use crate::optimizer::genome::{
    AttackerGenome, AttackerPopulation, DefenderGenome, DefenderPopulation,
};
use crate::optimizer::ranking::{best, elite_indices, rank_scores, Preference, RankedScore};
use crate::parallel::{PairScores, WorkerPool};

/// Best of each side after one generation was scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationReport {
    /// 1-based generation number.
    pub generation: usize,
    pub best_attacker_score: f64,
    pub best_defender_score: f64,
    pub best_attacker: AttackerGenome,
    pub best_defender: DefenderGenome,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoevolutionResult {
    pub generations: Vec<GenerationReport>,
    /// Best attacker of the last scored generation.
    pub champion_attacker: Option<AttackerGenome>,
    /// Best defender of the last scored generation.
    pub champion_defender: Option<DefenderGenome>,
    pub attackers: AttackerPopulation,
    pub defenders: DefenderPopulation,
}

/// Ranked scores for both sides of one scored generation.
#[derive(Debug, Clone)]
pub struct Standings {
    pub attackers: Vec<RankedScore>,
    pub defenders: Vec<RankedScore>,
}

impl Standings {
    pub fn from_scores(scores: &PairScores) -> Self {
        Self {
            attackers: rank_scores(&scores.row_totals),
            defenders: rank_scores(&scores.col_totals),
        }
    }

    fn report(
        &self,
        generation: usize,
        attackers: &AttackerPopulation,
        defenders: &DefenderPopulation,
    ) -> Option<GenerationReport> {
        let top_attacker = best(&self.attackers, Preference::Highest)?;
        let top_defender = best(&self.defenders, Preference::Lowest)?;
        Some(GenerationReport {
            generation,
            best_attacker_score: top_attacker.score,
            best_defender_score: top_defender.score,
            best_attacker: *attackers.get(top_attacker.index)?,
            best_defender: *defenders.get(top_defender.index)?,
        })
    }
}

/// Breed both populations from their elites. Attackers breed from the
/// highest scores, defenders from the lowest.
pub fn evolution_step(
    attackers: &AttackerPopulation,
    defenders: &DefenderPopulation,
    standings: &Standings,
    elite_size: usize,
    rng: &mut Rng,
) -> (AttackerPopulation, DefenderPopulation) {
    let attacker_elite = elite_indices(&standings.attackers, elite_size, Preference::Highest);
    let defender_elite = elite_indices(&standings.defenders, elite_size, Preference::Lowest);
    (
        reproduce(attackers, &attacker_elite, attackers.len(), rng),
        reproduce(defenders, &defender_elite, defenders.len(), rng),
    )
}

/// Co-evolve attacker and defender allocations for `config.generations`
/// generations. `on_generation` sees each report as soon as it is ready.
pub fn run_coevolution<F>(
    config: &OptimizerConfig,
    catalog: &Catalog,
    mut on_generation: F,
) -> Result<CoevolutionResult, OptimizerError>
where
    F: FnMut(&GenerationReport),
{
    config.validate()?;

    let mut rng = config.seed.map(Rng::new).unwrap_or_else(Rng::from_entropy);
    let arena = FitnessArena::from_config(catalog, config);
    let pool = WorkerPool::with_workers(config.workers);

    let mut attackers = AttackerPopulation::random(config.population_size, &mut rng);
    let mut defenders = DefenderPopulation::random(config.population_size, &mut rng);
    let mut reports = Vec::with_capacity(config.generations);

    for generation in 1..=config.generations {
        let scores = arena.evaluate(&attackers, &defenders, &pool, rng.next_u64())?;
        let standings = Standings::from_scores(&scores);

        if let Some(report) = standings.report(generation, &attackers, &defenders) {
            tracing::info!(
                generation,
                best_attacker_score = report.best_attacker_score,
                best_defender_score = report.best_defender_score,
                best_attacker = ?report.best_attacker.fractions(),
                best_defender = ?report.best_defender.fractions(),
                "generation scored"
            );
            on_generation(&report);
            reports.push(report);
        }

        (attackers, defenders) =
            evolution_step(&attackers, &defenders, &standings, config.elite_size, &mut rng);
    }

    Ok(CoevolutionResult {
        champion_attacker: reports.last().map(|report| report.best_attacker),
        champion_defender: reports.last().map(|report| report.best_defender),
        generations: reports,
        attackers,
        defenders,
    })
}
