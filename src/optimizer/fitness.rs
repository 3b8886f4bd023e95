//! Fitness of attacker/defender pairings: build both fleets from the
//! canonical budgets and fight them with the early-stopping battle.

use crate::combat::battle::{BattleReport, BattleSimulator};
use crate::combat::fleet::Fleet;
use crate::combat::rng::Rng;
use crate::data::catalog::{Catalog, ATTACKER_COMPOSITION, DEFENDER_COMPOSITION};
use crate::data::config::OptimizerConfig;
use crate::data::resources::Resources;
use crate::error::{Defect, OptimizerError};
use crate::optimizer::genome::{
    AttackerGenome, AttackerPopulation, DefenderGenome, DefenderPopulation,
};
use crate::parallel::{evaluate_all_pairs, PairScores, PairTask, WorkerPool};

#[derive(Debug, Clone, Copy)]
pub struct FitnessArena<'a> {
    simulator: BattleSimulator<'a>,
    attacker_budget: Resources,
    defender_budget: Resources,
}

impl<'a> FitnessArena<'a> {
    pub fn new(
        catalog: &'a Catalog,
        attacker_budget: Resources,
        defender_budget: Resources,
        max_rounds: u32,
    ) -> Self {
        Self {
            simulator: BattleSimulator::new(catalog, max_rounds),
            attacker_budget,
            defender_budget,
        }
    }

    pub fn from_config(catalog: &'a Catalog, config: &OptimizerConfig) -> Self {
        Self::new(
            catalog,
            config.attacker_budget,
            config.defender_budget,
            config.max_rounds,
        )
    }

    fn build_fleets(
        &self,
        attacker: &AttackerGenome,
        defender: &DefenderGenome,
    ) -> Result<(Fleet, Fleet), Defect> {
        let catalog = self.simulator.catalog();
        Ok((
            attacker.build_fleet(&ATTACKER_COMPOSITION, self.attacker_budget, catalog)?,
            defender.build_fleet(&DEFENDER_COMPOSITION, self.defender_budget, catalog)?,
        ))
    }

    /// Loss ratio of one fight between fresh fleets bred from the two genomes.
    pub fn score_pair(
        &self,
        attacker: &AttackerGenome,
        defender: &DefenderGenome,
        rng: &mut Rng,
    ) -> Result<f64, Defect> {
        let (mut attacking, mut defending) = self.build_fleets(attacker, defender)?;
        Ok(self
            .simulator
            .simulate_fight(&mut attacking, &mut defending, rng))
    }

    /// Full battle between the two genomes' fleets, for reporting.
    pub fn full_battle(
        &self,
        attacker: &AttackerGenome,
        defender: &DefenderGenome,
        rng: &mut Rng,
    ) -> Result<BattleReport, Defect> {
        let (mut attacking, mut defending) = self.build_fleets(attacker, defender)?;
        let outcome = self
            .simulator
            .simulate_combat(&mut attacking, &mut defending, rng);
        Ok(BattleReport::new(outcome, &attacking, &defending))
    }

    /// Random stream for one pairing of a generation.
    pub fn pairing_rng(seed: u64, task: PairTask, cols: usize) -> Rng {
        Rng::for_stream(seed, (task.row * cols + task.col) as u64)
    }

    /// Fight every attacker against every defender. Row totals are attacker
    /// scores, column totals defender scores.
    pub fn evaluate(
        &self,
        attackers: &AttackerPopulation,
        defenders: &DefenderPopulation,
        pool: &WorkerPool,
        seed: u64,
    ) -> Result<PairScores, OptimizerError> {
        let cols = defenders.len();
        tracing::debug!(
            attackers = attackers.len(),
            defenders = cols,
            workers = pool.effective_workers(),
            "evaluating pairings"
        );
        evaluate_all_pairs(attackers.len(), cols, pool, |task| {
            let mut rng = Self::pairing_rng(seed, task, cols);
            self.score_pair(&attackers[task.row], &defenders[task.col], &mut rng)
        })
    }
}
