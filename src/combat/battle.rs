//! Round loop on top of the engine: full battles with a terminal outcome, and
//! the early-stopping fitness battle used by the optimizer.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::combat::engine::process;
use crate::combat::fleet::Fleet;
use crate::combat::rng::Rng;
use crate::data::catalog::{Catalog, UnitType};
use crate::data::resources::Resources;

/// How a full battle ended. Rounds are counted from 0, so a first-round
/// win is `WIN(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", content = "round", rename_all = "snake_case")]
pub enum BattleOutcome {
    Win(u32),
    Loss(u32),
    DrawBothEliminated(u32),
    DrawTimeout,
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Win(round) => write!(f, "WIN({round})"),
            Self::Loss(round) => write!(f, "LOSS({round})"),
            Self::DrawBothEliminated(round) => write!(f, "DRAW-BOTH-LOSE({round})"),
            Self::DrawTimeout => f.write_str("DRAW-TIMEOUT"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SideReport {
    pub lost: Resources,
    pub lost_value: u64,
    pub survivors: BTreeMap<UnitType, usize>,
}

impl SideReport {
    pub fn from_fleet(fleet: &Fleet) -> Self {
        Self {
            lost: fleet.lost,
            lost_value: fleet.lost.value(),
            survivors: fleet.summary(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    pub tag: String,
    pub attacker: SideReport,
    pub defender: SideReport,
}

impl BattleReport {
    pub fn new(outcome: BattleOutcome, attacker: &Fleet, defender: &Fleet) -> Self {
        Self {
            outcome,
            tag: outcome.to_string(),
            attacker: SideReport::from_fleet(attacker),
            defender: SideReport::from_fleet(defender),
        }
    }
}

/// Fitness of a finished fight: defender losses per unit of attacker losses,
/// by weighted value.
///
/// An attacker that lost nothing is scored as if it had lost one unit of
/// value, so a flawless win ranks by the damage it did. Nothing lost on either
/// side scores 0.
pub fn loss_ratio(attacker_lost: Resources, defender_lost: Resources) -> f64 {
    let defender = defender_lost.value() as f64;
    let attacker = attacker_lost.value().max(1) as f64;
    defender / attacker
}

#[derive(Debug, Clone, Copy)]
pub struct BattleSimulator<'a> {
    catalog: &'a Catalog,
    max_rounds: u32,
}

impl<'a> BattleSimulator<'a> {
    pub fn new(catalog: &'a Catalog, max_rounds: u32) -> Self {
        Self {
            catalog,
            max_rounds,
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Attacker fires, defender fires, both sides clear their wrecks.
    pub fn play_round(&self, attacker: &mut Fleet, defender: &mut Fleet, rng: &mut Rng) {
        process(attacker, defender, self.catalog, rng);
        process(defender, attacker, self.catalog, rng);
        attacker.remove_dead_units(self.catalog);
        defender.remove_dead_units(self.catalog);
    }

    /// Fight until one or both sides are wiped out, or the round limit runs out.
    pub fn simulate_combat(
        &self,
        attacker: &mut Fleet,
        defender: &mut Fleet,
        rng: &mut Rng,
    ) -> BattleOutcome {
        for round in 0..self.max_rounds {
            self.play_round(attacker, defender, rng);
            match (attacker.is_empty(), defender.is_empty()) {
                (true, true) => return BattleOutcome::DrawBothEliminated(round),
                (true, false) => return BattleOutcome::Loss(round),
                (false, true) => return BattleOutcome::Win(round),
                (false, false) => {}
            }
        }
        BattleOutcome::DrawTimeout
    }

    /// Same loop as [Self::simulate_combat], scored with [loss_ratio].
    pub fn simulate_fight(&self, attacker: &mut Fleet, defender: &mut Fleet, rng: &mut Rng) -> f64 {
        for _ in 0..self.max_rounds {
            self.play_round(attacker, defender, rng);
            if attacker.is_empty() || defender.is_empty() {
                break;
            }
        }
        loss_ratio(attacker.lost, defender.lost)
    }
}
