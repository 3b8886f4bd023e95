//! Units, fleets, and turning a budget plus allocation fractions into a fleet.

use std::collections::BTreeMap;

use crate::data::catalog::{Catalog, UnitType};
use crate::data::resources::Resources;
use crate::error::Defect;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub hull: u32,
    pub shield: u32,
    pub weapon: u32,
    pub unit_type: UnitType,
    /// Indices into the opposing fleet chosen for the current round.
    pub targets: Vec<usize>,
}

impl Unit {
    pub fn new(unit_type: UnitType, catalog: &Catalog) -> Self {
        let stats = catalog.stats(unit_type);
        Self {
            hull: stats.hull,
            shield: stats.shield,
            weapon: stats.weapon,
            unit_type,
            targets: Vec::new(),
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.hull == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fleet {
    pub units: Vec<Unit>,
    /// Cost of every unit removed so far.
    pub lost: Resources,
}

impl Fleet {
    pub fn new(units: Vec<Unit>) -> Self {
        Self {
            units,
            lost: Resources::ZERO,
        }
    }

    /// `count` fresh units of one type.
    pub fn uniform(unit_type: UnitType, count: usize, catalog: &Catalog) -> Self {
        Self::new((0..count).map(|_| Unit::new(unit_type, catalog)).collect())
    }

    /// Spend `budget` along `composition`. At each position the fraction
    /// `allocation[i]` of what is still affordable is bought; later positions
    /// see only the remainder. The budget is debited in place.
    pub fn build(
        budget: &mut Resources,
        composition: &[UnitType],
        allocation: &[f64],
        catalog: &Catalog,
    ) -> Result<Self, Defect> {
        if composition.len() != allocation.len() {
            return Err(Defect::GenomeLength {
                expected: composition.len(),
                actual: allocation.len(),
            });
        }

        let mut units = Vec::new();
        for (&unit_type, &fraction) in composition.iter().zip(allocation) {
            let cost = catalog.cost(unit_type);
            if cost.is_zero() && fraction > 0.0 {
                return Err(Defect::FreeUnit { unit_type });
            }
            let affordable = budget.max_allocation(cost);
            let count = (affordable as f64 * fraction).floor() as u64;
            if count > 0 {
                budget.allocate_n(cost, count)?;
                units.extend((0..count).map(|_| Unit::new(unit_type, catalog)));
            }
        }
        Ok(Self::new(units))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Unit counts per type.
    pub fn summary(&self) -> BTreeMap<UnitType, usize> {
        let mut counts = BTreeMap::new();
        for unit in &self.units {
            *counts.entry(unit.unit_type).or_insert(0) += 1;
        }
        counts
    }

    /// Drop destroyed units, book their cost as lost, and recharge the
    /// shields of everything that survived.
    pub fn remove_dead_units(&mut self, catalog: &Catalog) {
        let mut lost = Resources::ZERO;
        self.units.retain_mut(|unit| {
            if unit.is_destroyed() {
                lost += catalog.cost(unit.unit_type);
                false
            } else {
                unit.shield = catalog.stats(unit.unit_type).shield;
                true
            }
        });
        self.lost += lost;
    }
}
