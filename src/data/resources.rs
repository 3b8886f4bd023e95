//! Resource bundles: unit costs, starting budgets and accumulated losses.

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::error::Defect;

/// Crystal weight used when collapsing a bundle into a single value.
pub const CRYSTAL_WEIGHT: f64 = 1.505520505;
/// Deuterium weight used when collapsing a bundle into a single value.
pub const DEUTERIUM_WEIGHT: f64 = 2.666201117;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub metal: u64,
    pub crystal: u64,
    pub deuterium: u64,
}

impl Resources {
    pub const ZERO: Resources = Resources::new(0, 0, 0);

    pub const fn new(metal: u64, crystal: u64, deuterium: u64) -> Self {
        Self {
            metal,
            crystal,
            deuterium,
        }
    }

    /// Weighted value of the bundle, rounded down.
    pub fn value(&self) -> u64 {
        (self.metal as f64
            + CRYSTAL_WEIGHT * self.crystal as f64
            + DEUTERIUM_WEIGHT * self.deuterium as f64)
            .floor() as u64
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// `cost` repeated `count` times, or None on overflow.
    pub fn times(self, count: u64) -> Option<Resources> {
        Some(Resources {
            metal: self.metal.checked_mul(count)?,
            crystal: self.crystal.checked_mul(count)?,
            deuterium: self.deuterium.checked_mul(count)?,
        })
    }

    /// Spend `count` units of `cost`. Overspending any field is a defect and
    /// leaves the bundle unchanged.
    pub fn allocate_n(&mut self, cost: Resources, count: u64) -> Result<(), Defect> {
        let over_allocation = || Defect::OverAllocation {
            remaining: *self,
            cost,
            count,
        };
        let total = cost.times(count).ok_or_else(over_allocation)?;
        let remaining = Resources {
            metal: self.metal.checked_sub(total.metal).ok_or_else(over_allocation)?,
            crystal: self
                .crystal
                .checked_sub(total.crystal)
                .ok_or_else(over_allocation)?,
            deuterium: self
                .deuterium
                .checked_sub(total.deuterium)
                .ok_or_else(over_allocation)?,
        };
        *self = remaining;
        Ok(())
    }

    /// How many units of `cost` this bundle can pay for. Fields the cost does
    /// not use place no limit; a cost of zero everywhere is unbounded.
    pub fn max_allocation(&self, cost: Resources) -> u64 {
        [
            (self.metal, cost.metal),
            (self.crystal, cost.crystal),
            (self.deuterium, cost.deuterium),
        ]
        .into_iter()
        .filter(|&(_, price)| price > 0)
        .map(|(available, price)| available / price)
        .min()
        .unwrap_or(u64::MAX)
    }
}

impl Add for Resources {
    type Output = Resources;

    fn add(mut self, rhs: Resources) -> Resources {
        self += rhs;
        self
    }
}

impl AddAssign for Resources {
    fn add_assign(&mut self, rhs: Resources) {
        self.metal += rhs.metal;
        self.crystal += rhs.crystal;
        self.deuterium += rhs.deuterium;
    }
}
