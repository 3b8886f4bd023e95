//! Static unit table: build cost, hull, shield, weapon power and rapid fire.
//!
//! The table is plain data. Callers own a [Catalog] and lend it to the fleet
//! builder, the combat engine and the battle simulator.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::resources::Resources;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitType {
    LightFighter,
    HeavyFighter,
    Cruiser,
    Battleship,
    RocketLauncher,
    LightLaser,
    HeavyLaser,
    GaussCannon,
    IonCannon,
}

impl UnitType {
    pub const ALL: [UnitType; 9] = [
        UnitType::LightFighter,
        UnitType::HeavyFighter,
        UnitType::Cruiser,
        UnitType::Battleship,
        UnitType::RocketLauncher,
        UnitType::LightLaser,
        UnitType::HeavyLaser,
        UnitType::GaussCannon,
        UnitType::IonCannon,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::LightFighter => "LightFighter",
            Self::HeavyFighter => "HeavyFighter",
            Self::Cruiser => "Cruiser",
            Self::Battleship => "Battleship",
            Self::RocketLauncher => "RocketLauncher",
            Self::LightLaser => "LightLaser",
            Self::HeavyLaser => "HeavyLaser",
            Self::GaussCannon => "GaussCannon",
            Self::IonCannon => "IonCannon",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Attacker spend order. The last slot soaks up whatever budget is left.
pub const ATTACKER_COMPOSITION: [UnitType; 4] = [
    UnitType::LightFighter,
    UnitType::HeavyFighter,
    UnitType::Cruiser,
    UnitType::Battleship,
];

/// Defender spend order.
pub const DEFENDER_COMPOSITION: [UnitType; 5] = [
    UnitType::RocketLauncher,
    UnitType::LightLaser,
    UnitType::HeavyLaser,
    UnitType::IonCannon,
    UnitType::GaussCannon,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStats {
    pub cost: Resources,
    pub hull: u32,
    pub shield: u32,
    pub weapon: u32,
}

impl UnitStats {
    pub const fn new(cost: Resources, hull: u32, shield: u32, weapon: u32) -> Self {
        Self {
            cost,
            hull,
            shield,
            weapon,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    stats: [UnitStats; 9],
    rapid_fire: HashMap<(UnitType, UnitType), f64>,
}

impl Catalog {
    pub fn standard() -> Self {
        let stats = [
            UnitStats::new(Resources::new(3000, 1000, 0), 800, 20, 100),
            UnitStats::new(Resources::new(6000, 4000, 0), 2000, 50, 300),
            UnitStats::new(Resources::new(20000, 7000, 2000), 5400, 100, 800),
            UnitStats::new(Resources::new(45000, 15000, 0), 12000, 400, 2000),
            UnitStats::new(Resources::new(2000, 0, 0), 400, 40, 160),
            UnitStats::new(Resources::new(1500, 500, 0), 400, 50, 200),
            UnitStats::new(Resources::new(6000, 2000, 0), 1600, 200, 500),
            UnitStats::new(Resources::new(20000, 15000, 2000), 7000, 400, 2200),
            UnitStats::new(Resources::new(2000, 6000, 0), 1600, 1000, 300),
        ];
        let rapid_fire = HashMap::from([
            ((UnitType::Cruiser, UnitType::LightFighter), 5.0 / 6.0),
            ((UnitType::Cruiser, UnitType::RocketLauncher), 0.9),
        ]);
        Self { stats, rapid_fire }
    }

    /// Replace one row of the table.
    pub fn with_stats(mut self, unit_type: UnitType, stats: UnitStats) -> Self {
        self.stats[unit_type.index()] = stats;
        self
    }

    pub fn stats(&self, unit_type: UnitType) -> &UnitStats {
        &self.stats[unit_type.index()]
    }

    pub fn cost(&self, unit_type: UnitType) -> Resources {
        self.stats(unit_type).cost
    }

    /// Chance that `attacker` picks yet another target after a shot, keyed on
    /// the reference unit type. Zero for pairs without rapid fire.
    pub fn rapid_fire(&self, attacker: UnitType, reference: UnitType) -> f64 {
        self.rapid_fire
            .get(&(attacker, reference))
            .copied()
            .unwrap_or(0.0)
    }

    /// Rows in declaration order, for reporting.
    pub fn entries(&self) -> impl Iterator<Item = (UnitType, &UnitStats)> + '_ {
        UnitType::ALL.into_iter().map(move |unit_type| (unit_type, self.stats(unit_type)))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
