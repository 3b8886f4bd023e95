//! Allocation genomes and populations.
//!
//! A genome holds one spend fraction per slot of a composition. The length is
//! a const parameter, so a genome can only be turned into a fleet with a
//! composition of the same length.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::combat::fleet::Fleet;
use crate::combat::rng::Rng;
use crate::data::catalog::{Catalog, UnitType};
use crate::data::resources::Resources;
use crate::error::Defect;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Genome<const N: usize>([f64; N]);

pub type AttackerGenome = Genome<4>;
pub type DefenderGenome = Genome<5>;

impl<const N: usize> Genome<N> {
    pub const fn new(fractions: [f64; N]) -> Self {
        Self(fractions)
    }

    pub fn from_slice(fractions: &[f64]) -> Result<Self, Defect> {
        let array: [f64; N] = fractions.try_into().map_err(|_| Defect::GenomeLength {
            expected: N,
            actual: fractions.len(),
        })?;
        Ok(Self(array))
    }

    /// Random fractions for every slot but the last, which is pinned to 1.0
    /// so the remaining budget is always spent.
    pub fn random(rng: &mut Rng) -> Self {
        let mut fractions = [1.0; N];
        if let Some((_, head)) = fractions.split_last_mut() {
            for slot in head {
                *slot = rng.next_f64();
            }
        }
        Self(fractions)
    }

    pub fn fractions(&self) -> &[f64; N] {
        &self.0
    }

    /// Buy a fleet from a copy of `budget`.
    pub fn build_fleet(
        &self,
        composition: &[UnitType; N],
        budget: Resources,
        catalog: &Catalog,
    ) -> Result<Fleet, Defect> {
        let mut remaining = budget;
        Fleet::build(&mut remaining, composition, &self.0, catalog)
    }
}

impl<const N: usize> Serialize for Genome<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'de, const N: usize> Deserialize<'de> for Genome<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fractions = Vec::<f64>::deserialize(deserializer)?;
        Self::from_slice(&fractions).map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Population<const N: usize> {
    genomes: Vec<Genome<N>>,
}

pub type AttackerPopulation = Population<4>;
pub type DefenderPopulation = Population<5>;

impl<const N: usize> Population<N> {
    pub fn new(genomes: Vec<Genome<N>>) -> Self {
        Self { genomes }
    }

    pub fn random(size: usize, rng: &mut Rng) -> Self {
        Self::new((0..size).map(|_| Genome::random(rng)).collect())
    }

    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Genome<N>> {
        self.genomes.get(index)
    }

    pub fn genomes(&self) -> &[Genome<N>] {
        &self.genomes
    }
}

impl<const N: usize> std::ops::Index<usize> for Population<N> {
    type Output = Genome<N>;

    fn index(&self, index: usize) -> &Genome<N> {
        &self.genomes[index]
    }
}
