//! Generational step: blend elite parents into the next population.

use crate::combat::rng::Rng;
use crate::optimizer::genome::{Genome, Population};

/// Mutation rolls below this force a field to [WEAK_FIELD].
pub const MUTATION_RATE: f64 = 0.001;
pub const WEAK_FIELD: f64 = 0.001;
pub const STRONG_FIELD: f64 = 0.999;

fn in_mutation_band(roll: f64) -> bool {
    roll < MUTATION_RATE || roll > 1.0 - MUTATION_RATE
}

/// One child field from two parent fields.
///
/// `roll` in the bottom or top [MUTATION_RATE] of [0, 1) overrides the
/// parents; otherwise the child is `blend * left + (1 - blend) * right`.
pub fn crossover_field(left: f64, right: f64, roll: f64, blend: f64) -> f64 {
    if roll < MUTATION_RATE {
        WEAK_FIELD
    } else if roll > 1.0 - MUTATION_RATE {
        STRONG_FIELD
    } else {
        // Same blend as `blend * left + (1 - blend) * right`, exact when the parents agree.
        right + blend * (left - right)
    }
}

/// Blend two parents field by field. The blend weight is the mean of two
/// uniform draws, which favours even mixes.
pub fn crossover<const N: usize>(left: &Genome<N>, right: &Genome<N>, rng: &mut Rng) -> Genome<N> {
    let (left, right) = (left.fractions(), right.fractions());
    let mut child = [0.0; N];
    for (slot, field) in child.iter_mut().enumerate() {
        let roll = rng.next_f64();
        let blend = if in_mutation_band(roll) {
            0.0
        } else {
            (rng.next_f64() + rng.next_f64()) / 2.0
        };
        *field = crossover_field(left[slot], right[slot], roll, blend);
    }
    Genome::new(child)
}

/// Next generation of `size` genomes, each bred from two parents drawn with
/// replacement from `elite` (population indices).
pub fn reproduce<const N: usize>(
    population: &Population<N>,
    elite: &[usize],
    size: usize,
    rng: &mut Rng,
) -> Population<N> {
    if elite.is_empty() {
        return population.clone();
    }
    let children = (0..size)
        .map(|_| {
            let mother = &population[elite[rng.below(elite.len())]];
            let father = &population[elite[rng.below(elite.len())]];
            crossover(mother, father, rng)
        })
        .collect();
    Population::new(children)
}
