use serde::Serialize;

/// A score paired with the population index it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedScore {
    pub index: usize,
    pub score: f64,
}

/// Which end of the ranking breeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    /// Attackers: a high loss ratio means the attacker traded well.
    Highest,
    /// Defenders: a low loss ratio means the defender traded well.
    Lowest,
}

/// Scores sorted ascending, ties broken by index.
pub fn rank_scores(scores: &[f64]) -> Vec<RankedScore> {
    let mut ranked: Vec<RankedScore> = scores
        .iter()
        .enumerate()
        .map(|(index, &score)| RankedScore { index, score })
        .collect();

    ranked.sort_by(|left, right| {
        left.score
            .total_cmp(&right.score)
            .then_with(|| left.index.cmp(&right.index))
    });

    ranked
}

/// Population indices of the `size` best entries, best first.
pub fn elite_indices(ranked: &[RankedScore], size: usize, preference: Preference) -> Vec<usize> {
    let size = size.min(ranked.len());
    match preference {
        Preference::Highest => ranked.iter().rev().take(size).map(|r| r.index).collect(),
        Preference::Lowest => ranked.iter().take(size).map(|r| r.index).collect(),
    }
}

/// The single best entry, if any.
pub fn best(ranked: &[RankedScore], preference: Preference) -> Option<RankedScore> {
    match preference {
        Preference::Highest => ranked.last().copied(),
        Preference::Lowest => ranked.first().copied(),
    }
}
