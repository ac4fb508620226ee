// Valuation models: Z-Score, Z-Plus, D-Score and the Gaussian optimizer.

pub mod dscore;
pub mod gaussian;
pub mod zscore;

use std::cmp::Ordering;
use std::collections::HashSet;

use courtside_core::{CategorySet, PlayerId, StatTable};

/// Mean and variance of one category for one player (or one team).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategoryMoments {
    pub mean: f64,
    pub variance: f64,
}

impl CategoryMoments {
    /// Sample mean and variance (n - 1 denominator) of weekly values.
    /// Variance is 0.0 with fewer than two observations.
    pub fn from_samples(values: &[f64]) -> Self {
        if values.is_empty() {
            return CategoryMoments::default();
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = if values.len() < 2 {
            0.0
        } else {
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)
        };
        CategoryMoments { mean, variance }
    }
}

/// One scalar value per player, indexed by [`PlayerId`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable {
    scores: Vec<f64>,
}

impl ScoreTable {
    pub fn new(scores: Vec<f64>) -> Self {
        ScoreTable { scores }
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Score of a player; 0.0 for ids outside the table.
    pub fn get(&self, id: PlayerId) -> f64 {
        self.scores.get(id).copied().unwrap_or(0.0)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.scores
    }

    /// Every player id, best first. Ties keep the lower id first.
    pub fn ranking(&self) -> Vec<PlayerId> {
        rank_by(0..self.scores.len(), |id| self.scores[id])
    }

    /// The `n` best player ids.
    pub fn top(&self, n: usize) -> Vec<PlayerId> {
        let mut ranked = self.ranking();
        ranked.truncate(n);
        ranked
    }

    /// Multiply every score by `factor`.
    pub fn scaled(&self, factor: f64) -> ScoreTable {
        ScoreTable::new(self.scores.iter().map(|s| s * factor).collect())
    }
}

/// Sort ids by descending score; NaN sorts last, ties by ascending id.
pub fn rank_by<I, F>(ids: I, score: F) -> Vec<PlayerId>
where
    I: IntoIterator<Item = PlayerId>,
    F: Fn(PlayerId) -> f64,
{
    let mut scored: Vec<(PlayerId, f64)> = ids
        .into_iter()
        .map(|id| {
            let s = score(id);
            (id, if s.is_nan() { f64::NEG_INFINITY } else { s })
        })
        .collect();
    scored.sort_by(|a, b| match b.1.total_cmp(&a.1) {
        Ordering::Equal => a.0.cmp(&b.0),
        other => other,
    });
    scored.into_iter().map(|(id, _)| id).collect()
}

/// Weekly average of every active category for every player, as
/// `averages[player][category]`. Turnovers are not inverted here.
pub fn category_averages(table: &StatTable, categories: &CategorySet) -> Vec<Vec<f64>> {
    table
        .players()
        .iter()
        .map(|p| categories.iter().map(|c| p.category_average(c)).collect())
        .collect()
}

/// The rows a pool statistic is fitted on: players with history, or every
/// player when nobody has any.
pub(crate) fn reference_rows(table: &StatTable) -> Vec<PlayerId> {
    let rows = table.ids_with_history();
    if rows.is_empty() {
        table.ids().collect()
    } else {
        rows
    }
}

/// Ids in `ranking` that belong to `rows`, keeping ranking order, at most `n`.
pub(crate) fn top_within(ranking: Vec<PlayerId>, rows: &[PlayerId], n: usize) -> Vec<PlayerId> {
    let allowed: HashSet<PlayerId> = rows.iter().copied().collect();
    ranking
        .into_iter()
        .filter(|id| allowed.contains(id))
        .take(n)
        .collect()
}

/// Push players without weekly history to the bottom of a score table.
/// They cannot be simulated, so no model may prefer them.
pub(crate) fn history_last(table: &StatTable, scores: ScoreTable) -> ScoreTable {
    let mut scores = scores.scores;
    for (score, player) in scores.iter_mut().zip(table.players()) {
        if !player.has_history() {
            *score = f64::NEG_INFINITY;
        }
    }
    ScoreTable::new(scores)
}
