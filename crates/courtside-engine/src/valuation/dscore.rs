// D-Score: z-scores whose denominator splits uncertainty into the spread of
// player means and the average week-to-week spread within a player.

use courtside_core::stats::CategorySource;
use courtside_core::{Category, CategorySet, PlayerId, PlayerProfile, StatTable};
use tracing::debug;

use super::{history_last, reference_rows, top_within, CategoryMoments, ScoreTable};

/// Below this scale a category carries no information and scores 0.0.
const SCALE_EPSILON: f64 = 1e-9;

/// Scoring coefficients for one category, fitted on a reference subset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DScoreParams {
    pub category: Category,
    /// Mean of per-player weekly means over the subset.
    pub mean: f64,
    /// sqrt(variance of player means + mean of player variances).
    pub scale: f64,
    /// Percentage categories: subset makes / attempts.
    pub league_rate: f64,
    /// Percentage categories: mean weekly attempts per subset player.
    pub mean_attempts: f64,
}

impl DScoreParams {
    /// Weekly values of this category for one player. Percentages become
    /// volume-adjusted residuals `(makes - attempts * rate) / mean_attempts`.
    pub fn weekly_values(&self, player: &PlayerProfile) -> Vec<f64> {
        match self.category.source() {
            CategorySource::Counting(stat) => player.weeks.iter().map(|w| w.get(stat)).collect(),
            CategorySource::Ratio { makes, attempts } => player
                .weeks
                .iter()
                .map(|w| (w.get(makes) - w.get(attempts) * self.league_rate) / self.mean_attempts)
                .collect(),
        }
    }

    /// Direction-adjusted standardized score for one player.
    pub fn score(&self, player: &PlayerProfile) -> f64 {
        if self.scale < SCALE_EPSILON || !player.has_history() {
            return 0.0;
        }
        let m = CategoryMoments::from_samples(&self.weekly_values(player));
        self.category.direction() * (m.mean - self.mean) / self.scale
    }
}

/// Fit one category's coefficients over `rows`.
pub fn fit_category(table: &StatTable, category: Category, rows: &[PlayerId]) -> DScoreParams {
    let players: Vec<&PlayerProfile> = rows
        .iter()
        .filter_map(|&id| table.get(id))
        .filter(|p| p.has_history())
        .collect();

    let (league_rate, mean_attempts) = match category.source() {
        CategorySource::Counting(_) => (0.0, 1.0),
        CategorySource::Ratio { makes, attempts } => {
            let total_makes: f64 = players.iter().map(|p| p.totals().get(makes)).sum();
            let total_attempts: f64 = players.iter().map(|p| p.totals().get(attempts)).sum();
            let rate = if total_attempts > 0.0 {
                total_makes / total_attempts
            } else {
                0.0
            };
            let avg_attempts = if players.is_empty() {
                0.0
            } else {
                players.iter().map(|p| p.mean(attempts)).sum::<f64>() / players.len() as f64
            };
            (rate, if avg_attempts > 0.0 { avg_attempts } else { 1.0 })
        }
    };

    let mut params = DScoreParams {
        category,
        mean: 0.0,
        scale: 0.0,
        league_rate,
        mean_attempts,
    };
    if players.is_empty() {
        return params;
    }

    let moments: Vec<CategoryMoments> = players
        .iter()
        .map(|p| CategoryMoments::from_samples(&params.weekly_values(p)))
        .collect();
    let n = moments.len() as f64;
    let mean = moments.iter().map(|m| m.mean).sum::<f64>() / n;
    let var_of_means = moments.iter().map(|m| (m.mean - mean).powi(2)).sum::<f64>() / n;
    let mean_of_vars = moments.iter().map(|m| m.variance).sum::<f64>() / n;

    params.mean = mean;
    params.scale = (var_of_means + mean_of_vars).sqrt();
    params
}

/// Fit every active category over `rows`.
pub fn fit_all(table: &StatTable, categories: &CategorySet, rows: &[PlayerId]) -> Vec<DScoreParams> {
    categories
        .iter()
        .map(|c| fit_category(table, c, rows))
        .collect()
}

/// Per-category D-scores for the whole pool against fitted parameters.
pub fn score_all(table: &StatTable, params: &[DScoreParams]) -> Vec<Vec<f64>> {
    table
        .players()
        .iter()
        .map(|p| params.iter().map(|c| c.score(p)).collect())
        .collect()
}

fn sum_rows(scores: &[Vec<f64>], punt_mask: &[bool]) -> ScoreTable {
    ScoreTable::new(
        scores
            .iter()
            .map(|row| super::zscore::unpunted_sum(row, punt_mask))
            .collect(),
    )
}

/// Two-phase D-Score valuation. Phase 1 fits over every player with history
/// and picks the `subset_size` best; phase 2 refits on that subset and
/// scores the whole pool. Players without history rank last.
pub fn dscore_table(
    table: &StatTable,
    categories: &CategorySet,
    punt_mask: &[bool],
    subset_size: usize,
) -> ScoreTable {
    let rows = reference_rows(table);
    let phase_one = fit_all(table, categories, &rows);
    let subset = top_within(
        sum_rows(&score_all(table, &phase_one), punt_mask).ranking(),
        &rows,
        subset_size.max(1),
    );
    debug!("d-score phase two subset: {} players", subset.len());

    let phase_two = fit_all(table, categories, &subset);
    history_last(table, sum_rows(&score_all(table, &phase_two), punt_mask))
}
