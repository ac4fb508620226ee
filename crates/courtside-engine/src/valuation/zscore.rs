// Z-score and Z-Plus valuation over weekly category averages.

use courtside_core::{CategorySet, PlayerId, StatTable};
use tracing::debug;

use super::{category_averages, history_last, reference_rows, top_within, ScoreTable};

// ---------------------------------------------------------------------------
// Pool statistics
// ---------------------------------------------------------------------------

/// Mean and standard deviation for a single category across a player pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolStats {
    pub mean: f64,
    pub stdev: f64,
}

/// Threshold below which standard deviation is treated as zero.
const STDEV_EPSILON: f64 = 1e-9;

/// Compute mean and standard deviation for a slice of values.
///
/// Returns `PoolStats { mean: 0.0, stdev: 0.0 }` for an empty slice.
/// Uses the population standard deviation (N denominator).
pub fn compute_pool_stats(values: &[f64]) -> PoolStats {
    if values.is_empty() {
        return PoolStats {
            mean: 0.0,
            stdev: 0.0,
        };
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    PoolStats {
        mean,
        stdev: variance.sqrt(),
    }
}

/// Compute a z-score given a value and pool stats.
///
/// Returns 0.0 if the standard deviation is approximately zero.
pub fn compute_zscore(value: f64, stats: &PoolStats) -> f64 {
    if stats.stdev < STDEV_EPSILON {
        return 0.0;
    }
    (value - stats.mean) / stats.stdev
}

// ---------------------------------------------------------------------------
// Per-category z-scores
// ---------------------------------------------------------------------------

/// Per-category z-scores for every player, `values[player][category]`, with
/// turnovers already sign-inverted so higher is always better.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryZScores {
    values: Vec<Vec<f64>>,
}

impl CategoryZScores {
    pub fn player(&self, id: PlayerId) -> &[f64] {
        self.values.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum each player's categories that are not masked out.
    pub fn totals(&self, punt_mask: &[bool]) -> ScoreTable {
        ScoreTable::new(
            self.values
                .iter()
                .map(|row| unpunted_sum(row, punt_mask))
                .collect(),
        )
    }
}

/// Sum of the entries whose mask bit is unset (missing bits count as unset).
pub fn unpunted_sum(values: &[f64], punt_mask: &[bool]) -> f64 {
    values
        .iter()
        .enumerate()
        .filter(|(i, _)| !punt_mask.get(*i).copied().unwrap_or(false))
        .map(|(_, v)| v)
        .sum()
}

/// Fit one [`PoolStats`] per category over the given reference rows.
pub fn fit_pool_stats(averages: &[Vec<f64>], rows: &[PlayerId], n_categories: usize) -> Vec<PoolStats> {
    (0..n_categories)
        .map(|c| {
            let column: Vec<f64> = rows
                .iter()
                .filter_map(|&id| averages.get(id).and_then(|row| row.get(c)))
                .copied()
                .collect();
            compute_pool_stats(&column)
        })
        .collect()
}

/// Standardize the whole pool against the given parameters.
pub fn standardize(
    averages: &[Vec<f64>],
    stats: &[PoolStats],
    categories: &CategorySet,
) -> CategoryZScores {
    let values = averages
        .iter()
        .map(|row| {
            categories
                .iter()
                .zip(row.iter().zip(stats))
                .map(|(cat, (value, s))| cat.direction() * compute_zscore(*value, s))
                .collect()
        })
        .collect();
    CategoryZScores { values }
}

/// Plain z-scores: parameters fitted on every player with history.
pub fn category_zscores(table: &StatTable, categories: &CategorySet) -> CategoryZScores {
    let averages = category_averages(table, categories);
    let rows = reference_rows(table);
    let stats = fit_pool_stats(&averages, &rows, categories.len());
    standardize(&averages, &stats, categories)
}

/// Two-pass z-scores: parameters refitted on the `elite_size` best players
/// of a plain Z-Score pass (ranked with `punt_mask`), then applied to the
/// whole pool.
pub fn category_zplus(
    table: &StatTable,
    categories: &CategorySet,
    punt_mask: &[bool],
    elite_size: usize,
) -> CategoryZScores {
    let averages = category_averages(table, categories);
    let rows = reference_rows(table);
    let first_pass = standardize(
        &averages,
        &fit_pool_stats(&averages, &rows, categories.len()),
        categories,
    );

    let elite = top_within(first_pass.totals(punt_mask).ranking(), &rows, elite_size.max(1));
    debug!(
        "z-plus elite pool: {} of {} players",
        elite.len(),
        rows.len()
    );

    let stats = fit_pool_stats(&averages, &elite, categories.len());
    standardize(&averages, &stats, categories)
}

// ---------------------------------------------------------------------------
// Score tables
// ---------------------------------------------------------------------------

/// Z-Score valuation: sum of non-punted category z-scores. Players without
/// history rank last.
pub fn zscore_table(table: &StatTable, categories: &CategorySet, punt_mask: &[bool]) -> ScoreTable {
    history_last(table, category_zscores(table, categories).totals(punt_mask))
}

/// Z-Plus valuation: sum of non-punted elite-referenced z-scores.
pub fn zplus_table(
    table: &StatTable,
    categories: &CategorySet,
    punt_mask: &[bool],
    elite_size: usize,
) -> ScoreTable {
    history_last(
        table,
        category_zplus(table, categories, punt_mask, elite_size).totals(punt_mask),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtside_core::{Category, PlayerProfile, PositionSet, WeeklyLine};

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    fn player(id: PlayerId, pts: f64, tov: f64, fg: f64, fga: f64) -> PlayerProfile {
        let line = WeeklyLine {
            pts,
            tov,
            fg,
            fga,
            ..Default::default()
        };
        PlayerProfile {
            id,
            name: format!("P{id}"),
            positions: PositionSet::parse("PG"),
            weeks: vec![line, line],
        }
    }

    fn three_cats() -> CategorySet {
        CategorySet::new(vec![
            Category::Points,
            Category::Turnovers,
            Category::FieldGoalPct,
        ])
        .unwrap()
    }

    fn sample_table() -> StatTable {
        StatTable::new(vec![
            player(0, 30.0, 2.0, 10.0, 20.0),
            player(1, 20.0, 4.0, 9.0, 20.0),
            player(2, 10.0, 6.0, 8.0, 20.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_pool_stats_population() {
        let stats = compute_pool_stats(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!(approx_eq(stats.mean, 5.0, 1e-12));
        assert!(approx_eq(stats.stdev, 2.0, 1e-12));
    }

    #[test]
    fn test_pool_stats_empty() {
        let stats = compute_pool_stats(&[]);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.stdev, 0.0);
    }

    #[test]
    fn test_zscore_zero_stdev() {
        let stats = PoolStats {
            mean: 3.0,
            stdev: 0.0,
        };
        assert_eq!(compute_zscore(10.0, &stats), 0.0);
    }

    #[test]
    fn turnovers_are_inverted() {
        let z = category_zscores(&sample_table(), &three_cats());
        // Player 0 has the most points and fewest turnovers.
        assert!(z.player(0)[0] > 0.0);
        assert!(z.player(0)[1] > 0.0);
        assert!(z.player(2)[1] < 0.0);
        // Symmetric pool: the middle player sits at zero.
        assert!(approx_eq(z.player(1)[0], 0.0, 1e-12));
    }

    #[test]
    fn punted_category_is_excluded() {
        let table = sample_table();
        let cats = three_cats();
        let full = zscore_table(&table, &cats, &[]);
        let punted = zscore_table(&table, &cats, &cats.punt_mask(&[Category::Points]));
        let z = category_zscores(&table, &cats);
        assert!(approx_eq(
            full.get(0) - punted.get(0),
            z.player(0)[0],
            1e-12
        ));
    }

    #[test]
    fn zscore_ranking_is_deterministic() {
        let table = sample_table();
        let cats = three_cats();
        let a = zscore_table(&table, &cats, &[]).ranking();
        let b = zscore_table(&table, &cats, &[]).ranking();
        assert_eq!(a, b);
        assert_eq!(a, vec![0, 1, 2]);
    }

    #[test]
    fn zplus_refits_on_elite() {
        let table = sample_table();
        let cats = three_cats();
        // Elite pool of two: players 0 and 1. Points mean 25, stdev 5.
        let z = category_zplus(&table, &cats, &[], 2);
        assert!(approx_eq(z.player(0)[0], 1.0, 1e-12));
        assert!(approx_eq(z.player(2)[0], -3.0, 1e-12));
    }

    #[test]
    fn unpunted_sum_ignores_masked() {
        assert_eq!(unpunted_sum(&[1.0, 2.0, 4.0], &[false, true]), 5.0);
    }
}
