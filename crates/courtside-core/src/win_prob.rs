// Matchup win probability from independent per-category probabilities.

use serde::{Deserialize, Serialize};

/// How a weekly matchup is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// The team winning a majority of categories takes the week.
    WinnerTakeAll,
    /// Every category counts on its own.
    TotalCategories,
}

/// Number of category wins needed to take a matchup of `k` categories.
pub fn majority_wins_needed(k: usize) -> usize {
    k.div_ceil(2)
}

/// Exact probability of winning at least `wins_needed` of the categories,
/// where `p[i]` is the independent probability of winning category `i`
/// (the Poisson-binomial upper tail).
///
/// Enumerates the win/lose tree category by category. A branch is cut as
/// soon as its loss count exceeds `p.len() - wins_needed`; those subtrees
/// cannot reach the threshold and contribute nothing.
pub fn win_probability_at_least(p: &[f64], wins_needed: usize) -> f64 {
    if wins_needed == 0 {
        return 1.0;
    }
    if wins_needed > p.len() {
        return 0.0;
    }
    let max_losses = p.len() - wins_needed;
    enumerate(p, 0, 1.0, 0, max_losses)
}

fn enumerate(p: &[f64], level: usize, path: f64, losses: usize, max_losses: usize) -> f64 {
    if losses > max_losses {
        return 0.0;
    }
    if level == p.len() {
        return path;
    }
    let win = p[level];
    enumerate(p, level + 1, path * win, losses, max_losses)
        + enumerate(p, level + 1, path * (1.0 - win), losses + 1, max_losses)
}

/// Probability of winning a strict majority (`ceil(k/2)` of `k`).
pub fn majority_win_probability(p: &[f64]) -> f64 {
    win_probability_at_least(p, majority_wins_needed(p.len()))
}

/// Average per-category probability: each category is independent credit.
pub fn mean_category_probability(p: &[f64]) -> f64 {
    if p.is_empty() {
        return 0.0;
    }
    p.iter().sum::<f64>() / p.len() as f64
}

/// Score one matchup under the given mode.
pub fn matchup_score(p: &[f64], mode: ScoringMode) -> f64 {
    match mode {
        ScoringMode::WinnerTakeAll => majority_win_probability(p),
        ScoringMode::TotalCategories => mean_category_probability(p),
    }
}

/// Zero the probability of every masked category.
pub fn apply_punts(p: &mut [f64], punt_mask: &[bool]) {
    for (prob, &punted) in p.iter_mut().zip(punt_mask) {
        if punted {
            *prob = 0.0;
        }
    }
}

/// Indices of the `n` lowest-ranked categories, skipping those already
/// masked. Ties go to the earlier category.
pub fn lowest_categories(ranking: &[f64], already_punted: &[bool], n: usize) -> Vec<usize> {
    let mut candidates: Vec<usize> = (0..ranking.len())
        .filter(|&i| !already_punted.get(i).copied().unwrap_or(false))
        .collect();
    candidates.sort_by(|&a, &b| ranking[a].total_cmp(&ranking[b]).then(a.cmp(&b)));
    candidates.truncate(n);
    candidates
}
