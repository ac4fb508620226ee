// Gaussian optimizer: per-category win probabilities of a hypothetical team
// against representative opponents, from summed player means and variances.

use courtside_core::stats::CategorySource;
use courtside_core::win_prob::{apply_punts, lowest_categories, matchup_score};
use courtside_core::{CategorySet, PlayerId, PlayerProfile, RawStat, ScoringMode, StatTable};
use rayon::prelude::*;

use super::CategoryMoments;

/// Combined variance at or below this is treated as deterministic.
const VARIANCE_EPSILON: f64 = 1e-12;

// ---------------------------------------------------------------------------
// Stat moments
// ---------------------------------------------------------------------------

/// Weekly mean and variance of every raw stat, plus the binomial variance
/// terms of the two shooting percentages. Sums of these describe a team.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatMoments {
    pub mean: [f64; RawStat::COUNT],
    pub variance: [f64; RawStat::COUNT],
    /// Sum of `fga * r * (1 - r)` with `r` the field goal rate.
    pub fg_var: f64,
    /// Sum of `fta * r * (1 - r)` with `r` the free throw rate.
    pub ft_var: f64,
}

impl StatMoments {
    pub fn from_player(player: &PlayerProfile) -> Self {
        let mut out = StatMoments::default();
        for stat in RawStat::ALL {
            let samples: Vec<f64> = player.weeks.iter().map(|w| w.get(stat)).collect();
            let m = CategoryMoments::from_samples(&samples);
            out.mean[stat.index()] = m.mean;
            out.variance[stat.index()] = m.variance;
        }
        out.fg_var = binomial_variance(out.mean[RawStat::Fg.index()], out.mean[RawStat::Fga.index()]);
        out.ft_var = binomial_variance(out.mean[RawStat::Ft.index()], out.mean[RawStat::Fta.index()]);
        out
    }

    pub fn add(&mut self, other: &StatMoments) {
        for i in 0..RawStat::COUNT {
            self.mean[i] += other.mean[i];
            self.variance[i] += other.variance[i];
        }
        self.fg_var += other.fg_var;
        self.ft_var += other.ft_var;
    }

    /// Direction-adjusted mean and variance of one category. Percentages use
    /// summed makes over summed attempts and `binomial / attempts^2`.
    pub fn category(&self, category: courtside_core::Category) -> CategoryMoments {
        match category.source() {
            CategorySource::Counting(stat) => CategoryMoments {
                mean: category.direction() * self.mean[stat.index()],
                variance: self.variance[stat.index()],
            },
            CategorySource::Ratio { makes, attempts } => {
                let att = self.mean[attempts.index()];
                if att <= 0.0 {
                    return CategoryMoments::default();
                }
                let binomial = if attempts == RawStat::Fga {
                    self.fg_var
                } else {
                    self.ft_var
                };
                CategoryMoments {
                    mean: self.mean[makes.index()] / att,
                    variance: binomial / (att * att),
                }
            }
        }
    }
}

fn binomial_variance(makes: f64, attempts: f64) -> f64 {
    if attempts > 0.0 {
        makes / attempts * (attempts - makes)
    } else {
        0.0
    }
}

/// Probability that `mine` beats `theirs` in one category, treating the
/// difference as Gaussian: `0.5 * (1 + erf(diff / sqrt(2 * var)))`.
pub fn category_win_probability(mine: CategoryMoments, theirs: CategoryMoments) -> f64 {
    let diff = mine.mean - theirs.mean;
    let variance = mine.variance + theirs.variance;
    if variance <= VARIANCE_EPSILON {
        return if diff > 0.0 {
            1.0
        } else if diff < 0.0 {
            0.0
        } else {
            0.5
        };
    }
    0.5 * (1.0 + libm::erf(diff / (2.0 * variance).sqrt()))
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// Per-player moments for the whole pool, fixed at construction.
#[derive(Debug, Clone)]
pub struct GaussianModel {
    categories: CategorySet,
    scoring: ScoringMode,
    players: Vec<StatMoments>,
}

/// Win-probability estimate for each candidate, plus the categories that
/// were dynamically punted while computing it.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateEstimate {
    pub win_probability: Vec<f64>,
    pub dynamic_punts: Vec<usize>,
}

impl GaussianModel {
    pub fn new(table: &StatTable, categories: &CategorySet, scoring: ScoringMode) -> Self {
        GaussianModel {
            categories: categories.clone(),
            scoring,
            players: table.players().iter().map(StatMoments::from_player).collect(),
        }
    }

    pub fn player(&self, id: PlayerId) -> StatMoments {
        self.players.get(id).copied().unwrap_or_default()
    }

    /// Summed moments of a roster.
    pub fn team(&self, roster: &[PlayerId]) -> StatMoments {
        let mut total = StatMoments::default();
        for &id in roster {
            total.add(&self.player(id));
        }
        total
    }

    /// Per-category win probabilities of one team against another.
    pub fn category_probabilities(&self, mine: &StatMoments, theirs: &StatMoments) -> Vec<f64> {
        self.categories
            .iter()
            .map(|c| category_win_probability(mine.category(c), theirs.category(c)))
            .collect()
    }

    /// Mean matchup score of `roster + candidate` against every opponent,
    /// for every candidate. Masked categories are zeroed first; then the
    /// `dynamic_punts` categories with the lowest average probability
    /// across all candidates and opponents are zeroed as well.
    pub fn estimate(
        &self,
        roster: &[PlayerId],
        candidates: &[PlayerId],
        opponents: &[Vec<PlayerId>],
        punt_mask: &[bool],
        dynamic_punts: usize,
    ) -> CandidateEstimate {
        let base = self.team(roster);
        let opponent_totals: Vec<StatMoments> = opponents.iter().map(|o| self.team(o)).collect();

        let mut rows: Vec<Vec<Vec<f64>>> = candidates
            .par_iter()
            .map(|&id| {
                let mut mine = base;
                mine.add(&self.player(id));
                opponent_totals
                    .iter()
                    .map(|theirs| {
                        let mut p = self.category_probabilities(&mine, theirs);
                        apply_punts(&mut p, punt_mask);
                        p
                    })
                    .collect()
            })
            .collect();

        let mut dynamic = Vec::new();
        if dynamic_punts > 0 {
            let k = self.categories.len();
            let mut sums = vec![0.0; k];
            let mut count = 0usize;
            for probs in rows.iter().flatten() {
                for (s, p) in sums.iter_mut().zip(probs) {
                    *s += p;
                }
                count += 1;
            }
            if count > 0 {
                let averages: Vec<f64> = sums.iter().map(|s| s / count as f64).collect();
                dynamic = lowest_categories(&averages, punt_mask, dynamic_punts);
                let mut mask = vec![false; k];
                for &i in &dynamic {
                    mask[i] = true;
                }
                for probs in rows.iter_mut().flatten() {
                    apply_punts(probs, &mask);
                }
            }
        }

        let win_probability = rows
            .iter()
            .map(|per_opponent| {
                if per_opponent.is_empty() {
                    return 0.0;
                }
                per_opponent
                    .iter()
                    .map(|p| matchup_score(p, self.scoring))
                    .sum::<f64>()
                    / per_opponent.len() as f64
            })
            .collect();

        CandidateEstimate {
            win_probability,
            dynamic_punts: dynamic,
        }
    }
}

/// Blend the win-probability estimate with the scaled Z-Plus score. The
/// probability term gains weight linearly with the pick round.
pub fn blend(win_probability: f64, zplus: f64, round: usize, total_rounds: usize, zplus_scale: f64) -> f64 {
    let frac = if total_rounds == 0 {
        1.0
    } else {
        (round as f64 / total_rounds as f64).min(1.0)
    };
    win_probability * frac + zplus_scale * zplus * (1.0 - frac)
}
