// Bootstrapped season batches over a finished draft.

use courtside_core::{Category, CategorySet, PlayerId, ScoringMode, StatTable, WeeklyLine};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use super::schedule::round_robin_opponent;
use super::SeasonError;
use crate::draft::DraftAssignment;

/// Batch parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonSettings {
    pub n_seasons: usize,
    pub n_weeks: usize,
    pub scoring: ScoringMode,
    /// Also report per-category win and tie rates.
    pub detailed: bool,
    /// Season `s` draws from this seed on stream `s`.
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRecord {
    pub category: Category,
    pub win_rate: f64,
    pub tie_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamBreakdown {
    pub team: usize,
    pub categories: Vec<CategoryRecord>,
}

/// Aggregate result of a season batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonReport {
    /// Championship points per team over completed seasons. Sums to 1.0
    /// when at least one season completed.
    pub championship_share: Vec<f64>,
    pub seasons_completed: usize,
    pub seasons_failed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Vec<TeamBreakdown>>,
}

/// One simulated season.
#[derive(Debug, Clone)]
struct SeasonOutcome {
    /// Championship points awarded this season.
    points: Vec<f64>,
    category_wins: Vec<Vec<u32>>,
    category_ties: Vec<Vec<u32>>,
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// Simulate `n_seasons` seasons of the drafted rosters and report each
/// team's share of championships.
///
/// Every rostered player must have weekly history; otherwise the batch is
/// rejected before any season runs. A season that fails on its own is
/// counted in `seasons_failed` and left out of the shares.
pub fn run_multiple_seasons(
    assignment: &DraftAssignment,
    table: &StatTable,
    categories: &CategorySet,
    settings: &SeasonSettings,
) -> Result<SeasonReport, SeasonError> {
    let num_teams = assignment.num_teams();
    if num_teams < 2 || num_teams % 2 != 0 {
        return Err(SeasonError::InvalidSetup(format!(
            "round robin needs an even number of teams (at least 2), got {num_teams}"
        )));
    }
    if settings.n_weeks == 0 {
        return Err(SeasonError::InvalidSetup("a season needs at least one week".into()));
    }

    let rosters = assignment.team_rosters(num_teams);
    for (team, roster) in rosters.iter().enumerate() {
        if roster.is_empty() {
            return Err(SeasonError::InvalidSetup(format!("team {team} has no players")));
        }
        for &player in roster {
            match table.get(player) {
                None => return Err(SeasonError::UnknownPlayer { player, team }),
                Some(p) if !p.has_history() => {
                    return Err(SeasonError::InsufficientHistory {
                        player,
                        name: p.name.clone(),
                        team,
                    })
                }
                Some(_) => {}
            }
        }
    }

    info!(
        "Simulating {} seasons of {} weeks for {} teams",
        settings.n_seasons, settings.n_weeks, num_teams
    );

    let outcomes: Vec<Result<SeasonOutcome, SeasonError>> = (0..settings.n_seasons)
        .into_par_iter()
        .map(|season| simulate_season(season, &rosters, table, categories, settings))
        .collect();

    let k = categories.len();
    let mut points = vec![0.0; num_teams];
    let mut category_wins = vec![vec![0u64; k]; num_teams];
    let mut category_ties = vec![vec![0u64; k]; num_teams];
    let mut completed = 0usize;
    let mut failed = 0usize;

    for outcome in outcomes {
        match outcome {
            Ok(season) => {
                completed += 1;
                for (total, p) in points.iter_mut().zip(&season.points) {
                    *total += p;
                }
                for team in 0..num_teams {
                    for c in 0..k {
                        category_wins[team][c] += u64::from(season.category_wins[team][c]);
                        category_ties[team][c] += u64::from(season.category_ties[team][c]);
                    }
                }
            }
            Err(e) => {
                failed += 1;
                warn!("Season dropped: {}", e);
            }
        }
    }

    let championship_share = points
        .iter()
        .map(|p| if completed == 0 { 0.0 } else { p / completed as f64 })
        .collect();

    let breakdown = settings.detailed.then(|| {
        let matchups = (completed * settings.n_weeks) as f64;
        let rate = |count: u64| if matchups > 0.0 { count as f64 / matchups } else { 0.0 };
        (0..num_teams)
            .map(|team| TeamBreakdown {
                team,
                categories: categories
                    .iter()
                    .enumerate()
                    .map(|(c, category)| CategoryRecord {
                        category,
                        win_rate: rate(category_wins[team][c]),
                        tie_rate: rate(category_ties[team][c]),
                    })
                    .collect(),
            })
            .collect()
    });

    info!("Season batch done: {} completed, {} failed", completed, failed);
    Ok(SeasonReport {
        championship_share,
        seasons_completed: completed,
        seasons_failed: failed,
        breakdown,
    })
}

// ---------------------------------------------------------------------------
// Single season
// ---------------------------------------------------------------------------

fn simulate_season(
    season: usize,
    rosters: &[Vec<PlayerId>],
    table: &StatTable,
    categories: &CategorySet,
    settings: &SeasonSettings,
) -> Result<SeasonOutcome, SeasonError> {
    let mut rng = ChaCha8Rng::seed_from_u64(settings.seed);
    rng.set_stream(season as u64);

    let num_teams = rosters.len();
    let weeks = settings.n_weeks;
    let k = categories.len();

    // Each sampled week carries every stat of one real week together.
    let mut totals = vec![vec![WeeklyLine::default(); weeks]; num_teams];
    for (team, roster) in rosters.iter().enumerate() {
        for &player in roster {
            let history = match table.get(player) {
                Some(p) if p.has_history() => &p.weeks,
                _ => return Err(SeasonError::UnknownPlayer { player, team }),
            };
            for week in totals[team].iter_mut() {
                *week += history[rng.gen_range(0..history.len())];
            }
        }
    }

    let mut values = vec![vec![vec![0.0; k]; weeks]; num_teams];
    for team in 0..num_teams {
        for week in 0..weeks {
            let line = &totals[team][week];
            if !line.is_finite() {
                return Err(SeasonError::NonFiniteTotals { season, team, week });
            }
            for (c, category) in categories.iter().enumerate() {
                values[team][week][c] = category.direction() * line.category_value(category);
            }
        }
    }

    let mut week_wins = vec![0.0; num_teams];
    let mut week_ties = vec![0.0; num_teams];
    let mut category_wins = vec![vec![0u32; k]; num_teams];
    let mut category_ties = vec![vec![0u32; k]; num_teams];

    for week in 0..weeks {
        for team in 0..num_teams {
            let opponent = round_robin_opponent(team, week, num_teams);
            let mut wins = 0usize;
            let mut ties = 0usize;
            for c in 0..k {
                let mine = values[team][week][c];
                let theirs = values[opponent][week][c];
                if mine > theirs {
                    wins += 1;
                    category_wins[team][c] += 1;
                } else if mine == theirs {
                    ties += 1;
                    category_ties[team][c] += 1;
                }
            }
            match settings.scoring {
                ScoringMode::WinnerTakeAll => {
                    // wins + ties / 2 against half the category count.
                    let doubled = 2 * wins + ties;
                    if doubled > k {
                        week_wins[team] += 1.0;
                    } else if doubled == k {
                        week_ties[team] += 1.0;
                    }
                }
                ScoringMode::TotalCategories => {
                    week_wins[team] += wins as f64;
                    week_ties[team] += ties as f64;
                }
            }
        }
    }

    Ok(SeasonOutcome {
        points: championship_points(&week_wins, &week_ties),
        category_wins,
        category_ties,
    })
}

/// Most weekly wins takes the title, then most weekly ties; teams still
/// level split one point evenly.
fn championship_points(wins: &[f64], ties: &[f64]) -> Vec<f64> {
    let best_wins = wins.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let best_ties = wins
        .iter()
        .zip(ties)
        .filter(|(w, _)| **w == best_wins)
        .map(|(_, t)| *t)
        .fold(f64::NEG_INFINITY, f64::max);
    let champions: Vec<bool> = wins
        .iter()
        .zip(ties)
        .map(|(w, t)| *w == best_wins && *t == best_ties)
        .collect();
    let count = champions.iter().filter(|c| **c).count().max(1) as f64;
    champions
        .into_iter()
        .map(|c| if c { 1.0 / count } else { 0.0 })
        .collect()
}
