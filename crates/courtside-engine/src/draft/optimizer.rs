// Adaptive agent that re-ranks the pool every pick by estimated matchup
// win probability against representative opponents.

use std::sync::Arc;

use courtside_core::{Category, PlayerId};
use tracing::debug;

use super::agent::{select, DraftAgent, RankedAgent};
use super::snake::run_draft;
use super::state::DraftAssignment;
use super::DraftError;
use crate::league::League;
use crate::valuation::gaussian::{blend, GaussianModel};
use crate::valuation::zscore::zplus_table;
use crate::valuation::{rank_by, ScoreTable};

/// Rosters from a full draft in which every team uses plain Z-Score.
pub fn representative_teams(league: &Arc<League>) -> Result<Vec<Vec<PlayerId>>, DraftError> {
    let mut agents: Vec<Box<dyn DraftAgent>> = (0..league.num_teams)
        .map(|i| {
            Box::new(RankedAgent::zscore(format!("representative {i}"), Arc::clone(league), &[]))
                as Box<dyn DraftAgent>
        })
        .collect();
    let assignment = run_draft(&mut agents, league.rounds)?;
    Ok(assignment.team_rosters(league.num_teams))
}

/// Gaussian-optimizer agent.
#[derive(Debug, Clone)]
pub struct GaussianAgent {
    name: String,
    league: Arc<League>,
    model: Arc<GaussianModel>,
    opponents: Arc<Vec<Vec<PlayerId>>>,
    zplus: ScoreTable,
    punt_mask: Vec<bool>,
    dynamic_punts: usize,
    zplus_scale: f64,
    roster: Vec<PlayerId>,
}

impl GaussianAgent {
    pub fn new(
        name: impl Into<String>,
        league: Arc<League>,
        model: Arc<GaussianModel>,
        opponents: Arc<Vec<Vec<PlayerId>>>,
        punts: &[Category],
    ) -> Self {
        let punt_mask = league.categories.punt_mask(punts);
        let zplus = zplus_table(
            &league.table,
            &league.categories,
            &punt_mask,
            league.elite_pool_size,
        );
        GaussianAgent {
            name: name.into(),
            league,
            model,
            opponents,
            zplus,
            punt_mask,
            dynamic_punts: 0,
            zplus_scale: 0.1,
            roster: Vec::new(),
        }
    }

    /// Number of lowest-probability categories punted afresh each pick.
    pub fn with_dynamic_punts(mut self, n: usize) -> Self {
        self.dynamic_punts = n;
        self
    }

    pub fn with_zplus_scale(mut self, scale: f64) -> Self {
        self.zplus_scale = scale;
        self
    }

    /// Blended score of every undrafted player for the current roster.
    pub fn candidate_scores(&self, assignment: &DraftAssignment) -> Vec<(PlayerId, f64)> {
        let round = self.roster.len();
        let candidates: Vec<PlayerId> = self
            .league
            .table
            .ids()
            .filter(|&id| !assignment.contains(id))
            .collect();
        let opponents: Vec<Vec<PlayerId>> = self
            .opponents
            .iter()
            .map(|team| team.iter().take(round + 1).copied().collect())
            .collect();

        let estimate = self.model.estimate(
            &self.roster,
            &candidates,
            &opponents,
            &self.punt_mask,
            self.dynamic_punts,
        );
        if !estimate.dynamic_punts.is_empty() {
            debug!(
                "{} dynamic punts at round {}: {:?}",
                self.name, round, estimate.dynamic_punts
            );
        }

        candidates
            .into_iter()
            .zip(estimate.win_probability)
            .map(|(id, wp)| {
                let score = blend(
                    wp,
                    self.zplus.get(id),
                    round,
                    self.league.rounds,
                    self.zplus_scale,
                );
                (id, score)
            })
            .collect()
    }
}

impl DraftAgent for GaussianAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn roster(&self) -> &[PlayerId] {
        &self.roster
    }

    fn pick(&mut self, assignment: &DraftAssignment) -> Result<PlayerId, DraftError> {
        let scores = self.candidate_scores(assignment);
        let ranking = rank_by(0..scores.len(), |i| scores[i].1)
            .into_iter()
            .map(|i| scores[i].0);
        let id = select(&self.name, &self.league, &self.roster, ranking, assignment)?;
        self.roster.push(id);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtside_core::{CategorySet, PlayerProfile, PositionSet, ScoringMode, StatTable, WeeklyLine};

    fn player(id: PlayerId, pts: f64, trb: f64) -> PlayerProfile {
        PlayerProfile {
            id,
            name: format!("P{id}"),
            positions: PositionSet::parse("PF"),
            weeks: vec![
                WeeklyLine {
                    pts,
                    trb,
                    ..Default::default()
                },
                WeeklyLine {
                    pts: pts + 2.0,
                    trb: trb + 1.0,
                    ..Default::default()
                },
            ],
        }
    }

    fn league() -> Arc<League> {
        let players = (0..8)
            .map(|i| player(i, 10.0 + 3.0 * i as f64, 12.0 - i as f64))
            .collect();
        let mut league = League::new(StatTable::new(players).unwrap(), 2, 2);
        league.categories = CategorySet::new(vec![Category::Points, Category::Rebounds]).unwrap();
        league.scoring = ScoringMode::TotalCategories;
        Arc::new(league)
    }

    #[test]
    fn representative_teams_fill_every_roster() {
        let league = league();
        let teams = representative_teams(&league).unwrap();
        assert_eq!(teams.len(), 2);
        assert!(teams.iter().all(|t| t.len() == 2));
    }

    #[test]
    fn first_pick_leans_on_zplus() {
        let league = league();
        let model = Arc::new(GaussianModel::new(&league.table, &league.categories, league.scoring));
        let opponents = Arc::new(representative_teams(&league).unwrap());
        let agent = GaussianAgent::new("go", Arc::clone(&league), model, opponents, &[]).with_zplus_scale(1.0);

        let scores = agent.candidate_scores(&DraftAssignment::new());
        assert_eq!(scores.len(), 8);
        // Round 0: the score is exactly the Z-Plus value.
        for (id, score) in scores {
            assert!((score - agent.zplus.get(id)).abs() < 1e-12);
        }
    }

    #[test]
    fn picks_are_undrafted_and_recorded() {
        let league = league();
        let model = Arc::new(GaussianModel::new(&league.table, &league.categories, league.scoring));
        let opponents = Arc::new(representative_teams(&league).unwrap());
        let mut agent = GaussianAgent::new("go", league, model, opponents, &[Category::Rebounds])
            .with_dynamic_punts(0);

        let mut assignment = DraftAssignment::new();
        assignment.record(1, 0, 7).unwrap();
        let first = agent.pick(&assignment).unwrap();
        assert_ne!(first, 7);
        assignment.record(0, 0, first).unwrap();
        let second = agent.pick(&assignment).unwrap();
        assert_ne!(second, first);
        assert_eq!(agent.roster(), &[first, second]);
        // Rebounds punted: points alone decide, so the best scorer left goes first.
        assert_eq!(first, 6);
    }
}
