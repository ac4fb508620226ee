// Draft agent interface and the static-order and greedy-punt strategies.

use std::sync::Arc;

use courtside_core::eligibility::feasible;
use courtside_core::win_prob::lowest_categories;
use courtside_core::{Category, PlayerId, PositionSet};
use tracing::debug;

use super::state::DraftAssignment;
use super::DraftError;
use crate::league::League;
use crate::valuation::dscore::dscore_table;
use crate::valuation::zscore::{category_zscores, unpunted_sum, zplus_table, zscore_table, CategoryZScores};
use crate::valuation::rank_by;

/// Rosters smaller than this are always feasible and are not checked.
pub const UNCHECKED_ROSTER_SIZE: usize = 5;

/// A drafting strategy. Each agent owns its roster and picks one player per
/// turn given the picks made so far.
pub trait DraftAgent: Send {
    fn name(&self) -> &str;

    /// Players drafted by this agent, in pick order.
    fn roster(&self) -> &[PlayerId];

    /// Choose an undrafted player and add it to the roster.
    fn pick(&mut self, assignment: &DraftAssignment) -> Result<PlayerId, DraftError>;
}

// ---------------------------------------------------------------------------
// Shared selection
// ---------------------------------------------------------------------------

/// First undrafted player in `ranking` accepted by `is_legal`.
pub fn pick_first_eligible<I, F>(ranking: I, assignment: &DraftAssignment, mut is_legal: F) -> Option<PlayerId>
where
    I: IntoIterator<Item = PlayerId>,
    F: FnMut(PlayerId) -> bool,
{
    ranking
        .into_iter()
        .filter(|&id| !assignment.contains(id))
        .find(|&id| is_legal(id))
}

/// Whether `roster + candidate` can still fill the league's slots.
pub fn roster_accepts(league: &League, roster: &[PlayerId], candidate: PlayerId) -> bool {
    if roster.len() < UNCHECKED_ROSTER_SIZE {
        return true;
    }
    let positions: Vec<PositionSet> = roster
        .iter()
        .chain(std::iter::once(&candidate))
        .map(|&id| league.table.positions(id))
        .collect();
    feasible(&positions, &league.slots)
}

/// Only players with weekly history can be drafted; the season simulator
/// has nothing to sample for the others.
pub fn is_draftable(league: &League, id: PlayerId) -> bool {
    league.table.get(id).is_some_and(|p| p.has_history())
}

/// Pick from `ranking` for the given roster, or fail with `IneligibleRoster`.
pub(crate) fn select(
    name: &str,
    league: &League,
    roster: &[PlayerId],
    ranking: impl IntoIterator<Item = PlayerId>,
    assignment: &DraftAssignment,
) -> Result<PlayerId, DraftError> {
    pick_first_eligible(ranking, assignment, |id| {
        is_draftable(league, id) && roster_accepts(league, roster, id)
    })
    .ok_or_else(|| {
        DraftError::IneligibleRoster {
            agent: name.to_string(),
            roster_size: roster.len(),
        }
    })
}

// ---------------------------------------------------------------------------
// Static-order agents
// ---------------------------------------------------------------------------

/// Drafts down a ranking fixed at construction (Z-Score, Z-Plus, D-Score).
#[derive(Debug, Clone)]
pub struct RankedAgent {
    name: String,
    league: Arc<League>,
    order: Vec<PlayerId>,
    roster: Vec<PlayerId>,
}

impl RankedAgent {
    pub fn new(name: impl Into<String>, league: Arc<League>, order: Vec<PlayerId>) -> Self {
        RankedAgent {
            name: name.into(),
            league,
            order,
            roster: Vec::new(),
        }
    }

    pub fn zscore(name: impl Into<String>, league: Arc<League>, punts: &[Category]) -> Self {
        let mask = league.categories.punt_mask(punts);
        let order = zscore_table(&league.table, &league.categories, &mask).ranking();
        Self::new(name, league, order)
    }

    pub fn zplus(name: impl Into<String>, league: Arc<League>, punts: &[Category]) -> Self {
        let mask = league.categories.punt_mask(punts);
        let order = zplus_table(&league.table, &league.categories, &mask, league.elite_pool_size).ranking();
        Self::new(name, league, order)
    }

    pub fn dscore(name: impl Into<String>, league: Arc<League>, punts: &[Category]) -> Self {
        let mask = league.categories.punt_mask(punts);
        let order = dscore_table(&league.table, &league.categories, &mask, league.elite_pool_size).ranking();
        Self::new(name, league, order)
    }

    /// The fixed preference order, best first.
    pub fn order(&self) -> &[PlayerId] {
        &self.order
    }
}

impl DraftAgent for RankedAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn roster(&self) -> &[PlayerId] {
        &self.roster
    }

    fn pick(&mut self, assignment: &DraftAssignment) -> Result<PlayerId, DraftError> {
        let id = select(
            &self.name,
            &self.league,
            &self.roster,
            self.order.iter().copied(),
            assignment,
        )?;
        self.roster.push(id);
        Ok(id)
    }
}

// ---------------------------------------------------------------------------
// Greedy punt agent
// ---------------------------------------------------------------------------

/// Tracks its own per-category z-score totals and ignores its `n_punts`
/// weakest categories when ranking the next pick.
#[derive(Debug, Clone)]
pub struct GreedyPuntAgent {
    name: String,
    league: Arc<League>,
    zscores: CategoryZScores,
    running: Vec<f64>,
    n_punts: usize,
    roster: Vec<PlayerId>,
}

impl GreedyPuntAgent {
    /// `n_punts` is clamped so at least one category is always contested.
    pub fn new(name: impl Into<String>, league: Arc<League>, n_punts: usize) -> Self {
        let zscores = category_zscores(&league.table, &league.categories);
        let running = vec![0.0; league.categories.len()];
        let n_punts = n_punts.min(league.categories.len().saturating_sub(1));
        GreedyPuntAgent {
            name: name.into(),
            league,
            zscores,
            running,
            n_punts,
            roster: Vec::new(),
        }
    }

    /// Category indices currently punted. Empty before the first pick.
    pub fn current_punts(&self) -> Vec<usize> {
        if self.roster.is_empty() {
            return Vec::new();
        }
        lowest_categories(&self.running, &[], self.n_punts)
    }

    /// Running per-category z-score sum of the roster.
    pub fn running_totals(&self) -> &[f64] {
        &self.running
    }
}

impl DraftAgent for GreedyPuntAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn roster(&self) -> &[PlayerId] {
        &self.roster
    }

    fn pick(&mut self, assignment: &DraftAssignment) -> Result<PlayerId, DraftError> {
        let mut mask = vec![false; self.league.categories.len()];
        for i in self.current_punts() {
            mask[i] = true;
        }
        let zscores = &self.zscores;
        let ranking = rank_by(
            self.league.table.ids().filter(|&id| !assignment.contains(id)),
            |id| unpunted_sum(zscores.player(id), &mask),
        );
        let id = select(&self.name, &self.league, &self.roster, ranking, assignment)?;

        for (total, z) in self.running.iter_mut().zip(self.zscores.player(id)) {
            *total += z;
        }
        self.roster.push(id);
        debug!("{} punting {:?} took player {}", self.name, mask, id);
        Ok(id)
    }
}
