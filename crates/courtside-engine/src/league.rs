// League context shared read-only by every drafting agent.

use courtside_core::config::{LeagueConfig, ValuationConfig};
use courtside_core::{CategorySet, ScoringMode, SlotCapacities, StatTable};

/// Player pool plus the league format the agents draft for.
#[derive(Debug, Clone)]
pub struct League {
    pub table: StatTable,
    pub categories: CategorySet,
    pub slots: SlotCapacities,
    pub num_teams: usize,
    pub rounds: usize,
    pub scoring: ScoringMode,
    /// Reference pool size for the two-pass models (Z-Plus, D-Score).
    pub elite_pool_size: usize,
}

impl League {
    /// A nine-category winner-take-all league with default slots.
    pub fn new(table: StatTable, num_teams: usize, rounds: usize) -> Self {
        League {
            table,
            categories: CategorySet::standard(),
            slots: SlotCapacities::default(),
            num_teams,
            rounds,
            scoring: ScoringMode::WinnerTakeAll,
            elite_pool_size: 2 * num_teams * rounds,
        }
    }

    pub fn from_config(table: StatTable, league: &LeagueConfig, valuation: &ValuationConfig) -> Self {
        League {
            table,
            categories: league.categories.clone(),
            slots: league.slots,
            num_teams: league.num_teams,
            rounds: league.rounds,
            scoring: league.scoring,
            elite_pool_size: valuation.elite_pool_size(league),
        }
    }
}
