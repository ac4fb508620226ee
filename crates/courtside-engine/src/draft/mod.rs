// Drafting: agents, the shared assignment they read, and the snake loop.

pub mod agent;
pub mod factory;
pub mod optimizer;
pub mod snake;
pub mod state;

use courtside_core::PlayerId;
use thiserror::Error;

pub use agent::{is_draftable, pick_first_eligible, DraftAgent, GreedyPuntAgent, RankedAgent};
pub use factory::build_agents;
pub use optimizer::{representative_teams, GaussianAgent};
pub use snake::{run_draft, snake_order};
pub use state::{DraftAssignment, DraftPick};

/// Errors that abort a draft.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("{agent} has no legal pick with {roster_size} players rostered")]
    IneligibleRoster { agent: String, roster_size: usize },

    #[error("team {team} picked player {player}, already owned by team {owner}")]
    DuplicatePick {
        player: PlayerId,
        team: usize,
        owner: usize,
    },

    #[error("invalid draft setup: {0}")]
    InvalidSetup(String),

    #[error("valuation failed: {0}")]
    Valuation(String),
}
