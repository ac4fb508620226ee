// Season simulation: bootstrap weekly lines, play a round-robin schedule,
// and award championships.

pub mod schedule;
pub mod simulate;

use courtside_core::PlayerId;
use thiserror::Error;

pub use schedule::{round_robin_opponent, week_pairings};
pub use simulate::{
    run_multiple_seasons, CategoryRecord, SeasonReport, SeasonSettings, TeamBreakdown,
};

/// Errors raised by the season simulator.
#[derive(Debug, Error)]
pub enum SeasonError {
    #[error("player {player} ({name}) on team {team} has no weekly history")]
    InsufficientHistory {
        player: PlayerId,
        name: String,
        team: usize,
    },

    #[error("player {player} on team {team} is not in the stat table")]
    UnknownPlayer { player: PlayerId, team: usize },

    #[error("invalid season setup: {0}")]
    InvalidSetup(String),

    #[error("season {season}: team {team} has non-finite totals in week {week}")]
    NonFiniteTotals {
        season: usize,
        team: usize,
        week: usize,
    },
}
