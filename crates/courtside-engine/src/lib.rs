// Library root: valuation models, drafting agents, the snake draft and
// the season simulator.

pub mod draft;
pub mod league;
pub mod season;
pub mod valuation;

pub use draft::{build_agents, run_draft, DraftAgent, DraftAssignment, DraftError};
pub use league::League;
pub use season::{run_multiple_seasons, SeasonError, SeasonReport, SeasonSettings};
pub use valuation::ScoreTable;
