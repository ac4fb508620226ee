// Library root: shared data model, roster eligibility, matchup probability
// and configuration for the drafting simulator.

pub mod category;
pub mod config;
pub mod eligibility;
pub mod position;
pub mod stats;
pub mod win_prob;

pub use category::{Category, CategorySet};
pub use position::{Position, PositionSet, Slot, SlotCapacities};
pub use stats::{PlayerId, PlayerProfile, RawStat, StatTable, WeeklyLine};
pub use win_prob::ScoringMode;
