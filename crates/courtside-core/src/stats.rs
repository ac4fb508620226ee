// Historical weekly statistics per player.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

use crate::category::Category;
use crate::position::PositionSet;

/// Dense integer player id; equals the player's index in a [`StatTable`].
pub type PlayerId = usize;

/// One of the raw counting stats recorded per player-week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawStat {
    Pts,
    Trb,
    Ast,
    Stl,
    Blk,
    Fg3,
    Tov,
    Fg,
    Fga,
    Ft,
    Fta,
}

impl RawStat {
    pub const ALL: [RawStat; 11] = [
        RawStat::Pts,
        RawStat::Trb,
        RawStat::Ast,
        RawStat::Stl,
        RawStat::Blk,
        RawStat::Fg3,
        RawStat::Tov,
        RawStat::Fg,
        RawStat::Fga,
        RawStat::Ft,
        RawStat::Fta,
    ];

    pub const COUNT: usize = 11;

    pub fn index(&self) -> usize {
        match self {
            RawStat::Pts => 0,
            RawStat::Trb => 1,
            RawStat::Ast => 2,
            RawStat::Stl => 3,
            RawStat::Blk => 4,
            RawStat::Fg3 => 5,
            RawStat::Tov => 6,
            RawStat::Fg => 7,
            RawStat::Fga => 8,
            RawStat::Ft => 9,
            RawStat::Fta => 10,
        }
    }
}

/// How a category is derived from raw stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySource {
    Counting(RawStat),
    Ratio { makes: RawStat, attempts: RawStat },
}

impl Category {
    pub fn source(&self) -> CategorySource {
        match self {
            Category::Points => CategorySource::Counting(RawStat::Pts),
            Category::Rebounds => CategorySource::Counting(RawStat::Trb),
            Category::Assists => CategorySource::Counting(RawStat::Ast),
            Category::Steals => CategorySource::Counting(RawStat::Stl),
            Category::Blocks => CategorySource::Counting(RawStat::Blk),
            Category::Threes => CategorySource::Counting(RawStat::Fg3),
            Category::Turnovers => CategorySource::Counting(RawStat::Tov),
            Category::FieldGoalPct => CategorySource::Ratio {
                makes: RawStat::Fg,
                attempts: RawStat::Fga,
            },
            Category::FreeThrowPct => CategorySource::Ratio {
                makes: RawStat::Ft,
                attempts: RawStat::Fta,
            },
        }
    }
}

/// Raw counting stats for one player-week (or a sum of several).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeeklyLine {
    pub pts: f64,
    pub trb: f64,
    pub ast: f64,
    pub stl: f64,
    pub blk: f64,
    pub fg3: f64,
    pub tov: f64,
    pub fg: f64,
    pub fga: f64,
    pub ft: f64,
    pub fta: f64,
}

impl WeeklyLine {
    pub fn get(&self, stat: RawStat) -> f64 {
        match stat {
            RawStat::Pts => self.pts,
            RawStat::Trb => self.trb,
            RawStat::Ast => self.ast,
            RawStat::Stl => self.stl,
            RawStat::Blk => self.blk,
            RawStat::Fg3 => self.fg3,
            RawStat::Tov => self.tov,
            RawStat::Fg => self.fg,
            RawStat::Fga => self.fga,
            RawStat::Ft => self.ft,
            RawStat::Fta => self.fta,
        }
    }

    /// Raw category value: counting stats as-is (turnovers not inverted),
    /// percentages as makes / attempts with 0.0 for zero attempts.
    pub fn category_value(&self, category: Category) -> f64 {
        match category.source() {
            CategorySource::Counting(stat) => self.get(stat),
            CategorySource::Ratio { makes, attempts } => {
                let att = self.get(attempts);
                if att > 0.0 {
                    self.get(makes) / att
                } else {
                    0.0
                }
            }
        }
    }

    pub fn is_finite(&self) -> bool {
        RawStat::ALL.iter().all(|&s| self.get(s).is_finite())
    }
}

impl Add for WeeklyLine {
    type Output = WeeklyLine;

    fn add(mut self, rhs: WeeklyLine) -> WeeklyLine {
        self += rhs;
        self
    }
}

impl AddAssign for WeeklyLine {
    fn add_assign(&mut self, rhs: WeeklyLine) {
        self.pts += rhs.pts;
        self.trb += rhs.trb;
        self.ast += rhs.ast;
        self.stl += rhs.stl;
        self.blk += rhs.blk;
        self.fg3 += rhs.fg3;
        self.tov += rhs.tov;
        self.fg += rhs.fg;
        self.fga += rhs.fga;
        self.ft += rhs.ft;
        self.fta += rhs.fta;
    }
}

/// A player's eligibility and weekly history. Immutable once built.
#[derive(Debug, Clone)]
pub struct PlayerProfile {
    pub id: PlayerId,
    pub name: String,
    pub positions: PositionSet,
    pub weeks: Vec<WeeklyLine>,
}

impl PlayerProfile {
    pub fn has_history(&self) -> bool {
        !self.weeks.is_empty()
    }

    /// Sum of all recorded weeks.
    pub fn totals(&self) -> WeeklyLine {
        self.weeks
            .iter()
            .fold(WeeklyLine::default(), |acc, w| acc + *w)
    }

    /// Per-week mean of a raw stat. 0.0 without history.
    pub fn mean(&self, stat: RawStat) -> f64 {
        if self.weeks.is_empty() {
            return 0.0;
        }
        self.weeks.iter().map(|w| w.get(stat)).sum::<f64>() / self.weeks.len() as f64
    }

    /// Weekly average of a category. Percentages come from summed makes over
    /// summed attempts, never from averaging weekly ratios.
    pub fn category_average(&self, category: Category) -> f64 {
        match category.source() {
            CategorySource::Counting(stat) => self.mean(stat),
            CategorySource::Ratio { .. } => self.totals().category_value(category),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("player `{name}` has id {id} but sits at index {index}")]
    IdMismatch {
        name: String,
        id: PlayerId,
        index: usize,
    },
}

/// All player profiles, indexed by [`PlayerId`].
#[derive(Debug, Clone, Default)]
pub struct StatTable {
    players: Vec<PlayerProfile>,
}

impl StatTable {
    /// Build a table; every profile's id must equal its index.
    pub fn new(players: Vec<PlayerProfile>) -> Result<Self, StatsError> {
        for (index, p) in players.iter().enumerate() {
            if p.id != index {
                return Err(StatsError::IdMismatch {
                    name: p.name.clone(),
                    id: p.id,
                    index,
                });
            }
        }
        Ok(StatTable { players })
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, id: PlayerId) -> Option<&PlayerProfile> {
        self.players.get(id)
    }

    pub fn players(&self) -> &[PlayerProfile] {
        &self.players
    }

    pub fn ids(&self) -> impl Iterator<Item = PlayerId> {
        0..self.players.len()
    }

    /// Eligible positions of a player; empty for unknown ids.
    pub fn positions(&self, id: PlayerId) -> PositionSet {
        self.players
            .get(id)
            .map(|p| p.positions)
            .unwrap_or_default()
    }

    /// Player ids in the table whose profile has at least one week.
    pub fn ids_with_history(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| p.has_history())
            .map(|p| p.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(fg: f64, fga: f64, tov: f64) -> WeeklyLine {
        WeeklyLine {
            pts: 10.0,
            fg,
            fga,
            tov,
            ..WeeklyLine::default()
        }
    }

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn percentage_uses_summed_makes_and_attempts() {
        let player = PlayerProfile {
            id: 0,
            name: "A".into(),
            positions: PositionSet::empty(),
            weeks: vec![line(1.0, 1.0, 0.0), line(4.0, 10.0, 0.0)],
        };
        // Averaged ratios would be (1.0 + 0.4) / 2 = 0.7; summed is 5/11.
        let pct = player.category_average(Category::FieldGoalPct);
        assert!(approx_eq(pct, 5.0 / 11.0, 1e-12));
    }

    #[test]
    fn zero_attempts_is_zero_percentage() {
        assert_eq!(line(0.0, 0.0, 0.0).category_value(Category::FieldGoalPct), 0.0);
    }

    #[test]
    fn turnovers_are_not_inverted_at_the_raw_level() {
        assert_eq!(line(0.0, 0.0, 3.0).category_value(Category::Turnovers), 3.0);
    }

    #[test]
    fn no_history_means_zero() {
        let player = PlayerProfile {
            id: 0,
            name: "B".into(),
            positions: PositionSet::empty(),
            weeks: vec![],
        };
        assert!(!player.has_history());
        assert_eq!(player.mean(RawStat::Pts), 0.0);
        assert_eq!(player.category_average(Category::FreeThrowPct), 0.0);
    }

    #[test]
    fn table_rejects_misplaced_ids() {
        let p = PlayerProfile {
            id: 3,
            name: "C".into(),
            positions: PositionSet::empty(),
            weeks: vec![],
        };
        assert!(matches!(
            StatTable::new(vec![p]),
            Err(StatsError::IdMismatch { id: 3, index: 0, .. })
        ));
    }

    #[test]
    fn lines_add_fieldwise() {
        let sum = line(1.0, 2.0, 3.0) + line(4.0, 5.0, 6.0);
        assert_eq!(sum.pts, 20.0);
        assert_eq!(sum.fg, 5.0);
        assert_eq!(sum.fga, 7.0);
        assert_eq!(sum.tov, 9.0);
    }
}
