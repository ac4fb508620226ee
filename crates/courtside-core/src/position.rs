// Basketball positions, roster slots, and slot capacities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position tag a player can be eligible at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    C,
    PG,
    SG,
    SF,
    PF,
}

impl Position {
    pub const ALL: [Position; 5] = [
        Position::C,
        Position::PG,
        Position::SG,
        Position::SF,
        Position::PF,
    ];

    /// Parse a position string ("C", "PG", "SG", "SF", "PF").
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "C" => Some(Position::C),
            "PG" => Some(Position::PG),
            "SG" => Some(Position::SG),
            "SF" => Some(Position::SF),
            "PF" => Some(Position::PF),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Position::C => "C",
            Position::PG => "PG",
            Position::SG => "SG",
            Position::SF => "SF",
            Position::PF => "PF",
        }
    }

    fn bit(&self) -> u8 {
        match self {
            Position::C => 1,
            Position::PG => 1 << 1,
            Position::SG => 1 << 2,
            Position::SF => 1 << 3,
            Position::PF => 1 << 4,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// The set of positions a player is eligible at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PositionSet(u8);

impl PositionSet {
    pub fn empty() -> Self {
        PositionSet(0)
    }

    pub fn from_positions(positions: &[Position]) -> Self {
        let mut set = PositionSet::empty();
        for &p in positions {
            set.insert(p);
        }
        set
    }

    /// Parse a list like "PG,SG", "SF/PF" or "C PF". Unknown tags are ignored.
    pub fn parse(s: &str) -> Self {
        let tags: Vec<Position> = s
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter_map(Position::from_str_pos)
            .collect();
        PositionSet::from_positions(&tags)
    }

    pub fn insert(&mut self, position: Position) {
        self.0 |= position.bit();
    }

    pub fn contains(&self, position: Position) -> bool {
        self.0 & position.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL.into_iter().filter(move |p| self.contains(*p))
    }
}

impl fmt::Display for PositionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<&str> = self.iter().map(|p| p.display_str()).collect();
        write!(f, "{}", tags.join(","))
    }
}

/// Number of distinct roster slots.
pub const SLOT_COUNT: usize = 8;

/// One of the eight roster slots a drafted player is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    C,
    PG,
    SG,
    G,
    SF,
    PF,
    F,
    #[serde(rename = "UTIL")]
    Util,
}

impl Slot {
    pub const ALL: [Slot; SLOT_COUNT] = [
        Slot::C,
        Slot::PG,
        Slot::SG,
        Slot::G,
        Slot::SF,
        Slot::PF,
        Slot::F,
        Slot::Util,
    ];

    pub fn index(&self) -> usize {
        match self {
            Slot::C => 0,
            Slot::PG => 1,
            Slot::SG => 2,
            Slot::G => 3,
            Slot::SF => 4,
            Slot::PF => 5,
            Slot::F => 6,
            Slot::Util => 7,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Slot::C => "C",
            Slot::PG => "PG",
            Slot::SG => "SG",
            Slot::G => "G",
            Slot::SF => "SF",
            Slot::PF => "PF",
            Slot::F => "F",
            Slot::Util => "UTIL",
        }
    }

    /// Whether a player with the given eligibility may fill this slot.
    ///
    /// G accepts PG or SG, F accepts SF or PF, UTIL accepts anyone.
    pub fn accepts(&self, eligible: PositionSet) -> bool {
        match self {
            Slot::C => eligible.contains(Position::C),
            Slot::PG => eligible.contains(Position::PG),
            Slot::SG => eligible.contains(Position::SG),
            Slot::G => eligible.contains(Position::PG) || eligible.contains(Position::SG),
            Slot::SF => eligible.contains(Position::SF),
            Slot::PF => eligible.contains(Position::PF),
            Slot::F => eligible.contains(Position::SF) || eligible.contains(Position::PF),
            Slot::Util => true,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Number of players each roster slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCapacities {
    #[serde(rename = "C")]
    pub c: usize,
    #[serde(rename = "PG")]
    pub pg: usize,
    #[serde(rename = "SG")]
    pub sg: usize,
    #[serde(rename = "G")]
    pub g: usize,
    #[serde(rename = "SF")]
    pub sf: usize,
    #[serde(rename = "PF")]
    pub pf: usize,
    #[serde(rename = "F")]
    pub f: usize,
    #[serde(rename = "UTIL")]
    pub util: usize,
}

impl SlotCapacities {
    pub fn get(&self, slot: Slot) -> usize {
        match slot {
            Slot::C => self.c,
            Slot::PG => self.pg,
            Slot::SG => self.sg,
            Slot::G => self.g,
            Slot::SF => self.sf,
            Slot::PF => self.pf,
            Slot::F => self.f,
            Slot::Util => self.util,
        }
    }

    /// Total number of roster spots.
    pub fn total(&self) -> usize {
        Slot::ALL.iter().map(|&s| self.get(s)).sum()
    }
}

impl Default for SlotCapacities {
    /// Thirteen spots: C 2, PG 1, SG 1, G 2, SF 1, PF 1, F 2, UTIL 3.
    fn default() -> Self {
        SlotCapacities {
            c: 2,
            pg: 1,
            sg: 1,
            g: 2,
            sf: 1,
            pf: 1,
            f: 2,
            util: 3,
        }
    }
}
