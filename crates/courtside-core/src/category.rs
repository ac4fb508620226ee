// Scoring categories and the ordered category set shared by every component.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A statistical dimension used to score a weekly head-to-head matchup.
///
/// Declaration order is the canonical order used by every table in the
/// workspace; nothing depends on column positions from input files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "pts")]
    Points,
    #[serde(rename = "trb")]
    Rebounds,
    #[serde(rename = "ast")]
    Assists,
    #[serde(rename = "stl")]
    Steals,
    #[serde(rename = "blk")]
    Blocks,
    #[serde(rename = "fg3")]
    Threes,
    #[serde(rename = "tov")]
    Turnovers,
    #[serde(rename = "fg_pct")]
    FieldGoalPct,
    #[serde(rename = "ft_pct")]
    FreeThrowPct,
}

impl Category {
    /// All nine standard categories in canonical order.
    pub const ALL: [Category; 9] = [
        Category::Points,
        Category::Rebounds,
        Category::Assists,
        Category::Steals,
        Category::Blocks,
        Category::Threes,
        Category::Turnovers,
        Category::FieldGoalPct,
        Category::FreeThrowPct,
    ];

    /// Short key used in config files and reports.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Points => "pts",
            Category::Rebounds => "trb",
            Category::Assists => "ast",
            Category::Steals => "stl",
            Category::Blocks => "blk",
            Category::Threes => "fg3",
            Category::Turnovers => "tov",
            Category::FieldGoalPct => "fg_pct",
            Category::FreeThrowPct => "ft_pct",
        }
    }

    /// Parse a category key (case-insensitive).
    pub fn from_key(s: &str) -> Option<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Category::ALL.iter().copied().find(|c| c.key() == lower)
    }

    /// Whether a larger weekly total wins the category.
    pub fn higher_is_better(&self) -> bool {
        !matches!(self, Category::Turnovers)
    }

    /// Sign applied to raw values so that larger is always better.
    pub fn direction(&self) -> f64 {
        if self.higher_is_better() {
            1.0
        } else {
            -1.0
        }
    }

    /// Whether the category is a makes/attempts ratio.
    pub fn is_percentage(&self) -> bool {
        matches!(self, Category::FieldGoalPct | Category::FreeThrowPct)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Ordered, duplicate-free list of active scoring categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Category>", into = "Vec<Category>")]
pub struct CategorySet {
    categories: Vec<Category>,
}

impl CategorySet {
    /// Build a set, rejecting empty input and duplicates.
    pub fn new(categories: Vec<Category>) -> Result<Self, String> {
        if categories.is_empty() {
            return Err("category set must not be empty".into());
        }
        for (i, c) in categories.iter().enumerate() {
            if categories[..i].contains(c) {
                return Err(format!("duplicate category `{c}`"));
            }
        }
        Ok(CategorySet { categories })
    }

    /// The usual nine-category head-to-head format.
    pub fn standard() -> Self {
        CategorySet {
            categories: Category::ALL.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.iter().copied()
    }

    pub fn as_slice(&self) -> &[Category] {
        &self.categories
    }

    pub fn contains(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    /// Position of a category within this set.
    pub fn index_of(&self, category: Category) -> Option<usize> {
        self.categories.iter().position(|&c| c == category)
    }

    /// Boolean mask over this set's positions, true where the category is punted.
    pub fn punt_mask(&self, punts: &[Category]) -> Vec<bool> {
        self.categories.iter().map(|c| punts.contains(c)).collect()
    }
}

impl TryFrom<Vec<Category>> for CategorySet {
    type Error = String;

    fn try_from(value: Vec<Category>) -> Result<Self, Self::Error> {
        CategorySet::new(value)
    }
}

impl From<CategorySet> for Vec<Category> {
    fn from(value: CategorySet) -> Self {
        value.categories
    }
}
