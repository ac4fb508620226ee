// Draft assignment: the append-only record of who owns which player.

use std::collections::HashMap;

use courtside_core::PlayerId;
use serde::Serialize;

use super::DraftError;

/// One completed pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DraftPick {
    /// 0-based position in the whole draft.
    pub overall: usize,
    pub round: usize,
    pub team: usize,
    pub player: PlayerId,
}

/// Player -> team mapping. Grows one pick at a time and is never edited.
#[derive(Debug, Clone, Default)]
pub struct DraftAssignment {
    picks: Vec<DraftPick>,
    owners: HashMap<PlayerId, usize>,
}

impl DraftAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pick. A player already owned is a consistency violation.
    pub fn record(&mut self, team: usize, round: usize, player: PlayerId) -> Result<(), DraftError> {
        if let Some(&owner) = self.owners.get(&player) {
            return Err(DraftError::DuplicatePick {
                player,
                team,
                owner,
            });
        }
        self.owners.insert(player, team);
        self.picks.push(DraftPick {
            overall: self.picks.len(),
            round,
            team,
            player,
        });
        Ok(())
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.owners.contains_key(&player)
    }

    pub fn team_of(&self, player: PlayerId) -> Option<usize> {
        self.owners.get(&player).copied()
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// All picks in draft order.
    pub fn picks(&self) -> &[DraftPick] {
        &self.picks
    }

    /// Number of teams that own at least one player (highest index + 1).
    pub fn num_teams(&self) -> usize {
        self.picks.iter().map(|p| p.team + 1).max().unwrap_or(0)
    }

    /// Rosters per team, each in pick order.
    pub fn team_rosters(&self, num_teams: usize) -> Vec<Vec<PlayerId>> {
        let mut rosters = vec![Vec::new(); num_teams];
        for pick in &self.picks {
            if let Some(roster) = rosters.get_mut(pick.team) {
                roster.push(pick.player);
            }
        }
        rosters
    }
}
