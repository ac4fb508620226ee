// Roster eligibility: can a set of players be placed into the roster slots?
//
// The network is source -> player (cap 1) -> eligible slot (cap 1) ->
// sink (cap = slot capacity). A roster is feasible iff the max flow equals
// the player count. Flow is pushed one player at a time along augmenting
// paths, so the result is exact and integral.

use crate::position::{PositionSet, Slot, SlotCapacities, SLOT_COUNT};

/// Assign every player to a slot, or return `None` if no legal assignment
/// exists.
///
/// The returned vector is parallel to `players`.
pub fn assign_slots(players: &[PositionSet], capacities: &SlotCapacities) -> Option<Vec<Slot>> {
    if players.len() > capacities.total() {
        return None;
    }

    let mut matcher = SlotMatcher::new(players, capacities);
    for player in 0..players.len() {
        let mut visited = [false; SLOT_COUNT];
        if !matcher.augment(player, &mut visited) {
            return None;
        }
    }
    Some(matcher.into_assignment())
}

/// Whether the players can be legally placed under the given capacities.
///
/// Deterministic and independent of the order of `players`.
pub fn feasible(players: &[PositionSet], capacities: &SlotCapacities) -> bool {
    assign_slots(players, capacities).is_some()
}

struct SlotMatcher<'a> {
    players: &'a [PositionSet],
    capacity: [usize; SLOT_COUNT],
    /// Players currently routed through each slot.
    occupants: [Vec<usize>; SLOT_COUNT],
    /// Slot currently used by each player.
    slot_of: Vec<Option<Slot>>,
}

impl<'a> SlotMatcher<'a> {
    fn new(players: &'a [PositionSet], capacities: &SlotCapacities) -> Self {
        let mut capacity = [0usize; SLOT_COUNT];
        for slot in Slot::ALL {
            capacity[slot.index()] = capacities.get(slot);
        }
        SlotMatcher {
            players,
            capacity,
            occupants: Default::default(),
            slot_of: vec![None; players.len()],
        }
    }

    /// Find an augmenting path starting at `player`. Each slot is visited at
    /// most once per search.
    fn augment(&mut self, player: usize, visited: &mut [bool; SLOT_COUNT]) -> bool {
        let eligible = self.players[player];

        // Free capacity first: shortest augmenting paths.
        for slot in Slot::ALL {
            let idx = slot.index();
            if visited[idx] || !slot.accepts(eligible) {
                continue;
            }
            if self.occupants[idx].len() < self.capacity[idx] {
                visited[idx] = true;
                self.place(player, slot);
                return true;
            }
        }

        // Otherwise try to reroute one of the slot's occupants.
        for slot in Slot::ALL {
            let idx = slot.index();
            if visited[idx] || !slot.accepts(eligible) || self.capacity[idx] == 0 {
                continue;
            }
            visited[idx] = true;
            let occupants = self.occupants[idx].clone();
            for other in occupants {
                if self.augment(other, visited) {
                    // `other` moved elsewhere; free its old spot here.
                    self.occupants[idx].retain(|&p| p != other);
                    self.place(player, slot);
                    return true;
                }
            }
        }

        false
    }

    fn place(&mut self, player: usize, slot: Slot) {
        self.occupants[slot.index()].push(player);
        self.slot_of[player] = Some(slot);
    }

    fn into_assignment(self) -> Vec<Slot> {
        self.slot_of.into_iter().flatten().collect()
    }
}
