// Snake draft loop: direction flips every round.

use tracing::{debug, info};

use super::agent::DraftAgent;
use super::state::DraftAssignment;
use super::DraftError;

/// Team order for one round: forward on even rounds, reversed on odd ones.
pub fn snake_order(num_teams: usize, round: usize) -> Vec<usize> {
    if round % 2 == 0 {
        (0..num_teams).collect()
    } else {
        (0..num_teams).rev().collect()
    }
}

/// Run a full snake draft. Agent `i` drafts for team `i`; each round gives
/// every agent exactly one pick. Any agent error aborts the draft, and so
/// does an agent returning a player that is already owned.
pub fn run_draft(agents: &mut [Box<dyn DraftAgent>], n_rounds: usize) -> Result<DraftAssignment, DraftError> {
    let num_teams = agents.len();
    if num_teams == 0 || num_teams % 2 != 0 {
        return Err(DraftError::InvalidSetup(format!(
            "snake draft needs an even, non-zero number of teams, got {num_teams}"
        )));
    }

    info!("Starting draft: {} teams x {} rounds", num_teams, n_rounds);
    let mut assignment = DraftAssignment::new();
    for round in 0..n_rounds {
        for team in snake_order(num_teams, round) {
            let agent = &mut agents[team];
            let player = agent.pick(&assignment)?;
            assignment.record(team, round, player)?;
            debug!(
                "round {} pick {}: {} took player {}",
                round,
                assignment.len(),
                agent.name(),
                player
            );
        }
    }
    info!("Draft complete: {} picks", assignment.len());
    Ok(assignment)
}
