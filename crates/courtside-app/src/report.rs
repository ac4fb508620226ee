// JSON report of one draft plus its season batch.

use courtside_core::StatTable;
use courtside_engine::draft::{DraftAgent, DraftAssignment};
use courtside_engine::season::{SeasonReport, TeamBreakdown};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TeamSummary {
    pub team: usize,
    pub agent: String,
    pub players: Vec<String>,
    pub championship_share: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub league: String,
    pub seasons_completed: usize,
    pub seasons_failed: usize,
    pub teams: Vec<TeamSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Vec<TeamBreakdown>>,
}

impl SimulationReport {
    pub fn build(
        league: &str,
        table: &StatTable,
        agents: &[Box<dyn DraftAgent>],
        assignment: &DraftAssignment,
        seasons: SeasonReport,
    ) -> Self {
        let rosters = assignment.team_rosters(agents.len());
        let teams = agents
            .iter()
            .zip(rosters)
            .enumerate()
            .map(|(team, (agent, roster))| TeamSummary {
                team,
                agent: agent.name().to_string(),
                players: roster
                    .iter()
                    .map(|&id| {
                        table
                            .get(id)
                            .map(|p| p.name.clone())
                            .unwrap_or_else(|| format!("#{id}"))
                    })
                    .collect(),
                championship_share: seasons.championship_share.get(team).copied().unwrap_or(0.0),
            })
            .collect();

        SimulationReport {
            league: league.to_string(),
            seasons_completed: seasons.seasons_completed,
            seasons_failed: seasons.seasons_failed,
            teams,
            breakdown: seasons.breakdown,
        }
    }
}
