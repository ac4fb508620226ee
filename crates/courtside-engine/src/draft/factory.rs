// Builds one boxed agent per team from the configured agent entries.

use std::sync::Arc;

use courtside_core::config::{AgentKind, AgentSpec};
use courtside_core::PlayerId;
use tracing::info;

use super::agent::{DraftAgent, GreedyPuntAgent, RankedAgent};
use super::optimizer::{representative_teams, GaussianAgent};
use super::DraftError;
use crate::league::League;
use crate::valuation::gaussian::GaussianModel;

fn kind_label(kind: AgentKind) -> &'static str {
    match kind {
        AgentKind::Zscore => "zscore",
        AgentKind::Zplus => "zplus",
        AgentKind::Dscore => "dscore",
        AgentKind::Gaussian => "gaussian",
        AgentKind::GreedyPunt => "greedy_punt",
    }
}

/// Expand `specs` (each repeated `count` times) into agents, team index in
/// declaration order. The total must match the league's team count.
pub fn build_agents(league: &Arc<League>, specs: &[AgentSpec]) -> Result<Vec<Box<dyn DraftAgent>>, DraftError> {
    let total: usize = specs.iter().map(|s| s.count).sum();
    if total != league.num_teams {
        return Err(DraftError::InvalidSetup(format!(
            "{} agents configured for {} teams",
            total, league.num_teams
        )));
    }

    // Shared by every Gaussian agent; built only when one is configured.
    let mut gaussian: Option<(Arc<GaussianModel>, Arc<Vec<Vec<PlayerId>>>)> = None;

    let mut agents: Vec<Box<dyn DraftAgent>> = Vec::with_capacity(total);
    for spec in specs {
        for _ in 0..spec.count {
            let name = format!("team {} ({})", agents.len(), kind_label(spec.kind));
            let agent: Box<dyn DraftAgent> = match spec.kind {
                AgentKind::Zscore => Box::new(RankedAgent::zscore(name, Arc::clone(league), &spec.punts)),
                AgentKind::Zplus => Box::new(RankedAgent::zplus(name, Arc::clone(league), &spec.punts)),
                AgentKind::Dscore => Box::new(RankedAgent::dscore(name, Arc::clone(league), &spec.punts)),
                AgentKind::GreedyPunt => Box::new(GreedyPuntAgent::new(name, Arc::clone(league), spec.n_punts)),
                AgentKind::Gaussian => {
                    let (model, opponents) = match &gaussian {
                        Some(shared) => shared.clone(),
                        None => {
                            let model = Arc::new(GaussianModel::new(
                                &league.table,
                                &league.categories,
                                league.scoring,
                            ));
                            let opponents = Arc::new(representative_teams(league)?);
                            gaussian = Some((Arc::clone(&model), Arc::clone(&opponents)));
                            (model, opponents)
                        }
                    };
                    Box::new(
                        GaussianAgent::new(name, Arc::clone(league), model, opponents, &spec.punts)
                            .with_dynamic_punts(spec.dynamic_punts)
                            .with_zplus_scale(spec.zplus_scale),
                    )
                }
            };
            agents.push(agent);
        }
    }

    info!("Built {} draft agents", agents.len());
    Ok(agents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtside_core::{PlayerProfile, PositionSet, StatTable, WeeklyLine};

    fn league() -> Arc<League> {
        let players = (0..12)
            .map(|i| PlayerProfile {
                id: i,
                name: format!("P{i}"),
                positions: PositionSet::parse("SG,SF"),
                weeks: vec![WeeklyLine {
                    pts: i as f64,
                    ..Default::default()
                }],
            })
            .collect();
        Arc::new(League::new(StatTable::new(players).unwrap(), 4, 2))
    }

    #[test]
    fn expands_counts_in_order() {
        let mut zscore = AgentSpec::new(AgentKind::Zscore);
        zscore.count = 2;
        let specs = vec![
            zscore,
            AgentSpec::new(AgentKind::Gaussian),
            AgentSpec::new(AgentKind::GreedyPunt),
        ];
        let agents = build_agents(&league(), &specs).unwrap();
        let names: Vec<&str> = agents.iter().map(|a| a.name()).collect();
        assert_eq!(
            names,
            vec![
                "team 0 (zscore)",
                "team 1 (zscore)",
                "team 2 (gaussian)",
                "team 3 (greedy_punt)"
            ]
        );
    }

    #[test]
    fn count_mismatch_is_rejected() {
        let specs = vec![AgentSpec::new(AgentKind::Zplus)];
        assert!(matches!(
            build_agents(&league(), &specs),
            Err(DraftError::InvalidSetup(_))
        ));
    }
}
