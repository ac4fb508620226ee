//! CSV files on disk through draft, seasons and the JSON report.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use courtside_app::ingest::{load_all_from_paths, IngestError};
use courtside_app::report::SimulationReport;
use courtside_core::config::{AgentKind, AgentSpec, DataPaths};
use courtside_core::ScoringMode;
use courtside_engine::draft::{build_agents, run_draft};
use courtside_engine::season::{run_multiple_seasons, SeasonSettings};
use courtside_engine::League;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const POSITIONS: [&str; 7] = ["PG", "SG,PG", "SF", "SF/PF", "PF", "C", "PF C"];

/// Write seeded positions and weekly CSVs into a fresh temp dir.
fn write_inputs(name: &str, n_players: usize, n_weeks: u32) -> DataPaths {
    let dir: PathBuf = std::env::temp_dir().join(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut positions = String::from("player,positions\n");
    let mut weeks = String::from("player,week,pts,trb,ast,stl,blk,fg3,tov,fg,fga,ft,fta\n");
    for i in 0..n_players {
        writeln!(positions, "Player {i},\"{}\"", POSITIONS[i % POSITIONS.len()]).unwrap();
        let quality: f64 = rng.gen_range(0.5..1.5);
        for week in 1..=n_weeks {
            let fga = (quality * rng.gen_range(20.0..50.0f64)).round();
            let fta = (quality * rng.gen_range(4.0..20.0f64)).round();
            writeln!(
                weeks,
                "Player {i},{week},{:.0},{:.0},{:.0},{:.0},{:.0},{:.0},{:.0},{:.0},{},{:.0},{}",
                quality * rng.gen_range(40.0..100.0f64),
                quality * rng.gen_range(10.0..40.0f64),
                quality * rng.gen_range(5.0..30.0f64),
                quality * rng.gen_range(1.0..8.0f64),
                quality * rng.gen_range(0.0..8.0f64),
                quality * rng.gen_range(0.0..12.0f64),
                quality * rng.gen_range(3.0..15.0f64),
                (fga * rng.gen_range(0.38..0.58f64)).floor(),
                fga,
                (fta * rng.gen_range(0.6..0.9f64)).floor(),
                fta,
            )
            .unwrap();
        }
    }

    let positions_path = dir.join("positions.csv");
    let weeks_path = dir.join("weekly_stats.csv");
    fs::write(&positions_path, positions).unwrap();
    fs::write(&weeks_path, weeks).unwrap();
    DataPaths {
        weekly_stats: weeks_path.display().to_string(),
        positions: positions_path.display().to_string(),
    }
}

#[test]
fn csv_to_report() {
    let paths = write_inputs("courtside_pipeline_full", 70, 10);
    let table = load_all_from_paths(&paths).unwrap();
    assert_eq!(table.len(), 70);
    assert!(table.players().iter().all(|p| p.weeks.len() == 10));

    let league = Arc::new(League::new(table, 4, 7));
    let mut gaussian = AgentSpec::new(AgentKind::Gaussian);
    gaussian.punts = vec![courtside_core::Category::Turnovers];
    let mut greedy = AgentSpec::new(AgentKind::GreedyPunt);
    greedy.n_punts = 1;
    let specs = vec![
        AgentSpec::new(AgentKind::Zscore),
        AgentSpec::new(AgentKind::Zplus),
        gaussian,
        greedy,
    ];
    let mut agents = build_agents(&league, &specs).unwrap();
    let assignment = run_draft(&mut agents, league.rounds).unwrap();

    let settings = SeasonSettings {
        n_seasons: 10,
        n_weeks: 8,
        scoring: ScoringMode::WinnerTakeAll,
        detailed: true,
        seed: 5,
    };
    let seasons = run_multiple_seasons(&assignment, &league.table, &league.categories, &settings).unwrap();
    let report = SimulationReport::build("Test League", &league.table, &agents, &assignment, seasons);

    assert_eq!(report.teams.len(), 4);
    assert!(report.teams.iter().all(|t| t.players.len() == 7));
    assert_eq!(report.teams[2].agent, "team 2 (gaussian)");
    let total: f64 = report.teams.iter().map(|t| t.championship_share).sum();
    assert!((total - 1.0).abs() < 1e-9);

    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json["league"], "Test League");
    assert_eq!(json["seasons_completed"], 10);
    assert_eq!(json["breakdown"][0]["categories"][0]["category"], "pts");
}

#[test]
fn missing_weekly_file_is_reported() {
    let mut paths = write_inputs("courtside_pipeline_missing", 4, 1);
    paths.weekly_stats = "/nonexistent/courtside/weekly.csv".into();
    assert!(matches!(
        load_all_from_paths(&paths),
        Err(IngestError::Io { .. })
    ));
}
