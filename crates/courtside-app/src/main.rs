// Courtside entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file)
// 2. Load config
// 3. Load weekly stats and positions
// 4. Build agents and run the snake draft
// 5. Simulate the season batch
// 6. Print the JSON report to stdout

use std::sync::Arc;

use anyhow::Context;
use courtside_app::ingest;
use courtside_app::report::SimulationReport;
use courtside_core::config;
use courtside_engine::draft::{build_agents, run_draft};
use courtside_engine::season::{run_multiple_seasons, SeasonSettings};
use courtside_engine::League;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("Courtside starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: league={}, {} teams x {} rounds, {} categories",
        config.league.name,
        config.league.num_teams,
        config.league.rounds,
        config.league.categories.len()
    );

    // 3. Load player data
    let table = ingest::load_all(&config).context("failed to load player data")?;
    info!("Loaded {} players", table.len());
    let league = Arc::new(League::from_config(
        table,
        &config.league,
        &config.strategy.valuation,
    ));

    // 4. Draft
    let mut agents =
        build_agents(&league, &config.strategy.agents).context("failed to build draft agents")?;
    let assignment = run_draft(&mut agents, league.rounds).context("draft failed")?;

    // 5. Seasons
    let sim = &config.strategy.simulation;
    let settings = SeasonSettings {
        n_seasons: sim.seasons,
        n_weeks: sim.weeks,
        scoring: league.scoring,
        detailed: sim.detailed,
        seed: sim.seed,
    };
    let seasons = run_multiple_seasons(&assignment, &league.table, &league.categories, &settings)
        .context("season simulation failed")?;

    // 6. Report
    let report = SimulationReport::build(
        &config.league.name,
        &league.table,
        &agents,
        &assignment,
        seasons,
    );
    let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
    println!("{json}");

    info!("Courtside finished");
    Ok(())
}

/// Initialize tracing to log to `logs/courtside.log` (stdout carries the report).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("courtside.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("courtside=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
