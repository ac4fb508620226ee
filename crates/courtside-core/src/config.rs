// Configuration loading and parsing (league.toml, strategy.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::category::{Category, CategorySet};
use crate::position::SlotCapacities;
use crate::win_prob::ScoringMode;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub strategy: StrategyConfig,
    pub data_paths: DataPaths,
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[league]` table in league.toml.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
    pub num_teams: usize,
    /// Picks per team; the draft runs this many snake rounds.
    pub rounds: usize,
    pub scoring: ScoringMode,
    pub categories: CategorySet,
    #[serde(default)]
    pub slots: SlotCapacities,
}

// ---------------------------------------------------------------------------
// strategy.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire strategy.toml file.
#[derive(Debug, Clone, Deserialize)]
struct StrategyFile {
    #[serde(default)]
    valuation: ValuationConfig,
    simulation: SimulationConfig,
    data_paths: DataPaths,
    agents: Vec<AgentSpec>,
}

/// The public strategy config assembled from the strategy.toml sections.
#[derive(Debug, Clone)]
pub struct StrategyConfig {
    pub valuation: ValuationConfig,
    pub simulation: SimulationConfig,
    pub agents: Vec<AgentSpec>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValuationConfig {
    /// Size of the elite reference pool for Z-Plus and D-Score. Defaults to
    /// twice the number of rostered players league-wide.
    #[serde(default)]
    pub elite_pool_size: Option<usize>,
}

impl ValuationConfig {
    pub fn elite_pool_size(&self, league: &LeagueConfig) -> usize {
        self.elite_pool_size
            .unwrap_or(2 * league.num_teams * league.rounds)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    pub seasons: usize,
    pub weeks: usize,
    pub seed: u64,
    /// Include the per-category win/tie breakdown in the report.
    #[serde(default)]
    pub detailed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub weekly_stats: String,
    pub positions: String,
}

/// Drafting strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Zscore,
    Zplus,
    Dscore,
    Gaussian,
    GreedyPunt,
}

/// One `[[agents]]` entry: `count` teams drafting with the same strategy.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentSpec {
    pub kind: AgentKind,
    #[serde(default = "default_count")]
    pub count: usize,
    /// Categories ignored by this strategy.
    #[serde(default)]
    pub punts: Vec<Category>,
    /// Gaussian only: lowest-ranked categories punted afresh every pick.
    #[serde(default)]
    pub dynamic_punts: usize,
    /// Gaussian only: scale applied to the Z-Plus term of the blend.
    #[serde(default = "default_zplus_scale")]
    pub zplus_scale: f64,
    /// Greedy-punt only: number of worst categories punted each pick.
    #[serde(default)]
    pub n_punts: usize,
}

fn default_count() -> usize {
    1
}

fn default_zplus_scale() -> f64 {
    0.1
}

impl AgentSpec {
    pub fn new(kind: AgentKind) -> Self {
        AgentSpec {
            kind,
            count: 1,
            punts: Vec::new(),
            dynamic_punts: 0,
            zplus_scale: default_zplus_scale(),
            n_punts: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` and
/// `config/strategy.toml`, relative to the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- league.toml (required) ---
    let league_path = config_dir.join("league.toml");
    let league_text = read_file(&league_path)?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
            path: league_path.clone(),
            source: e,
        })?;

    // --- strategy.toml (required) ---
    let strategy_path = config_dir.join("strategy.toml");
    let strategy_text = read_file(&strategy_path)?;
    let strategy_file: StrategyFile =
        toml::from_str(&strategy_text).map_err(|e| ConfigError::ParseError {
            path: strategy_path.clone(),
            source: e,
        })?;

    let config = Config {
        league: league_file.league,
        strategy: StrategyConfig {
            valuation: strategy_file.valuation,
            simulation: strategy_file.simulation,
            agents: strategy_file.agents,
        },
        data_paths: strategy_file.data_paths,
    };

    validate(&config)?;

    Ok(config)
}

/// The two files `load_config_from` reads, in both `config/` and `defaults/`.
const CONFIG_FILES: [&str; 2] = ["league.toml", "strategy.toml"];

/// Copy each of `league.toml` and `strategy.toml` from `defaults/` into
/// `config/` when `config/` lacks it. Existing files are never touched.
/// Returns the paths that were written.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    let mut copied = Vec::new();
    for name in CONFIG_FILES {
        let target = config_dir.join(name);
        if target.exists() {
            continue;
        }
        let source = defaults_dir.join(name);
        if !source.is_file() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "config/{name} is missing and there is no defaults/{name} in {}",
                    base_dir.display()
                ),
            });
        }
        std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", config_dir.display()),
        })?;
        std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
        })?;
        info!("Initialized {} from defaults", target.display());
        copied.push(target);
    }
    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let league = &config.league;

    if league.num_teams == 0 {
        return Err(invalid("league.num_teams", "must be greater than 0"));
    }
    // Round-robin scheduling pairs every team each week.
    if league.num_teams % 2 != 0 {
        return Err(invalid(
            "league.num_teams",
            format!("must be even, got {}", league.num_teams),
        ));
    }
    if league.rounds == 0 {
        return Err(invalid("league.rounds", "must be greater than 0"));
    }
    let spots = league.slots.total();
    if spots < league.rounds {
        return Err(invalid(
            "league.slots",
            format!("{spots} roster spots cannot hold {} rounds", league.rounds),
        ));
    }

    let sim = &config.strategy.simulation;
    if sim.seasons == 0 {
        return Err(invalid("simulation.seasons", "must be > 0"));
    }
    if sim.weeks == 0 {
        return Err(invalid("simulation.weeks", "must be > 0"));
    }

    if config.strategy.valuation.elite_pool_size == Some(0) {
        return Err(invalid("valuation.elite_pool_size", "must be > 0"));
    }

    let agents = &config.strategy.agents;
    let total: usize = agents.iter().map(|a| a.count).sum();
    if total != league.num_teams {
        return Err(invalid(
            "agents",
            format!(
                "agent counts sum to {total}, league has {} teams",
                league.num_teams
            ),
        ));
    }
    for (i, agent) in agents.iter().enumerate() {
        if agent.count == 0 {
            return Err(invalid(&format!("agents[{i}].count"), "must be > 0"));
        }
        if agent.n_punts >= league.categories.len() {
            return Err(invalid(
                &format!("agents[{i}].n_punts"),
                "must leave at least one category",
            ));
        }
        if agent.dynamic_punts + agent.punts.len() >= league.categories.len() {
            return Err(invalid(
                &format!("agents[{i}].dynamic_punts"),
                "punts must leave at least one category",
            ));
        }
        if !agent.zplus_scale.is_finite() || agent.zplus_scale < 0.0 {
            return Err(invalid(
                &format!("agents[{i}].zplus_scale"),
                format!("must be finite and >= 0, got {}", agent.zplus_scale),
            ));
        }
        if let Some(bad) = agent
            .punts
            .iter()
            .find(|c| !league.categories.contains(**c))
        {
            return Err(invalid(
                &format!("agents[{i}].punts"),
                format!("`{bad}` is not an active category"),
            ));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
