// Player data loading: weekly box-score lines and position eligibility.
//
// Two CSV files: one row per player-week with raw counting stats, and one
// row per player with a position list ("PG,SG", "SF/PF" or "C").

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use courtside_core::config::{Config, DataPaths};
use courtside_core::{PlayerProfile, PositionSet, StatTable, WeeklyLine};
use serde::Deserialize;
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw CSV rows (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawWeekRow {
    player: String,
    week: u32,
    pts: f64,
    trb: f64,
    ast: f64,
    stl: f64,
    blk: f64,
    fg3: f64,
    tov: f64,
    fg: f64,
    fga: f64,
    ft: f64,
    fta: f64,
}

impl RawWeekRow {
    fn line(&self) -> WeeklyLine {
        WeeklyLine {
            pts: self.pts,
            trb: self.trb,
            ast: self.ast,
            stl: self.stl,
            blk: self.blk,
            fg3: self.fg3,
            tov: self.tov,
            fg: self.fg,
            fga: self.fga,
            ft: self.ft,
            fta: self.fta,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawPositionRow {
    player: String,
    positions: String,
}

/// One parsed weekly row.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekRecord {
    pub player: String,
    pub week: u32,
    pub line: WeeklyLine,
}

// ---------------------------------------------------------------------------
// Reader-based loaders (enable testing without temp files)
// ---------------------------------------------------------------------------

fn load_weeks_from_reader<R: Read>(rdr: R) -> Result<Vec<WeekRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let mut records = Vec::new();
    for result in reader.deserialize::<RawWeekRow>() {
        match result {
            Ok(raw) => {
                let line = raw.line();
                let name = raw.player.trim();
                if name.is_empty() {
                    warn!("skipping weekly row with empty player name");
                    continue;
                }
                if !line.is_finite() {
                    warn!("skipping week {} of '{}': non-finite value", raw.week, name);
                    continue;
                }
                if line.fg > line.fga || line.ft > line.fta {
                    warn!("skipping week {} of '{}': makes exceed attempts", raw.week, name);
                    continue;
                }
                records.push(WeekRecord {
                    player: name.to_string(),
                    week: raw.week,
                    line,
                });
            }
            Err(e) => {
                warn!("skipping malformed weekly row: {}", e);
            }
        }
    }
    Ok(records)
}

fn load_positions_from_reader<R: Read>(rdr: R) -> Result<Vec<(String, PositionSet)>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let mut out: Vec<(String, PositionSet)> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    for result in reader.deserialize::<RawPositionRow>() {
        match result {
            Ok(raw) => {
                let name = raw.player.trim().to_string();
                let positions = PositionSet::parse(&raw.positions);
                if positions.is_empty() {
                    warn!("skipping '{}': no recognised positions in '{}'", name, raw.positions);
                    continue;
                }
                if let Some(&idx) = seen.get(&name) {
                    warn!("duplicate position entry for '{}', using latest value", name);
                    out[idx].1 = positions;
                    continue;
                }
                seen.insert(name.clone(), out.len());
                out.push((name, positions));
            }
            Err(e) => {
                warn!("skipping malformed position row: {}", e);
            }
        }
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Table assembly
// ---------------------------------------------------------------------------

/// Join positions and weekly rows into a [`StatTable`]. Player ids follow the
/// order of the positions file; weeks are sorted by week number. Weekly
/// rows for players without positions are dropped.
pub fn build_table(positions: Vec<(String, PositionSet)>, weeks: Vec<WeekRecord>) -> Result<StatTable, IngestError> {
    if positions.is_empty() {
        return Err(IngestError::Validation(
            "positions CSV produced zero valid rows".into(),
        ));
    }

    let index: HashMap<&str, usize> = positions
        .iter()
        .enumerate()
        .map(|(i, (name, _))| (name.as_str(), i))
        .collect();
    let mut by_player: Vec<Vec<(u32, WeeklyLine)>> = vec![Vec::new(); positions.len()];
    let mut orphaned = 0usize;
    for record in weeks {
        match index.get(record.player.as_str()) {
            Some(&id) => {
                let slot = &mut by_player[id];
                if let Some(existing) = slot.iter_mut().find(|(w, _)| *w == record.week) {
                    warn!(
                        "duplicate week {} for '{}', using latest value",
                        record.week, record.player
                    );
                    existing.1 = record.line;
                } else {
                    slot.push((record.week, record.line));
                }
            }
            None => orphaned += 1,
        }
    }
    if orphaned > 0 {
        warn!("dropped {} weekly rows for players without positions", orphaned);
    }

    let players: Vec<PlayerProfile> = positions
        .into_iter()
        .zip(by_player)
        .enumerate()
        .map(|(id, ((name, positions), mut weeks))| {
            weeks.sort_by_key(|(w, _)| *w);
            PlayerProfile {
                id,
                name,
                positions,
                weeks: weeks.into_iter().map(|(_, line)| line).collect(),
            }
        })
        .collect();

    let without_history = players.iter().filter(|p| !p.has_history()).count();
    if without_history > 0 {
        warn!("{} players have no weekly history", without_history);
    }
    if without_history == players.len() {
        return Err(IngestError::Validation(
            "no player has any weekly history".into(),
        ));
    }

    StatTable::new(players).map_err(|e| IngestError::Validation(e.to_string()))
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

fn open(path: &Path) -> Result<std::fs::File, IngestError> {
    std::fs::File::open(path).map_err(|e| IngestError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load weekly rows from a CSV file.
pub fn load_weekly_stats(path: &Path) -> Result<Vec<WeekRecord>, IngestError> {
    load_weeks_from_reader(open(path)?).map_err(|e| IngestError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load position eligibility from a CSV file.
pub fn load_positions(path: &Path) -> Result<Vec<(String, PositionSet)>, IngestError> {
    load_positions_from_reader(open(path)?).map_err(|e| IngestError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load the player table using paths from the config.
pub fn load_all(config: &Config) -> Result<StatTable, IngestError> {
    load_all_from_paths(&config.data_paths)
}

/// Load the player table from explicit paths.
pub fn load_all_from_paths(paths: &DataPaths) -> Result<StatTable, IngestError> {
    let positions = load_positions(Path::new(&paths.positions))?;
    let weeks = load_weekly_stats(Path::new(&paths.weekly_stats))?;
    info!(
        "Read {} position rows and {} weekly rows",
        positions.len(),
        weeks.len()
    );
    build_table(positions, weeks)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use courtside_core::Position;

    const WEEKS_CSV: &str = "\
player,week,pts,trb,ast,stl,blk,fg3,tov,fg,fga,ft,fta
Ada,2,30,10,5,1,1,2,3,12,24,4,5
Ada,1,20,8,4,2,0,1,2,8,20,3,4
Bo,1,15,12,1,0,3,0,1,7,12,1,4
Bo,1,abc,12,1,0,3,0,1,7,12,1,4
Cy,1,10,2,2,1,0,1,1,9,5,0,0
Ghost,1,10,2,2,1,0,1,1,2,5,0,0
";

    const POSITIONS_CSV: &str = "\
player,positions
Ada,PG/SG
Bo,\"PF,C\"
Cy,SF
Dee,XX
Eve,C
";

    #[test]
    fn weekly_rows_skip_malformed_and_impossible() {
        let rows = load_weeks_from_reader(WEEKS_CSV.as_bytes()).unwrap();
        // "abc" fails to parse; Cy made 9 of 5.
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].player, "Ada");
        assert_eq!(rows[0].line.fga, 24.0);
    }

    #[test]
    fn positions_parse_separators_and_skip_unknown() {
        let rows = load_positions_from_reader(POSITIONS_CSV.as_bytes()).unwrap();
        let names: Vec<&str> = rows.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Bo", "Cy", "Eve"]);
        assert!(rows[0].1.contains(Position::PG));
        assert!(rows[0].1.contains(Position::SG));
        assert!(rows[1].1.contains(Position::C));
    }

    #[test]
    fn table_joins_and_sorts_weeks() {
        let positions = load_positions_from_reader(POSITIONS_CSV.as_bytes()).unwrap();
        let weeks = load_weeks_from_reader(WEEKS_CSV.as_bytes()).unwrap();
        let table = build_table(positions, weeks).unwrap();

        assert_eq!(table.len(), 4);
        let ada = table.get(0).unwrap();
        assert_eq!(ada.name, "Ada");
        assert_eq!(ada.weeks.len(), 2);
        assert_eq!(ada.weeks[0].pts, 20.0);
        assert_eq!(ada.weeks[1].pts, 30.0);
        // Cy's only row was rejected; Eve never played.
        assert!(!table.get(2).unwrap().has_history());
        assert!(!table.get(3).unwrap().has_history());
    }

    #[test]
    fn duplicate_week_keeps_latest() {
        let positions = vec![("Ada".to_string(), PositionSet::parse("PG"))];
        let line = |pts: f64| WeeklyLine {
            pts,
            ..Default::default()
        };
        let weeks = vec![
            WeekRecord {
                player: "Ada".into(),
                week: 1,
                line: line(5.0),
            },
            WeekRecord {
                player: "Ada".into(),
                week: 1,
                line: line(9.0),
            },
        ];
        let table = build_table(positions, weeks).unwrap();
        assert_eq!(table.get(0).unwrap().weeks, vec![line(9.0)]);
    }

    #[test]
    fn empty_inputs_are_rejected() {
        assert!(matches!(
            build_table(Vec::new(), Vec::new()),
            Err(IngestError::Validation(_))
        ));
        let positions = vec![("Ada".to_string(), PositionSet::parse("PG"))];
        assert!(matches!(
            build_table(positions, Vec::new()),
            Err(IngestError::Validation(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_weekly_stats(Path::new("/nonexistent/weekly.csv")).unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }
}
