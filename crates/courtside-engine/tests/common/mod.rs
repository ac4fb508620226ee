//! Seeded player pools shared by the integration tests.

#![allow(dead_code)]

use courtside_core::{PlayerProfile, PositionSet, StatTable, WeeklyLine};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const POSITIONS: [&str; 9] = ["PG", "SG", "SF", "PF", "C", "PG,SG", "SF,PF", "PF,C", "SG,SF"];

/// One random week for a player of the given quality.
pub fn random_week(rng: &mut ChaCha8Rng, quality: f64) -> WeeklyLine {
    let fga = quality * rng.gen_range(20.0..60.0);
    let fta = quality * rng.gen_range(5.0..25.0);
    WeeklyLine {
        pts: quality * rng.gen_range(40.0..100.0),
        trb: quality * rng.gen_range(10.0..40.0),
        ast: quality * rng.gen_range(5.0..30.0),
        stl: quality * rng.gen_range(1.0..8.0),
        blk: quality * rng.gen_range(0.0..8.0),
        fg3: quality * rng.gen_range(0.0..12.0),
        tov: quality * rng.gen_range(3.0..15.0),
        fg: fga * rng.gen_range(0.38..0.58),
        fga,
        ft: fta * rng.gen_range(0.6..0.9),
        fta,
    }
}

/// `n_players` players with `n_weeks` weeks each and cycling positions.
pub fn random_table(n_players: usize, n_weeks: usize, seed: u64) -> StatTable {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let players = (0..n_players)
        .map(|id| {
            let quality = rng.gen_range(0.5..1.5);
            PlayerProfile {
                id,
                name: format!("Player {id}"),
                positions: PositionSet::parse(POSITIONS[id % POSITIONS.len()]),
                weeks: (0..n_weeks).map(|_| random_week(&mut rng, quality)).collect(),
            }
        })
        .collect();
    StatTable::new(players).expect("ids match indices")
}

/// A player whose every week is the same line.
pub fn steady_player(id: usize, positions: &str, line: WeeklyLine, n_weeks: usize) -> PlayerProfile {
    PlayerProfile {
        id,
        name: format!("Player {id}"),
        positions: PositionSet::parse(positions),
        weeks: vec![line; n_weeks],
    }
}
