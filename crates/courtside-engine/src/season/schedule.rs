// Round-robin schedule (circle method: team 0 fixed, the others rotate).

/// Opponent of `team` in `week` for an even league of `num_teams`.
///
/// With `m = num_teams - 1`, team `t != 0` meets the team `u` in `1..=m`
/// with `t + u == -2(week + 1) (mod m)`; the one team paired with itself
/// by that rule meets team 0 instead. Weeks cycle with period `m`, and the
/// mapping is an involution: the opponent's opponent is `team`.
pub fn round_robin_opponent(team: usize, week: usize, num_teams: usize) -> usize {
    debug_assert!(num_teams >= 2 && num_teams % 2 == 0);
    debug_assert!(team < num_teams);
    let m = num_teams - 1;
    let shift = (week + 1) % m;

    if team == 0 {
        let t = (m - shift) % m;
        return if t == 0 { m } else { t };
    }

    let target = (2 * m - (2 * shift) % m) % m;
    let u = (target + m - team % m) % m;
    let u = if u == 0 { m } else { u };
    if u == team {
        0
    } else {
        u
    }
}

/// All pairings for one week, each listed once with the lower index first.
pub fn week_pairings(week: usize, num_teams: usize) -> Vec<(usize, usize)> {
    (0..num_teams)
        .filter_map(|t| {
            let o = round_robin_opponent(t, week, num_teams);
            (t < o).then_some((t, o))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_team_first_week() {
        assert_eq!(round_robin_opponent(0, 0, 12), 10);
        assert_eq!(round_robin_opponent(10, 0, 12), 0);
    }

    #[test]
    fn two_teams_always_meet() {
        for week in 0..5 {
            assert_eq!(round_robin_opponent(0, week, 2), 1);
            assert_eq!(round_robin_opponent(1, week, 2), 0);
        }
    }

    #[test]
    fn every_pair_meets_once_per_cycle() {
        for n in [2usize, 4, 6, 12] {
            let mut met = vec![vec![0u32; n]; n];
            for week in 0..n - 1 {
                let pairs = week_pairings(week, n);
                assert_eq!(pairs.len(), n / 2);
                for (a, b) in pairs {
                    met[a][b] += 1;
                    met[b][a] += 1;
                }
            }
            for (a, row) in met.iter().enumerate() {
                for (b, &count) in row.iter().enumerate() {
                    assert_eq!(count, u32::from(a != b), "n={n} a={a} b={b}");
                }
            }
        }
    }

    #[test]
    fn schedule_repeats_after_a_cycle() {
        for team in 0..12 {
            assert_eq!(
                round_robin_opponent(team, 3, 12),
                round_robin_opponent(team, 3 + 11, 12)
            );
        }
    }
}
