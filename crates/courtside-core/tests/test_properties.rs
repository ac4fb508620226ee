//! Property-based tests for matchup probability and roster eligibility.

use proptest::prelude::*;

use courtside_core::eligibility::{assign_slots, feasible};
use courtside_core::position::{Position, PositionSet, Slot, SlotCapacities};
use courtside_core::win_prob::{
    majority_win_probability, majority_wins_needed, win_probability_at_least,
};

/// Sum over all 2^k outcomes, no pruning.
fn brute_force(p: &[f64], wins_needed: usize) -> f64 {
    let k = p.len();
    let mut total = 0.0;
    for mask in 0u32..(1 << k) {
        let wins = mask.count_ones() as usize;
        if wins < wins_needed {
            continue;
        }
        let mut prob = 1.0;
        for (i, &pi) in p.iter().enumerate() {
            prob *= if mask & (1 << i) != 0 { pi } else { 1.0 - pi };
        }
        total += prob;
    }
    total
}

fn position_set_strategy() -> impl Strategy<Value = PositionSet> {
    prop::collection::vec(0..Position::ALL.len(), 0..3).prop_map(|idx| {
        let tags: Vec<Position> = idx.into_iter().map(|i| Position::ALL[i]).collect();
        PositionSet::from_positions(&tags)
    })
}

fn capacities_strategy() -> impl Strategy<Value = SlotCapacities> {
    prop::array::uniform8(0usize..4).prop_map(|c| SlotCapacities {
        c: c[0],
        pg: c[1],
        sg: c[2],
        g: c[3],
        sf: c[4],
        pf: c[5],
        f: c[6],
        util: c[7],
    })
}

proptest! {
    // 1. Pruned enumeration equals naive summation over 2^9 outcomes.
    #[test]
    fn majority_matches_brute_force(p in prop::collection::vec(0.0f64..=1.0, 9)) {
        let fast = majority_win_probability(&p);
        let slow = brute_force(&p, majority_wins_needed(9));
        prop_assert!((fast - slow).abs() < 1e-12, "fast={fast} slow={slow}");
    }

    // 2. Same for any category count and threshold.
    #[test]
    fn threshold_matches_brute_force(
        p in prop::collection::vec(0.0f64..=1.0, 1..10),
        extra in 0usize..3,
    ) {
        let wins_needed = (p.len() / 2 + extra).min(p.len());
        let fast = win_probability_at_least(&p, wins_needed);
        let slow = brute_force(&p, wins_needed);
        prop_assert!((fast - slow).abs() < 1e-12);
    }

    // 3. A probability is a probability.
    #[test]
    fn majority_is_bounded(p in prop::collection::vec(0.0f64..=1.0, 0..10)) {
        let prob = majority_win_probability(&p);
        prop_assert!((-1e-12..=1.0 + 1e-12).contains(&prob));
    }

    // 4. Feasibility does not depend on input order.
    #[test]
    fn feasibility_is_order_invariant(
        players in prop::collection::vec(position_set_strategy(), 0..14),
        caps in capacities_strategy(),
        seed in any::<u64>(),
    ) {
        use rand::seq::SliceRandom;
        use rand::SeedableRng;

        let mut shuffled = players.clone();
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        shuffled.shuffle(&mut rng);
        let mut reversed = players.clone();
        reversed.reverse();

        let verdict = feasible(&players, &caps);
        prop_assert_eq!(verdict, feasible(&shuffled, &caps));
        prop_assert_eq!(verdict, feasible(&reversed, &caps));
    }

    // 5. Any returned assignment is legal.
    #[test]
    fn assignments_are_legal(
        players in prop::collection::vec(position_set_strategy(), 0..14),
        caps in capacities_strategy(),
    ) {
        if let Some(slots) = assign_slots(&players, &caps) {
            prop_assert_eq!(slots.len(), players.len());
            for (p, s) in players.iter().zip(&slots) {
                prop_assert!(s.accepts(*p));
            }
            for slot in Slot::ALL {
                let used = slots.iter().filter(|&&s| s == slot).count();
                prop_assert!(used <= caps.get(slot));
            }
        }
    }

    // 6. Removing a player never turns a feasible roster infeasible.
    #[test]
    fn feasibility_is_monotone(
        players in prop::collection::vec(position_set_strategy(), 1..14),
        caps in capacities_strategy(),
    ) {
        if feasible(&players, &caps) {
            prop_assert!(feasible(&players[1..], &caps));
        }
    }
}
