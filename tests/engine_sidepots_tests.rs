//! Pot splitting: main/side pots, odd chips and awarding.

use std::collections::HashMap;

use holdem_engine::domain::{Chips, HandRank, SeatIndex};
use holdem_engine::engine::side_pots::{award_pots, compute_side_pots, split_pot, Contribution, SidePot};
use proptest::prelude::*;

fn c(seat: SeatIndex, amount: u64, folded: bool) -> Contribution {
    Contribution {
        seat,
        amount: Chips(amount),
        folded,
    }
}

fn total(pots: &[SidePot]) -> Chips {
    pots.iter().map(|p| p.amount).sum()
}

//
// ====================== compute_side_pots ======================
//

#[test]
fn equal_contributions_make_one_pot() {
    let pots = compute_side_pots(&[c(0, 100, false), c(1, 100, false), c(2, 100, false)]);
    assert_eq!(pots.len(), 1);
    assert_eq!(pots[0].amount, Chips(300));
    assert_eq!(pots[0].eligible_seats, vec![0, 1, 2]);
}

/// A all-in for 100, B and C put in 300: main 300 (A, B, C), side 400 (B, C).
#[test]
fn short_all_in_creates_a_side_pot() {
    let pots = compute_side_pots(&[c(0, 100, false), c(1, 300, false), c(2, 300, false)]);

    assert_eq!(pots.len(), 2);
    assert_eq!(pots[0].amount, Chips(300));
    assert_eq!(pots[0].eligible_seats, vec![0, 1, 2]);
    assert_eq!(pots[1].amount, Chips(400));
    assert_eq!(pots[1].eligible_seats, vec![1, 2]);
}

#[test]
fn folded_chips_fund_pots_but_never_win() {
    let pots = compute_side_pots(&[c(0, 50, true), c(1, 200, false), c(2, 200, false)]);

    assert_eq!(total(&pots), Chips(450));
    for pot in &pots {
        assert!(!pot.eligible_seats.contains(&0), "folded seat must not be eligible");
    }
}

#[test]
fn slice_with_nobody_eligible_rolls_into_the_next() {
    // Seat 0 folded after putting in the most; its top slice has no contender.
    let pots = compute_side_pots(&[c(0, 300, true), c(1, 100, false), c(2, 100, false)]);

    assert_eq!(total(&pots), Chips(500));
    assert_eq!(pots.len(), 1);
    assert_eq!(pots[0].eligible_seats, vec![1, 2]);
}

#[test]
fn three_levels_of_all_ins() {
    let pots = compute_side_pots(&[
        c(0, 50, false),
        c(1, 150, false),
        c(2, 400, false),
        c(3, 400, false),
    ]);

    let amounts: Vec<Chips> = pots.iter().map(|p| p.amount).collect();
    assert_eq!(amounts, vec![Chips(200), Chips(300), Chips(500)]);
    assert_eq!(pots[2].eligible_seats, vec![2, 3]);
}

#[test]
fn no_contributions_no_pots() {
    assert!(compute_side_pots(&[]).is_empty());
    assert!(compute_side_pots(&[c(0, 0, false)]).is_empty());
}

//
// ====================== split_pot ======================
//

#[test]
fn even_split() {
    let shares = split_pot(Chips(100), &[3, 1], &[1, 2, 3]);
    assert_eq!(shares, vec![(1, Chips(50)), (3, Chips(50))]);
}

/// Odd chips go to the winners closest to the button, clockwise.
#[test]
fn odd_chips_go_left_of_the_button_first() {
    // Button on seat 2: clockwise order starts at seat 3.
    let order = [3, 4, 0, 1, 2];
    let shares = split_pot(Chips(101), &[0, 4], &order);
    assert_eq!(shares, vec![(4, Chips(51)), (0, Chips(50))]);

    let shares = split_pot(Chips(11), &[0, 1, 4], &order);
    assert_eq!(shares, vec![(4, Chips(4)), (0, Chips(4)), (1, Chips(3))]);
}

#[test]
fn split_with_no_winners_is_empty() {
    assert!(split_pot(Chips(10), &[], &[0, 1]).is_empty());
}

//
// ====================== award_pots ======================
//

#[test]
fn short_stack_wins_main_pot_only() {
    let pots = compute_side_pots(&[c(0, 100, false), c(1, 300, false), c(2, 300, false)]);
    let ranks: HashMap<SeatIndex, HandRank> =
        [(0, HandRank(900)), (1, HandRank(500)), (2, HandRank(400))].into_iter().collect();

    let awards = award_pots(&pots, &ranks, &[1, 2, 0]);
    assert_eq!(awards[0], vec![(0, Chips(300))]);
    assert_eq!(awards[1], vec![(1, Chips(400))]);
}

#[test]
fn tie_splits_pot_with_odd_chip() {
    let pots = vec![SidePot {
        amount: Chips(25),
        level: Chips(10),
        eligible_seats: vec![0, 1, 2],
    }];
    let ranks: HashMap<SeatIndex, HandRank> =
        [(0, HandRank(700)), (1, HandRank(100)), (2, HandRank(700))].into_iter().collect();

    // Button on seat 0: odd chip goes to seat 2 before seat 0.
    let awards = award_pots(&pots, &ranks, &[1, 2, 0]);
    assert_eq!(awards[0], vec![(2, Chips(13)), (0, Chips(12))]);
}

#[test]
fn single_eligible_pot_goes_back_without_ranks() {
    let pots = vec![SidePot {
        amount: Chips(200),
        level: Chips(300),
        eligible_seats: vec![4],
    }];
    let awards = award_pots(&pots, &HashMap::new(), &[0, 1, 2, 3, 4]);
    assert_eq!(awards, vec![vec![(4, Chips(200))]]);
}

//
// ====================== PROPERTIES ======================
//

proptest! {
    /// Pots always add up to the contributions, and every pot has a contender.
    #[test]
    fn pots_conserve_chips(
        entries in proptest::collection::vec((0u64..1_000, any::<bool>()), 2..10)
    ) {
        let contributions: Vec<Contribution> = entries
            .iter()
            .enumerate()
            .map(|(seat, (amount, folded))| c(seat as SeatIndex, *amount, *folded))
            .collect();
        let sum: Chips = contributions.iter().map(|c| c.amount).sum();

        let pots = compute_side_pots(&contributions);
        prop_assert_eq!(total(&pots), sum);
        for pot in &pots {
            prop_assert!(!pot.eligible_seats.is_empty());
        }
    }
}
