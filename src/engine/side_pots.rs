use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{chips::Chips, HandRank, SeatIndex};

/// What one seat put into the hand.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contribution {
    pub seat: SeatIndex,
    pub amount: Chips,
    pub folded: bool,
}

/// A slice of the pot that only some players can win.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    pub amount: Chips,
    /// Contribution level that closes this slice.
    pub level: Chips,
    /// Non-folded seats that contributed at least `level`.
    pub eligible_seats: Vec<SeatIndex>,
}

/// Splits total contributions into the main pot and side pots.
///
/// Distinct contribution levels are taken in ascending order; each slice is
/// `(level - previous level) * contributors at or above level`. Folded players
/// fund slices but are never eligible. A slice nobody can win is carried into
/// the next one (or the last one). The slices always add up to the sum of the
/// contributions.
pub fn compute_side_pots(contributions: &[Contribution]) -> Vec<SidePot> {
    let mut levels: Vec<Chips> = contributions
        .iter()
        .map(|c| c.amount)
        .filter(|a| !a.is_zero())
        .collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots: Vec<SidePot> = Vec::with_capacity(levels.len());
    let mut prev_level = Chips::ZERO;
    let mut carry = Chips::ZERO;

    for level in levels {
        let step = level - prev_level;
        let contributors = contributions.iter().filter(|c| c.amount >= level).count() as u64;

        let mut eligible: Vec<SeatIndex> = contributions
            .iter()
            .filter(|c| c.amount >= level && !c.folded)
            .map(|c| c.seat)
            .collect();
        eligible.sort_unstable();

        let amount = Chips(step.0 * contributors) + carry;
        prev_level = level;

        if eligible.is_empty() {
            carry = amount;
            continue;
        }
        carry = Chips::ZERO;

        pots.push(SidePot {
            amount,
            level,
            eligible_seats: eligible,
        });
    }

    if !carry.is_zero() {
        match pots.last_mut() {
            Some(last) => last.amount += carry,
            // Nobody left to win: hand the chips back to whoever put them in.
            None => {
                let mut seats: Vec<SeatIndex> = contributions
                    .iter()
                    .filter(|c| !c.amount.is_zero())
                    .map(|c| c.seat)
                    .collect();
                seats.sort_unstable();
                pots.push(SidePot {
                    amount: carry,
                    level: prev_level,
                    eligible_seats: seats,
                });
            }
        }
    }

    pots
}

/// Splits `amount` evenly between `winners`. Odd chips go one each to the
/// winners seated earliest in `odd_chip_order` (clockwise from the button).
pub fn split_pot(amount: Chips, winners: &[SeatIndex], odd_chip_order: &[SeatIndex]) -> Vec<(SeatIndex, Chips)> {
    if winners.is_empty() {
        return Vec::new();
    }

    let mut ordered: Vec<SeatIndex> = winners.to_vec();
    ordered.sort_by_key(|s| {
        odd_chip_order
            .iter()
            .position(|o| o == s)
            .unwrap_or(usize::MAX)
    });

    let n = ordered.len() as u64;
    let share = amount.0 / n;
    let mut remainder = amount.0 % n;

    ordered
        .into_iter()
        .map(|seat| {
            let mut prize = share;
            if remainder > 0 {
                prize += 1;
                remainder -= 1;
            }
            (seat, Chips(prize))
        })
        .collect()
}

/// Awards every pot to its best eligible hand(s).
///
/// A pot with a single eligible seat goes to it without looking at ranks;
/// otherwise only eligible seats present in `ranks` compete.
pub fn award_pots(
    pots: &[SidePot],
    ranks: &HashMap<SeatIndex, HandRank>,
    odd_chip_order: &[SeatIndex],
) -> Vec<Vec<(SeatIndex, Chips)>> {
    pots.iter()
        .map(|pot| {
            if pot.eligible_seats.len() == 1 {
                return vec![(pot.eligible_seats[0], pot.amount)];
            }

            let best = pot
                .eligible_seats
                .iter()
                .filter_map(|s| ranks.get(s))
                .max()
                .copied();

            let winners: Vec<SeatIndex> = match best {
                Some(best) => pot
                    .eligible_seats
                    .iter()
                    .copied()
                    .filter(|s| ranks.get(s) == Some(&best))
                    .collect(),
                None => pot.eligible_seats.clone(),
            };

            split_pot(pot.amount, &winners, odd_chip_order)
        })
        .collect()
}
