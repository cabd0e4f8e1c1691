//! Turn order over the fixed seat array.
//!
//! Every walk is explicit: a start seat, a direction (always clockwise, i.e. by
//! increasing index with wrap-around) and a skip predicate. Nothing keeps a cursor
//! between calls.

use crate::domain::{Player, SeatIndex, Table};

/// Next occupied seat after `start` (or at it, with `include_start`) whose
/// player satisfies `pred`.
pub fn next_seat_matching(
    table: &Table,
    start: SeatIndex,
    include_start: bool,
    pred: impl Fn(&Player) -> bool,
) -> Option<SeatIndex> {
    seats_from(table, start, include_start)
        .find(|&seat| table.player_at(seat).map(&pred).unwrap_or(false))
}

/// One lap of seats starting after `start` (or at it), keeping those whose
/// player satisfies `pred`.
pub fn seats_matching_from(
    table: &Table,
    start: SeatIndex,
    include_start: bool,
    pred: impl Fn(&Player) -> bool,
) -> Vec<SeatIndex> {
    seats_from(table, start, include_start)
        .filter(|&seat| table.player_at(seat).map(&pred).unwrap_or(false))
        .collect()
}

/// Button for the next hand among the players satisfying `pred`:
/// the next such seat after the current button, or the first one if there is none.
pub fn next_dealer(table: &Table, pred: impl Fn(&Player) -> bool) -> Option<SeatIndex> {
    match table.dealer_button {
        Some(button) => next_seat_matching(table, button, false, pred),
        None => next_seat_matching(table, 0, true, pred),
    }
}

/// Seat indices for one lap, clockwise.
fn seats_from(table: &Table, start: SeatIndex, include_start: bool) -> impl Iterator<Item = SeatIndex> {
    let max = table.seats.len();
    let first = if include_start { 0 } else { 1 };
    let start = start as usize;
    (first..first + max).map(move |offset| ((start + offset) % max.max(1)) as SeatIndex)
}
