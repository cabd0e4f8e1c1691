use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::{HandEndReason, Street};
use crate::domain::SeatIndex;

/// Where a betting round stands after the last action.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundState {
    AwaitingAction(SeatIndex),
    RoundComplete,
    HandComplete(HandEndReason),
}

/// State of the betting round on one street.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    pub street: Street,
    /// Street total every remaining player has to match.
    pub current_bet: Chips,
    /// Smallest allowed raise increment: the big blind, then the last full raise.
    pub min_raise: Chips,
    /// Seat of the last bet/raise.
    pub last_aggressor: Option<SeatIndex>,
    /// Seats that still owe an action this street, in turn order.
    pub to_act: Vec<SeatIndex>,
    /// Seats that acted since the last full raise, with the street bet they
    /// last acted on.
    pub acted: Vec<(SeatIndex, Chips)>,
    /// Seats facing an incomplete all-in raise after already acting:
    /// they may call or fold but not raise.
    pub call_only: Vec<SeatIndex>,
}

impl BettingState {
    pub fn new(street: Street, current_bet: Chips, min_raise: Chips, to_act: Vec<SeatIndex>) -> Self {
        Self {
            street,
            current_bet,
            min_raise,
            last_aggressor: None,
            to_act,
            acted: Vec::new(),
            call_only: Vec::new(),
        }
    }

    /// Chips a player with `street_bet` in front of them needs to add to call.
    pub fn to_call(&self, street_bet: Chips) -> Chips {
        self.current_bet.saturating_sub(street_bet)
    }

    /// Smallest legal raise-to total.
    pub fn min_raise_to(&self) -> Chips {
        self.current_bet + self.min_raise
    }

    pub fn may_raise(&self, seat: SeatIndex) -> bool {
        !self.call_only.contains(&seat)
    }

    pub fn next_to_act(&self) -> Option<SeatIndex> {
        self.to_act.first().copied()
    }

    /// Take the seat off the queue after a check, call or fold.
    pub fn mark_acted(&mut self, seat: SeatIndex) {
        self.to_act.retain(|s| *s != seat);
        let bet = self.current_bet;
        self.record_acted(seat, bet);
    }

    /// Street bet `seat` last acted on, if it acted since the last full raise.
    pub fn acted_on(&self, seat: SeatIndex) -> Option<Chips> {
        self.acted.iter().find(|(s, _)| *s == seat).map(|(_, bet)| *bet)
    }

    fn record_acted(&mut self, seat: SeatIndex, bet: Chips) {
        match self.acted.iter_mut().find(|(s, _)| *s == seat) {
            Some(entry) => entry.1 = bet,
            None => self.acted.push((seat, bet)),
        }
    }

    /// Drop a seat from the round entirely (folded out of turn).
    pub fn remove(&mut self, seat: SeatIndex) {
        self.to_act.retain(|s| *s != seat);
        self.call_only.retain(|s| *s != seat);
    }

    /// A bet or raise of at least `min_raise`: betting reopens for everyone.
    pub fn on_full_raise(
        &mut self,
        seat: SeatIndex,
        new_bet: Chips,
        raise_size: Chips,
        new_to_act: Vec<SeatIndex>,
    ) {
        self.current_bet = new_bet;
        self.min_raise = raise_size;
        self.last_aggressor = Some(seat);
        self.to_act = new_to_act;
        self.acted = vec![(seat, new_bet)];
        self.call_only.clear();
    }

    /// An all-in that raises by less than `min_raise`. Everyone behind has to
    /// respond. A seat that already acted may only call or fold unless the bet
    /// has grown by a full `min_raise` since it last acted, which happens when
    /// short all-ins stack up. `min_raise` is unchanged.
    pub fn on_incomplete_raise(&mut self, seat: SeatIndex, new_bet: Chips, new_to_act: Vec<SeatIndex>) {
        self.current_bet = new_bet;
        for s in &new_to_act {
            let Some(acted_on) = self.acted_on(*s) else {
                continue;
            };
            let reopened = new_bet.saturating_sub(acted_on) >= self.min_raise;
            if reopened {
                self.call_only.retain(|c| c != s);
            } else if !self.call_only.contains(s) {
                self.call_only.push(*s);
            }
        }
        self.to_act = new_to_act;
        self.record_acted(seat, new_bet);
    }

    /// Every remaining seat has acted since the last raise and matched the bet.
    pub fn is_round_complete(&self) -> bool {
        self.to_act.is_empty()
    }
}
