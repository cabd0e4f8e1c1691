use crate::domain::chips::Chips;
use crate::domain::player::Player;
use crate::domain::SeatIndex;
use crate::engine::actions::{ActionChoice, PlayerActionKind};
use crate::engine::betting::BettingState;
use crate::engine::errors::{EngineError, IllegalReason};

/// Checks whether the player in `seat` may take `action` under the current betting state.
/// Pure: nothing is mutated, whatever the outcome.
pub fn validate_action(
    player: &Player,
    seat: SeatIndex,
    action: &PlayerActionKind,
    betting: &BettingState,
) -> Result<(), EngineError> {
    if !player.can_act() {
        return Err(IllegalReason::NotActive.into());
    }

    let stack = player.stack;
    let to_call = betting.to_call(player.street_bet);

    match action {
        PlayerActionKind::Fold => Ok(()),

        PlayerActionKind::Check => {
            if to_call.is_zero() {
                Ok(())
            } else {
                Err(IllegalReason::CannotCheck { to_call }.into())
            }
        }

        // A call the stack cannot cover turns into an all-in for less.
        PlayerActionKind::Call => {
            if to_call.is_zero() {
                Err(IllegalReason::NothingToCall.into())
            } else {
                Ok(())
            }
        }

        PlayerActionKind::Raise(total) => {
            if !betting.may_raise(seat) {
                return Err(IllegalReason::RaiseNotAllowed.into());
            }
            if stack <= to_call {
                return Err(IllegalReason::NoChipsToRaise.into());
            }
            let max_to = player.street_bet + stack;
            if *total > max_to {
                return Err(IllegalReason::RaiseExceedsStack {
                    requested: *total,
                    max_to,
                }
                .into());
            }
            let min_to = betting.min_raise_to();
            if *total < min_to {
                return Err(IllegalReason::RaiseTooSmall { min_to }.into());
            }
            Ok(())
        }

        PlayerActionKind::AllIn => {
            if stack.is_zero() {
                return Err(IllegalReason::EmptyStack.into());
            }
            if stack > to_call && !betting.may_raise(seat) {
                return Err(IllegalReason::RaiseNotAllowed.into());
            }
            Ok(())
        }
    }
}

/// Every option the player in `seat` has right now. Empty when they cannot act.
pub fn legal_actions(player: &Player, seat: SeatIndex, betting: &BettingState) -> Vec<ActionChoice> {
    if !player.can_act() {
        return Vec::new();
    }

    let stack = player.stack;
    let to_call = betting.to_call(player.street_bet);
    let may_raise = betting.may_raise(seat);
    let all_in_to = player.street_bet + stack;

    let mut choices = vec![ActionChoice::Fold];

    if to_call.is_zero() {
        choices.push(ActionChoice::Check);
    } else {
        choices.push(ActionChoice::Call(Chips(to_call.0.min(stack.0))));
    }

    if may_raise && stack > to_call {
        let min_to = betting.min_raise_to();
        if all_in_to >= min_to {
            choices.push(ActionChoice::Raise {
                min_to,
                max_to: all_in_to,
            });
        }
    }

    if may_raise || stack <= to_call {
        choices.push(ActionChoice::AllIn(all_in_to));
    }

    choices
}
