//! Hand flow on a bare table: blinds, turn order, raises, run-outs and settlement.

use holdem_engine::domain::{Card, Chips, HandEndReason, HandSummary, Player, SessionConfig, Street, Table};
use holdem_engine::engine::{
    advance_if_needed, apply_action, start_hand, ActionChoice, EngineError, HandEngine, HandStatus, IllegalReason,
    PlayerAction, PlayerActionKind,
};
use holdem_engine::infra::{DeterministicRng, StackedRng};
use proptest::prelude::*;

/// Table at 10/20 with player ids `1..` in seats `0..`, in stack order.
fn table_with(stacks: &[u64]) -> Table {
    let config = SessionConfig::new(stacks.len() as u8).with_blinds(10, 20);
    let mut table = Table::new(1, config);
    for (seat, stack) in stacks.iter().enumerate() {
        let id = seat as u64 + 1;
        table.seats[seat] = Some(Player::new(id, format!("p{id}"), Chips(*stack)));
    }
    table
}

fn act(table: &mut Table, engine: &mut HandEngine, player_id: u64, kind: PlayerActionKind) -> HandStatus {
    apply_action(table, engine, PlayerAction::new(player_id, kind)).expect("legal action")
}

fn finished(status: HandStatus) -> HandSummary {
    match status {
        HandStatus::Finished(summary, _) => summary,
        HandStatus::Ongoing => panic!("hand should be over"),
    }
}

/// Stacks plus what is in the pot; only meaningful while a hand runs.
fn total_chips(table: &Table) -> Chips {
    table.players().map(|(_, p)| p.stack + p.contribution).sum()
}

//
// ====================== START OF HAND ======================
//

#[test]
fn heads_up_button_posts_small_blind_and_acts_first() {
    let mut table = table_with(&[1_000, 1_000]);
    let engine = start_hand(&mut table, &mut DeterministicRng::from_seed(7)).unwrap();

    assert_eq!(table.dealer_button, Some(0));
    assert_eq!(table.hand_number, 1);
    assert_eq!(table.player_at(0).unwrap().street_bet, Chips(10));
    assert_eq!(table.player_at(1).unwrap().street_bet, Chips(20));
    assert_eq!(engine.current_actor, Some(0));
    assert_eq!(engine.pot.total, Chips(30));
    assert_eq!(table.total_pot, Chips(30));
    for (_, p) in table.players() {
        assert_eq!(p.hole_cards.len(), 2);
    }
}

#[test]
fn three_handed_blinds_sit_left_of_the_button() {
    let mut table = table_with(&[1_000, 1_000, 1_000]);
    let engine = start_hand(&mut table, &mut DeterministicRng::from_seed(1)).unwrap();

    assert_eq!(table.dealer_button, Some(0));
    assert_eq!(table.player_at(1).unwrap().street_bet, Chips(10));
    assert_eq!(table.player_at(2).unwrap().street_bet, Chips(20));
    assert_eq!(engine.betting.to_act, vec![0, 1, 2], "big blind acts last preflop");
}

#[test]
fn hole_cards_are_dealt_one_at_a_time_from_left_of_the_button() {
    let top = Card::parse_list("Kc 7h Ac Kd 2s Ad").unwrap();
    let mut table = table_with(&[1_000, 1_000, 1_000]);
    start_hand(&mut table, &mut StackedRng::new(top)).unwrap();

    assert_eq!(table.player_at(1).unwrap().hole_cards, Card::parse_list("Kc Kd").unwrap());
    assert_eq!(table.player_at(2).unwrap().hole_cards, Card::parse_list("7h 2s").unwrap());
    assert_eq!(table.player_at(0).unwrap().hole_cards, Card::parse_list("Ac Ad").unwrap());
}

#[test]
fn cannot_start_with_one_player_or_twice() {
    let mut lonely = table_with(&[1_000, 0]);
    assert!(matches!(
        start_hand(&mut lonely, &mut DeterministicRng::from_seed(1)),
        Err(EngineError::NotEnoughPlayers)
    ));

    let mut table = table_with(&[1_000, 1_000]);
    start_hand(&mut table, &mut DeterministicRng::from_seed(1)).unwrap();
    assert!(matches!(
        start_hand(&mut table, &mut DeterministicRng::from_seed(1)),
        Err(EngineError::HandAlreadyInProgress)
    ));
}

//
// ====================== BETTING ======================
//

#[test]
fn out_of_turn_action_is_rejected() {
    let mut table = table_with(&[1_000, 1_000, 1_000]);
    let mut engine = start_hand(&mut table, &mut DeterministicRng::from_seed(3)).unwrap();
    let before = table.clone();

    let err = apply_action(&mut table, &mut engine, PlayerAction::new(2, PlayerActionKind::Call)).unwrap_err();
    assert!(matches!(err, EngineError::NotYourTurn(2)));
    assert_eq!(table, before);
}

/// Seat 0 raises to 100, seat 1 shoves 130 (an incomplete raise). Seat 2 has not
/// acted and may re-raise; seat 0 may only call or fold.
#[test]
fn incomplete_all_in_does_not_reopen_betting() {
    let mut table = table_with(&[1_000, 130, 1_000]);
    let mut engine = start_hand(&mut table, &mut DeterministicRng::from_seed(5)).unwrap();

    act(&mut table, &mut engine, 1, PlayerActionKind::Raise(Chips(100)));
    act(&mut table, &mut engine, 2, PlayerActionKind::AllIn);
    assert_eq!(engine.betting.current_bet, Chips(130));

    let seat2 = engine.legal_actions(&table, 3);
    assert!(seat2.contains(&ActionChoice::Raise {
        min_to: Chips(210),
        max_to: Chips(1_000)
    }));
    act(&mut table, &mut engine, 3, PlayerActionKind::Call);

    assert_eq!(
        engine.legal_actions(&table, 1),
        vec![ActionChoice::Fold, ActionChoice::Call(Chips(30))]
    );
    let err = apply_action(&mut table, &mut engine, PlayerAction::new(1, PlayerActionKind::Raise(Chips(300))))
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::IllegalAction(IllegalReason::RaiseNotAllowed)
    ));

    act(&mut table, &mut engine, 1, PlayerActionKind::Call);
    assert_eq!(table.street, Street::Flop);
    assert_eq!(engine.current_actor, Some(2), "all-in seat 1 is skipped postflop");
}

#[test]
fn everyone_folds_to_the_big_blind() {
    let mut table = table_with(&[1_000, 1_000, 1_000]);
    let mut engine = start_hand(&mut table, &mut DeterministicRng::from_seed(9)).unwrap();

    act(&mut table, &mut engine, 1, PlayerActionKind::Fold);
    let summary = finished(act(&mut table, &mut engine, 2, PlayerActionKind::Fold));

    assert_eq!(summary.reason, HandEndReason::AllFoldedButOne);
    assert_eq!(summary.winners(), vec![3]);
    assert!(summary.board.is_empty());
    assert!(summary.results.iter().all(|r| r.revealed.is_none()), "no cards shown");
    assert_eq!(table.player_at(2).unwrap().stack, Chips(1_010));
    assert!(!table.hand_in_progress);
}

#[test]
fn uncalled_raise_comes_back() {
    let mut table = table_with(&[1_000, 1_000]);
    let mut engine = start_hand(&mut table, &mut DeterministicRng::from_seed(2)).unwrap();

    act(&mut table, &mut engine, 1, PlayerActionKind::Raise(Chips(100)));
    let summary = finished(act(&mut table, &mut engine, 2, PlayerActionKind::Fold));

    assert_eq!(summary.total_pot, Chips(120));
    assert_eq!(summary.net_for(1), Some(20));
    assert_eq!(summary.net_for(2), Some(-20));
    assert_eq!(table.player_at(0).unwrap().stack, Chips(1_020));
}

//
// ====================== SHOWDOWN ======================
//

/// Short stack with aces takes the main pot, kings take the side pot.
#[test]
fn all_in_run_out_with_side_pot() {
    let top = Card::parse_list("Kc 7h Ac Kd 2s Ad 5h 3c 8d 9h 5s 4s 6d Jc").unwrap();
    let mut table = table_with(&[100, 300, 300]);
    let mut engine = start_hand(&mut table, &mut StackedRng::new(top)).unwrap();

    act(&mut table, &mut engine, 1, PlayerActionKind::AllIn);
    act(&mut table, &mut engine, 2, PlayerActionKind::AllIn);
    let summary = finished(act(&mut table, &mut engine, 3, PlayerActionKind::Call));

    assert_eq!(summary.reason, HandEndReason::ShowdownForced);
    assert_eq!(summary.board, Card::parse_list("3c 8d 9h 4s Jc").unwrap());
    assert_eq!(summary.pots.len(), 2);
    assert_eq!(summary.pots[0].amount, Chips(300));
    assert_eq!(summary.pots[0].awards, vec![(1, Chips(300))]);
    assert_eq!(summary.pots[1].amount, Chips(400));
    assert_eq!(summary.pots[1].awards, vec![(2, Chips(400))]);

    assert_eq!(table.player_at(0).unwrap().stack, Chips(300));
    assert_eq!(table.player_at(1).unwrap().stack, Chips(400));
    assert_eq!(table.player_at(2).unwrap().stack, Chips::ZERO);
    assert_eq!(summary.winners(), vec![1, 2]);
}

#[test]
fn blinds_that_put_everyone_all_in_run_the_board() {
    let mut table = table_with(&[10, 20]);
    let mut engine = start_hand(&mut table, &mut DeterministicRng::from_seed(11)).unwrap();

    let summary = finished(advance_if_needed(&mut table, &mut engine).unwrap());
    assert_eq!(summary.reason, HandEndReason::ShowdownForced);
    assert_eq!(summary.board.len(), 5);
    let stacks: Chips = table.players().map(|(_, p)| p.stack).sum();
    assert_eq!(stacks, Chips(30));
}

//
// ====================== PROPERTIES ======================
//

fn to_kind(choice: ActionChoice) -> PlayerActionKind {
    match choice {
        ActionChoice::Fold => PlayerActionKind::Fold,
        ActionChoice::Check => PlayerActionKind::Check,
        ActionChoice::Call(_) => PlayerActionKind::Call,
        ActionChoice::Raise { min_to, .. } => PlayerActionKind::Raise(min_to),
        ActionChoice::AllIn(_) => PlayerActionKind::AllIn,
    }
}

proptest! {
    /// Whatever legal actions are taken, chips are neither created nor destroyed
    /// and the net results of a hand sum to zero.
    #[test]
    fn chips_are_conserved(
        stacks in proptest::collection::vec(1u64..3_000, 2..7),
        picks in proptest::collection::vec(0usize..8, 64),
        seed in any::<u64>(),
    ) {
        let mut table = table_with(&stacks);
        let total: Chips = stacks.iter().map(|s| Chips(*s)).sum();
        let mut engine = start_hand(&mut table, &mut DeterministicRng::from_seed(seed)).unwrap();

        let mut status = advance_if_needed(&mut table, &mut engine).unwrap();
        let mut step = 0;
        while let HandStatus::Ongoing = status {
            prop_assert_eq!(total_chips(&table), total);
            prop_assert!(step < 1_000, "hand does not terminate");

            let seat = engine.current_actor.expect("someone to act");
            let player_id = table.player_at(seat).unwrap().id;
            let choices = engine.legal_actions(&table, player_id);
            prop_assert!(!choices.is_empty());

            let choice = choices[picks[step % picks.len()] % choices.len()];
            status = apply_action(&mut table, &mut engine, PlayerAction::new(player_id, to_kind(choice))).unwrap();
            step += 1;
        }

        let summary = finished(status);
        let stacks_after: Chips = table.players().map(|(_, p)| p.stack).sum();
        prop_assert_eq!(stacks_after, total);
        prop_assert_eq!(summary.results.iter().map(|r| r.net_chips).sum::<i64>(), 0);
        let awarded: Chips = summary.pots.iter().flat_map(|p| p.awards.iter().map(|a| a.1)).sum();
        prop_assert_eq!(awarded, summary.total_pot);
    }
}
