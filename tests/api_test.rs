//! Command/query surface: JSON shapes, error codes and what leaks to whom.

use holdem_engine::api::{
    error_code, execute, run_query, ActionType, ApiError, Command, CommandResponse, CreateSessionCommand,
    PlayerActionCommand, Query, QueryResponse, SessionCommand,
};
use holdem_engine::domain::{Chips, SessionConfig};
use holdem_engine::engine::{EngineError, IllegalReason, PlayerActionKind, SessionManager};

fn create(manager: &mut SessionManager, player_count: u8) -> u64 {
    let cmd = Command::CreateSession(CreateSessionCommand {
        player_count,
        small_blind: 10,
        big_blind: 20,
        config: None,
    });
    match execute(manager, cmd).unwrap() {
        CommandResponse::SessionCreated { session_id } => session_id,
        other => panic!("unexpected response {other:?}"),
    }
}

fn in_session(session_id: u64, command: SessionCommand) -> Command {
    Command::Session { session_id, command }
}

fn join(manager: &mut SessionManager, session_id: u64, name: &str) -> u64 {
    let cmd = in_session(session_id, SessionCommand::Join { name: name.into() });
    match execute(manager, cmd).unwrap() {
        CommandResponse::Joined { player_id, .. } => player_id,
        other => panic!("unexpected response {other:?}"),
    }
}

//
// ====================== ERROR CODES ======================
//

#[test]
fn every_engine_error_has_a_stable_code() {
    let cases = [
        (EngineError::IllegalAction(IllegalReason::NothingToCall), "illegal_action"),
        (EngineError::NotYourTurn(3), "not_your_turn"),
        (EngineError::HandNotInProgress, "hand_not_in_progress"),
        (EngineError::HandAlreadyInProgress, "hand_in_progress"),
        (EngineError::RoomFull, "room_full"),
        (EngineError::SessionNotFound(9), "session_not_found"),
        (EngineError::PlayerNotFound(9), "player_not_found"),
        (EngineError::NameTaken("bob".into()), "name_taken"),
        (EngineError::InvalidName(String::new()), "invalid_name"),
        (EngineError::NotEnoughPlayers, "not_enough_players"),
        (EngineError::SessionClosed, "session_closed"),
        (EngineError::InvalidConfig("x".into()), "invalid_config"),
        (EngineError::Internal("boom"), "internal"),
    ];
    for (err, code) in cases {
        assert_eq!(error_code(&err), code);
    }
}

#[test]
fn api_error_carries_the_readable_reason() {
    let err: ApiError = EngineError::IllegalAction(IllegalReason::RaiseTooSmall { min_to: Chips(40) }).into();
    assert_eq!(err.code, "illegal_action");
    assert!(err.message.contains("minimum raise is to 40"), "{}", err.message);
    assert_eq!(err.to_string(), format!("illegal_action: {}", err.message));
}

#[test]
fn only_invariant_violations_are_unrecoverable() {
    assert!(EngineError::NotYourTurn(1).is_recoverable());
    assert!(EngineError::RoomFull.is_recoverable());
    assert!(!EngineError::Internal("x").is_recoverable());
    assert!(!EngineError::DeckExhausted {
        requested: 3,
        remaining: 1
    }
    .is_recoverable());
}

//
// ====================== COMMANDS ======================
//

#[test]
fn create_join_and_act_through_commands() {
    let mut m = SessionManager::new();
    let sid = create(&mut m, 3);
    let alice = join(&mut m, sid, "alice");
    let bob = join(&mut m, sid, "bob");

    // Auto-deal started heads-up play; the button acts first.
    let state = m.get_public_state(sid).unwrap();
    assert!(state.hand_in_progress);
    assert_eq!(state.to_act, Some(alice));

    let cmd = in_session(
        sid,
        SessionCommand::Action(PlayerActionCommand {
            player_id: alice,
            action: ActionType::Raise,
            amount: Some(60),
        }),
    );
    let state = match execute(&mut m, cmd).unwrap() {
        CommandResponse::State(state) => state,
        other => panic!("unexpected response {other:?}"),
    };
    assert_eq!(state.current_bet, Chips(60));
    assert_eq!(state.to_act, Some(bob));
}

#[test]
fn command_errors_map_to_codes() {
    let mut m = SessionManager::new();
    let sid = create(&mut m, 2);

    let err = execute(&mut m, in_session(sid + 100, SessionCommand::StartHand)).unwrap_err();
    assert_eq!(err.code, "session_not_found");

    let err = execute(&mut m, in_session(sid, SessionCommand::StartHand)).unwrap_err();
    assert_eq!(err.code, "not_enough_players");

    join(&mut m, sid, "alice");
    let err = execute(&mut m, in_session(sid, SessionCommand::Join { name: "ALICE".into() })).unwrap_err();
    assert_eq!(err.code, "name_taken");

    let bad = Command::CreateSession(CreateSessionCommand {
        player_count: 12,
        small_blind: 10,
        big_blind: 20,
        config: None,
    });
    assert_eq!(execute(&mut m, bad).unwrap_err().code, "invalid_config");
}

#[test]
fn raise_without_amount_is_rejected() {
    let cmd = PlayerActionCommand {
        player_id: 1,
        action: ActionType::Raise,
        amount: None,
    };
    assert!(matches!(
        cmd.to_kind(),
        Err(EngineError::IllegalAction(IllegalReason::MissingAmount))
    ));

    let call = PlayerActionCommand {
        player_id: 1,
        action: ActionType::Call,
        amount: Some(500),
    };
    assert_eq!(call.to_kind().unwrap(), PlayerActionKind::Call, "amount is ignored");
}

#[test]
fn commands_parse_from_json() {
    let create: Command = serde_json::from_str(r#"{ "CreateSession": { "player_count": 6 } }"#).unwrap();
    match create {
        Command::CreateSession(c) => {
            assert_eq!(c.player_count, 6);
            assert_eq!((c.small_blind, c.big_blind), (10, 20));
            assert!(c.config.is_none());
        }
        other => panic!("unexpected command {other:?}"),
    }

    let action: Command = serde_json::from_str(
        r#"{ "Session": { "session_id": 4, "command": { "Action": { "player_id": 2, "action": "all_in" } } } }"#,
    )
    .unwrap();
    match action {
        Command::Session {
            session_id: 4,
            command: SessionCommand::Action(a),
        } => {
            assert_eq!(a.action, ActionType::AllIn);
            assert_eq!(a.to_kind().unwrap(), PlayerActionKind::AllIn);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn create_with_full_config_override() {
    let mut m = SessionManager::new();
    let config = SessionConfig::new(4).with_blinds(50, 100).with_auto_deal(false);
    let cmd = Command::CreateSession(CreateSessionCommand {
        player_count: 9,
        small_blind: 1,
        big_blind: 2,
        config: Some(config),
    });
    let sid = match execute(&mut m, cmd).unwrap() {
        CommandResponse::SessionCreated { session_id } => session_id,
        other => panic!("unexpected response {other:?}"),
    };
    let table = m.session(sid).unwrap().table();
    assert_eq!(table.config.max_players, 4);
    assert_eq!(table.config.stakes.big_blind, Chips(100));
}

#[test]
fn close_command_hands_back_undelivered_events() {
    let mut m = SessionManager::new();
    let sid = create(&mut m, 2);
    let alice = join(&mut m, sid, "alice");
    join(&mut m, sid, "bob");

    let fold = in_session(
        sid,
        SessionCommand::Action(PlayerActionCommand {
            player_id: alice,
            action: ActionType::Fold,
            amount: None,
        }),
    );
    execute(&mut m, fold).unwrap();

    match execute(&mut m, in_session(sid, SessionCommand::Close)).unwrap() {
        CommandResponse::Closed { undelivered } => {
            assert_eq!(undelivered.len(), 1);
            assert_eq!(undelivered[0].deltas.iter().map(|d| d.delta).sum::<i64>(), 0);
        }
        other => panic!("unexpected response {other:?}"),
    }
    assert!(!m.has_session(sid));
}

//
// ====================== QUERIES & PRIVACY ======================
//

#[test]
fn public_state_never_shows_hole_cards() {
    let mut m = SessionManager::new();
    let sid = create(&mut m, 2);
    let alice = join(&mut m, sid, "alice");
    let bob = join(&mut m, sid, "bob");

    let alice_view = m.player_view(sid, alice).unwrap();
    let bob_view = m.player_view(sid, bob).unwrap();
    assert_eq!(alice_view.hole_cards.len(), 2);
    assert_eq!(bob_view.hole_cards.len(), 2);
    assert!(!alice_view.legal_actions.is_empty(), "alice is to act");
    assert!(bob_view.legal_actions.is_empty());

    let json = serde_json::to_string(&m.get_public_state(sid).unwrap()).unwrap();
    for card in alice_view.hole_cards.iter().chain(bob_view.hole_cards.iter()) {
        let encoded = serde_json::to_string(card).unwrap();
        assert!(!json.contains(&encoded), "public state leaks {card}");
    }

    // A player's own view leaks nothing about the opponent either.
    let alice_json = serde_json::to_string(&alice_view).unwrap();
    for card in &bob_view.hole_cards {
        assert!(!alice_json.contains(&serde_json::to_string(card).unwrap()));
    }
}

#[test]
fn queries_list_and_fetch() {
    let mut m = SessionManager::new();
    let a = create(&mut m, 2);
    let b = create(&mut m, 3);
    let alice = join(&mut m, b, "alice");

    match run_query(&m, Query::ListSessions).unwrap() {
        QueryResponse::Sessions(all) => {
            let ids: Vec<u64> = all.iter().map(|s| s.session_id).collect();
            assert_eq!(ids, vec![a, b]);
        }
        other => panic!("unexpected response {other:?}"),
    }

    match run_query(&m, Query::GetPlayerView { session_id: b, player_id: alice }).unwrap() {
        QueryResponse::PlayerView(view) => {
            assert_eq!(view.player_id, alice);
            assert_eq!(view.seat, 0);
            assert!(view.hole_cards.is_empty());
        }
        other => panic!("unexpected response {other:?}"),
    }

    let err = run_query(&m, Query::GetPlayerView { session_id: a, player_id: alice }).unwrap_err();
    assert_eq!(err.code, "player_not_found");
}
