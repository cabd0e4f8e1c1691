//! Infrastructure: shufflers, per-hand seeds, ids and engine config loading.

use holdem_engine::domain::{Card, Chips, Deck};
use holdem_engine::engine::{EngineError, RandomSource};
use holdem_engine::infra::{DeterministicRng, EngineConfig, IdGenerator, RngSeed, StackedRng};
use proptest::prelude::*;

fn shuffled(rng: &mut dyn RandomSource) -> Vec<Card> {
    let mut deck = Deck::standard_52();
    deck.shuffle_with(|cards| rng.shuffle(cards));
    deck.remaining().to_vec()
}

//
// ====================== RNG ======================
//

#[test]
fn same_seed_same_order() {
    let a = shuffled(&mut DeterministicRng::from_seed(99));
    let b = shuffled(&mut DeterministicRng::from_seed(99));
    let c = shuffled(&mut DeterministicRng::from_seed(100));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn stacked_rng_puts_chosen_cards_on_top() {
    let top = Card::parse_list("As Kd 7c").unwrap();
    let order = shuffled(&mut StackedRng::new(top.clone()));

    assert_eq!(&order[..3], top.as_slice());
    assert_eq!(order.len(), 52);
    // The rest keep the standard order: clubs first.
    assert_eq!(order[3], "2c".parse::<Card>().unwrap());
}

#[test]
fn stacked_rng_serves_one_stack_per_hand_then_stops() {
    let first = Card::parse_list("2h 3h").unwrap();
    let second = Card::parse_list("Ts Js").unwrap();
    let mut rng = StackedRng::with_hands(vec![first.clone(), second.clone()]);

    assert_eq!(&shuffled(&mut rng)[..2], first.as_slice());
    assert_eq!(&shuffled(&mut rng)[..2], second.as_slice());
    assert_eq!(shuffled(&mut rng), Deck::standard_52().remaining().to_vec());
}

//
// ====================== SEEDS ======================
//

#[test]
fn derived_seeds_differ_per_session_and_hand() {
    let base = RngSeed::from_u64(7);
    let h1 = base.derive(1, 1);

    assert_eq!(h1, base.derive(1, 1));
    assert_ne!(h1, base.derive(1, 2));
    assert_ne!(h1, base.derive(2, 1));
    assert_ne!(h1, RngSeed::from_u64(8).derive(1, 1));
    assert_ne!(h1.bytes, base.bytes);
}

#[test]
fn derived_seed_drives_a_reproducible_shuffle() {
    let seed = RngSeed::from_bytes([3u8; 32]).derive(5, 12);
    assert_eq!(shuffled(&mut seed.to_rng()), shuffled(&mut seed.to_rng()));
}

//
// ====================== IDS & CONFIG ======================
//

#[test]
fn ids_start_at_one_and_grow() {
    let ids = IdGenerator::new();
    assert_eq!(ids.next_session_id(), 1);
    assert_eq!(ids.next_session_id(), 2);
    assert_eq!(ids.next_player_id(), 1, "counters are independent");
}

#[test]
fn engine_config_reads_partial_json() {
    let config = EngineConfig::from_json_str(
        r#"{ "tick_interval_ms": 250, "session": { "max_players": 6, "stakes": { "small_blind": 25, "big_blind": 50 } } }"#,
    )
    .unwrap();
    assert_eq!(config.tick_interval_ms, 250);
    assert_eq!(config.room_inbox_capacity, 64);
    assert_eq!(config.session.max_players, 6);
    assert_eq!(config.session.stakes.big_blind, Chips(50));
    assert_eq!(config.session.starting_stack, Chips(10_000));
}

#[test]
fn engine_config_rejects_garbage_and_bad_values() {
    assert!(matches!(
        EngineConfig::from_json_str("not json"),
        Err(EngineError::InvalidConfig(_))
    ));
    assert!(matches!(
        EngineConfig::from_json_str(r#"{ "room_inbox_capacity": 0 }"#),
        Err(EngineError::InvalidConfig(_))
    ));
    assert!(matches!(
        EngineConfig::from_json_str(r#"{ "session": { "max_players": 1 } }"#),
        Err(EngineError::InvalidConfig(_))
    ));
    assert!(matches!(
        EngineConfig::from_json_file("/definitely/not/here.json"),
        Err(EngineError::InvalidConfig(_))
    ));
}

//
// ====================== PROPERTIES ======================
//

proptest! {
    /// Any seed yields a permutation of the 52 cards.
    #[test]
    fn shuffle_is_a_permutation(seed in any::<u64>()) {
        let mut cards = shuffled(&mut DeterministicRng::from_seed(seed));
        cards.sort_by_key(|c| (c.suit, c.rank));
        prop_assert_eq!(cards, Deck::standard_52().remaining().to_vec());
    }
}
