//! Domain model tests: cards, deck, chips, players, table and config.

use holdem_engine::domain::{
    card::{Card, Rank, Suit},
    chips::Chips,
    deck::{Deck, DeckExhausted},
    player::{Player, PlayerStatus},
    table::{SessionConfig, Table, TableStakes},
};

fn card(s: &str) -> Card {
    s.parse().expect("valid card")
}

//
// ====================== CARDS ======================
//

#[test]
fn card_parse_and_display_agree() {
    let c = card("Ah");
    assert_eq!(c, Card::new(Rank::Ace, Suit::Hearts));
    assert_eq!(c.to_string().parse::<Card>().unwrap(), c);

    let ten = card("Td");
    assert_eq!(ten.rank, Rank::Ten);
    assert_eq!(ten.suit, Suit::Diamonds);
}

#[test]
fn card_parse_rejects_garbage() {
    assert!("".parse::<Card>().is_err());
    assert!("1h".parse::<Card>().is_err());
    assert!("Ax".parse::<Card>().is_err());
    assert!("Ahh".parse::<Card>().is_err());
}

#[test]
fn parse_list_reads_whitespace_separated_cards() {
    let cards = Card::parse_list("As  Kd 7c").unwrap();
    assert_eq!(cards, vec![card("As"), card("Kd"), card("7c")]);
}

#[test]
fn rank_values_cover_two_to_ace() {
    assert_eq!(Rank::Two.value(), 2);
    assert_eq!(Rank::Jack.value(), 11);
    assert_eq!(Rank::Ace.value(), 14);
    assert_eq!(Rank::from_value(13), Some(Rank::King));
    assert_eq!(Rank::from_value(1), None);
    assert_eq!(Rank::from_value(15), None);
}

//
// ====================== DECK ======================
//

#[test]
fn standard_deck_has_52_distinct_cards() {
    let mut deck = Deck::standard_52();
    assert_eq!(deck.len(), 52);

    let mut cards = deck.draw(52).unwrap();
    assert!(deck.is_empty());

    cards.sort_by_key(|c| (c.suit, c.rank));
    cards.dedup();
    assert_eq!(cards.len(), 52);
}

#[test]
fn draw_takes_from_the_front() {
    let order = Card::parse_list("2c 3c 4c 5c").unwrap();
    let mut deck = Deck::from_cards(order.clone());

    assert_eq!(deck.draw(2).unwrap(), order[..2].to_vec());
    deck.burn().unwrap();
    assert_eq!(deck.draw_one().unwrap(), order[3]);
}

/// Failing draw removes nothing.
#[test]
fn draw_past_the_end_fails_without_drawing() {
    let mut deck = Deck::from_cards(Card::parse_list("2c 3c 4c").unwrap());

    let err = deck.draw(4).unwrap_err();
    assert_eq!(
        err,
        DeckExhausted {
            requested: 4,
            remaining: 3
        }
    );
    assert_eq!(deck.len(), 3, "deck must be untouched after a failed draw");
    assert_eq!(deck.draw(3).unwrap().len(), 3);
    assert!(deck.draw_one().is_err());
}

#[test]
fn shuffle_with_only_touches_undrawn_cards() {
    let mut deck = Deck::standard_52();
    let first = deck.draw_one().unwrap();
    deck.shuffle_with(|cards| cards.reverse());

    assert_eq!(deck.len(), 51);
    assert!(!deck.remaining().contains(&first));
    assert_eq!(deck.remaining()[0], Card::new(Rank::Ace, Suit::Spades));
}

//
// ====================== CHIPS ======================
//

#[test]
fn chips_arithmetic_saturates() {
    assert_eq!(Chips(30) + Chips(20), Chips(50));
    assert_eq!(Chips(20) - Chips(30), Chips::ZERO);
    assert_eq!(Chips(20).saturating_sub(Chips(5)), Chips(15));
    assert_eq!(Chips(20).signed_diff(Chips(50)), -30);

    let total: Chips = [Chips(1), Chips(2), Chips(3)].iter().sum();
    assert_eq!(total, Chips(6));
}

//
// ====================== PLAYER ======================
//

#[test]
fn new_player_waits_for_the_next_hand() {
    let p = Player::new(7, "alice", Chips(1_000));
    assert_eq!(p.status, PlayerStatus::SittingOut);
    assert!(p.wants_next_hand());
    assert!(!p.is_in_hand());
    assert!(!p.can_act());
}

#[test]
fn commit_caps_at_stack_and_marks_all_in() {
    let mut p = Player::new(1, "bob", Chips(50));
    p.status = PlayerStatus::Active;

    assert_eq!(p.commit(Chips(20)), Chips(20));
    assert_eq!(p.stack, Chips(30));
    assert_eq!(p.street_bet, Chips(20));
    assert_eq!(p.contribution, Chips(20));
    assert_eq!(p.status, PlayerStatus::Active);

    assert_eq!(p.commit(Chips(100)), Chips(30), "cannot pay more than the stack");
    assert_eq!(p.stack, Chips::ZERO);
    assert_eq!(p.contribution, Chips(50));
    assert_eq!(p.status, PlayerStatus::AllIn);
    assert!(p.is_in_hand());
    assert!(!p.can_act());
}

#[test]
fn disconnected_or_leaving_players_are_not_dealt_in() {
    let mut p = Player::new(1, "carol", Chips(500));
    p.connected = false;
    assert!(!p.wants_next_hand());
    assert_eq!(p.idle_status(), PlayerStatus::Disconnected);

    let mut q = Player::new(2, "dave", Chips(500));
    q.leaving = true;
    assert!(!q.wants_next_hand());

    let broke = Player::new(3, "erin", Chips::ZERO);
    assert!(!broke.wants_next_hand());
}

//
// ====================== TABLE & CONFIG ======================
//

#[test]
fn default_config_is_ten_handed_10_20_with_10k_stacks() {
    let cfg = SessionConfig::default();
    assert_eq!(cfg.max_players, 10);
    assert_eq!(cfg.stakes, TableStakes::new(Chips(10), Chips(20)));
    assert_eq!(cfg.starting_stack, Chips(10_000));
    assert!(cfg.auto_deal);
    assert!(cfg.burn_cards);
    assert!(cfg.validate().is_ok());
}

#[test]
fn config_validation_rejects_bad_values() {
    assert!(SessionConfig::new(1).validate().is_err());
    assert!(SessionConfig::new(11).validate().is_err());
    assert!(SessionConfig::new(6).with_blinds(0, 20).validate().is_err());
    assert!(SessionConfig::new(6).with_blinds(20, 20).validate().is_err());

    let mut cfg = SessionConfig::new(6);
    cfg.starting_stack = Chips::ZERO;
    assert!(cfg.validate().is_err());
}

#[test]
fn config_deserializes_with_defaults() {
    let cfg: SessionConfig = serde_json::from_str(r#"{ "max_players": 6 }"#).unwrap();
    assert_eq!(cfg.max_players, 6);
    assert_eq!(cfg.stakes.big_blind, Chips(20));
    assert_eq!(cfg.time_rules.action_timeout_secs, 30);
}

#[test]
fn table_seating_helpers() {
    let mut table = Table::new(1, SessionConfig::new(3));
    assert_eq!(table.seats.len(), 3);
    assert_eq!(table.first_empty_seat(), Some(0));

    table.seats[1] = Some(Player::new(10, "Alice", Chips(100)));
    table.seats[2] = Some(Player::new(11, "Bob", Chips(100)));

    assert_eq!(table.seated_count(), 2);
    assert_eq!(table.first_empty_seat(), Some(0));
    assert_eq!(table.seat_of(11), Some(2));
    assert_eq!(table.player(10).map(|p| p.name.as_str()), Some("Alice"));
    assert!(table.name_taken("alice"), "names compare case-insensitively");
    assert!(!table.name_taken("carol"));
    assert_eq!(table.ready_count(), 2);
    assert_eq!(table.in_hand_count(), 0);
}
