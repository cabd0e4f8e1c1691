use std::collections::HashMap;

use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::{
    HandEndReason, HandRank, HandSummary, PlayerHandResult, PotResult, RevealedHand, Street,
};
use crate::domain::player::{Player, PlayerStatus};
use crate::domain::table::Table;
use crate::domain::{HandId, PlayerId, SeatIndex, SessionId};
use crate::engine::actions::{ActionChoice, PlayerAction, PlayerActionKind};
use crate::engine::betting::{BettingState, RoundState};
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::positions::{next_dealer, seats_matching_from};
use crate::engine::pot::Pot;
use crate::engine::side_pots::{award_pots, compute_side_pots};
use crate::engine::validation::{legal_actions, validate_action};
use crate::engine::RandomSource;
use crate::eval::evaluate_best_hand;

/// Hand status for the caller.
#[derive(Clone, Debug)]
pub enum HandStatus {
    Ongoing,
    Finished(HandSummary, HandHistory),
}

/// State of one hand that the table itself does not hold.
#[derive(Clone, Debug)]
pub struct HandEngine {
    pub session_id: SessionId,
    pub hand_id: HandId,
    pub deck: Deck,
    pub betting: BettingState,
    pub pot: Pot,
    /// Seat to act, if any.
    pub current_actor: Option<SeatIndex>,
    pub history: HandHistory,
    /// A street was dealt while fewer than two players could bet.
    pub ran_out: bool,
    burn_cards: bool,
}

impl HandEngine {
    fn new(session_id: SessionId, hand_id: HandId, deck: Deck, betting: BettingState, burn_cards: bool) -> Self {
        Self {
            session_id,
            hand_id,
            deck,
            betting,
            pot: Pot::new(),
            current_actor: None,
            history: HandHistory::new(),
            ran_out: false,
            burn_cards,
        }
    }

    pub fn legal_actions(&self, table: &Table, player_id: PlayerId) -> Vec<ActionChoice> {
        match (table.seat_of(player_id), self.current_actor) {
            (Some(seat), Some(actor)) if seat == actor => table
                .player_at(seat)
                .map(|p| legal_actions(p, seat, &self.betting))
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }
}

/// Starts a new hand:
/// - moves the button;
/// - shuffles a fresh deck and deals two cards to everyone dealt in;
/// - posts the blinds and sets up preflop betting.
///
/// Follow with `advance_if_needed`: when the blinds leave nobody able to bet,
/// the hand runs straight to showdown.
pub fn start_hand(table: &mut Table, rng: &mut dyn RandomSource) -> Result<HandEngine, EngineError> {
    if table.hand_in_progress {
        return Err(EngineError::HandAlreadyInProgress);
    }
    if table.ready_count() < 2 {
        return Err(EngineError::NotEnoughPlayers);
    }

    let mut deck = Deck::standard_52();
    deck.shuffle_with(|cards| rng.shuffle(cards));

    for player in table.seats.iter_mut().flatten() {
        player.reset_for_hand();
        player.status = if player.wants_next_hand() {
            PlayerStatus::Active
        } else {
            player.idle_status()
        };
    }

    let dealer = next_dealer(table, Player::is_in_hand).ok_or(EngineError::NotEnoughPlayers)?;

    table.board.clear();
    table.total_pot = Chips::ZERO;
    table.hand_number += 1;
    table.street = Street::Preflop;
    table.hand_in_progress = true;
    table.dealer_button = Some(dealer);

    let stakes = table.config.stakes.clone();
    let mut engine = HandEngine::new(
        table.id,
        table.hand_number,
        deck,
        BettingState::new(Street::Preflop, Chips::ZERO, stakes.big_blind, Vec::new()),
        table.config.burn_cards,
    );

    engine.history.push(HandEventKind::HandStarted {
        session_id: table.id,
        hand_id: table.hand_number,
        dealer,
    });

    // Clockwise from the seat left of the button; the button is dealt last.
    let order = seats_matching_from(table, dealer, false, Player::is_in_hand);
    deal_hole_cards(table, &mut engine, &order)?;
    post_blinds(table, &mut engine, dealer, &order)?;

    log::info!(
        "session {} hand #{}: {} players, button at seat {}",
        table.id,
        table.hand_number,
        order.len(),
        dealer
    );

    Ok(engine)
}

fn deal_hole_cards(table: &mut Table, engine: &mut HandEngine, order: &[SeatIndex]) -> Result<(), EngineError> {
    let cards = engine.deck.draw(order.len() * 2)?;
    for (i, card) in cards.into_iter().enumerate() {
        let seat = order[i % order.len()];
        if let Some(p) = table.player_at_mut(seat) {
            p.hole_cards.push(card);
        }
    }
    for &seat in order {
        if let Some(p) = table.player_at(seat) {
            engine.history.push(HandEventKind::HoleCardsDealt {
                seat,
                cards: p.hole_cards.clone(),
            });
        }
    }
    Ok(())
}

/// Heads-up the button posts the small blind and acts first preflop;
/// otherwise the two seats left of the button post.
fn post_blinds(
    table: &mut Table,
    engine: &mut HandEngine,
    dealer: SeatIndex,
    order: &[SeatIndex],
) -> Result<(), EngineError> {
    let stakes = table.config.stakes.clone();
    let (sb_seat, bb_seat) = if order.len() == 2 {
        (dealer, order[0])
    } else {
        (order[0], order[1])
    };

    let sb_paid = table
        .player_at_mut(sb_seat)
        .map(|p| p.commit(stakes.small_blind))
        .ok_or(EngineError::Internal("small blind seat is empty"))?;
    let bb_paid = table
        .player_at_mut(bb_seat)
        .map(|p| p.commit(stakes.big_blind))
        .ok_or(EngineError::Internal("big blind seat is empty"))?;

    engine.pot.add(sb_paid + bb_paid);
    table.total_pot = engine.pot.total;

    engine.history.push(HandEventKind::BlindsPosted {
        small_blind: (sb_seat, sb_paid),
        big_blind: (bb_seat, bb_paid),
    });

    // Short blinds: the amount to call is the largest blind actually posted.
    engine.betting.current_bet = sb_paid.max(bb_paid);
    engine.betting.min_raise = stakes.big_blind;
    engine.betting.last_aggressor = Some(bb_seat);
    // First to act sits left of the big blind; the big blind closes the round.
    engine.betting.to_act = seats_matching_from(table, bb_seat, false, Player::can_act);
    engine.current_actor = engine.betting.next_to_act();
    Ok(())
}

/// Applies a player's action; returns whether the hand goes on or is over.
/// Nothing is mutated when the action is rejected.
pub fn apply_action(table: &mut Table, engine: &mut HandEngine, action: PlayerAction) -> Result<HandStatus, EngineError> {
    if !table.hand_in_progress {
        return Err(EngineError::HandNotInProgress);
    }

    let seat = table
        .seat_of(action.player_id)
        .ok_or(EngineError::PlayerNotFound(action.player_id))?;

    if engine.current_actor != Some(seat) {
        return Err(EngineError::NotYourTurn(action.player_id));
    }

    let player = table
        .player_at(seat)
        .ok_or(EngineError::Internal("acting seat is empty"))?;
    validate_action(player, seat, &action.kind, &engine.betting)?;

    apply_validated(table, engine, seat, action.kind, false)?;
    advance_if_needed(table, engine)
}

/// Folds a player who is not necessarily the one to act (leaving the room).
/// All-in players keep their claim on the pot and are left as they are.
pub fn fold_out_of_turn(table: &mut Table, engine: &mut HandEngine, player_id: PlayerId) -> Result<HandStatus, EngineError> {
    if !table.hand_in_progress {
        return Err(EngineError::HandNotInProgress);
    }
    let seat = table
        .seat_of(player_id)
        .ok_or(EngineError::PlayerNotFound(player_id))?;

    let active = table
        .player_at(seat)
        .map(|p| p.status == PlayerStatus::Active)
        .unwrap_or(false);
    if !active {
        return Ok(HandStatus::Ongoing);
    }

    apply_validated(table, engine, seat, PlayerActionKind::Fold, true)?;
    engine.betting.remove(seat);
    advance_if_needed(table, engine)
}

/// Applies an already validated action by `seat`. `forced` marks engine-made moves
/// (timeouts, leaves) in the history.
pub(crate) fn apply_validated(
    table: &mut Table,
    engine: &mut HandEngine,
    seat: SeatIndex,
    kind: PlayerActionKind,
    forced: bool,
) -> Result<(), EngineError> {
    let bet_before = engine.betting.current_bet;
    let to_call_of = |p: &Player| bet_before.saturating_sub(p.street_bet);

    let (player_id, paid, street_bet, new_stack) = {
        let player = table
            .player_at_mut(seat)
            .ok_or(EngineError::Internal("acting seat is empty"))?;

        let paid = match kind {
            PlayerActionKind::Fold => {
                player.status = PlayerStatus::Folded;
                Chips::ZERO
            }
            PlayerActionKind::Check => Chips::ZERO,
            PlayerActionKind::Call => {
                let to_call = to_call_of(player);
                player.commit(to_call)
            }
            PlayerActionKind::Raise(total) => {
                let diff = total.saturating_sub(player.street_bet);
                player.commit(diff)
            }
            PlayerActionKind::AllIn => {
                let stack = player.stack;
                player.commit(stack)
            }
        };
        (player.id, paid, player.street_bet, player.stack)
    };

    engine.pot.add(paid);
    table.total_pot = engine.pot.total;

    if street_bet > bet_before {
        let raise_size = street_bet - bet_before;
        let behind: Vec<SeatIndex> = seats_matching_from(table, seat, false, Player::can_act)
            .into_iter()
            .filter(|s| *s != seat)
            .collect();
        if raise_size >= engine.betting.min_raise {
            engine.betting.on_full_raise(seat, street_bet, raise_size, behind);
        } else {
            engine.betting.on_incomplete_raise(seat, street_bet, behind);
        }
    } else {
        engine.betting.mark_acted(seat);
    }

    engine.history.push(HandEventKind::PlayerActed {
        player_id,
        seat,
        action: kind,
        forced,
        new_stack,
        pot_after: engine.pot.total,
    });

    log::debug!(
        "session {} hand #{}: player {} {}{} (pot {})",
        engine.session_id,
        engine.hand_id,
        player_id,
        kind,
        if forced { " [forced]" } else { "" },
        engine.pot.total
    );

    Ok(())
}

/// Where the betting stands. Pure.
pub fn round_state(table: &Table, engine: &HandEngine) -> RoundState {
    if table.in_hand_count() <= 1 {
        return RoundState::HandComplete(HandEndReason::AllFoldedButOne);
    }

    let next = engine
        .betting
        .to_act
        .iter()
        .copied()
        .find(|s| table.player_at(*s).map(Player::can_act).unwrap_or(false));

    match next {
        None => RoundState::RoundComplete,
        Some(seat) => {
            // A lone bettor who owes nothing has nobody to bet against.
            let owes = table
                .player_at(seat)
                .map(|p| !engine.betting.to_call(p.street_bet).is_zero())
                .unwrap_or(false);
            if table.can_act_count() <= 1 && !owes {
                RoundState::RoundComplete
            } else {
                RoundState::AwaitingAction(seat)
            }
        }
    }
}

/// Moves the hand forward after an action: next actor, next street, run-out or
/// settlement.
pub fn advance_if_needed(table: &mut Table, engine: &mut HandEngine) -> Result<HandStatus, EngineError> {
    if !table.hand_in_progress {
        return Err(EngineError::HandNotInProgress);
    }

    loop {
        engine
            .betting
            .to_act
            .retain(|s| table.player_at(*s).map(Player::can_act).unwrap_or(false));

        match round_state(table, engine) {
            RoundState::AwaitingAction(seat) => {
                engine.current_actor = Some(seat);
                return Ok(HandStatus::Ongoing);
            }
            RoundState::HandComplete(reason) => {
                return finish_hand(table, engine, reason);
            }
            RoundState::RoundComplete => {
                engine.current_actor = None;
                for p in table.seats.iter_mut().flatten() {
                    p.street_bet = Chips::ZERO;
                }
                match table.street.next() {
                    Some((street, count)) => deal_street(table, engine, street, count)?,
                    None => {
                        let reason = if engine.ran_out {
                            HandEndReason::ShowdownForced
                        } else {
                            HandEndReason::Showdown
                        };
                        return finish_hand(table, engine, reason);
                    }
                }
            }
        }
    }
}

fn deal_street(table: &mut Table, engine: &mut HandEngine, street: Street, count: usize) -> Result<(), EngineError> {
    if engine.burn_cards {
        engine.deck.burn()?;
        engine.history.push(HandEventKind::CardBurned);
    }
    let cards = engine.deck.draw(count)?;
    table.board.extend_from_slice(&cards);
    table.street = street;

    engine.history.push(HandEventKind::BoardDealt {
        street,
        cards: table.board.clone(),
    });
    engine.history.push(HandEventKind::StreetChanged { street });

    let button = table
        .dealer_button
        .ok_or(EngineError::Internal("no button during a hand"))?;
    // Postflop the first player left of the button acts first.
    let to_act = seats_matching_from(table, button, false, Player::can_act);
    if to_act.len() < 2 {
        engine.ran_out = true;
    }
    engine.betting = BettingState::new(street, Chips::ZERO, table.config.stakes.big_blind, to_act);

    log::debug!(
        "session {} hand #{}: {:?} {}",
        engine.session_id,
        engine.hand_id,
        street,
        table
            .board
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    );
    Ok(())
}

/// Settles the hand: evaluates the showdown, awards every pot and reports the result.
/// Awards are computed in full and checked against the pot before any stack changes.
fn finish_hand(table: &mut Table, engine: &mut HandEngine, reason: HandEndReason) -> Result<HandStatus, EngineError> {
    let button = table
        .dealer_button
        .ok_or(EngineError::Internal("no button during a hand"))?;
    let odd_chip_order = seats_matching_from(table, button, false, |_| true);

    let contributions = Pot::contributions(table);
    let pots = compute_side_pots(&contributions);

    let mut reveals: HashMap<SeatIndex, RevealedHand> = HashMap::new();
    if reason != HandEndReason::AllFoldedButOne {
        for (seat, p) in table.players().filter(|(_, p)| p.is_in_hand()) {
            let best = evaluate_best_hand(&p.hole_cards, &table.board)?;
            reveals.insert(
                seat,
                RevealedHand {
                    hole_cards: p.hole_cards.clone(),
                    best_five: best.cards.to_vec(),
                    rank: best.rank,
                },
            );
        }
    }
    let ranks: HashMap<SeatIndex, HandRank> = reveals.iter().map(|(seat, r)| (*seat, r.rank)).collect();
    let awards = award_pots(&pots, &ranks, &odd_chip_order);

    let distributed: Chips = awards.iter().flatten().map(|(_, amount)| *amount).sum();
    if distributed != engine.pot.total {
        log::error!(
            "session {} hand #{}: distributing {} from a pot of {}",
            engine.session_id,
            engine.hand_id,
            distributed,
            engine.pot.total
        );
        return Err(EngineError::Internal("pot settlement does not conserve chips"));
    }

    let mut seats_in_order: Vec<SeatIndex> = reveals.keys().copied().collect();
    seats_in_order.sort_by_key(|s| odd_chip_order.iter().position(|o| o == s));
    for seat in seats_in_order {
        if let (Some(p), Some(r)) = (table.player_at(seat), reveals.get(&seat)) {
            engine.history.push(HandEventKind::ShowdownReveal {
                seat,
                player_id: p.id,
                hole_cards: r.hole_cards.clone(),
                rank_value: r.rank.0,
            });
        }
    }

    let id_of = |table: &Table, seat: SeatIndex| table.player_at(seat).map(|p| p.id).unwrap_or_default();
    let mut won: HashMap<SeatIndex, Chips> = HashMap::new();
    let mut contested: Vec<SeatIndex> = Vec::new();
    let mut pot_results = Vec::with_capacity(pots.len());

    for (pot_index, (pot, pot_awards)) in pots.iter().zip(awards.iter()).enumerate() {
        for &(seat, amount) in pot_awards {
            if let Some(p) = table.player_at_mut(seat) {
                p.stack += amount;
                engine.history.push(HandEventKind::PotAwarded {
                    pot_index,
                    seat,
                    player_id: p.id,
                    amount,
                });
            }
            *won.entry(seat).or_insert(Chips::ZERO) += amount;
            if pot.eligible_seats.len() > 1 {
                contested.push(seat);
            }
        }
        pot_results.push(PotResult {
            amount: pot.amount,
            eligible: pot.eligible_seats.iter().map(|s| id_of(table, *s)).collect(),
            awards: pot_awards
                .iter()
                .map(|(seat, amount)| (id_of(table, *seat), *amount))
                .collect(),
        });
    }

    let results: Vec<PlayerHandResult> = table
        .players()
        .filter(|(_, p)| !p.hole_cards.is_empty() || !p.contribution.is_zero())
        .map(|(seat, p)| {
            let won = won.get(&seat).copied().unwrap_or(Chips::ZERO);
            let net_chips = won.signed_diff(p.contribution);
            PlayerHandResult {
                player_id: p.id,
                seat,
                contributed: p.contribution,
                won,
                net_chips,
                revealed: reveals.get(&seat).cloned(),
                is_winner: !won.is_zero() && (net_chips > 0 || contested.contains(&seat)),
            }
        })
        .collect();

    let street_reached = table.street;
    table.street = Street::Showdown;
    table.hand_in_progress = false;
    table.total_pot = Chips::ZERO;
    for p in table.seats.iter_mut().flatten() {
        p.street_bet = Chips::ZERO;
    }
    engine.current_actor = None;

    engine.history.push(HandEventKind::HandFinished {
        hand_id: engine.hand_id,
        reason,
    });

    let summary = HandSummary {
        session_id: engine.session_id,
        hand_id: engine.hand_id,
        reason,
        street_reached,
        board: table.board.clone(),
        total_pot: engine.pot.total,
        pots: pot_results,
        results,
    };

    log::info!(
        "session {} hand #{} finished ({:?}), pot {}, winners {:?}",
        summary.session_id,
        summary.hand_id,
        reason,
        summary.total_pot,
        summary.winners()
    );

    Ok(HandStatus::Finished(summary, engine.history.clone()))
}

/// Ends a running hand without a result: every contribution goes back to its owner.
pub fn abandon_hand(table: &mut Table, engine: &mut HandEngine) {
    for p in table.seats.iter_mut().flatten() {
        p.stack += p.contribution;
        p.contribution = Chips::ZERO;
        p.street_bet = Chips::ZERO;
        p.hole_cards.clear();
        if p.is_in_hand() || p.status == PlayerStatus::Folded {
            p.status = p.idle_status();
        }
    }
    table.hand_in_progress = false;
    table.total_pot = Chips::ZERO;
    engine.current_actor = None;
    engine.history.push(HandEventKind::HandAbandoned {
        hand_id: engine.hand_id,
    });
    log::warn!(
        "session {} hand #{} abandoned, contributions returned",
        engine.session_id,
        engine.hand_id
    );
}
