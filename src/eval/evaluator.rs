use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::{Card, Rank, Suit};
use crate::domain::hand::HandRank;

use super::hand_rank::HandCategory;
use super::lookup_tables::{detect_straight, rank_to_bit, RankMask};

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("expected 5 to 7 cards, got {0}")]
    InvalidCardCount(usize),

    #[error("card {0} appears twice")]
    DuplicateCard(Card),
}

/// The strongest five-card hand found among the available cards.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BestHand {
    pub rank: HandRank,
    /// The five cards making the hand, in canonical order (rank desc, then suit).
    pub cards: [Card; 5],
}

impl BestHand {
    pub fn category(&self) -> HandCategory {
        self.rank.category()
    }
}

/// Best 5-card hand from hole cards plus board.
///
/// Accepts 5 to 7 cards in total (7 at a normal showdown). The result does not
/// depend on the order of the input cards.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> Result<BestHand, EvalError> {
    let n = hole.len() + board.len();
    if !(5..=7).contains(&n) {
        return Err(EvalError::InvalidCardCount(n));
    }

    let mut buf = [Card::new(Rank::Two, Suit::Clubs); 7];
    for (slot, card) in buf.iter_mut().zip(hole.iter().chain(board.iter())) {
        *slot = *card;
    }
    let cards = &mut buf[..n];
    cards.sort_unstable_by(|a, b| b.rank.cmp(&a.rank).then(b.suit.cmp(&a.suit)));

    if let Some(w) = cards.windows(2).find(|w| w[0] == w[1]) {
        return Err(EvalError::DuplicateCard(w[0]));
    }

    Ok(best_of_all_5card_combinations(cards))
}

/// Enumerates every 5-card subset by index (21 for 7 cards) and keeps the maximum.
/// On equal ranks the first subset in enumeration order is kept.
fn best_of_all_5card_combinations(cards: &[Card]) -> BestHand {
    let n = cards.len();
    let mut best = BestHand {
        rank: HandRank(0),
        cards: [cards[0], cards[1], cards[2], cards[3], cards[4]],
    };
    best.rank = evaluate_5card_hand(&best.cards);

    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let rank = evaluate_5card_hand(&five);
                        if rank > best.rank {
                            best = BestHand { rank, cards: five };
                        }
                    }
                }
            }
        }
    }

    best
}

/// Scores exactly five cards.
pub fn evaluate_5card_hand(cards: &[Card; 5]) -> HandRank {
    let mut suit_counts = [0u8; 4];
    let mut rank_counts = [0u8; 15]; // indexed by rank value 2..=14
    let mut rank_mask: RankMask = 0;

    for card in cards {
        suit_counts[card.suit.index()] += 1;
        rank_counts[card.rank.value() as usize] += 1;
        rank_mask |= rank_to_bit(card.rank);
    }

    let is_flush = suit_counts.iter().any(|&c| c == 5);
    let straight_high = detect_straight(rank_mask);

    if is_flush {
        match straight_high {
            Some(Rank::Ace) => {
                return HandRank::from_category_and_ranks(HandCategory::RoyalFlush, &[14]);
            }
            Some(high) => {
                return HandRank::from_category_and_ranks(
                    HandCategory::StraightFlush,
                    &[high.value()],
                );
            }
            None => {}
        }
    }

    // (count, rank) groups: biggest group first, higher rank first within a size.
    let mut groups = [(0u8, 0u8); 5];
    let mut len = 0;
    for r in (2..=14u8).rev() {
        let c = rank_counts[r as usize];
        if c > 0 {
            groups[len] = (c, r);
            len += 1;
        }
    }
    let groups = &mut groups[..len];
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let mut ordered = [0u8; 5];
    for (slot, g) in ordered.iter_mut().zip(groups.iter()) {
        *slot = g.1;
    }
    let ordered = &ordered[..len];

    let top = groups[0].0;
    let second = groups.get(1).map(|g| g.0).unwrap_or(0);

    let category = match (top, second) {
        (4, _) => HandCategory::FourOfAKind,
        (3, 2) => HandCategory::FullHouse,
        _ if is_flush => HandCategory::Flush,
        _ if straight_high.is_some() => {
            let high = straight_high.map(Rank::value).unwrap_or(0);
            return HandRank::from_category_and_ranks(HandCategory::Straight, &[high]);
        }
        (3, _) => HandCategory::ThreeOfAKind,
        (2, 2) => HandCategory::TwoPair,
        (2, _) => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    HandRank::from_category_and_ranks(category, ordered)
}
