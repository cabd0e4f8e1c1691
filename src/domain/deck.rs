use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::{Card, Rank, Suit};

/// More cards were requested than the deck still holds.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("deck exhausted: requested {requested}, {remaining} left")]
pub struct DeckExhausted {
    pub requested: usize,
    pub remaining: usize,
}

/// One hand's deck. Shuffling is done by the engine through a `RandomSource`,
/// the deck itself only hands cards out from the front, never twice.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    /// Index of the next card to draw.
    next: usize,
}

impl Deck {
    /// Unshuffled 52 cards:
    /// Clubs 2..A, Diamonds 2..A, Hearts 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards, next: 0 }
    }

    /// A deck with a fixed order; the first card is drawn first.
    /// Intended for stacked decks in tests and replays.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Deck { cards, next: 0 }
    }

    /// Cards still in the deck.
    pub fn len(&self) -> usize {
        self.cards.len() - self.next
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn remaining(&self) -> &[Card] {
        &self.cards[self.next..]
    }

    /// Reorders the undrawn cards in place.
    pub fn shuffle_with(&mut self, shuffle: impl FnOnce(&mut [Card])) {
        shuffle(&mut self.cards[self.next..]);
    }

    /// Removes and returns the first `n` cards. Nothing is drawn on error.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, DeckExhausted> {
        if n > self.len() {
            return Err(DeckExhausted {
                requested: n,
                remaining: self.len(),
            });
        }
        let taken = self.cards[self.next..self.next + n].to_vec();
        self.next += n;
        Ok(taken)
    }

    pub fn draw_one(&mut self) -> Result<Card, DeckExhausted> {
        let card = *self.cards.get(self.next).ok_or(DeckExhausted {
            requested: 1,
            remaining: 0,
        })?;
        self.next += 1;
        Ok(card)
    }

    /// Discards the top card face down.
    pub fn burn(&mut self) -> Result<(), DeckExhausted> {
        self.draw_one().map(|_| ())
    }
}
