use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::hand::HandRank;

/// Hand category, weakest to strongest.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl HandCategory {
    pub const ALL: [HandCategory; 10] = [
        HandCategory::HighCard,
        HandCategory::OnePair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
        HandCategory::RoyalFlush,
    ];
}

impl HandRank {
    /// Packs a category and up to five tie-break rank values (most significant first).
    ///
    /// Layout (u32):
    ///   [category:4][t0:4][t1:4][t2:4][t3:4][t4:4]
    /// Rank values 2..=14 fit in a nibble; unused slots stay 0, so comparing the
    /// packed values compares category first, then the tie-break tuple.
    pub fn from_category_and_ranks(category: HandCategory, ranks: &[u8]) -> Self {
        let mut value = (category as u32) << 20;
        for (i, r) in ranks.iter().take(5).enumerate() {
            value |= ((*r as u32) & 0x0F) << (16 - 4 * i as u32);
        }
        HandRank(value)
    }

    pub fn category(&self) -> HandCategory {
        let cat_id = ((self.0 >> 20) & 0x0F) as usize;
        HandCategory::ALL
            .get(cat_id)
            .copied()
            .unwrap_or(HandCategory::HighCard)
    }

    /// Tie-break values, most significant first; 0 marks an unused slot.
    pub fn tiebreak(&self) -> [u8; 5] {
        let mut out = [0u8; 5];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = ((self.0 >> (16 - 4 * i as u32)) & 0x0F) as u8;
        }
        out
    }
}

pub fn hand_category(rank: HandRank) -> HandCategory {
    rank.category()
}

pub fn describe_hand(rank: HandRank) -> String {
    rank.category().to_string()
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HandCategory::HighCard => "High card",
            HandCategory::OnePair => "One pair",
            HandCategory::TwoPair => "Two pair",
            HandCategory::ThreeOfAKind => "Three of a kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full house",
            HandCategory::FourOfAKind => "Four of a kind",
            HandCategory::StraightFlush => "Straight flush",
            HandCategory::RoyalFlush => "Royal flush",
        };
        f.write_str(s)
    }
}
