use crate::domain::card::Rank;

/// Bit mask of ranks: bit 0 = Two ... bit 12 = Ace.
pub type RankMask = u16;

/// Straight masks indexed by high card: index 0 is the wheel (A2345, high Five),
/// index 9 is broadway (TJQKA, high Ace).
pub const STRAIGHT_MASKS: [RankMask; 10] = build_straight_masks();

const WHEEL: RankMask = 0b1_0000_0000_1111; // A,2,3,4,5

const fn build_straight_masks() -> [RankMask; 10] {
    let mut masks = [0u16; 10];
    masks[0] = WHEEL;
    let mut i = 1;
    while i < 10 {
        // five consecutive bits whose lowest is Two + (i - 1)
        masks[i] = 0b1_1111 << (i - 1);
        i += 1;
    }
    masks
}

pub fn rank_to_bit(rank: Rank) -> RankMask {
    1u16 << (rank.value() - 2)
}

/// Highest straight contained in the mask, by its top card.
/// The wheel (A2345) reports `Rank::Five`, so it ranks below a six-high straight.
pub fn detect_straight(rank_mask: RankMask) -> Option<Rank> {
    STRAIGHT_MASKS
        .iter()
        .enumerate()
        .rev()
        .find(|&(_, &sm)| rank_mask & sm == sm)
        .and_then(|(i, _)| Rank::from_value(i as u8 + 5))
}
