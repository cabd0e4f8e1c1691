use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::domain::Card;
use crate::engine::RandomSource;

/// Shuffles with the thread-local OS-seeded generator.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle(&mut self, cards: &mut [Card]) {
        cards.shuffle(&mut rand::thread_rng());
    }
}

/// Seeded generator for tests and replays: the same seed deals the same hands.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed_bytes(seed: [u8; 32]) -> Self {
        Self {
            inner: StdRng::from_seed(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle(&mut self, cards: &mut [Card]) {
        cards.shuffle(&mut self.inner);
    }
}

/// Puts chosen cards on top of the deck, in order; the rest keep their
/// relative order underneath. Each shuffle takes the next stack in the queue
/// and leaves the deck as is once the queue is empty.
#[derive(Clone, Debug, Default)]
pub struct StackedRng {
    stacks: Vec<Vec<Card>>,
}

impl StackedRng {
    pub fn new(top: Vec<Card>) -> Self {
        Self { stacks: vec![top] }
    }

    /// One stack per hand, used in order.
    pub fn with_hands(stacks: Vec<Vec<Card>>) -> Self {
        let mut stacks = stacks;
        stacks.reverse();
        Self { stacks }
    }
}

impl RandomSource for StackedRng {
    fn shuffle(&mut self, cards: &mut [Card]) {
        let Some(top) = self.stacks.pop() else {
            return;
        };
        let rest: Vec<Card> = cards.iter().copied().filter(|c| !top.contains(c)).collect();
        for (slot, card) in cards.iter_mut().zip(top.iter().chain(rest.iter())) {
            *slot = *card;
        }
    }
}
