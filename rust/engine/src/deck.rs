use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// A 52-card deck dealing sequentially from a seeded shuffle.
///
/// The deck owns its ChaCha20 stream, so one seed fixes the permutation of
/// every hand dealt from it; within a hand no card can come out twice.
#[derive(Debug)]
pub struct Deck {
    order: Vec<Card>,
    next: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    /// A deck in canonical order; call [`shuffle`](Deck::shuffle) before
    /// dealing a hand.
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            order: full_deck(),
            next: 0,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Restores all 52 cards and draws a fresh uniform permutation.
    pub fn shuffle(&mut self) {
        self.order = full_deck();
        self.order.shuffle(&mut self.rng);
        self.next = 0;
    }

    /// Deals the top card, or `None` once the deck is exhausted.
    pub fn deal_card(&mut self) -> Option<Card> {
        let card = self.order.get(self.next).copied();
        if card.is_some() {
            self.next += 1;
        }
        card
    }

    /// Restores canonical order without consuming randomness.
    pub fn reset(&mut self) {
        self.order = full_deck();
        self.next = 0;
    }

    pub fn remaining(&self) -> usize {
        self.order.len() - self.next
    }
}
