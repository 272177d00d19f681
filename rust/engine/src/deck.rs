use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};

/// The shared 54-card deck cards are dealt from during a round.
///
/// Cards are drawn from the top (the end of the vector) and never returned;
/// a fresh deck is rebuilt at the start of every round.
///
/// # Examples
///
/// ```
/// use bluff_engine::deck::Deck;
///
/// let mut deck = Deck::new_with_seed(7);
/// deck.shuffle();
/// let first = deck.pop_card();
/// assert!(first.is_some());
/// assert_eq!(deck.remaining(), 53);
/// ```
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            rng,
        }
    }

    /// Rebuilds the full deck and shuffles it.
    pub fn shuffle(&mut self) {
        self.reset();
        self.cards.shuffle(&mut self.rng);
    }

    /// Draws the top card, `None` once all 54 are gone.
    pub fn pop_card(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Rebuilds the full deck in its unshuffled order.
    pub fn reset(&mut self) {
        self.cards = full_deck();
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::DECK_SIZE;

    #[test]
    fn pop_exhausts_after_54() {
        let mut deck = Deck::new_with_seed(1);
        deck.shuffle();
        for _ in 0..DECK_SIZE {
            assert!(deck.pop_card().is_some());
        }
        assert_eq!(deck.pop_card(), None);
        assert_eq!(deck.remaining(), 0);
    }

    #[test]
    fn shuffle_restores_a_full_deck() {
        let mut deck = Deck::new_with_seed(3);
        deck.pop_card();
        deck.pop_card();
        deck.shuffle();
        assert_eq!(deck.remaining(), DECK_SIZE);
    }

    #[test]
    fn reset_restores_unshuffled_order() {
        let mut deck = Deck::new_with_seed(5);
        deck.shuffle();
        deck.pop_card();
        deck.reset();
        assert_eq!(deck.cards, full_deck());
        assert_eq!(deck.pop_card(), full_deck().last().copied());
    }
}
