//! Combination predicates over a pool of cards.
//!
//! Every predicate answers "does this combination exist among `cards`?" and
//! never mutates the pool. Jokers are wildcards: each requirement counts them
//! independently, so `two_pair(cards, Seven, Nine)` lets a single joker help
//! both pairs. An empty pool satisfies nothing.

use crate::cards::{Card, Rank, Suit, Target};

/// Length of every straight and poker run.
pub const RUN_LENGTH: u8 = 5;

/// Lowest rank a small run may start at.
const SMALL_RUN_FIRST_LOW: u8 = 2;
/// Highest rank a small run may start at; a run starting at Ten is big.
const SMALL_RUN_LAST_LOW: u8 = 9;
/// Big runs are exactly Ten through Ace.
const BIG_RUN_LOW: u8 = 10;

fn count_matching(cards: &[Card], target: impl Into<Target> + Copy) -> usize {
    cards.iter().filter(|c| c.matches(target)).count()
}

pub fn high_card(cards: &[Card], rank: Rank) -> bool {
    count_matching(cards, rank) >= 1
}

pub fn pair(cards: &[Card], rank: Rank) -> bool {
    count_matching(cards, rank) >= 2
}

pub fn two_pair(cards: &[Card], first: Rank, second: Rank) -> bool {
    pair(cards, first) && pair(cards, second)
}

pub fn three_of_kind(cards: &[Card], rank: Rank) -> bool {
    count_matching(cards, rank) >= 3
}

pub fn four_of_kind(cards: &[Card], rank: Rank) -> bool {
    count_matching(cards, rank) >= 4
}

pub fn full_house(cards: &[Card], three: Rank, two: Rank) -> bool {
    three_of_kind(cards, three) && pair(cards, two)
}

pub fn flush(cards: &[Card], suit: Suit) -> bool {
    count_matching(cards, suit) >= 5
}

/// Five consecutive ranks starting anywhere from Two up to Nine.
pub fn small_straight(cards: &[Card]) -> bool {
    has_run(cards.iter(), SMALL_RUN_FIRST_LOW..=SMALL_RUN_LAST_LOW)
}

/// Ten, Jack, Queen, King, Ace.
pub fn big_straight(cards: &[Card]) -> bool {
    has_run(cards.iter(), BIG_RUN_LOW..=BIG_RUN_LOW)
}

/// A small straight built only from cards of `suit` (jokers still count).
pub fn small_poker(cards: &[Card], suit: Suit) -> bool {
    has_run(
        cards.iter().filter(|c| c.matches(suit)),
        SMALL_RUN_FIRST_LOW..=SMALL_RUN_LAST_LOW,
    )
}

/// A big straight built only from cards of `suit` (jokers still count).
pub fn big_poker(cards: &[Card], suit: Suit) -> bool {
    has_run(cards.iter().filter(|c| c.matches(suit)), BIG_RUN_LOW..=BIG_RUN_LOW)
}

// Scans windows of RUN_LENGTH consecutive ranks whose lowest rank lies in
// `lows`; a window is complete when its missing ranks can be covered by jokers,
// one joker per missing rank.
fn has_run<'a>(
    cards: impl Iterator<Item = &'a Card>,
    lows: std::ops::RangeInclusive<u8>,
) -> bool {
    let mut jokers = 0usize;
    let mut present: u16 = 0;
    for card in cards {
        match card.rank() {
            None => jokers += 1,
            Some(r) => present |= 1 << r.value(),
        }
    }
    lows.into_iter().any(|low| {
        let missing = (low..low + RUN_LENGTH)
            .filter(|v| present & (1 << v) == 0)
            .count();
        missing <= jokers
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank as R, Suit as S};

    fn c(r: R, s: S) -> Card {
        Card::new(r, s)
    }

    #[test]
    fn empty_pool_satisfies_nothing() {
        let pool: Vec<Card> = vec![];
        assert!(!high_card(&pool, R::Two));
        assert!(!pair(&pool, R::Two));
        assert!(!flush(&pool, S::Clubs));
        assert!(!small_straight(&pool));
        assert!(!big_straight(&pool));
        assert!(!small_poker(&pool, S::Hearts));
        assert!(!big_poker(&pool, S::Hearts));
    }

    #[test]
    fn joker_completes_a_pair() {
        let pool = vec![c(R::Seven, S::Clubs), Card::Joker];
        assert!(pair(&pool, R::Seven));
        assert!(!three_of_kind(&pool, R::Seven));
        // one joker serves each pair requirement on its own
        assert!(two_pair(&[c(R::Seven, S::Clubs), c(R::Nine, S::Hearts), Card::Joker], R::Seven, R::Nine));
    }

    #[test]
    fn full_house_needs_both_parts() {
        let pool = vec![
            c(R::King, S::Clubs),
            c(R::King, S::Hearts),
            c(R::King, S::Spades),
            c(R::Four, S::Clubs),
        ];
        assert!(!full_house(&pool, R::King, R::Four));
        let mut with_pair = pool.clone();
        with_pair.push(c(R::Four, S::Diamonds));
        assert!(full_house(&with_pair, R::King, R::Four));
        assert!(four_of_kind(&[pool.clone(), vec![Card::Joker]].concat(), R::King));
    }

    #[test]
    fn flush_counts_jokers_toward_suit() {
        let mut pool = vec![
            c(R::Two, S::Hearts),
            c(R::Five, S::Hearts),
            c(R::Nine, S::Hearts),
            c(R::King, S::Hearts),
        ];
        assert!(!flush(&pool, S::Hearts));
        pool.push(Card::Joker);
        assert!(flush(&pool, S::Hearts));
        assert!(!flush(&pool, S::Spades));
    }

    #[test]
    fn small_straight_with_and_without_jokers() {
        let run = vec![
            c(R::Three, S::Clubs),
            c(R::Four, S::Hearts),
            c(R::Five, S::Spades),
            c(R::Six, S::Clubs),
            c(R::Seven, S::Diamonds),
        ];
        assert!(small_straight(&run));

        let gap = vec![
            c(R::Three, S::Clubs),
            c(R::Four, S::Hearts),
            c(R::Six, S::Clubs),
            c(R::Seven, S::Diamonds),
        ];
        assert!(!small_straight(&gap));
        assert!(small_straight(&[gap.clone(), vec![Card::Joker]].concat()));

        let two_gaps = vec![c(R::Two, S::Clubs), c(R::Four, S::Hearts), c(R::Six, S::Clubs)];
        assert!(!small_straight(&[two_gaps.clone(), vec![Card::Joker]].concat()));
        assert!(small_straight(&[two_gaps, vec![Card::Joker, Card::Joker]].concat()));
    }

    #[test]
    fn duplicates_do_not_extend_a_run() {
        let pool = vec![
            c(R::Two, S::Clubs),
            c(R::Two, S::Hearts),
            c(R::Three, S::Clubs),
            c(R::Four, S::Clubs),
            c(R::Five, S::Clubs),
        ];
        assert!(!small_straight(&pool));
    }

    #[test]
    fn ten_to_ace_is_big_not_small() {
        let broadway = vec![
            c(R::Ten, S::Clubs),
            c(R::Jack, S::Hearts),
            c(R::Queen, S::Spades),
            c(R::King, S::Clubs),
            c(R::Ace, S::Diamonds),
        ];
        assert!(big_straight(&broadway));
        assert!(!small_straight(&broadway));

        let nine_high = vec![
            c(R::Nine, S::Clubs),
            c(R::Ten, S::Clubs),
            c(R::Jack, S::Hearts),
            c(R::Queen, S::Spades),
            c(R::King, S::Clubs),
        ];
        assert!(small_straight(&nine_high));
        assert!(!big_straight(&nine_high));
    }

    #[test]
    fn big_straight_padded_by_jokers() {
        let pool = vec![c(R::Ten, S::Clubs), c(R::Ace, S::Hearts), c(R::King, S::Spades), Card::Joker, Card::Joker];
        assert!(big_straight(&pool));
        assert!(!big_straight(&pool[..4]));
    }

    #[test]
    fn pokers_are_suit_restricted() {
        let mut pool = vec![
            c(R::Ten, S::Spades),
            c(R::Jack, S::Spades),
            c(R::Queen, S::Spades),
            c(R::King, S::Spades),
            c(R::Ace, S::Hearts),
        ];
        assert!(big_straight(&pool));
        assert!(!big_poker(&pool, S::Spades));
        pool.push(Card::Joker);
        assert!(big_poker(&pool, S::Spades));
        assert!(!big_poker(&pool, S::Hearts));

        let low = vec![
            c(R::Four, S::Diamonds),
            c(R::Five, S::Diamonds),
            c(R::Six, S::Diamonds),
            c(R::Seven, S::Clubs),
            c(R::Eight, S::Diamonds),
        ];
        assert!(small_straight(&low));
        assert!(!small_poker(&low, S::Diamonds));
        assert!(small_poker(&[low.clone(), vec![Card::Joker]].concat(), S::Diamonds));
    }

    #[test]
    fn predicates_leave_pool_untouched() {
        let pool = vec![Card::Joker, c(R::Two, S::Clubs), Card::Joker];
        let before = pool.clone();
        let _ = small_straight(&pool);
        let _ = big_poker(&pool, S::Clubs);
        assert_eq!(pool, before);
    }
}
