use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents one of the four suits of the Bluff deck.
/// Declaration order is the suit ordinal used when two flushes or two pokers meet.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    /// Word used in action strings (`Flush Hearts`).
    pub fn word(self) -> &'static str {
        match self {
            Suit::Clubs => "Clubs",
            Suit::Diamonds => "Diamonds",
            Suit::Hearts => "Hearts",
            Suit::Spades => "Spades",
        }
    }

    /// Parses a suit word. Suit words are case-sensitive.
    pub fn from_word(word: &str) -> Option<Suit> {
        match word {
            "Clubs" => Some(Suit::Clubs),
            "Diamonds" => Some(Suit::Diamonds),
            "Hearts" => Some(Suit::Hearts),
            "Spades" => Some(Suit::Spades),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

/// Represents the rank of a regular (non-joker) card from Two through Ace.
/// Numeric values are assigned so runs can be detected by arithmetic.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 2
    Two = 2,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
    /// Ace (14)
    Ace,
}

impl Rank {
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Word used in action strings: `2`..`10`, `Jack`, `Queen`, `King`, `Ace`.
    pub fn word(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        }
    }

    /// Parses a rank word. Face names are accepted in any letter case.
    /// Numbers must be written exactly `2`..`10`.
    pub fn from_word(word: &str) -> Option<Rank> {
        all_ranks()
            .into_iter()
            .find(|r| r.word().eq_ignore_ascii_case(word))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

/// A single card of the 54-card Bluff deck: a joker or a rank/suit pair.
///
/// Equality and ordering are structural. The wildcard behaviour of jokers
/// lives in [`Card::matches`] only; derived `Ord` places jokers before every
/// regular card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Card {
    /// Universal wildcard, carries no suit.
    Joker,
    /// Regular playing card.
    Regular {
        /// The rank of the card (Two through Ace)
        rank: Rank,
        /// The suit of the card
        suit: Suit,
    },
}

/// Something a card can be matched against inside a combination predicate.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Target {
    Rank(Rank),
    Suit(Suit),
    Card(Card),
}

impl From<Rank> for Target {
    fn from(r: Rank) -> Self {
        Target::Rank(r)
    }
}

impl From<Suit> for Target {
    fn from(s: Suit) -> Self {
        Target::Suit(s)
    }
}

impl From<Card> for Target {
    fn from(c: Card) -> Self {
        Target::Card(c)
    }
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Card::Regular { rank, suit }
    }

    pub fn is_joker(&self) -> bool {
        matches!(self, Card::Joker)
    }

    pub fn rank(&self) -> Option<Rank> {
        match self {
            Card::Joker => None,
            Card::Regular { rank, .. } => Some(*rank),
        }
    }

    pub fn suit(&self) -> Option<Suit> {
        match self {
            Card::Joker => None,
            Card::Regular { suit, .. } => Some(*suit),
        }
    }

    /// Wildcard-aware match: a joker on either side matches anything, a
    /// regular card matches a rank or suit it carries, and two regular cards
    /// match when their ranks agree.
    pub fn matches(&self, target: impl Into<Target>) -> bool {
        let (rank, suit) = match self {
            Card::Joker => return true,
            Card::Regular { rank, suit } => (*rank, *suit),
        };
        match target.into() {
            Target::Rank(r) => rank == r,
            Target::Suit(s) => suit == s,
            Target::Card(Card::Joker) => true,
            Target::Card(Card::Regular { rank: r, .. }) => rank == r,
        }
    }

    /// File-style name used by renderers, e.g. `7_of_clubs` or `joker`.
    pub fn display_name(&self) -> String {
        match self {
            Card::Joker => "joker".to_string(),
            Card::Regular { rank, suit } => format!(
                "{}_of_{}",
                rank.word().to_ascii_lowercase(),
                suit.word().to_ascii_lowercase()
            ),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Joker => f.write_str("Joker"),
            Card::Regular { rank, suit } => write!(f, "{} of {}", rank, suit),
        }
    }
}

/// Number of jokers shuffled into every deck.
pub const JOKERS_PER_DECK: usize = 2;

/// Size of a complete deck: 13 ranks × 4 suits plus the jokers.
pub const DECK_SIZE: usize = 52 + JOKERS_PER_DECK;

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(DECK_SIZE);
    for _ in 0..JOKERS_PER_DECK {
        v.push(Card::Joker);
    }
    for &r in &all_ranks() {
        for &s in &all_suits() {
            v.push(Card::new(r, s));
        }
    }
    v
}
