use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::{Rank, Suit};
use crate::errors::ParseError;

/// Rank class of a declared combination, weakest first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPairs = 2,
    Straight = 3,
    ThreeOfKind = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfKind = 7,
    Poker = 8,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum StraightSize {
    Small,
    Big,
}

/// A combination a player claims exists among the pooled cards.
///
/// Structural equality only; strength is compared with [`Hand::compare`],
/// which is not a total order for every category (see its docs).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Hand {
    HighCard(Rank),
    Pair(Rank),
    TwoPairs(Rank, Rank),
    Straight(StraightSize),
    ThreeOfKind(Rank),
    Flush(Suit),
    FullHouse { three: Rank, two: Rank },
    FourOfKind(Rank),
    Poker { size: StraightSize, suit: Suit },
}

impl Hand {
    pub fn category(&self) -> Category {
        match self {
            Hand::HighCard(_) => Category::HighCard,
            Hand::Pair(_) => Category::Pair,
            Hand::TwoPairs(..) => Category::TwoPairs,
            Hand::Straight(_) => Category::Straight,
            Hand::ThreeOfKind(_) => Category::ThreeOfKind,
            Hand::Flush(_) => Category::Flush,
            Hand::FullHouse { .. } => Category::FullHouse,
            Hand::FourOfKind(_) => Category::FourOfKind,
            Hand::Poker { .. } => Category::Poker,
        }
    }

    /// Class ordinal, 0 (HighCard) through 8 (Poker).
    pub fn hierarchy_rank(&self) -> u8 {
        self.category() as u8
    }

    /// Compares declared strength.
    ///
    /// Different categories order by [`Category`]. Within a category:
    /// - single-rank kinds compare by rank;
    /// - `TwoPairs` a is lower when either of its ranks is below both of b's ranks;
    /// - straights of the same size are `Equal`, small is below big;
    /// - flushes compare by suit (Clubs < Diamonds < Hearts < Spades);
    /// - full houses compare by the three, then the pair;
    /// - pokers: small below big regardless of suit, same size by suit.
    ///
    /// `Equal` means neither hand is lower, so neither may follow the other.
    pub fn compare(&self, other: &Hand) -> Ordering {
        match (self, other) {
            (Hand::HighCard(a), Hand::HighCard(b))
            | (Hand::Pair(a), Hand::Pair(b))
            | (Hand::ThreeOfKind(a), Hand::ThreeOfKind(b))
            | (Hand::FourOfKind(a), Hand::FourOfKind(b)) => a.cmp(b),
            (Hand::TwoPairs(a1, a2), Hand::TwoPairs(b1, b2)) => {
                if two_pairs_lower((*a1, *a2), (*b1, *b2)) {
                    Ordering::Less
                } else if two_pairs_lower((*b1, *b2), (*a1, *a2)) {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            }
            (Hand::Straight(a), Hand::Straight(b)) => a.cmp(b),
            (Hand::Flush(a), Hand::Flush(b)) => a.cmp(b),
            (
                Hand::FullHouse { three: a3, two: a2 },
                Hand::FullHouse { three: b3, two: b2 },
            ) => a3.cmp(b3).then(a2.cmp(b2)),
            (
                Hand::Poker { size: sa, suit: ua },
                Hand::Poker { size: sb, suit: ub },
            ) => sa.cmp(sb).then(ua.cmp(ub)),
            _ => self.category().cmp(&other.category()),
        }
    }

    pub fn is_lower_than(&self, other: &Hand) -> bool {
        self.compare(other) == Ordering::Less
    }

    /// Action keyword naming this kind of move.
    pub fn keyword(&self) -> &'static str {
        match self {
            Hand::HighCard(_) => "HighCard",
            Hand::Pair(_) => "Pair",
            Hand::TwoPairs(..) => "TwoPairs",
            Hand::Straight(StraightSize::Small) => "SmallStraight",
            Hand::Straight(StraightSize::Big) => "BigStraight",
            Hand::ThreeOfKind(_) => "ThreeOfKind",
            Hand::Flush(_) => "Flush",
            Hand::FullHouse { .. } => "FullHouse",
            Hand::FourOfKind(_) => "FourOfKind",
            Hand::Poker {
                size: StraightSize::Small,
                ..
            } => "SmallPoker",
            Hand::Poker {
                size: StraightSize::Big,
                ..
            } => "BigPoker",
        }
    }

    /// Parses `[keyword, args...]`, e.g. `["FullHouse", "King", "4"]`.
    pub fn parse_move(tokens: &[&str]) -> Result<Hand, ParseError> {
        let (keyword, args) = tokens.split_first().ok_or(ParseError::EmptyAction)?;
        let mut args = Args {
            kind: keyword_name(keyword)?,
            rest: args.iter(),
        };
        let hand = match *keyword {
            "HighCard" => Hand::HighCard(args.rank()?),
            "Pair" => Hand::Pair(args.rank()?),
            "TwoPairs" => Hand::TwoPairs(args.rank()?, args.rank()?),
            "SmallStraight" => Hand::Straight(StraightSize::Small),
            "BigStraight" => Hand::Straight(StraightSize::Big),
            "ThreeOfKind" => Hand::ThreeOfKind(args.rank()?),
            "Flush" => Hand::Flush(args.suit()?),
            "FullHouse" => Hand::FullHouse {
                three: args.rank()?,
                two: args.rank()?,
            },
            "FourOfKind" => Hand::FourOfKind(args.rank()?),
            "SmallPoker" => Hand::Poker {
                size: StraightSize::Small,
                suit: args.suit()?,
            },
            "BigPoker" => Hand::Poker {
                size: StraightSize::Big,
                suit: args.suit()?,
            },
            other => return Err(ParseError::UnknownKeyword(other.to_string())),
        };
        args.finish()?;
        Ok(hand)
    }
}

fn two_pairs_lower(a: (Rank, Rank), b: (Rank, Rank)) -> bool {
    (a.0 < b.0 && a.0 < b.1) || (a.1 < b.0 && a.1 < b.1)
}

const KEYWORDS: [&str; 11] = [
    "HighCard",
    "Pair",
    "TwoPairs",
    "SmallStraight",
    "BigStraight",
    "ThreeOfKind",
    "Flush",
    "FullHouse",
    "FourOfKind",
    "SmallPoker",
    "BigPoker",
];

fn keyword_name(keyword: &str) -> Result<&'static str, ParseError> {
    KEYWORDS
        .iter()
        .copied()
        .find(|k| *k == keyword)
        .ok_or_else(|| ParseError::UnknownKeyword(keyword.to_string()))
}

struct Args<'a, 'b> {
    kind: &'static str,
    rest: std::slice::Iter<'a, &'b str>,
}

impl Args<'_, '_> {
    fn next(&mut self) -> Result<&str, ParseError> {
        self.rest
            .next()
            .copied()
            .ok_or(ParseError::MissingArgument { kind: self.kind })
    }

    fn rank(&mut self) -> Result<Rank, ParseError> {
        let word = self.next()?;
        Rank::from_word(word).ok_or_else(|| ParseError::InvalidRank(word.to_string()))
    }

    fn suit(&mut self) -> Result<Suit, ParseError> {
        let word = self.next()?;
        Suit::from_word(word).ok_or_else(|| ParseError::InvalidSuit(word.to_string()))
    }

    fn finish(mut self) -> Result<(), ParseError> {
        match self.rest.next() {
            Some(extra) => Err(ParseError::UnexpectedArgument(extra.to_string())),
            None => Ok(()),
        }
    }
}

impl FromStr for Hand {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        Hand::parse_move(&tokens)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())?;
        match self {
            Hand::HighCard(r) | Hand::Pair(r) | Hand::ThreeOfKind(r) | Hand::FourOfKind(r) => {
                write!(f, " {}", r)
            }
            Hand::TwoPairs(a, b) => write!(f, " {} {}", a, b),
            Hand::FullHouse { three, two } => write!(f, " {} {}", three, two),
            Hand::Flush(s) | Hand::Poker { suit: s, .. } => write!(f, " {}", s),
            Hand::Straight(_) => Ok(()),
        }
    }
}
