use crate::cards::Card;
use crate::combos;
use crate::errors::GameError;
use crate::hand::{Hand, StraightSize};

/// Validates a declared move against the last move of the round.
///
/// The first move of a round is always legal. Every later move must be
/// strictly stronger than the previous one according to [`Hand::compare`];
/// a tie (for example two small straights) is refused.
///
/// # Errors
///
/// Returns [`GameError::MoveNotHigher`] when `next` does not beat `last`.
///
/// # Examples
///
/// ```
/// use bluff_engine::hand::Hand;
/// use bluff_engine::rules::validate_move;
///
/// let pair: Hand = "Pair 7".parse().unwrap();
/// let higher: Hand = "Pair 9".parse().unwrap();
///
/// assert!(validate_move(None, &pair).is_ok());
/// assert!(validate_move(Some(&pair), &higher).is_ok());
/// assert!(validate_move(Some(&higher), &pair).is_err());
/// ```
pub fn validate_move(last: Option<&Hand>, next: &Hand) -> Result<(), GameError> {
    match last {
        None => Ok(()),
        Some(last) if last.is_lower_than(next) => Ok(()),
        Some(last) => Err(GameError::MoveNotHigher {
            last: last.to_string(),
            attempted: next.to_string(),
        }),
    }
}

/// Resolves a check: does the claimed combination exist among `pool`?
pub fn claim_holds(pool: &[Card], claim: &Hand) -> bool {
    match *claim {
        Hand::HighCard(r) => combos::high_card(pool, r),
        Hand::Pair(r) => combos::pair(pool, r),
        Hand::TwoPairs(a, b) => combos::two_pair(pool, a, b),
        Hand::Straight(StraightSize::Small) => combos::small_straight(pool),
        Hand::Straight(StraightSize::Big) => combos::big_straight(pool),
        Hand::ThreeOfKind(r) => combos::three_of_kind(pool, r),
        Hand::Flush(s) => combos::flush(pool, s),
        Hand::FullHouse { three, two } => combos::full_house(pool, three, two),
        Hand::FourOfKind(r) => combos::four_of_kind(pool, r),
        Hand::Poker {
            size: StraightSize::Small,
            suit,
        } => combos::small_poker(pool, suit),
        Hand::Poker {
            size: StraightSize::Big,
            suit,
        } => combos::big_poker(pool, suit),
    }
}
