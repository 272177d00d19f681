use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ParseError;
use crate::hand::Hand;

/// A player action, parsed from the whitespace-delimited wire string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Idle poll; also what unrecognised tokens become
    Get,
    /// Ready for the next round (or start a new game once one is won)
    Start,
    /// Not ready
    Wait,
    /// Accuse the previous declarer of bluffing
    Check,
    /// Set the display name
    Name(String),
    /// Declare a combination
    Move(Hand),
}

impl FromStr for Action {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        match tokens.as_slice() {
            ["Start"] => Ok(Action::Start),
            ["Wait"] => Ok(Action::Wait),
            ["check"] => Ok(Action::Check),
            ["name"] => Err(ParseError::MissingName),
            ["name", name, ..] => Ok(Action::Name(name.to_string())),
            ["move", rest @ ..] => Hand::parse_move(rest).map(Action::Move),
            _ => Ok(Action::Get),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Get => f.write_str("Get"),
            Action::Start => f.write_str("Start"),
            Action::Wait => f.write_str("Wait"),
            Action::Check => f.write_str("check"),
            Action::Name(n) => write!(f, "name {}", n),
            Action::Move(h) => write!(f, "move {}", h),
        }
    }
}
