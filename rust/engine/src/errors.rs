use thiserror::Error;

use crate::player::PlayerId;

/// A malformed action string or move descriptor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty action")]
    EmptyAction,
    #[error("unknown move kind `{0}`")]
    UnknownKeyword(String),
    #[error("{kind} needs more arguments")]
    MissingArgument { kind: &'static str },
    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),
    #[error("`{0}` is not a card rank")]
    InvalidRank(String),
    #[error("`{0}` is not a suit")]
    InvalidSuit(String),
    #[error("name action without a name")]
    MissingName,
}

/// Coarse classification used to decide how the engine reacts to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input; the action is dropped.
    Parse,
    /// Well-formed but not allowed right now; the action is dropped.
    IllegalMove,
    /// Joining or leaving was refused.
    Roster,
    /// The match cannot continue as configured.
    Structural,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("{attempted} does not beat {last}")]
    MoveNotHigher { last: String, attempted: String },
    #[error("nothing to check yet")]
    NothingToCheck,
    #[error("It's not player {actual}'s turn (expected player {expected})")]
    NotPlayersTurn { expected: PlayerId, actual: PlayerId },
    #[error("player {0} is eliminated")]
    PlayerEliminated(PlayerId),
    #[error("No round in progress")]
    NoRoundInProgress,
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
    #[error("player {0} already joined")]
    DuplicatePlayer(PlayerId),
    #[error("game is full")]
    GameFull,
    #[error("game already in progress")]
    GameInProgress,
    #[error("deck exhausted while dealing")]
    DeckExhausted,
    #[error("need {minimum}+ active players, have {active}")]
    NotEnoughPlayers { minimum: usize, active: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::Parse(_) => ErrorKind::Parse,
            GameError::MoveNotHigher { .. }
            | GameError::NothingToCheck
            | GameError::NotPlayersTurn { .. }
            | GameError::PlayerEliminated(_)
            | GameError::NoRoundInProgress => ErrorKind::IllegalMove,
            GameError::UnknownPlayer(_)
            | GameError::DuplicatePlayer(_)
            | GameError::GameFull
            | GameError::GameInProgress => ErrorKind::Roster,
            GameError::DeckExhausted
            | GameError::NotEnoughPlayers { .. }
            | GameError::InvalidConfig(_) => ErrorKind::Structural,
        }
    }

    /// Parse and illegal-move errors only drop the offending action.
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Parse | ErrorKind::IllegalMove)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
