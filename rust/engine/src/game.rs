use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Phase of the match state machine.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for every active player to be ready
    Lobby,
    /// Cards dealt, players declare or check in turn
    InRound,
    /// A check resolved; the round is frozen until everyone is ready again
    Checked,
    /// One player remains; waits for a new-game trigger
    GameOver,
}

/// Outcome of the most recent check, kept for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Player who called the check
    pub checker: String,
    /// Player whose move was checked
    pub accused: String,
    /// Player who received the penalty card
    pub penalized: String,
    /// Whether the penalty eliminated that player
    pub eliminated: bool,
}

/// Per-player view of the match handed to the transport layer.
/// Only the receiving player's own cards are included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    /// Cards have been dealt for the current round
    pub start: bool,
    /// The receiving player is eliminated
    pub lost: bool,
    /// The receiving player's cards
    pub hand: Vec<Card>,
    /// Winner's name once the game is over
    pub win: Option<String>,
    /// Round move log as (player, move) pairs; own entries read `You: <name>`
    pub moves: Vec<(String, String)>,
    pub check_result: CheckResult,
    /// Every card in play, revealed after a check
    pub checked: Vec<Card>,
    /// e.g. `Waiting for players 1/3`
    pub ready: String,
    /// (name, hand size) of every active player; own entry reads `You: <name>`
    pub players: Vec<(String, usize)>,
    pub is_turn: bool,
    /// Name of the player to act
    pub turn: String,
}

/// Prefix marking the receiving player's own entries in a snapshot.
pub const SELF_PREFIX: &str = "You: ";

pub fn self_label(name: &str) -> String {
    format!("{}{}", SELF_PREFIX, name)
}
