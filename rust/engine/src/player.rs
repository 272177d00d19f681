use crate::cards::Card;
use serde::{Deserialize, Serialize};

/// Stable external identity of a seat, assigned by the transport layer.
pub type PlayerId = u64;

/// Cards a player is dealt in the first round of a game.
pub const STARTING_HAND_SIZE: usize = 1;

/// One seat at the table.
/// Tracks how many cards the player is owed, the cards actually held this
/// round, and the lobby/elimination flags. Only the engine mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Identity supplied on join
    id: PlayerId,
    /// Display name, empty until the client sends `name <n>`
    name: String,
    /// Number of cards dealt each round; grows by one per lost check
    hand_size: usize,
    /// Cards held in the current round
    hand: Vec<Card>,
    /// Ready for the next round (lobby gating only)
    ready: bool,
    /// Out of the game until a new game starts
    eliminated: bool,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            name: String::new(),
            hand_size: STARTING_HAND_SIZE,
            hand: Vec::with_capacity(STARTING_HAND_SIZE),
            ready: false,
            eliminated: false,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }
    pub fn hand_size(&self) -> usize {
        self.hand_size
    }
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }
    pub fn is_ready(&self) -> bool {
        self.ready
    }
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }
    pub fn is_eliminated(&self) -> bool {
        self.eliminated
    }
    pub fn is_active(&self) -> bool {
        !self.eliminated
    }

    pub fn give_card(&mut self, c: Card) {
        self.hand.push(c);
    }

    /// Records a lost check: one more card next round.
    pub fn add_penalty_card(&mut self) {
        self.hand_size += 1;
    }

    /// Marks the player out; they keep their name but are dealt nothing.
    pub fn eliminate(&mut self) {
        self.eliminated = true;
        self.hand_size = 0;
        self.ready = false;
    }

    pub fn clear_cards(&mut self) {
        self.hand.clear();
    }

    /// Back to the state of a freshly joined player, name kept.
    pub fn reset_for_new_game(&mut self) {
        self.eliminated = false;
        self.hand_size = STARTING_HAND_SIZE;
        self.ready = false;
        self.hand.clear();
    }
}
