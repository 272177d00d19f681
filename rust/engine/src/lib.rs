//! # bluff-engine: Bluff Card Game Rules Engine
//!
//! Rules engine for "Bluff", a multi-round bluffing card game. Each round
//! every active player is dealt a private hand from a 54-card deck (two
//! jokers). On their turn a player either declares a poker-style combination
//! at least as strong as the previous declaration, or checks the previous
//! declarer. The check is resolved against every card in play; the loser
//! owes one more card next round, and owing six cards eliminates a player.
//!
//! The engine consumes player ids and action strings and returns plain,
//! serializable per-player snapshots. It performs no I/O and owns no timers.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card, jokers) and deck construction
//! - [`combos`] - Combination predicates over a pool of cards
//! - [`deck`] - Seeded deck shuffling with ChaCha20 RNG
//! - [`hand`] - Declared combinations, their ordering and parsing
//! - [`action`] - Wire action vocabulary
//! - [`player`] - Per-seat player record
//! - [`rules`] - Move legality and check resolution
//! - [`game`] - Match phases and the outgoing snapshot
//! - [`engine`] - Match orchestration and the action state machine
//! - [`config`] - Match configuration (TOML file + environment)
//! - [`logger`] - Round history records and JSONL writer
//! - [`errors`] - Error types for parsing, play and configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use bluff_engine::cards::{Card, Rank, Suit};
//! use bluff_engine::hand::Hand;
//! use bluff_engine::rules::claim_holds;
//!
//! // A joker stands in for the second seven
//! let pool = [Card::new(Rank::Seven, Suit::Clubs), Card::Joker];
//! let claim: Hand = "Pair 7".parse().unwrap();
//!
//! assert!(claim_holds(&pool, &claim));
//! ```
//!
//! ## Playing a Round
//!
//! ```rust
//! use bluff_engine::engine::Engine;
//!
//! let mut engine = Engine::with_seed(42);
//! engine.add_player(10).unwrap();
//! engine.add_player(20).unwrap();
//! engine.process_action(10, "Start").unwrap();
//! engine.process_action(20, "Start").unwrap();
//!
//! let first = engine.current_player().unwrap().id();
//! let second = if first == 10 { 20 } else { 10 };
//!
//! engine.process_action(first, "move HighCard 2").unwrap();
//! let status = engine.process_action(second, "check").unwrap();
//!
//! // the check reveals every card in play
//! assert_eq!(status.checked.len(), 2);
//! ```

pub mod action;
pub mod cards;
pub mod combos;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod rules;
