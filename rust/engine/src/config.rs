//! Match configuration.
//!
//! Values resolve in order: built-in defaults, then an optional TOML file
//! named by `BLUFF_CONFIG`, then `BLUFF_*` environment overrides.

use serde::{Deserialize, Serialize};
use std::fs;

use crate::cards::{DECK_SIZE, JOKERS_PER_DECK};
use crate::errors::ConfigError;

pub const DEFAULT_MIN_PLAYERS: usize = 2;
pub const DEFAULT_MAX_PLAYERS: usize = 8;
/// Penalty threshold: reaching this many owed cards eliminates a player.
pub const DEFAULT_MAX_CARDS: usize = 6;
pub const DEFAULT_NAME_MAX_LEN: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameConfig {
    pub min_players: usize,
    pub max_players: usize,
    pub max_cards: usize,
    pub name_max_len: usize,
    /// Fixed seed for reproducible shuffles; `None` draws one at start-up.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: DEFAULT_MIN_PLAYERS,
            max_players: DEFAULT_MAX_PLAYERS,
            max_cards: DEFAULT_MAX_CARDS,
            name_max_len: DEFAULT_NAME_MAX_LEN,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Checks the bounds that keep dealing within one deck.
    ///
    /// A surviving player holds at most `max_cards - 1` cards, so
    /// `max_players * (max_cards - 1)` must fit in the deck.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players < 2 {
            return Err(ConfigError::Invalid("min_players must be at least 2".into()));
        }
        if self.max_players < self.min_players {
            return Err(ConfigError::Invalid(
                "max_players must not be below min_players".into(),
            ));
        }
        if self.max_cards < 2 {
            return Err(ConfigError::Invalid("max_cards must be at least 2".into()));
        }
        if self.name_max_len == 0 {
            return Err(ConfigError::Invalid("name_max_len must be positive".into()));
        }
        let demand = self.max_players.saturating_mul(self.max_cards - 1);
        if demand > DECK_SIZE {
            return Err(ConfigError::Invalid(format!(
                "{} players x {} cards exceeds the {}-card deck ({} jokers)",
                self.max_players,
                self.max_cards - 1,
                DECK_SIZE,
                JOKERS_PER_DECK
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSources {
    pub min_players: ValueSource,
    pub max_players: ValueSource,
    pub max_cards: ValueSource,
    pub name_max_len: ValueSource,
    pub seed: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            min_players: ValueSource::Default,
            max_players: ValueSource::Default,
            max_cards: ValueSource::Default,
            name_max_len: ValueSource::Default,
            seed: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: GameConfig,
    pub sources: ConfigSources,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    min_players: Option<usize>,
    max_players: Option<usize>,
    max_cards: Option<usize>,
    name_max_len: Option<usize>,
    seed: Option<u64>,
}

pub fn load() -> Result<GameConfig, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = GameConfig::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("BLUFF_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        apply_file(&mut cfg, &mut sources, f);
    }

    if let Some(v) = env_value::<u64>("BLUFF_SEED")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_value::<usize>("BLUFF_MIN_PLAYERS")? {
        cfg.min_players = v;
        sources.min_players = ValueSource::Env;
    }
    if let Some(v) = env_value::<usize>("BLUFF_MAX_PLAYERS")? {
        cfg.max_players = v;
        sources.max_players = ValueSource::Env;
    }
    if let Some(v) = env_value::<usize>("BLUFF_MAX_CARDS")? {
        cfg.max_cards = v;
        sources.max_cards = ValueSource::Env;
    }
    if let Some(v) = env_value::<usize>("BLUFF_NAME_MAX_LEN")? {
        cfg.name_max_len = v;
        sources.name_max_len = ValueSource::Env;
    }

    cfg.validate()?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

/// Parses a TOML document; missing keys keep their defaults.
pub fn from_toml_str(s: &str) -> Result<GameConfig, ConfigError> {
    let mut cfg = GameConfig::default();
    let f: FileConfig = toml::from_str(s)?;
    apply_file(&mut cfg, &mut ConfigSources::default(), f);
    cfg.validate()?;
    Ok(cfg)
}

fn apply_file(cfg: &mut GameConfig, sources: &mut ConfigSources, f: FileConfig) {
    if let Some(v) = f.min_players {
        cfg.min_players = v;
        sources.min_players = ValueSource::File;
    }
    if let Some(v) = f.max_players {
        cfg.max_players = v;
        sources.max_players = ValueSource::File;
    }
    if let Some(v) = f.max_cards {
        cfg.max_cards = v;
        sources.max_cards = ValueSource::File;
    }
    if let Some(v) = f.name_max_len {
        cfg.name_max_len = v;
        sources.name_max_len = ValueSource::File;
    }
    if let Some(v) = f.seed {
        cfg.seed = Some(v);
        sources.seed = ValueSource::File;
    }
}

fn env_value<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(v) if !v.is_empty() => v
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}", key))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.min_players, 2);
        assert_eq!(cfg.max_players, 8);
        assert_eq!(cfg.max_cards, 6);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_configs_that_overdraw_the_deck() {
        let cfg = GameConfig {
            max_players: 12,
            ..GameConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_single_player_minimum() {
        let cfg = GameConfig {
            min_players: 1,
            ..GameConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn toml_overrides_defaults() {
        let cfg = from_toml_str("max_players = 4\nseed = 99\n").unwrap();
        assert_eq!(cfg.max_players, 4);
        assert_eq!(cfg.seed, Some(99));
        assert_eq!(cfg.max_cards, DEFAULT_MAX_CARDS);
    }

    #[test]
    fn toml_unknown_key_is_an_error() {
        assert!(matches!(
            from_toml_str("stack = 100"),
            Err(ConfigError::Parse(_))
        ));
    }
}
