use std::fs;

use bluff_engine::config::{self, ValueSource};
use bluff_engine::errors::ConfigError;
use serial_test::serial;
use tempfile::TempDir;

const KEYS: [&str; 6] = [
    "BLUFF_CONFIG",
    "BLUFF_SEED",
    "BLUFF_MIN_PLAYERS",
    "BLUFF_MAX_PLAYERS",
    "BLUFF_MAX_CARDS",
    "BLUFF_NAME_MAX_LEN",
];

// Sets the given variables, clears the other BLUFF_* keys, and restores
// everything on drop.
struct EnvGuard {
    restores: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    fn apply(pairs: &[(&'static str, &str)]) -> Self {
        let restores = KEYS.iter().map(|k| (*k, std::env::var(k).ok())).collect();
        for key in KEYS {
            std::env::remove_var(key);
        }
        for (key, value) in pairs {
            std::env::set_var(key, value);
        }
        EnvGuard { restores }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in &self.restores {
            match previous {
                Some(val) => std::env::set_var(key, val),
                None => std::env::remove_var(key),
            }
        }
    }
}

#[test]
#[serial]
fn defaults_without_environment() {
    let _env = EnvGuard::apply(&[]);
    let resolved = config::load_with_sources().unwrap();
    assert_eq!(resolved.config, config::GameConfig::default());
    assert_eq!(resolved.sources.max_players, ValueSource::Default);
    assert_eq!(resolved.sources.seed, ValueSource::Default);
}

#[test]
#[serial]
fn env_overrides_every_field() {
    let _env = EnvGuard::apply(&[
        ("BLUFF_SEED", "42"),
        ("BLUFF_MIN_PLAYERS", "3"),
        ("BLUFF_MAX_PLAYERS", "5"),
        ("BLUFF_MAX_CARDS", "4"),
        ("BLUFF_NAME_MAX_LEN", "12"),
    ]);
    let resolved = config::load_with_sources().unwrap();
    let cfg = &resolved.config;
    assert_eq!(cfg.seed, Some(42));
    assert_eq!(cfg.min_players, 3);
    assert_eq!(cfg.max_players, 5);
    assert_eq!(cfg.max_cards, 4);
    assert_eq!(cfg.name_max_len, 12);
    assert_eq!(resolved.sources.name_max_len, ValueSource::Env);
    assert_eq!(resolved.sources.seed, ValueSource::Env);
}

#[test]
#[serial]
fn env_wins_over_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bluff.toml");
    fs::write(&path, "max_players = 4\nname_max_len = 6\nseed = 1\n").unwrap();
    let path_str = path.to_string_lossy().to_string();

    let _env = EnvGuard::apply(&[("BLUFF_CONFIG", path_str.as_str()), ("BLUFF_SEED", "9")]);
    let resolved = config::load_with_sources().unwrap();
    assert_eq!(resolved.config.max_players, 4);
    assert_eq!(resolved.config.name_max_len, 6);
    assert_eq!(resolved.config.seed, Some(9));
    assert_eq!(resolved.sources.max_players, ValueSource::File);
    assert_eq!(resolved.sources.name_max_len, ValueSource::File);
    assert_eq!(resolved.sources.seed, ValueSource::Env);
    assert_eq!(resolved.sources.max_cards, ValueSource::Default);
}

#[test]
#[serial]
fn malformed_env_value_is_rejected() {
    let _env = EnvGuard::apply(&[("BLUFF_NAME_MAX_LEN", "long")]);
    match config::load() {
        Err(ConfigError::Invalid(msg)) => assert!(msg.contains("BLUFF_NAME_MAX_LEN")),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
#[serial]
fn env_values_are_validated() {
    let _env = EnvGuard::apply(&[("BLUFF_MAX_PLAYERS", "20")]);
    assert!(matches!(config::load(), Err(ConfigError::Invalid(_))));
}

#[test]
#[serial]
fn missing_config_file_is_an_io_error() {
    let _env = EnvGuard::apply(&[("BLUFF_CONFIG", "/nonexistent/bluff.toml")]);
    assert!(matches!(config::load(), Err(ConfigError::Io(_))));
}
