//! Runtime configuration from `MORDICUS_*` environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::types::{DEFAULT_CASCADE_DELAY_MS, DEFAULT_KEY_RELEASE_TIMEOUT_MS, DEFAULT_MOVE_DELAY_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Level pack to load instead of the bundled one.
    pub levels_path: Option<PathBuf>,
    /// File to write logs to; logging stays off when unset.
    pub log_path: Option<PathBuf>,
    pub move_delay_ms: u32,
    pub cascade_delay_ms: u32,
    pub key_release_timeout_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            levels_path: None,
            log_path: None,
            move_delay_ms: DEFAULT_MOVE_DELAY_MS,
            cascade_delay_ms: DEFAULT_CASCADE_DELAY_MS,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Missing or unparsable values fall back to
    /// the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) })
        };
        let millis = |key: &str, default: u32| {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        };

        Self {
            levels_path: path("MORDICUS_LEVELS_PATH"),
            log_path: path("MORDICUS_LOG_PATH"),
            move_delay_ms: millis("MORDICUS_MOVE_DELAY_MS", DEFAULT_MOVE_DELAY_MS),
            cascade_delay_ms: millis("MORDICUS_CASCADE_DELAY_MS", DEFAULT_CASCADE_DELAY_MS),
            key_release_timeout_ms: millis(
                "MORDICUS_KEY_RELEASE_TIMEOUT_MS",
                DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            ),
        }
    }

    pub fn move_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.move_delay_ms))
    }

    pub fn cascade_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.cascade_delay_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> GameConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GameConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(config(&[]), GameConfig::default());
    }

    #[test]
    fn test_reads_values() {
        let cfg = config(&[
            ("MORDICUS_LEVELS_PATH", "/tmp/pack.json"),
            ("MORDICUS_MOVE_DELAY_MS", "90"),
            ("MORDICUS_CASCADE_DELAY_MS", " 120 "),
            ("MORDICUS_KEY_RELEASE_TIMEOUT_MS", "300"),
        ]);
        assert_eq!(cfg.levels_path, Some(PathBuf::from("/tmp/pack.json")));
        assert_eq!(cfg.move_delay_ms, 90);
        assert_eq!(cfg.cascade_delay(), Duration::from_millis(120));
        assert_eq!(cfg.key_release_timeout_ms, 300);
    }

    #[test]
    fn test_garbage_falls_back() {
        let cfg = config(&[
            ("MORDICUS_LOG_PATH", "   "),
            ("MORDICUS_MOVE_DELAY_MS", "fast"),
            ("MORDICUS_CASCADE_DELAY_MS", "-1"),
        ]);
        assert_eq!(cfg.log_path, None);
        assert_eq!(cfg.move_delay_ms, DEFAULT_MOVE_DELAY_MS);
        assert_eq!(cfg.cascade_delay_ms, DEFAULT_CASCADE_DELAY_MS);
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = GameConfig::from_env();
    }
}
