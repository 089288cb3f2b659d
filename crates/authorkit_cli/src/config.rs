//! Configuration loading from environment variables.

use authorkit_core::env::{env_flag_enabled, env_usize_or};
use authorkit_core::DEFAULT_MAX_INPUT_SIZE;

/// Environment variable bounding input size in bytes.
pub const MAX_INPUT_SIZE_ENV: &str = "AUTHORKIT_MAX_INPUT_SIZE";
/// Environment variable selecting JSON output by default.
pub const JSON_OUTPUT_ENV: &str = "AUTHORKIT_JSON";

/// Runtime configuration for the `authorkit` CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub max_input_size: usize,
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing
    /// or unparseable.
    pub fn from_env() -> Self {
        Self {
            max_input_size: env_usize_or(MAX_INPUT_SIZE_ENV, DEFAULT_MAX_INPUT_SIZE),
            json: env_flag_enabled(JSON_OUTPUT_ENV),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, JSON_OUTPUT_ENV, MAX_INPUT_SIZE_ENV};
    use authorkit_core::test_support::{env_lock, EnvGuard};
    use authorkit_core::DEFAULT_MAX_INPUT_SIZE;

    #[test]
    fn from_env_applies_defaults() {
        let _lock = env_lock().lock().expect("env lock");
        let _size = EnvGuard::remove(MAX_INPUT_SIZE_ENV);
        let _json = EnvGuard::remove(JSON_OUTPUT_ENV);
        assert_eq!(Config::from_env(), Config::default());
    }

    #[test]
    fn from_env_reads_overrides() {
        let _lock = env_lock().lock().expect("env lock");
        let _size = EnvGuard::set(MAX_INPUT_SIZE_ENV, "4096");
        let _json = EnvGuard::set(JSON_OUTPUT_ENV, "yes");
        let config = Config::from_env();
        assert_eq!(config.max_input_size, 4096);
        assert!(config.json);

        let _size = EnvGuard::set(MAX_INPUT_SIZE_ENV, "lots");
        assert_eq!(Config::from_env().max_input_size, DEFAULT_MAX_INPUT_SIZE);
    }
}
