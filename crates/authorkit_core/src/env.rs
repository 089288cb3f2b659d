//! Environment variable parsing.

use crate::text::parse_flag;
use std::env;

/// Parse a boolean-like environment flag value.
///
/// See [`parse_flag`] for the accepted spellings.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    parse_flag(value)
}

/// Read a boolean flag from the environment.
///
/// # Arguments
/// - `name`: Environment variable name.
///
/// # Returns
/// `true` only for a recognized truthy value; missing or unrecognized values
/// read as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

/// Read a positive size from the environment.
///
/// # Arguments
/// - `name`: Environment variable name.
/// - `default`: Value used when the variable is missing, zero, negative, or
///   unparseable.
///
/// # Returns
/// The parsed size, up to and including `usize::MAX`, or `default`.
pub fn env_usize_or(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::{env_flag_enabled, env_usize_or, parse_env_flag};
    use crate::test_support::{env_lock, EnvGuard};

    #[test]
    fn parse_env_flag_accepts_truthy_and_falsy_values() {
        for value in ["1", "true", "TRUE", " yes ", "on"] {
            assert_eq!(parse_env_flag(value), Some(true), "value: {}", value);
        }
        for value in ["", "0", "false", "FALSE", " no ", "off"] {
            assert_eq!(parse_env_flag(value), Some(false), "value: {}", value);
        }
        assert_eq!(parse_env_flag("maybe"), None);
    }

    #[test]
    fn env_readers_fall_back_on_missing_or_bad_values() {
        let _lock = env_lock().lock().expect("env lock");
        let _flag = EnvGuard::set("AUTHORKIT_TEST_FLAG", "enabled");
        let _size = EnvGuard::set("AUTHORKIT_TEST_SIZE", "0");
        assert!(!env_flag_enabled("AUTHORKIT_TEST_FLAG"));
        assert_eq!(env_usize_or("AUTHORKIT_TEST_SIZE", 7), 7);
        assert_eq!(env_usize_or("AUTHORKIT_TEST_SIZE_MISSING", 9), 9);

        let _size = EnvGuard::set("AUTHORKIT_TEST_SIZE", " 128 ");
        assert_eq!(env_usize_or("AUTHORKIT_TEST_SIZE", 7), 128);
    }
}
