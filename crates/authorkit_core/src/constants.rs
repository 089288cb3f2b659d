//! Shared constants used across authorkit crates.

/// Default upper bound, in bytes, for buffers and form payloads read by tools.
pub const DEFAULT_MAX_INPUT_SIZE: usize = 10 * 1024 * 1024;

/// Placeholder target inserted by link and image actions.
pub const LINK_PLACEHOLDER_URL: &str = "url";

/// Message used by email rules when the caller does not supply one.
pub const DEFAULT_EMAIL_MESSAGE: &str = "Please enter a valid email address";

/// Largest markdown heading level.
pub const MAX_HEADING_LEVEL: u8 = 6;
