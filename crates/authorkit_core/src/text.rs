//! Shared text helpers.
//!
//! Offsets handled here are counted in `char`s (Unicode scalar values).

/// Return `true` when `value` is empty or whitespace-only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Trim an optional string and drop empty values.
///
/// # Returns
/// `None` when the input is missing or whitespace-only; otherwise the trimmed
/// string.
pub fn normalize_optional_nonempty(value: Option<&str>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Split a multi-line value into trimmed, non-empty lines in order.
///
/// Handles both `\n` and `\r\n` line endings.
pub fn non_empty_lines(value: &str) -> Vec<String> {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a boolean-like flag.
///
/// Truthy: `1`, `true`, `yes`, `on`. Falsy: `0`, `false`, `no`, `off`, empty.
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Length of `value` in chars.
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Convert a char offset into a byte offset.
///
/// # Returns
/// `None` when `char_index` lies past the end of `value`; an offset equal to
/// the char length maps to `value.len()`.
pub fn byte_offset(value: &str, char_index: usize) -> Option<usize> {
    if char_index == 0 {
        return Some(0);
    }
    value
        .char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(value.len()))
        .nth(char_index)
}

/// Convert a UTF-16 code-unit offset (as reported by browser and JVM text
/// controls) into the char offset the editor operations take.
///
/// # Returns
/// `None` when `utf16_index` lies past the end of `value` or between the two
/// halves of a surrogate pair.
pub fn char_offset_from_utf16(value: &str, utf16_index: usize) -> Option<usize> {
    let mut units = 0;
    for (chars, ch) in value.chars().enumerate() {
        if units == utf16_index {
            return Some(chars);
        }
        units += ch.len_utf16();
        if units > utf16_index {
            return None;
        }
    }
    (units == utf16_index).then(|| char_len(value))
}

/// Convert a char offset back into UTF-16 code units.
///
/// # Returns
/// `None` when `char_index` lies past the end of `value`.
pub fn utf16_offset(value: &str, char_index: usize) -> Option<usize> {
    let end = byte_offset(value, char_index)?;
    Some(value[..end].encode_utf16().count())
}

#[cfg(test)]
mod tests {
    use super::{
        byte_offset, char_len, char_offset_from_utf16, is_blank, non_empty_lines,
        normalize_optional_nonempty, utf16_offset,
    };

    #[test]
    fn normalize_optional_nonempty_trims_and_drops_blank() {
        assert_eq!(
            normalize_optional_nonempty(Some("  value  ")),
            Some("value".to_string())
        );
        assert_eq!(normalize_optional_nonempty(Some("   ")), None);
        assert_eq!(normalize_optional_nonempty(None), None);
    }

    #[test]
    fn is_blank_treats_whitespace_as_empty() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\n"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn non_empty_lines_trims_and_skips_blank_lines() {
        assert_eq!(
            non_empty_lines("  first \r\n\n   \nsecond\n"),
            vec!["first".to_string(), "second".to_string()]
        );
        assert!(non_empty_lines("").is_empty());
    }

    #[test]
    fn byte_offset_counts_chars_not_bytes() {
        let value = "héllo";
        assert_eq!(char_len(value), 5);
        assert_eq!(byte_offset(value, 0), Some(0));
        assert_eq!(byte_offset(value, 2), Some(3));
        assert_eq!(byte_offset(value, 5), Some(value.len()));
        assert_eq!(byte_offset(value, 6), None);
        assert_eq!(byte_offset("", 0), Some(0));
        assert_eq!(byte_offset("", 1), None);
    }

    #[test]
    fn utf16_offsets_map_around_surrogate_pairs() {
        // U+1F600 is one char but two UTF-16 code units.
        let value = "a\u{1F600}b";
        assert_eq!(char_offset_from_utf16(value, 0), Some(0));
        assert_eq!(char_offset_from_utf16(value, 1), Some(1));
        assert_eq!(char_offset_from_utf16(value, 2), None);
        assert_eq!(char_offset_from_utf16(value, 3), Some(2));
        assert_eq!(char_offset_from_utf16(value, 4), Some(3));
        assert_eq!(char_offset_from_utf16(value, 5), None);
        assert_eq!(char_offset_from_utf16("", 0), Some(0));

        assert_eq!(utf16_offset(value, 2), Some(3));
        assert_eq!(utf16_offset(value, 3), Some(4));
        assert_eq!(utf16_offset(value, 4), None);
    }
}
