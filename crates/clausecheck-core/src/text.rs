//! Character-bounded truncation for model inputs.
//!
//! Limits are counted in Unicode scalar values, not bytes, so a cut never
//! lands inside a multi-byte character.

/// Maximum characters of contract text sent to counterparty identification.
pub const IDENTIFY_CHAR_LIMIT: usize = 20_000;

/// Maximum characters of the new draft sent to clause comparison.
pub const COMPARE_CHAR_LIMIT: usize = 50_000;

/// Return the prefix of `s` holding at most `max_chars` characters.
///
/// Borrowed from the input; no allocation.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorter_input_unchanged() {
        assert_eq!(truncate_chars("Acme Corp", 20), "Acme Corp");
    }

    #[test]
    fn exact_length_unchanged() {
        assert_eq!(truncate_chars("abcde", 5), "abcde");
    }

    #[test]
    fn cut_at_limit() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
    }

    #[test]
    fn zero_limit() {
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn multibyte_counted_as_characters() {
        // "§" is two bytes, "€" is three.
        let s = "§1 €5,000 cap";
        assert_eq!(truncate_chars(s, 4), "§1 €");
        assert_eq!(truncate_chars(s, 4).chars().count(), 4);
    }

    #[test]
    fn identify_limit_is_exact() {
        let long = "x".repeat(IDENTIFY_CHAR_LIMIT + 10);
        assert_eq!(
            truncate_chars(&long, IDENTIFY_CHAR_LIMIT).chars().count(),
            IDENTIFY_CHAR_LIMIT
        );
    }
}
