//! Argument extraction from free-form messages
//!
//! Pure functions that turn a chat message into tool arguments. Patterns are
//! tried in a fixed order and the first one that matches wins; results from
//! different patterns are never combined.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*";

/// Operand patterns in priority order: `N + M`, `add N and M`,
/// `sum of N and M`, `N plus M`.
static OPERAND_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("plus_sign", r"(-?\d+)\s*\+\s*(-?\d+)"),
        ("add_and", r"(?i)\badd\s+(-?\d+)\s+and\s+(-?\d+)"),
        ("sum_of", r"(?i)\bsum\s+of\s+(-?\d+)\s+and\s+(-?\d+)"),
        ("plus_word", r"(?i)(-?\d+)\s+plus\s+(-?\d+)"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("valid operand pattern")))
    .collect()
});

static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"-?\d+").expect("valid integer pattern"));

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("valid email pattern"));

static EMAIL_EXACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^{}$", EMAIL_PATTERN)).expect("valid email pattern"));

/// Pull two integer operands for the `add` tool out of `text`.
///
/// Falls back to the first two integers anywhere in the text when none of
/// the phrasings match. Numbers that do not fit in an `i64` are ignored.
pub fn extract_addition_operands(text: &str) -> Option<(i64, i64)> {
    for (name, pattern) in OPERAND_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            if let (Ok(a), Ok(b)) = (caps[1].parse::<i64>(), caps[2].parse::<i64>()) {
                debug!(pattern = *name, a, b, "Matched addition operands");
                return Some((a, b));
            }
        }
    }

    let mut integers = INTEGER
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<i64>().ok());
    let a = integers.next()?;
    let b = integers.next()?;
    debug!(a, b, "Using first two integers as addition operands");
    Some((a, b))
}

/// First email address appearing in `text`
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}

/// Whether the whole of `text` is a single email address
pub fn is_valid_email(text: &str) -> bool {
    EMAIL_EXACT.is_match(text)
}

/// `text` with every email address blanked out
pub fn without_emails(text: &str) -> Cow<'_, str> {
    EMAIL.replace_all(text, " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_phrasing() {
        assert_eq!(extract_addition_operands("what is 2 + 3"), Some((2, 3)));
        assert_eq!(extract_addition_operands("2+3"), Some((2, 3)));
        assert_eq!(extract_addition_operands("Add 25 and 17"), Some((25, 17)));
        assert_eq!(extract_addition_operands("the SUM OF 4 and 6"), Some((4, 6)));
        assert_eq!(extract_addition_operands("10 plus 5"), Some((10, 5)));
        assert_eq!(extract_addition_operands("-4 + 9"), Some((-4, 9)));
    }

    #[test]
    fn test_first_pattern_wins() {
        // `add N and M` appears first in the text but `N + M` has priority
        assert_eq!(
            extract_addition_operands("add 1 and 2, then 30 + 40"),
            Some((30, 40))
        );
        assert_eq!(
            extract_addition_operands("8 plus 9 or the sum of 100 and 200"),
            Some((100, 200))
        );
        assert_eq!(
            extract_addition_operands("add 5 and 6 or the sum of 7 and 8"),
            Some((5, 6))
        );
    }

    #[test]
    fn test_fallback_to_first_two_integers() {
        assert_eq!(extract_addition_operands("what is 7 and 3 and 9"), Some((7, 3)));
        assert_eq!(extract_addition_operands("numbers 12, 13"), Some((12, 13)));
    }

    #[test]
    fn test_fewer_than_two_integers() {
        assert_eq!(extract_addition_operands("add 5"), None);
        assert_eq!(extract_addition_operands("please add things"), None);
        assert_eq!(extract_addition_operands(""), None);
    }

    #[test]
    fn test_overflowing_integers_are_ignored() {
        assert_eq!(
            extract_addition_operands("99999999999999999999 + 1 and 2 3"),
            Some((1, 2))
        );
    }

    #[test]
    fn test_extract_email() {
        assert_eq!(
            extract_email("reset password for a.b+c@test.co"),
            Some("a.b+c@test.co".to_string())
        );
        assert_eq!(
            extract_email("mail me at user@example.com."),
            Some("user@example.com".to_string())
        );
        assert_eq!(
            extract_email("email unknown@nowhere"),
            Some("unknown@nowhere".to_string())
        );
        assert_eq!(extract_email("no address here"), None);
        assert_eq!(extract_email("dangling user@"), None);
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("a.b+c@test.co"));
        assert!(is_valid_email("unknown@nowhere"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("user@example.com trailing"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_without_emails() {
        assert!(!without_emails("reset a.b+c@test.co").contains('+'));
        assert_eq!(without_emails("1 + 2"), "1 + 2");
    }
}
