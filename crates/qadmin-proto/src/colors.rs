//! Engine color-code handling.
//!
//! id Tech 3 derived engines embed two-character color escapes in player
//! names: the escape marker `^` followed by one code character
//! (`^1Red^7Dog`). Engines without color codes pass `None` as the escape
//! and names are returned untouched.

use std::borrow::Cow;

/// Escape marker used by id Tech 3 derived engines.
pub const COLOR_ESCAPE: char = '^';

/// Remove every escape sequence from `name`.
///
/// An escape marker followed by any character drops both. A marker that
/// ends the string has nothing to escape and is kept as-is.
///
/// Returns `Cow::Borrowed` when nothing was removed.
pub fn strip_codes(name: &str, escape: Option<char>) -> Cow<'_, str> {
    let Some(escape) = escape else {
        return Cow::Borrowed(name);
    };
    if !name.contains(escape) {
        return Cow::Borrowed(name);
    }

    let mut result = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if c == escape && chars.peek().is_some() {
            chars.next();
            continue;
        }
        result.push(c);
    }

    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_basic() {
        assert_eq!(strip_codes("^1Red^7Dog", Some('^')), "RedDog");
        assert_eq!(strip_codes("^^7x", Some('^')), "7x");
    }

    #[test]
    fn test_trailing_escape_kept() {
        assert_eq!(strip_codes("name^", Some('^')), "name^");
        assert_eq!(strip_codes("^", Some('^')), "^");
        assert_eq!(strip_codes("^1^", Some('^')), "^");
    }

    #[test]
    fn test_no_escape_is_identity() {
        match strip_codes("^1Red", None) {
            Cow::Borrowed(b) => assert_eq!(b, "^1Red"),
            Cow::Owned(_) => panic!("expected borrowed"),
        }
    }

    #[test]
    fn test_plain_is_borrowed() {
        assert!(matches!(strip_codes("plain", Some('^')), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_multibyte_code_char() {
        assert_eq!(strip_codes("a^éb", Some('^')), "ab");
    }
}
