//! ASCII case-insensitive string operations.
//!
//! Engine command names, player names and credentials are compared
//! byte-wise with ASCII folding only. There is no locale dependency:
//! non-ASCII bytes must match exactly.

use std::cmp::Ordering;

/// Fold a single byte to ASCII lowercase.
#[inline]
const fn fold(b: u8) -> u8 {
    b.to_ascii_lowercase()
}

/// Compare two strings for equality, ignoring ASCII case.
#[inline]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Check whether `haystack` contains `needle`, ignoring ASCII case.
///
/// An empty needle is contained in every haystack.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let (h, n) = (haystack.as_bytes(), needle.as_bytes());
    if n.is_empty() {
        return true;
    }
    if n.len() > h.len() {
        return false;
    }

    h.windows(n.len())
        .any(|w| w.iter().zip(n).all(|(a, b)| fold(*a) == fold(*b)))
}

/// Order two strings as if both were ASCII-lowercased first.
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.bytes().map(fold).cmp(b.bytes().map(fold))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq_ignore_case() {
        assert!(eq_ignore_case("admin_kick", "ADMIN_KICK"));
        assert!(eq_ignore_case("", ""));
        assert!(!eq_ignore_case("admin_kick", "admin_kickslot"));
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("BobbyTables", "bob"));
        assert!(contains_ignore_case("BobbyTables", "TABLES"));
        assert!(contains_ignore_case("anything", ""));
        assert!(contains_ignore_case("", ""));
        assert!(!contains_ignore_case("", "a"));
        assert!(!contains_ignore_case("Bob", "Bobby"));
    }

    #[test]
    fn test_non_ascii_is_not_folded() {
        assert!(!eq_ignore_case("Ä", "ä"));
        assert!(contains_ignore_case("xÄx", "Ä"));
    }

    #[test]
    fn test_cmp_ignore_case() {
        assert_eq!(cmp_ignore_case("abc", "ABC"), Ordering::Equal);
        assert_eq!(cmp_ignore_case("Abc", "abd"), Ordering::Less);
        assert_eq!(cmp_ignore_case("b", "A"), Ordering::Greater);
        assert_eq!(cmp_ignore_case("ab", "AB c"), Ordering::Less);
    }
}
