//! Console-injection sanitizing.
//!
//! Any value interpolated into a server console line must pass through
//! [`sanitize`] first. A quote would end the quoted argument early, a
//! semicolon would start a second command and a backslash would escape
//! the closing quote.

use std::borrow::Cow;

/// Characters replaced by [`sanitize`].
pub const UNSAFE_CHARS: [char; 3] = ['"', ';', '\\'];

/// Replace every `"`, `;` and `\` with a space.
///
/// The output has the same number of characters as the input.
pub fn sanitize(s: &str) -> Cow<'_, str> {
    if is_sanitized(s) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.chars()
            .map(|c| if UNSAFE_CHARS.contains(&c) { ' ' } else { c })
            .collect(),
    )
}

/// Check that `s` contains none of [`UNSAFE_CHARS`].
#[inline]
pub fn is_sanitized(s: &str) -> bool {
    !s.contains(UNSAFE_CHARS)
}
