//! Literal quoting
//!
//! This is not an escaping routine. Values reaching the driver are already
//! escaped by the query layer; the only job here is to undo the extra level of
//! backslash escaping that legacy input sanitisation adds. Modern
//! configurations pass strings through untouched.

use std::borrow::Cow;

/// Prepare a literal for interpolation into generated SQL text.
///
/// With `legacy` unset this is the identity and never allocates.
pub fn quote(value: &str, legacy: bool) -> Cow<'_, str> {
    if !legacy || !value.contains('\\') {
        return Cow::Borrowed(value);
    }
    Cow::Owned(strip_slashes(value))
}

/// Remove one level of backslash escaping: `\x` becomes `x`, `\\` becomes `\`.
/// A trailing lone backslash is dropped.
fn strip_slashes(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modern_mode_is_identity() {
        let input = r"O\'Reilly \\ path";
        assert!(matches!(quote(input, false), Cow::Borrowed(s) if s == input));
    }

    #[test]
    fn test_legacy_mode_strips_one_level() {
        assert_eq!(quote(r"O\'Reilly", true), "O'Reilly");
        assert_eq!(quote(r#"say \"hi\""#, true), r#"say "hi""#);
        assert_eq!(quote(r"C:\\temp", true), r"C:\temp");
        assert_eq!(quote("trailing\\", true), "trailing");
    }

    #[test]
    fn test_legacy_mode_without_backslashes_borrows() {
        assert!(matches!(quote("plain", true), Cow::Borrowed("plain")));
    }
}
