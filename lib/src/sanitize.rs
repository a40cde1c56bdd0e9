//! Turns arbitrary labels (region names, federations, ages, ...) into fragments that can be
//! appended to a prefixed name such as `:Region_<fragment>`.

use std::fmt::Display;
use unicode_normalization::UnicodeNormalization;

/// Sanitizes a label into a URI fragment made only of `[A-Za-z0-9_]`.
///
/// Values that are not text are formatted with their `Display` representation first, so an
/// integer age of `17` becomes `"17"`. The text is then decomposed (NFD) and every non-ASCII
/// code point is dropped, which strips diacritics from accented letters. Spaces become
/// underscores and any other character outside `[A-Za-z0-9_]` is removed. Case is preserved.
///
/// The result may be empty; two different labels may map to the same fragment.
pub fn clean_uri(value: impl Display) -> String {
    value
        .to_string()
        .nfd()
        .filter(char::is_ascii)
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Returns true when `fragment` is already a valid output of [`clean_uri`].
pub fn is_clean(fragment: &str) -> bool {
    fragment
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
}
