//! Diacritic and case folding for comparisons.

use unicode_normalization::UnicodeNormalization;

/// Returns `true` for characters in the Combining Diacritical Marks block
/// (U+0300..=U+036F), the accents stripped before comparing text.
pub fn is_diacritic(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036F}')
}

/// Folds `text` for comparison: canonical decomposition, accents removed,
/// lowercased.
///
/// Lowercasing can expose a new combining mark (`İ` lowercases to `i` followed
/// by U+0307), so the result is decomposed and filtered a second time. This keeps
/// `normalize(normalize(s)) == normalize(s)`.
///
/// ```
/// use diario::search::normalize;
///
/// assert_eq!(normalize("Résumé"), "resume");
/// assert_eq!(normalize("ÉCOLE"), "ecole");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_diacritic(*c))
        .flat_map(char::to_lowercase)
        .nfd()
        .filter(|c| !is_diacritic(*c))
        .collect()
}

/// Folds a single character, appending the result to `out`.
///
/// Produces the same characters as `normalize` applied to a one-character
/// string; a bare combining mark produces nothing.
pub(crate) fn normalize_char_into(ch: char, out: &mut String) {
    let folded = std::iter::once(ch)
        .nfd()
        .filter(|c| !is_diacritic(*c))
        .flat_map(char::to_lowercase)
        .nfd()
        .filter(|c| !is_diacritic(*c));
    out.extend(folded);
}
