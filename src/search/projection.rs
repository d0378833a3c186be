//! Normalized projection of a text with back-references into the source.
//!
//! Matching happens on the folded text, highlighting happens on the source.
//! The projection keeps two arrays parallel to the bytes of the folded text so
//! a byte range found in the folded text can be mapped back to a byte range
//! of the source without re-scanning it.

use super::normalize::normalize_char_into;

/// A folded copy of a text plus, for every folded byte, the source character
/// that produced it.
///
/// Invariants:
/// - `normalized.len() == index_map.len() == origin_ends.len()`
/// - both arrays are non-decreasing
/// - `index_map[k]` and `origin_ends[k]` are char boundaries of the source
///   with `index_map[k] < origin_ends[k]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedProjection {
    /// Lowercased text without diacritics.
    pub normalized: String,
    /// Source byte offset of the character behind each folded byte.
    pub index_map: Vec<usize>,
    /// Source byte offset just past the character behind each folded byte.
    pub origin_ends: Vec<usize>,
}

impl NormalizedProjection {
    /// Length of the folded text in bytes.
    pub fn len(&self) -> usize {
        self.normalized.len()
    }

    /// Whether the folded text is empty.
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// Builds the projection of `text` one character at a time.
///
/// Characters are folded individually, not per grapheme cluster: a base letter
/// followed by a separate combining accent maps the letter to itself and the
/// accent to nothing.
///
/// ```
/// use diario::search::build_projection;
///
/// let projection = build_projection("Año");
/// assert_eq!(projection.normalized, "ano");
/// // 'ñ' is two bytes in the source and starts at byte 1.
/// assert_eq!(projection.index_map, vec![0, 1, 3]);
/// assert_eq!(projection.origin_ends, vec![1, 3, 4]);
/// ```
pub fn build_projection(text: &str) -> NormalizedProjection {
    let mut projection = NormalizedProjection {
        normalized: String::with_capacity(text.len()),
        index_map: Vec::with_capacity(text.len()),
        origin_ends: Vec::with_capacity(text.len()),
    };

    for (offset, ch) in text.char_indices() {
        let before = projection.normalized.len();
        normalize_char_into(ch, &mut projection.normalized);
        let produced = projection.normalized.len() - before;

        let end = offset + ch.len_utf8();
        projection
            .index_map
            .extend(std::iter::repeat(offset).take(produced));
        projection
            .origin_ends
            .extend(std::iter::repeat(end).take(produced));
    }

    projection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::normalize::normalize;

    fn assert_invariants(text: &str, projection: &NormalizedProjection) {
        assert_eq!(projection.normalized.len(), projection.index_map.len());
        assert_eq!(projection.normalized.len(), projection.origin_ends.len());
        for window in projection.index_map.windows(2) {
            assert!(window[0] <= window[1], "index_map decreases for {:?}", text);
        }
        for window in projection.origin_ends.windows(2) {
            assert!(window[0] <= window[1], "origin_ends decreases for {:?}", text);
        }
        for (&start, &end) in projection.index_map.iter().zip(&projection.origin_ends) {
            assert!(start < end);
            assert!(text.is_char_boundary(start));
            assert!(text.is_char_boundary(end));
            assert!(end <= text.len());
        }
    }

    #[test]
    fn test_ascii_is_identity_mapping() {
        let projection = build_projection("Hello");
        assert_eq!(projection.normalized, "hello");
        assert_eq!(projection.index_map, vec![0, 1, 2, 3, 4]);
        assert_eq!(projection.origin_ends, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_precomposed_accent_maps_to_one_byte() {
        let text = "café";
        let projection = build_projection(text);
        assert_eq!(projection.normalized, "cafe");
        assert_eq!(projection.index_map, vec![0, 1, 2, 3]);
        assert_eq!(projection.origin_ends, vec![1, 2, 3, 5]);
        assert_invariants(text, &projection);
    }

    #[test]
    fn test_decomposed_accent_contributes_nothing() {
        let text = "cafe\u{0301}!";
        let projection = build_projection(text);
        assert_eq!(projection.normalized, "cafe!");
        // The combining acute occupies bytes 4..6 and is skipped.
        assert_eq!(projection.index_map, vec![0, 1, 2, 3, 6]);
        assert_invariants(text, &projection);
    }

    #[test]
    fn test_multibyte_output_repeats_origin() {
        let text = "a한";
        let projection = build_projection(text);
        // The syllable decomposes into three jamo of three bytes each.
        assert_eq!(projection.normalized.len(), 1 + 9);
        assert!(projection.index_map[1..].iter().all(|&i| i == 1));
        assert!(projection.origin_ends[1..].iter().all(|&e| e == 4));
        assert_invariants(text, &projection);
    }

    #[test]
    fn test_empty_text() {
        let projection = build_projection("");
        assert!(projection.is_empty());
        assert_eq!(projection.len(), 0);
        assert!(projection.index_map.is_empty());
    }

    #[test]
    fn test_agrees_with_normalize_on_precomposed_text() {
        for text in ["Ñandú", "ÉCOLE normale", "İzmir", "Straße\n\nzwei"] {
            let projection = build_projection(text);
            assert_eq!(projection.normalized, normalize(text));
            assert_invariants(text, &projection);
        }
    }
}
