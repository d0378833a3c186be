//! Accent- and case-insensitive occurrence search.

use super::normalize::normalize;
use super::projection::{build_projection, NormalizedProjection};
use serde::Serialize;
use std::ops::Range;

/// A half-open byte range `[start, end)` of the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MatchRange {
    pub start: usize,
    pub end: usize,
}

impl MatchRange {
    pub fn new(start: usize, end: usize) -> Self {
        MatchRange { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Folds a user query the way the searchable text is folded.
///
/// Surrounding whitespace is ignored, so a whitespace-only query, or one made
/// only of combining accents, folds to the empty string.
pub fn normalize_query(query: &str) -> String {
    normalize(query.trim())
}

/// Finds every non-overlapping occurrence of `query` in the projected text.
///
/// The scan runs left to right over the folded text and resumes right after
/// each hit. Hits are translated back to byte ranges of the source, in strictly
/// increasing order. An empty folded query yields no ranges.
///
/// ```
/// use diario::search::{build_projection, find_matches, MatchRange};
///
/// let text = "café CAFÉ cafe";
/// let matches = find_matches(&build_projection(text), "cafe");
/// assert_eq!(
///     matches,
///     vec![MatchRange::new(0, 5), MatchRange::new(6, 11), MatchRange::new(12, 16)]
/// );
/// assert_eq!(&text[6..11], "CAFÉ");
/// ```
pub fn find_matches(projection: &NormalizedProjection, query: &str) -> Vec<MatchRange> {
    let needle = normalize_query(query);
    find_normalized(projection, &needle)
}

/// Same as [`find_matches`] for a needle that is already folded.
pub(crate) fn find_normalized(projection: &NormalizedProjection, needle: &str) -> Vec<MatchRange> {
    let mut matches: Vec<MatchRange> = Vec::new();
    if needle.is_empty() {
        return matches;
    }

    // The projection is lowercase by construction, so it is searched as is;
    // folding it again could change its byte length and desync the maps.
    let haystack = projection.normalized.as_str();
    let needle_len = needle.len();
    let mut cursor = 0;

    while let Some(found) = haystack[cursor..].find(needle) {
        let idx = cursor + found;
        let start = projection.index_map[idx];
        let end = projection.origin_ends[idx + needle_len - 1];
        cursor = idx + needle_len;

        // Two hits inside one expanded source character map to the same
        // source bytes; fold them into a single range.
        match matches.last_mut() {
            Some(previous) if start < previous.end => {
                previous.end = previous.end.max(end);
            }
            _ => matches.push(MatchRange::new(start, end)),
        }
    }

    matches
}

/// Whether the folded `text` contains the folded `query`.
///
/// An empty folded query never matches.
pub fn matches_query(text: &str, query: &str) -> bool {
    let needle = normalize_query(query);
    !needle.is_empty() && normalize(text).contains(&needle)
}

/// Convenience for `find_matches(&build_projection(text), query)`.
pub fn find_in_text(text: &str, query: &str) -> Vec<MatchRange> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return Vec::new();
    }
    find_normalized(&build_projection(text), &needle)
}
