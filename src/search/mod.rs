//! Accent-insensitive search and highlighted rendering of diary entries.
//!
//! The pipeline runs leaves first:
//!
//! - `normalize`: folds accents and case for comparison
//! - `projection`: folded text with a back-reference per folded byte
//! - `matcher`: non-overlapping occurrences as ranges of the original text
//! - `render` / `markup`: escaped, paragraph-aware output with highlights
//! - `controller`: entry visibility and highlighting for a query
//!
//! Everything here is pure and synchronous. Each call allocates its own
//! projection, ranges and output, and the original text is always the source
//! of what gets displayed.
//!
//! # Example
//!
//! ```
//! use diario::search::{build_projection, find_matches, render};
//!
//! let body = "Hoy fui al café.\n\nMañana, otro CAFÉ.";
//! let matches = find_matches(&build_projection(body), "cafe");
//! let html = render(body, &matches, true);
//!
//! assert_eq!(
//!     html,
//!     "<p>Hoy fui al <span class=\"highlight\">café</span>.</p>\
//!      <p>Mañana, otro <span class=\"highlight\">CAFÉ</span>.</p>"
//! );
//! ```

pub mod controller;
pub mod markup;
pub mod matcher;
pub mod normalize;
pub mod projection;
pub mod render;

pub use controller::{search_entries, EntryView, SearchController};
pub use markup::{escape_html, Html, Markup, Terminal};
pub use matcher::{find_in_text, find_matches, matches_query, normalize_query, MatchRange};
pub use normalize::{is_diacritic, normalize};
pub use projection::{build_projection, NormalizedProjection};
pub use render::{
    fragments, paragraph_spans, render, render_query, render_with, RenderedFragment, Segment, Span,
};
