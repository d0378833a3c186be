//! Paragraph-aware, escaped, highlighted rendering of raw entry text.
//!
//! Rendering always starts from the raw text. The text is cut into paragraphs
//! on blank lines, every paragraph is cut into gaps and hits by the match
//! ranges, and each piece is escaped before any marker is placed around it.

use super::markup::{Html, Markup};
use super::matcher::{find_in_text, MatchRange};
use crate::constants::PARAGRAPH_SEPARATOR;

/// A raw slice of one paragraph, either between hits or inside one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span<'a> {
    Gap(&'a str),
    Hit(&'a str),
}

impl<'a> Span<'a> {
    pub fn text(&self) -> &'a str {
        match *self {
            Span::Gap(text) | Span::Hit(text) => text,
        }
    }
}

/// One piece of a rendered paragraph.
///
/// Text is already escaped and its line breaks are already break markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Highlighted(String),
}

/// The rendered content of one paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedFragment {
    pub segments: Vec<Segment>,
}

impl RenderedFragment {
    /// Whether any segment of this paragraph is highlighted.
    pub fn has_highlight(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::Highlighted(_)))
    }

    fn write_to<M: Markup + ?Sized>(&self, markup: &M, out: &mut String) {
        for segment in &self.segments {
            match segment {
                Segment::Plain(text) => out.push_str(text),
                Segment::Highlighted(text) => {
                    out.push_str(markup.highlight_open());
                    out.push_str(text);
                    out.push_str(markup.highlight_close());
                }
            }
        }
    }
}

/// Cuts `raw` into paragraphs and each paragraph into gaps and hits.
///
/// `matches` are byte ranges over the whole of `raw`, sorted and
/// non-overlapping. A range that runs across a blank-line separator is split
/// into one hit per paragraph it touches; the separator itself is never part of
/// a hit. Joining every span of every paragraph with the separator gives back
/// `raw` exactly.
///
/// ```
/// use diario::search::{paragraph_spans, MatchRange, Span};
///
/// let spans = paragraph_spans("ab\n\ncd", &[MatchRange::new(1, 5)]);
/// assert_eq!(spans[0], vec![Span::Gap("a"), Span::Hit("b")]);
/// assert_eq!(spans[1], vec![Span::Hit("c"), Span::Gap("d")]);
/// ```
pub fn paragraph_spans<'a>(raw: &'a str, matches: &[MatchRange]) -> Vec<Vec<Span<'a>>> {
    let mut paragraphs = Vec::new();
    let mut base = 0;
    let mut pending = matches.iter().peekable();

    for paragraph in raw.split(PARAGRAPH_SEPARATOR) {
        let end = base + paragraph.len();
        let mut spans = Vec::new();
        let mut cursor = 0;

        while let Some(m) = pending.peek() {
            if m.start >= end {
                break;
            }
            let start = clamp_to_boundary(paragraph, m.start.max(base) - base);
            let stop = clamp_to_boundary(paragraph, m.end.min(end).saturating_sub(base));

            if start >= cursor && start < stop {
                if start > cursor {
                    spans.push(Span::Gap(&paragraph[cursor..start]));
                }
                spans.push(Span::Hit(&paragraph[start..stop]));
                cursor = stop;
            }

            if m.end > end {
                // Continues in the next paragraph.
                break;
            }
            pending.next();
        }

        if cursor < paragraph.len() {
            spans.push(Span::Gap(&paragraph[cursor..]));
        }

        paragraphs.push(spans);
        base = end + PARAGRAPH_SEPARATOR.len();
    }

    paragraphs
}

/// Rounds `offset` down to a char boundary of `text`, capped at its length.
fn clamp_to_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Escapes one span line by line, then joins the lines with break markers.
///
/// A `\r` directly before a `\n` belongs to the line break.
fn escape_lines<M: Markup + ?Sized>(markup: &M, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut lines = text.split('\n').peekable();
    let mut first = true;
    while let Some(line) = lines.next() {
        if !first {
            out.push_str(markup.line_break());
        }
        first = false;
        let line = match lines.peek() {
            Some(_) => line.strip_suffix('\r').unwrap_or(line),
            None => line,
        };
        out.push_str(&markup.escape(line));
    }
    out
}

/// Renders every paragraph of `raw` into escaped segments.
pub fn fragments<M: Markup + ?Sized>(
    markup: &M,
    raw: &str,
    matches: &[MatchRange],
) -> Vec<RenderedFragment> {
    paragraph_spans(raw, matches)
        .into_iter()
        .map(|spans| RenderedFragment {
            segments: spans
                .into_iter()
                .map(|span| match span {
                    Span::Gap(text) => Segment::Plain(escape_lines(markup, text)),
                    Span::Hit(text) => Segment::Highlighted(escape_lines(markup, text)),
                })
                .collect(),
        })
        .collect()
}

/// Renders `raw` in the given dialect.
///
/// With `wrap_paragraphs`, every paragraph sits in its own container; without
/// it, paragraphs are joined by two line-break markers.
pub fn render_with<M: Markup + ?Sized>(
    markup: &M,
    raw: &str,
    matches: &[MatchRange],
    wrap_paragraphs: bool,
) -> String {
    let mut out = String::with_capacity(raw.len() + raw.len() / 4);

    for (index, fragment) in fragments(markup, raw, matches).iter().enumerate() {
        if wrap_paragraphs {
            out.push_str(markup.paragraph_open());
            fragment.write_to(markup, &mut out);
            out.push_str(markup.paragraph_close());
        } else {
            if index > 0 {
                out.push_str(markup.line_break());
                out.push_str(markup.line_break());
            }
            fragment.write_to(markup, &mut out);
        }
    }

    out
}

/// Renders `raw` as HTML with `matches` highlighted.
///
/// ```
/// use diario::search::render;
///
/// assert_eq!(render("Hello\n\nWorld", &[], true), "<p>Hello</p><p>World</p>");
/// assert_eq!(render("a<b\nc", &[], false), "a&lt;b<br>c");
/// ```
pub fn render(raw: &str, matches: &[MatchRange], wrap_paragraphs: bool) -> String {
    render_with(&Html, raw, matches, wrap_paragraphs)
}

/// Finds `query` in `raw` and renders the result as HTML.
///
/// Missing text renders like empty text.
///
/// ```
/// use diario::search::render_query;
///
/// assert_eq!(
///     render_query(Some("Él comió"), "comio", true),
///     r#"<p>Él <span class="highlight">comió</span></p>"#
/// );
/// assert_eq!(render_query(None, "x", true), "<p></p>");
/// ```
pub fn render_query(raw: Option<&str>, query: &str, wrap_paragraphs: bool) -> String {
    let raw = raw.unwrap_or_default();
    let matches = find_in_text(raw, query);
    render(raw, &matches, wrap_paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::markup::Terminal;

    const MARKUP_CHARS: [char; 5] = ['&', '<', '>', '"', '\''];

    fn reconstruct(spans: &[Vec<Span<'_>>]) -> String {
        spans
            .iter()
            .map(|paragraph| paragraph.iter().map(Span::text).collect::<String>())
            .collect::<Vec<_>>()
            .join(PARAGRAPH_SEPARATOR)
    }

    /// Removes the markers this module inserts and the entities it produces,
    /// leaving only characters that came from the raw text.
    fn strip_known_markup(html: &str) -> String {
        html.replace(r#"<span class="highlight">"#, "")
            .replace("</span>", "")
            .replace("<br>", "")
            .replace("<p>", "")
            .replace("</p>", "")
            .replace("&amp;", "")
            .replace("&lt;", "")
            .replace("&gt;", "")
            .replace("&quot;", "")
            .replace("&#39;", "")
    }

    #[test]
    fn test_two_paragraphs_without_matches() {
        assert_eq!(render("Hello\n\nWorld", &[], true), "<p>Hello</p><p>World</p>");
    }

    #[test]
    fn test_unwrapped_paragraphs_join_with_breaks() {
        assert_eq!(render("Hello\n\nWorld", &[], false), "Hello<br><br>World");
    }

    #[test]
    fn test_line_breaks_become_markers() {
        assert_eq!(render("one\ntwo", &[], true), "<p>one<br>two</p>");
    }

    #[test]
    fn test_crlf_line_breaks() {
        assert_eq!(render("uno\r\ndos", &[], true), "<p>uno<br>dos</p>");

        let plain = render_with(&Terminal::new(false), "uno\r\n\r\ndos", &[], false);
        assert_eq!(plain, "uno\n\ndos");
        assert!(!plain.contains('\u{FFFD}'));

        // A carriage return that does not end a line is still neutralized.
        let lone = render_with(&Terminal::new(false), "a\rb", &[], false);
        assert_eq!(lone, "a\u{FFFD}b");
    }

    #[test]
    fn test_crlf_inside_highlight() {
        let raw = "uno\r\ndos";
        let html = render_query(Some(raw), "o\r\nd", true);
        assert_eq!(
            html,
            r#"<p>un<span class="highlight">o<br>d</span>os</p>"#
        );
    }

    #[test]
    fn test_highlight_keeps_original_accents() {
        let raw = "Fui al café. CAFÉ otra vez.";
        let html = render_query(Some(raw), "cafe", true);
        assert_eq!(
            html,
            r#"<p>Fui al <span class="highlight">café</span>. <span class="highlight">CAFÉ</span> otra vez.</p>"#
        );
    }

    #[test]
    fn test_highlight_in_second_paragraph() {
        let raw = "primero\n\nsegundo día";
        let html = render_query(Some(raw), "dia", true);
        assert_eq!(
            html,
            r#"<p>primero</p><p>segundo <span class="highlight">día</span></p>"#
        );
    }

    #[test]
    fn test_match_text_is_escaped_inside_marker() {
        let html = render_query(Some("x <b> y"), "<b>", false);
        assert_eq!(html, r#"x <span class="highlight">&lt;b&gt;</span> y"#);
    }

    #[test]
    fn test_match_containing_line_break() {
        let html = render_query(Some("uno\ndos"), "o\nd", true);
        assert_eq!(
            html,
            r#"<p>un<span class="highlight">o<br>d</span>os</p>"#
        );
    }

    #[test]
    fn test_range_across_paragraphs_is_split() {
        let raw = "ab\n\ncd";
        let html = render(raw, &[MatchRange::new(1, 5)], true);
        assert_eq!(
            html,
            r#"<p>a<span class="highlight">b</span></p><p><span class="highlight">c</span>d</p>"#
        );
    }

    #[test]
    fn test_every_match_wrapped_once() {
        let raw = "sí, si, SI\n\nsi";
        let matches = find_in_text(raw, "si");
        assert_eq!(matches.len(), 4);
        let html = render(raw, &matches, true);
        assert_eq!(html.matches(r#"<span class="highlight">"#).count(), 4);
        assert_eq!(html.matches("</span>").count(), 4);
    }

    #[test]
    fn test_no_unescaped_markup_characters() {
        let samples = [
            "<script>alert('x')</script>",
            "Tom & \"Jerry\"\n\n<i>it's</i>",
            "a<b>c&d'e\"f",
        ];
        for raw in samples {
            for query in ["", "script", "<", "&", "'", "\"", "it"] {
                let matches = find_in_text(raw, query);
                for wrap in [true, false] {
                    let stripped = strip_known_markup(&render(raw, &matches, wrap));
                    assert!(
                        !stripped.contains(MARKUP_CHARS),
                        "unescaped markup for {:?} / {:?}: {:?}",
                        raw,
                        query,
                        stripped
                    );
                }
            }
        }
    }

    #[test]
    fn test_spans_reconstruct_raw() {
        let samples = [
            "",
            "single",
            "Hello\n\nWorld",
            "a\n\n\nb",
            "\n\nleading and trailing\n\n",
            "café CAFÉ cafe\nmañana\n\nMAÑANA",
        ];
        for raw in samples {
            for query in ["", "a", "cafe", "manana", "\n", "na"] {
                let matches = find_in_text(raw, query);
                let spans = paragraph_spans(raw, &matches);
                assert_eq!(reconstruct(&spans), raw, "query {:?}", query);
            }
        }
    }

    #[test]
    fn test_out_of_range_matches_do_not_panic() {
        let raw = "ñu";
        let html = render(raw, &[MatchRange::new(1, 40)], false);
        assert!(html.contains("ñ"));
        let spans = paragraph_spans(raw, &[MatchRange::new(1, 40)]);
        assert_eq!(reconstruct(&spans), raw);
    }

    #[test]
    fn test_empty_raw() {
        assert_eq!(render("", &[], true), "<p></p>");
        assert_eq!(render("", &[], false), "");
        assert_eq!(render_query(None, "", false), "");
    }

    #[test]
    fn test_fragments_expose_segments() {
        let raw = "a&b\nc";
        let fragments = fragments(&Html, raw, &find_in_text(raw, "c"));
        assert_eq!(fragments.len(), 1);
        assert_eq!(
            fragments[0].segments,
            vec![
                Segment::Plain("a&amp;b<br>".to_string()),
                Segment::Highlighted("c".to_string()),
            ]
        );
        assert!(fragments[0].has_highlight());
    }

    #[test]
    fn test_terminal_dialect() {
        let raw = "Hola mundo\n\nadiós";
        let matches = find_in_text(raw, "adios");
        let plain = render_with(&Terminal::new(false), raw, &matches, false);
        assert_eq!(plain, "Hola mundo\n\nadiós");

        let colored = render_with(&Terminal::new(true), raw, &matches, false);
        assert!(colored.contains("\x1b[7madiós\x1b[27m"));
    }
}
