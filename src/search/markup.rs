//! Output dialects for the renderer.
//!
//! A dialect decides how raw text is made inert and how highlight, line-break
//! and paragraph markers look. The renderer escapes first and adds markers
//! afterwards, so markers are never escaped and text can never forge one.

use std::borrow::Cow;

/// How rendered text is escaped and marked up.
pub trait Markup {
    /// Makes `text` safe to embed in this dialect.
    fn escape<'a>(&self, text: &'a str) -> Cow<'a, str>;

    /// Opens a highlighted run.
    fn highlight_open(&self) -> &str;

    /// Closes a highlighted run.
    fn highlight_close(&self) -> &str;

    /// Marks a single line break inside a paragraph.
    fn line_break(&self) -> &str;

    /// Opens a paragraph container.
    fn paragraph_open(&self) -> &str;

    /// Closes a paragraph container.
    fn paragraph_close(&self) -> &str;
}

/// HTML fragments: `<span class="highlight">`, `<br>` and `<p>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Html;

/// Escapes the five HTML-significant characters.
///
/// ```
/// use diario::search::escape_html;
///
/// assert_eq!(escape_html("a < b & \"c\" 'd'"), "a &lt; b &amp; &quot;c&quot; &#39;d&#39;");
/// ```
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

impl Markup for Html {
    fn escape<'a>(&self, text: &'a str) -> Cow<'a, str> {
        escape_html(text)
    }

    fn highlight_open(&self) -> &str {
        r#"<span class="highlight">"#
    }

    fn highlight_close(&self) -> &str {
        "</span>"
    }

    fn line_break(&self) -> &str {
        "<br>"
    }

    fn paragraph_open(&self) -> &str {
        "<p>"
    }

    fn paragraph_close(&self) -> &str {
        "</p>"
    }
}

const ANSI_REVERSE_ON: &str = "\x1b[7m";
const ANSI_REVERSE_OFF: &str = "\x1b[27m";

/// Plain terminal text, optionally with reverse-video highlights.
///
/// Control characters other than tab are replaced with U+FFFD so entry text
/// cannot smuggle escape sequences into the terminal.
#[derive(Debug, Clone, Copy)]
pub struct Terminal {
    highlight: bool,
}

impl Terminal {
    /// A terminal dialect; `highlight` turns reverse-video markers on.
    pub fn new(highlight: bool) -> Self {
        Terminal { highlight }
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Terminal::new(true)
    }
}

impl Markup for Terminal {
    fn escape<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !text.chars().any(|c| c.is_control() && c != '\t') {
            return Cow::Borrowed(text);
        }
        Cow::Owned(
            text.chars()
                .map(|c| {
                    if c.is_control() && c != '\t' {
                        char::REPLACEMENT_CHARACTER
                    } else {
                        c
                    }
                })
                .collect(),
        )
    }

    fn highlight_open(&self) -> &str {
        if self.highlight {
            ANSI_REVERSE_ON
        } else {
            ""
        }
    }

    fn highlight_close(&self) -> &str {
        if self.highlight {
            ANSI_REVERSE_OFF
        } else {
            ""
        }
    }

    fn line_break(&self) -> &str {
        "\n"
    }

    fn paragraph_open(&self) -> &str {
        ""
    }

    fn paragraph_close(&self) -> &str {
        "\n"
    }
}
