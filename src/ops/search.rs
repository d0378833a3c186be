//! Listing and searching entries for display.
//!
//! Entries are loaded once per command and every query runs through a
//! [`SearchController`], so output is always rendered from the stored text.

use crate::constants::{ENTRY_SEPARATOR_RULE, INTERACTIVE_QUIT_COMMAND};
use crate::db::{Entry, EntryStore};
use crate::errors::AppResult;
use crate::search::{EntryView, Html, Markup, SearchController, Terminal};
use std::io::{BufRead, Write};
use tracing::{debug, info};

const INTERACTIVE_PROMPT: &str = "search> ";

/// How entries are printed.
#[derive(Debug, Clone, Copy)]
pub enum OutputStyle {
    /// Plain text for a terminal, highlights per the dialect.
    Terminal(Terminal),
    /// One HTML fragment per entry.
    Html,
}

fn write_terminal_entry<W: Write>(
    out: &mut W,
    terminal: &Terminal,
    entry: &Entry,
    view: &EntryView,
) -> AppResult<()> {
    match view.render_title(terminal, entry) {
        Some(title) => writeln!(out, "#{}  {}", entry.id, title)?,
        None => writeln!(out, "#{}", entry.id)?,
    }
    writeln!(out, "{}", terminal.escape(&entry.date_line()))?;
    writeln!(out)?;
    writeln!(out, "{}", view.render_body(terminal, entry, false))?;
    if view.separator_visible {
        writeln!(out, "{}", ENTRY_SEPARATOR_RULE)?;
    }
    Ok(())
}

fn write_html_entry<W: Write>(out: &mut W, entry: &Entry, view: &EntryView) -> AppResult<()> {
    writeln!(out, r#"<article class="entry" id="entry-{}">"#, entry.id)?;
    if let Some(title) = view.render_title(&Html, entry) {
        writeln!(out, r#"<h2 class="entry-title">{}</h2>"#, title)?;
    }
    writeln!(
        out,
        r#"<p class="entry-date">{}</p>"#,
        Html.escape(&entry.date_line())
    )?;
    writeln!(
        out,
        r#"<div class="entry-body">{}</div>"#,
        view.render_body(&Html, entry, true)
    )?;
    writeln!(out, "</article>")?;
    if view.separator_visible {
        writeln!(out, "<hr>")?;
    }
    Ok(())
}

/// Writes the entries the controller currently shows and returns how many.
pub fn write_entries<W: Write>(
    out: &mut W,
    entries: &[Entry],
    controller: &SearchController,
    style: OutputStyle,
) -> AppResult<usize> {
    let mut written = 0;
    for (entry, view) in controller.visible(entries) {
        match style {
            OutputStyle::Terminal(terminal) => write_terminal_entry(out, &terminal, entry, view)?,
            OutputStyle::Html => write_html_entry(out, entry, view)?,
        }
        written += 1;
    }
    Ok(written)
}

fn write_summary<W: Write>(
    out: &mut W,
    controller: &SearchController,
    total: usize,
    style: OutputStyle,
) -> AppResult<()> {
    if let OutputStyle::Terminal(_) = style {
        match controller.visible_count() {
            0 => writeln!(out, "No entries match \"{}\".", controller.query().trim())?,
            shown => writeln!(out, "{} of {} entries match.", shown, total)?,
        }
    }
    Ok(())
}

/// Prints every entry, newest first, without highlights.
pub fn list_entries<S, W>(store: &S, out: &mut W, style: OutputStyle) -> AppResult<usize>
where
    S: EntryStore + ?Sized,
    W: Write,
{
    let entries = store.list_all()?;
    if entries.is_empty() {
        if let OutputStyle::Terminal(_) = style {
            writeln!(out, "No entries yet. Run `diario new` to write one.")?;
        }
        return Ok(0);
    }

    let mut controller = SearchController::new();
    controller.set_query("", &entries);
    let written = write_entries(out, &entries, &controller, style)?;
    info!("Listed {} entries", written);
    Ok(written)
}

/// Prints the entries matching `query` with their matches highlighted.
///
/// Returns the number of entries shown.
pub fn search_entries<S, W>(
    store: &S,
    out: &mut W,
    query: &str,
    style: OutputStyle,
) -> AppResult<usize>
where
    S: EntryStore + ?Sized,
    W: Write,
{
    let entries = store.list_all()?;
    let mut controller = SearchController::new();
    controller.set_query(query, &entries);

    let written = write_entries(out, &entries, &controller, style)?;
    write_summary(out, &controller, entries.len(), style)?;
    info!("Search shown {} of {} entries", written, entries.len());
    Ok(written)
}

/// Reads queries from `input` one line at a time and prints results for each.
///
/// Stops at end of input or on a line reading `:q`. Every line is a fresh
/// query over the same loaded entries; an empty line shows everything.
pub fn interactive_search<S, R, W>(
    store: &S,
    mut input: R,
    out: &mut W,
    style: OutputStyle,
) -> AppResult<()>
where
    S: EntryStore + ?Sized,
    R: BufRead,
    W: Write,
{
    let entries = store.list_all()?;
    let mut controller = SearchController::new();
    let mut line = String::new();

    loop {
        write!(out, "{}", INTERACTIVE_PROMPT)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let query = line.trim_end_matches(['\n', '\r']);
        if query.trim() == INTERACTIVE_QUIT_COMMAND {
            break;
        }

        debug!("Interactive query received");
        controller.set_query(query, &entries);
        write_entries(out, &entries, &controller, style)?;
        write_summary(out, &controller, entries.len(), style)?;
    }

    Ok(())
}
