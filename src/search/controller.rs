//! Per-entry visibility and highlighting for a query.
//!
//! Every run starts from the raw entries and produces fresh view state, so
//! nothing from an earlier query can leak into the next one.

use super::markup::Markup;
use super::matcher::{find_normalized, matches_query, normalize_query, MatchRange};
use super::projection::build_projection;
use super::render::render_with;
use crate::db::Entry;
use tracing::debug;

/// What one displayed entry looks like for the current query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub id: i64,
    pub visible: bool,
    /// The rule drawn after the entry follows the entry's visibility.
    pub separator_visible: bool,
    /// Highlighted title ranges; empty unless the title matched.
    pub title_matches: Vec<MatchRange>,
    /// Highlighted body ranges; empty unless the body matched.
    pub body_matches: Vec<MatchRange>,
}

impl EntryView {
    pub fn title_matched(&self) -> bool {
        !self.title_matches.is_empty()
    }

    pub fn body_matched(&self) -> bool {
        !self.body_matches.is_empty()
    }

    /// Renders the entry title inline, or `None` for an untitled entry.
    pub fn render_title<M: Markup + ?Sized>(&self, markup: &M, entry: &Entry) -> Option<String> {
        entry
            .title
            .as_deref()
            .map(|title| render_with(markup, title, &self.title_matches, false))
    }

    /// Renders the entry body from its raw text.
    pub fn render_body<M: Markup + ?Sized>(
        &self,
        markup: &M,
        entry: &Entry,
        wrap_paragraphs: bool,
    ) -> String {
        render_with(markup, &entry.body, &self.body_matches, wrap_paragraphs)
    }
}

/// Computes the view of every entry for `query`.
///
/// An empty query (after trimming and folding) shows every entry without
/// highlights. Otherwise an entry is shown when its title or its body contains
/// the query; only the parts that matched carry highlight ranges.
pub fn search_entries(query: &str, entries: &[Entry]) -> Vec<EntryView> {
    let needle = normalize_query(query);

    if needle.is_empty() {
        return entries
            .iter()
            .map(|entry| EntryView {
                id: entry.id,
                visible: true,
                separator_visible: true,
                title_matches: Vec::new(),
                body_matches: Vec::new(),
            })
            .collect();
    }

    entries
        .iter()
        .map(|entry| {
            let title = entry.title.as_deref().unwrap_or_default();
            let title_match = matches_query(title, query);
            let title_matches = if title_match {
                find_normalized(&build_projection(title), &needle)
            } else {
                Vec::new()
            };
            let body_matches = find_normalized(&build_projection(&entry.body), &needle);

            // Containment decides the title; its ranges only drive highlighting.
            let visible = title_match || !body_matches.is_empty();
            EntryView {
                id: entry.id,
                visible,
                separator_visible: visible,
                title_matches,
                body_matches,
            }
        })
        .collect()
}

/// Holds the current query and the views it produced.
///
/// `set_query` throws away the previous views before computing new ones.
#[derive(Debug, Default)]
pub struct SearchController {
    query: String,
    views: Vec<EntryView>,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-runs the search for `query` over `entries`.
    pub fn set_query(&mut self, query: &str, entries: &[Entry]) -> &[EntryView] {
        self.query = query.to_string();
        self.views = search_entries(query, entries);
        debug!(
            "Search matched {} of {} entries",
            self.visible_count(),
            self.views.len()
        );
        &self.views
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn views(&self) -> &[EntryView] {
        &self.views
    }

    pub fn visible_count(&self) -> usize {
        self.views.iter().filter(|view| view.visible).count()
    }

    /// Visible entries paired with their views, in display order.
    pub fn visible<'a>(
        &'a self,
        entries: &'a [Entry],
    ) -> impl Iterator<Item = (&'a Entry, &'a EntryView)> {
        entries
            .iter()
            .zip(&self.views)
            .filter(|(entry, view)| view.visible && entry.id == view.id)
    }
}
