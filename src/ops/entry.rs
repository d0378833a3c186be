//! Create, edit and delete diary entries.

use crate::constants::ENTRY_TIMESTAMP_FORMAT;
use crate::db::{EntryDraft, EntryPatch, EntryStore};
use crate::editor::{compose, Editor};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local};
use tracing::{debug, info};

/// Formats `moment` the way entries display their timestamps.
///
/// ```
/// use chrono::{Local, TimeZone};
/// use diario::ops::format_timestamp;
///
/// let moment = Local.with_ymd_and_hms(2026, 10, 19, 9, 5, 0).unwrap();
/// assert_eq!(format_timestamp(&moment), "19 Oct 2026, 09:05");
/// ```
pub fn format_timestamp(moment: &DateTime<Local>) -> String {
    moment.format(ENTRY_TIMESTAMP_FORMAT).to_string()
}

fn clean_title(title: &str) -> Option<String> {
    let trimmed = title.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn clean_body(body: &str) -> AppResult<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(AppError::Journal("Entry body cannot be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Stores a new entry and returns its id.
///
/// A `body` of `None` is composed in `editor`. Title and body are trimmed; a
/// blank title is stored as no title.
///
/// # Errors
///
/// Returns `AppError::Journal` for a blank body, and propagates editor and
/// database failures.
pub fn create_entry<S, E>(
    store: &S,
    editor: &E,
    title: Option<&str>,
    body: Option<&str>,
    now: &DateTime<Local>,
) -> AppResult<i64>
where
    S: EntryStore + ?Sized,
    E: Editor + ?Sized,
{
    let body = match body {
        Some(text) => text.to_string(),
        None => compose(editor, "")?,
    };

    let draft = EntryDraft {
        title: title.and_then(clean_title),
        body: clean_body(&body)?,
        created_at: format_timestamp(now),
    };

    let id = store.create(&draft)?;
    info!("Created entry {}", id);
    Ok(id)
}

/// Updates entry `id`, keeping its creation time and stamping the edit time.
///
/// When neither `title` nor `body` is given the current body is opened in
/// `editor`. A title given alone leaves the body untouched.
///
/// # Errors
///
/// Returns `DatabaseError::NotFound` (before any editor is opened) for an
/// unknown id and `AppError::Journal` for a blank body.
pub fn update_entry<S, E>(
    store: &S,
    editor: &E,
    id: i64,
    title: Option<&str>,
    body: Option<&str>,
    now: &DateTime<Local>,
) -> AppResult<()>
where
    S: EntryStore + ?Sized,
    E: Editor + ?Sized,
{
    let current = store.get(id)?;

    let body = match (body, title) {
        (Some(text), _) => Some(clean_body(text)?),
        (None, Some(_)) => None,
        (None, None) => Some(clean_body(&compose(editor, &current.body)?)?),
    };

    let patch = EntryPatch {
        title: title.map(clean_title),
        body,
        edited_at: format_timestamp(now),
    };

    debug!(
        "Patching entry {}: title={} body={}",
        id,
        patch.title.is_some(),
        patch.body.is_some()
    );
    store.update(id, &patch)?;
    info!("Updated entry {}", id);
    Ok(())
}

/// Deletes entry `id`.
pub fn delete_entry<S: EntryStore + ?Sized>(store: &S, id: i64) -> AppResult<()> {
    store.delete(id)?;
    info!("Deleted entry {}", id);
    Ok(())
}
