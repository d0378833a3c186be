//! Export all entries as a JSON document.

use crate::constants::{DATE_FORMAT_ISO, EXPORT_FILE_EXTENSION, EXPORT_FILE_PREFIX};
use crate::db::EntryStore;
use crate::errors::AppResult;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// The export file name for `day`, e.g. `diario_2026-10-19.json`.
pub fn export_file_name(day: NaiveDate) -> String {
    format!(
        "{}{}{}",
        EXPORT_FILE_PREFIX,
        day.format(DATE_FORMAT_ISO),
        EXPORT_FILE_EXTENSION
    )
}

/// Writes every entry to `<dir>/diario_<today>.json` and returns the path.
///
/// The document is a pretty-printed array of records with `id`, `title`,
/// `body`, `date` and, for edited entries, `editedDate`. An existing export
/// from the same day is replaced.
///
/// # Errors
///
/// Returns an error if entries cannot be read, serialized, or written.
pub fn export_entries<S: EntryStore + ?Sized>(
    store: &S,
    dir: &Path,
    today: NaiveDate,
) -> AppResult<PathBuf> {
    let entries = store.list_all()?;
    let document = serde_json::to_string_pretty(&entries)?;

    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(today));
    fs::write(&path, document)?;

    info!("Exported {} entries to {:?}", entries.len(), path);
    Ok(path)
}
