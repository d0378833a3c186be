//! Entry CRUD operations.
//!
//! This module provides functions for creating, reading, updating, deleting
//! and listing diary entries, plus the `EntryStore` trait implemented by
//! [`Database`](super::Database).

use super::Database;
use crate::errors::{AppResult, DatabaseError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A persisted diary entry.
///
/// The serialized field names are the ones used by exported documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub title: Option<String>,
    pub body: String,
    /// Creation time, formatted for display.
    #[serde(rename = "date")]
    pub created_at: String,
    /// Last edit time, formatted for display.
    #[serde(rename = "editedDate", default, skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<String>,
}

impl Entry {
    /// The line shown under the title: creation time plus edit time if any.
    pub fn date_line(&self) -> String {
        match &self.edited_at {
            Some(edited) => format!("{} (edited {})", self.created_at, edited),
            None => self.created_at.clone(),
        }
    }
}

/// A new entry before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub title: Option<String>,
    pub body: String,
    pub created_at: String,
}

/// A partial update. `created_at` is never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPatch {
    /// `None` keeps the current title; `Some(None)` removes it.
    pub title: Option<Option<String>>,
    /// `None` keeps the current body.
    pub body: Option<String>,
    pub edited_at: String,
}

/// Storage operations the application needs for entries.
pub trait EntryStore {
    /// Stores a new entry and returns its id.
    fn create(&self, draft: &EntryDraft) -> AppResult<i64>;

    /// Applies a partial update to an existing entry.
    fn update(&self, id: i64, patch: &EntryPatch) -> AppResult<()>;

    /// Removes an entry.
    fn delete(&self, id: i64) -> AppResult<()>;

    /// Fetches one entry.
    fn get(&self, id: i64) -> AppResult<Entry>;

    /// Every entry, newest first.
    fn list_all(&self) -> AppResult<Vec<Entry>>;
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
        created_at: row.get(3)?,
        edited_at: row.get(4)?,
    })
}

/// Inserts an entry and returns its id.
///
/// # Errors
///
/// Returns an error if the database operation fails, including a blank body
/// rejected by the schema.
pub fn insert_entry(conn: &Connection, draft: &EntryDraft) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO entries (title, body, created_at) VALUES (?1, ?2, ?3)",
        params![draft.title, draft.body, draft.created_at],
    )
    .map_err(DatabaseError::Sqlite)?;

    let id = conn.last_insert_rowid();
    debug!("Entry inserted with id {}", id);
    Ok(id)
}

/// Applies `patch` to entry `id`.
///
/// # Errors
///
/// Returns `DatabaseError::NotFound` if no entry has that id.
pub fn update_entry(conn: &Connection, id: i64, patch: &EntryPatch) -> AppResult<()> {
    debug!("Updating entry {}", id);

    let replace_title = patch.title.is_some();
    let new_title = patch.title.clone().flatten();

    let changed = conn
        .execute(
            r#"
            UPDATE entries SET
                title = CASE WHEN ?2 THEN ?3 ELSE title END,
                body = COALESCE(?4, body),
                edited_at = ?5
            WHERE id = ?1
            "#,
            params![id, replace_title, new_title, patch.body, patch.edited_at],
        )
        .map_err(DatabaseError::Sqlite)?;

    if changed == 0 {
        return Err(DatabaseError::NotFound(id).into());
    }
    Ok(())
}

/// Deletes entry `id`.
///
/// # Errors
///
/// Returns `DatabaseError::NotFound` if no entry has that id.
pub fn delete_entry(conn: &Connection, id: i64) -> AppResult<()> {
    debug!("Deleting entry {}", id);

    let changed = conn
        .execute("DELETE FROM entries WHERE id = ?1", params![id])
        .map_err(DatabaseError::Sqlite)?;

    if changed == 0 {
        return Err(DatabaseError::NotFound(id).into());
    }
    Ok(())
}

/// Retrieves an entry by id.
///
/// Returns `Ok(None)` if no entry has that id.
pub fn get_entry(conn: &Connection, id: i64) -> AppResult<Option<Entry>> {
    conn.query_row(
        "SELECT id, title, body, created_at, edited_at FROM entries WHERE id = ?1",
        params![id],
        entry_from_row,
    )
    .optional()
    .map_err(|e| DatabaseError::Sqlite(e).into())
}

/// Lists every entry, most recently created first.
pub fn list_entries(conn: &Connection) -> AppResult<Vec<Entry>> {
    let mut stmt = conn
        .prepare("SELECT id, title, body, created_at, edited_at FROM entries ORDER BY id DESC")
        .map_err(DatabaseError::Sqlite)?;

    let entries = stmt
        .query_map([], entry_from_row)
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;

    debug!("Listed {} entries", entries.len());
    Ok(entries)
}

impl EntryStore for Database {
    fn create(&self, draft: &EntryDraft) -> AppResult<i64> {
        let conn = self.get_conn()?;
        insert_entry(&conn, draft)
    }

    fn update(&self, id: i64, patch: &EntryPatch) -> AppResult<()> {
        let conn = self.get_conn()?;
        update_entry(&conn, id, patch)
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.get_conn()?;
        delete_entry(&conn, id)
    }

    fn get(&self, id: i64) -> AppResult<Entry> {
        let conn = self.get_conn()?;
        get_entry(&conn, id)?.ok_or_else(|| DatabaseError::NotFound(id).into())
    }

    fn list_all(&self) -> AppResult<Vec<Entry>> {
        let conn = self.get_conn()?;
        list_entries(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use tempfile::TempDir;

    fn setup_db() -> (TempDir, Database) {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::open(&temp_dir.path().join("test.db")).unwrap();
        db.initialize_schema().unwrap();
        (temp_dir, db)
    }

    fn draft(title: Option<&str>, body: &str) -> EntryDraft {
        EntryDraft {
            title: title.map(str::to_string),
            body: body.to_string(),
            created_at: "01 Jan 2026, 08:00".to_string(),
        }
    }

    #[test]
    fn test_create_and_get() {
        let (_dir, db) = setup_db();

        let id = db.create(&draft(Some("Lunes"), "Primer día")).unwrap();
        let entry = db.get(id).unwrap();

        assert_eq!(entry.id, id);
        assert_eq!(entry.title.as_deref(), Some("Lunes"));
        assert_eq!(entry.body, "Primer día");
        assert_eq!(entry.created_at, "01 Jan 2026, 08:00");
        assert_eq!(entry.edited_at, None);
    }

    #[test]
    fn test_list_all_newest_first() {
        let (_dir, db) = setup_db();

        let first = db.create(&draft(None, "uno")).unwrap();
        let second = db.create(&draft(None, "dos")).unwrap();
        let third = db.create(&draft(None, "tres")).unwrap();

        let ids: Vec<i64> = db.list_all().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![third, second, first]);
    }

    #[test]
    fn test_update_keeps_created_at_and_sets_edited_at() {
        let (_dir, db) = setup_db();
        let id = db.create(&draft(Some("Título"), "antes")).unwrap();

        db.update(
            id,
            &EntryPatch {
                title: None,
                body: Some("después".to_string()),
                edited_at: "02 Jan 2026, 09:30".to_string(),
            },
        )
        .unwrap();

        let entry = db.get(id).unwrap();
        assert_eq!(entry.title.as_deref(), Some("Título"));
        assert_eq!(entry.body, "después");
        assert_eq!(entry.created_at, "01 Jan 2026, 08:00");
        assert_eq!(entry.edited_at.as_deref(), Some("02 Jan 2026, 09:30"));
    }

    #[test]
    fn test_update_can_clear_title() {
        let (_dir, db) = setup_db();
        let id = db.create(&draft(Some("Borrar"), "cuerpo")).unwrap();

        db.update(
            id,
            &EntryPatch {
                title: Some(None),
                body: None,
                edited_at: "later".to_string(),
            },
        )
        .unwrap();

        let entry = db.get(id).unwrap();
        assert_eq!(entry.title, None);
        assert_eq!(entry.body, "cuerpo");
    }

    #[test]
    fn test_update_missing_entry() {
        let (_dir, db) = setup_db();
        let result = db.update(
            99,
            &EntryPatch {
                title: None,
                body: Some("x".to_string()),
                edited_at: "now".to_string(),
            },
        );
        assert!(matches!(
            result,
            Err(AppError::Database(DatabaseError::NotFound(99)))
        ));
    }

    #[test]
    fn test_delete() {
        let (_dir, db) = setup_db();
        let id = db.create(&draft(None, "efímero")).unwrap();

        db.delete(id).unwrap();

        assert!(db.list_all().unwrap().is_empty());
        assert!(matches!(
            db.get(id),
            Err(AppError::Database(DatabaseError::NotFound(_)))
        ));
        assert!(db.delete(id).is_err());
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let (_dir, db) = setup_db();
        let first = db.create(&draft(None, "uno")).unwrap();
        db.delete(first).unwrap();
        let second = db.create(&draft(None, "dos")).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_date_line() {
        let mut entry = Entry {
            id: 1,
            title: None,
            body: "b".to_string(),
            created_at: "01 Jan 2026, 08:00".to_string(),
            edited_at: None,
        };
        assert_eq!(entry.date_line(), "01 Jan 2026, 08:00");

        entry.edited_at = Some("03 Jan 2026, 10:15".to_string());
        assert_eq!(
            entry.date_line(),
            "01 Jan 2026, 08:00 (edited 03 Jan 2026, 10:15)"
        );
    }

    #[test]
    fn test_entry_serializes_with_export_keys() {
        let entry = Entry {
            id: 4,
            title: Some("T".to_string()),
            body: "B".to_string(),
            created_at: "c".to_string(),
            edited_at: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "c");
        assert!(json.get("editedDate").is_none());
        assert!(json.get("created_at").is_none());
    }
}
