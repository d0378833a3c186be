//! Editor abstraction for composing entry bodies.
//!
//! Entry text that is not given on the command line is written in an external
//! editor through a temporary file. The `Editor` trait lets tests replace the
//! external process with a scripted one.

use crate::constants::{COMPOSE_FILE_PREFIX, COMPOSE_FILE_SUFFIX};
use crate::errors::{AppResult, EditorError};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Trait defining the interface for an editor component.
///
/// # Examples
///
/// ```
/// use diario::editor::{compose, Editor};
/// use diario::errors::AppResult;
/// use std::path::Path;
///
/// struct Appender;
///
/// impl Editor for Appender {
///     fn edit_file(&self, path: &Path) -> AppResult<()> {
///         let mut text = std::fs::read_to_string(path)?;
///         text.push_str(" y más");
///         std::fs::write(path, text)?;
///         Ok(())
///     }
/// }
///
/// assert_eq!(compose(&Appender, "café").unwrap(), "café y más");
/// ```
pub trait Editor {
    /// Lets the user edit `path` in place, returning once editing is finished.
    ///
    /// # Errors
    ///
    /// Implementations return `AppError::Editor` when the edit did not complete.
    fn edit_file(&self, path: &Path) -> AppResult<()>;
}

/// An editor that runs an external command with the file path as its argument.
///
/// # Examples
///
/// ```no_run
/// use diario::editor::{Editor, SystemEditor};
/// use std::path::Path;
///
/// let editor = SystemEditor {
///     editor_cmd: "vim".to_string(),
/// };
/// editor.edit_file(Path::new("/tmp/draft.txt")).expect("editor failed");
/// ```
pub struct SystemEditor {
    /// The command to run (e.g., "vim", "code", "nano").
    pub editor_cmd: String,
}

impl Editor for SystemEditor {
    /// Runs the editor and waits for it to exit.
    ///
    /// # Errors
    ///
    /// - `EditorError::CommandNotFound` if the editor command doesn't exist
    /// - `EditorError::PermissionDenied` if the command cannot be executed
    /// - `EditorError::ExecutionFailed` for other launch failures
    /// - `EditorError::NonZeroExit` if the editor exits with a non-zero status code
    fn edit_file(&self, path: &Path) -> AppResult<()> {
        debug!("Launching editor: {} {:?}", self.editor_cmd, path);

        match Command::new(&self.editor_cmd).arg(path).status() {
            Err(e) if e.kind() == ErrorKind::NotFound => Err(EditorError::CommandNotFound {
                command: self.editor_cmd.clone(),
                source: e,
            }
            .into()),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                Err(EditorError::PermissionDenied {
                    command: self.editor_cmd.clone(),
                    source: e,
                }
                .into())
            }
            Err(e) => Err(EditorError::ExecutionFailed {
                command: self.editor_cmd.clone(),
                source: e,
            }
            .into()),
            Ok(status) if !status.success() => Err(EditorError::NonZeroExit {
                command: self.editor_cmd.clone(),
                status_code: status.code().unwrap_or(-1),
            }
            .into()),
            Ok(_) => Ok(()),
        }
    }
}

/// Opens `initial` in `editor` and returns the text the user saved.
///
/// The temporary file is removed when this returns, whatever the outcome.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be written or read back, or
/// if the editor fails.
pub fn compose<E: Editor + ?Sized>(editor: &E, initial: &str) -> AppResult<String> {
    let mut file = tempfile::Builder::new()
        .prefix(COMPOSE_FILE_PREFIX)
        .suffix(COMPOSE_FILE_SUFFIX)
        .tempfile()?;
    file.write_all(initial.as_bytes())?;
    file.flush()?;

    editor.edit_file(file.path())?;

    let text = fs::read_to_string(file.path())?;
    debug!("Composed {} bytes", text.len());
    Ok(text)
}
