//! Configuration management for the diario application.
//!
//! This module loads and validates configuration from environment variables,
//! with sensible defaults. It decides where the diary database lives and which
//! editor is used to compose entries.
//!
//! # Environment Variables
//!
//! - `DIARIO_DIR`: Path to the data directory (defaults to ~/Documents/diario)
//! - `DIARIO_EDITOR`: Editor used to compose entries
//! - `EDITOR`: Fallback editor if DIARIO_EDITOR is not set (defaults to "vim")
//! - `HOME`: Used for expanding the default data directory path

use crate::constants::{
    DATABASE_FILE_NAME, DEFAULT_DATA_SUBDIR, DEFAULT_EDITOR_COMMAND, EDITOR_FORBIDDEN_CHARS,
    ENV_VAR_DIARIO_DIR, ENV_VAR_DIARIO_EDITOR, ENV_VAR_EDITOR, ENV_VAR_HOME, REDACTED_PLACEHOLDER,
};
#[cfg(unix)]
use crate::constants::DEFAULT_DIR_PERMISSIONS;
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::debug;

/// Configuration for the diario application.
///
/// # Examples
///
/// ```
/// use diario::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     editor: "nano".to_string(),
///     data_dir: PathBuf::from("/path/to/diario"),
/// };
/// assert_eq!(config.db_path(), PathBuf::from("/path/to/diario/diario.db"));
/// ```
pub struct Config {
    /// Editor command used to compose entries.
    ///
    /// Loaded in order of precedence from `DIARIO_EDITOR`, then `EDITOR`,
    /// then "vim".
    pub editor: String,

    /// Directory holding the diary database and default exports.
    pub data_dir: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("editor", &REDACTED_PLACEHOLDER)
            .field("data_dir", &REDACTED_PLACEHOLDER)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            editor: DEFAULT_EDITOR_COMMAND.to_string(),
            data_dir: PathBuf::from(""),
        }
    }
}

impl Config {
    /// Validates an editor command string.
    ///
    /// The command must be non-empty and contain neither spaces nor shell
    /// metacharacters; it is executed directly, never through a shell.
    pub fn validate_editor_command(editor_cmd: &str) -> AppResult<&str> {
        if editor_cmd.is_empty() {
            return Err(AppError::Config(
                "Editor command cannot be empty".to_string(),
            ));
        }

        if editor_cmd.contains(' ') {
            return Err(AppError::Config(
                "Editor command cannot contain spaces. Use a wrapper script or shell alias for editors requiring arguments".to_string(),
            ));
        }

        if let Some(ch) = editor_cmd.chars().find(|c| EDITOR_FORBIDDEN_CHARS.contains(c)) {
            return Err(AppError::Config(format!(
                "Editor command cannot contain shell metacharacters: '{}'. Use a wrapper script or shell alias instead",
                ch
            )));
        }

        Ok(editor_cmd)
    }

    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The data directory path is expanded with `shellexpand`, so `~` and
    /// environment variable references work.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The data directory path expansion fails or yields an empty path
    /// - The editor command fails validation
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use diario::Config;
    ///
    /// match Config::load() {
    ///     Ok(config) => println!("Loaded config with editor: {}", config.editor),
    ///     Err(err) => eprintln!("Failed to load config: {}", err),
    /// }
    /// ```
    pub fn load() -> AppResult<Self> {
        let editor_raw = env::var(ENV_VAR_DIARIO_EDITOR)
            .or_else(|_| env::var(ENV_VAR_EDITOR))
            .unwrap_or_else(|_| DEFAULT_EDITOR_COMMAND.to_string());

        let editor = Config::validate_editor_command(&editor_raw)?;

        let data_dir_str = env::var(ENV_VAR_DIARIO_DIR).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, DEFAULT_DATA_SUBDIR)
        });

        let expanded_path = shellexpand::full(&data_dir_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;

        let data_dir = PathBuf::from(expanded_path.into_owned());

        if data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        Ok(Config {
            editor: editor.to_string(),
            data_dir,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Data directory path is empty"
    /// - "Editor command is empty"
    /// - "Data directory must be an absolute path"
    ///
    /// # Examples
    ///
    /// ```
    /// use diario::Config;
    /// use std::path::PathBuf;
    ///
    /// let valid_config = Config {
    ///     editor: "vim".to_string(),
    ///     data_dir: PathBuf::from("/absolute/path"),
    /// };
    /// assert!(valid_config.validate().is_ok());
    ///
    /// let invalid_config = Config {
    ///     editor: "vim".to_string(),
    ///     data_dir: PathBuf::from("relative/path"),
    /// };
    /// assert!(invalid_config.validate().is_err());
    /// ```
    pub fn validate(&self) -> AppResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        if self.editor.is_empty() {
            return Err(AppError::Config("Editor command is empty".to_string()));
        }

        if !self.data_dir.is_absolute() {
            return Err(AppError::Config(
                "Data directory must be an absolute path".to_string(),
            ));
        }

        Ok(())
    }

    /// Location of the diary database.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE_NAME)
    }

    /// Creates the data directory if it is missing, readable by the owner only.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for a relative path and `AppError::Io` if the
    /// directory cannot be created.
    pub fn ensure_data_dir(&self) -> AppResult<()> {
        let dir = &self.data_dir;
        if !dir.is_absolute() {
            return Err(AppError::Config(format!(
                "Data directory path must be absolute: {}",
                dir.display()
            )));
        }

        if dir.exists() {
            return Ok(());
        }

        fs::create_dir_all(dir).map_err(|e| {
            AppError::Io(io::Error::new(
                e.kind(),
                format!("Failed to create data directory: {}", e),
            ))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(dir, fs::Permissions::from_mode(DEFAULT_DIR_PERMISSIONS)).map_err(
                |e| {
                    AppError::Io(io::Error::new(
                        e.kind(),
                        format!("Failed to set permissions on data directory: {}", e),
                    ))
                },
            )?;
        }

        debug!("Created data directory");
        Ok(())
    }
}
