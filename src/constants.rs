//! Constants used throughout the application.
//!
//! This module contains all constants used in the diario application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "diario";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A local-first diary with accent-insensitive search";

// CLI Arguments & Defaults
/// Default command for the editor if not specified otherwise.
pub const DEFAULT_EDITOR_COMMAND: &str = "vim";
/// Default log level when RUST_LOG is unset.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// Configuration Keys & Environment Variables
/// Environment variable for specifying the diary data directory.
pub const ENV_VAR_DIARIO_DIR: &str = "DIARIO_DIR";
/// Environment variable for specifying the preferred diario editor.
pub const ENV_VAR_DIARIO_EDITOR: &str = "DIARIO_EDITOR";
/// Standard environment variable for specifying the default editor.
pub const ENV_VAR_EDITOR: &str = "EDITOR";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory name for the diary within the user's home directory.
pub const DEFAULT_DATA_SUBDIR: &str = "Documents/diario";

// Validation
/// Characters forbidden in editor commands for security reasons.
pub const EDITOR_FORBIDDEN_CHARS: &[char] =
    &['|', '&', ';', '$', '(', ')', '`', '\\', '<', '>', '\'', '"'];
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Storage
/// File name of the SQLite database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "diario.db";
/// Maximum number of pooled database connections.
pub const DATABASE_POOL_SIZE: u32 = 4;
/// How long a connection waits on a locked database before failing.
pub const DATABASE_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Default POSIX permissions for the data directory (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;

// Date/Time Formatting
/// Display format for creation and edit timestamps ("19 Oct 2026, 14:05").
pub const ENTRY_TIMESTAMP_FORMAT: &str = "%d %b %Y, %H:%M";
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";

// Export
/// File name prefix of exported documents; the ISO date and extension follow.
pub const EXPORT_FILE_PREFIX: &str = "diario_";
/// File extension of exported documents.
pub const EXPORT_FILE_EXTENSION: &str = ".json";

// Composing
/// Prefix for temporary files handed to the editor.
pub const COMPOSE_FILE_PREFIX: &str = "diario-";
/// Extension for temporary files handed to the editor.
pub const COMPOSE_FILE_SUFFIX: &str = ".txt";

// Search & Rendering
/// Paragraph separator inside entry bodies.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";
/// Rule printed between entries in terminal output.
pub const ENTRY_SEPARATOR_RULE: &str = "────────────────────────────────────────";
/// Input that leaves the interactive search loop.
pub const INTERACTIVE_QUIT_COMMAND: &str = ":q";

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "diario";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
