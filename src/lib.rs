/*!
# Diario

Diario is a local-first diary for the command line. Entries are stored in a
SQLite database on your machine and can be searched without worrying about
accents or case: "cafe" finds "Café", and "resume" finds "résumé".

## Core Features

- Write, edit and delete entries, composing text in your own editor
- List entries newest first
- Accent- and case-insensitive search with highlighted matches
- HTML rendering that escapes entry text and keeps paragraph structure
- Export to a dated JSON document

## Architecture

- `search`: Text folding, offset mapping, match finding and safe rendering
- `db`: SQLite storage behind the `EntryStore` trait
- `ops`: The operation behind each command
- `editor`: External editor integration
- `cli`: Command-line interface handling using clap
- `config`: Configuration loading and validation
- `errors`: Error handling infrastructure

## Usage Example

```rust,no_run
use diario::db::Database;
use diario::ops::{search_entries, OutputStyle};
use diario::search::Terminal;
use diario::Config;

fn main() -> diario::AppResult<()> {
    let config = Config::load()?;
    let db = Database::open(&config.db_path())?;
    db.initialize_schema()?;

    let mut stdout = std::io::stdout();
    search_entries(&db, &mut stdout, "cafe", OutputStyle::Terminal(Terminal::default()))?;
    Ok(())
}
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Persistent storage for entries
pub mod db;
/// External editor integration
pub mod editor;
/// Error types and utilities for error handling
pub mod errors;
/// Operations behind each command
pub mod ops;
/// Accent-insensitive search and highlighted rendering
pub mod search;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use db::{Database, Entry, EntryStore};
pub use errors::{AppError, AppResult};
