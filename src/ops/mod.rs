//! High-level operations behind each command.
//!
//! These functions orchestrate the store, the editor and the search core.
//! They take their collaborators as trait objects or generics so tests can
//! run them against temporary databases and scripted editors.

pub mod entry;
pub mod export;
pub mod search;

pub use entry::{create_entry, delete_entry, format_timestamp, update_entry};
pub use export::{export_entries, export_file_name};
pub use search::{interactive_search, list_entries, search_entries, write_entries, OutputStyle};
