//! Command-line interface definitions.

use crate::constants::{APP_DESCRIPTION, APP_NAME};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// A local-first diary with accent-insensitive search
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION, author, version, long_about = None)]
pub struct CliArgs {
    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// When to highlight matches in terminal output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, global = true)]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Write a new entry
    New {
        /// Entry title
        #[arg(short, long)]
        title: Option<String>,

        /// Entry body; opens the editor when omitted
        #[arg(short, long)]
        body: Option<String>,
    },

    /// Change an existing entry
    Edit {
        /// Entry id, as shown by `list`
        id: i64,

        /// New title; an empty string removes it
        #[arg(short, long)]
        title: Option<String>,

        /// New body; opens the editor on the current body when neither
        /// this nor --title is given
        #[arg(short, long)]
        body: Option<String>,
    },

    /// Delete an entry
    Delete {
        /// Entry id, as shown by `list`
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show every entry, newest first
    List {
        /// Print HTML fragments instead of terminal text
        #[arg(long)]
        html: bool,
    },

    /// Find entries regardless of accents and case
    Search {
        /// Text to look for; starts an interactive prompt when omitted
        query: Option<String>,

        /// Print HTML fragments instead of terminal text
        #[arg(long)]
        html: bool,
    },

    /// Write all entries to a dated JSON file
    Export {
        /// Directory for the export (defaults to the data directory)
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolves the choice given whether stdout is a terminal.
    pub fn enabled(self, stdout_is_terminal: bool) -> bool {
        match self {
            ColorChoice::Auto => stdout_is_terminal,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_title_and_body() {
        let args = CliArgs::parse_from(["diario", "new", "-t", "Lunes", "--body", "Hola"]);
        assert_eq!(
            args.command,
            Commands::New {
                title: Some("Lunes".to_string()),
                body: Some("Hola".to_string()),
            }
        );
        assert!(!args.verbose);
        assert_eq!(args.log_format, LogFormat::Text);
        assert_eq!(args.color, ColorChoice::Auto);
    }

    #[test]
    fn test_new_without_body() {
        let args = CliArgs::parse_from(["diario", "new"]);
        assert_eq!(
            args.command,
            Commands::New {
                title: None,
                body: None
            }
        );
    }

    #[test]
    fn test_edit_requires_numeric_id() {
        let args = CliArgs::parse_from(["diario", "edit", "7", "--title", ""]);
        assert_eq!(
            args.command,
            Commands::Edit {
                id: 7,
                title: Some(String::new()),
                body: None,
            }
        );

        assert!(CliArgs::try_parse_from(["diario", "edit", "seven"]).is_err());
        assert!(CliArgs::try_parse_from(["diario", "edit"]).is_err());
    }

    #[test]
    fn test_delete_flags() {
        let args = CliArgs::parse_from(["diario", "delete", "3", "-y"]);
        assert_eq!(args.command, Commands::Delete { id: 3, yes: true });
    }

    #[test]
    fn test_search_query_is_optional() {
        let args = CliArgs::parse_from(["diario", "search", "café", "--html"]);
        assert_eq!(
            args.command,
            Commands::Search {
                query: Some("café".to_string()),
                html: true,
            }
        );

        let args = CliArgs::parse_from(["diario", "search"]);
        assert_eq!(
            args.command,
            Commands::Search {
                query: None,
                html: false,
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::parse_from([
            "diario",
            "list",
            "--verbose",
            "--log-format",
            "json",
            "--color",
            "never",
        ]);
        assert!(args.verbose);
        assert_eq!(args.log_format, LogFormat::Json);
        assert_eq!(args.color, ColorChoice::Never);
        assert_eq!(args.command, Commands::List { html: false });
    }

    #[test]
    fn test_invalid_log_format() {
        assert!(CliArgs::try_parse_from(["diario", "--log-format", "xml", "list"]).is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(CliArgs::try_parse_from(["diario"]).is_err());
    }

    #[test]
    fn test_export_output_dir() {
        let args = CliArgs::parse_from(["diario", "export", "-o", "/tmp/out"]);
        assert_eq!(
            args.command,
            Commands::Export {
                output_dir: Some(PathBuf::from("/tmp/out")),
            }
        );
    }

    #[test]
    fn test_color_choice_resolution() {
        assert!(ColorChoice::Auto.enabled(true));
        assert!(!ColorChoice::Auto.enabled(false));
        assert!(ColorChoice::Always.enabled(false));
        assert!(!ColorChoice::Never.enabled(true));
    }
}
