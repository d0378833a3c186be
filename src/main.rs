/*!
# Diario - A Local-First Diary

This file contains the application flow: it parses arguments, sets up
logging, loads configuration, opens the database and dispatches to the
operation for the chosen command.

## Usage

```text
diario [OPTIONS] <COMMAND>

Commands:
  new     Write a new entry
  edit    Change an existing entry
  delete  Delete an entry
  list    Show every entry, newest first
  search  Find entries regardless of accents and case
  export  Write all entries to a dated JSON file

Options:
  -v, --verbose                  Enable debug logging
      --log-format <LOG_FORMAT>  Log output format [default: text] [possible values: text, json]
      --color <COLOR>            When to highlight matches in terminal output [default: auto]
```

## Configuration

- `DIARIO_EDITOR` or `EDITOR`: The editor used to compose entries (defaults to "vim")
- `DIARIO_DIR`: The data directory (defaults to "~/Documents/diario")
- `RUST_LOG`: Log filter (defaults to "warn")
*/

use chrono::Local;
use clap::Parser;
use diario::cli::{CliArgs, Commands, LogFormat};
use diario::constants::{DEFAULT_LOG_LEVEL, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME};
use diario::db::{Database, EntryStore};
use diario::editor::SystemEditor;
use diario::errors::AppResult;
use diario::ops::{self, OutputStyle};
use diario::search::{Markup, Terminal};
use diario::Config;
use std::io::{self, BufRead, IsTerminal, Write};
use std::process;
use tracing::{debug, info, info_span};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

/// Installs the global subscriber. Logs go to stderr so stdout stays clean
/// for entry output.
fn init_tracing(format: LogFormat, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    };

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(false).with_writer(io::stderr))
            .init(),
    }
}

/// Asks on the terminal before deleting; anything but y/yes declines.
fn confirm_delete(id: i64, title: Option<&str>) -> AppResult<bool> {
    let label = title
        .map(|t| format!(" \"{}\"", Terminal::new(false).escape(t)))
        .unwrap_or_default();
    print!("Delete entry #{}{}? [y/N] ", id, label);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn output_style(args: &CliArgs, html: bool) -> OutputStyle {
    if html {
        OutputStyle::Html
    } else {
        let highlight = args.color.enabled(io::stdout().is_terminal());
        OutputStyle::Terminal(Terminal::new(highlight))
    }
}

fn run(args: CliArgs) -> AppResult<()> {
    let config = Config::load()?;
    config.validate()?;
    config.ensure_data_dir()?;
    debug!("Configuration loaded: {:?}", config);

    let db = Database::open(&config.db_path())?;
    db.initialize_schema()?;

    let now = Local::now();
    let editor = SystemEditor {
        editor_cmd: config.editor.clone(),
    };
    let stdout = io::stdout();

    match &args.command {
        Commands::New { title, body } => {
            let id = ops::create_entry(&db, &editor, title.as_deref(), body.as_deref(), &now)?;
            println!("Created entry #{}", id);
        }
        Commands::Edit { id, title, body } => {
            ops::update_entry(&db, &editor, *id, title.as_deref(), body.as_deref(), &now)?;
            println!("Updated entry #{}", id);
        }
        Commands::Delete { id, yes } => {
            let entry = db.get(*id)?;
            if !*yes && !confirm_delete(entry.id, entry.title.as_deref())? {
                println!("Cancelled.");
                return Ok(());
            }
            ops::delete_entry(&db, *id)?;
            println!("Deleted entry #{}", id);
        }
        Commands::List { html } => {
            let style = output_style(&args, *html);
            ops::list_entries(&db, &mut stdout.lock(), style)?;
        }
        Commands::Search { query, html } => {
            let style = output_style(&args, *html);
            match query {
                Some(query) => {
                    ops::search_entries(&db, &mut stdout.lock(), query, style)?;
                }
                None => {
                    ops::interactive_search(&db, io::stdin().lock(), &mut stdout.lock(), style)?;
                }
            }
        }
        Commands::Export { output_dir } => {
            let dir = output_dir.as_deref().unwrap_or(config.data_dir.as_path());
            let path = ops::export_entries(&db, dir, now.date_naive())?;
            println!("Exported entries to {}", path.display());
        }
    }

    Ok(())
}

fn main() {
    let args = CliArgs::parse();
    init_tracing(args.log_format, args.verbose);

    let correlation_id = Uuid::new_v4().to_string();
    let root_span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service_name = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = root_span.enter();

    info!("Starting diario");

    if let Err(e) = run(args) {
        debug!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
