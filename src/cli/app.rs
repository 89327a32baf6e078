//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::{task, theme_cmd, tui};
use crate::storage::{Config, Workspace};

#[derive(Parser)]
#[command(name = "todo")]
#[command(author, version, about = "A local task list manager")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Directory holding tasks.json and theme.json
    #[arg(long, global = true, env = "TODO_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task
    Add {
        /// Task text (at most 200 characters)
        text: Vec<String>,
    },

    /// Mark a task completed, or pending again
    Toggle {
        /// Task ID
        id: String,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },

    /// Remove all completed tasks
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// List tasks
    List {
        /// Which tasks to show: all, completed or pending
        #[arg(long, default_value = "all")]
        filter: String,
    },

    /// Show task counts
    Stats,

    /// Show or change the display theme
    Theme {
        #[command(subcommand)]
        command: Option<theme_cmd::ThemeCommands>,
    },

    /// Open the interactive task list
    Tui,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Logs share the terminal with the full-screen UI, so it gets none
    if !matches!(cli.command, Commands::Tui) {
        init_logging(cli.verbose);
    }

    let config = Config::load()?;
    let format = cli
        .format
        .unwrap_or_else(|| OutputFormat::from(config.default_format));
    let output = Output::new(format);

    let workspace = Workspace::with_config(config, cli.data_dir.as_deref())?;
    tracing::debug!(data_dir = %workspace.root().display(), "Starting");

    match cli.command {
        Commands::Add { text } => task::add(&output, &mut workspace.open_tasks(), &text)?,
        Commands::Toggle { id } => task::toggle(&output, &mut workspace.open_tasks(), &id)?,
        Commands::Delete { id } => task::delete(&output, &mut workspace.open_tasks(), &id)?,
        Commands::Clear { yes } => {
            let confirmed = yes || !workspace.config().confirm_clear;
            task::clear(&output, &mut workspace.open_tasks(), confirmed)?
        }
        Commands::List { filter } => task::list(&output, &workspace.open_tasks(), &filter)?,
        Commands::Stats => task::stats(&output, &workspace.open_tasks())?,
        Commands::Theme { command } => theme_cmd::run(command, &output, &workspace.theme_file())?,
        Commands::Tui => tui::run(&workspace)?,
    }

    tracing::debug!("Command completed successfully");
    Ok(())
}

/// Sends diagnostics to stderr: `warn` by default, `debug` with --verbose, `RUST_LOG` wins
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (e.g. in tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
