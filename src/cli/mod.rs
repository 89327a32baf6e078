//! # Command-Line Interface
//!
//! User-facing commands, output formatting and the interactive UI.
//!
//! ## Commands
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Tasks | Change the list | `add`, `toggle`, `delete`, `clear` |
//! | Views | Read the list | `list --filter pending`, `stats` |
//! | Theme | Display preference | `theme`, `theme toggle`, `theme set dark` |
//! | Interactive | Full-screen UI | `tui` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug logging on stderr:
//! ```bash
//! todo --verbose list
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod render;
mod task;
mod theme_cmd;
mod tui;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
pub use render::{render_list, render_stats, ListReport, StatsReport};
