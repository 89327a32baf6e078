//! Interactive TUI for the task list
//!
//! A full-screen view over the same store the commands use, built on ratatui.

mod app;
mod event;
mod ui;
mod view;

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::storage::Workspace;
use app::App;
use event::EventHandler;

/// How often the UI wakes up without input
const TICK_RATE: Duration = Duration::from_millis(250);

/// Launch the TUI
pub fn run(workspace: &Workspace) -> Result<()> {
    let mut app = App::new(
        workspace.open_tasks(),
        workspace.theme_file(),
        workspace.config().notice_duration(),
    );

    let mut terminal = ui::init_terminal()?;
    let events = EventHandler::new(TICK_RATE);

    // Restore the terminal even if the app panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| app.run(&mut terminal, events)));

    let restore_result = ui::restore_terminal();

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else {
                Err(anyhow!("TUI panicked with unknown error"))
            }
        }
    }
}
