//! Text and JSON rendering of store state
//!
//! Rendering is a pure function of the current state; commands call it
//! after every mutation instead of patching previous output.

use serde::Serialize;

use crate::domain::{Filter, Stats, Task};

/// Counts plus whether clearing completed tasks is possible
#[derive(Debug, Serialize)]
pub struct StatsReport {
    #[serde(flatten)]
    pub stats: Stats,
    pub clear_enabled: bool,
}

impl From<Stats> for StatsReport {
    fn from(stats: Stats) -> Self {
        Self {
            stats,
            clear_enabled: stats.clear_enabled(),
        }
    }
}

/// JSON shape of `todo list`
#[derive(Debug, Serialize)]
pub struct ListReport<'a> {
    pub filter: Filter,
    pub tasks: Vec<&'a Task>,
    pub stats: StatsReport,
}

/// Checkbox marker for a task
pub fn checkbox(task: &Task) -> &'static str {
    if task.is_completed() {
        "[x]"
    } else {
        "[ ]"
    }
}

/// One line per task, in view order
pub fn render_list(view: &[&Task], filter: Filter) -> String {
    if view.is_empty() {
        return match filter {
            Filter::All => "No tasks\n".to_string(),
            Filter::Completed => "No completed tasks\n".to_string(),
            Filter::Pending => "No pending tasks\n".to_string(),
        };
    }

    let id_width = view
        .iter()
        .map(|t| t.id().to_string().len())
        .max()
        .unwrap_or(0);

    view.iter()
        .map(|task| {
            format!(
                "{} {:<width$}  {}\n",
                checkbox(task),
                task.id(),
                task.text(),
                width = id_width
            )
        })
        .collect()
}

/// Single summary line with the counts
pub fn render_stats(stats: &Stats) -> String {
    format!(
        "{} total, {} completed, {} remaining\n",
        stats.total, stats.completed, stats.remaining
    )
}
