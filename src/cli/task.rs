//! Task CLI commands

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use super::output::Output;
use super::render::{self, ListReport, StatsReport};
use crate::domain::{Filter, TaskId, TaskPersistence, TaskStore};

/// Adds a task from the given words, joined by single spaces
pub fn add<P: TaskPersistence>(output: &Output, store: &mut TaskStore<P>, words: &[String]) -> Result<()> {
    let text = words.join(" ");
    let task = store.add_task(&text)?;

    if output.is_json() {
        output.data(&task);
    } else {
        output.success(&format!("Added task {}: {}", task.id(), task.text()));
    }

    Ok(())
}

pub fn toggle<P: TaskPersistence>(output: &Output, store: &mut TaskStore<P>, id_str: &str) -> Result<()> {
    let id: TaskId = id_str.parse()?;

    if !store.toggle_complete(id) {
        output.notice(&format!("No task with id {}", id));
        return Ok(());
    }

    match store.get(id) {
        Some(task) if output.is_json() => output.data(task),
        Some(task) if task.is_completed() => {
            output.success(&format!("Completed task {}: {}", id, task.text()))
        }
        Some(task) => output.success(&format!("Reopened task {}: {}", id, task.text())),
        None => {}
    }

    Ok(())
}

pub fn delete<P: TaskPersistence>(output: &Output, store: &mut TaskStore<P>, id_str: &str) -> Result<()> {
    let id: TaskId = id_str.parse()?;

    if store.delete_task(id) {
        output.success(&format!("Deleted task {}", id));
    } else {
        output.notice(&format!("No task with id {}", id));
    }

    Ok(())
}

/// Clears completed tasks, asking first unless `confirmed`
pub fn clear<P: TaskPersistence>(output: &Output, store: &mut TaskStore<P>, confirmed: bool) -> Result<()> {
    let stats = store.stats();
    if !stats.clear_enabled() {
        output.notice("No completed tasks to clear");
        return Ok(());
    }

    if !confirmed {
        let prompt = format!("Clear {} completed task(s)? [y/N] ", stats.completed);
        if !confirm(&prompt)? {
            output.notice("Nothing cleared");
            return Ok(());
        }
    }

    let removed = store.clear_completed();
    if output.is_json() {
        output.data(&serde_json::json!({
            "success": true,
            "removed": removed,
        }));
    } else {
        output.success(&format!("Cleared {} completed task(s)", removed));
    }

    Ok(())
}

pub fn list<P: TaskPersistence>(output: &Output, store: &TaskStore<P>, filter_str: &str) -> Result<()> {
    let filter = Filter::parse_lenient(filter_str);
    if filter.as_str() != filter_str.trim().to_lowercase() {
        tracing::debug!(requested = filter_str, shown = %filter, "Using filter");
    }

    let view = store.filtered_view(filter);

    if output.is_json() {
        output.data(&ListReport {
            filter,
            tasks: view,
            stats: StatsReport::from(store.stats()),
        });
    } else {
        output.text(&render::render_list(&view, filter));
        output.text("\n");
        output.text(&render::render_stats(&store.stats()));
    }

    Ok(())
}

pub fn stats<P: TaskPersistence>(output: &Output, store: &TaskStore<P>) -> Result<()> {
    let stats = store.stats();

    if output.is_json() {
        output.data(&StatsReport::from(stats));
    } else {
        output.text(&render::render_stats(&stats));
    }

    Ok(())
}

/// Asks a yes/no question on stdin, with the prompt on stderr.
/// Anything but y/yes (including EOF) is no.
fn confirm(prompt: &str) -> Result<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "{}", prompt).context("Failed to write prompt")?;
    stderr.flush().context("Failed to flush prompt")?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;

    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
