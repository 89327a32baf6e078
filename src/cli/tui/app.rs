//! TUI application state and logic

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::event::{Event, EventHandler};
use super::ui::Terminal;
use super::view;
use crate::domain::{Filter, Stats, Task, TaskPersistence, TaskStore, Theme, MAX_TEXT_LEN};
use crate::storage::ThemeFile;

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    NewTask(String),
    ConfirmClear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Transient message shown in the status bar
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    shown_at: Instant,
}

const HELP: &str =
    "j/k:move space:toggle d:delete n:new C:clear 1-3/f:filter t:theme q:quit";

/// Application state
pub struct App<P: TaskPersistence> {
    store: TaskStore<P>,
    themes: ThemeFile,
    theme: Theme,

    /// Not persisted, every session starts on `All`
    filter: Filter,

    /// Index into the filtered view
    selected: usize,

    input_mode: InputMode,
    notice: Option<Notice>,
    notice_ttl: Duration,
    should_quit: bool,
}

impl<P: TaskPersistence> App<P> {
    /// Create a new application
    pub fn new(store: TaskStore<P>, themes: ThemeFile, notice_ttl: Duration) -> Self {
        let theme = themes.preferred_theme();
        Self {
            store,
            themes,
            theme,
            filter: Filter::default(),
            selected: 0,
            input_mode: InputMode::Normal,
            notice: None,
            notice_ttl,
            should_quit: false,
        }
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        while !self.should_quit() {
            terminal.draw(|frame| view::draw(frame, &*self))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize => {}
                Event::Tick => self.expire_notice(Instant::now()),
            }
        }

        Ok(())
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::NewTask(_) => self.handle_new_task_key(key),
            InputMode::ConfirmClear => self.handle_confirm_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,

            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),

            KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('n') | KeyCode::Char('a') => {
                self.input_mode = InputMode::NewTask(String::new());
            }
            KeyCode::Char('C') => self.request_clear(),

            KeyCode::Char('1') => self.set_filter(Filter::All),
            KeyCode::Char('2') => self.set_filter(Filter::Pending),
            KeyCode::Char('3') => self.set_filter(Filter::Completed),
            KeyCode::Char('f') | KeyCode::Tab => self.set_filter(self.filter.cycle()),

            KeyCode::Char('t') => {
                self.theme = self.theme.toggled();
                self.themes.save(self.theme);
            }

            KeyCode::Char('?') => self.show_notice(HELP, NoticeKind::Info),

            _ => {}
        }
    }

    fn handle_new_task_key(&mut self, key: KeyEvent) {
        let InputMode::NewTask(ref mut text) = self.input_mode else {
            return;
        };

        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => {
                let text = std::mem::take(text);
                self.submit_task(text);
            }
            KeyCode::Backspace => {
                text.pop();
            }
            KeyCode::Char(c) => {
                // Same limit as the store; the input never grows past it
                if text.chars().count() < MAX_TEXT_LEN {
                    text.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                let removed = self.store.clear_completed();
                self.clamp_selection();
                self.show_notice(
                    &format!("Cleared {} completed task(s)", removed),
                    NoticeKind::Info,
                );
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    fn submit_task(&mut self, text: String) {
        match self.store.add_task(&text) {
            Ok(task) => {
                self.input_mode = InputMode::Normal;
                let position = self.visible().iter().position(|t| t.id() == task.id());
                if let Some(idx) = position {
                    self.selected = idx;
                }
            }
            Err(e) => {
                // Keep what was typed so it can be fixed
                self.input_mode = InputMode::NewTask(text);
                self.show_notice(&e.to_string(), NoticeKind::Error);
            }
        }
    }

    fn toggle_selected(&mut self) {
        let selected = self.selected_task().map(Task::id);
        if let Some(id) = selected {
            self.store.toggle_complete(id);
            self.clamp_selection();
        }
    }

    fn delete_selected(&mut self) {
        let selected = self.selected_task().map(Task::id);
        if let Some(id) = selected {
            self.store.delete_task(id);
            self.clamp_selection();
        }
    }

    fn request_clear(&mut self) {
        if self.stats().clear_enabled() {
            self.input_mode = InputMode::ConfirmClear;
        } else {
            self.show_notice("No completed tasks to clear", NoticeKind::Info);
        }
    }

    fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.selected = 0;
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected as isize + delta).rem_euclid(len as isize) as usize;
    }

    /// Keeps the selection inside the view after it shrinks
    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    fn show_notice(&mut self, message: &str, kind: NoticeKind) {
        self.notice = Some(Notice {
            message: message.to_string(),
            kind,
            shown_at: Instant::now(),
        });
    }

    /// Drops the notice once it has been visible for the configured time
    pub fn expire_notice(&mut self, now: Instant) {
        if let Some(notice) = &self.notice {
            if now.saturating_duration_since(notice.shown_at) >= self.notice_ttl {
                self.notice = None;
            }
        }
    }

    /// Tasks under the active filter
    pub fn visible(&self) -> Vec<&Task> {
        self.store.filtered_view(self.filter)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible().get(self.selected).copied()
    }

    pub fn stats(&self) -> Stats {
        self.store.stats()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn input_mode(&self) -> &InputMode {
        &self.input_mode
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn store(&self) -> &TaskStore<P> {
        &self.store
    }
}
