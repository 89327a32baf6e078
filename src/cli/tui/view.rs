//! Rendering for the TUI
//!
//! Drawing reads the application state and never changes it; the whole
//! screen is rebuilt on every frame.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
};

use super::app::{App, InputMode, NoticeKind};
use crate::domain::{Filter, TaskPersistence, Theme};

/// Colours for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub done: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                bg: Color::Black,
                fg: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                done: Color::Green,
                error: Color::LightRed,
            },
            Theme::Light => Self {
                bg: Color::White,
                fg: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                done: Color::Green,
                error: Color::Red,
            },
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

/// Draw the whole screen
pub fn draw<P: TaskPersistence>(frame: &mut Frame, app: &App<P>) {
    let palette = Palette::for_theme(app.theme());
    let area = frame.area();

    frame.render_widget(Block::default().style(palette.base()), area);

    let input_height = if matches!(app.input_mode(), InputMode::NewTask(_)) {
        3
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Filter tabs
            Constraint::Min(3),               // Task list
            Constraint::Length(input_height), // New task input
            Constraint::Length(3),            // Status bar
        ])
        .split(area);

    draw_tabs(frame, app, &palette, chunks[0]);
    draw_tasks(frame, app, &palette, chunks[1]);
    if input_height > 0 {
        draw_input(frame, app, &palette, chunks[2]);
    }
    draw_status_bar(frame, app, &palette, chunks[3]);
}

fn draw_tabs<P: TaskPersistence>(frame: &mut Frame, app: &App<P>, palette: &Palette, area: Rect) {
    let titles: Vec<String> = Filter::ALL
        .iter()
        .enumerate()
        .map(|(i, filter)| format!("{}:{}", i + 1, filter))
        .collect();
    let selected = Filter::ALL
        .iter()
        .position(|f| *f == app.filter())
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(palette.base())
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .block(
            Block::default()
                .title(format!(" Tasks [{}] ", app.theme()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent)),
        );

    frame.render_widget(tabs, area);
}

fn draw_tasks<P: TaskPersistence>(frame: &mut Frame, app: &App<P>, palette: &Palette, area: Rect) {
    let visible = app.visible();

    let block = Block::default()
        .title(format!(" {} ({}) ", app.filter(), visible.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.muted));

    if visible.is_empty() {
        let empty = Paragraph::new(empty_message(app.filter()))
            .style(Style::default().fg(palette.muted))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|task| {
            let (marker, style) = if task.is_completed() {
                (
                    "[x]",
                    Style::default()
                        .fg(palette.done)
                        .add_modifier(Modifier::CROSSED_OUT),
                )
            } else {
                ("[ ]", Style::default().fg(palette.fg))
            };
            ListItem::new(format!("{} {}", marker, task.text())).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selected()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_input<P: TaskPersistence>(frame: &mut Frame, app: &App<P>, palette: &Palette, area: Rect) {
    let InputMode::NewTask(text) = app.input_mode() else {
        return;
    };

    let input = Paragraph::new(format!("{}_", text))
        .style(palette.base())
        .block(
            Block::default()
                .title(" New task (Enter to add, Esc to cancel) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent)),
        );

    frame.render_widget(input, area);
}

fn draw_status_bar<P: TaskPersistence>(
    frame: &mut Frame,
    app: &App<P>,
    palette: &Palette,
    area: Rect,
) {
    let stats = app.stats();
    let counts = format!(
        "{} total, {} completed, {} remaining",
        stats.total, stats.completed, stats.remaining
    );

    let clear_style = if stats.clear_enabled() {
        Style::default().fg(palette.fg)
    } else {
        Style::default().fg(palette.muted)
    };

    let mut spans = vec![
        Span::styled(counts, palette.base()),
        Span::raw("  "),
        Span::styled("[C]lear completed", clear_style),
        Span::raw("  "),
    ];

    match (app.input_mode(), app.notice()) {
        (InputMode::ConfirmClear, _) => spans.push(Span::styled(
            format!("Clear {} completed task(s)? [y/n]", stats.completed),
            Style::default().fg(palette.error).add_modifier(Modifier::BOLD),
        )),
        (_, Some(notice)) => {
            let color = match notice.kind {
                NoticeKind::Error => palette.error,
                NoticeKind::Info => palette.accent,
            };
            spans.push(Span::styled(notice.message.clone(), Style::default().fg(color)));
        }
        _ => spans.push(Span::styled("?:help q:quit", Style::default().fg(palette.muted))),
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(palette.base())
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

fn empty_message(filter: Filter) -> &'static str {
    match filter {
        Filter::All => "No tasks yet. Press n to add one.",
        Filter::Completed => "No completed tasks.",
        Filter::Pending => "Nothing pending.",
    }
}
