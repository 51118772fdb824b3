//! TUI views and rendering
//!
//! All rendering logic is contained here. The views module draws the UI
//! from AppState but never modifies it.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use boardstore::TaskStatus;

use super::state::{AppState, ConfirmDialog, InteractionMode};

/// Status colors
mod colors {
    use ratatui::style::Color;

    pub const TODO: Color = Color::Rgb(255, 215, 0); // Gold
    pub const IN_PROGRESS: Color = Color::Rgb(0, 255, 127); // Spring green
    pub const DONE: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const SELECTED_BG: Color = Color::Rgb(40, 40, 40);
    pub const DIM: Color = Color::DarkGray;
    pub const ERROR: Color = Color::Rgb(220, 20, 60); // Crimson
}

/// Get color for a task status
fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Todo => colors::TODO,
        TaskStatus::InProgress => colors::IN_PROGRESS,
        TaskStatus::Done => colors::DONE,
    }
}

/// Get status icon
fn status_icon(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "○",
        TaskStatus::InProgress => "●",
        TaskStatus::Done => "✓",
    }
}

/// Main render function
pub fn render(state: &AppState, frame: &mut Frame) {
    // Create main layout: header, content, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Board columns
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);
    render_boards(state, frame, chunks[1]);
    render_footer(state, frame, chunks[2]);

    // Render overlays
    match &state.interaction_mode {
        InteractionMode::Help => render_help_overlay(frame, frame.area()),
        InteractionMode::Confirm(dialog) => render_confirm_dialog(dialog, frame, frame.area()),
        _ => {}
    }
}

/// Render header with app name and totals
fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    let left = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            "Kanban",
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(colors::DIM)),
        Span::styled(
            format!("{} boards · {} tasks", state.boards.len(), state.total_tasks()),
            Style::default().fg(colors::DIM),
        ),
    ]);

    let header = Paragraph::new(left).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Render one column per board
fn render_boards(state: &AppState, frame: &mut Frame, area: Rect) {
    if state.boards.is_empty() {
        let empty = Paragraph::new("No boards - press b to create one")
            .style(Style::default().fg(colors::DIM))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let constraints: Vec<Constraint> = state
        .boards
        .iter()
        .map(|_| Constraint::Ratio(1, state.boards.len() as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (index, board) in state.boards.iter().enumerate() {
        let is_selected = index == state.selected_board;

        let border_style = if is_selected {
            Style::default().fg(colors::HEADER)
        } else {
            Style::default().fg(colors::DIM)
        };
        let title_style = if is_selected {
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(
                format!(" {} ({}) ", board.title, board.tasks.len()),
                title_style,
            ));

        let cursor = state.task_cursors.get(index).copied().unwrap_or(0);
        let mut lines: Vec<Line> = Vec::with_capacity(board.tasks.len());
        for (task_index, task) in board.tasks.iter().enumerate() {
            let mut style = Style::default();
            if is_selected && task_index == cursor {
                style = style.bg(colors::SELECTED_BG).add_modifier(Modifier::BOLD);
            }
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {} ", status_icon(task.status)),
                    Style::default().fg(status_color(task.status)),
                ),
                Span::styled(task.title.clone(), style),
            ]));
        }
        if board.tasks.is_empty() {
            lines.push(Line::from(Span::styled(
                " (empty)",
                Style::default().fg(colors::DIM),
            )));
        }

        let column = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(column, columns[index]);
    }
}

/// Render footer: input line, status message, or keybind hints
fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    let content = match &state.interaction_mode {
        InteractionMode::Input { kind, buffer } => Line::from(vec![
            Span::styled(kind.prompt(), Style::default().fg(colors::KEYBIND)),
            Span::raw(buffer.clone()),
            Span::styled("█", Style::default().fg(colors::DIM)),
        ]),
        _ => {
            if let Some(message) = &state.status_message {
                Line::from(Span::styled(
                    message.clone(),
                    Style::default().fg(colors::ERROR),
                ))
            } else {
                keybind_hints()
            }
        }
    };

    let footer = Paragraph::new(content).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// One-line keybind summary for the footer
fn keybind_hints() -> Line<'static> {
    let mut spans = Vec::new();
    for (keys, label) in [
        ("hjkl", "navigate"),
        ("n", "task"),
        ("e", "edit"),
        ("d", "del"),
        ("JK", "reorder"),
        ("HL", "move"),
        ("b", "board"),
        ("?", "help"),
        ("q", "quit"),
    ] {
        if !spans.is_empty() {
            spans.push(Span::styled(" · ", Style::default().fg(colors::DIM)));
        }
        spans.push(Span::styled(keys, Style::default().fg(colors::KEYBIND)));
        spans.push(Span::styled(format!(" {}", label), Style::default().fg(colors::DIM)));
    }
    let mut line = vec![Span::raw(" ")];
    line.extend(spans);
    Line::from(line)
}

/// Render the help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(50, 70, area);
    frame.render_widget(Clear, popup);

    let rows = [
        ("h / l, ← / →", "select board"),
        ("j / k, ↓ / ↑", "select task"),
        ("g / G", "first / last task"),
        ("J / K", "move task down / up"),
        ("H / L", "move task to adjacent board"),
        ("[ / ]", "move board left / right"),
        ("b", "new board"),
        ("r", "rename board"),
        ("D", "delete board (with tasks)"),
        ("n / a", "new task"),
        ("e", "edit task"),
        ("d", "delete task"),
        ("?", "toggle this help"),
        ("q", "quit"),
    ];

    let mut lines = vec![Line::from("")];
    for (keys, label) in rows {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<16}", keys), Style::default().fg(colors::KEYBIND)),
            Span::raw(label),
        ]));
    }

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors::HEADER))
            .title(" Help "),
    );
    frame.render_widget(help, popup);
}

/// Render a yes/no confirmation dialog
fn render_confirm_dialog(dialog: &ConfirmDialog, frame: &mut Frame, area: Rect) {
    let popup = centered_rect(50, 20, area);
    frame.render_widget(Clear, popup);

    let yes_style = if dialog.selected_button {
        Style::default().fg(Color::Black).bg(colors::HEADER)
    } else {
        Style::default().fg(colors::DIM)
    };
    let no_style = if dialog.selected_button {
        Style::default().fg(colors::DIM)
    } else {
        Style::default().fg(Color::Black).bg(colors::HEADER)
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::raw(dialog.message.clone())).centered(),
        Line::from(""),
        Line::from(vec![
            Span::styled("  No  ", no_style),
            Span::raw("   "),
            Span::styled("  Yes  ", yes_style),
        ])
        .centered(),
    ];

    let confirm = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::ERROR))
                .title(" Confirm "),
        );
    frame.render_widget(confirm, popup);
}

/// Helper to create a centered rect using percentages of the available area
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
