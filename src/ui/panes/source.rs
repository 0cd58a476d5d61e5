//! Source code pane rendering with command highlighting
//!
//! This module renders the source code pane, which displays the program being
//! executed with its eight commands colored by kind and the instruction of the
//! current snapshot highlighted.
//!
//! # Features
//!
//! - Pointer moves, cell arithmetic, I/O, and loop brackets in distinct colors
//! - Comments dimmed
//! - Current line background plus a bold marker on the current command
//! - The current line is held at a fixed visual row while stepping

use crate::parser::program::SourceLocation;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn command_style(c: char) -> Style {
    match c {
        '>' | '<' => Style::default().fg(DEFAULT_THEME.pointer_op),
        '+' | '-' => Style::default().fg(DEFAULT_THEME.cell_op),
        '.' | ',' => Style::default()
            .fg(DEFAULT_THEME.io_op)
            .add_modifier(Modifier::BOLD),
        '[' | ']' => Style::default()
            .fg(DEFAULT_THEME.loop_op)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(DEFAULT_THEME.comment),
    }
}

/// Color one source line; `current_column` (1-based, in bytes) gets the cursor style
fn highlight_source_line(line: &str, current_column: Option<usize>) -> Line<'static> {
    let spans: Vec<Span> = line
        .char_indices()
        .map(|(offset, c)| {
            let style = if current_column == Some(offset + 1) {
                Style::default()
                    .bg(DEFAULT_THEME.secondary)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                command_style(c)
            };
            Span::styled(c.to_string(), style)
        })
        .collect();
    Line::from(spans)
}

/// Scroll state for the source pane
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

impl SourceScrollState {
    pub fn new() -> Self {
        SourceScrollState {
            offset: 0,
            target_line_row: None,
        }
    }
}

impl Default for SourceScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    current: Option<SourceLocation>,
    is_error: bool,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();
    let current_line = current.map(|loc| loc.line).unwrap_or(0);

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // borders

    if scroll_state.target_line_row.is_none() {
        scroll_state.target_line_row = Some(visible_height / 2);
    }

    let target_row = scroll_state
        .target_line_row
        .unwrap_or(0)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Keep current line at target visual row
    if current_line > 0 && current_line <= total_lines {
        scroll_state.offset = (current_line - 1).saturating_sub(target_row);
    }
    if total_lines > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = line_num == current_line;

            let num_style = if is_current && is_error {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let column = if is_current {
                current.map(|loc| loc.column)
            } else {
                None
            };
            let mut content = highlight_source_line(line, column);
            if is_current {
                for span in &mut content.spans {
                    if span.style.bg.is_none() {
                        span.style = span.style.bg(DEFAULT_THEME.current_line_bg);
                    }
                }
            }

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
