//! Tape pane rendering
//!
//! Shows a window of cells around the cursor: index, decimal value, and a
//! character preview for printable values. The cursor cell is marked and
//! highlighted. The window follows the cursor until the user scrolls.
//! Below it, every non-zero cell of the snapshot is listed in index order.

use super::utils::format_cell_char;
use crate::snapshot::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Scroll state for the tape pane
pub struct TapeScrollState {
    /// First visible cell index when not following the cursor
    pub top: usize,
    pub follow_cursor: bool,
}

impl TapeScrollState {
    pub fn new() -> Self {
        TapeScrollState {
            top: 0,
            follow_cursor: true,
        }
    }

    pub fn scroll_up(&mut self) {
        self.follow_cursor = false;
        self.top = self.top.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.follow_cursor = false;
        self.top = self.top.saturating_add(1);
    }
}

impl Default for TapeScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the tape pane
pub fn render_tape_pane(
    frame: &mut Frame,
    area: Rect,
    snapshot: Option<&Snapshot>,
    is_focused: bool,
    scroll_state: &mut TapeScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let Some(snapshot) = snapshot else {
        let block = Block::default()
            .title(" Tape ")
            .borders(Borders::ALL)
            .border_style(border_style);
        let list = List::new(vec![
            ListItem::new("(no snapshot)").style(Style::default().fg(DEFAULT_THEME.comment))
        ])
        .block(block);
        frame.render_widget(list, area);
        return;
    };

    // Window (top) | non-zero list (bottom)
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let block = Block::default()
        .title(format!(" Tape ({} cells) ", snapshot.tape_len))
        .borders(Borders::ALL)
        .border_style(border_style);

    let visible_height = rows[0].height.saturating_sub(2).max(1) as usize; // borders

    if scroll_state.follow_cursor {
        scroll_state.top = snapshot.cursor.saturating_sub(visible_height / 2);
    }
    let max_top = snapshot.tape_len.saturating_sub(visible_height);
    scroll_state.top = scroll_state.top.min(max_top);

    let end = (scroll_state.top + visible_height).min(snapshot.tape_len);
    let items: Vec<ListItem> = (scroll_state.top..end)
        .map(|index| {
            let value = snapshot.cell(index);
            let is_cursor = index == snapshot.cursor;

            let marker = if is_cursor { "▶ " } else { "  " };
            let value_style = if value == 0 {
                Style::default().fg(DEFAULT_THEME.comment)
            } else {
                Style::default().fg(DEFAULT_THEME.number)
            };

            let mut line = Line::from(vec![
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.secondary)),
                Span::styled(
                    format!("[{:>6}] ", index),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(format!("{:>3}", value), value_style),
                Span::raw("  "),
                Span::styled(
                    format_cell_char(value),
                    Style::default().fg(DEFAULT_THEME.fg),
                ),
            ]);

            if is_cursor {
                line = line.style(
                    Style::default()
                        .bg(DEFAULT_THEME.current_line_bg)
                        .add_modifier(Modifier::BOLD),
                );
            }
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, rows[0]);

    let list_height = rows[1].height.saturating_sub(2).max(1) as usize;
    let block = Block::default()
        .title(format!(" Non-zero ({}) ", snapshot.cells.len()))
        .borders(Borders::ALL)
        .border_style(border_style);
    let items: Vec<ListItem> = non_zero_lines(&snapshot.cells, list_height)
        .into_iter()
        .map(|line| ListItem::new(line).style(Style::default().fg(DEFAULT_THEME.number)))
        .collect();
    frame.render_widget(List::new(items).block(block), rows[1]);
}

/// One line per non-zero cell, at most `max_rows`; the last row says how many
/// were left out when the list does not fit
fn non_zero_lines(cells: &[(usize, u8)], max_rows: usize) -> Vec<String> {
    let describe = |&(index, value): &(usize, u8)| {
        format!("[{:>6}] {:>3}  {}", index, value, format_cell_char(value))
    };

    if cells.len() <= max_rows {
        return cells.iter().map(describe).collect();
    }

    let shown = max_rows.saturating_sub(1);
    let mut lines: Vec<String> = cells[..shown].iter().map(describe).collect();
    lines.push(format!("... {} more", cells.len() - shown));
    lines
}
