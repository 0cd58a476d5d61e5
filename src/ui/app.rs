//! Main TUI application state and logic

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::ui::panes::{self, SourceScrollState, TapeScrollState};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Delay between steps in auto-play mode
const PLAY_INTERVAL: Duration = Duration::from_millis(250);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tape,
    Output,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> output -> tape)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Tape,
            FocusedPane::Tape => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tape,
            FocusedPane::Output => FocusedPane::Source,
            FocusedPane::Tape => FocusedPane::Output,
        }
    }
}

/// The main application state
pub struct App {
    /// Interpreter whose history is being browsed
    pub interpreter: Interpreter,

    /// The source code being executed
    pub source_code: String,

    /// Runtime error that ended the run, if any
    pub run_error: Option<String>,

    pub focused_pane: FocusedPane,

    pub source_scroll: SourceScrollState,
    pub tape_scroll: TapeScrollState,
    pub output_scroll: usize,

    pub should_quit: bool,

    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,
}

impl App {
    /// Create an app over an interpreter that has already run
    pub fn new(mut interpreter: Interpreter, run_error: Option<&RuntimeError>) -> Self {
        let source_code = interpreter.program().as_text();
        let status_message = match (interpreter.rewind_to_start(), run_error) {
            (Err(e), _) => format!("No history to browse: {}", e),
            (Ok(()), Some(e)) => format!("Stopped: {}", e),
            (Ok(()), None) => String::from("Ready!"),
        };

        App {
            interpreter,
            source_code,
            run_error: run_error.map(|e| e.to_string()),
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::new(),
            tape_scroll: TapeScrollState::new(),
            output_scroll: usize::MAX,
            should_quit: false,
            status_message,
            is_playing: false,
            last_play_time: Instant::now(),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= PLAY_INTERVAL {
                if self.interpreter.step_forward().is_ok() {
                    self.after_step("Playing...");
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Poll with timeout so auto-play keeps running
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Output (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        let snapshot = self.interpreter.current_snapshot();
        let location = snapshot
            .and_then(|s| s.position)
            .map(|p| self.interpreter.program().location_of(p));
        let output_len = snapshot.map(|s| s.output_len).unwrap_or(0);
        let output = &self.interpreter.output().as_bytes()[..output_len];

        let total = self.interpreter.total_snapshots();
        let at_end = self.interpreter.history_position() + 1 >= total;
        let show_error = self.run_error.is_some() && at_end;

        panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            location,
            show_error,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_output_pane(
            frame,
            left_rows[1],
            output,
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        panes::render_tape_pane(
            frame,
            columns[1],
            snapshot,
            self.focused_pane == FocusedPane::Tape,
            &mut self.tape_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.interpreter.history_position(),
            total,
            self.run_error.is_some(),
            self.is_playing,
        );
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1);
                let mut stepped = 0;
                for _ in 0..n {
                    if self.interpreter.step_forward().is_err() {
                        break;
                    }
                    stepped += 1;
                }
                self.after_step(&format!("Stepped forward {} step(s)", stepped));
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                match self.interpreter.step_backward() {
                    Ok(()) => self.after_step("Stepped backward"),
                    Err(e) => self.status_message = format!("Cannot step backward: {}", e),
                }
            }
            KeyCode::Right => {
                self.is_playing = false;
                match self.interpreter.step_forward() {
                    Ok(()) => self.after_step("Stepped forward"),
                    Err(e) => self.status_message = format!("Cannot step forward: {}", e),
                }
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up moves the current line down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Tape => self.tape_scroll.scroll_up(),
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Tape => self.tape_scroll.scroll_down(),
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                self.is_playing = !self.is_playing;
                if self.is_playing {
                    self.last_play_time = Instant::now()
                        .checked_sub(PLAY_INTERVAL)
                        .unwrap_or_else(Instant::now);
                    self.status_message = "Playing...".to_string();
                } else {
                    self.status_message = "Paused".to_string();
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                if self.interpreter.jump_to_end().is_ok() {
                    let message = match &self.run_error {
                        Some(e) => format!("Jumped to end. Stopped: {}", e),
                        None => "Jumped to end".to_string(),
                    };
                    self.after_step(&message);
                }
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                if self.interpreter.rewind_to_start().is_ok() {
                    self.after_step("Jumped to start");
                }
            }
            _ => {}
        }
    }

    /// Reset follow modes after the history position changed
    fn after_step(&mut self, message: &str) {
        self.status_message = message.to_string();
        self.tape_scroll.follow_cursor = true;
        // Auto-scroll output to bottom
        self.output_scroll = usize::MAX;
    }
}
