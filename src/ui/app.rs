//! Main TUI application state and logic

use crate::interpreter::errors::RuntimeError;
use crate::snapshot::Session;
use crate::ui::panes::{self, StatusRenderData};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Delay between steps in auto-play mode
const PLAY_INTERVAL: Duration = Duration::from_millis(500);

/// The main application state
pub struct App {
    /// The program being stepped through
    pub session: Session,

    /// Step limit applied when jumping to the end
    pub step_limit: Option<usize>,

    /// Last runtime error, cleared by any successful move
    pub error: Option<RuntimeError>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(session: Session, step_limit: Option<usize>) -> Self {
        App {
            session,
            step_limit,
            error: None,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
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
                if !self.step_forward() {
                    self.is_playing = false;
                    if self.error.is_none() {
                        self.status_message = "Playback complete".to_string();
                    }
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
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

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        // Left column: Program (top) | Explanation (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(5)])
            .split(columns[0]);

        // Right column: Registers (top) | History (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        let state = self.session.current();
        let error_pc = self.error.as_ref().and_then(RuntimeError::pc);

        panes::render_program_pane(frame, left_rows[0], state, error_pc);
        panes::render_explain_pane(frame, left_rows[1], state);
        panes::render_registers_pane(frame, right_rows[0], state);
        panes::render_history_pane(frame, right_rows[1], self.session.past_instructions());

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &StatusRenderData {
                message: &self.status_message,
                current_step: self.session.history_position(),
                recorded_steps: self.session.total_snapshots() - 1,
                is_error: self.error.is_some(),
                is_playing: self.is_playing,
                is_at_end: self.session.is_at_end(),
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).map_or(1, |d| d as usize);
                let mut stepped = 0;
                while stepped < n && self.step_forward() {
                    stepped += 1;
                }
                if self.error.is_none() {
                    self.status_message = format!("Stepped forward {} step(s)", stepped);
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.is_playing = false;
                if self.step_forward() {
                    self.status_message = "Stepped forward".to_string();
                } else if self.error.is_none() {
                    self.status_message = "Program ended".to_string();
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.is_playing = false;
                if self.session.step_backward() {
                    self.error = None;
                    self.status_message = "Stepped backward".to_string();
                } else {
                    self.status_message = "Already at start".to_string();
                }
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(PLAY_INTERVAL)
                            .unwrap_or(Instant::now());
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                // Jump to end of execution
                self.is_playing = false;
                match self.session.run_to_end(self.step_limit) {
                    Ok(steps) => {
                        self.error = None;
                        self.status_message = format!("Jumped to end ({} step(s))", steps);
                    }
                    Err(err) => self.report(err),
                }
            }
            KeyCode::Backspace => {
                // Jump to start of execution
                self.is_playing = false;
                self.session.rewind_to_start();
                self.error = None;
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }

    /// Step forward in execution. Returns `false` at the end or on error.
    fn step_forward(&mut self) -> bool {
        match self.session.step_forward() {
            Ok(stepped) => {
                if stepped {
                    self.error = None;
                }
                stepped
            }
            Err(err) => {
                self.report(err);
                false
            }
        }
    }

    fn report(&mut self, err: RuntimeError) {
        self.status_message = format!("Error: {}", err);
        self.error = Some(err);
    }
}
