//! Full-screen terminal interface built on Ratatui.
//!
//! `TuiInterface` is both the board renderer and the guess input for a game.
//!
//! # State Machine
//! - `EnteringGuess`: letters, Backspace, Enter to submit, Esc to quit
//! - `GameOver`: N starts a new round with the same secret, Esc quits

use crate::game_state::{GameStatus, GuessInput, Renderer};
use crate::renderer::TITLE;
use crate::scorer::{LetterFeedback, ScoreRow};
use crate::validator::{Guess, Validator};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const FAILURE_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// (background, foreground) for a tile.
fn tile_colors(feedback: LetterFeedback) -> (Color, Color) {
    match feedback {
        LetterFeedback::Blank => (Color::DarkGray, Color::White),
        LetterFeedback::Absent => (Color::Gray, Color::White),
        LetterFeedback::Misplaced => (Color::Yellow, Color::Black),
        LetterFeedback::Correct => (Color::Green, Color::Black),
    }
}

#[derive(Debug, Clone, PartialEq)]
struct TileRow {
    letters: Vec<char>,
    feedback: Vec<LetterFeedback>,
}

impl TileRow {
    fn scored(guess: &Guess, score: &ScoreRow) -> Self {
        Self {
            letters: guess.chars().collect(),
            feedback: score.to_vec(),
        }
    }

    fn pending(input: &str, length: usize) -> Self {
        let mut letters: Vec<char> = input.chars().take(length).collect();
        letters.resize(length, ' ');
        Self {
            letters,
            feedback: vec![LetterFeedback::Blank; length],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    EnteringGuess,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum InputAction {
    Submit(String),
    NewGame,
    Quit,
}

/// Everything the draw closure needs, borrowed from the interface.
struct RenderContext<'a> {
    rows: &'a [TileRow],
    word_length: usize,
    max_attempts: usize,
    current_input: &'a str,
    state: TuiState,
    message: &'a str,
    message_style: Style,
    error_message: &'a str,
    status: &'a str,
}

pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    word_length: usize,
    max_attempts: usize,
    rows: Vec<TileRow>,
    current_input: String,
    state: TuiState,
    message: String,
    message_style: Style,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new(word_length: usize, max_attempts: usize) -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal ready: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            word_length,
            max_attempts,
            rows: Vec::new(),
            current_input: String::new(),
            state: TuiState::EnteringGuess,
            message: String::new(),
            message_style: SUCCESS_STYLE,
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            rows: &self.rows,
            word_length: self.word_length,
            max_attempts: self.max_attempts,
            current_input: &self.current_input,
            state: self.state,
            message: &self.message,
            message_style: self.message_style,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let board_height = (ctx.max_attempts as u16).saturating_mul(ROW_SPACING) + 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),            // Title
                Constraint::Length(board_height), // Game board
                Constraint::Min(4),               // Messages
                Constraint::Length(3),            // Status line
                Constraint::Length(3),            // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_board(f, chunks[1], ctx);
        Self::render_info(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state, ctx.word_length);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new(TITLE)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let block = Block::default().title("Guesses").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        for index in 0..ctx.max_attempts {
            let row = match ctx.rows.get(index) {
                Some(row) => row.clone(),
                None if index == ctx.rows.len() && ctx.state == TuiState::EnteringGuess => {
                    TileRow::pending(ctx.current_input, ctx.word_length)
                }
                None => TileRow::pending("", ctx.word_length),
            };
            Self::render_tile_row(f, &row, index, inner);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_tile_row(f: &mut Frame, row: &TileRow, row_index: usize, area: Rect) {
        let y = area.y + (row_index as u16 * ROW_SPACING);
        if y >= area.y + area.height {
            return;
        }

        let mut spans = vec![Span::raw("  ")];
        for (letter, feedback) in row.letters.iter().zip(&row.feedback) {
            let (bg_color, fg_color) = tile_colors(*feedback);
            spans.push(Span::styled(
                format!(" {letter} "),
                Style::default().fg(fg_color).bg(bg_color),
            ));
            spans.push(Span::raw(" "));
        }

        let paragraph = Paragraph::new(Line::from(spans));
        f.render_widget(
            paragraph,
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();
        if !ctx.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.message, ctx.message_style)]));
        }
        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState, word_length: usize) {
        let text = match state {
            TuiState::EnteringGuess => {
                format!("Type your {word_length}-letter guess | ENTER: Submit | ESC: Quit")
            }
            TuiState::GameOver => "N: Play again (same word) | ESC: Quit".to_string(),
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<InputAction>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                debug_log!("handle_input() - Key: {:?}", key.code);
                Ok(match self.state {
                    TuiState::EnteringGuess => self.handle_guess_input(key),
                    TuiState::GameOver => Self::handle_game_over_input(key),
                })
            }
            other => {
                debug_log!("handle_input() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<InputAction> {
        self.error_message.clear();

        match key.code {
            KeyCode::Esc => return Some(InputAction::Quit),
            KeyCode::Char(_) if Self::has_modifier_keys(&key) => {
                debug_log!("handle_guess_input() - Ignoring modified key: {:?}", key.modifiers);
            }
            KeyCode::Char(c)
                if c.is_ascii_alphabetic() && self.current_input.len() < self.word_length =>
            {
                self.current_input.push(c.to_ascii_uppercase());
            }
            KeyCode::Char(c) if !c.is_ascii_alphabetic() => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
            }
            KeyCode::Backspace => {
                self.current_input.pop();
            }
            KeyCode::Enter => {
                let guess = std::mem::take(&mut self.current_input);
                info_log!("handle_guess_input() - Submitting '{}'", guess);
                return Some(InputAction::Submit(guess));
            }
            _ => {}
        }
        None
    }

    fn handle_game_over_input(key: KeyEvent) -> Option<InputAction> {
        match key.code {
            KeyCode::Char('n' | 'N') => Some(InputAction::NewGame),
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(InputAction::Quit),
            _ => None,
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    /// Block on the game-over screen. `true` clears the board for a replay.
    pub fn wait_for_new_game(&mut self) -> Result<bool, io::Error> {
        loop {
            self.draw()?;
            match self.handle_input()? {
                Some(InputAction::NewGame) => {
                    self.rows.clear();
                    self.current_input.clear();
                    self.message.clear();
                    self.error_message.clear();
                    self.state = TuiState::EnteringGuess;
                    self.status = "New round - same word".to_string();
                    return Ok(true);
                }
                Some(InputAction::Quit) => return Ok(false),
                Some(InputAction::Submit(_)) | None => {}
            }
        }
    }
}

impl Renderer for TuiInterface {
    fn render_board(&mut self) -> io::Result<()> {
        self.draw()
    }

    fn update_board(&mut self, guesses: &[Guess], scores: &[ScoreRow]) -> io::Result<()> {
        self.rows = guesses
            .iter()
            .zip(scores)
            .map(|(guess, score)| TileRow::scored(guess, score))
            .collect();
        self.status = format!("Attempt {} of {}", self.rows.len(), self.max_attempts);
        self.draw()
    }

    fn announce(&mut self, status: GameStatus, answer: &str) -> io::Result<()> {
        self.state = TuiState::GameOver;
        match status {
            GameStatus::Won => {
                self.message = format!("You guessed the answer: {answer}!");
                self.message_style = SUCCESS_STYLE;
            }
            GameStatus::Lost => {
                self.message = format!("You failed to guess the answer: {answer}!");
                self.message_style = FAILURE_STYLE;
            }
            GameStatus::AwaitingGuess => {}
        }
        self.status = "Game over".to_string();
        self.draw()
    }
}

impl GuessInput for TuiInterface {
    fn read_guess(&mut self, validator: &Validator<'_>) -> io::Result<Option<Guess>> {
        self.state = TuiState::EnteringGuess;
        loop {
            self.draw()?;
            match self.handle_input()? {
                Some(InputAction::Submit(input)) => match validator.validate(&input) {
                    Ok(guess) => return Ok(Some(guess)),
                    Err(e) => {
                        info_log!("read_guess() - Rejected '{}': {}", input, e);
                        self.error_message = e.to_string();
                    }
                },
                Some(InputAction::Quit) => {
                    self.status = "Exiting...".to_string();
                    self.draw_or_log();
                    return Ok(None);
                }
                Some(InputAction::NewGame) | None => {}
            }
        }
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
