//! Plain terminal renderers.
//!
//! A `Board` owns the grid and the redraw logic; a `TileStyle` decides what
//! each cell looks like. `AsciiStyle` paints coloured letter tiles,
//! `EmojiStyle` uses coloured squares and lists the guesses under the grid.

use crate::game_state::{GameStatus, Renderer};
use crate::scorer::{LetterFeedback, ScoreRow};
use crate::validator::Guess;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Stylize, style},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

/// Heading shown above the board by every front end.
pub const TITLE: &str = "WORDLE";

/// Glyphs for one presentation style.
pub trait TileStyle {
    fn blank(&self) -> String;
    fn absent(&self, letter: char) -> String;
    fn misplaced(&self, letter: char) -> String;
    fn correct(&self, letter: char) -> String;
    fn title(&self, length: usize) -> String;

    /// Whether the board lists previous guesses below the grid.
    fn shows_history(&self) -> bool {
        false
    }

    fn tile(&self, letter: char, feedback: LetterFeedback) -> String {
        match feedback {
            LetterFeedback::Blank => self.blank(),
            LetterFeedback::Absent => self.absent(letter),
            LetterFeedback::Misplaced => self.misplaced(letter),
            LetterFeedback::Correct => self.correct(letter),
        }
    }
}

const WHITE: Color = Color::Rgb {
    r: 0xFF,
    g: 0xFF,
    b: 0xFF,
};
const GREY: Color = Color::Rgb {
    r: 0x3C,
    g: 0x3C,
    b: 0x3E,
};
const YELLOW: Color = Color::Rgb {
    r: 0xAD,
    g: 0x9E,
    b: 0x45,
};
const GREEN: Color = Color::Rgb {
    r: 0x68,
    g: 0x8C,
    b: 0x52,
};

/// Three-column letter tiles on coloured backgrounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiStyle;

impl AsciiStyle {
    fn letter_tile(letter: char, background: Color) -> String {
        style(format!(" {letter} "))
            .with(WHITE)
            .on(background)
            .to_string()
    }
}

impl TileStyle for AsciiStyle {
    fn blank(&self) -> String {
        style("___").with(WHITE).on(WHITE).to_string()
    }

    fn absent(&self, letter: char) -> String {
        Self::letter_tile(letter, GREY)
    }

    fn misplaced(&self, letter: char) -> String {
        Self::letter_tile(letter, YELLOW)
    }

    fn correct(&self, letter: char) -> String {
        Self::letter_tile(letter, GREEN)
    }

    fn title(&self, length: usize) -> String {
        format!("{TITLE:^width$}", width = length * 3)
    }
}

/// Coloured squares, one per letter; the guesses themselves are listed separately.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmojiStyle;

impl TileStyle for EmojiStyle {
    fn blank(&self) -> String {
        "⬜".to_string()
    }

    fn absent(&self, _letter: char) -> String {
        "⬛".to_string()
    }

    fn misplaced(&self, _letter: char) -> String {
        "🟨".to_string()
    }

    fn correct(&self, _letter: char) -> String {
        "🟩".to_string()
    }

    fn title(&self, length: usize) -> String {
        format!("{TITLE:^width$}", width = length * 2)
    }

    fn shows_history(&self) -> bool {
        true
    }
}

/// A fixed grid of `attempts` rows written to `out`.
pub struct Board<S: TileStyle, W: Write> {
    style: S,
    out: W,
    title: String,
    length: usize,
    rows: Vec<String>,
    guesses: Vec<String>,
    clear_screen: bool,
}

impl<S: TileStyle, W: Write> Board<S, W> {
    pub fn new(style: S, out: W, length: usize, attempts: usize) -> Self {
        let title = style.title(length);
        let blank_row = style.blank().repeat(length);
        Self {
            style,
            out,
            title,
            length,
            rows: vec![blank_row; attempts],
            guesses: Vec::new(),
            clear_screen: true,
        }
    }

    /// Draw below previous output instead of clearing the screen first.
    #[must_use]
    pub fn without_clearing(mut self) -> Self {
        self.clear_screen = false;
        self
    }

    /// Blank every row again for a replay.
    pub fn reset(&mut self) {
        let blank_row = self.style.blank().repeat(self.length);
        self.rows.fill(blank_row);
        self.guesses.clear();
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render_row(&self, guess: &Guess, score: &ScoreRow) -> String {
        guess
            .chars()
            .zip(score.iter())
            .map(|(letter, feedback)| self.style.tile(letter, *feedback))
            .collect()
    }

    fn print_guesses(&mut self) -> io::Result<()> {
        if self.style.shows_history() && !self.guesses.is_empty() {
            writeln!(self.out, "Previous guesses:")?;
            for guess in &self.guesses {
                writeln!(self.out, "{guess}")?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }
}

impl<S: TileStyle, W: Write> Renderer for Board<S, W> {
    fn render_board(&mut self) -> io::Result<()> {
        if self.clear_screen {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        writeln!(self.out, "{}", self.title)?;
        for row in &self.rows {
            writeln!(self.out, "{row}")?;
        }
        self.print_guesses()?;
        self.out.flush()
    }

    /// Only the newest row is rebuilt; earlier rows are already on the board.
    fn update_board(&mut self, guesses: &[Guess], scores: &[ScoreRow]) -> io::Result<()> {
        if let (Some(guess), Some(score)) = (guesses.last(), scores.last()) {
            let row = self.render_row(guess, score);
            if let Some(slot) = self.rows.get_mut(guesses.len() - 1) {
                *slot = row;
            }
        }
        self.guesses = guesses.iter().map(ToString::to_string).collect();
        self.render_board()
    }

    fn announce(&mut self, status: GameStatus, answer: &str) -> io::Result<()> {
        match status {
            GameStatus::Won => writeln!(self.out, "You guessed the answer: {answer}!")?,
            GameStatus::Lost => writeln!(self.out, "You failed to guess the answer: {answer}!")?,
            GameStatus::AwaitingGuess => {}
        }
        self.out.flush()
    }
}
