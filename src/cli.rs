use crate::dictionary::{CSW15_URL, default_word_list_path};
use crate::game_state::{DEFAULT_MAX_ATTEMPTS, DEFAULT_WORD_LENGTH, GameConfig, GuessInput};
use crate::validator::{Guess, Validator};
use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// How the board is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RendererKind {
    /// Coloured letter tiles
    Ascii,
    /// Coloured squares plus a list of guesses
    Emoji,
    /// Full-screen terminal interface
    Tui,
}

/// Daily word-guessing game
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Number of letters in the secret word
    #[arg(short = 'l', long = "length", default_value_t = DEFAULT_WORD_LENGTH)]
    pub word_length: usize,

    /// Guesses allowed before the game is lost
    #[arg(short = 'a', long = "attempts", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Board style
    #[arg(short = 'r', long = "renderer", value_enum, default_value_t = RendererKind::Emoji)]
    pub renderer: RendererKind,

    /// Seed for the secret word (defaults to today's date)
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Path to a newline-delimited word list (downloaded if missing)
    #[arg(short = 'i', long = "input")]
    pub word_list_path: Option<PathBuf>,

    /// Where to download the word list from
    #[arg(long = "url", default_value = CSW15_URL)]
    pub word_list_url: String,
}

impl Cli {
    pub fn to_config(&self) -> GameConfig {
        GameConfig {
            word_length: self.word_length,
            max_attempts: self.max_attempts,
            seed: self.seed,
            word_list_path: self
                .word_list_path
                .clone()
                .unwrap_or_else(default_word_list_path),
            word_list_url: self.word_list_url.clone(),
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Reads guesses line by line, re-prompting until one is accepted.
pub struct LineInput<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LineInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }

    /// Read one trimmed line, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut input = String::new();
        if self.reader.read_line(&mut input)? == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim().to_string()))
    }

    /// Ask whether to replay with the same secret. Anything but `y`/`yes` is no.
    pub fn ask_play_again(&mut self) -> io::Result<bool> {
        writeln!(self.writer, "Play again? (y/n)")?;
        self.writer.flush()?;
        Ok(self
            .read_line()?
            .is_some_and(|answer| matches!(answer.to_lowercase().as_str(), "y" | "yes")))
    }
}

impl<R: BufRead, W: Write> GuessInput for LineInput<R, W> {
    fn read_guess(&mut self, validator: &Validator<'_>) -> io::Result<Option<Guess>> {
        loop {
            writeln!(self.writer, "Type a guess:")?;
            self.writer.flush()?;
            let Some(input) = self.read_line()? else {
                return Ok(None);
            };
            match validator.validate(&input) {
                Ok(guess) => return Ok(Some(guess)),
                Err(e) => writeln!(self.writer, "{e}")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;
    use std::io::Cursor;

    fn dictionary() -> Dictionary {
        Dictionary::from_text("crane\nslate\nraise\n", 5)
    }

    fn read(input: &str) -> (Option<Guess>, String) {
        let dict = dictionary();
        let validator = Validator::new(5, &dict);
        let mut line_input = LineInput::new(Cursor::new(input.to_string()), Vec::new());
        let guess = line_input.read_guess(&validator).unwrap();
        let (_, out) = line_input.into_parts();
        (guess, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::parse_from(["daily-wordle"]);
        assert_eq!(cli.word_length, 5);
        assert_eq!(cli.max_attempts, 6);
        assert_eq!(cli.renderer, RendererKind::Emoji);
        assert_eq!(cli.seed, None);
        assert_eq!(cli.word_list_path, None);
        assert_eq!(cli.word_list_url, CSW15_URL);
    }

    #[test]
    fn test_parse_cli_all_options() {
        let cli = Cli::parse_from([
            "daily-wordle",
            "-l",
            "6",
            "-a",
            "8",
            "-r",
            "ascii",
            "-s",
            "42",
            "-i",
            "/tmp/words.txt",
            "--url",
            "http://localhost/words.txt",
        ]);
        let config = cli.to_config();
        assert_eq!(config.word_length, 6);
        assert_eq!(config.max_attempts, 8);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.word_list_path, PathBuf::from("/tmp/words.txt"));
        assert_eq!(config.word_list_url, "http://localhost/words.txt");
        assert_eq!(cli.renderer, RendererKind::Ascii);
    }

    #[test]
    fn test_parse_cli_tui_renderer() {
        let cli = Cli::parse_from(["daily-wordle", "--renderer", "tui"]);
        assert_eq!(cli.renderer, RendererKind::Tui);
    }

    #[test]
    fn test_to_config_default_path() {
        let cli = Cli::parse_from(["daily-wordle"]);
        assert_eq!(cli.to_config().word_list_path, default_word_list_path());
    }

    #[test]
    fn test_read_guess_valid_word() {
        let (guess, out) = read("crane\n");
        assert_eq!(guess.unwrap().as_str(), "CRANE");
        assert_eq!(out, "Type a guess:\n");
    }

    #[test]
    fn test_read_guess_trims_whitespace() {
        let (guess, _) = read("  slate  \n");
        assert_eq!(guess.unwrap().as_str(), "SLATE");
    }

    #[test]
    fn test_read_guess_reprompts_until_valid() {
        let (guess, out) = read("cat12\ncats\nzzzzz\nraise\n");
        assert_eq!(guess.unwrap().as_str(), "RAISE");
        assert!(out.contains("CAT12 is not an alphabetic guess. Try again"));
        assert!(out.contains("Your guess must be 5 letters long (was 4). Try again."));
        assert!(out.contains("ZZZZZ is not a valid word. Try again."));
        assert_eq!(out.matches("Type a guess:").count(), 4);
    }

    #[test]
    fn test_read_guess_end_of_input() {
        let (guess, _) = read("");
        assert!(guess.is_none());
    }

    #[test]
    fn test_read_guess_invalid_then_end_of_input() {
        let (guess, out) = read("cran\n");
        assert!(guess.is_none());
        assert!(out.contains("was 4"));
    }

    #[test]
    fn test_ask_play_again() {
        for (input, expected) in [("y\n", true), ("YES\n", true), ("n\n", false), ("", false)] {
            let mut line_input = LineInput::new(Cursor::new(input), Vec::new());
            assert_eq!(line_input.ask_play_again().unwrap(), expected);
        }
    }
}
