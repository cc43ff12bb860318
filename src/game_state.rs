use crate::dictionary::{CSW15_URL, Dictionary, default_word_list_path};
use crate::error::GameError;
use crate::scorer::{ScoreRow, score};
use crate::secret::{Secret, choose};
use crate::validator::{Guess, Validator};
use crate::{debug_log, info_log};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_WORD_LENGTH: usize = 5;
pub const DEFAULT_MAX_ATTEMPTS: usize = 6;

/// Construction-time settings for a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub word_length: usize,
    pub max_attempts: usize,
    /// Seed for secret selection. `None` means the caller supplies today's.
    pub seed: Option<u64>,
    pub word_list_path: PathBuf,
    pub word_list_url: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            word_length: DEFAULT_WORD_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
            word_list_path: default_word_list_path(),
            word_list_url: CSW15_URL.to_string(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.word_length == 0 {
            return Err(GameError::InvalidConfig {
                reason: "word length must be at least 1".to_string(),
            });
        }
        if self.max_attempts == 0 {
            return Err(GameError::InvalidConfig {
                reason: "at least one attempt is required".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    AwaitingGuess,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::AwaitingGuess)
    }
}

/// Presentation collaborator. Notified at session start and after every turn.
pub trait Renderer {
    /// Redraw everything from current state.
    fn render_board(&mut self) -> io::Result<()>;

    /// Receive the complete ordered history after a turn.
    fn update_board(&mut self, guesses: &[Guess], scores: &[ScoreRow]) -> io::Result<()>;

    /// Show the outcome once the session is over.
    fn announce(&mut self, status: GameStatus, answer: &str) -> io::Result<()>;
}

/// Input collaborator: blocks until the player supplies an accepted guess.
///
/// Rejected input is reported and re-asked inside the implementation.
/// `Ok(None)` means the player left (end of input or quit key).
pub trait GuessInput {
    fn read_guess(&mut self, validator: &Validator<'_>) -> io::Result<Option<Guess>>;
}

/// Separate input and renderer seen as one front end.
struct Split<'a> {
    input: &'a mut dyn GuessInput,
    renderer: &'a mut dyn Renderer,
}

impl GuessInput for Split<'_> {
    fn read_guess(&mut self, validator: &Validator<'_>) -> io::Result<Option<Guess>> {
        self.input.read_guess(validator)
    }
}

impl Renderer for Split<'_> {
    fn render_board(&mut self) -> io::Result<()> {
        self.renderer.render_board()
    }

    fn update_board(&mut self, guesses: &[Guess], scores: &[ScoreRow]) -> io::Result<()> {
        self.renderer.update_board(guesses, scores)
    }

    fn announce(&mut self, status: GameStatus, answer: &str) -> io::Result<()> {
        self.renderer.announce(status, answer)
    }
}

/// One game from secret selection to win or loss.
#[derive(Debug, Clone)]
pub struct GameSession {
    dictionary: Arc<Dictionary>,
    secret: Secret,
    word_length: usize,
    max_attempts: usize,
    guesses: Vec<Guess>,
    scores: Vec<ScoreRow>,
    status: GameStatus,
}

impl GameSession {
    /// Start a session, deriving the secret from `seed`.
    pub fn new(
        dictionary: Dictionary,
        max_attempts: usize,
        seed: u64,
    ) -> Result<Self, GameError> {
        let secret = choose(&dictionary, seed)?;
        Self::with_secret(Arc::new(dictionary), secret, max_attempts)
    }

    /// Build a session from a loaded dictionary and a config. The config's
    /// seed is used when set, otherwise `fallback_seed`.
    pub fn from_config(
        dictionary: Dictionary,
        config: &GameConfig,
        fallback_seed: u64,
    ) -> Result<Self, GameError> {
        config.validate()?;
        if dictionary.word_length() != config.word_length {
            return Err(GameError::InvalidConfig {
                reason: format!(
                    "dictionary holds {}-letter words but the game wants {}",
                    dictionary.word_length(),
                    config.word_length
                ),
            });
        }
        Self::new(
            dictionary,
            config.max_attempts,
            config.seed.unwrap_or(fallback_seed),
        )
    }

    fn with_secret(
        dictionary: Arc<Dictionary>,
        secret: Secret,
        max_attempts: usize,
    ) -> Result<Self, GameError> {
        if max_attempts == 0 {
            return Err(GameError::InvalidConfig {
                reason: "at least one attempt is required".to_string(),
            });
        }
        Ok(Self {
            word_length: dictionary.word_length(),
            dictionary,
            secret,
            max_attempts,
            guesses: Vec::new(),
            scores: Vec::new(),
            status: GameStatus::AwaitingGuess,
        })
    }

    /// A fresh session with the same secret and dictionary, nothing guessed.
    #[must_use]
    pub fn reset(&self) -> Self {
        info_log!("Session reset; secret kept");
        Self {
            dictionary: Arc::clone(&self.dictionary),
            secret: self.secret.clone(),
            word_length: self.word_length,
            max_attempts: self.max_attempts,
            guesses: Vec::new(),
            scores: Vec::new(),
            status: GameStatus::AwaitingGuess,
        }
    }

    pub fn validator(&self) -> Validator<'_> {
        Validator::new(self.word_length, &self.dictionary)
    }

    /// Play one turn with an already validated guess.
    pub fn submit(&mut self, guess: Guess) -> Result<GameStatus, GameError> {
        if self.status.is_terminal() {
            return Err(GameError::SessionTerminated);
        }

        let row = score(&guess, &self.secret);
        let won = row.is_all_correct();
        debug_log!("Attempt {}: {}", self.guesses.len() + 1, row.pattern());
        self.guesses.push(guess);
        self.scores.push(row);

        if won {
            self.status = GameStatus::Won;
        } else if self.guesses.len() == self.max_attempts {
            self.status = GameStatus::Lost;
        }
        if self.status.is_terminal() {
            info_log!(
                "Game over after {} attempts: {:?}",
                self.guesses.len(),
                self.status
            );
        }
        Ok(self.status)
    }

    /// Drive the turn loop until the game ends or the player leaves.
    pub fn play(
        &mut self,
        input: &mut dyn GuessInput,
        renderer: &mut dyn Renderer,
    ) -> Result<GameStatus, GameError> {
        self.drive(&mut Split { input, renderer })
    }

    /// The turn loop for a front end that both reads guesses and draws the board.
    pub fn play_interactive<F: GuessInput + Renderer>(
        &mut self,
        frontend: &mut F,
    ) -> Result<GameStatus, GameError> {
        self.drive(frontend)
    }

    fn drive<F: GuessInput + Renderer + ?Sized>(
        &mut self,
        frontend: &mut F,
    ) -> Result<GameStatus, GameError> {
        frontend.render_board()?;

        while !self.status.is_terminal() {
            let Some(guess) = frontend.read_guess(&self.validator())? else {
                info_log!("Input closed before the game finished");
                return Ok(self.status);
            };
            self.submit(guess)?;
            frontend.update_board(&self.guesses, &self.scores)?;
        }

        frontend.announce(self.status, self.secret.as_str())?;
        Ok(self.status)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn guesses(&self) -> &[Guess] {
        &self.guesses
    }

    pub fn scores(&self) -> &[ScoreRow] {
        &self.scores
    }

    pub fn attempts(&self) -> usize {
        self.guesses.len()
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// The secret, but only once the game is over.
    pub fn answer(&self) -> Option<&str> {
        self.status.is_terminal().then(|| self.secret.as_str())
    }
}
