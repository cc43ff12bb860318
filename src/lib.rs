// Library interface for daily-wordle
// The binary and the integration tests both build on these modules

pub mod cli;
pub mod dictionary;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod renderer;
pub mod scorer;
pub mod secret;
pub mod tui;
pub mod validator;

pub use dictionary::{Dictionary, HttpFetcher, WordListFetcher};
pub use error::{GameError, ValidationError};
pub use game_state::{GameConfig, GameSession, GameStatus, GuessInput, Renderer};
pub use renderer::{AsciiStyle, Board, EmojiStyle, TileStyle};
pub use scorer::{LetterFeedback, ScoreRow, score, score_word};
pub use secret::{Secret, choose, day_seed};
pub use validator::{Guess, Validator, validate};
