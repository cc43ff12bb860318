use std::fmt;
use std::io;
use std::path::PathBuf;

/// Reasons a guess is turned away before it reaches the scorer.
///
/// These are always recoverable: the input collaborator reports them and asks again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NonAlphabetic { input: String },
    WrongLength { expected: usize, actual: usize },
    NotInDictionary { word: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NonAlphabetic { input } => {
                write!(f, "{input} is not an alphabetic guess. Try again")
            }
            ValidationError::WrongLength { expected, actual } => write!(
                f,
                "Your guess must be {expected} letters long (was {actual}). Try again."
            ),
            ValidationError::NotInDictionary { word } => {
                write!(f, "{word} is not a valid word. Try again.")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Failures that stop a game from being set up or continued.
#[derive(Debug)]
pub enum GameError {
    /// No local word list exists at the configured path.
    SourceUnavailable { path: PathBuf },
    /// The word list has no entries of the requested length.
    EmptyDictionary { length: usize },
    /// A guess was submitted after the session reached `Won` or `Lost`.
    SessionTerminated,
    Acquisition { url: String, reason: String },
    InvalidConfig { reason: String },
    Io(io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::SourceUnavailable { path } => {
                write!(f, "word list not found at {}", path.display())
            }
            GameError::EmptyDictionary { length } => {
                write!(f, "the word list has no {length}-letter words")
            }
            GameError::SessionTerminated => write!(f, "the game is already over"),
            GameError::Acquisition { url, reason } => {
                write!(f, "failed to download word list from {url}: {reason}")
            }
            GameError::InvalidConfig { reason } => write!(f, "invalid configuration: {reason}"),
            GameError::Io(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for GameError {
    fn from(e: io::Error) -> Self {
        GameError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        let err = ValidationError::NonAlphabetic {
            input: "CAT12".to_string(),
        };
        assert_eq!(err.to_string(), "CAT12 is not an alphabetic guess. Try again");

        let err = ValidationError::WrongLength {
            expected: 5,
            actual: 4,
        };
        assert_eq!(
            err.to_string(),
            "Your guess must be 5 letters long (was 4). Try again."
        );

        let err = ValidationError::NotInDictionary {
            word: "ZZZZZ".to_string(),
        };
        assert_eq!(err.to_string(), "ZZZZZ is not a valid word. Try again.");
    }

    #[test]
    fn test_io_error_converts() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: GameError = io_err.into();
        assert!(matches!(err, GameError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_source_unavailable_names_path() {
        let err = GameError::SourceUnavailable {
            path: PathBuf::from("/tmp/words.txt"),
        };
        assert!(err.to_string().contains("/tmp/words.txt"));
    }
}
