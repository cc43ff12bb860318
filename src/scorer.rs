use crate::secret::Secret;
use crate::validator::Guess;
use std::ops::Deref;

/// Per-letter feedback for one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterFeedback {
    /// Nothing guessed in this cell yet.
    Blank,
    /// Letter is not in the secret.
    Absent,
    /// Letter is in the secret at another position.
    Misplaced,
    /// Letter is in the secret at this position.
    Correct,
}

impl LetterFeedback {
    pub fn to_char(self) -> char {
        match self {
            Self::Blank => '_',
            Self::Absent => 'X',
            Self::Misplaced => 'Y',
            Self::Correct => 'G',
        }
    }
}

/// Feedback for every position of one guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRow(Vec<LetterFeedback>);

impl ScoreRow {
    pub fn is_all_correct(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|f| *f == LetterFeedback::Correct)
    }

    /// The row in `_XYG` notation, e.g. `"YYGYX"`.
    pub fn pattern(&self) -> String {
        self.0.iter().map(|f| f.to_char()).collect()
    }
}

impl Deref for ScoreRow {
    type Target = [LetterFeedback];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<LetterFeedback>> for ScoreRow {
    fn from(feedback: Vec<LetterFeedback>) -> Self {
        Self(feedback)
    }
}

/// Score a validated guess against the secret.
pub fn score(guess: &Guess, secret: &Secret) -> ScoreRow {
    score_word(guess.as_str(), secret.as_str())
}

/// Score `guess` against `secret` position by position.
///
/// A letter that is not an exact hit is `Misplaced` whenever it occurs
/// anywhere in the secret. Occurrences are not consumed, so a repeated guess
/// letter can be `Misplaced` more than once against a single secret letter.
pub fn score_word(guess: &str, secret: &str) -> ScoreRow {
    let secret_chars: Vec<char> = secret.chars().collect();
    guess
        .chars()
        .enumerate()
        .map(|(i, g)| {
            if secret_chars.get(i) == Some(&g) {
                LetterFeedback::Correct
            } else if secret_chars.contains(&g) {
                LetterFeedback::Misplaced
            } else {
                LetterFeedback::Absent
            }
        })
        .collect::<Vec<_>>()
        .into()
}
