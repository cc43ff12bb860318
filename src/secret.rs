use crate::dictionary::Dictionary;
use crate::error::GameError;
use crate::info_log;
use chrono::{Datelike, NaiveDate};
use std::fmt;

/// The word the player has to find. Fixed for the life of a session.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Reveal the word. Callers only do this once the game is over.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep the answer out of debug output and logs.
impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Secret").field(&"*****").finish()
    }
}

/// Ordinal day number of `date`, counting 0001-01-01 as day 1.
///
/// Used as the default seed so the secret changes once per calendar day.
#[must_use]
pub fn day_seed(date: NaiveDate) -> u64 {
    u64::try_from(date.num_days_from_ce()).unwrap_or(0)
}

/// Derive the secret for `seed` from `dictionary`.
///
/// Pure: the same dictionary snapshot and seed give the same secret.
pub fn choose(dictionary: &Dictionary, seed: u64) -> Result<Secret, GameError> {
    let word = dictionary
        .random_choice(seed)
        .ok_or(GameError::EmptyDictionary {
            length: dictionary.word_length(),
        })?;
    info_log!("Secret chosen with seed {}", seed);
    Ok(Secret(word.to_uppercase()))
}

#[cfg(test)]
pub(crate) fn secret_for_test(word: &str) -> Secret {
    Secret(word.to_uppercase())
}
