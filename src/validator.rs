use crate::dictionary::Dictionary;
use crate::error::ValidationError;
use std::fmt;

/// A guess that has passed validation: upper-case, the configured length,
/// and present in the dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Guess(String);

impl Guess {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn chars(&self) -> std::str::Chars<'_> {
        self.0.chars()
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check `input` against, in order: alphabetic, length, dictionary.
/// The first failing check is reported.
pub fn validate(
    input: &str,
    length: usize,
    dictionary: &Dictionary,
) -> Result<Guess, ValidationError> {
    let upper = input.to_uppercase();

    if upper.is_empty() || !upper.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::NonAlphabetic { input: upper });
    }

    let actual = upper.chars().count();
    if actual != length {
        return Err(ValidationError::WrongLength {
            expected: length,
            actual,
        });
    }

    if !dictionary.contains(&upper) {
        return Err(ValidationError::NotInDictionary { word: upper });
    }

    Ok(Guess(upper))
}

/// Validation bound to one game's length and dictionary, handed to input
/// collaborators so they can re-prompt locally.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    length: usize,
    dictionary: &'a Dictionary,
}

impl<'a> Validator<'a> {
    pub fn new(length: usize, dictionary: &'a Dictionary) -> Self {
        Self { length, dictionary }
    }

    pub fn validate(&self, input: &str) -> Result<Guess, ValidationError> {
        validate(input, self.length, self.dictionary)
    }
}

#[cfg(test)]
pub(crate) fn guess_for_test(word: &str) -> Guess {
    Guess(word.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> Dictionary {
        Dictionary::from_text("crane\nslate\napple\npaper\n", 5)
    }

    #[test]
    fn test_rejects_digits() {
        let result = validate("CAT12", 5, &dictionary());
        assert_eq!(
            result,
            Err(ValidationError::NonAlphabetic {
                input: "CAT12".to_string()
            })
        );
    }

    #[test]
    fn test_rejects_wrong_length() {
        let result = validate("CATS", 5, &dictionary());
        assert_eq!(
            result,
            Err(ValidationError::WrongLength {
                expected: 5,
                actual: 4
            })
        );
    }

    #[test]
    fn test_rejects_unknown_word() {
        let result = validate("ZZZZZ", 5, &dictionary());
        assert_eq!(
            result,
            Err(ValidationError::NotInDictionary {
                word: "ZZZZZ".to_string()
            })
        );
    }

    #[test]
    fn test_alphabetic_checked_before_length() {
        // Both non-alphabetic and too short: the first check wins.
        let result = validate("C4", 5, &dictionary());
        assert!(matches!(result, Err(ValidationError::NonAlphabetic { .. })));
    }

    #[test]
    fn test_length_checked_before_dictionary() {
        let result = validate("CRANES", 5, &dictionary());
        assert!(matches!(
            result,
            Err(ValidationError::WrongLength {
                expected: 5,
                actual: 6
            })
        ));
    }

    #[test]
    fn test_empty_input_is_not_alphabetic() {
        let result = validate("", 5, &dictionary());
        assert!(matches!(result, Err(ValidationError::NonAlphabetic { .. })));
    }

    #[test]
    fn test_whitespace_is_not_alphabetic() {
        let result = validate("CRAN ", 5, &dictionary());
        assert!(matches!(result, Err(ValidationError::NonAlphabetic { .. })));
    }

    #[test]
    fn test_accepts_lowercase_and_uppercases() {
        let guess = validate("crane", 5, &dictionary()).unwrap();
        assert_eq!(guess.as_str(), "CRANE");
        assert_eq!(guess.len(), 5);
    }

    #[test]
    fn test_validator_binding() {
        let dict = dictionary();
        let validator = Validator::new(5, &dict);
        assert!(validator.validate("Slate").is_ok());
        assert!(validator.validate("stale").is_err());
    }
}
