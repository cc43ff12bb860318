use crate::error::GameError;
use crate::{debug_log, info_log};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Collins Scrabble Words 2015, one word per line.
pub const CSW15_URL: &str = "https://pages.cs.wisc.edu/~o-laughl/csw15.txt";

const APP_DIR_NAME: &str = "daily-wordle";
const WORD_LIST_FILE_NAME: &str = "words.txt";

/// Per-user directory for the downloaded word list and log file.
#[must_use]
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR_NAME))
}

/// Where the word list lives unless configured otherwise.
#[must_use]
pub fn default_word_list_path() -> PathBuf {
    app_data_dir().map_or_else(
        || PathBuf::from(WORD_LIST_FILE_NAME),
        |dir| dir.join(WORD_LIST_FILE_NAME),
    )
}

/// The set of acceptable words of a single length, upper-cased.
///
/// `words` keeps source order (first occurrence of each word) and is the
/// snapshot seeded selection indexes into. `lookup` answers membership.
#[derive(Debug, Clone)]
pub struct Dictionary {
    length: usize,
    words: Vec<String>,
    lookup: HashSet<String>,
}

impl Dictionary {
    /// Build from any line source, keeping entries whose trimmed form has
    /// exactly `length` characters.
    pub fn from_words<I, S>(lines: I, length: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = Vec::new();
        let mut lookup = HashSet::new();
        for line in lines {
            let word = line.as_ref().trim();
            if word.chars().count() != length {
                continue;
            }
            let word = word.to_uppercase();
            if lookup.insert(word.clone()) {
                words.push(word);
            }
        }
        Self {
            length,
            words,
            lookup,
        }
    }

    pub fn from_text(data: &str, length: usize) -> Self {
        Self::from_words(data.lines(), length)
    }

    /// Read the word list at `path`.
    ///
    /// A missing file is reported as `SourceUnavailable` so the caller can
    /// fetch it; any other I/O failure is passed through.
    pub fn load<P: AsRef<Path>>(path: P, length: usize) -> Result<Self, GameError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => GameError::SourceUnavailable {
                path: path.to_path_buf(),
            },
            _ => GameError::Io(e),
        })?;
        let reader = BufReader::new(file);
        let lines = reader.lines().collect::<io::Result<Vec<String>>>()?;
        let dictionary = Self::from_words(lines, length);
        info_log!(
            "Loaded {} {}-letter words from {}",
            dictionary.len(),
            length,
            path.display()
        );
        Ok(dictionary)
    }

    /// Load, and if the list is missing, fetch it once and load again.
    pub fn load_or_fetch<P: AsRef<Path>>(
        path: P,
        length: usize,
        fetcher: &dyn WordListFetcher,
    ) -> Result<Self, GameError> {
        let path = path.as_ref();
        match Self::load(path, length) {
            Err(GameError::SourceUnavailable { .. }) => {
                println!("{} not found, downloading...", path.display());
                fetcher.fetch(path)?;
                Self::load(path, length)
            }
            other => other,
        }
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.lookup.contains(&word.to_uppercase())
    }

    /// Pick a word with a generator seeded from `seed`.
    ///
    /// The same seed over the same snapshot always yields the same word.
    #[must_use]
    pub fn random_choice(&self, seed: u64) -> Option<&str> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let choice = self.words.choose(&mut rng).map(String::as_str);
        debug_log!("random_choice(seed = {}) over {} words", seed, self.words.len());
        choice
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn word_length(&self) -> usize {
        self.length
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

/// Obtains a word list and writes it to a local file.
pub trait WordListFetcher {
    /// Create or fully replace `destination`.
    fn fetch(&self, destination: &Path) -> Result<(), GameError>;
}

/// Downloads the word list over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    url: String,
}

impl HttpFetcher {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn acquisition_error(&self, reason: impl ToString) -> GameError {
        GameError::Acquisition {
            url: self.url.clone(),
            reason: reason.to_string(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(CSW15_URL)
    }
}

impl WordListFetcher for HttpFetcher {
    fn fetch(&self, destination: &Path) -> Result<(), GameError> {
        info_log!("Downloading word list from {}", self.url);
        if let Some(parent) = destination.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut response = reqwest::blocking::get(&self.url)
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| self.acquisition_error(e))?;

        // Write beside the target and rename, so a failed download never
        // leaves a truncated list behind.
        let partial = destination.with_extension("part");
        let mut file = File::create(&partial)?;
        if let Err(e) = response.copy_to(&mut file) {
            drop(file);
            remove_partial(&partial);
            return Err(self.acquisition_error(e));
        }
        drop(file);
        if let Err(e) = fs::rename(&partial, destination) {
            remove_partial(&partial);
            return Err(GameError::Io(e));
        }
        info_log!("Word list saved to {}", destination.display());
        Ok(())
    }
}

fn remove_partial(partial: &Path) {
    if let Err(e) = fs::remove_file(partial) {
        debug_log!("Could not remove {}: {}", partial.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FixtureFetcher {
        contents: &'static str,
        calls: Cell<usize>,
    }

    impl FixtureFetcher {
        fn new(contents: &'static str) -> Self {
            Self {
                contents,
                calls: Cell::new(0),
            }
        }
    }

    impl WordListFetcher for FixtureFetcher {
        fn fetch(&self, destination: &Path) -> Result<(), GameError> {
            self.calls.set(self.calls.get() + 1);
            fs::write(destination, self.contents)?;
            Ok(())
        }
    }

    struct NoopFetcher;

    impl WordListFetcher for NoopFetcher {
        fn fetch(&self, _destination: &Path) -> Result<(), GameError> {
            Ok(())
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "daily_wordle_{}_{}.txt",
            name,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_from_text_filters_by_length_and_uppercases() {
        let dict = Dictionary::from_text("crane\nSlate\ncat\nplanet\n  raise  \n", 5);
        assert_eq!(dict.words(), &["CRANE", "SLATE", "RAISE"]);
        assert_eq!(dict.word_length(), 5);
    }

    #[test]
    fn test_from_text_keeps_first_occurrence_once() {
        let dict = Dictionary::from_text("crane\nslate\nCRANE\n", 5);
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.words()[0], "CRANE");
    }

    #[test]
    fn test_from_text_other_length() {
        let dict = Dictionary::from_text("cat\ndog\ncrane\nox\n", 3);
        assert_eq!(dict.words(), &["CAT", "DOG"]);
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let dict = Dictionary::from_text("crane\nslate\n", 5);
        assert!(dict.contains("CRANE"));
        assert!(dict.contains("slate"));
        assert!(!dict.contains("RAISE"));
    }

    #[test]
    fn test_empty_lines_never_count() {
        let dict = Dictionary::from_text("\n\n   \n", 5);
        assert!(dict.is_empty());
    }

    #[test]
    fn test_random_choice_is_deterministic() {
        let dict = Dictionary::from_text("crane\nslate\nraise\nstare\narise\nirate\n", 5);
        for seed in [0, 1, 42, 738_156] {
            assert_eq!(dict.random_choice(seed), dict.random_choice(seed));
        }
    }

    #[test]
    fn test_random_choice_same_for_equal_snapshots() {
        let a = Dictionary::from_text("crane\nslate\nraise\n", 5);
        let b = Dictionary::from_words(vec!["CRANE", "SLATE", "RAISE"], 5);
        assert_eq!(a.random_choice(7), b.random_choice(7));
    }

    #[test]
    fn test_random_choice_returns_member() {
        let dict = Dictionary::from_text("crane\nslate\nraise\n", 5);
        let word = dict.random_choice(99).unwrap();
        assert!(dict.contains(word));
    }

    #[test]
    fn test_random_choice_empty() {
        let dict = Dictionary::from_text("", 5);
        assert_eq!(dict.random_choice(1), None);
    }

    #[test]
    fn test_load_missing_file_is_source_unavailable() {
        let path = temp_path("missing");
        match Dictionary::load(&path, 5) {
            Err(GameError::SourceUnavailable { path: reported }) => assert_eq!(reported, path),
            other => panic!("Expected SourceUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_load_reads_file() {
        let path = temp_path("load");
        fs::write(&path, "crane\nslate\nplanet\n").unwrap();
        let dict = Dictionary::load(&path, 5).unwrap();
        assert_eq!(dict.len(), 2);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_or_fetch_fetches_once_when_missing() {
        let path = temp_path("fetch_once");
        let fetcher = FixtureFetcher::new("crane\nslate\n");
        let dict = Dictionary::load_or_fetch(&path, 5, &fetcher).unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(fetcher.calls.get(), 1);

        // Present now, so no second fetch.
        let dict = Dictionary::load_or_fetch(&path, 5, &fetcher).unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(fetcher.calls.get(), 1);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_or_fetch_second_failure_is_fatal() {
        let path = temp_path("fetch_noop");
        let result = Dictionary::load_or_fetch(&path, 5, &NoopFetcher);
        assert!(matches!(result, Err(GameError::SourceUnavailable { .. })));
    }

    #[test]
    fn test_default_word_list_path_file_name() {
        let path = default_word_list_path();
        assert_eq!(path.file_name().unwrap(), WORD_LIST_FILE_NAME);
    }

    fn fresh_temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "daily_wordle_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_http_fetcher_unreachable_url_leaves_nothing() {
        let dir = fresh_temp_dir("unreachable");
        let destination = dir.join("words.txt");
        let fetcher = HttpFetcher::new("http://127.0.0.1:1/words.txt");

        let result = fetcher.fetch(&destination);
        match result {
            Err(GameError::Acquisition { url, .. }) => {
                assert_eq!(url, "http://127.0.0.1:1/words.txt");
            }
            other => panic!("Expected Acquisition, got {other:?}"),
        }
        assert!(!destination.exists());
        assert!(!dir.join("words.part").exists());

        let loaded = Dictionary::load_or_fetch(&destination, 5, &fetcher);
        assert!(matches!(loaded, Err(GameError::Acquisition { .. })));
        assert!(!destination.exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_remove_partial_tolerates_missing_file() {
        let dir = fresh_temp_dir("remove_partial");
        let partial = dir.join("words.part");
        fs::write(&partial, "cra").unwrap();
        remove_partial(&partial);
        assert!(!partial.exists());
        // Already gone: only logged.
        remove_partial(&partial);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_http_fetcher_default_url() {
        assert_eq!(HttpFetcher::default().url(), CSW15_URL);
    }
}
