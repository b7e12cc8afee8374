use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use rust_stemmers::{Algorithm, Stemmer};

use super::stopwords::DEFAULT_STOPWORDS;

/// Normalizes raw words into index tokens
///
/// Both the crawl and query sides run every word through the same pipeline,
/// in this order:
///
/// 1. Strip everything that is not a letter
/// 2. Lowercase
/// 3. Drop the word if it is empty or a stop word
/// 4. Stem what remains (Porter stemmer, English)
///
/// A word that survives all four steps becomes a token; anything else is
/// discarded. Search terms must be normalized with the same stop word list
/// that built the index, otherwise lookups miss.
pub struct Normalizer {
    stopwords: HashSet<String>,
    stemmer: Stemmer,
}

impl Normalizer {
    /// Creates a normalizer with the built-in English stop word list
    pub fn new() -> Self {
        Self::with_stopwords(DEFAULT_STOPWORDS.iter().map(|w| w.to_string()))
    }

    /// Creates a normalizer with a caller-provided stop word list
    ///
    /// Entries are lowercased so membership tests line up with the
    /// lowercased tokens they are checked against.
    pub fn with_stopwords<I>(words: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            stopwords: words.into_iter().map(|w| w.to_lowercase()).collect(),
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Creates a normalizer from a stop word file
    ///
    /// The file holds one word per line; blank lines and lines starting
    /// with `#` are ignored.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the stop word file
    ///
    /// # Returns
    ///
    /// * `Ok(Normalizer)` - Normalizer using the file's words
    /// * `Err(io::Error)` - The file could not be read
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let words = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string);
        Ok(Self::with_stopwords(words))
    }

    /// Normalizes a single word into a token
    ///
    /// Returns `None` when the word is dropped: nothing left after
    /// stripping non-letters, or the lowercased form is a stop word.
    pub fn normalize(&self, word: &str) -> Option<String> {
        let letters: String = word
            .chars()
            .filter(|c| c.is_alphabetic())
            .collect::<String>()
            .to_lowercase();

        if letters.is_empty() || self.stopwords.contains(&letters) {
            return None;
        }

        Some(self.stemmer.stem(&letters).into_owned())
    }

    /// Splits raw page text on whitespace and normalizes every word
    ///
    /// Dropped words simply disappear from the output, so the result may
    /// be shorter than the input word count.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .filter_map(|word| self.normalize(word))
            .collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_strips_non_letters() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.normalize("hello123"), Some("hello".to_string()));
        assert_eq!(normalizer.normalize("wor-ld!"), Some("world".to_string()));
    }

    #[test]
    fn test_lowercases() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.normalize("RUST"), Some("rust".to_string()));
    }

    #[test]
    fn test_drops_pure_digits_and_punctuation() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.normalize("12345"), None);
        assert_eq!(normalizer.normalize("!!!"), None);
        assert_eq!(normalizer.normalize(""), None);
    }

    #[test]
    fn test_drops_stop_words() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.normalize("the"), None);
        assert_eq!(normalizer.normalize("The"), None);
        assert_eq!(normalizer.normalize("and"), None);
    }

    #[test]
    fn test_stems_plurals_and_gerunds() {
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.normalize("cats"), Some("cat".to_string()));
        assert_eq!(normalizer.normalize("running"), Some("run".to_string()));
        assert_eq!(normalizer.normalize("jumping"), Some("jump".to_string()));
        assert_eq!(normalizer.normalize("crawled"), Some("crawl".to_string()));
    }

    #[test]
    fn test_stop_word_checked_before_stemming() {
        // "being" is in the default list and must be dropped, not stemmed.
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.normalize("being"), None);
    }

    #[test]
    fn test_tokenize_splits_and_filters() {
        let normalizer = Normalizer::new();
        let tokens = normalizer.tokenize("The cats are running, 42 fast!");
        assert_eq!(
            tokens,
            vec!["cat".to_string(), "run".to_string(), "fast".to_string()]
        );
    }

    #[test]
    fn test_custom_stop_words() {
        let normalizer = Normalizer::with_stopwords(vec!["zebra".to_string()]);
        assert_eq!(normalizer.normalize("zebra"), None);
        // "the" is not in the custom list, so it survives.
        assert_eq!(normalizer.normalize("the"), Some("the".to_string()));
    }

    #[test]
    fn test_from_file_reads_words() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# comment line").unwrap();
        writeln!(file, "alpha").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  beta  ").unwrap();
        file.flush().unwrap();

        let normalizer = Normalizer::from_file(file.path()).unwrap();
        assert_eq!(normalizer.normalize("alpha"), None);
        assert_eq!(normalizer.normalize("beta"), None);
        assert_eq!(normalizer.normalize("gamma"), Some("gamma".to_string()));
    }

    #[test]
    fn test_from_file_missing_is_error() {
        let result = Normalizer::from_file(Path::new("/nonexistent/stopwords.txt"));
        assert!(result.is_err());
    }
}
