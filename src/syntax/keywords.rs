//! Keyword lists
//!
//! Keyword files are plain text with one keyword per line. Surrounding
//! whitespace is trimmed, blank lines are skipped and repeats are dropped.

use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::error::ConfigError;

/// Ordered set of distinct keywords
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    words: Vec<String>,
}

impl KeywordSet {
    /// Build a set from words, keeping first occurrences in order
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for word in words {
            let word = word.as_ref().trim();
            if !word.is_empty() && !set.contains(word) {
                set.words.push(word.to_string());
            }
        }
        set
    }

    /// Parse keyword file contents
    pub fn parse(contents: &str) -> Self {
        Self::new(contents.lines())
    }

    /// Read a keyword file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::unreadable(path, &e))?;
        let set = Self::parse(&contents);
        debug!("Loaded {} keywords from {}", set.len(), path.display());
        Ok(set)
    }

    /// Read a keyword file, falling back to an empty set
    pub fn load_or_empty(path: &Path) -> (Self, Option<ConfigError>) {
        match Self::load(path) {
            Ok(set) => (set, None),
            Err(err) => {
                warn!("Unable to load keywords: {}", err);
                (Self::default(), Some(err))
            }
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.as_str())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_dedups() {
        let set = KeywordSet::parse("  if\nelse  \n\n\t\nif\nwhile\n");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["if", "else", "while"]);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (set, err) = KeywordSet::load_or_empty(Path::new("/nonexistent/keywords.txt"));
        assert!(set.is_empty());
        assert!(matches!(err, Some(ConfigError::Unreadable { .. })));
    }

    #[test]
    fn test_bundled_python_keywords() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("configs/keywords/python_keywords.txt");
        let set = KeywordSet::load(&path).unwrap();
        assert!(set.contains("def"));
        assert!(set.contains("lambda"));
        assert!(!set.contains(""));
    }
}
