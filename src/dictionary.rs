//! Autocomplete dictionary
//!
//! A plain word list, one word per line. Completion is offered once at
//! least two characters of a word have been typed.

use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::error::ConfigError;

/// Word list used when the configured one cannot be read
pub const SYSTEM_WORDS: &str = "/usr/share/dict/words";

/// Shortest prefix that triggers completion
pub const MIN_PREFIX: usize = 2;

/// Characters that end a word
const END_OF_WORD: &str = "~!@#$%^&*()_+{}|:\"<>?,./;'[]\\-=";

/// Words offered for completion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    /// Build a dictionary from words
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Read a word list
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::unreadable(path, &e))?;
        let dictionary = Self::new(contents.lines());
        debug!("Loaded {} words from {}", dictionary.len(), path.display());
        Ok(dictionary)
    }

    /// Read the configured list, then the system list, then give up
    ///
    /// The error returned is the one for the configured list.
    pub fn load_or_system(path: Option<&Path>) -> (Self, Option<ConfigError>) {
        let configured = match path {
            Some(path) => match Self::load(path) {
                Ok(dictionary) => return (dictionary, None),
                Err(err) => {
                    warn!("Unable to load keyword dictionary: {}", err);
                    Some(err)
                }
            },
            None => None,
        };

        match Self::load(Path::new(SYSTEM_WORDS)) {
            Ok(dictionary) => (dictionary, configured),
            Err(err) => {
                warn!("Dictionary not in anticipated location: {}", err);
                (Self::default(), configured.or(Some(err)))
            }
        }
    }

    /// Words starting with `prefix`, ignoring case
    ///
    /// Prefixes shorter than [`MIN_PREFIX`] characters get no completions,
    /// and a word equal to the prefix is not offered.
    pub fn completions(&self, prefix: &str) -> Vec<&str> {
        if prefix.chars().count() < MIN_PREFIX {
            return Vec::new();
        }
        let prefix = prefix.to_lowercase();
        self.words
            .iter()
            .filter(|w| w.len() > prefix.len() && w.to_lowercase().starts_with(&prefix))
            .map(|w| w.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// The partial word ending at byte offset `col` of `line`
pub fn word_before(line: &str, col: usize) -> &str {
    let mut col = col.min(line.len());
    while !line.is_char_boundary(col) {
        col -= 1;
    }
    let head = &line[..col];
    let start = head
        .char_indices()
        .rev()
        .find(|&(_, c)| c.is_whitespace() || END_OF_WORD.contains(c))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    &head[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> Dictionary {
        Dictionary::new(["print", "Printer", "property", "pr", "range", "  ", "prin"])
    }

    #[test]
    fn test_completions_ignore_case() {
        let dict = dictionary();
        assert_eq!(dict.completions("PRI"), vec!["print", "Printer", "prin"]);
        assert_eq!(dict.completions("pr"), vec!["print", "Printer", "property", "prin"]);
    }

    #[test]
    fn test_short_prefix_gets_nothing() {
        let dict = dictionary();
        assert!(dict.completions("p").is_empty());
        assert!(dict.completions("").is_empty());
    }

    #[test]
    fn test_blank_words_dropped() {
        assert_eq!(dictionary().len(), 6);
    }

    #[test]
    fn test_word_before() {
        assert_eq!(word_before("x = pri", 7), "pri");
        assert_eq!(word_before("foo(bar", 7), "bar");
        assert_eq!(word_before("a.b_c", 5), "c");
        assert_eq!(word_before("abc", 2), "ab");
        assert_eq!(word_before("", 0), "");
        assert_eq!(word_before("x ", 2), "");
        assert_eq!(word_before("naïve", 3), "na");
    }

    #[test]
    fn test_missing_configured_list() {
        let (_, err) = Dictionary::load_or_system(Some(Path::new("/nonexistent/words.txt")));
        assert!(matches!(err, Some(ConfigError::Unreadable { .. })));
    }
}
