//! Language profiles
//!
//! A profile carries the language-specific constants the pattern table is
//! built from: comment markers, the class-definition pattern, which keyword
//! file to read, and the words that drive smart indentation.

use std::path::Path;

/// Language-specific highlighting and indentation constants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageProfile {
    /// Registry name (e.g., "PythonHighlighter")
    pub name: String,
    /// File extensions (e.g., ["py", "pyw"])
    pub extensions: Vec<String>,
    /// Token that starts a comment running to end of line
    pub comment_leader: String,
    /// Opening and closing tokens of comments spanning lines
    pub block_comment: Option<(String, String)>,
    /// Pattern whose first capture group is a defined class name
    pub class_pattern: String,
    /// Keyword file name, looked up in the `keywords` config directory
    pub keyword_file: String,
    /// First words that open an indented block
    pub indenters: Vec<String>,
    /// First words after which the block ends
    pub dedenters: Vec<String>,
}

impl LanguageProfile {
    /// Create a profile with no comments, keywords or indent words
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            extensions: Vec::new(),
            comment_leader: String::new(),
            block_comment: None,
            class_pattern: String::new(),
            keyword_file: String::new(),
            indenters: Vec::new(),
            dedenters: Vec::new(),
        }
    }

    /// Add a file extension
    pub fn add_extension(&mut self, ext: &str) {
        self.extensions.push(ext.to_string());
    }

    /// Whether a file name carries one of this profile's extensions
    pub fn matches_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    pub fn is_indenter(&self, word: &str) -> bool {
        self.indenters.iter().any(|w| w == word)
    }

    pub fn is_dedenter(&self, word: &str) -> bool {
        self.dedenters.iter().any(|w| w == word)
    }
}

pub(crate) fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_path() {
        let mut profile = LanguageProfile::new("Test");
        profile.add_extension("py");
        assert!(profile.matches_path(Path::new("main.py")));
        assert!(profile.matches_path(Path::new("MAIN.PY")));
        assert!(!profile.matches_path(Path::new("main.rs")));
        assert!(!profile.matches_path(Path::new("Makefile")));
    }
}
