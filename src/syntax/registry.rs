//! Highlighter registry
//!
//! A closed map from highlighter name (the `Extensions.Highlighter` setting)
//! to a factory producing that highlighter's language profile. Populated at
//! startup and looked up by name.

use std::collections::HashMap;
use std::path::Path;

use super::builtin;
use super::profile::LanguageProfile;
use crate::error::ConfigError;

/// Factory producing a language profile
pub type ProfileFactory = fn() -> LanguageProfile;

/// Name used when settings do not pick a known highlighter
pub const DEFAULT_HIGHLIGHTER: &str = "PythonHighlighter";

/// Registry of known highlighters
pub struct Registry {
    factories: HashMap<String, ProfileFactory>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Create a registry holding the built-in highlighters
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(builtin::python::NAME, builtin::python_profile);
        registry.register(builtin::cpp::NAME, builtin::cpp_profile);
        registry
    }

    /// Register (or replace) a factory
    pub fn register(&mut self, name: &str, factory: ProfileFactory) {
        self.factories.insert(name.to_string(), factory);
    }

    /// Create the profile registered under `name`
    pub fn create(&self, name: &str) -> Result<LanguageProfile, ConfigError> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| ConfigError::UnknownHighlighter(name.to_string()))
    }

    /// Find a profile whose extensions match a file name
    pub fn detect(&self, path: &Path) -> Option<LanguageProfile> {
        self.names()
            .into_iter()
            .filter_map(|name| self.factories.get(name).map(|factory| factory()))
            .find(|profile| profile.matches_path(path))
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.factories.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_profile() -> LanguageProfile {
        let mut profile = LanguageProfile::new("PlainHighlighter");
        profile.add_extension("txt");
        profile
    }

    #[test]
    fn test_builtins_by_name() {
        let registry = Registry::with_builtins();
        assert_eq!(registry.names(), vec!["CppHighlighter", "PythonHighlighter"]);

        let python = registry.create(DEFAULT_HIGHLIGHTER).unwrap();
        assert_eq!(python.comment_leader, "#");
        assert_eq!(python.keyword_file, "python_keywords.txt");
    }

    #[test]
    fn test_unknown_name() {
        let registry = Registry::with_builtins();
        assert_eq!(
            registry.create("RubyHighlighter"),
            Err(ConfigError::UnknownHighlighter("RubyHighlighter".to_string()))
        );
    }

    #[test]
    fn test_register_and_detect() {
        let mut registry = Registry::with_builtins();
        registry.register("PlainHighlighter", plain_profile);

        assert_eq!(
            registry.detect(Path::new("notes.txt")).map(|p| p.name),
            Some("PlainHighlighter".to_string())
        );
        assert_eq!(
            registry.detect(Path::new("main.cpp")).map(|p| p.name),
            Some("CppHighlighter".to_string())
        );
        assert_eq!(
            registry.detect(Path::new("script.py")).map(|p| p.name),
            Some("PythonHighlighter".to_string())
        );
        assert!(registry.detect(Path::new("no_extension")).is_none());
    }
}
