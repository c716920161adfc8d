//! Sectioned key-value files
//!
//! Settings and themes share one format:
//!
//! ```text
//! # comment
//! [Editor]
//! Font = Monospace
//! FontSize: 12
//!
//! [Colors]
//! Keyword = 1a2b3c
//! ```
//!
//! Section names are case-sensitive, keys are not. Keys keep the spelling
//! they were first written with so that saving a file does not rename them.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    fn set(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }
}

/// Parsed contents of a sectioned configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ini {
    sections: Vec<Section>,
}

impl Ini {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse file contents
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let mut ini = Ini::new();
        let mut current: Option<usize> = None;

        for (idx, line) in contents.lines().enumerate() {
            let trimmed = line.trim();

            // Skip empty lines and comments
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            // Section header [Name]
            if trimmed.starts_with('[') && trimmed.ends_with(']') {
                let name = trimmed[1..trimmed.len() - 1].trim();
                current = Some(ini.section_index_or_insert(name));
                continue;
            }

            let separator = trimmed.find(['=', ':']);
            match (current, separator) {
                (Some(section), Some(pos)) => {
                    let key = trimmed[..pos].trim();
                    let value = trimmed[pos + 1..].trim();
                    if key.is_empty() {
                        return Err(syntax_error(idx, line));
                    }
                    ini.sections[section].set(key, value);
                }
                _ => return Err(syntax_error(idx, line)),
            }
        }

        Ok(ini)
    }

    /// Read and parse a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::unreadable(path, &e))?;
        Self::parse(&contents)
    }

    /// Write the document to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        fs::write(path, self.to_string()).map_err(|e| ConfigError::Unwritable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Whether a section with this exact name exists
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.iter().any(|s| s.name == name)
    }

    /// Look up a value
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.name == section)
            .and_then(|s| s.get(key))
    }

    /// Set a value, creating the section if needed
    pub fn set(&mut self, section: &str, key: &str, value: impl fmt::Display) {
        let idx = self.section_index_or_insert(section);
        self.sections[idx].set(key, &value.to_string());
    }

    fn section_index_or_insert(&mut self, name: &str) -> usize {
        match self.sections.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        }
    }
}

impl fmt::Display for Ini {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "[{}]", section.name)?;
            for (key, value) in &section.entries {
                writeln!(f, "{} = {}", key, value)?;
            }
        }
        Ok(())
    }
}

fn syntax_error(idx: usize, line: &str) -> ConfigError {
    ConfigError::Syntax {
        line: idx + 1,
        text: line.trim().to_string(),
    }
}
