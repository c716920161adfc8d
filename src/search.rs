//! Find and replace
//!
//! A [`Search`] holds one compiled query and remembers the last match so
//! repeated `find_next` calls walk forward through the text, the way the
//! find dialog steps through a document.

use regex::{NoExpand, Regex, RegexBuilder};
use unicode_width::UnicodeWidthStr;

use crate::error::PatternError;

/// How the query is interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindOptions {
    /// Match case exactly
    pub case_sensitive: bool,
    /// Only match whole words (ignored in regex mode)
    pub whole_words: bool,
    /// Treat the query as a regular expression
    pub regex: bool,
}

/// Byte range of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub start: usize,
    pub end: usize,
}

/// A compiled query plus the position of the last match
#[derive(Debug, Clone)]
pub struct Search {
    pattern: Regex,
    options: FindOptions,
    last: Option<Match>,
    resume: usize,
}

impl Search {
    pub fn new(query: &str, options: FindOptions) -> Result<Self, PatternError> {
        let source = if options.regex {
            query.to_string()
        } else if options.whole_words {
            format!(r"\b{}\b", regex::escape(query))
        } else {
            regex::escape(query)
        };

        let pattern = RegexBuilder::new(&source)
            .case_insensitive(!options.case_sensitive)
            .build()
            .map_err(|e| PatternError::new(query, &e))?;

        Ok(Self {
            pattern,
            options,
            last: None,
            resume: 0,
        })
    }

    pub fn options(&self) -> FindOptions {
        self.options
    }

    /// The match found by the last `find_next`, if still active
    pub fn last_match(&self) -> Option<Match> {
        self.last
    }

    /// Find the next match after the previous one
    ///
    /// The search resumes one character past the previous match start.
    /// When nothing is found the last match is forgotten, so the next call
    /// starts from the beginning again.
    pub fn find_next(&mut self, text: &str) -> Option<Match> {
        let found = if self.resume <= text.len() && text.is_char_boundary(self.resume) {
            self.pattern.find_at(text, self.resume)
        } else {
            None
        };

        match found {
            Some(m) => {
                let found = Match {
                    start: m.start(),
                    end: m.end(),
                };
                self.last = Some(found);
                self.resume = next_boundary(text, found.start);
                Some(found)
            }
            None => {
                self.reset();
                None
            }
        }
    }

    /// Replace the active match
    ///
    /// Nothing happens unless a match is active and the text still matches
    /// at that position. Returns whether a replacement was made.
    pub fn replace(&mut self, text: &mut String, replacement: &str) -> bool {
        let Some(last) = self.last else {
            return false;
        };
        if last.start > text.len() || !text.is_char_boundary(last.start) {
            self.reset();
            return false;
        }
        let found = self.pattern.captures_at(text, last.start).and_then(|caps| {
            let whole = caps.get(0).filter(|m| m.start() == last.start)?;
            let mut inserted = String::new();
            if self.options.regex {
                caps.expand(replacement, &mut inserted);
            } else {
                inserted.push_str(replacement);
            }
            Some((whole.range(), inserted))
        });
        let Some((range, inserted)) = found else {
            self.reset();
            return false;
        };

        text.replace_range(range.clone(), &inserted);
        self.last = None;
        self.resume = range.start + inserted.len();
        true
    }

    /// Replace every match in one pass
    ///
    /// Matches are found in the original text, so a replacement containing
    /// the query is never matched again. Returns the number of replacements.
    pub fn replace_all(&mut self, text: &mut String, replacement: &str) -> usize {
        let count = self.pattern.find_iter(text).count();
        if count > 0 {
            let replaced = if self.options.regex {
                self.pattern.replace_all(text, replacement)
            } else {
                self.pattern.replace_all(text, NoExpand(replacement))
            };
            *text = replaced.into_owned();
        }
        self.reset();
        count
    }

    /// Every match in `text`
    pub fn matches(&self, text: &str) -> Vec<Match> {
        self.pattern
            .find_iter(text)
            .map(|m| Match {
                start: m.start(),
                end: m.end(),
            })
            .collect()
    }

    fn reset(&mut self) {
        self.last = None;
        self.resume = 0;
    }
}

/// 1-based line and display column of a byte offset
pub fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    let head = &text[..offset];
    let line_start = head.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line = head.matches('\n').count() + 1;
    (line, head[line_start..].width() + 1)
}

fn next_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(pos + 1)
}
