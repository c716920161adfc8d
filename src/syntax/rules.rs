//! Pattern rules for syntax highlighting
//!
//! This module defines the rule types the pattern table is made of and the
//! per-line comment state threaded from one line to the next.

use regex::Regex;

use super::style::{Span, Style};
use crate::error::PatternError;

/// A single (pattern, style) pair
///
/// Matches are found leftmost-first and never overlap: after a match the
/// scan resumes at its end. When `group` is non-zero only that capture
/// group is styled, which lets a pattern require context (such as the `(`
/// after a function name) without coloring it.
#[derive(Debug, Clone)]
pub struct HighlightRule {
    /// Name for debugging
    pub name: String,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Style applied to matches
    pub style: Style,
    /// Capture group to style (0 = whole match)
    pub group: usize,
}

impl HighlightRule {
    /// Create a rule styling whole matches
    pub fn new(name: &str, pattern: &str, style: Style) -> Result<Self, PatternError> {
        Self::with_group(name, pattern, style, 0)
    }

    /// Create a rule styling one capture group of each match
    pub fn with_group(
        name: &str,
        pattern: &str,
        style: Style,
        group: usize,
    ) -> Result<Self, PatternError> {
        let regex = Regex::new(pattern).map_err(|e| PatternError::new(pattern, &e))?;
        if group >= regex.captures_len() {
            return Err(PatternError {
                pattern: pattern.to_string(),
                reason: format!("no capture group {}", group),
            });
        }
        Ok(Self {
            name: name.to_string(),
            pattern: regex,
            style,
            group,
        })
    }

    /// Find the first match at or after `start`
    ///
    /// Returns the styled byte range and the offset to resume scanning from.
    pub fn find_at(&self, text: &str, start: usize) -> Option<(usize, usize, usize)> {
        if start > text.len() {
            return None;
        }
        let caps = self.pattern.captures_at(text, start)?;
        let whole = caps.get(0)?;
        let styled = caps.get(self.group).unwrap_or(whole);
        Some((styled.start(), styled.end(), whole.end()))
    }

    /// Scan the whole line and return one span per match
    pub fn spans(&self, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut pos = 0;

        while let Some((start, end, resume)) = self.find_at(text, pos) {
            if start < end {
                spans.push(Span::new(start, end, self.style));
            }
            pos = if resume > pos { resume } else { next_char_boundary(text, pos) };
            if pos > text.len() {
                break;
            }
        }

        spans
    }
}

impl PartialEq for HighlightRule {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.pattern.as_str() == other.pattern.as_str()
            && self.style == other.style
            && self.group == other.group
    }
}

impl Eq for HighlightRule {}

/// Delimiters of a comment that may span lines
#[derive(Debug, Clone)]
pub struct CommentRule {
    /// Pattern that opens the comment
    pub start: Regex,
    /// Pattern that closes the comment
    pub end: Regex,
    /// Style for the comment text (None = track state but do not paint)
    pub style: Option<Style>,
}

impl CommentRule {
    /// Create a rule from literal delimiter tokens
    pub fn new(start: &str, end: &str, style: Option<Style>) -> Result<Self, PatternError> {
        let compile = |token: &str| {
            if token.is_empty() {
                return Err(PatternError {
                    pattern: String::new(),
                    reason: "empty comment delimiter".to_string(),
                });
            }
            let pattern = regex::escape(token);
            Regex::new(&pattern).map_err(|e| PatternError::new(&pattern, &e))
        };
        Ok(Self {
            start: compile(start)?,
            end: compile(end)?,
            style,
        })
    }

    /// Find the opening token at or after `from`
    pub fn find_start(&self, text: &str, from: usize) -> Option<(usize, usize)> {
        if from > text.len() {
            return None;
        }
        self.start.find_at(text, from).map(|m| (m.start(), m.end()))
    }

    /// Find the closing token at or after `from`, returning the offset just past it
    pub fn find_end(&self, text: &str, from: usize) -> Option<usize> {
        if from > text.len() {
            return None;
        }
        self.end.find_at(text, from).map(|m| m.end())
    }
}

impl PartialEq for CommentRule {
    fn eq(&self, other: &Self) -> bool {
        self.start.as_str() == other.start.as_str()
            && self.end.as_str() == other.end.as_str()
            && self.style == other.style
    }
}

impl Eq for CommentRule {}

/// Comment state at the end of a line
///
/// Stored once per line; the state of line N depends only on the state of
/// line N-1 and the text of line N.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CommentState {
    /// Not inside a multi-line comment
    #[default]
    Outside = 0,
    /// Inside an unterminated multi-line comment
    Inside = 1,
}

impl CommentState {
    /// Check if we're inside a multi-line comment
    pub fn is_inside(&self) -> bool {
        *self == CommentState::Inside
    }

    /// Raw state byte
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Result of highlighting a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightResult {
    /// Spans in application order; later spans win where they overlap
    pub spans: Vec<Span>,
    /// State at end of line (for next line)
    pub end_state: CommentState,
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    let mut next = pos + 1;
    while next < text.len() && !text.is_char_boundary(next) {
        next += 1;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::style::Rgb;

    fn style() -> Style {
        Style::fg(Rgb::new(1, 2, 3))
    }

    #[test]
    fn test_rule_find_at() {
        let rule = HighlightRule::new("number", r"\d+", style()).unwrap();
        assert_eq!(rule.find_at("abc 123 def", 0), Some((4, 7, 7)));
        assert_eq!(rule.find_at("abc 123 def", 5), Some((5, 7, 7)));
        assert_eq!(rule.find_at("no numbers", 0), None);
    }

    #[test]
    fn test_rule_spans_do_not_overlap() {
        let rule = HighlightRule::new("word", r"\bif\b", style()).unwrap();
        let spans = rule.spans("if x if y");
        assert_eq!(
            spans,
            vec![Span::new(0, 2, style()), Span::new(5, 7, style())]
        );
    }

    #[test]
    fn test_rule_styles_group_only() {
        let rule =
            HighlightRule::with_group("function", r"\b([A-Za-z0-9_]+)\(", style(), 1).unwrap();
        let spans = rule.spans("f(g(x))");
        assert_eq!(
            spans,
            vec![Span::new(0, 1, style()), Span::new(2, 3, style())]
        );
    }

    #[test]
    fn test_rule_empty_matches_terminate() {
        let rule = HighlightRule::new("empty", r"x*", style()).unwrap();
        let spans = rule.spans("aéxxb");
        assert_eq!(spans, vec![Span::new(3, 5, style())]);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = HighlightRule::new("bad", r"\b(if\b", style()).unwrap_err();
        assert_eq!(err.pattern, r"\b(if\b");
        assert!(HighlightRule::with_group("nogroup", r"abc", style(), 1).is_err());
    }

    #[test]
    fn test_comment_rule_tokens_are_literal() {
        let rule = CommentRule::new("/*", "*/", Some(style())).unwrap();
        assert_eq!(rule.find_start("a /* b */", 0), Some((2, 4)));
        assert_eq!(rule.find_end("a /* b */", 4), Some(9));
        assert_eq!(rule.find_end("a /* b", 4), None);
        assert!(CommentRule::new("", "*/", None).is_err());
    }

    #[test]
    fn test_comment_state() {
        assert!(!CommentState::default().is_inside());
        assert!(CommentState::Inside.is_inside());
        assert_eq!(CommentState::Outside.as_u8(), 0);
        assert_eq!(CommentState::Inside.as_u8(), 1);
    }
}
