//! Highlighter sessions
//!
//! A session binds one rule table to one editable surface and keeps the
//! per-line results: an arena of exit states (one byte per line) and the
//! flattened spans ready for painting. Edits re-highlight from the first
//! changed line and stop as soon as a line's exit state matches the cached
//! one, so an edit costs the minimal suffix of lines it actually affects.

use std::ops::Range;

use log::debug;

use super::builder::{build, RuleTable};
use super::highlighter::highlight;
use super::keywords::KeywordSet;
use super::profile::LanguageProfile;
use super::rules::CommentState;
use super::style::Span;
use super::theme::{Palette, Theme};
use crate::error::Error;

/// Line-oriented text a session can highlight
pub trait TextSurface {
    /// Number of lines
    fn line_count(&self) -> usize;
    /// Text of a line, without its terminator
    fn line(&self, idx: usize) -> Option<&str>;
}

impl<T: AsRef<str>> TextSurface for [T] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, idx: usize) -> Option<&str> {
        self.get(idx).map(|l| l.as_ref())
    }
}

impl<T: AsRef<str>> TextSurface for Vec<T> {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, idx: usize) -> Option<&str> {
        self.get(idx).map(|l| l.as_ref())
    }
}

/// Per-line highlighting results
#[derive(Debug, Default)]
struct HighlightCache {
    /// Exit state per line
    line_states: Vec<CommentState>,
    /// Flattened spans per line
    line_spans: Vec<Vec<Span>>,
}

impl HighlightCache {
    fn len(&self) -> usize {
        self.line_states.len()
    }

    fn reset(&mut self, line_count: usize) {
        self.line_states.clear();
        self.line_states.resize(line_count, CommentState::Outside);
        self.line_spans.clear();
        self.line_spans.resize(line_count, Vec::new());
    }

    fn insert(&mut self, at: usize, count: usize, state: CommentState) {
        self.line_states
            .splice(at..at, std::iter::repeat(state).take(count));
        self.line_spans
            .splice(at..at, std::iter::repeat(Vec::new()).take(count));
    }

    fn remove(&mut self, range: Range<usize>) {
        self.line_states.drain(range.clone());
        self.line_spans.drain(range);
    }

    /// State the line at `idx` starts in
    fn entry_state(&self, idx: usize) -> CommentState {
        if idx == 0 {
            CommentState::Outside
        } else {
            self.line_states[idx - 1]
        }
    }
}

/// A highlighter attached to one surface
pub struct Session {
    profile: LanguageProfile,
    theme: Theme,
    keywords: KeywordSet,
    table: RuleTable,
    cache: HighlightCache,
    warnings: Vec<Error>,
}

impl Session {
    /// Build the rule table and highlight every line of `surface`
    pub fn attach<S>(profile: LanguageProfile, theme: Theme, keywords: KeywordSet, surface: &S) -> Self
    where
        S: TextSurface + ?Sized,
    {
        let (table, warnings) = build(&keywords, &theme, &profile);
        let mut session = Self {
            profile,
            theme,
            keywords,
            table,
            cache: HighlightCache::default(),
            warnings,
        };
        session.highlight_all(surface);
        debug!(
            "Attached {} to {} lines",
            session.profile.name,
            surface.line_count()
        );
        session
    }

    /// Replace the theme, rebuild the table and re-highlight everything
    ///
    /// Returns the warnings produced by the rebuild.
    pub fn on_theme_changed<S>(&mut self, theme: Theme, surface: &S) -> &[Error]
    where
        S: TextSurface + ?Sized,
    {
        self.theme = theme;
        self.rebuild(surface)
    }

    /// Replace the keyword set, rebuild the table and re-highlight everything
    pub fn on_keywords_changed<S>(&mut self, keywords: KeywordSet, surface: &S) -> &[Error]
    where
        S: TextSurface + ?Sized,
    {
        self.keywords = keywords;
        self.rebuild(surface)
    }

    /// Re-highlight after the text of one line changed
    ///
    /// Returns the lines whose spans were recomputed.
    pub fn on_text_changed<S>(&mut self, surface: &S, line: usize) -> Range<usize>
    where
        S: TextSurface + ?Sized,
    {
        if self.cache.len() != surface.line_count() {
            debug!("Line count out of sync, re-highlighting all lines");
            return self.highlight_all(surface);
        }
        if line >= surface.line_count() {
            return line..line;
        }
        self.rehighlight(surface, line, line + 1)
    }

    /// Re-highlight after `count` lines were inserted before line `at`
    pub fn on_lines_inserted<S>(&mut self, surface: &S, at: usize, count: usize) -> Range<usize>
    where
        S: TextSurface + ?Sized,
    {
        if at > self.cache.len() || self.cache.len() + count != surface.line_count() {
            debug!("Insert out of sync, re-highlighting all lines");
            return self.highlight_all(surface);
        }
        // New lines start out claiming the state the line before them ended
        // in, so the scan stops once the old successor would see no change.
        let carried = self.cache.entry_state(at);
        self.cache.insert(at, count, carried);
        self.rehighlight(surface, at, at + count)
    }

    /// Re-highlight after `count` lines starting at `at` were removed
    pub fn on_lines_removed<S>(&mut self, surface: &S, at: usize, count: usize) -> Range<usize>
    where
        S: TextSurface + ?Sized,
    {
        let end = at.saturating_add(count).min(self.cache.len());
        if at > end || self.cache.len() - (end - at) != surface.line_count() {
            debug!("Removal out of sync, re-highlighting all lines");
            return self.highlight_all(surface);
        }
        self.cache.remove(at..end);
        if at >= surface.line_count() {
            return at..at;
        }
        self.rehighlight(surface, at, at + 1)
    }

    /// Flattened spans of a line, ready for painting
    pub fn spans(&self, line: usize) -> &[Span] {
        self.cache
            .line_spans
            .get(line)
            .map(|s| s.as_slice())
            .unwrap_or(&[])
    }

    /// Comment state at the end of a line
    pub fn state(&self, line: usize) -> CommentState {
        self.cache
            .line_states
            .get(line)
            .copied()
            .unwrap_or_default()
    }

    /// Surface-wide colors of the active theme
    pub fn palette(&self) -> Palette {
        self.table.palette
    }

    /// Warnings from the last table build
    pub fn warnings(&self) -> &[Error] {
        &self.warnings
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn profile(&self) -> &LanguageProfile {
        &self.profile
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    /// Release the surface
    pub fn detach(self) {
        debug!("Detached {}", self.profile.name);
    }

    fn rebuild<S>(&mut self, surface: &S) -> &[Error]
    where
        S: TextSurface + ?Sized,
    {
        // The new table is complete before it replaces the old one
        let (table, warnings) = build(&self.keywords, &self.theme, &self.profile);
        self.table = table;
        self.warnings = warnings;
        self.highlight_all(surface);
        &self.warnings
    }

    fn highlight_all<S>(&mut self, surface: &S) -> Range<usize>
    where
        S: TextSurface + ?Sized,
    {
        let count = surface.line_count();
        self.cache.reset(count);
        self.rehighlight(surface, 0, count)
    }

    /// Highlight from `first`; every line before `forced_until` is
    /// recomputed, later lines only while exit states keep changing
    fn rehighlight<S>(&mut self, surface: &S, first: usize, forced_until: usize) -> Range<usize>
    where
        S: TextSurface + ?Sized,
    {
        let count = surface.line_count().min(self.cache.len());
        let mut idx = first;

        while idx < count {
            let text = surface.line(idx).unwrap_or_default();
            let result = highlight(&self.table, text, self.cache.entry_state(idx));
            let previous = self.cache.line_states[idx];

            self.cache.line_states[idx] = result.end_state;
            self.cache.line_spans[idx] = Span::flatten(text.len(), &result.spans);
            idx += 1;

            if idx >= forced_until && result.end_state == previous {
                break;
            }
        }

        first..idx
    }
}
