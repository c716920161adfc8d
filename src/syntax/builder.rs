//! Pattern table construction
//!
//! Turns a keyword set, a theme and a language profile into the ordered
//! rule list the block highlighter applies. Problems with individual
//! keywords or colors drop the affected rules and are reported as
//! warnings; building itself never fails.

use std::path::Path;

use log::{debug, warn};

use super::keywords::KeywordSet;
use super::profile::LanguageProfile;
use super::rules::{CommentRule, HighlightRule};
use super::style::Style;
use super::theme::{Palette, Role, Theme};
use crate::error::{Error, PatternError};

/// Double-quoted literal, one literal per match, backslash escapes honoured
const DOUBLE_QUOTED: &str = r#""(?:[^"\\]|\\.)*""#;
/// Single-quoted literal, one literal per match, backslash escapes honoured
const SINGLE_QUOTED: &str = r"'(?:[^'\\]|\\.)*'";
/// Identifier directly followed by an opening parenthesis
const FUNCTION_CALL: &str = r"\b([A-Za-z0-9_]+)\(";

/// Compiled highlighting rules for one theme, keyword set and profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    /// Rules in application order; later rules win on overlap
    pub rules: Vec<HighlightRule>,
    /// Multi-line comment delimiters, applied after all rules
    pub comment: Option<CommentRule>,
    /// Surface-wide colors
    pub palette: Palette,
}

impl RuleTable {
    /// Find a rule by name
    pub fn rule(&self, name: &str) -> Option<&HighlightRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Build the rule table
///
/// Order: one rule per keyword, then class names, single-line comments,
/// double- and single-quoted strings, and function-call names. Strings and
/// comments come after keywords so they override keyword coloring.
pub fn build(keywords: &KeywordSet, theme: &Theme, profile: &LanguageProfile) -> (RuleTable, Vec<Error>) {
    let mut warnings = Vec::new();
    let mut rules = Vec::new();

    if let Some(color) = theme.resolve_or_warn(Role::Keyword, &mut warnings) {
        let style = Style::fg(color).with_bold();
        for keyword in keywords.iter() {
            let pattern = format!(r"\b{}\b", keyword);
            push_rule(
                &mut rules,
                &mut warnings,
                HighlightRule::new(&format!("keyword:{}", keyword), &pattern, style),
            );
        }
    }

    if !profile.class_pattern.is_empty() {
        push_rule(
            &mut rules,
            &mut warnings,
            HighlightRule::with_group("class", &profile.class_pattern, Style::bold(), 1),
        );
    }

    if let Some(color) = theme.resolve_or_warn(Role::SingleLineComment, &mut warnings) {
        if !profile.comment_leader.is_empty() {
            let pattern = format!("{}.*", regex::escape(&profile.comment_leader));
            push_rule(
                &mut rules,
                &mut warnings,
                HighlightRule::new("line_comment", &pattern, Style::fg(color)),
            );
        }
    }

    let comment = profile.block_comment.as_ref().and_then(|(start, end)| {
        let style = theme
            .resolve_or_warn(Role::MultiLineComment, &mut warnings)
            .map(Style::fg);
        match CommentRule::new(start, end, style) {
            Ok(rule) => Some(rule),
            Err(err) => {
                record_pattern_error(&mut warnings, err);
                None
            }
        }
    });

    if let Some(color) = theme.resolve_or_warn(Role::String, &mut warnings) {
        let style = Style::fg(color);
        push_rule(
            &mut rules,
            &mut warnings,
            HighlightRule::new("double_string", DOUBLE_QUOTED, style),
        );
        push_rule(
            &mut rules,
            &mut warnings,
            HighlightRule::new("single_string", SINGLE_QUOTED, style),
        );
    }

    if let Some(color) = theme.resolve_or_warn(Role::Function, &mut warnings) {
        push_rule(
            &mut rules,
            &mut warnings,
            HighlightRule::with_group("function", FUNCTION_CALL, Style::fg(color).with_italic(), 1),
        );
    }

    let (palette, palette_warnings) = theme.palette();
    warnings.extend(palette_warnings);

    debug!(
        "Built {} highlighting rules for {} ({} warnings)",
        rules.len(),
        profile.name,
        warnings.len()
    );

    (
        RuleTable {
            rules,
            comment,
            palette,
        },
        warnings,
    )
}

/// Build the rule table, reading keywords from a file
///
/// A missing or unreadable keyword file leaves the keyword rules out and is
/// reported as a warning.
pub fn build_with_keyword_file(
    keyword_file: &Path,
    theme: &Theme,
    profile: &LanguageProfile,
) -> (RuleTable, Vec<Error>) {
    let (keywords, load_error) = KeywordSet::load_or_empty(keyword_file);
    let (table, warnings) = build(&keywords, theme, profile);
    let all = load_error
        .map(Error::from)
        .into_iter()
        .chain(warnings)
        .collect();
    (table, all)
}

fn push_rule(
    rules: &mut Vec<HighlightRule>,
    warnings: &mut Vec<Error>,
    rule: Result<HighlightRule, PatternError>,
) {
    match rule {
        Ok(rule) => rules.push(rule),
        Err(err) => record_pattern_error(warnings, err),
    }
}

fn record_pattern_error(warnings: &mut Vec<Error>, err: PatternError) {
    warn!("Skipping rule: {}", err);
    warnings.push(err.into());
}
