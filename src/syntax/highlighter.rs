//! Block highlighting
//!
//! Highlights one line at a time. Every rule of the table scans the whole
//! line and contributes spans in table order, then the multi-line comment
//! automaton runs over the same line and its spans are applied last.

use super::builder::RuleTable;
use super::rules::{CommentRule, CommentState, HighlightResult};
use super::style::Span;

/// Highlight a single line of text
///
/// Takes the line text and the state the previous line ended in.
/// Returns spans (in application order) and the state for the next line.
pub fn highlight(table: &RuleTable, text: &str, prev_state: CommentState) -> HighlightResult {
    let mut spans = Vec::new();

    for rule in &table.rules {
        spans.extend(rule.spans(text));
    }

    let end_state = match &table.comment {
        Some(comment) => scan_comments(comment, text, prev_state, &mut spans),
        None => CommentState::Outside,
    };

    HighlightResult { spans, end_state }
}

/// Run the two-state comment automaton over one line
fn scan_comments(
    comment: &CommentRule,
    text: &str,
    prev_state: CommentState,
    spans: &mut Vec<Span>,
) -> CommentState {
    // (where the comment span starts, where to look for the closing token)
    let mut next = if prev_state.is_inside() {
        Some((0, 0))
    } else {
        comment.find_start(text, 0)
    };

    while let Some((start, search_from)) = next {
        let (end, closed) = match comment.find_end(text, search_from) {
            Some(end) => (end, true),
            None => (text.len(), false),
        };

        if let Some(style) = comment.style {
            if start < end {
                spans.push(Span::new(start, end, style));
            }
        }

        if !closed {
            return CommentState::Inside;
        }
        next = comment.find_start(text, end);
    }

    CommentState::Outside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::builder::build;
    use crate::syntax::builtin::{cpp_profile, python_profile};
    use crate::syntax::keywords::KeywordSet;
    use crate::syntax::profile::LanguageProfile;
    use crate::syntax::style::{Rgb, Style};
    use crate::syntax::theme::{Role, Theme};

    fn python_table() -> RuleTable {
        build(&KeywordSet::new(["if", "else"]), &Theme::builtin(), &python_profile()).0
    }

    fn color(role: Role) -> Rgb {
        Theme::builtin().resolve(role).unwrap()
    }

    fn keyword_style() -> Style {
        Style::fg(color(Role::Keyword)).with_bold()
    }

    fn comment_style() -> Style {
        Style::fg(color(Role::MultiLineComment))
    }

    #[test]
    fn test_plain_line_stays_outside() {
        let table = python_table();
        for line in ["", "x = 1", "print(x)", "else: pass", "   "] {
            let result = highlight(&table, line, CommentState::Outside);
            assert_eq!(result.end_state, CommentState::Outside, "{:?}", line);
        }
    }

    #[test]
    fn test_comment_on_one_line() {
        let table = python_table();
        let line = r#""""some text""""#;
        let result = highlight(&table, line, CommentState::Outside);

        assert_eq!(result.end_state, CommentState::Outside);
        assert_eq!(result.spans.last(), Some(&Span::new(0, line.len(), comment_style())));
        assert_eq!(Span::style_at(&result.spans, 5), Some(comment_style()));
    }

    #[test]
    fn test_two_comments_on_one_line() {
        let table = python_table();
        let line = r#"x = """a""" + """b""""#;
        let result = highlight(&table, line, CommentState::Outside);

        assert_eq!(result.end_state, CommentState::Outside);
        let comments: Vec<_> = result
            .spans
            .iter()
            .filter(|s| s.style == comment_style())
            .collect();
        assert_eq!(comments.len(), 2);
        assert_eq!((comments[0].start, comments[0].end), (4, 11));
        assert_eq!((comments[1].start, comments[1].end), (14, 21));
        assert_eq!(Span::style_at(&result.spans, 12), None);
    }

    #[test]
    fn test_unterminated_comment_carries_over() {
        let table = python_table();

        let first = highlight(&table, r#"x = 1  """ starts here"#, CommentState::Outside);
        assert_eq!(first.end_state, CommentState::Inside);

        let middle = highlight(&table, "if still inside", first.end_state);
        assert_eq!(middle.end_state, CommentState::Inside);
        assert_eq!(middle.spans.last(), Some(&Span::new(0, 15, comment_style())));
        assert_eq!(Span::style_at(&middle.spans, 0), Some(comment_style()));

        let last = highlight(&table, r#"""""#, middle.end_state);
        assert_eq!(last.end_state, CommentState::Outside);
    }

    #[test]
    fn test_empty_line_inside_comment() {
        let table = python_table();
        let result = highlight(&table, "", CommentState::Inside);
        assert_eq!(result.end_state, CommentState::Inside);
        assert!(result.spans.is_empty());
    }

    #[test]
    fn test_close_then_reopen() {
        let table = python_table();
        let result = highlight(&table, r#"end""" code """again"#, CommentState::Inside);

        assert_eq!(result.end_state, CommentState::Inside);
        assert_eq!(Span::style_at(&result.spans, 0), Some(comment_style()));
        assert_ne!(Span::style_at(&result.spans, 8), Some(comment_style()));
        assert_eq!(Span::style_at(&result.spans, 16), Some(comment_style()));
    }

    #[test]
    fn test_keywords_match_whole_words_only() {
        let table = python_table();

        let embedded = highlight(&table, "xif(True): pass", CommentState::Outside);
        assert!(!embedded.spans.iter().any(|s| s.style == keyword_style()));

        let standalone = highlight(&table, "if(True): pass", CommentState::Outside);
        assert!(standalone.spans.contains(&Span::new(0, 2, keyword_style())));
    }

    #[test]
    fn test_string_overrides_comment_leader() {
        let table = python_table();
        let line = "x = 'hello # not a comment'";
        let result = highlight(&table, line, CommentState::Outside);

        let string = Style::fg(color(Role::String));
        for pos in 4..line.len() {
            assert_eq!(Span::style_at(&result.spans, pos), Some(string), "byte {}", pos);
        }
        assert_eq!(Span::style_at(&result.spans, 0), None);
    }

    #[test]
    fn test_string_overrides_keyword() {
        let table = python_table();
        let result = highlight(&table, r#"s = "if" if t else 'else'"#, CommentState::Outside);

        let string = Style::fg(color(Role::String));
        assert_eq!(Span::style_at(&result.spans, 5), Some(string));
        assert_eq!(Span::style_at(&result.spans, 9), Some(keyword_style()));
        assert_eq!(Span::style_at(&result.spans, 22), Some(string));
    }

    #[test]
    fn test_strings_match_per_literal() {
        let table = python_table();
        let result = highlight(&table, r#"f("a", b, "c\"d")"#, CommentState::Outside);

        let string = Style::fg(color(Role::String));
        assert_eq!(Span::style_at(&result.spans, 2), Some(string));
        assert_eq!(Span::style_at(&result.spans, 7), None);
        assert_eq!(Span::style_at(&result.spans, 14), Some(string));
    }

    #[test]
    fn test_line_comment_and_function() {
        let table = python_table();
        let result = highlight(&table, "print(x)  # done", CommentState::Outside);

        let function = Style::fg(color(Role::Function)).with_italic();
        let comment = Style::fg(color(Role::SingleLineComment));
        assert_eq!(Span::style_at(&result.spans, 0), Some(function));
        assert_eq!(Span::style_at(&result.spans, 5), None);
        assert_eq!(Span::style_at(&result.spans, 10), Some(comment));
    }

    #[test]
    fn test_class_name_is_bold() {
        let table = python_table();
        let result = highlight(&table, "class Parser(Base):", CommentState::Outside);
        assert_eq!(Span::style_at(&result.spans, 6), Some(Style::fg(color(Role::Function)).with_italic()));

        let result = highlight(&table, "class Parser:", CommentState::Outside);
        assert_eq!(Span::style_at(&result.spans, 6), Some(Style::bold()));
        assert_eq!(Span::style_at(&result.spans, 0), None);
    }

    #[test]
    fn test_cpp_block_comments() {
        let table = build(&KeywordSet::default(), &Theme::builtin(), &cpp_profile()).0;

        let open = highlight(&table, "int x; /* note", CommentState::Outside);
        assert_eq!(open.end_state, CommentState::Inside);
        assert_eq!(Span::style_at(&open.spans, 2), None);

        let close = highlight(&table, "end */ int y; // tail", open.end_state);
        assert_eq!(close.end_state, CommentState::Outside);
        assert_eq!(Span::style_at(&close.spans, 3), Some(comment_style()));
    }

    #[test]
    fn test_profile_without_block_comments() {
        let mut profile = LanguageProfile::new("Plain");
        profile.comment_leader = "#".to_string();
        let table = build(&KeywordSet::default(), &Theme::builtin(), &profile).0;

        let result = highlight(&table, r#""""x"#, CommentState::Inside);
        assert_eq!(result.end_state, CommentState::Outside);
    }

    #[test]
    fn test_multibyte_text() {
        let table = python_table();
        let line = "é = 'ü'  # ß";
        let result = highlight(&table, line, CommentState::Outside);
        for span in &result.spans {
            assert!(line.is_char_boundary(span.start));
            assert!(line.is_char_boundary(span.end));
        }
    }
}
