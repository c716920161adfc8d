//! Indentation helpers
//!
//! New lines copy the previous line's indentation. With smart indent the
//! first word of the previous line can open a block (one level deeper) or
//! end one (one level shallower), using the active profile's word lists.

use unicode_width::UnicodeWidthChar;

use crate::config::EditorSettings;
use crate::syntax::LanguageProfile;

/// Indentation rules for one editor configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indenter {
    use_spaces: bool,
    tab_width: usize,
    smart: bool,
    indenters: Vec<String>,
    dedenters: Vec<String>,
}

impl Indenter {
    pub fn new(editor: &EditorSettings, profile: &LanguageProfile) -> Self {
        Self {
            use_spaces: editor.use_spaces,
            tab_width: editor.spaces_per_tab.max(1),
            smart: editor.smart_indent,
            indenters: profile.indenters.clone(),
            dedenters: profile.dedenters.clone(),
        }
    }

    /// Text inserted for one indentation level
    pub fn unit(&self) -> String {
        if self.use_spaces {
            " ".repeat(self.tab_width)
        } else {
            "\t".to_string()
        }
    }

    /// Indentation for a line following `prev_line`
    pub fn next_line_indent(&self, prev_line: &str) -> String {
        let mut indent = leading_whitespace(prev_line).to_string();
        if !self.smart {
            return indent;
        }

        let word = first_word(prev_line);
        if self.indenters.iter().any(|w| w == word) {
            indent.push_str(&self.unit());
        } else if self.dedenters.iter().any(|w| w == word) {
            self.remove_level(&mut indent);
        }
        indent
    }

    /// Replace tabs with spaces up to the next tab stop
    ///
    /// Lines are returned unchanged when tabs are kept.
    pub fn expand_tabs(&self, line: &str) -> String {
        if !self.use_spaces || !line.contains('\t') {
            return line.to_string();
        }
        let mut out = String::with_capacity(line.len());
        let mut col = 0;
        for ch in line.chars() {
            if ch == '\t' {
                let pad = self.tab_width - col % self.tab_width;
                out.extend(std::iter::repeat(' ').take(pad));
                col += pad;
            } else {
                out.push(ch);
                col += ch.width().unwrap_or(0);
            }
        }
        out
    }

    fn remove_level(&self, indent: &mut String) {
        if indent.ends_with('\t') {
            indent.pop();
            return;
        }
        let trailing = indent.len() - indent.trim_end_matches(' ').len();
        let remove = trailing.min(self.tab_width);
        indent.truncate(indent.len() - remove);
    }
}

/// Leading spaces and tabs of a line
pub fn leading_whitespace(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

/// First identifier-like word of a line
fn first_word(line: &str) -> &str {
    let trimmed = line.trim_start();
    let end = trimmed
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(trimmed.len());
    &trimmed[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::python_profile;

    fn indenter(use_spaces: bool, smart: bool) -> Indenter {
        let editor = EditorSettings {
            use_spaces,
            smart_indent: smart,
            spaces_per_tab: 4,
            ..EditorSettings::default()
        };
        Indenter::new(&editor, &python_profile())
    }

    #[test]
    fn test_copies_previous_indent() {
        let ind = indenter(true, true);
        assert_eq!(ind.next_line_indent("    x = 1"), "    ");
        assert_eq!(ind.next_line_indent("\tx = 1"), "\t");
        assert_eq!(ind.next_line_indent("x = 1"), "");
    }

    #[test]
    fn test_indenter_adds_level() {
        let ind = indenter(true, true);
        assert_eq!(ind.next_line_indent("def f():"), "    ");
        assert_eq!(ind.next_line_indent("    if(x):"), "        ");
        assert_eq!(ind.next_line_indent("    iffy = 1"), "    ");

        let tabs = indenter(false, true);
        assert_eq!(tabs.next_line_indent("\tfor x in y:"), "\t\t");
    }

    #[test]
    fn test_dedenter_removes_level() {
        let ind = indenter(true, true);
        assert_eq!(ind.next_line_indent("        return x"), "    ");
        assert_eq!(ind.next_line_indent("  break"), "");
        assert_eq!(ind.next_line_indent("return"), "");
        assert_eq!(ind.next_line_indent("\t\tcontinue"), "\t");
    }

    #[test]
    fn test_smart_indent_off() {
        let ind = indenter(true, false);
        assert_eq!(ind.next_line_indent("    def f():"), "    ");
        assert_eq!(ind.next_line_indent("    return"), "    ");
    }

    #[test]
    fn test_expand_tabs() {
        let ind = indenter(true, true);
        assert_eq!(ind.expand_tabs("\tx"), "    x");
        assert_eq!(ind.expand_tabs("ab\tc"), "ab  c");
        assert_eq!(ind.expand_tabs("no tabs"), "no tabs");
        assert_eq!(indenter(false, true).expand_tabs("\tx"), "\tx");
    }
}
