//! Styled terminal output
//!
//! Writes highlighted lines with crossterm commands. Output is queued on
//! any `Write`, so a document can be rendered to stdout or to a buffer.

use std::io::Write;

use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use unicode_width::UnicodeWidthChar;

use crate::error::Result;
use crate::search::Match;
use crate::syntax::{Palette, Rgb, Span, Style};

/// Width of the line number area: digits of the line count plus a space
pub fn gutter_width(line_count: usize) -> usize {
    let mut digits = 1;
    let mut n = line_count / 10;
    while n > 0 {
        digits += 1;
        n /= 10;
    }
    digits + 1
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Renders highlighted lines
#[derive(Debug, Clone)]
pub struct Renderer {
    palette: Palette,
    show_line_numbers: bool,
    tab_width: usize,
    /// Gutter width for the current document
    gutter: usize,
    /// Columns available for text, unlimited when `None`
    max_cols: Option<usize>,
}

impl Renderer {
    pub fn new(palette: Palette, show_line_numbers: bool, tab_width: usize) -> Self {
        Self {
            palette,
            show_line_numbers,
            tab_width: tab_width.max(1),
            gutter: gutter_width(0),
            max_cols: None,
        }
    }

    /// Limit output to `cols` terminal columns, gutter included
    pub fn with_width(mut self, cols: usize) -> Self {
        self.max_cols = Some(cols);
        self
    }

    /// Size the gutter for a document of `line_count` lines
    pub fn set_line_count(&mut self, line_count: usize) {
        self.gutter = gutter_width(line_count);
    }

    /// Columns taken by line numbers
    pub fn gutter(&self) -> usize {
        if self.show_line_numbers {
            self.gutter
        } else {
            0
        }
    }

    /// Add search matches on top of the highlighting spans
    pub fn overlay_matches(&self, spans: &mut Vec<Span>, matches: &[Match]) {
        let mut style = Style::default().with_bg(self.palette.highlight.unwrap_or(Rgb::new(0, 0, 128)));
        if let Some(text) = self.palette.highlighted_text {
            style = style.with_fg(text);
        }
        spans.extend(
            matches
                .iter()
                .filter(|m| m.start < m.end)
                .map(|m| Span::new(m.start, m.end, style)),
        );
    }

    /// Write one line, numbered `index + 1`, followed by a newline
    pub fn render_line<W: Write>(
        &self,
        out: &mut W,
        index: usize,
        text: &str,
        spans: &[Span],
    ) -> Result<()> {
        let mut budget = self.max_cols;

        if self.show_line_numbers {
            let number = format!("{:>width$} ", index + 1, width = self.gutter - 1);
            queue!(
                out,
                SetAttribute(Attribute::Dim),
                Print(&number),
                SetAttribute(Attribute::NormalIntensity)
            )?;
            budget = budget.map(|cols| cols.saturating_sub(self.gutter));
        }

        // Unstyled gaps between runs are filled with the default style
        let mut pieces = Vec::new();
        let mut pos = 0;
        for run in Span::flatten(text.len(), spans) {
            if pos < run.start {
                pieces.push((pos, run.start, Style::default()));
            }
            pieces.push((run.start, run.end, run.style));
            pos = run.end;
        }
        if pos < text.len() {
            pieces.push((pos, text.len(), Style::default()));
        }

        let mut col = 0;
        for (start, end, style) in pieces {
            if !self.segment(out, &text[start..end], style, &mut col, budget)? {
                break;
            }
        }

        queue!(out, SetAttribute(Attribute::Reset), ResetColor, Print("\n"))?;
        Ok(())
    }

    /// Write a run of text in one style
    ///
    /// Returns false once the column budget is used up.
    fn segment<W: Write>(
        &self,
        out: &mut W,
        text: &str,
        style: Style,
        col: &mut usize,
        budget: Option<usize>,
    ) -> Result<bool> {
        let mut visible = String::with_capacity(text.len());
        let mut fits = true;
        for ch in text.chars() {
            let width = if ch == '\t' {
                self.tab_width - *col % self.tab_width
            } else {
                ch.width().unwrap_or(0)
            };
            if budget.is_some_and(|cols| *col + width > cols) {
                fits = false;
                break;
            }
            if ch == '\t' {
                visible.extend(std::iter::repeat(' ').take(width));
            } else {
                visible.push(ch);
            }
            *col += width;
        }

        if !visible.is_empty() {
            self.apply(out, style)?;
            queue!(out, Print(&visible), SetAttribute(Attribute::Reset), ResetColor)?;
        }
        Ok(fits)
    }

    fn apply<W: Write>(&self, out: &mut W, style: Style) -> Result<()> {
        if let Some(fg) = style.fg.or(self.palette.text) {
            queue!(out, SetForegroundColor(color(fg)))?;
        }
        if let Some(bg) = style.bg.or(self.palette.base) {
            queue!(out, SetBackgroundColor(color(bg)))?;
        }
        if style.bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        if style.italic {
            queue!(out, SetAttribute(Attribute::Italic))?;
        }
        if style.underline {
            queue!(out, SetAttribute(Attribute::Underlined))?;
        }
        Ok(())
    }
}
