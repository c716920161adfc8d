//! Colors, styles and styled byte ranges
//!
//! Highlighting produces [`Span`]s in application order; a later span
//! overrides an earlier one wherever they overlap.

use std::fmt;

/// A 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a 6-hex-digit triplet such as `1a2b3c` or `#1a2b3c`
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    /// Foreground color (None = surface default)
    pub fg: Option<Rgb>,
    /// Background color (None = surface default)
    pub bg: Option<Rgb>,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Rgb) -> Self {
        Self {
            fg: Some(color),
            ..Default::default()
        }
    }

    /// Create a style with just background color
    pub fn bg(color: Rgb) -> Self {
        Self {
            bg: Some(color),
            ..Default::default()
        }
    }

    /// Create a bold style with no color
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Default::default()
        }
    }

    /// Same style with a foreground color
    pub fn with_fg(mut self, color: Rgb) -> Self {
        self.fg = Some(color);
        self
    }

    /// Same style with a background color
    pub fn with_bg(mut self, color: Rgb) -> Self {
        self.bg = Some(color);
        self
    }

    /// Same style, bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Same style, italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Same style, underlined
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// A style applied to a byte range of one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Style to apply to this span
    pub style: Style,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, style: Style) -> Self {
        Self { start, end, style }
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no bytes
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Resolve spans applied in order into non-overlapping runs
    ///
    /// A later span replaces the style of every byte it covers, so the
    /// result is what painting `spans` one after another would produce.
    /// Runs are sorted by start offset and adjacent bytes with equal styles
    /// are merged. Bytes never covered are absent from the output.
    pub fn flatten(line_len: usize, spans: &[Span]) -> Vec<Span> {
        let mut cells: Vec<Option<Style>> = vec![None; line_len];
        for span in spans {
            let end = span.end.min(line_len);
            if span.start < end {
                cells[span.start..end].fill(Some(span.style));
            }
        }

        let mut runs: Vec<Span> = Vec::new();
        for (pos, cell) in cells.into_iter().enumerate() {
            let Some(style) = cell else { continue };
            match runs.last_mut() {
                Some(last) if last.end == pos && last.style == style => last.end = pos + 1,
                _ => runs.push(Span::new(pos, pos + 1, style)),
            }
        }
        runs
    }

    /// Style at a byte position after applying `spans` in order
    pub fn style_at(spans: &[Span], pos: usize) -> Option<Style> {
        spans.iter().rev().find(|s| s.contains(pos)).map(|s| s.style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Rgb::from_hex("1a2b3c"), Some(Rgb::new(26, 43, 60)));
        assert_eq!(Rgb::from_hex("#FFFFFF"), Some(Rgb::new(255, 255, 255)));
        assert_eq!(Rgb::from_hex(" 000000 "), Some(Rgb::new(0, 0, 0)));
        assert_eq!(Rgb::from_hex("zzzzzz"), None);
        assert_eq!(Rgb::from_hex("12345"), None);
        assert_eq!(Rgb::from_hex("1234567"), None);
        assert_eq!(Rgb::from_hex("+12345"), None);
    }

    #[test]
    fn test_hex_display() {
        assert_eq!(Rgb::new(26, 43, 60).to_string(), "1a2b3c");
    }

    #[test]
    fn test_style_default() {
        let style = Style::default();
        assert!(style.is_default());
        assert_eq!(style.fg, None);
        assert!(!style.bold);
    }

    #[test]
    fn test_style_builders() {
        let style = Style::fg(RED).with_bold().with_bg(BLUE);
        assert_eq!(style.fg, Some(RED));
        assert_eq!(style.bg, Some(BLUE));
        assert!(style.bold);
        assert!(!style.is_default());
    }

    #[test]
    fn test_span_contains() {
        let span = Span::new(5, 10, Style::default());
        assert!(!span.contains(4));
        assert!(span.contains(5));
        assert!(span.contains(9));
        assert!(!span.contains(10));
    }

    #[test]
    fn test_flatten_last_write_wins() {
        let red = Style::fg(RED);
        let blue = Style::fg(BLUE);
        let spans = [Span::new(0, 6, red), Span::new(2, 4, blue)];

        let runs = Span::flatten(8, &spans);
        assert_eq!(
            runs,
            vec![
                Span::new(0, 2, red),
                Span::new(2, 4, blue),
                Span::new(4, 6, red),
            ]
        );
        assert_eq!(Span::style_at(&spans, 3), Some(blue));
        assert_eq!(Span::style_at(&spans, 7), None);
    }

    #[test]
    fn test_flatten_merges_and_clamps() {
        let red = Style::fg(RED);
        let spans = [Span::new(0, 2, red), Span::new(2, 20, red)];
        assert_eq!(Span::flatten(5, &spans), vec![Span::new(0, 5, red)]);
    }
}
