//! Color themes
//!
//! A theme maps each semantic [`Role`] to a color value as written in the
//! theme file: either a 6-hex-digit triplet or a color name. Values are kept
//! raw and resolved on demand so one bad entry only costs its own role.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use log::warn;

use super::style::Rgb;
use crate::error::{ColorParseError, ConfigError, Error};
use crate::ini::Ini;

/// Section holding the role colors
pub const COLORS_SECTION: &str = "Colors";

/// Semantic color slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// Surface background
    Background,
    /// Plain text
    Foreground,
    /// Language keywords
    Keyword,
    /// Comment leader to end of line
    SingleLineComment,
    /// Delimited comments spanning lines
    MultiLineComment,
    /// Quoted string literals
    String,
    /// Names of called functions
    Function,
    /// Selection background
    Highlight,
    /// Selected text
    HighlightedText,
}

impl Role {
    /// Every role, in theme-file order
    pub const ALL: [Role; 9] = [
        Role::Background,
        Role::Foreground,
        Role::Keyword,
        Role::SingleLineComment,
        Role::MultiLineComment,
        Role::String,
        Role::Function,
        Role::Highlight,
        Role::HighlightedText,
    ];

    /// Key used for this role in theme files
    pub fn name(&self) -> &'static str {
        match self {
            Role::Background => "Background",
            Role::Foreground => "Foreground",
            Role::Keyword => "Keyword",
            Role::SingleLineComment => "SingleLineComment",
            Role::MultiLineComment => "MultiLineComment",
            Role::String => "String",
            Role::Function => "Function",
            Role::Highlight => "Highlight",
            Role::HighlightedText => "HighlightedText",
        }
    }

    /// Parse a role from its key (case-insensitive, like theme keys)
    pub fn from_name(name: &str) -> Option<Self> {
        Role::ALL
            .into_iter()
            .find(|role| role.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve a theme value: hex triplet first, then a color name
pub fn resolve_color(value: &str) -> Option<Rgb> {
    Rgb::from_hex(value).or_else(|| named_color(value))
}

/// Look up an SVG/CSS color name (case-insensitive)
pub fn named_color(name: &str) -> Option<Rgb> {
    let name = name.trim().to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, (r, g, b))| Rgb::new(r, g, b))
}

const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("silver", (192, 192, 192)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
    ("white", (255, 255, 255)),
    ("maroon", (128, 0, 0)),
    ("red", (255, 0, 0)),
    ("purple", (128, 0, 128)),
    ("fuchsia", (255, 0, 255)),
    ("magenta", (255, 0, 255)),
    ("green", (0, 128, 0)),
    ("lime", (0, 255, 0)),
    ("olive", (128, 128, 0)),
    ("yellow", (255, 255, 0)),
    ("navy", (0, 0, 128)),
    ("blue", (0, 0, 255)),
    ("teal", (0, 128, 128)),
    ("aqua", (0, 255, 255)),
    ("cyan", (0, 255, 255)),
    ("orange", (255, 165, 0)),
    ("darkorange", (255, 140, 0)),
    ("brown", (165, 42, 42)),
    ("pink", (255, 192, 203)),
    ("hotpink", (255, 105, 180)),
    ("gold", (255, 215, 0)),
    ("khaki", (240, 230, 140)),
    ("violet", (238, 130, 238)),
    ("indigo", (75, 0, 130)),
    ("orchid", (218, 112, 214)),
    ("plum", (221, 160, 221)),
    ("salmon", (250, 128, 114)),
    ("coral", (255, 127, 80)),
    ("tomato", (255, 99, 71)),
    ("crimson", (220, 20, 60)),
    ("firebrick", (178, 34, 34)),
    ("darkred", (139, 0, 0)),
    ("darkgreen", (0, 100, 0)),
    ("forestgreen", (34, 139, 34)),
    ("seagreen", (46, 139, 87)),
    ("limegreen", (50, 205, 50)),
    ("darkblue", (0, 0, 139)),
    ("mediumblue", (0, 0, 205)),
    ("royalblue", (65, 105, 225)),
    ("steelblue", (70, 130, 180)),
    ("skyblue", (135, 206, 235)),
    ("lightblue", (173, 216, 230)),
    ("darkcyan", (0, 139, 139)),
    ("turquoise", (64, 224, 208)),
    ("darkmagenta", (139, 0, 139)),
    ("darkviolet", (148, 0, 211)),
    ("slategray", (112, 128, 144)),
    ("darkgray", (169, 169, 169)),
    ("darkgrey", (169, 169, 169)),
    ("lightgray", (211, 211, 211)),
    ("lightgrey", (211, 211, 211)),
    ("dimgray", (105, 105, 105)),
    ("gainsboro", (220, 220, 220)),
    ("whitesmoke", (245, 245, 245)),
    ("ivory", (255, 255, 240)),
    ("beige", (245, 245, 220)),
    ("wheat", (245, 222, 179)),
    ("tan", (210, 180, 140)),
    ("chocolate", (210, 105, 30)),
    ("sienna", (160, 82, 45)),
];

/// Colors the host applies to the whole surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Palette {
    /// Surface background
    pub base: Option<Rgb>,
    /// Default text color
    pub text: Option<Rgb>,
    /// Selection background
    pub highlight: Option<Rgb>,
    /// Selected text color
    pub highlighted_text: Option<Rgb>,
}

/// Raw role values loaded from a theme file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    values: HashMap<Role, String>,
    path: Option<PathBuf>,
}

impl Theme {
    /// Theme used when no theme file can be read
    pub fn builtin() -> Self {
        let values = [
            (Role::Background, "ffffff"),
            (Role::Foreground, "000000"),
            (Role::Keyword, "000080"),
            (Role::SingleLineComment, "808080"),
            (Role::MultiLineComment, "808080"),
            (Role::String, "008000"),
            (Role::Function, "0000ff"),
            (Role::Highlight, "3399ff"),
            (Role::HighlightedText, "ffffff"),
        ];
        Self {
            values: values
                .into_iter()
                .map(|(role, value)| (role, value.to_string()))
                .collect(),
            path: None,
        }
    }

    /// Build a theme from role values; roles not listed are absent
    pub fn from_values<'a>(values: impl IntoIterator<Item = (Role, &'a str)>) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|(role, value)| (role, value.to_string()))
                .collect(),
            path: None,
        }
    }

    /// Parse theme file contents
    ///
    /// Only the `Colors` section is required; unknown keys are ignored and
    /// missing roles surface later as color errors for that role.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let ini = Ini::parse(contents)?;
        Self::from_ini(&ini)
    }

    /// Load a theme file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load(path)?;
        let mut theme = Self::from_ini(&ini)?;
        theme.path = Some(path.to_path_buf());
        Ok(theme)
    }

    /// Load a theme file, falling back to the builtin theme
    pub fn load_or_builtin(path: &Path) -> (Self, Option<ConfigError>) {
        match Self::load(path) {
            Ok(theme) => (theme, None),
            Err(err) => {
                warn!(
                    "Unable to load theme at {}: {}. Reverting to default theme.",
                    path.display(),
                    err
                );
                (Self::builtin(), Some(err))
            }
        }
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        if !ini.has_section(COLORS_SECTION) {
            return Err(ConfigError::MissingSection(COLORS_SECTION.to_string()));
        }
        let values = Role::ALL
            .into_iter()
            .filter_map(|role| {
                ini.get(COLORS_SECTION, role.name())
                    .map(|value| (role, value.to_string()))
            })
            .collect();
        Ok(Self { values, path: None })
    }

    /// Write the theme's `Colors` section to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        for role in Role::ALL {
            if let Some(value) = self.value(role) {
                ini.set(COLORS_SECTION, role.name(), value);
            }
        }
        ini.save(path)
    }

    /// File this theme was loaded from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Raw value for a role
    pub fn value(&self, role: Role) -> Option<&str> {
        self.values.get(&role).map(|s| s.as_str())
    }

    /// Return a copy with one role changed
    pub fn with_value(mut self, role: Role, value: &str) -> Self {
        self.values.insert(role, value.to_string());
        self
    }

    /// Resolve a role to a color
    pub fn resolve(&self, role: Role) -> Result<Rgb, ColorParseError> {
        let value = self.value(role).unwrap_or_default();
        resolve_color(value).ok_or_else(|| ColorParseError {
            role,
            value: value.to_string(),
        })
    }

    /// Resolve a role, recording a warning instead of failing
    pub(crate) fn resolve_or_warn(&self, role: Role, warnings: &mut Vec<Error>) -> Option<Rgb> {
        match self.resolve(role) {
            Ok(color) => Some(color),
            Err(err) => {
                warn!("{}", err);
                warnings.push(err.into());
                None
            }
        }
    }

    /// Resolve the surface-wide colors
    pub fn palette(&self) -> (Palette, Vec<Error>) {
        let mut warnings = Vec::new();
        let palette = Palette {
            base: self.resolve_or_warn(Role::Background, &mut warnings),
            text: self.resolve_or_warn(Role::Foreground, &mut warnings),
            highlight: self.resolve_or_warn(Role::Highlight, &mut warnings),
            highlighted_text: self.resolve_or_warn(Role::HighlightedText, &mut warnings),
        };
        (palette, warnings)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names_roundtrip() {
        for role in Role::ALL {
            assert_eq!(Role::from_name(role.name()), Some(role));
        }
        assert_eq!(Role::from_name("keyword"), Some(Role::Keyword));
        assert_eq!(Role::from_name("Class"), None);
    }

    #[test]
    fn test_resolve_hex_then_name() {
        assert_eq!(resolve_color("1a2b3c"), Some(Rgb::new(26, 43, 60)));
        assert_eq!(resolve_color("Navy"), Some(Rgb::new(0, 0, 128)));
        assert_eq!(resolve_color("zzzzzz"), None);
        assert_eq!(resolve_color(""), None);
    }

    #[test]
    fn test_palette_resolves_hex() {
        let theme = Theme::builtin().with_value(Role::Background, "1a2b3c");
        let (palette, warnings) = theme.palette();
        assert!(warnings.is_empty());
        assert_eq!(palette.base, Some(Rgb::new(26, 43, 60)));
        assert_eq!(palette.text, Some(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn test_palette_omits_bad_role() {
        let theme = Theme::builtin().with_value(Role::Highlight, "zzzzzz");
        let (palette, warnings) = theme.palette();
        assert_eq!(palette.highlight, None);
        assert!(palette.base.is_some());
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            Error::Color(ColorParseError { role: Role::Highlight, value }) if value == "zzzzzz"
        ));
    }

    #[test]
    fn test_parse_theme() {
        let theme = Theme::parse("[Colors]\nKeyword = red\nString = 00ff00\n").unwrap();
        assert_eq!(theme.value(Role::Keyword), Some("red"));
        assert_eq!(theme.resolve(Role::String), Ok(Rgb::new(0, 255, 0)));
        assert!(theme.resolve(Role::Function).is_err());
    }

    #[test]
    fn test_parse_theme_without_colors() {
        let err = Theme::parse("[Editor]\nFont = Mono\n").unwrap_err();
        assert_eq!(err, ConfigError::MissingSection("Colors".to_string()));
    }

    #[test]
    fn test_missing_theme_falls_back() {
        let (theme, err) = Theme::load_or_builtin(Path::new("/nonexistent/theme.ini"));
        assert_eq!(theme, Theme::builtin());
        assert!(matches!(err, Some(ConfigError::Unreadable { .. })));
    }

    #[test]
    fn test_bundled_themes_resolve() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("configs/themes");
        for name in ["default.ini", "monokai.ini"] {
            let theme = Theme::load(&dir.join(name)).unwrap();
            for role in Role::ALL {
                assert!(theme.resolve(role).is_ok(), "{} in {}", role, name);
            }
        }
    }

    #[test]
    fn test_save_and_reload() {
        let path = std::env::temp_dir().join(format!("vicky-theme-{}.ini", std::process::id()));
        let theme = Theme::builtin().with_value(Role::Keyword, "c0ffee");
        theme.save(&path).unwrap();

        let loaded = Theme::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.value(Role::Keyword), Some("c0ffee"));
        assert_eq!(loaded.path(), Some(path.as_path()));
    }
}
