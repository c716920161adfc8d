//! Configuration file support
//!
//! Settings are read from a sectioned file (by default
//! `configs/settings.ini`):
//!
//! ```text
//! [Editor]
//! Font = Monospace
//! FontSize = 12
//! FixedPitch = true
//! WordSpacing = 1.0
//! UseSpaces = true
//! SpacesPerTab = 4
//! ShowLineNumbers = true
//! SmartIndent = true
//! Theme = themes/default.ini
//!
//! [Extensions]
//! Highlighter = PythonHighlighter
//!
//! [Dictionary]
//! Path = dictionary/words.txt
//!
//! [Interpreter]
//! Path = /usr/bin/python3
//! Script = main.py
//! Arguments = -v
//! ```
//!
//! Relative paths are taken relative to the settings file's directory.
//! Loaded configuration is an immutable [`Snapshot`]; reloading produces a
//! new snapshot instead of changing the old one.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{info, warn};

use crate::dictionary::Dictionary;
use crate::error::{ConfigError, Error};
use crate::indent::Indenter;
use crate::ini::Ini;
use crate::syntax::{
    KeywordSet, LanguageProfile, Registry, Session, TextSurface, Theme, DEFAULT_HIGHLIGHTER,
};

/// Settings file used when none is given
pub const DEFAULT_SETTINGS_PATH: &str = "configs/settings.ini";

/// `[Editor]` section
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSettings {
    /// Font family name
    pub font: String,
    /// Font size in points
    pub font_size: u32,
    /// Whether only fixed-pitch fonts are offered
    pub fixed_pitch: bool,
    /// Extra spacing between words
    pub word_spacing: f32,
    /// Whether the tab key inserts spaces
    pub use_spaces: bool,
    /// Width of a tab stop in spaces
    pub spaces_per_tab: usize,
    /// Whether to show line numbers
    pub show_line_numbers: bool,
    /// Whether new lines are indented from the previous line's first word
    pub smart_indent: bool,
    /// Theme file
    pub theme: PathBuf,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            font: "Monospace".to_string(),
            font_size: 12,
            fixed_pitch: true,
            word_spacing: 1.0,
            use_spaces: true,
            spaces_per_tab: 4,
            show_line_numbers: true,
            smart_indent: true,
            theme: PathBuf::from("themes/default.ini"),
        }
    }
}

/// `[Extensions]` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSettings {
    /// Registry name of the active highlighter
    pub highlighter: String,
}

impl Default for ExtensionSettings {
    fn default() -> Self {
        Self {
            highlighter: DEFAULT_HIGHLIGHTER.to_string(),
        }
    }
}

/// `[Dictionary]` section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionarySettings {
    /// Autocomplete word list
    pub path: Option<PathBuf>,
}

/// `[Interpreter]` section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterpreterSettings {
    /// External interpreter executable
    pub path: Option<PathBuf>,
    /// Script handed to the interpreter
    pub script: Option<PathBuf>,
    /// Extra command-line arguments
    pub arguments: String,
}

impl InterpreterSettings {
    /// Arguments split on whitespace
    pub fn argument_list(&self) -> Vec<&str> {
        self.arguments.split_whitespace().collect()
    }
}

/// All settings sections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub editor: EditorSettings,
    pub extensions: ExtensionSettings,
    pub dictionary: DictionarySettings,
    pub interpreter: InterpreterSettings,
    /// File the settings were loaded from
    path: Option<PathBuf>,
}

impl Settings {
    /// Parse settings file contents
    ///
    /// Values that fail to parse keep their defaults and are returned as
    /// warnings.
    pub fn parse(contents: &str) -> Result<(Self, Vec<ConfigError>), ConfigError> {
        let ini = Ini::parse(contents)?;
        Ok(Self::from_ini(&ini))
    }

    /// Load a settings file, falling back to defaults
    pub fn load(path: &Path) -> (Self, Vec<ConfigError>) {
        let (mut settings, warnings) = match Ini::load(path) {
            Ok(ini) => Self::from_ini(&ini),
            Err(err) => {
                warn!("Unable to load settings: {}. Using defaults.", err);
                (Self::default(), vec![err])
            }
        };
        settings.path = Some(path.to_path_buf());
        (settings, warnings)
    }

    fn from_ini(ini: &Ini) -> (Self, Vec<ConfigError>) {
        let mut warnings = Vec::new();
        let defaults = EditorSettings::default();
        let mut reader = Reader {
            ini,
            warnings: &mut warnings,
        };

        let editor = EditorSettings {
            font: reader.string("Editor", "Font").unwrap_or(defaults.font),
            font_size: reader
                .parse("Editor", "FontSize", defaults.font_size)
                .clamp(1, 512),
            fixed_pitch: reader.boolean("Editor", "FixedPitch", defaults.fixed_pitch),
            word_spacing: reader.parse("Editor", "WordSpacing", defaults.word_spacing),
            use_spaces: reader.boolean("Editor", "UseSpaces", defaults.use_spaces),
            spaces_per_tab: reader
                .parse("Editor", "SpacesPerTab", defaults.spaces_per_tab)
                .clamp(1, 16),
            show_line_numbers: reader.boolean("Editor", "ShowLineNumbers", defaults.show_line_numbers),
            smart_indent: reader.boolean("Editor", "SmartIndent", defaults.smart_indent),
            theme: reader
                .string("Editor", "Theme")
                .map(PathBuf::from)
                .unwrap_or(defaults.theme),
        };

        let extensions = ExtensionSettings {
            highlighter: reader
                .string("Extensions", "Highlighter")
                .unwrap_or_else(|| DEFAULT_HIGHLIGHTER.to_string()),
        };

        let dictionary = DictionarySettings {
            path: reader.string("Dictionary", "Path").map(PathBuf::from),
        };

        let interpreter = InterpreterSettings {
            path: reader.string("Interpreter", "Path").map(PathBuf::from),
            script: reader.string("Interpreter", "Script").map(PathBuf::from),
            arguments: reader.string("Interpreter", "Arguments").unwrap_or_default(),
        };

        let settings = Self {
            editor,
            extensions,
            dictionary,
            interpreter,
            path: None,
        };
        (settings, warnings)
    }

    /// Render all sections
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        let editor = &self.editor;
        ini.set("Editor", "Font", &editor.font);
        ini.set("Editor", "FontSize", editor.font_size);
        ini.set("Editor", "FixedPitch", editor.fixed_pitch);
        ini.set("Editor", "WordSpacing", editor.word_spacing);
        ini.set("Editor", "UseSpaces", editor.use_spaces);
        ini.set("Editor", "SpacesPerTab", editor.spaces_per_tab);
        ini.set("Editor", "ShowLineNumbers", editor.show_line_numbers);
        ini.set("Editor", "SmartIndent", editor.smart_indent);
        ini.set("Editor", "Theme", editor.theme.display());

        ini.set("Extensions", "Highlighter", &self.extensions.highlighter);

        if let Some(path) = &self.dictionary.path {
            ini.set("Dictionary", "Path", path.display());
        }

        let interpreter = &self.interpreter;
        if let Some(path) = &interpreter.path {
            ini.set("Interpreter", "Path", path.display());
        }
        if let Some(script) = &interpreter.script {
            ini.set("Interpreter", "Script", script.display());
        }
        ini.set("Interpreter", "Arguments", &interpreter.arguments);
        ini
    }

    /// Write the settings file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        self.to_ini().save(path)
    }

    /// File the settings came from
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Directory relative paths are resolved against
    pub fn config_dir(&self) -> PathBuf {
        self.path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolve a path from the settings file
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.config_dir().join(path)
        }
    }

    /// Copy with another theme file
    pub fn with_theme(mut self, theme: &Path) -> Self {
        self.editor.theme = theme.to_path_buf();
        self
    }

    /// Copy with another highlighter
    pub fn with_highlighter(mut self, name: &str) -> Self {
        self.extensions.highlighter = name.to_string();
        self
    }
}

/// Typed lookups that record bad values
struct Reader<'a> {
    ini: &'a Ini,
    warnings: &'a mut Vec<ConfigError>,
}

impl Reader<'_> {
    fn string(&self, section: &str, key: &str) -> Option<String> {
        self.ini
            .get(section, key)
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
    }

    fn parse<T: FromStr>(&mut self, section: &str, key: &str, default: T) -> T {
        match self.ini.get(section, key) {
            Some(value) => value.parse().unwrap_or_else(|_| {
                self.invalid(section, key, value);
                default
            }),
            None => default,
        }
    }

    fn boolean(&mut self, section: &str, key: &str, default: bool) -> bool {
        match self.ini.get(section, key) {
            Some(value) => parse_bool(value).unwrap_or_else(|| {
                self.invalid(section, key, value);
                default
            }),
            None => default,
        }
    }

    fn invalid(&mut self, section: &str, key: &str, value: &str) {
        let err = ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        };
        warn!("{}", err);
        self.warnings.push(err);
    }
}

/// Parse a boolean value from string
fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Everything the editor needs, loaded at one point in time
pub struct Snapshot {
    pub settings: Settings,
    pub theme: Theme,
    pub profile: LanguageProfile,
    pub keywords: KeywordSet,
    pub dictionary: Dictionary,
}

impl Snapshot {
    /// Load the settings file and everything it points to
    pub fn load(settings_path: &Path, registry: &Registry) -> (Self, Vec<Error>) {
        let (settings, warnings) = Settings::load(settings_path);
        let (snapshot, more) = Self::from_settings(settings, registry);
        let all = warnings.into_iter().map(Error::from).chain(more).collect();
        (snapshot, all)
    }

    /// Load the theme, profile, keywords and dictionary named by `settings`
    ///
    /// Each piece falls back independently: the builtin theme, the default
    /// highlighter, an empty keyword set, an empty dictionary.
    pub fn from_settings(settings: Settings, registry: &Registry) -> (Self, Vec<Error>) {
        let mut warnings: Vec<Error> = Vec::new();

        let (theme, theme_error) = Theme::load_or_builtin(&settings.resolve(&settings.editor.theme));
        warnings.extend(theme_error.map(Error::from));

        let profile = match registry.create(&settings.extensions.highlighter) {
            Ok(profile) => profile,
            Err(err) => {
                warn!("{}. Using {}.", err, DEFAULT_HIGHLIGHTER);
                warnings.push(err.into());
                registry
                    .create(DEFAULT_HIGHLIGHTER)
                    .unwrap_or_else(|_| LanguageProfile::new(DEFAULT_HIGHLIGHTER))
            }
        };

        let (keywords, keyword_error) = KeywordSet::load_or_empty(&keyword_path(&settings, &profile));
        warnings.extend(keyword_error.map(Error::from));

        let dictionary_path = settings.dictionary.path.as_ref().map(|p| settings.resolve(p));
        let (dictionary, dictionary_error) = Dictionary::load_or_system(dictionary_path.as_deref());
        warnings.extend(dictionary_error.map(Error::from));

        info!(
            "Loaded configuration: highlighter {}, {} keywords, {} dictionary words",
            profile.name,
            keywords.len(),
            dictionary.len()
        );

        let snapshot = Self {
            settings,
            theme,
            profile,
            keywords,
            dictionary,
        };
        (snapshot, warnings)
    }

    /// Read the configuration again, leaving this snapshot untouched
    pub fn reload(&self, registry: &Registry) -> (Self, Vec<Error>) {
        match self.settings.path() {
            Some(path) => Self::load(path, registry),
            None => Self::from_settings(self.settings.clone(), registry),
        }
    }

    /// Attach a session using this snapshot's profile
    pub fn attach<S>(&self, surface: &S) -> Session
    where
        S: TextSurface + ?Sized,
    {
        Session::attach(
            self.profile.clone(),
            self.theme.clone(),
            self.keywords.clone(),
            surface,
        )
    }

    /// Attach a session using another profile and its own keyword file
    pub fn attach_with<S>(&self, profile: LanguageProfile, surface: &S) -> (Session, Option<Error>)
    where
        S: TextSurface + ?Sized,
    {
        if profile == self.profile {
            return (self.attach(surface), None);
        }
        let (keywords, err) = KeywordSet::load_or_empty(&keyword_path(&self.settings, &profile));
        let session = Session::attach(profile, self.theme.clone(), keywords, surface);
        (session, err.map(Error::from))
    }

    /// Indentation helper for this snapshot's settings and profile
    pub fn indenter(&self) -> Indenter {
        Indenter::new(&self.settings.editor, &self.profile)
    }
}

/// Keyword file of a profile: `<config dir>/keywords/<file>`
pub fn keyword_path(settings: &Settings, profile: &LanguageProfile) -> PathBuf {
    settings
        .config_dir()
        .join("keywords")
        .join(&profile.keyword_file)
}
