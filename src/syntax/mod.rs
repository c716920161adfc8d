//! Syntax highlighting
//!
//! Configuration flows one way: a keyword set, a theme and a language
//! profile are compiled by [`build`] into a [`RuleTable`]; [`highlight`]
//! applies that table to one line at a time; a [`Session`] keeps the
//! per-line results for an attached surface.

mod builder;
pub(crate) mod builtin;
mod highlighter;
mod keywords;
mod profile;
mod registry;
mod rules;
mod session;
mod style;
mod theme;

pub use builder::{build, build_with_keyword_file, RuleTable};
pub use builtin::{cpp_profile, python_profile};
pub use highlighter::highlight;
pub use keywords::KeywordSet;
pub use profile::LanguageProfile;
pub use registry::{ProfileFactory, Registry, DEFAULT_HIGHLIGHTER};
pub use rules::{CommentRule, CommentState, HighlightResult, HighlightRule};
pub use session::{Session, TextSurface};
pub use style::{Rgb, Span, Style};
pub use theme::{named_color, resolve_color, Palette, Role, Theme, COLORS_SECTION};
