//! vicky - syntax highlighting core, configuration model and editing helpers
//!
//! Highlighting is rule-table based: a [`syntax::Session`] keeps per-line
//! comment state for a document and re-highlights only as far as an edit
//! actually reaches. Configuration is loaded into immutable
//! [`config::Snapshot`]s from INI files.

pub mod config;
pub mod dictionary;
pub mod error;
pub mod indent;
pub mod ini;
pub mod logger;
pub mod render;
pub mod search;
pub mod syntax;

pub use error::{Error, Result};
