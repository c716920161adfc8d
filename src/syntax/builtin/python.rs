//! Python profile

use crate::syntax::profile::{words, LanguageProfile};

/// Name the Python profile is registered under
pub const NAME: &str = "PythonHighlighter";

/// Create the Python profile
pub fn python_profile() -> LanguageProfile {
    let mut profile = LanguageProfile::new(NAME);
    profile.add_extension("py");
    profile.add_extension("pyw");
    profile.add_extension("pyi");

    profile.comment_leader = "#".to_string();
    // Docstring-style block comments
    profile.block_comment = Some((r#"""""#.to_string(), r#"""""#.to_string()));
    profile.class_pattern = r"\bclass\s+([A-Za-z_][A-Za-z0-9_]*)".to_string();
    profile.keyword_file = "python_keywords.txt".to_string();

    profile.indenters = words(&[
        "def", "for", "while", "do", "class", "if", "else", "elif", "switch", "case", "try",
        "except", "finally",
    ]);
    profile.dedenters = words(&["break", "continue", "return"]);

    profile
}
