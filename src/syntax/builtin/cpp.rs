//! C/C++ profile

use crate::syntax::profile::{words, LanguageProfile};

/// Name the C++ profile is registered under
pub const NAME: &str = "CppHighlighter";

/// Create the C++ profile (also works for C)
pub fn cpp_profile() -> LanguageProfile {
    let mut profile = LanguageProfile::new(NAME);
    profile.add_extension("c");
    profile.add_extension("h");
    profile.add_extension("cpp");
    profile.add_extension("hpp");
    profile.add_extension("cc");
    profile.add_extension("cxx");

    profile.comment_leader = "//".to_string();
    profile.block_comment = Some(("/*".to_string(), "*/".to_string()));
    profile.class_pattern = r"\b(?:class|struct)\s+([A-Za-z_][A-Za-z0-9_]*)".to_string();
    profile.keyword_file = "cpp_keywords.txt".to_string();

    profile.indenters = words(&[
        "if", "else", "for", "while", "do", "switch", "case", "default", "try", "catch",
    ]);
    profile.dedenters = words(&["break", "continue", "return"]);

    profile
}
