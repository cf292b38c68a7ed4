// src/languages.rs
// =============================================================================
// The fixed list of language tabs the user can search in.
//
// Each language has:
// - a display label (what the user sees, e.g. "C++")
// - a search key (what goes into the `language:` qualifier, e.g. "c++")
//
// The list is static: no config files, no persistence.
// =============================================================================

use serde::Serialize;
use thiserror::Error;

// One selectable language tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    /// Human-readable name shown in tabs and messages
    pub label: &'static str,
    /// Value used in the `language:<key>` search qualifier
    pub search_key: &'static str,
}

// Ordered by how many repositories GitHub hosts for each language
pub const LANGUAGES: [Language; 15] = [
    Language { label: "JavaScript", search_key: "javascript" },
    Language { label: "Java", search_key: "java" },
    Language { label: "Python", search_key: "python" },
    Language { label: "CSS", search_key: "css" },
    Language { label: "PHP", search_key: "php" },
    Language { label: "Ruby", search_key: "ruby" },
    Language { label: "C++", search_key: "c++" },
    Language { label: "C", search_key: "c" },
    Language { label: "Shell", search_key: "shell" },
    Language { label: "C#", search_key: "c#" },
    Language { label: "Objective-C", search_key: "objective-c" },
    Language { label: "R", search_key: "r" },
    Language { label: "VimL", search_key: "viml" },
    Language { label: "Go", search_key: "go" },
    Language { label: "Perl", search_key: "perl" },
];

#[derive(Debug, Error)]
#[error("unknown language '{0}' (run `gh-repo-search languages` to see the list)")]
pub struct UnknownLanguage(pub String);

// Finds a language by search key or by label, ignoring case
//
// Examples:
//   "javascript" -> JavaScript
//   "C++"        -> C++
//   "objective-c" / "Objective-C" -> Objective-C
pub fn find(name: &str) -> Result<&'static Language, UnknownLanguage> {
    let name = name.trim();
    LANGUAGES
        .iter()
        .find(|lang| {
            lang.search_key.eq_ignore_ascii_case(name) || lang.label.eq_ignore_ascii_case(name)
        })
        .ok_or_else(|| UnknownLanguage(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_key() {
        let lang = find("python").unwrap();
        assert_eq!(lang.label, "Python");
    }

    #[test]
    fn test_find_by_label_ignores_case() {
        assert_eq!(find("c++").unwrap().label, "C++");
        assert_eq!(find("OBJECTIVE-C").unwrap().search_key, "objective-c");
        assert_eq!(find(" VimL ").unwrap().search_key, "viml");
    }

    #[test]
    fn test_c_and_csharp_are_distinct() {
        assert_eq!(find("c").unwrap().label, "C");
        assert_eq!(find("c#").unwrap().label, "C#");
    }

    #[test]
    fn test_unknown_language() {
        let err = find("cobol").unwrap_err();
        assert!(err.to_string().contains("cobol"));
    }
}
