//! UI language tags and validation.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ui::Style;

/// Supported UI language tags and their display names.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[("pt-BR", "Português"), ("en", "English")];

/// A UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en")]
    En,
}

impl Language {
    /// Returns the language tag sent to the server and persisted locally.
    pub const fn code(self) -> &'static str {
        match self {
            Self::PtBr => "pt-BR",
            Self::En => "en",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::PtBr => "Português",
            Self::En => "English",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pt-BR" => Ok(Self::PtBr),
            "en" => Ok(Self::En),
            _ => anyhow::bail!(
                "Invalid language code: '{s}'\n\n\
                 Valid language codes: pt-BR, en\n\
                 Run 'quip languages' to see all supported codes."
            ),
        }
    }
}

/// Prints all supported language tags to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Supported languages"));
    for (code, name) in SUPPORTED_LANGUAGES {
        println!("  {:6} {}", Style::code(code), Style::secondary(name));
    }
}

/// Validates that the given language tag is supported.
///
/// # Errors
///
/// Returns an error if the tag is not in the supported list.
pub fn validate_language(lang: &str) -> Result<Language> {
    lang.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_language_valid() {
        assert_eq!(validate_language("pt-BR").ok(), Some(Language::PtBr));
        assert_eq!(validate_language("en").ok(), Some(Language::En));
    }

    #[test]
    fn test_validate_language_invalid() {
        assert!(validate_language("invalid").is_err());
        assert!(validate_language("").is_err());
        assert!(validate_language("pt-br").is_err()); // Case sensitive
        assert!(validate_language("EN").is_err());
    }

    #[test]
    fn test_default_is_portuguese() {
        assert_eq!(Language::default(), Language::PtBr);
    }

    #[test]
    fn test_serde_uses_tags() {
        assert_eq!(serde_json::to_string(&Language::PtBr).ok().as_deref(), Some("\"pt-BR\""));
        let lang: Option<Language> = serde_json::from_str("\"en\"").ok();
        assert_eq!(lang, Some(Language::En));
    }

    #[test]
    fn test_supported_languages_parse() {
        for (code, name) in SUPPORTED_LANGUAGES {
            let lang: Language = code.parse().unwrap_or_default();
            assert_eq!(lang.code(), *code);
            assert_eq!(lang.display_name(), *name);
        }
    }
}
