use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DostError;

/// Active display language.
///
/// Hindi is the primary locale and the default everywhere a language is
/// omitted. On the wire the short locale codes `"hi"` and `"en"` are used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// Primary locale.
    #[default]
    #[serde(rename = "hi")]
    Hindi,
    /// Secondary locale.
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// All supported languages, primary first.
    pub const ALL: [Language; 2] = [Language::Hindi, Language::English];

    /// Locale code used on the wire.
    pub fn code(self) -> &'static str {
        match self {
            Language::Hindi => "hi",
            Language::English => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = DostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hi" | "hindi" => Ok(Language::Hindi),
            "en" | "english" => Ok(Language::English),
            other => Err(DostError::Config(format!("unsupported language: {}", other))),
        }
    }
}

/// How the chat assistant produces answers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    /// Answer from the built-in knowledge base.
    #[default]
    Local,
    /// Delegate to the remote answering service.
    Remote,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_default_is_hindi() {
        assert_eq!(Language::default(), Language::Hindi);
    }

    #[test]
    fn test_language_serializes_as_locale_code() {
        assert_eq!(serde_json::to_string(&Language::Hindi).unwrap(), "\"hi\"");
        assert_eq!(serde_json::to_string(&Language::English).unwrap(), "\"en\"");
        let lang: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Language::English);
    }

    #[test]
    fn test_language_rejects_unknown_code() {
        assert!(serde_json::from_str::<Language>("\"fr\"").is_err());
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_from_str_accepts_names_and_codes() {
        assert_eq!("hi".parse::<Language>().unwrap(), Language::Hindi);
        assert_eq!("Hindi".parse::<Language>().unwrap(), Language::Hindi);
        assert_eq!(" EN ".parse::<Language>().unwrap(), Language::English);
        assert_eq!("english".parse::<Language>().unwrap(), Language::English);
    }

    #[test]
    fn test_language_display_matches_code() {
        for lang in Language::ALL {
            assert_eq!(lang.to_string(), lang.code());
        }
    }

    #[test]
    fn test_chat_mode_serde() {
        assert_eq!(serde_json::to_string(&ChatMode::Remote).unwrap(), "\"remote\"");
        let mode: ChatMode = serde_json::from_str("\"local\"").unwrap();
        assert_eq!(mode, ChatMode::Local);
    }
}
