use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::HydrationError;

/// A lowercase ISO-639 style language code, e.g. `en`, `nl` or `deu`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "String", into = "String")]
#[sqlx(transparent)]
pub struct Language(String);

impl Language {
    pub fn parse(code: &str) -> Result<Self, HydrationError> {
        let code = code.trim();
        if (2..=3).contains(&code.len()) && code.chars().all(|c| c.is_ascii_lowercase()) {
            Ok(Language(code.to_string()))
        } else {
            Err(HydrationError::InvalidLanguage(code.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Language {
    type Err = HydrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::parse(s)
    }
}

impl TryFrom<String> for Language {
    type Error = HydrationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Language::parse(&value)
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
