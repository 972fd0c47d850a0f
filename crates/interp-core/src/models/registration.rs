use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Languages a translator can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Language {
    Spanish,
    French,
    German,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Spanish, Language::French, Language::German];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Spanish => "SPANISH",
            Language::French => "FRENCH",
            Language::German => "GERMAN",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Language {
    type Err = RegistrationError;

    /// Accepts the wire code or the label, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Language::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(s) || l.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| RegistrationError::UnknownLanguage(s.to_string()))
    }
}

/// Problems caught before a registration is sent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Please select at least one language")]
    NoLanguages,

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),
}

/// Translator sign-up form as the user fills it in
#[derive(Debug, Clone, Default)]
pub struct TranslatorRegistration {
    pub email: String,
    pub name: String,
    pub password: String,
    pub confirm_password: String,
    pub languages: Vec<Language>,
    /// Free text such as "$50/hour"; empty means not provided
    pub hourly_rate: String,
}

/// Body of `POST /translators/register`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TranslatorRegistrationRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub languages: Vec<Language>,
    pub hourly_rate: Option<String>,
}

impl TranslatorRegistration {
    /// Add `language` if it is not selected, remove it if it is
    pub fn toggle_language(&mut self, language: Language) {
        if let Some(pos) = self.languages.iter().position(|l| *l == language) {
            self.languages.remove(pos);
        } else {
            self.languages.push(language);
        }
    }

    /// Checks made before anything goes over the wire. The password check
    /// runs first.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        if self.password != self.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }
        if self.languages.is_empty() {
            return Err(RegistrationError::NoLanguages);
        }
        Ok(())
    }

    /// Validate and build the request body
    pub fn to_request(&self) -> Result<TranslatorRegistrationRequest, RegistrationError> {
        self.validate()?;
        let hourly_rate = Some(self.hourly_rate.trim())
            .filter(|r| !r.is_empty())
            .map(str::to_string);
        Ok(TranslatorRegistrationRequest {
            email: self.email.clone(),
            name: self.name.clone(),
            password: self.password.clone(),
            languages: self.languages.clone(),
            hourly_rate,
        })
    }
}
