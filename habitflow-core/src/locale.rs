//! Display locales.
//!
//! Exactly two locales are supported: English (default) and Portuguese.
//! The tables here cover what the CLI actually renders — heatmap axis
//! labels and milestone text. Switching locale only changes labels; it
//! never touches computed data.

use serde::{Deserialize, Serialize};

/// Supported display languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Pt,
}

impl Language {
    /// Returns the two-letter code used in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pt => "pt",
        }
    }

    /// Short weekday labels, Sunday first.
    pub fn weekdays_short(&self) -> [&'static str; 7] {
        match self {
            Language::En => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            Language::Pt => ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"],
        }
    }

    /// Short month labels, January first.
    pub fn months_short(&self) -> [&'static str; 12] {
        match self {
            Language::En => [
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov",
                "Dec",
            ],
            Language::Pt => [
                "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov",
                "Dez",
            ],
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "pt" => Ok(Language::Pt),
            _ => Err(format!("unknown language: {}", s)),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
