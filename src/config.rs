use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Value shipped in sample `.env` files. Treated exactly like a missing key.
pub const API_KEY_PLACEHOLDER: &str = "your_api_key_here";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub language: String,
    pub search_debounce: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            search_debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let search_debounce = match non_empty("SEARCH_DEBOUNCE_MS") {
            Some(raw) => {
                let ms: u64 = raw
                    .parse()
                    .with_context(|| format!("SEARCH_DEBOUNCE_MS must be an integer, got '{raw}'"))?;
                Duration::from_millis(ms)
            }
            None => defaults.search_debounce,
        };

        Ok(Self {
            api_key: lookup("TMDB_API_KEY").map(|k| k.trim().to_string()),
            base_url: non_empty("TMDB_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            language: non_empty("TMDB_LANGUAGE").unwrap_or(defaults.language),
            search_debounce,
        })
    }

    /// The API key, unless it is missing, blank, or the placeholder.
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| has_credential(k))
    }
}

pub fn has_credential(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && key != API_KEY_PLACEHOLDER
}
