use std::env;

pub const DEFAULT_API_URL: &str = "https://api.privatbank.ua/p24api/exchange_rates";
const API_URL_VAR: &str = "PRIVAT_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Config {
    /// Reads settings from the process environment, after merging a `.env` file if present.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            log::debug!("Loaded environment from {}", path.display());
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(API_URL_VAR).filter(|url| !url.trim().is_empty()) {
            Some(api_url) => Self {
                api_url: api_url.trim().trim_end_matches('?').to_string(),
            },
            None => Self::default(),
        }
    }
}
