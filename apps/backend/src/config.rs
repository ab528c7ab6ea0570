//! Service configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use cardsheet_core::DEFAULT_PAGE_CAPACITY;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Runtime settings for the editor service.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory holding one card list per class (`wizard.yml`, ...).
    pub card_dir: PathBuf,
    /// Base URL of the public game-data catalog.
    pub catalog_url: String,
    pub page_capacity: usize,
    /// Quiet period before a draft of the free-text editor is applied.
    pub apply_debounce: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            card_dir: PathBuf::from("./cards"),
            catalog_url: "https://www.dnd5eapi.co".to_string(),
            page_capacity: DEFAULT_PAGE_CAPACITY,
            apply_debounce: Duration::from_millis(500),
        }
    }
}

impl Config {
    /// Read configuration from environment variables.
    ///
    /// Env vars (all optional):
    /// - HOST, PORT: listen address
    /// - CARD_DIR: class card directory
    /// - CATALOG_URL: remote catalog base URL
    /// - PAGE_CAPACITY: cards per printed page
    /// - APPLY_DEBOUNCE_MS: free-text apply delay
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(v) => parse_number("PORT", &v)?,
            None => defaults.port,
        };
        let page_capacity = match lookup("PAGE_CAPACITY") {
            Some(v) => match parse_number::<usize>("PAGE_CAPACITY", &v)? {
                0 => {
                    return Err(ConfigError::Invalid {
                        var: "PAGE_CAPACITY",
                        value: v,
                    })
                }
                n => n,
            },
            None => defaults.page_capacity,
        };
        let apply_debounce = match lookup("APPLY_DEBOUNCE_MS") {
            Some(v) => Duration::from_millis(parse_number("APPLY_DEBOUNCE_MS", &v)?),
            None => defaults.apply_debounce,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            card_dir: lookup("CARD_DIR").map(PathBuf::from).unwrap_or(defaults.card_dir),
            catalog_url: lookup("CATALOG_URL").unwrap_or(defaults.catalog_url),
            page_capacity,
            apply_debounce,
        })
    }

    /// Listen address as `host:port`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.addr(), "0.0.0.0:3000");
        assert_eq!(config.page_capacity, 9);
        assert_eq!(config.apply_debounce, Duration::from_millis(500));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("CARD_DIR", "/srv/cards"),
            ("PAGE_CAPACITY", "8"),
            ("APPLY_DEBOUNCE_MS", "250"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.card_dir, PathBuf::from("/srv/cards"));
        assert_eq!(config.page_capacity, 8);
        assert_eq!(config.apply_debounce, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(config_from(&[("PORT", "http")]).is_err());
        assert!(config_from(&[("PAGE_CAPACITY", "0")]).is_err());
        assert!(config_from(&[("APPLY_DEBOUNCE_MS", "-1")]).is_err());
    }
}
