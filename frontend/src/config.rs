//! Build-time configuration for the dashboard bundle.
//!
//! A wasm bundle has no process environment at runtime, so values are baked
//! in when the crate is compiled (`EXPENSE_API_BASE_URL=... trunk build`).

use tracing::Level;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for the build variable {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Prefix for every API path. Empty means same-origin relative requests.
    pub api_base_url: String,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            log_level: Level::INFO,
        }
    }
}

impl Config {
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_values(
            option_env!("EXPENSE_API_BASE_URL"),
            option_env!("EXPENSE_LOG_LEVEL"),
        )
    }

    fn from_values(base_url: Option<&str>, log_level: Option<&str>) -> Result<Self, ConfigError> {
        let api_base_url = base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_default();

        let log_level = match log_level.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => raw.parse::<Level>().map_err(|_| {
                ConfigError::InvalidValue("EXPENSE_LOG_LEVEL".to_string(), raw.to_string())
            })?,
            None => Level::INFO,
        };

        Ok(Self {
            api_base_url,
            log_level,
        })
    }
}
