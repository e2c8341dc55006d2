//! Application configuration management.

use serde::Deserialize;

/// Store layer configuration.
///
/// Controls retry limits for generated identifiers and caps on read
/// operations. All fields have safe defaults; values can be overridden
/// through optional config files or `BOTICA__*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// How many fresh codes to try when account-code generation collides.
    #[serde(default = "default_code_retry_limit")]
    pub code_retry_limit: u32,
    /// How many sequence bumps to try when group-number generation collides.
    #[serde(default = "default_number_retry_limit")]
    pub number_retry_limit: u32,
    /// Hard cap on rows returned by account-history queries.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Default page size for transaction listing.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

fn default_code_retry_limit() -> u32 {
    5
}

fn default_number_retry_limit() -> u32 {
    5
}

fn default_history_limit() -> usize {
    1000
}

fn default_page_size() -> u32 {
    20
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            code_retry_limit: default_code_retry_limit(),
            number_retry_limit: default_number_retry_limit(),
            history_limit: default_history_limit(),
            default_page_size: default_page_size(),
        }
    }
}

impl StoreConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or deserialized.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BOTICA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
