//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// HMAC secret used to sign access tokens.
    pub jwt_secret: String,
    /// Lifetime of issued access tokens.
    #[serde(default = "default_jwt_expires_secs")]
    pub jwt_expires_secs: u64,
}

const fn default_jwt_expires_secs() -> u64 {
    7 * 24 * 60 * 60
}

impl ServerConfig {
    /// Loads `config/default.yaml`, then `config/{APP_ENV}.yaml` (optional,
    /// `APP_ENV` defaults to `local`), then `APP_*` environment variables.
    #[cfg(feature = "server")]
    pub fn load() -> Result<Self, config::ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?
            .try_deserialize::<ServerConfig>()
    }
}
