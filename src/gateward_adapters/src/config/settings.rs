use std::time::Duration;

use config::{Config, ConfigError};
use gateward_core::{Email, EmailError};
use secrecy::Secret;
use serde::Deserialize;

use super::constants::prod;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub email_client: EmailClientSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_in_millis: u64,
}

impl Settings {
    /// Load settings from the environment (`GATEWARD_` prefix, `__` as
    /// the nesting separator), with a `.env` file picked up when
    /// present. Secrets never come from defaults.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .set_default("application.host", "0.0.0.0")?
            .set_default("application.port", 3000)?
            .set_default("auth.token_ttl_in_seconds", 900)?
            .set_default("email_client.base_url", prod::email_client::BASE_URL)?
            .set_default(
                "email_client.timeout_in_millis",
                prod::email_client::TIMEOUT_IN_MILLIS,
            )?
            .add_source(
                config::Environment::with_prefix("GATEWARD")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }

    pub fn sender_email(&self) -> Result<Email, EmailError> {
        Email::try_from(self.sender.clone())
    }
}
