use crate::connectors::ConnectorConfig;
use serde;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub app_port: u16,
    pub app_host: String,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub quota: QuotaSettings,
    #[serde(default)]
    pub connectors: ConnectorConfig,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database_name: String,
    #[serde(default)]
    pub require_ssl: bool,
}

/// Login session and password hashing settings.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct AuthSettings {
    pub cookie_name: String,
    pub session_ttl_secs: i64,
    /// bcrypt work factor, 4..=31
    pub password_cost: u32,
    #[serde(default)]
    pub secure_cookie: bool,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            cookie_name: "chatbridge_session".to_string(),
            session_ttl_secs: 7 * 24 * 60 * 60,
            password_cost: bcrypt::DEFAULT_COST,
            secure_cookie: false,
        }
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct QuotaSettings {
    /// Number of assistant replies an anonymous session may receive.
    pub anonymous_message_limit: i32,
}

impl Default for QuotaSettings {
    fn default() -> Self {
        Self {
            anonymous_message_limit: 70,
        }
    }
}

impl DatabaseSettings {
    pub fn connect_options(&self) -> PgConnectOptions {
        self.connect_options_without_db()
            .database(&self.database_name)
    }

    pub fn connect_options_without_db(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };

        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .ssl_mode(ssl_mode)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // `configuration.yaml` first, then APP__SECTION__KEY overrides from the environment
    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration"))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let mut config: Settings = settings.try_deserialize()?;

    // Provider keys never live in the yaml file
    config.connectors.gemini.api_key = std::env::var("GEMINI_API_KEY").ok();
    config.connectors.openrouter.api_key = std::env::var("OPENROUTER_API_KEY").ok();

    Ok(config)
}
