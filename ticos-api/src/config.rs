use std::{str::FromStr, time::Duration};

use serde::Deserialize;
use serde_with::serde_as;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use strum::{Display, EnumString};

use crate::domain::search::SearchConfig;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub search: SearchSettings,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    pub database_name: String,
    pub require_ssl: bool,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub max_connections: u32,
}

/// Bounds applied to every search request.
#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct SearchSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub default_limit: i64,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub max_limit: i64,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub min_query_length: usize,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub max_query_length: usize,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub max_company_length: usize,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub timeout_ms: u64,
}

impl DatabaseSettings {
    pub fn without_db(&self) -> PgConnectOptions {
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

    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db().database(&self.database_name)
    }
}

impl SearchSettings {
    pub fn to_search_config(&self) -> SearchConfig {
        SearchConfig {
            default_limit: self.default_limit,
            max_limit: self.max_limit,
            min_query_length: self.min_query_length,
            max_query_length: self.max_query_length,
            max_company_length: self.max_company_length,
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }
}

pub fn read_config() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|err| config::ConfigError::Message(format!("no working directory: {err}")))?;
    let config_directory = base_path.join("config");

    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .map_err(|err| config::ConfigError::Message(format!("invalid APP_ENVIRONMENT: {err}")))?;
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(
            config_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("TICOS")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, EnumString, PartialEq, Eq)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}
