use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::args::{ConfigType, ServeArgs};

#[derive(
    Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq, JsonSchema,
)]
#[serde(default)]
pub struct Configuration {
    pub security: SecurityConfiguration,
    pub database: DatabaseConfiguration,
}

impl Configuration {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, eyre::Report> {
        let config = std::fs::read_to_string(path)?;
        let config: Configuration = serde_json::from_str(&config)?;

        Ok(config)
    }

    pub fn from_inline(config: impl AsRef<str>) -> Result<Self, eyre::Report> {
        let config: Configuration = serde_json::from_str(config.as_ref())?;

        Ok(config)
    }

    /// Effective configuration for the given CLI args: the configured
    /// source first, defaults otherwise, with flag overrides applied on
    /// top.
    pub fn resolve(args: &ServeArgs) -> Result<Self, eyre::Report> {
        let mut config = match (
            args.config.as_deref(),
            args.config_type.unwrap_or(ConfigType::File),
        ) {
            (Some(source), ConfigType::File) => Self::from_file(source)?,
            (Some(source), ConfigType::Inline) => Self::from_inline(source)?,
            (None, _) => Self::default(),
        };

        if let Some(url) = &args.database_url {
            config.database.url = url.clone();
        }

        if let Some(secret) = &args.token_secret {
            config.security.token_secret = secret.clone();
        }

        Ok(config)
    }
}

#[derive(
    Clone, Debug, Deserialize, Serialize, PartialEq, Eq, JsonSchema,
)]
#[serde(default)]
pub struct SecurityConfiguration {
    /// Secret used to sign and verify identity tokens. Override it in any
    /// deployment; the default only exists so the service starts out of
    /// the box.
    pub token_secret: String,

    /// Maximum number of rows the user directory search returns.
    pub search_result_cap: u32,
}

impl Default for SecurityConfiguration {
    fn default() -> Self {
        Self {
            token_secret: "super-secret-key-123".to_string(),
            search_result_cap: 10,
        }
    }
}

#[derive(
    Clone, Debug, Deserialize, Serialize, PartialEq, Eq, JsonSchema,
)]
#[serde(default)]
pub struct DatabaseConfiguration {
    /// SQLite connection URL.
    pub url: String,

    pub max_connections: u32,
}

impl Default for DatabaseConfiguration {
    fn default() -> Self {
        Self {
            url: "sqlite://task_nexus.db".to_string(),
            max_connections: 5,
        }
    }
}
