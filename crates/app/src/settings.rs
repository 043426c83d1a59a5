//! Handles settings for the application. Configuration is read from
//! `settings.toml` (optional) and `ALCANCIA_*` environment variables, e.g.
//! `ALCANCIA_STORAGE__DATA_DIR=/var/lib/alcancia`.
//!
//! See `settings.toml` for the configuration.
use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use engine::{Catalog, GoalStatus};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Storage {
    pub data_dir: PathBuf,
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub storage: Storage,
    /// Replaces the built-in categories and statuses when present.
    pub catalog: Option<Catalog>,
}

impl Settings {
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("ALCANCIA")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("catalog.income_categories")
                    .with_list_parse_key("catalog.expense_categories")
                    .with_list_parse_key("catalog.goal_categories")
                    .with_list_parse_key("catalog.goal_statuses")
                    .try_parsing(true),
            )
            .build()?;

        Self::from_config(settings)
    }

    /// Decode and check loaded settings. Goal statuses may only narrow the
    /// built-in ones, since goals store one of those spellings.
    fn from_config(config: Config) -> Result<Self, ConfigError> {
        let settings: Self = config.try_deserialize()?;
        if let Some(catalog) = &settings.catalog
            && let Some(unknown) = catalog
                .goal_statuses
                .iter()
                .find(|status| GoalStatus::try_from(status.as_str()).is_err())
        {
            return Err(ConfigError::Message(format!(
                "catalog.goal_statuses: unknown goal status '{unknown}'"
            )));
        }
        Ok(settings)
    }
}
