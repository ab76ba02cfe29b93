//! Application configuration

use std::collections::HashMap;
use std::env;

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use serde::Deserialize;

use crate::application::services::DEFAULT_MAX_ATTEMPTS;
use crate::domain::value_objects::{Catalog, MinigameDefinition, MinigameKind};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP server port
    pub server_port: u16,
    /// Per-request timeout applied by the HTTP layer
    pub request_timeout_secs: u64,
    /// Character and inventory store settings
    pub store: StoreConfig,
    /// Commit attempts for one play before giving up on version conflicts
    pub play_max_attempts: u32,
    /// Optional TOML file overriding catalog entries
    pub catalog_path: Option<String>,
}

/// Persistence backend settings
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// "memory" or "sqlite"
    pub backend: String,
    pub sqlite_path: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let play_max_attempts: u32 = env::var("PLAY_MAX_ATTEMPTS")
            .unwrap_or_else(|_| DEFAULT_MAX_ATTEMPTS.to_string())
            .parse()
            .context("PLAY_MAX_ATTEMPTS must be a positive integer")?;
        if play_max_attempts == 0 {
            anyhow::bail!("PLAY_MAX_ATTEMPTS must be at least 1");
        }

        Ok(Self {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("REQUEST_TIMEOUT_SECS must be a number of seconds")?,
            store: StoreConfig {
                backend: env::var("STORE_BACKEND").unwrap_or_else(|_| "sqlite".to_string()),
                sqlite_path: env::var("SQLITE_PATH")
                    .unwrap_or_else(|_| "./data/notebook_rpg.db".to_string()),
            },
            play_max_attempts,
            catalog_path: env::var("CATALOG_PATH").ok().filter(|p| !p.is_empty()),
        })
    }

    /// Build the minigame catalog: shipped defaults, then the optional
    /// `CATALOG_PATH` file, then `MINIGAME_<ID>__<FIELD>` environment variables.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let mut builder = config::Config::builder();
        if let Some(path) = &self.catalog_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }
        catalog_from_sources(builder.add_source(minigame_environment()))
    }
}

/// `MINIGAME_ARCADE__COST=250` becomes `arcade.cost = 250`
fn minigame_environment() -> Environment {
    Environment::with_prefix("MINIGAME")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Per-minigame overrides; unset fields keep the shipped value
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MinigameOverride {
    display_name: Option<String>,
    required_level: Option<u32>,
    cost: Option<u64>,
    fatigue_recovery: Option<u32>,
    enabled: Option<bool>,
}

fn catalog_from_sources(builder: ConfigBuilder<DefaultState>) -> Result<Catalog> {
    let overrides: HashMap<String, MinigameOverride> = builder
        .build()
        .context("Failed to read catalog configuration")?
        .try_deserialize()
        .context("Invalid catalog configuration")?;

    let mut definitions: HashMap<MinigameKind, Option<MinigameDefinition>> = MinigameKind::ALL
        .into_iter()
        .map(|kind| (kind, Some(MinigameDefinition::default_for(kind))))
        .collect();

    for (id, o) in overrides {
        let kind: MinigameKind = id
            .parse()
            .with_context(|| format!("Catalog override for unknown minigame '{id}'"))?;
        let mut definition = MinigameDefinition::default_for(kind);
        if let Some(name) = o.display_name {
            definition.display_name = name;
        }
        if let Some(level) = o.required_level {
            if level == 0 {
                anyhow::bail!("required_level for '{id}' must be at least 1");
            }
            definition.required_level = level;
        }
        if let Some(cost) = o.cost {
            definition.cost = cost;
        }
        if let Some(recovery) = o.fatigue_recovery {
            definition.fatigue_recovery = recovery;
        }

        let enabled = o.enabled.unwrap_or(true);
        if !enabled {
            tracing::info!(minigame = %kind, "Minigame disabled by configuration");
        }
        definitions.insert(kind, enabled.then_some(definition));
    }

    Ok(Catalog::from_definitions(definitions.into_values().flatten()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Result<Catalog> {
        catalog_from_sources(
            config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
        )
    }

    #[test]
    fn test_empty_configuration_yields_defaults() {
        assert_eq!(from_toml("").unwrap(), Catalog::default());
    }

    #[test]
    fn test_overrides_replace_only_named_fields() {
        let catalog = from_toml(
            r#"
            [arcade]
            cost = 250
            display_name = "Arcade"

            [gambling]
            enabled = false
            "#,
        )
        .unwrap();

        let arcade = catalog.definition_of("arcade").unwrap();
        assert_eq!(arcade.cost, 250);
        assert_eq!(arcade.display_name, "Arcade");
        assert_eq!(arcade.required_level, 10);
        assert_eq!(arcade.fatigue_recovery, 15);

        assert!(catalog.definition_of("gambling").is_err());
        assert_eq!(catalog.len(), 4);
    }

    fn from_env_vars(vars: &[(&str, &str)]) -> Result<Catalog> {
        let vars: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        catalog_from_sources(
            config::Config::builder().add_source(minigame_environment().source(Some(vars))),
        )
    }

    #[test]
    fn test_environment_overrides_catalog_entries() {
        let catalog = from_env_vars(&[
            ("MINIGAME_ARCADE__COST", "250"),
            ("MINIGAME_PHONE__FATIGUE_RECOVERY", "40"),
            ("MINIGAME_PETS__ENABLED", "false"),
            ("SERVER_PORT", "3000"),
        ])
        .unwrap();

        let arcade = catalog.definition_of("arcade").unwrap();
        assert_eq!(arcade.cost, 250);
        assert_eq!(arcade.required_level, 10);
        assert_eq!(catalog.definition_of("phone").unwrap().fatigue_recovery, 40);
        assert!(catalog.definition_of("pets").is_err());
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_environment_override_for_unknown_minigame_is_rejected() {
        assert!(from_env_vars(&[("MINIGAME_LOTTERY__COST", "5")]).is_err());
    }

    #[test]
    fn test_unknown_minigame_override_is_rejected() {
        assert!(from_toml("[lottery]\ncost = 5").is_err());
    }

    #[test]
    fn test_zero_required_level_is_rejected() {
        assert!(from_toml("[pets]\nrequired_level = 0").is_err());
    }
}
