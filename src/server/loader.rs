//! Configuration loading
//!
//! Later layers win: embedded defaults, `config/default`, the profile file
//! named by `NEWPLACES_ENV`, `config/local`, then `NEWPLACES_*` variables.

use super::config::AppConfig;
use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

/// Embedded default configuration (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

/// Selects the optional `config/<profile>` file
const PROFILE_VAR: &str = "NEWPLACES_ENV";
const DEFAULT_PROFILE: &str = "development";

/// Variables look like `NEWPLACES_REDIS__URL`
const ENV_PREFIX: &str = "NEWPLACES";

fn file_layers(profile: &str) -> ConfigBuilder<DefaultState> {
    ["config/default".to_string(), format!("config/{profile}"), "config/local".to_string()]
        .into_iter()
        .fold(
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)),
            |builder, name| builder.add_source(File::with_name(&name).required(false)),
        )
}

fn env_layer() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig> {
    builder
        .build()
        .context("Failed to build configuration")?
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

/// Load configuration from files and environment
pub fn load_config() -> Result<AppConfig> {
    let profile = std::env::var(PROFILE_VAR).unwrap_or_else(|_| DEFAULT_PROFILE.to_string());
    finish(file_layers(&profile).add_source(env_layer()))
}
