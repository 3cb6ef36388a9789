//! `kupo-config`: runtime configuration for the lookup-and-capture pipeline.
//!
//! Provides:
//! - Typed config schema (lookup, capture targets, storage, logging)
//! - YAML loading with `${ENV_VAR}` substitution
//! - Default value application
//! - Validation with path-addressed errors and warnings
//!
//! The loaded [`KupoConfig`] is built once at startup and handed to each
//! component's constructor; nothing re-reads it afterwards.

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config, load_world_allow_list};
pub use schema::{
    CaptureConfig, CatalogConfig, CharacterPageConfig, KupoConfig, LoggingConfig, LookupConfig,
    MarketPageConfig, StorageConfig,
};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use std::path::Path;

/// Load, env-substitute, default and validate a config file.
///
/// This is the main entry point for loading a config at runtime. Validation
/// errors are returned as a failure; warnings are logged.
pub async fn load_and_prepare(path: &Path) -> Result<KupoConfig> {
    let (config, report) = prepare(path).await?;

    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    if !report.is_valid() {
        for error in &report.errors {
            tracing::error!(path = %error.path, message = %error.message, "Config error");
        }
        anyhow::bail!("config at {} has {} error(s)", path.display(), report.errors.len());
    }

    Ok(config)
}

/// Like [`load_and_prepare`] but hands back the validation report instead of
/// acting on it.
pub async fn prepare(path: &Path) -> Result<(KupoConfig, ValidationReport)> {
    let raw = load_config(path).await?;

    let value = serde_json::to_value(&raw).context("Failed to serialize config for processing")?;
    let value = resolve_env_vars(&value).context("Failed to resolve env vars in config")?;
    let config: KupoConfig =
        serde_json::from_value(value).context("Failed to deserialize config after processing")?;

    let mut config = apply_all_defaults(config, path.parent());

    if config.lookup.world_allow_list.is_none() {
        if let Some(file) = config.lookup.world_allow_list_file.clone() {
            config.lookup.world_allow_list = Some(load_world_allow_list(&file).await?);
        }
    }

    let report = validate(&config);
    Ok((config, report))
}
