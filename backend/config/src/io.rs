//! Config file discovery and loading.

use crate::schema::KupoConfig;
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the Kupo config directory.
/// Priority: `KUPO_CONFIG_DIR` env > `~/.kupo/` > `./.kupo`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("KUPO_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .map(|home| home.join(".kupo"))
        .unwrap_or_else(|| PathBuf::from(".kupo"))
}

pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist (first run).
pub async fn load_config(path: &Path) -> Result<KupoConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(KupoConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    // serde_yaml rejects a fully empty document
    if raw.trim().is_empty() {
        return Ok(KupoConfig::default());
    }

    let config: KupoConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Read the recognized world names from a JSON array file.
pub async fn load_world_allow_list(path: &Path) -> Result<BTreeSet<String>> {
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read world list: {}", path.display()))?;
    let worlds: BTreeSet<String> = serde_json::from_str(&raw)
        .with_context(|| format!("World list at {} is not a JSON array of strings", path.display()))?;
    info!(path = %path.display(), count = worlds.len(), "Loaded world allow-list");
    Ok(worlds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("config.yaml")).await.unwrap();
        assert_eq!(cfg, KupoConfig::default());
    }

    #[tokio::test]
    async fn empty_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "\n").unwrap();
        assert_eq!(load_config(&path).await.unwrap(), KupoConfig::default());
    }

    #[tokio::test]
    async fn reads_world_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worlds.json");
        std::fs::write(&path, r#"["Atomos", "Gaia", "Gaia"]"#).unwrap();
        let worlds = load_world_allow_list(&path).await.unwrap();
        assert_eq!(worlds.len(), 2);
        assert!(worlds.contains("Atomos"));
    }

    #[tokio::test]
    async fn load_and_prepare_reads_world_file_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("worlds.json"), r#"["Gaia"]"#).unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "lookup:\n  worldAllowListFile: worlds.json\n").unwrap();

        let cfg = crate::load_and_prepare(&path).await.unwrap();
        let worlds = cfg.lookup.world_allow_list.unwrap();
        assert_eq!(worlds.into_iter().collect::<Vec<_>>(), vec!["Gaia".to_string()]);
        assert_eq!(cfg.storage.profiles_file, dir.path().join("usernames.json"));
    }
}
