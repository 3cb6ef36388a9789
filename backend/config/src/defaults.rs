//! Config defaults that depend on where the config file lives.

use std::path::{Path, PathBuf};

use crate::schema::KupoConfig;

/// Subdirectory of the system temp dir used when `capture.artifactDir` is unset.
pub const DEFAULT_ARTIFACT_SUBDIR: &str = "kupo-captures";

/// Apply all defaults to a freshly loaded config.
///
/// `base_dir` is the directory of the config file; relative storage and log
/// paths are anchored there.
pub fn apply_all_defaults(config: KupoConfig, base_dir: Option<&Path>) -> KupoConfig {
    let config = apply_capture_defaults(config);
    let config = apply_catalog_defaults(config);
    apply_path_defaults(config, base_dir)
}

fn apply_capture_defaults(mut config: KupoConfig) -> KupoConfig {
    if config.capture.artifact_dir.as_os_str().is_empty() {
        config.capture.artifact_dir = std::env::temp_dir().join(DEFAULT_ARTIFACT_SUBDIR);
    }
    if config.capture.market.clip.is_none() {
        config.capture.market.clip = Some(config.capture.clip);
    }
    config
}

fn apply_catalog_defaults(mut config: KupoConfig) -> KupoConfig {
    if config.catalog.workers == 0 {
        config.catalog.workers = 1;
    }
    config
}

fn apply_path_defaults(mut config: KupoConfig, base_dir: Option<&Path>) -> KupoConfig {
    let Some(base) = base_dir.filter(|b| !b.as_os_str().is_empty()) else {
        return config;
    };
    config.storage.profiles_file = anchor(base, &config.storage.profiles_file);
    config.storage.items_file = anchor(base, &config.storage.items_file);
    if let Some(file) = &config.lookup.world_allow_list_file {
        config.lookup.world_allow_list_file = Some(anchor(base, file));
    }
    if let Some(dir) = &config.logging.dir {
        config.logging.dir = Some(anchor(base, dir));
    }
    config
}

fn anchor(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
