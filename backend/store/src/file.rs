//! Whole-file JSON read/write helpers.

use std::path::Path;

use kupo_core::{PipelineError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tracing::{debug, warn};

/// Read a JSON document, treating a missing or corrupt file as absent.
pub async fn read_json_or_default<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "Store file does not exist; starting empty");
            return Ok(T::default());
        }
        Err(e) => {
            return Err(PipelineError::Storage(format!("failed to read {}: {e}", path.display())));
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Store file is not valid JSON; starting empty");
            Ok(T::default())
        }
    }
}

/// Write `value` as pretty JSON via a sibling temp file and rename.
pub async fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let storage = |what: &str, e: &dyn std::fmt::Display| {
        PipelineError::Storage(format!("{what} {}: {e}", path.display()))
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| storage("failed to create directory for", &e))?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|e| storage("failed to serialize", &e))?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    fs::write(&tmp, json.as_bytes())
        .await
        .map_err(|e| storage("failed to write temp file for", &e))?;
    if let Err(e) = fs::rename(&tmp, path).await {
        if let Err(cleanup) = fs::remove_file(&tmp).await {
            warn!(path = %path.display(), error = %cleanup, "Failed to remove temp file");
        }
        return Err(storage("failed to replace", &e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn corrupt_file_reads_as_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let map: BTreeMap<String, String> = read_json_or_default(&path).await.unwrap();
        assert!(map.is_empty());
    }

    #[tokio::test]
    async fn write_creates_parent_dirs_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/data.json");
        let mut map = BTreeMap::new();
        map.insert("k".to_string(), "v".to_string());
        write_json_atomic(&path, &map).await.unwrap();

        let back: BTreeMap<String, String> = read_json_or_default(&path).await.unwrap();
        assert_eq!(back, map);
        assert!(!dir.path().join("nested/data.json.tmp").exists());
    }

    #[tokio::test]
    async fn failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("occupied"), b"x").unwrap();

        let err = write_json_atomic(&path, &BTreeMap::<String, String>::new()).await;

        assert!(matches!(err, Err(PipelineError::Storage(_))));
        assert!(!dir.path().join("data.json.tmp").exists());
        assert!(path.is_dir());
    }
}
