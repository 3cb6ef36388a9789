//! Registered character profiles keyed by chat user id.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use kupo_core::{ProfileRecord, Result};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::file::{read_json_or_default, write_json_atomic};

/// In-memory profile map mirrored to a flat JSON file.
///
/// Readers see the in-memory copy. Writers serialize on `write_guard`, which
/// covers both the map update and the file rewrite, so the file always holds
/// the last completed write.
pub struct ProfileStore {
    path: PathBuf,
    profiles: RwLock<BTreeMap<String, ProfileRecord>>,
    write_guard: Mutex<()>,
}

impl ProfileStore {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let profiles: BTreeMap<String, ProfileRecord> = read_json_or_default(&path).await?;
        info!(path = %path.display(), count = profiles.len(), "Loaded profiles");
        Ok(Self {
            path,
            profiles: RwLock::new(profiles),
            write_guard: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get(&self, user_id: &str) -> Option<ProfileRecord> {
        self.profiles.read().await.get(user_id).cloned()
    }

    /// Replace the whole record for `user_id` and persist.
    ///
    /// Callers must only pass records whose character already resolved.
    pub async fn put(&self, user_id: &str, record: ProfileRecord) -> Result<()> {
        let _guard = self.write_guard.lock().await;

        // Readers keep seeing the old map until the file holds the new one.
        let mut snapshot = self.profiles.read().await.clone();
        snapshot.insert(user_id.to_string(), record);

        write_json_atomic(&self.path, &snapshot).await?;
        *self.profiles.write().await = snapshot;
        debug!(user_id, path = %self.path.display(), "Profile persisted");
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
