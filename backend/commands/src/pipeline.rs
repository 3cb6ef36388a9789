//! The lookup-and-capture flows shared by the command handlers.

use std::time::Instant;

use kupo_browser::{CaptureDriver, CaptureRequest};
use kupo_config::KupoConfig;
use kupo_core::{
    CaptureArtifact, CharacterName, PipelineError, ProfileRecord, Resolution, ResolvedIdentifier, Result,
};
use kupo_lookup::{resolve, LookupClient};
use kupo_store::{ItemCatalog, ItemId, ProfileStore};
use logging::{EventLogger, PipelineEvent};
use tracing::info;

/// Long-lived pipeline components, built once at startup.
pub struct Pipeline {
    lookup: LookupClient,
    capture: CaptureDriver,
    profiles: ProfileStore,
    catalog: ItemCatalog,
}

impl Pipeline {
    pub fn new(lookup: LookupClient, capture: CaptureDriver, profiles: ProfileStore, catalog: ItemCatalog) -> Self {
        Self {
            lookup,
            capture,
            profiles,
            catalog,
        }
    }

    /// Wire up the real HTTP client, Chromium driver and file-backed stores.
    pub async fn from_config(config: &KupoConfig) -> Result<Self> {
        let lookup = LookupClient::from_config(&config.lookup)?;
        let capture = CaptureDriver::chromium(config.capture.clone());
        let profiles = ProfileStore::open(&config.storage.profiles_file).await?;
        let catalog = ItemCatalog::load(&config.storage.items_file).await?;
        info!(
            profiles = profiles.len().await,
            items = catalog.len(),
            "Pipeline ready"
        );
        Ok(Self::new(lookup, capture, profiles, catalog))
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// Search the directory for `name` on `world` and pick the exact match.
    pub async fn resolve_character(
        &self,
        request_id: &str,
        world: &str,
        name: &CharacterName,
    ) -> Result<Resolution> {
        let query = name.full_name();
        let candidates = self.lookup.search(&query, world).await?;
        let resolution = resolve(&candidates, &query);
        EventLogger::log_event(
            request_id,
            PipelineEvent::Lookup {
                query,
                world: world.to_string(),
                candidates: candidates.len(),
                resolved: resolution.found().map(|id| id.to_string()),
            },
        );
        Ok(resolution)
    }

    pub async fn capture_character(
        &self,
        request_id: &str,
        id: &ResolvedIdentifier,
        name: &CharacterName,
    ) -> Result<CaptureArtifact> {
        let request = self.capture.character_request(id, name, request_id);
        self.run_capture(request_id, &request).await
    }

    /// Lookup then capture. `None` when the character does not resolve.
    pub async fn character_snapshot(
        &self,
        request_id: &str,
        world: &str,
        name: &CharacterName,
    ) -> Result<Option<CaptureArtifact>> {
        match self.resolve_character(request_id, world, name).await? {
            Resolution::Found(id) => Ok(Some(self.capture_character(request_id, &id, name).await?)),
            Resolution::NotFound => Ok(None),
        }
    }

    /// Store `record` for `user_id`, but only once the character resolves.
    pub async fn register_profile(
        &self,
        request_id: &str,
        user_id: &str,
        record: ProfileRecord,
    ) -> Result<Resolution> {
        let resolution = self.resolve_character(request_id, &record.server, &record.name()).await?;
        if resolution.is_found() {
            let server = record.server.clone();
            self.profiles.put(user_id, record).await?;
            EventLogger::log_event(
                request_id,
                PipelineEvent::ProfileStored {
                    user_id: user_id.to_string(),
                    server,
                },
            );
        }
        Ok(resolution)
    }

    /// Market capture for an exact localized item name. `None` when the
    /// catalog has no such item.
    pub async fn item_snapshot(&self, request_id: &str, name: &str) -> Result<Option<(ItemId, CaptureArtifact)>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PipelineError::InvalidInput("item name is required".into()));
        }
        let Some((id, _)) = self.catalog.find_by_local_name(name) else {
            return Ok(None);
        };
        let id = id.clone();
        let request = self.capture.market_request(id.as_str(), request_id);
        let artifact = self.run_capture(request_id, &request).await?;
        Ok(Some((id, artifact)))
    }

    pub fn item_icon_url(&self, id: &ItemId) -> String {
        self.capture.item_icon_url(id.as_str())
    }

    async fn run_capture(&self, request_id: &str, request: &CaptureRequest) -> Result<CaptureArtifact> {
        let started = Instant::now();
        let artifact = self.capture.capture(request).await?;
        EventLogger::log_event(
            request_id,
            PipelineEvent::Capture {
                url: request.target_url.clone(),
                path: artifact.path.display().to_string(),
                elapsed_ms: started.elapsed().as_millis() as u64,
            },
        );
        Ok(artifact)
    }
}
