//! Capture Driver: launch → cookies → navigate → prune → clip → teardown.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use kupo_config::CaptureConfig;
use kupo_core::{
    CaptureArtifact, CharacterName, ClipRegion, CookieSpec, PipelineError, ResolvedIdentifier, Result,
};
use tokio::time::timeout;
use tracing::{info, warn};

use crate::chromium::ChromiumLauncher;
use crate::prune::PruneError;
use crate::session::{BrowserLauncher, BrowserSession};

/// Everything needed for one capture.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureRequest {
    pub target_url: String,
    pub keep_selector: String,
    pub clip: ClipRegion,
    pub cookies: Vec<CookieSpec>,
    pub output: PathBuf,
}

pub struct CaptureDriver {
    launcher: Arc<dyn BrowserLauncher>,
    config: CaptureConfig,
}

impl CaptureDriver {
    pub fn new(launcher: Arc<dyn BrowserLauncher>, config: CaptureConfig) -> Self {
        Self { launcher, config }
    }

    /// Driver backed by a real headless Chromium.
    pub fn chromium(config: CaptureConfig) -> Self {
        let launcher = ChromiumLauncher::new(config.chrome_executable.clone());
        Self::new(Arc::new(launcher), config)
    }

    /// Character profile page for a resolved id.
    ///
    /// `tag` makes the output path unique per request so concurrent captures
    /// of the same character never share a file.
    pub fn character_request(&self, id: &ResolvedIdentifier, name: &CharacterName, tag: &str) -> CaptureRequest {
        let page = &self.config.character;
        CaptureRequest {
            target_url: format!("{}/{}/{}", page.page_base.trim_end_matches('/'), id, name.slug()),
            keep_selector: page.keep_selector.clone(),
            clip: self.config.clip,
            cookies: page.cookies.clone(),
            output: self.artifact_path("character", id.as_str(), tag),
        }
    }

    /// Market board page for a catalog item id.
    pub fn market_request(&self, item_id: &str, tag: &str) -> CaptureRequest {
        let page = &self.config.market;
        CaptureRequest {
            target_url: format!("{}/{}", page.page_base.trim_end_matches('/'), item_id),
            keep_selector: page.keep_selector.clone(),
            clip: page.clip.unwrap_or(self.config.clip),
            cookies: page.cookies.clone(),
            output: self.artifact_path("item", item_id, tag),
        }
    }

    /// Icon image URL shown next to a market capture.
    pub fn item_icon_url(&self, item_id: &str) -> String {
        format!("{}/{}.png", self.config.market.icon_base.trim_end_matches('/'), item_id)
    }

    fn artifact_path(&self, kind: &str, id: &str, tag: &str) -> PathBuf {
        let clean = |s: &str| -> String {
            s.chars()
                .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
                .collect()
        };
        self.config
            .artifact_dir
            .join(format!("{kind}-{}-{}.png", clean(id), clean(tag)))
    }

    /// Run one capture in a fresh browser session.
    ///
    /// The session is closed exactly once whether or not the capture
    /// succeeds. Every failure is reported as `CaptureFailed`.
    pub async fn capture(&self, request: &CaptureRequest) -> Result<CaptureArtifact> {
        let started = Instant::now();
        let mut session = self
            .launcher
            .launch(self.config.viewport)
            .await
            .map_err(|e| capture_failed("browser launch", e))?;

        let outcome = self.run(session.as_mut(), request).await;

        if let Err(e) = session.close().await {
            warn!(error = %e, url = %request.target_url, "Browser teardown reported an error");
        }

        match &outcome {
            Ok(artifact) => info!(
                url = %request.target_url,
                path = %artifact.path.display(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Capture complete"
            ),
            Err(e) => warn!(url = %request.target_url, error = %e, "Capture failed"),
        }
        outcome
    }

    async fn run(&self, session: &mut dyn BrowserSession, request: &CaptureRequest) -> Result<CaptureArtifact> {
        let nav_timeout = Duration::from_secs(self.config.navigation_timeout_secs);

        if !request.cookies.is_empty() {
            session
                .set_cookies(&request.cookies)
                .await
                .map_err(|e| capture_failed("cookie setup", e))?;
        }

        timeout(nav_timeout, session.navigate(&request.target_url))
            .await
            .map_err(|_| timed_out("navigation", nav_timeout))?
            .map_err(|e| capture_failed("navigation", e))?;

        let found = timeout(nav_timeout, session.prune_to(&request.keep_selector))
            .await
            .map_err(|_| timed_out("pruning", nav_timeout))?
            .map_err(|e| capture_failed("pruning", e))?;
        if !found {
            return Err(PipelineError::CaptureFailed(
                PruneError::NoMatch(request.keep_selector.clone()).to_string(),
            ));
        }

        let png = session
            .screenshot(request.clip)
            .await
            .map_err(|e| capture_failed("screenshot", e))?;
        write_artifact(&request.output, &png).await?;

        Ok(CaptureArtifact {
            path: request.output.clone(),
            width: request.clip.width.round() as u32,
            height: request.clip.height.round() as u32,
        })
    }
}

async fn write_artifact(path: &Path, png: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| capture_failed("creating artifact directory", e))?;
    }
    tokio::fs::write(path, png)
        .await
        .map_err(|e| capture_failed("writing screenshot", e))
}

fn capture_failed(stage: &str, err: impl std::fmt::Display) -> PipelineError {
    PipelineError::CaptureFailed(format!("{stage}: {err}"))
}

fn timed_out(stage: &str, after: Duration) -> PipelineError {
    PipelineError::CaptureFailed(format!("{stage} timed out after {}s", after.as_secs()))
}
