//! Browser session abstraction.
//!
//! One [`BrowserSession`] is one browser process with one page. The driver
//! owns it exclusively for a single capture and always ends it with
//! [`BrowserSession::close`].

use anyhow::Result;
use async_trait::async_trait;
use kupo_core::{ClipRegion, CookieSpec, ViewportSize};

#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    /// Start a fresh, isolated headless browser with a blank page.
    async fn launch(&self, viewport: ViewportSize) -> Result<Box<dyn BrowserSession>>;
}

#[async_trait]
pub trait BrowserSession: Send {
    async fn set_cookies(&mut self, cookies: &[CookieSpec]) -> Result<()>;

    /// Navigate and wait for the page load.
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Prune the live document down to the first element matching
    /// `keep_selector` (see [`crate::prune`]). `false` when nothing matches.
    async fn prune_to(&mut self, keep_selector: &str) -> Result<bool>;

    /// PNG bytes of `clip`.
    async fn screenshot(&mut self, clip: ClipRegion) -> Result<Vec<u8>>;

    /// Tear down the page and the browser process.
    async fn close(self: Box<Self>) -> Result<()>;
}
