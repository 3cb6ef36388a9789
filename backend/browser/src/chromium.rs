//! Chromium implementation of the browser session over the DevTools protocol.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{CookieParam, SetCookiesParams};
use chromiumoxide::cdp::browser_protocol::page::{CaptureScreenshotFormat, Viewport as ClipViewport};
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures::StreamExt;
use kupo_core::{ClipRegion, CookieSpec, ViewportSize};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::prune::prune_script;
use crate::session::{BrowserLauncher, BrowserSession};

/// Launches a new headless Chromium process per session.
#[derive(Debug, Clone, Default)]
pub struct ChromiumLauncher {
    executable: Option<PathBuf>,
}

impl ChromiumLauncher {
    pub fn new(executable: Option<PathBuf>) -> Self {
        Self { executable }
    }
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    async fn launch(&self, viewport: ViewportSize) -> Result<Box<dyn BrowserSession>> {
        let mut builder = BrowserConfig::builder()
            .window_size(viewport.width, viewport.height)
            .viewport(Viewport {
                width: viewport.width,
                height: viewport.height,
                ..Default::default()
            });
        if let Some(path) = &self.executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(|e| anyhow!("invalid browser config: {e}"))?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .context("failed to launch Chromium")?;
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "CDP handler stopped");
                    break;
                }
            }
        });
        info!(width = viewport.width, height = viewport.height, "Launched headless Chromium");

        match browser.new_page("about:blank").await {
            Ok(page) => Ok(Box::new(ChromiumSession {
                browser,
                page,
                handler_task,
            })),
            Err(e) => {
                shutdown(&mut browser, handler_task).await;
                Err(e).context("failed to open a page")
            }
        }
    }
}

pub struct ChromiumSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn set_cookies(&mut self, cookies: &[CookieSpec]) -> Result<()> {
        let params = cookies
            .iter()
            .map(|c| {
                CookieParam::builder()
                    .name(c.name.clone())
                    .value(c.value.clone())
                    .domain(c.domain.clone())
                    .path(c.path.clone())
                    .build()
                    .map_err(|e| anyhow!("invalid cookie `{}`: {e}", c.name))
            })
            .collect::<Result<Vec<_>>>()?;
        // Sent as a raw command: the page is still on about:blank, which the
        // higher-level cookie helper refuses as a cookie URL.
        self.page
            .execute(SetCookiesParams::new(params))
            .await
            .context("failed to set cookies")?;
        Ok(())
    }

    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.page.goto(url).await.with_context(|| format!("failed to load {url}"))?;
        Ok(())
    }

    async fn prune_to(&mut self, keep_selector: &str) -> Result<bool> {
        let mut params = EvaluateParams::new(prune_script(keep_selector));
        params.return_by_value = Some(true);
        let result = self
            .page
            .evaluate_expression(params)
            .await
            .context("failed to prune the page")?;
        result.into_value::<bool>().context("prune script returned a non-boolean")
    }

    async fn screenshot(&mut self, clip: ClipRegion) -> Result<Vec<u8>> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .clip(ClipViewport {
                x: clip.x,
                y: clip.y,
                width: clip.width,
                height: clip.height,
                scale: 1.0,
            })
            .build();
        self.page.screenshot(params).await.context("failed to capture screenshot")
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let ChromiumSession {
            mut browser,
            page,
            handler_task,
        } = *self;
        if let Err(e) = page.close().await {
            debug!(error = %e, "Page close failed; closing browser anyway");
        }
        shutdown(&mut browser, handler_task).await;
        Ok(())
    }
}

async fn shutdown(browser: &mut Browser, handler_task: JoinHandle<()>) {
    if let Err(e) = browser.close().await {
        warn!(error = %e, "Browser close command failed; killing process");
        if let Some(Err(e)) = browser.kill().await {
            warn!(error = %e, "Failed to kill browser process");
        }
    }
    if let Err(e) = browser.wait().await {
        warn!(error = %e, "Failed to reap browser process");
    }
    handler_task.abort();
    debug!("Browser session closed");
}
