//! Character directory search client.

use std::collections::BTreeSet;
use std::time::Duration;

use kupo_config::LookupConfig;
use kupo_core::{CandidateEntry, PipelineError, Resolution, Result};
use reqwest::Client;
use tracing::{debug, info};

use crate::parse::parse_search_results;
use crate::{lookup_failed, resolver};

pub struct LookupClient {
    http: Client,
    search_url: String,
    world_allow_list: Option<BTreeSet<String>>,
}

impl LookupClient {
    pub fn new(http: Client, search_url: impl Into<String>, world_allow_list: Option<BTreeSet<String>>) -> Self {
        Self {
            http,
            search_url: search_url.into(),
            world_allow_list,
        }
    }

    pub fn from_config(config: &LookupConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| lookup_failed("failed to build HTTP client", e))?;
        Ok(Self::new(http, config.search_url.clone(), config.world_allow_list.clone()))
    }

    /// Whether `world` passes the configured allow-list (always true without one).
    pub fn is_known_world(&self, world: &str) -> bool {
        self.world_allow_list
            .as_ref()
            .map_or(true, |worlds| worlds.contains(world))
    }

    /// Search the directory for `query` on `world`.
    ///
    /// An unrecognized world yields an empty list without touching the network.
    pub async fn search(&self, query: &str, world: &str) -> Result<Vec<CandidateEntry>> {
        let query = query.trim();
        let world = world.trim();
        if query.is_empty() {
            return Err(PipelineError::InvalidInput("search query is empty".into()));
        }
        if world.is_empty() {
            return Err(PipelineError::InvalidInput("world is empty".into()));
        }
        if !self.is_known_world(world) {
            debug!(world, "World not in allow-list; skipping search");
            return Ok(Vec::new());
        }

        let body = self
            .http
            .get(&self.search_url)
            .query(&[("q", query), ("worldname", world)])
            .send()
            .await
            .map_err(|e| lookup_failed("search request failed", e))?
            .error_for_status()
            .map_err(|e| lookup_failed("search returned an error status", e))?
            .text()
            .await
            .map_err(|e| lookup_failed("failed to read search response", e))?;

        let candidates = parse_search_results(&body);
        info!(query, world, candidates = candidates.len(), "Directory search complete");
        Ok(candidates)
    }

    /// Search and resolve to the first exact name match.
    pub async fn lookup(&self, query: &str, world: &str) -> Result<Resolution> {
        let candidates = self.search(query, world).await?;
        Ok(resolver::resolve(&candidates, query.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::response::Html;
    use axum::routing::get;
    use axum::Router;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const PAGE: &str = r#"<html><body>
        <div class="entry"><a href="/lodestone/character/100/"><p class="entry__name">Alice Smith</p></a></div>
        <div class="entry"><a href="/lodestone/character/200/"><p class="entry__name">Alice Smithson</p></a></div>
    </body></html>"#;

    fn worlds(names: &[&str]) -> Option<BTreeSet<String>> {
        Some(names.iter().map(|s| s.to_string()).collect())
    }

    async fn directory(hits: Arc<AtomicUsize>) -> String {
        let app = Router::new().route(
            "/lodestone/character/",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let hits = Arc::clone(&hits);
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    if params.get("q").map(String::as_str) == Some("Alice Smith")
                        && params.get("worldname").map(String::as_str) == Some("Gaia")
                    {
                        Html(PAGE.to_string())
                    } else {
                        Html("<html><body></body></html>".to_string())
                    }
                }
            }),
        );
        format!("{}/lodestone/character/", serve(app).await)
    }

    #[tokio::test]
    async fn resolves_exact_match_through_http() {
        let hits = Arc::new(AtomicUsize::new(0));
        let url = directory(Arc::clone(&hits)).await;
        let client = LookupClient::new(Client::new(), url, worlds(&["Gaia"]));

        let resolution = client.lookup("Alice Smith", "Gaia").await.unwrap();

        assert_eq!(resolution.found().unwrap().as_str(), "100");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_world_short_circuits_without_http() {
        let hits = Arc::new(AtomicUsize::new(0));
        let url = directory(Arc::clone(&hits)).await;
        let client = LookupClient::new(Client::new(), url, worlds(&["Gaia"]));

        let candidates = client.search("Bob", "UnknownWorld").await.unwrap();

        assert!(candidates.is_empty());
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(client.lookup("Bob", "UnknownWorld").await.unwrap(), Resolution::NotFound);
    }

    #[tokio::test]
    async fn missing_parameters_are_invalid_input() {
        let client = LookupClient::new(Client::new(), "http://127.0.0.1:9/", None);
        assert!(matches!(client.search("", "Gaia").await, Err(PipelineError::InvalidInput(_))));
        assert!(matches!(client.search("Alice", "  ").await, Err(PipelineError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn error_status_is_lookup_failed() {
        let app = Router::new().route("/search", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
        let url = format!("{}/search", serve(app).await);
        let client = LookupClient::new(Client::new(), url, None);

        let err = client.search("Alice Smith", "Gaia").await.unwrap_err();
        assert!(matches!(err, PipelineError::LookupFailed(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn no_exact_match_is_not_found() {
        let url = directory(Arc::new(AtomicUsize::new(0))).await;
        let client = LookupClient::new(Client::new(), url, None);
        // The fixture only answers for "Alice Smith"; other queries get an empty page.
        assert_eq!(client.lookup("Alice", "Gaia").await.unwrap(), Resolution::NotFound);
    }
}
