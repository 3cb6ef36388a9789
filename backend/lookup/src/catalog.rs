//! Item catalog builder.
//!
//! Walks the market site's item index, fetches each item page once plainly
//! (English title) and once with locale cookies (localized title), and merges
//! the results into the on-disk catalog. The file is flushed after every
//! item so an interrupted run resumes where it stopped.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use kupo_config::{CatalogConfig, LookupConfig};
use kupo_core::Result;
use kupo_store::{ItemCatalog, ItemId, ItemRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::COOKIE;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{info, warn};

use crate::lookup_failed;

static LIST_ITEMS: Lazy<Selector> = Lazy::new(|| Selector::parse("li").expect("static selector"));
static LINKS: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("static selector"));
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("static selector"));
static MARKET_HREF: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/market/(.+)$").expect("static regex"));

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub added: usize,
    pub skipped: usize,
    pub failed: usize,
}

pub struct CatalogBuilder {
    http: Client,
    site_base: String,
    locale_cookie_header: String,
    title_suffix: String,
    workers: usize,
}

impl CatalogBuilder {
    pub fn from_config(catalog: &CatalogConfig, lookup: &LookupConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(lookup.user_agent.clone())
            .timeout(Duration::from_secs(lookup.request_timeout_secs))
            .build()
            .map_err(|e| lookup_failed("failed to build HTTP client", e))?;
        Ok(Self {
            http,
            site_base: catalog.site_base.trim_end_matches('/').to_string(),
            locale_cookie_header: catalog
                .locale_cookies
                .iter()
                .map(|c| format!("{}={}", c.name, c.value))
                .collect::<Vec<_>>()
                .join("; "),
            title_suffix: catalog.title_suffix.clone(),
            workers: catalog.workers.max(1),
        })
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// All `(id, absolute link)` pairs on the item index page.
    pub async fn list_items(&self) -> Result<BTreeMap<ItemId, String>> {
        let html = self.fetch(&format!("{}/items", self.site_base), false).await?;
        Ok(parse_item_index(&html, &self.site_base))
    }

    /// Fetch the English and localized names for one item page.
    pub async fn fetch_record(&self, link: &str) -> Result<ItemRecord> {
        let en = self.fetch(link, false).await?;
        let jp = self.fetch(link, true).await?;
        Ok(ItemRecord {
            link: link.to_string(),
            item_en: extract_title(&en, &self.title_suffix),
            item_jp: extract_title(&jp, &self.title_suffix),
        })
    }

    /// Fill `catalog` with every indexed item it does not already contain.
    pub async fn build(&self, mut catalog: ItemCatalog, path: &Path) -> Result<(ItemCatalog, BuildSummary)> {
        let index = self.list_items().await?;
        let mut summary = BuildSummary::default();

        let pending: Vec<(ItemId, String)> = index
            .into_iter()
            .filter(|(id, _)| {
                let known = catalog.contains(id);
                if known {
                    summary.skipped += 1;
                }
                !known
            })
            .collect();
        info!(pending = pending.len(), skipped = summary.skipped, workers = self.workers, "Building item catalog");

        let mut results = stream::iter(pending)
            .map(|(id, link)| async move {
                let record = self.fetch_record(&link).await;
                (id, record)
            })
            .buffer_unordered(self.workers);

        while let Some((id, record)) = results.next().await {
            match record {
                Ok(record) => {
                    info!(item = %id, en = %record.item_en, jp = %record.item_jp, "Processed item");
                    catalog.insert(id, record);
                    catalog.save(path).await?;
                    summary.added += 1;
                }
                Err(e) => {
                    warn!(item = %id, error = %e, "Failed to process item");
                    summary.failed += 1;
                }
            }
        }

        catalog.save(path).await?;
        Ok((catalog, summary))
    }

    async fn fetch(&self, url: &str, localized: bool) -> Result<String> {
        let mut request = self.http.get(url);
        if localized && !self.locale_cookie_header.is_empty() {
            request = request.header(COOKIE, &self.locale_cookie_header);
        }
        request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| lookup_failed(url, e))?
            .text()
            .await
            .map_err(|e| lookup_failed(url, e))
    }
}

/// `li > a[href="/market/{id}"]` entries of the item index page.
pub fn parse_item_index(html: &str, site_base: &str) -> BTreeMap<ItemId, String> {
    let document = Html::parse_document(html);
    let mut links = BTreeMap::new();
    for li in document.select(&LIST_ITEMS) {
        let Some(href) = li.select(&LINKS).next().and_then(|a| a.value().attr("href")) else {
            continue;
        };
        if let Some(caps) = MARKET_HREF.captures(href) {
            links.insert(ItemId::new(&caps[1]), format!("{site_base}{href}"));
        }
    }
    links
}

/// Page title with the site suffix removed.
pub fn extract_title(html: &str, suffix: &str) -> String {
    let document = Html::parse_document(html);
    let Some(title) = document.select(&TITLE).next() else {
        return String::new();
    };
    let text: String = title.text().collect();
    let name = if suffix.is_empty() {
        text.as_str()
    } else {
        text.split(suffix).next().unwrap_or_default()
    };
    name.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::extract::Path as UrlPath;
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::{Html as HtmlBody, IntoResponse};
    use axum::routing::get;
    use axum::Router;

    const INDEX: &str = r#"<html><body><ul>
        <li><a href="/market/2">Fire Shard</a></li>
        <li><a href="/market/3">Ice Shard</a></li>
        <li><a href="/market/404">Broken</a></li>
        <li><a href="/about">About</a></li>
        <li>no link</li>
    </ul></body></html>"#;

    #[test]
    fn index_parsing_keeps_only_market_links() {
        let links = parse_item_index(INDEX, "https://universalis.app");
        let ids: Vec<_> = links.keys().map(ItemId::as_str).collect();
        assert_eq!(ids, vec!["2", "3", "404"]);
        assert_eq!(links[&ItemId::new("3")], "https://universalis.app/market/3");
    }

    #[test]
    fn title_suffix_is_stripped() {
        let html = "<html><head><title> Ice Shard - Universalis</title></head></html>";
        assert_eq!(extract_title(html, " - Universalis"), "Ice Shard");
        assert_eq!(extract_title("<html></html>", " - Universalis"), "");
    }

    async fn market_site() -> String {
        async fn item(UrlPath(id): UrlPath<String>, headers: HeaderMap) -> axum::response::Response {
            let localized = headers
                .get("cookie")
                .and_then(|v| v.to_str().ok())
                .is_some_and(|c| c.contains("mogboard_language=ja"));
            let name = match (id.as_str(), localized) {
                ("2", false) => "Fire Shard",
                ("2", true) => "ファイアシャード",
                ("3", false) => "Ice Shard",
                ("3", true) => "アイスシャード",
                _ => return StatusCode::NOT_FOUND.into_response(),
            };
            HtmlBody(format!("<html><head><title>{name} - Universalis</title></head></html>")).into_response()
        }

        let app = Router::new()
            .route("/items", get(|| async { HtmlBody(INDEX) }))
            .route("/market/:id", get(item));
        serve(app).await
    }

    #[tokio::test]
    async fn build_adds_new_items_and_skips_known_ones() {
        let base = market_site().await;
        let mut catalog_cfg = CatalogConfig::default();
        catalog_cfg.site_base = base.clone();
        let builder = CatalogBuilder::from_config(&catalog_cfg, &LookupConfig::default())
            .unwrap()
            .with_workers(2);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tradable_items.json");
        let mut existing = ItemCatalog::default();
        existing.insert(
            ItemId::new("2"),
            ItemRecord {
                link: format!("{base}/market/2"),
                item_en: "Fire Shard".into(),
                item_jp: "ファイアシャード".into(),
            },
        );

        let (catalog, summary) = builder.build(existing, &path).await.unwrap();

        assert_eq!(summary, BuildSummary { added: 1, skipped: 1, failed: 1 });
        let (id, record) = catalog.find_by_local_name("アイスシャード").unwrap();
        assert_eq!(id.as_str(), "3");
        assert_eq!(record.item_en, "Ice Shard");
        assert_eq!(ItemCatalog::load(&path).await.unwrap(), catalog);
    }
}
