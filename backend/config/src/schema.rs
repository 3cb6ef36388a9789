//! Kupo configuration schema.
//!
//! Every section deserializes from camelCase YAML and falls back to its
//! `Default` when omitted, so an empty file is a valid config.

use std::collections::BTreeSet;
use std::path::PathBuf;

use kupo_core::{ClipRegion, CookieSpec, ViewportSize};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KupoConfig {
    pub lookup: LookupConfig,
    pub capture: CaptureConfig,
    pub catalog: CatalogConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Character directory search settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LookupConfig {
    /// Search endpoint; receives `q` and `worldname` query parameters.
    pub search_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    /// Recognized world names. `None` disables the gate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub world_allow_list: Option<BTreeSet<String>>,
    /// JSON array of world names, read at startup when no inline list is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub world_allow_list_file: Option<PathBuf>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            search_url: "https://jp.finalfantasyxiv.com/lodestone/character/".to_string(),
            user_agent: format!("kupo/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_secs: 15,
            world_allow_list: None,
            world_allow_list_file: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Capture
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaptureConfig {
    pub viewport: ViewportSize,
    pub clip: ClipRegion,
    pub navigation_timeout_secs: u64,
    /// Where screenshots are written before being handed to the caller.
    pub artifact_dir: PathBuf,
    /// Explicit Chromium binary; auto-detected when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chrome_executable: Option<PathBuf>,
    pub character: CharacterPageConfig,
    pub market: MarketPageConfig,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportSize::default(),
            clip: ClipRegion::default(),
            navigation_timeout_secs: 30,
            artifact_dir: PathBuf::new(),
            chrome_executable: None,
            character: CharacterPageConfig::default(),
            market: MarketPageConfig::default(),
        }
    }
}

/// Character profile page: `{pageBase}/{id}/{slug}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterPageConfig {
    pub page_base: String,
    pub keep_selector: String,
    pub cookies: Vec<CookieSpec>,
}

impl Default for CharacterPageConfig {
    fn default() -> Self {
        Self {
            page_base: "https://jp.tomestone.gg/character".to_string(),
            keep_selector: ".flex.flex-row.flex-1.justify-center".to_string(),
            cookies: Vec::new(),
        }
    }
}

/// Market board page: `{pageBase}/{itemId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketPageConfig {
    pub page_base: String,
    /// Item icons: `{iconBase}/{itemId}.png`.
    pub icon_base: String,
    pub keep_selector: String,
    /// Region/language preferences forced on the market site.
    pub cookies: Vec<CookieSpec>,
    /// Overrides `capture.clip` for market pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip: Option<ClipRegion>,
}

impl Default for MarketPageConfig {
    fn default() -> Self {
        let cookie = |name: &str, value: &str| CookieSpec::new(name, value, "universalis.app");
        Self {
            page_base: "https://universalis.app/market".to_string(),
            icon_base: "https://universalis-ffxiv.github.io/universalis-assets/icon2x".to_string(),
            keep_selector: r#"div[class="tab"]"#.to_string(),
            cookies: vec![
                cookie("mogboard_last_selected_server", "Japan"),
                cookie("mogboard_language", "ja"),
                cookie("includeGst", "no"),
                cookie("mogboard_homeworld", "no"),
                cookie("mogboard_server", "Atomos"),
                cookie("mogboard_timezone", "Asia%2FTokyo"),
            ],
            clip: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Item catalog builder
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogConfig {
    /// Site root; the item index lives at `{siteBase}/items`.
    pub site_base: String,
    pub workers: usize,
    /// Cookies sent when fetching the localized item title.
    pub locale_cookies: Vec<CookieSpec>,
    /// Page title suffix stripped from item names.
    pub title_suffix: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            site_base: "https://universalis.app".to_string(),
            workers: 10,
            locale_cookies: vec![
                CookieSpec::new("mogboard_language", "ja", "universalis.app"),
                CookieSpec::new("mogboard_last_selected_server", "Japan", "universalis.app"),
            ],
            title_suffix: " - Universalis".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Flat JSON files. Relative paths resolve against the config directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageConfig {
    pub profiles_file: PathBuf,
    pub items_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            profiles_file: PathBuf::from("usernames.json"),
            items_file: PathBuf::from("tradable_items.json"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the rolling NDJSON log. Console only when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}
