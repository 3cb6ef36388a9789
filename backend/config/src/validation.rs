//! Config validation: deep schema checks with user-friendly error messages.

use crate::schema::{KupoConfig, LookupConfig};
use kupo_core::{ClipRegion, CookieSpec, ViewportSize};
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// All errors and warnings found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

pub fn validate(config: &KupoConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_lookup(&config.lookup, &mut report);
    validate_capture(config, &mut report);
    validate_catalog(config, &mut report);
    report
}

fn validate_lookup(lookup: &LookupConfig, report: &mut ValidationReport) {
    check_http_url("lookup.searchUrl", &lookup.search_url, report);
    if lookup.request_timeout_secs == 0 {
        report.error("lookup.requestTimeoutSecs", "Must be greater than zero");
    }
    if let Some(worlds) = &lookup.world_allow_list {
        if worlds.is_empty() {
            report.warn("lookup.worldAllowList", "Allow-list is empty; every lookup will return no results");
        }
        if worlds.iter().any(|w| w.trim().is_empty()) {
            report.error("lookup.worldAllowList", "World names cannot be blank");
        }
    }
}

fn validate_capture(config: &KupoConfig, report: &mut ValidationReport) {
    let capture = &config.capture;
    if capture.navigation_timeout_secs == 0 {
        report.error("capture.navigationTimeoutSecs", "Must be greater than zero");
    }
    if capture.viewport.width == 0 || capture.viewport.height == 0 {
        report.error("capture.viewport", "Viewport dimensions must be non-zero");
    }
    check_clip("capture.clip", &capture.clip, &capture.viewport, report);
    if let Some(clip) = &capture.market.clip {
        check_clip("capture.market.clip", clip, &capture.viewport, report);
    }

    check_http_url("capture.character.pageBase", &capture.character.page_base, report);
    check_http_url("capture.market.pageBase", &capture.market.page_base, report);
    if capture.character.keep_selector.trim().is_empty() {
        report.error("capture.character.keepSelector", "Selector cannot be empty");
    }
    if capture.market.keep_selector.trim().is_empty() {
        report.error("capture.market.keepSelector", "Selector cannot be empty");
    }
    check_cookies("capture.character.cookies", &capture.character.cookies, report);
    check_cookies("capture.market.cookies", &capture.market.cookies, report);
}

fn validate_catalog(config: &KupoConfig, report: &mut ValidationReport) {
    check_http_url("catalog.siteBase", &config.catalog.site_base, report);
    if config.catalog.workers > 64 {
        report.warn("catalog.workers", "More than 64 concurrent fetches is likely to get rate limited");
    }
}

fn check_http_url(path: &str, raw: &str, report: &mut ValidationReport) {
    match url::Url::parse(raw) {
        Ok(u) if matches!(u.scheme(), "http" | "https") => {}
        Ok(u) => report.error(path, format!("Unsupported URL scheme '{}'", u.scheme())),
        Err(e) => report.error(path, format!("Invalid URL '{raw}': {e}")),
    }
}

fn check_clip(path: &str, clip: &ClipRegion, viewport: &ViewportSize, report: &mut ValidationReport) {
    if clip.width <= 0.0 || clip.height <= 0.0 {
        report.error(path, "Clip width and height must be positive");
        return;
    }
    if clip.x < 0.0 || clip.y < 0.0 {
        report.error(path, "Clip origin cannot be negative");
    }
    if clip.x + clip.width > viewport.width as f64 || clip.y + clip.height > viewport.height as f64 {
        report.warn(path, "Clip extends past the viewport; the image will contain blank space");
    }
}

fn check_cookies(path: &str, cookies: &[CookieSpec], report: &mut ValidationReport) {
    for (i, cookie) in cookies.iter().enumerate() {
        if cookie.name.trim().is_empty() {
            report.error(format!("{path}[{i}].name"), "Cookie name cannot be empty");
        }
        if cookie.domain.trim().is_empty() {
            report.error(format!("{path}[{i}].domain"), "Cookie domain cannot be empty");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let report = validate(&KupoConfig::default());
        assert!(report.is_valid(), "{:?}", report.errors);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn rejects_zero_timeouts_and_bad_urls() {
        let mut cfg = KupoConfig::default();
        cfg.capture.navigation_timeout_secs = 0;
        cfg.lookup.search_url = "ftp://example.org/search".into();
        cfg.capture.character.page_base = "not a url".into();
        let report = validate(&cfg);
        let paths: Vec<_> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert!(paths.contains(&"capture.navigationTimeoutSecs"));
        assert!(paths.contains(&"lookup.searchUrl"));
        assert!(paths.contains(&"capture.character.pageBase"));
    }

    #[test]
    fn warns_when_clip_overflows_viewport() {
        let mut cfg = KupoConfig::default();
        cfg.capture.clip.height = 4000.0;
        let report = validate(&cfg);
        assert!(report.is_valid());
        assert_eq!(report.warnings[0].path, "capture.clip");
    }

    #[test]
    fn empty_allow_list_is_a_warning() {
        let mut cfg = KupoConfig::default();
        cfg.lookup.world_allow_list = Some(Default::default());
        let report = validate(&cfg);
        assert!(report.is_valid());
        assert_eq!(report.warnings[0].path, "lookup.worldAllowList");
    }

    #[test]
    fn cookie_without_domain_is_an_error() {
        let mut cfg = KupoConfig::default();
        cfg.capture.character.cookies.push(CookieSpec::new("lang", "ja", ""));
        let report = validate(&cfg);
        assert_eq!(report.errors[0].path, "capture.character.cookies[0].domain");
    }
}
