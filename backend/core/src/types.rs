use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One parsed search-result entry, before exact-match filtering.
///
/// Lives only for the duration of one lookup call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEntry {
    pub display_name: String,
    pub identifier: String,
}

impl CandidateEntry {
    pub fn new(display_name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            identifier: identifier.into(),
        }
    }
}

/// The single identifier chosen for a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedIdentifier(String);

impl ResolvedIdentifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResolvedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a well-formed lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(ResolvedIdentifier),
    NotFound,
}

impl Resolution {
    pub fn found(&self) -> Option<&ResolvedIdentifier> {
        match self {
            Self::Found(id) => Some(id),
            Self::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// A registered character: `{server, first, last}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub server: String,
    pub first: String,
    pub last: String,
}

impl ProfileRecord {
    pub fn new(server: impl Into<String>, first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            first: first.into(),
            last: last.into(),
        }
    }

    pub fn name(&self) -> CharacterName {
        CharacterName::new(&self.first, &self.last)
    }
}

/// First/last name pair of a character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterName {
    pub first: String,
    pub last: String,
}

impl CharacterName {
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
        }
    }

    /// `"First Last"`, the form the directory search matches against.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first, self.last)
    }

    /// Lowercase hyphen-joined form used in detail-page URLs.
    pub fn slug(&self) -> String {
        format!("{}-{}", self.first, self.last).to_lowercase()
    }
}

/// Pixel region cropped out of the rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for ClipRegion {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1280.0,
            height: 1585.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 1800,
        }
    }
}

/// A cookie seeded into the browser context before navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieSpec {
    pub name: String,
    pub value: String,
    pub domain: String,
    #[serde(default = "default_cookie_path")]
    pub path: String,
}

fn default_cookie_path() -> String {
    "/".to_string()
}

impl CookieSpec {
    pub fn new(name: impl Into<String>, value: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: domain.into(),
            path: default_cookie_path(),
        }
    }
}

/// A screenshot written to local storage for one request.
///
/// Never reused across requests; the consumer calls [`CaptureArtifact::discard`]
/// once the image has been sent.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureArtifact {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl CaptureArtifact {
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }

    pub async fn discard(self) -> std::io::Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}
