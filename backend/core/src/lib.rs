pub mod error;
pub mod types;

pub use error::{PipelineError, Result};
pub use types::{
    CandidateEntry, CaptureArtifact, CharacterName, ClipRegion, CookieSpec, ProfileRecord,
    Resolution, ResolvedIdentifier, ViewportSize,
};
