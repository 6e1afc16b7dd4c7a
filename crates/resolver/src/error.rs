use thiserror::Error;

use crate::provider::Capability;

/// Minimum length of a valid external video identifier. Shorter identifiers
/// are rejected before any network call is made.
pub const MIN_VIDEO_ID_LEN: usize = 11;

#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("invalid video id `{0}`: shorter than {MIN_VIDEO_ID_LEN} characters")]
    InvalidVideoId(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("upstream error: {0}")]
    Upstream(String),
    #[error("response lacks {0}")]
    MissingCapability(Capability),
    #[error("all api keys exhausted")]
    KeysExhausted,
    #[error("all mirrors failed")]
    MirrorsExhausted,
    #[error("no hls sources are available")]
    NoHlsSources,
}

impl ResolverError {
    /// Short machine-readable code for the caller-facing error object.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidVideoId(_) => "invalid_video_id",
            Self::Http(_) => "http",
            Self::Json(_) => "json",
            Self::Upstream(_) => "upstream",
            Self::MissingCapability(_) => "missing_capability",
            Self::KeysExhausted => "keys_exhausted",
            Self::MirrorsExhausted => "mirrors_exhausted",
            Self::NoHlsSources => "no_hls_sources",
        }
    }

    /// True when the failure is terminal for the whole resolution rather
    /// than for one provider attempt.
    pub fn is_exhaustion(&self) -> bool {
        matches!(
            self,
            Self::KeysExhausted | Self::MirrorsExhausted | Self::NoHlsSources
        )
    }
}
