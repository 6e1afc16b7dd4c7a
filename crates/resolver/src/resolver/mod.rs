pub mod aggregate;
pub mod failover;
pub mod rotation;

pub use aggregate::{AggregatedResolution, HlsAggregationResolver};
pub use failover::MirrorFailoverResolver;
pub use rotation::KeyRotationResolver;

use std::sync::Arc;

use serde_json::{Value, json};

use crate::config::ResolverConfig;
use crate::error::ResolverError;
use crate::media::StreamRecord;
use crate::provider::{HttpFetcher, KeyPool, MirrorList, ProviderFetch};

/// How [`StreamResolver::resolve`] picks a strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResolveMode {
    /// Aggregation when HLS is wanted, mirror failover when mirrors are
    /// configured, key rotation otherwise.
    #[default]
    Auto,
    KeyRotation,
    MirrorFailover,
    HlsAggregate,
}

/// Per-call resolution options.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Speculative lookahead: skips the emergency fallback to conserve it.
    pub prefetch: bool,
    /// Require a live-streaming manifest instead of audio variants.
    pub wants_hls: bool,
    /// Two-letter country hint; the configured default applies when absent.
    pub geo: Option<String>,
    pub mode: ResolveMode,
}

/// Outcome of a resolution. Total exhaustion is data, not a raised fault, so
/// the presentation layer can always render something.
#[derive(Debug)]
pub enum Resolution {
    Found(StreamRecord),
    Unavailable(ResolverError),
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn record(&self) -> Option<&StreamRecord> {
        match self {
            Self::Found(record) => Some(record),
            Self::Unavailable(_) => None,
        }
    }

    pub fn into_record(self) -> Result<StreamRecord, ResolverError> {
        match self {
            Self::Found(record) => Ok(record),
            Self::Unavailable(err) => Err(err),
        }
    }

    /// Caller-facing JSON: the record on success, `{error, message}` on
    /// failure.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::Found(record) => serde_json::to_value(record),
            Self::Unavailable(err) => Ok(json!({
                "error": err.code(),
                "message": err.to_string(),
            })),
        }
    }
}

impl From<Result<StreamRecord, ResolverError>> for Resolution {
    fn from(result: Result<StreamRecord, ResolverError>) -> Self {
        match result {
            Ok(record) => Self::Found(record),
            Err(err) => Self::Unavailable(err),
        }
    }
}

/// Facade over the three resolution strategies.
pub struct StreamResolver {
    fetcher: Arc<dyn ProviderFetch>,
    config: ResolverConfig,
}

impl StreamResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self::with_fetcher(config, Arc::new(HttpFetcher::default()))
    }

    /// Injects a custom fetcher: tests, or a client with its own timeout
    /// wrapper (the core imposes none).
    pub fn with_fetcher(config: ResolverConfig, fetcher: Arc<dyn ProviderFetch>) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub async fn resolve(&self, video_id: &str, options: &ResolveOptions) -> Resolution {
        match options.mode {
            ResolveMode::KeyRotation => self.resolve_keyed(video_id, options).await.into(),
            ResolveMode::MirrorFailover => {
                self.mirror_resolver().resolve(video_id, options).await
            }
            ResolveMode::HlsAggregate => self.resolve_live(video_id).await.resolution,
            ResolveMode::Auto => {
                if options.wants_hls {
                    self.resolve_live(video_id).await.resolution
                } else if !self.config.mirrors.is_empty() {
                    self.mirror_resolver().resolve(video_id, options).await
                } else {
                    self.resolve_keyed(video_id, options).await.into()
                }
            }
        }
    }

    /// Key-rotation path. Errors propagate as `Err`; a fresh shuffled pool
    /// is minted for every call so concurrent resolutions cannot steal each
    /// other's credentials.
    pub async fn resolve_keyed(
        &self,
        video_id: &str,
        options: &ResolveOptions,
    ) -> Result<StreamRecord, ResolverError> {
        let pool = KeyPool::new(self.config.api_keys.clone()).shuffled();
        let geo = options.geo.as_deref().unwrap_or(&self.config.default_geo);
        KeyRotationResolver::new(Arc::clone(&self.fetcher), self.config.api_host.clone())
            .resolve(video_id, geo, pool)
            .await
    }

    /// Live-manifest discovery across the HLS mirror set (or the full list
    /// when no subset is configured), exposing the manifest aggregate.
    pub async fn resolve_live(&self, video_id: &str) -> AggregatedResolution {
        let mirrors = self.config.live_mirrors().to_vec();
        HlsAggregationResolver::new(Arc::clone(&self.fetcher), mirrors)
            .resolve(video_id)
            .await
    }

    fn mirror_resolver(&self) -> MirrorFailoverResolver {
        MirrorFailoverResolver::new(
            Arc::clone(&self.fetcher),
            MirrorList::new(self.config.mirrors.clone(), self.config.fallback.clone()),
        )
    }
}
