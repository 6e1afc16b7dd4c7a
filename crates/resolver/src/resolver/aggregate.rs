use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::debug;

use crate::error::ResolverError;
use crate::media::StreamRecord;
use crate::provider::{Capability, ProviderFetch, ProviderRef, fetch_validated};

use super::Resolution;

/// Result of a parallel manifest-discovery call. The manifest aggregate is
/// an explicit return value scoped to this call, so concurrent aggregations
/// cannot corrupt each other. Entries appear in completion order, which is
/// not deterministic across runs.
#[derive(Debug)]
pub struct AggregatedResolution {
    pub resolution: Resolution,
    pub manifests: Vec<String>,
}

/// Queries every configured mirror concurrently, waits for all of them to
/// settle, and merges the manifests of the fulfilled subset.
///
/// Manifest availability is independent per mirror, so serializing the
/// requests would stack otherwise-independent latencies. The returned record
/// is the first fulfilled response; its non-manifest metadata is treated as
/// interchangeable across mirrors.
pub struct HlsAggregationResolver {
    fetcher: Arc<dyn ProviderFetch>,
    mirrors: Vec<String>,
}

impl HlsAggregationResolver {
    pub fn new(fetcher: Arc<dyn ProviderFetch>, mirrors: Vec<String>) -> Self {
        Self { fetcher, mirrors }
    }

    pub async fn resolve(&self, video_id: &str) -> AggregatedResolution {
        let mut fetches: FuturesUnordered<_> = self
            .mirrors
            .iter()
            .map(|mirror| {
                let fetcher = Arc::clone(&self.fetcher);
                let provider = ProviderRef::Mirror {
                    base_url: mirror.clone(),
                };
                async move {
                    let outcome = fetch_validated(
                        fetcher.as_ref(),
                        &provider,
                        video_id,
                        Capability::LiveManifest,
                    )
                    .await;
                    (provider, outcome)
                }
            })
            .collect();

        let mut manifests = Vec::new();
        let mut first_record: Option<StreamRecord> = None;

        // Never fail fast: a late-settling success must still contribute its
        // manifest, and a late failure must not be mistaken for a success.
        while let Some((provider, outcome)) = fetches.next().await {
            match outcome {
                Ok(record) => {
                    if let Some(manifest) = &record.hls {
                        manifests.push(manifest.clone());
                    }
                    first_record.get_or_insert(record);
                }
                Err(err) => {
                    debug!(video_id, ?provider, error = %err, "mirror settled without a manifest");
                }
            }
        }

        let resolution = match first_record {
            Some(record) => Resolution::Found(record),
            None => Resolution::Unavailable(ResolverError::NoHlsSources),
        };

        AggregatedResolution {
            resolution,
            manifests,
        }
    }
}
