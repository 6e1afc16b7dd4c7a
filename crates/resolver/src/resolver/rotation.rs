use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{MIN_VIDEO_ID_LEN, ResolverError};
use crate::media::StreamRecord;
use crate::provider::{Capability, KeyPool, ProviderFetch, ProviderRef, fetch_validated};

/// Resolves against the fixed platform host with a consumable, pre-shuffled
/// credential pool: one key per attempt, rotated on any failure, never
/// reused within a session.
///
/// There is no fallback on this path; exhausting the pool propagates
/// [`ResolverError::KeysExhausted`] to the caller. Worst-case latency is
/// bounded only by the pool size, so callers size the pool accordingly.
pub struct KeyRotationResolver {
    fetcher: Arc<dyn ProviderFetch>,
    host: String,
}

impl KeyRotationResolver {
    pub fn new(fetcher: Arc<dyn ProviderFetch>, host: impl Into<String>) -> Self {
        Self {
            fetcher,
            host: host.into(),
        }
    }

    /// Takes the pool by value: a session owns its credentials outright and
    /// concurrent sessions cannot drain each other's.
    pub async fn resolve(
        &self,
        video_id: &str,
        geo: &str,
        mut pool: KeyPool,
    ) -> Result<StreamRecord, ResolverError> {
        if video_id.len() < MIN_VIDEO_ID_LEN {
            return Err(ResolverError::InvalidVideoId(video_id.to_owned()));
        }

        while let Some(key) = pool.next_key() {
            let provider = ProviderRef::Keyed {
                host: self.host.clone(),
                key,
                geo: geo.to_owned(),
            };
            match fetch_validated(
                self.fetcher.as_ref(),
                &provider,
                video_id,
                Capability::AudioStreams,
            )
            .await
            {
                Ok(record) => {
                    info!(
                        video_id,
                        keys_left = pool.remaining(),
                        "resolved via platform api"
                    );
                    return Ok(record);
                }
                Err(err) => {
                    debug!(video_id, error = %err, "platform attempt failed, rotating key");
                }
            }
        }

        Err(ResolverError::KeysExhausted)
    }
}
