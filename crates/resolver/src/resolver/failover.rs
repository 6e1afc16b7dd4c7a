use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::ResolverError;
use crate::provider::{Capability, MirrorList, ProviderFetch, ProviderRef, fetch_validated};

use super::{Resolution, ResolveOptions};

/// Walks the mirror list in strict preference order, one in-flight request
/// at a time; a later mirror is never tried before an earlier one has
/// definitively failed.
///
/// After the last mirror fails the emergency path runs: the designated
/// fallback is consulted exactly once, and only for non-prefetch calls.
/// Prefetch calls conserve the scarce fallback and settle for
/// [`Resolution::Unavailable`]. Total exhaustion is returned as data, never
/// raised.
pub struct MirrorFailoverResolver {
    fetcher: Arc<dyn ProviderFetch>,
    mirrors: MirrorList,
}

impl MirrorFailoverResolver {
    pub fn new(fetcher: Arc<dyn ProviderFetch>, mirrors: MirrorList) -> Self {
        Self { fetcher, mirrors }
    }

    pub async fn resolve(&self, video_id: &str, options: &ResolveOptions) -> Resolution {
        let capability = if options.wants_hls {
            Capability::LiveManifest
        } else {
            Capability::AudioStreams
        };

        for mirror in self.mirrors.iter() {
            let provider = ProviderRef::Mirror {
                base_url: mirror.to_owned(),
            };
            match fetch_validated(self.fetcher.as_ref(), &provider, video_id, capability).await {
                Ok(record) => return Resolution::Found(record),
                Err(err) => {
                    debug!(video_id, mirror, error = %err, "mirror failed, trying next");
                }
            }
        }

        let exhausted = ResolverError::MirrorsExhausted;

        if options.prefetch {
            return Resolution::Unavailable(exhausted);
        }
        let Some(fallback) = self.mirrors.fallback() else {
            return Resolution::Unavailable(exhausted);
        };

        warn!(video_id, fallback, "all mirrors failed, trying emergency fallback");
        let provider = ProviderRef::Mirror {
            base_url: fallback.to_owned(),
        };
        match fetch_validated(self.fetcher.as_ref(), &provider, video_id, capability).await {
            Ok(record) => Resolution::Found(record),
            Err(err) => {
                debug!(video_id, error = %err, "emergency fallback failed");
                Resolution::Unavailable(exhausted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedFetcher, mirror_payload};

    const VIDEO_ID: &str = "0123456789a";
    const M1: &str = "https://m1.example";
    const M2: &str = "https://m2.example";
    const M3: &str = "https://m3.example";
    const FALLBACK: &str = "https://emergency.example";

    fn mirrors(fallback: Option<&str>) -> MirrorList {
        MirrorList::new(
            vec![M1.into(), M2.into(), M3.into()],
            fallback.map(str::to_owned),
        )
    }

    fn resolver(
        fetcher: ScriptedFetcher,
        fallback: Option<&str>,
    ) -> (Arc<ScriptedFetcher>, MirrorFailoverResolver) {
        let fetcher = Arc::new(fetcher);
        let resolver = MirrorFailoverResolver::new(fetcher.clone(), mirrors(fallback));
        (fetcher, resolver)
    }

    #[tokio::test]
    async fn stops_at_the_first_working_mirror() {
        let (fetcher, resolver) =
            resolver(ScriptedFetcher::new().ok(M2, mirror_payload(None)), Some(FALLBACK));
        let resolution = resolver.resolve(VIDEO_ID, &ResolveOptions::default()).await;

        assert!(resolution.is_found());
        assert_eq!(fetcher.call_ids(), [M1, M2]);
    }

    #[tokio::test]
    async fn exhaustion_escalates_to_the_fallback_once() {
        let (fetcher, resolver) = resolver(ScriptedFetcher::new(), Some(FALLBACK));
        let resolution = resolver.resolve(VIDEO_ID, &ResolveOptions::default()).await;

        // N mirrors plus exactly one fallback attempt; the failure comes
        // back as data, not a panic or Err.
        assert_eq!(fetcher.call_ids(), [M1, M2, M3, FALLBACK]);
        match resolution {
            Resolution::Unavailable(err) => {
                assert!(matches!(err, ResolverError::MirrorsExhausted));
            }
            Resolution::Found(_) => panic!("expected exhaustion"),
        }
    }

    #[tokio::test]
    async fn fallback_success_rescues_the_resolution() {
        let (fetcher, resolver) = resolver(
            ScriptedFetcher::new().ok(FALLBACK, mirror_payload(None)),
            Some(FALLBACK),
        );
        let resolution = resolver.resolve(VIDEO_ID, &ResolveOptions::default()).await;

        assert!(resolution.is_found());
        assert_eq!(fetcher.call_ids().len(), 4);
    }

    #[tokio::test]
    async fn prefetch_never_burns_the_fallback() {
        let (fetcher, resolver) = resolver(ScriptedFetcher::new(), Some(FALLBACK));
        let options = ResolveOptions {
            prefetch: true,
            ..ResolveOptions::default()
        };
        let resolution = resolver.resolve(VIDEO_ID, &options).await;

        assert!(!resolution.is_found());
        assert_eq!(fetcher.call_ids(), [M1, M2, M3]);
    }

    #[tokio::test]
    async fn missing_fallback_skips_the_emergency_path() {
        let (fetcher, resolver) = resolver(ScriptedFetcher::new(), None);
        let resolution = resolver.resolve(VIDEO_ID, &ResolveOptions::default()).await;

        assert!(!resolution.is_found());
        assert_eq!(fetcher.call_ids(), [M1, M2, M3]);
    }

    #[tokio::test]
    async fn hls_flag_switches_the_validator() {
        // M1 has audio but no manifest; M2 has a manifest. With wants_hls
        // the first mirror must be rejected.
        let (fetcher, resolver) = resolver(
            ScriptedFetcher::new()
                .ok(M1, mirror_payload(None))
                .ok(M2, mirror_payload(Some("https://m2/x.m3u8"))),
            None,
        );
        let options = ResolveOptions {
            wants_hls: true,
            ..ResolveOptions::default()
        };
        let resolution = resolver.resolve(VIDEO_ID, &options).await;

        let record = resolution.record().expect("manifest-bearing mirror wins");
        assert_eq!(record.hls.as_deref(), Some("https://m2/x.m3u8"));
        assert_eq!(fetcher.call_ids(), [M1, M2]);
    }

    #[tokio::test]
    async fn the_ordered_pool_is_not_mutated_by_use() {
        let (fetcher, resolver) = resolver(ScriptedFetcher::new(), None);
        let options = ResolveOptions {
            prefetch: true,
            ..ResolveOptions::default()
        };

        resolver.resolve(VIDEO_ID, &options).await;
        resolver.resolve(VIDEO_ID, &options).await;

        // Same first-attempt request both times.
        assert_eq!(fetcher.call_ids(), [M1, M2, M3, M1, M2, M3]);
    }
}
