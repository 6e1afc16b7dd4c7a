//! Best-effort resolution of playable audio-stream metadata for a video
//! identifier, across a set of unreliable, rate-limited and mutually
//! inconsistent upstream providers.
//!
//! Three strategies cover the provider families:
//!
//! - [`resolver::KeyRotationResolver`] rotates single-use API credentials
//!   against a fixed platform host, one key per attempt;
//! - [`resolver::MirrorFailoverResolver`] walks a preference-ordered mirror
//!   list and escalates to a designated emergency fallback;
//! - [`resolver::HlsAggregationResolver`] queries every mirror concurrently
//!   and merges the live manifests of whichever ones answer.
//!
//! [`StreamResolver`] dispatches between them. Transient provider failures
//! are recovered as low as possible; only total exhaustion reaches the
//! caller, and on the mirror paths it comes back as data
//! ([`Resolution::Unavailable`]) rather than a raised fault.

pub mod config;
pub mod error;
pub mod media;
pub mod provider;
pub mod resolver;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{DEFAULT_GEO, ResolverConfig};
pub use error::{MIN_VIDEO_ID_LEN, ResolverError};
pub use media::{AudioStream, StreamRecord};
pub use provider::{ApiKey, Capability, HttpFetcher, KeyPool, MirrorList, ProviderFetch, ProviderRef};
pub use resolver::{
    AggregatedResolution, Resolution, ResolveMode, ResolveOptions, StreamResolver,
};
