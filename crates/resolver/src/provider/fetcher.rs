use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::ResolverError;
use crate::media::{RawPlatformResponse, StreamRecord};

use super::capability::Capability;
use super::reference::ProviderRef;

/// Single-attempt fetch seam. Implementations issue exactly one network
/// request per call and never retry internally; retries belong to the
/// resolvers sitting above.
#[async_trait]
pub trait ProviderFetch: Send + Sync {
    async fn fetch(&self, provider: &ProviderRef, video_id: &str) -> Result<Value, ResolverError>;
}

/// reqwest-backed fetcher used in production. The client is injected so the
/// embedding process controls timeouts, TLS and connection pooling.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

#[async_trait]
impl ProviderFetch for HttpFetcher {
    async fn fetch(&self, provider: &ProviderRef, video_id: &str) -> Result<Value, ResolverError> {
        let request = match provider {
            ProviderRef::Keyed { host, key, geo } => self
                .client
                .get(format!("https://{host}/dl"))
                .query(&[("id", video_id), ("cgeo", geo)])
                .header("x-rapidapi-key", key.as_str())
                .header("x-rapidapi-host", host.as_str()),
            ProviderRef::Mirror { base_url } => self.client.get(format!(
                "{}/streams/{video_id}",
                base_url.trim_end_matches('/')
            )),
        };

        let response = request.send().await?;
        let value = response.json::<Value>().await?;
        Ok(value)
    }
}

/// Fetches one provider response, applies the caller's capability predicate,
/// then normalizes the payload into the canonical record.
///
/// A payload that parses but fails the predicate is reported with the
/// upstream `message` when one is present and takes the same failure path as
/// a transport error.
pub async fn fetch_validated<F>(
    fetcher: &F,
    provider: &ProviderRef,
    video_id: &str,
    capability: Capability,
) -> Result<StreamRecord, ResolverError>
where
    F: ProviderFetch + ?Sized,
{
    let raw = fetcher.fetch(provider, video_id).await?;

    if !capability.satisfied_by(&raw) {
        if let Some(message) = raw.get("message").and_then(Value::as_str) {
            return Err(ResolverError::Upstream(message.to_owned()));
        }
        return Err(ResolverError::MissingCapability(capability));
    }

    let record = match provider {
        ProviderRef::Keyed { .. } => {
            serde_json::from_value::<RawPlatformResponse>(raw)?.normalize()
        }
        ProviderRef::Mirror { .. } => serde_json::from_value(raw)?,
    };

    Ok(record)
}
