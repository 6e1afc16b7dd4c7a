//! In-memory test doubles shared by the resolver tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::ResolverError;
use crate::provider::{ProviderFetch, ProviderRef};

/// Scripted fetcher: answers each provider with a canned payload and records
/// every request it served, in order. Providers without a script fail, which
/// keeps "everything fails" setups short.
pub(crate) struct ScriptedFetcher {
    responses: HashMap<String, Value>,
    calls: Mutex<Vec<ProviderRef>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Scripts a successful payload for a provider, identified by its key
    /// (keyed providers) or base URL (mirrors).
    pub fn ok(mut self, provider_id: &str, payload: Value) -> Self {
        self.responses.insert(provider_id.to_owned(), payload);
        self
    }

    pub fn calls(&self) -> Vec<ProviderRef> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_ids(&self) -> Vec<String> {
        self.calls().iter().map(Self::id_of).collect()
    }

    fn id_of(provider: &ProviderRef) -> String {
        match provider {
            ProviderRef::Keyed { key, .. } => key.as_str().to_owned(),
            ProviderRef::Mirror { base_url } => base_url.clone(),
        }
    }
}

#[async_trait]
impl ProviderFetch for ScriptedFetcher {
    async fn fetch(&self, provider: &ProviderRef, _video_id: &str) -> Result<Value, ResolverError> {
        self.calls.lock().unwrap().push(provider.clone());
        let id = Self::id_of(provider);
        match self.responses.get(&id) {
            Some(payload) => Ok(payload.clone()),
            None => Err(ResolverError::Upstream(format!("scripted failure for {id}"))),
        }
    }
}

/// A minimal raw-platform payload with one audio and one video variant.
pub(crate) fn platform_payload() -> Value {
    json!({
        "title": "Morning Raga",
        "channelTitle": "Classical Hour",
        "channelId": "UC123",
        "lengthSeconds": "212",
        "isLiveContent": false,
        "adaptiveFormats": [
            {
                "url": "https://cdn.example/audio",
                "mimeType": "audio/webm; codecs=\"opus\"",
                "bitrate": 160_000,
                "contentLength": "123"
            },
            {
                "url": "https://cdn.example/video",
                "mimeType": "video/mp4; codecs=\"avc1.4d401f\"",
                "bitrate": 2_000_000,
                "contentLength": "456"
            }
        ]
    })
}

/// A minimal mirror payload in the normalized schema, optionally carrying a
/// live manifest.
pub(crate) fn mirror_payload(hls: Option<&str>) -> Value {
    json!({
        "title": "Morning Raga",
        "uploader": "Classical Hour",
        "uploaderUrl": "/channel/UC123",
        "duration": 212,
        "audioStreams": [
            {
                "url": "https://cdn.example/audio",
                "quality": "160 kbps",
                "mimeType": "audio/webm; codecs=\"opus\"",
                "codec": "opus",
                "bitrate": 160_000,
                "contentLength": "123"
            }
        ],
        "relatedStreams": [],
        "subtitles": [],
        "livestream": hls.is_some(),
        "hls": hls
    })
}
