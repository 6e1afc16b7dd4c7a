use serde::{Deserialize, Serialize};

/// One playable audio variant of a resolved stream.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AudioStream {
    pub url: String,
    /// Human-readable quality label, e.g. "160 kbps".
    pub quality: String,
    pub mime_type: String,
    /// Codec token from the MIME `codecs="..."` parameter. Absent when the
    /// provider does not declare one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
    #[serde(default)]
    pub bitrate: u64,
    /// Passed through verbatim; mirrors report it as a number, the platform
    /// API as a string.
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub content_length: String,
}

/// Caller-facing canonical record for a resolved video identifier.
///
/// Serializes as the normalized mirror schema, so a mirror payload
/// round-trips through serde directly.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StreamRecord {
    pub title: String,
    /// Uploader display name.
    pub uploader: String,
    /// Relative uploader reference, e.g. "/channel/UC...".
    pub uploader_url: String,
    /// Duration in seconds. Mirrors report -1 for live content.
    pub duration: i64,
    #[serde(default)]
    pub audio_streams: Vec<AudioStream>,
    /// Placeholder, always empty: related items are out of scope.
    #[serde(default)]
    pub related_streams: Vec<serde_json::Value>,
    /// Placeholder, always empty: subtitles are out of scope.
    #[serde(default)]
    pub subtitles: Vec<serde_json::Value>,
    #[serde(default)]
    pub livestream: bool,
    /// Live-streaming manifest reference, when the provider carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hls: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(i64),
}

fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}
