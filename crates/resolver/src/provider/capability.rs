use std::fmt;

use serde_json::Value;

/// The capability a caller requires from a provider response.
///
/// Evaluated on the raw payload before any normalization, so a response that
/// parses but cannot serve the caller takes the same fallback path as a
/// transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// At least one audio-adaptive format.
    AudioStreams,
    /// A live-streaming (HLS) manifest reference.
    LiveManifest,
}

impl Capability {
    /// Checks the raw payload against this capability. Understands both the
    /// raw platform schema (`adaptiveFormats`) and the normalized mirror
    /// schema (`audioStreams` / `hls`).
    pub fn satisfied_by(&self, raw: &Value) -> bool {
        match self {
            Self::AudioStreams => {
                has_audio_adaptive_format(raw) || has_nonempty_array(raw, "audioStreams")
            }
            Self::LiveManifest => raw
                .get("hls")
                .and_then(Value::as_str)
                .is_some_and(|manifest| !manifest.is_empty()),
        }
    }
}

fn has_nonempty_array(raw: &Value, field: &str) -> bool {
    raw.get(field)
        .and_then(Value::as_array)
        .is_some_and(|items| !items.is_empty())
}

fn has_audio_adaptive_format(raw: &Value) -> bool {
    raw.get("adaptiveFormats")
        .and_then(Value::as_array)
        .is_some_and(|formats| {
            formats.iter().any(|format| {
                format
                    .get("mimeType")
                    .and_then(Value::as_str)
                    .is_some_and(|mime| mime.starts_with("audio"))
            })
        })
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AudioStreams => f.write_str("audio streams"),
            Self::LiveManifest => f.write_str("a live manifest"),
        }
    }
}
