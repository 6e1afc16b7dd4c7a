use serde::{Deserialize, Deserializer};

use super::stream_record::{AudioStream, StreamRecord};

/// Raw platform schema returned by the credential-rotated provider. Only the
/// fields the normalizer consumes are modeled; everything else is ignored.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawPlatformResponse {
    pub title: String,
    pub channel_title: String,
    pub channel_id: String,
    // The platform reports this as a string.
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub length_seconds: i64,
    #[serde(default)]
    pub is_live_content: bool,
    #[serde(default)]
    pub adaptive_formats: Vec<AdaptiveFormat>,
}

/// One adaptive format of the raw platform schema, audio or video.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveFormat {
    pub url: String,
    pub mime_type: String,
    #[serde(default)]
    pub bitrate: u64,
    #[serde(default)]
    pub content_length: String,
}

impl RawPlatformResponse {
    const CHANNEL_PREFIX: &'static str = "/channel/";

    /// Reshapes the raw payload into the canonical record: audio-typed
    /// variants only, quality labeled in kbps, codec pulled out of the MIME
    /// string, uploader referenced by relative channel path.
    pub fn normalize(self) -> StreamRecord {
        let audio_streams = self
            .adaptive_formats
            .into_iter()
            .filter(|format| format.mime_type.starts_with("audio"))
            .map(AdaptiveFormat::into_audio_stream)
            .collect();

        StreamRecord {
            title: self.title,
            uploader: self.channel_title,
            uploader_url: format!("{}{}", Self::CHANNEL_PREFIX, self.channel_id),
            duration: self.length_seconds,
            audio_streams,
            related_streams: Vec::new(),
            subtitles: Vec::new(),
            livestream: self.is_live_content,
            hls: None,
        }
    }
}

impl AdaptiveFormat {
    fn into_audio_stream(self) -> AudioStream {
        let codec = extract_codec(&self.mime_type);
        AudioStream {
            url: self.url,
            quality: format!("{} kbps", self.bitrate / 1000),
            codec,
            bitrate: self.bitrate,
            content_length: self.content_length,
            mime_type: self.mime_type,
        }
    }
}

/// Pulls the codec token out of a MIME string like
/// `audio/webm; codecs="opus"`. A MIME string without the parameter yields
/// `None`, never an error.
fn extract_codec(mime_type: &str) -> Option<String> {
    let (_, rest) = mime_type.split_once("codecs=\"")?;
    let (codec, _) = rest.split_once('"')?;
    Some(codec.to_owned())
}

fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(i64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
