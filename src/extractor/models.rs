//! Data structures for video information

use crate::utils::error::{Result, TubeFetchError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Video metadata reported by the extraction engine
///
/// The commonly used fields are typed; everything else the engine returned
/// is kept verbatim in `extra`. Typed fields are read leniently: `null` or a
/// value of the wrong shape counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub uploader: Option<String>,
    /// Length in seconds, kept as the engine wrote it (`120` or `12.5`)
    #[serde(default, deserialize_with = "lenient_number")]
    pub duration: Option<Number>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub webpage_url: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub view_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub like_count: Option<u64>,
    /// `YYYYMMDD`, as yt-dlp reports it
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub upload_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VideoInfo {
    /// Build from the engine's metadata document for `url`.
    pub fn from_engine(url: &str, metadata: Value) -> Result<Self> {
        if !metadata.is_object() {
            return Err(TubeFetchError::ExtractionError(format!(
                "engine returned non-object metadata for {}",
                url
            )));
        }

        let mut info: VideoInfo = serde_json::from_value(metadata)?;
        if info.webpage_url.is_empty() {
            info.webpage_url = url.to_string();
        }
        Ok(info)
    }

    /// Pretty-printed JSON, non-ASCII characters preserved
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Duration in seconds as a float
    pub fn duration_secs(&self) -> Option<f64> {
        self.duration.as_ref().and_then(Number::as_f64)
    }

    /// Look up any field the engine reported that has no typed counterpart.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}

fn lenient_opt_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<Number>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => Some(number),
        _ => None,
    })
}

/// Counts sometimes arrive as integral floats (`1000.0`).
fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.and_then(|number| {
        number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|value| {
                    *value >= 0.0 && value.fract() == 0.0 && *value <= u64::MAX as f64
                })
                .map(|value| value as u64)
        })
    }))
}
