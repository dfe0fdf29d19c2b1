//! Media metadata as reported by the extractor.
//!
//! `MediaInfo` and `RawRepresentation` mirror the subset of yt-dlp's
//! `--dump-single-json` document the catalog and planner need. Every field
//! except the format identifier is optional: extractors omit keys, send
//! `null`, or send `"none"` for codecs, and all three mean "absent" here.

use serde::{Deserialize, Deserializer};

use crate::core::utils::{format_count, format_duration};

/// Codec marker yt-dlp uses for "this stream is not present".
const NO_CODEC: &str = "none";

/// Accepts both `"137"` and `137` for format identifiers.
fn deserialize_format_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Float(n) => n.to_string(),
    })
}

/// Accepts `1080`, `1080.0` and `"1080"` for unsigned counts.
///
/// Non-finite, negative or out-of-range values become `None` instead of
/// failing the whole document.
fn deserialize_lenient_uint<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNumber {
        Int(u64),
        Float(f64),
        Text(String),
    }

    let whole = |f: f64| (f.is_finite() && f >= 0.0 && f <= u64::MAX as f64).then(|| f.trunc() as u64);

    let value = match Option::<RawNumber>::deserialize(deserializer)? {
        None => None,
        Some(RawNumber::Int(n)) => Some(n),
        Some(RawNumber::Float(f)) => whole(f),
        Some(RawNumber::Text(s)) => s.trim().parse::<f64>().ok().and_then(whole),
    };

    Ok(value.and_then(|n| T::try_from(n).ok()))
}

fn non_empty_codec(codec: &Option<String>) -> Option<&str> {
    codec
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(NO_CODEC))
}

/// One encoded variant of a media item, immutable once extracted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRepresentation {
    #[serde(deserialize_with = "deserialize_format_id")]
    pub format_id: String,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub vcodec: Option<String>,
    #[serde(default)]
    pub acodec: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_uint")]
    pub height: Option<u32>,
    /// Average audio bitrate, kbit/s
    #[serde(default)]
    pub abr: Option<f64>,
    /// Overall target bitrate, kbit/s
    #[serde(default)]
    pub tbr: Option<f64>,
    #[serde(default)]
    pub filesize: Option<f64>,
    #[serde(default)]
    pub filesize_approx: Option<f64>,
}

impl RawRepresentation {
    pub fn video_codec(&self) -> Option<&str> {
        non_empty_codec(&self.vcodec)
    }

    pub fn audio_codec(&self) -> Option<&str> {
        non_empty_codec(&self.acodec)
    }

    pub fn has_video(&self) -> bool {
        self.video_codec().is_some()
    }

    pub fn has_audio(&self) -> bool {
        self.audio_codec().is_some()
    }

    /// Audio stream without video.
    pub fn is_audio_only(&self) -> bool {
        self.has_audio() && !self.has_video()
    }

    /// Video stream that already carries audio.
    pub fn is_progressive(&self) -> bool {
        self.has_video() && self.has_audio()
    }

    /// Known, non-zero pixel height.
    pub fn known_height(&self) -> Option<u32> {
        self.height.filter(|h| *h > 0)
    }

    /// Audio bitrate if reported, else the overall bitrate.
    pub fn audio_bitrate(&self) -> Option<f64> {
        self.abr
            .filter(|b| b.is_finite())
            .or(self.tbr)
            .filter(|b| b.is_finite() && *b > 0.0)
    }

    /// Identifier comparison tolerant of numeric vs string forms (`137` == `"137"`).
    pub fn matches_id(&self, format_id: &str) -> bool {
        self.format_id.trim() == format_id.trim()
    }
}

/// First representation whose identifier matches `format_id`.
pub fn find_format<'a>(formats: &'a [RawRepresentation], format_id: &str) -> Option<&'a RawRepresentation> {
    formats.iter().find(|f| f.matches_id(format_id))
}

/// Media attributes plus the list of representations for one item.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Seconds; yt-dlp reports fractional durations for some sites
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_uint")]
    pub view_count: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_lenient_uint")]
    pub like_count: Option<u64>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_uint")]
    pub channel_follower_count: Option<u64>,
    #[serde(default)]
    pub formats: Vec<RawRepresentation>,
}

impl MediaInfo {
    /// Parses a yt-dlp JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Duration usable for bitrate-based estimates; zero counts as unknown.
    pub fn duration_secs(&self) -> Option<f64> {
        self.duration.filter(|d| d.is_finite() && *d > 0.0)
    }

    pub fn summary(&self) -> MediaSummary {
        MediaSummary {
            title: self.title.clone().unwrap_or_else(|| "Unknown".to_string()),
            duration: format_duration(self.duration_secs()),
            thumbnail: self.thumbnail.clone(),
            views: format_count(self.view_count),
            likes: format_count(self.like_count),
            channel: self.uploader.clone().unwrap_or_else(|| "Unknown".to_string()),
            subscribers: format_count(self.channel_follower_count),
        }
    }
}

/// Display-ready media attributes shown alongside the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSummary {
    pub title: String,
    pub duration: String,
    pub thumbnail: Option<String>,
    pub views: String,
    pub likes: String,
    pub channel: String,
    pub subscribers: String,
}
