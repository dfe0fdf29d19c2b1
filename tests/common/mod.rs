//! Common test utilities
//!
//! This module is shared across all integration tests

#![allow(dead_code)]

use clipdeck::download::MediaInfo;

/// Trimmed `yt-dlp --dump-single-json` output for a 3:32 video.
///
/// Audio: 251 (135.2k, approx size), 140 (129.5k), 249 (50.3k, no size),
/// 139 (48.8k). Video: 360p (18 progressive, 134 video-only), 720p (136 and
/// 247 video-only, 22 progressive without size), 1080p (137, tbr only).
/// Plus a storyboard entry that is neither audio nor video.
pub const SAMPLE_VIDEO_JSON: &str = r#"{
  "id": "dQw4w9WgXcQ",
  "title": "Demo Clip",
  "duration": 212,
  "thumbnail": "https://i.ytimg.com/vi/dQw4w9WgXcQ/maxresdefault.jpg",
  "view_count": 1543210,
  "like_count": 18001,
  "uploader": "Demo Channel",
  "channel_follower_count": 250000,
  "formats": [
    {"format_id": "sb0", "ext": "mhtml", "vcodec": "none", "acodec": "none", "height": 45},
    {"format_id": "139", "ext": "m4a", "vcodec": "none", "acodec": "mp4a.40.5", "abr": 48.8, "tbr": 48.8, "filesize": 1300000},
    {"format_id": "249", "ext": "webm", "vcodec": "none", "acodec": "opus", "abr": 50.3, "tbr": 50.3, "filesize": null},
    {"format_id": "140", "ext": "m4a", "vcodec": "none", "acodec": "mp4a.40.2", "abr": 129.5, "tbr": 129.5, "filesize": 3433000},
    {"format_id": "251", "ext": "webm", "vcodec": "none", "acodec": "opus", "abr": 135.2, "tbr": 135.2, "filesize_approx": 3600000},
    {"format_id": "18", "ext": "mp4", "vcodec": "avc1.42001E", "acodec": "mp4a.40.2", "height": 360, "tbr": 600.0, "filesize": 15000000},
    {"format_id": "134", "ext": "mp4", "vcodec": "avc1.4d401e", "acodec": "none", "height": 360, "tbr": 300.0, "filesize": 8000000},
    {"format_id": "22", "ext": "mp4", "vcodec": "avc1.64001F", "acodec": "mp4a.40.2", "height": 720, "tbr": 1500.0},
    {"format_id": "247", "ext": "webm", "vcodec": "vp9", "acodec": "none", "height": 720, "filesize_approx": 22000000},
    {"format_id": "136", "ext": "mp4", "vcodec": "avc1.4d401f", "acodec": "none", "height": 720, "filesize": 25000000},
    {"format_id": "137", "ext": "mp4", "vcodec": "avc1.640028", "acodec": "none", "height": 1080, "tbr": 4000.0}
  ]
}"#;

/// A music-only upload with no video streams.
pub const AUDIO_ONLY_JSON: &str = r#"{
  "id": "track-1",
  "title": "Field Recording",
  "duration": 95.5,
  "formats": [
    {"format_id": "http_mp3_128", "ext": "mp3", "vcodec": "none", "acodec": "mp3", "abr": 128, "filesize": 1528000}
  ]
}"#;

pub fn sample_info() -> MediaInfo {
    MediaInfo::from_json(SAMPLE_VIDEO_JSON).expect("fixture parses")
}

pub fn audio_only_info() -> MediaInfo {
    MediaInfo::from_json(AUDIO_ONLY_JSON).expect("fixture parses")
}

pub fn test_url() -> url::Url {
    url::Url::parse("https://www.youtube.com/watch?v=dQw4w9WgXcQ").expect("valid url")
}
