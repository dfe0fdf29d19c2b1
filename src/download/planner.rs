//! Turns a user's (mode, format id) choice into a concrete download plan, and
//! locates the produced artifact once the executor is done.
//!
//! | mode  | chosen stream   | selector              | merge | post-process | container |
//! |-------|-----------------|-----------------------|-------|--------------|-----------|
//! | video | has audio       | `<id>`                | no    | none         | native    |
//! | video | video-only      | `<id>+bestaudio/best` | yes   | none         | mp4       |
//! | audio | any             | `<id>`                | no    | mp3 @ 192k   | mp3       |

use std::fs;
use std::path::{Path, PathBuf};

use strum::{Display, EnumString};

use crate::download::error::DownloadError;
use crate::download::metadata::{find_format, RawRepresentation};

/// Selector token yt-dlp expands to the best audio-only stream.
pub const BEST_AUDIO_TOKEN: &str = "bestaudio";

/// Default transcode quality for audio extraction, kbit/s.
pub const DEFAULT_AUDIO_QUALITY_KBPS: u32 = 192;

/// Container used when a video-only stream is merged with audio.
const MERGE_CONTAINER: &str = "mp4";

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MediaMode {
    Video,
    Audio,
}

/// Post-download processing the executor must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostProcess {
    None,
    /// Extract the audio track and transcode it
    ExtractAudio { codec: &'static str, quality_kbps: u32 },
}

/// Container of the final artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ContainerHint {
    /// Whatever the source stream uses
    #[strum(to_string = "source-native")]
    SourceNative,
    Mp4,
    Mp3,
}

/// Executable plan for one download request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadPlan {
    pub mode: MediaMode,
    pub format_id: String,
    /// yt-dlp `-f` argument
    pub format_selector: String,
    pub merge: bool,
    pub post_process: PostProcess,
    pub container: ContainerHint,
}

impl DownloadPlan {
    /// Renders the plan as yt-dlp arguments (without URL and output template).
    pub fn ytdlp_args(&self) -> Vec<String> {
        let mut args = vec!["-f".to_string(), self.format_selector.clone(), "--no-playlist".to_string()];

        if self.merge {
            args.push("--merge-output-format".to_string());
            args.push(MERGE_CONTAINER.to_string());
        }

        if let PostProcess::ExtractAudio { codec, quality_kbps } = &self.post_process {
            args.push("--extract-audio".to_string());
            args.push("--audio-format".to_string());
            args.push((*codec).to_string());
            args.push("--audio-quality".to_string());
            args.push(format!("{}K", quality_kbps));
        }

        args
    }
}

/// Builds download plans; holds only the configured transcode quality.
#[derive(Debug, Clone, Copy)]
pub struct DownloadPlanner {
    audio_quality_kbps: u32,
}

impl Default for DownloadPlanner {
    fn default() -> Self {
        Self::new(DEFAULT_AUDIO_QUALITY_KBPS)
    }
}

impl DownloadPlanner {
    pub fn new(audio_quality_kbps: u32) -> Self {
        Self { audio_quality_kbps }
    }

    /// Resolves `chosen_format_id` against `formats` and decides the plan.
    ///
    /// Fails with [`DownloadError::FormatNotFound`] when no representation matches.
    pub fn plan(
        &self,
        mode: MediaMode,
        formats: &[RawRepresentation],
        chosen_format_id: &str,
    ) -> Result<DownloadPlan, DownloadError> {
        let chosen = find_format(formats, chosen_format_id)
            .ok_or_else(|| DownloadError::FormatNotFound(chosen_format_id.to_string()))?;

        let format_id = chosen.format_id.clone();
        let plan = match mode {
            MediaMode::Video if chosen.has_audio() => DownloadPlan {
                mode,
                format_selector: format_id.clone(),
                format_id,
                merge: false,
                post_process: PostProcess::None,
                container: ContainerHint::SourceNative,
            },
            MediaMode::Video => DownloadPlan {
                mode,
                format_selector: format!("{}+{}/best", format_id, BEST_AUDIO_TOKEN),
                format_id,
                merge: true,
                post_process: PostProcess::None,
                container: ContainerHint::Mp4,
            },
            MediaMode::Audio => DownloadPlan {
                mode,
                format_selector: format_id.clone(),
                format_id,
                merge: false,
                post_process: PostProcess::ExtractAudio {
                    codec: "mp3",
                    quality_kbps: self.audio_quality_kbps,
                },
                container: ContainerHint::Mp3,
            },
        };

        log::info!(
            "Planned {} download: selector={} merge={} container={}",
            plan.mode,
            plan.format_selector,
            plan.merge,
            plan.container
        );

        Ok(plan)
    }
}

/// Locates the final artifact of an audio download.
///
/// The transcoder writes `<base>.mp3`; some sources skip the transcode and
/// leave `<base>.m4a`. Neither present is fatal.
pub fn resolve_audio_output(produced: &Path) -> Result<PathBuf, DownloadError> {
    let mp3 = produced.with_extension("mp3");
    if mp3.exists() {
        return Ok(mp3);
    }

    let m4a = produced.with_extension("m4a");
    if m4a.exists() {
        log::warn!("No mp3 produced for {}, falling back to m4a", produced.display());
        return Ok(m4a);
    }

    log::error!("Neither {} nor {} exists", mp3.display(), m4a.display());
    Err(DownloadError::OutputNotFound(mp3.display().to_string()))
}

/// Locates the final artifact of a video download.
///
/// Returns `produced` when it exists; otherwise the newest file in the same
/// directory sharing its stem (the merger may have changed the extension).
pub fn resolve_video_output(produced: &Path) -> Result<PathBuf, DownloadError> {
    if produced.exists() {
        return Ok(produced.to_path_buf());
    }

    log::warn!("File not found at expected path: {}", produced.display());

    let not_found = || DownloadError::OutputNotFound(produced.display().to_string());
    let parent = produced.parent().ok_or_else(not_found)?;
    let stem = produced.file_stem().and_then(|s| s.to_str()).ok_or_else(not_found)?;

    let entries = fs::read_dir(parent).map_err(|e| {
        DownloadError::OutputNotFound(format!("Failed to read {}: {}", parent.display(), e))
    })?;

    entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().file_stem().and_then(|s| s.to_str()) == Some(stem))
        .filter_map(|entry| {
            let modified = entry.metadata().and_then(|m| m.modified()).ok()?;
            Some((modified, entry.path()))
        })
        .max_by_key(|(modified, _)| *modified)
        .map(|(_, path)| path)
        .ok_or_else(not_found)
}

/// Resolves the artifact for `mode`.
pub fn resolve_output(mode: MediaMode, produced: &Path) -> Result<PathBuf, DownloadError> {
    match mode {
        MediaMode::Audio => resolve_audio_output(produced),
        MediaMode::Video => resolve_video_output(produced),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;
    use tempfile::TempDir;

    fn reps() -> Vec<RawRepresentation> {
        vec![
            RawRepresentation {
                format_id: "18".into(),
                ext: Some("mp4".into()),
                vcodec: Some("avc1.42001E".into()),
                acodec: Some("mp4a.40.2".into()),
                height: Some(360),
                ..Default::default()
            },
            RawRepresentation {
                format_id: "137".into(),
                ext: Some("mp4".into()),
                vcodec: Some("avc1.640028".into()),
                acodec: Some("none".into()),
                height: Some(1080),
                ..Default::default()
            },
            RawRepresentation {
                format_id: "140".into(),
                ext: Some("m4a".into()),
                vcodec: Some("none".into()),
                acodec: Some("mp4a.40.2".into()),
                abr: Some(129.5),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_progressive_video_passthrough() {
        let plan = DownloadPlanner::default().plan(MediaMode::Video, &reps(), "18").unwrap();
        assert_eq!(
            plan,
            DownloadPlan {
                mode: MediaMode::Video,
                format_id: "18".into(),
                format_selector: "18".into(),
                merge: false,
                post_process: PostProcess::None,
                container: ContainerHint::SourceNative,
            }
        );
        assert_eq!(plan.ytdlp_args(), vec!["-f", "18", "--no-playlist"]);
    }

    #[test]
    fn test_video_only_merges_with_best_audio() {
        let plan = DownloadPlanner::default().plan(MediaMode::Video, &reps(), "137").unwrap();
        assert!(plan.merge);
        assert_eq!(plan.container, ContainerHint::Mp4);
        assert!(plan.format_selector.contains("137"));
        assert!(plan.format_selector.contains(BEST_AUDIO_TOKEN));
        assert_eq!(plan.format_selector, "137+bestaudio/best");
        assert_eq!(
            plan.ytdlp_args(),
            vec!["-f", "137+bestaudio/best", "--no-playlist", "--merge-output-format", "mp4"]
        );
    }

    #[test]
    fn test_audio_mode_transcodes_to_mp3() {
        let plan = DownloadPlanner::default().plan(MediaMode::Audio, &reps(), "140").unwrap();
        assert!(!plan.merge);
        assert_eq!(plan.format_selector, "140");
        assert_eq!(plan.container, ContainerHint::Mp3);
        assert_eq!(
            plan.post_process,
            PostProcess::ExtractAudio {
                codec: "mp3",
                quality_kbps: 192
            }
        );
        assert_eq!(
            plan.ytdlp_args(),
            vec![
                "-f",
                "140",
                "--no-playlist",
                "--extract-audio",
                "--audio-format",
                "mp3",
                "--audio-quality",
                "192K"
            ]
        );
    }

    #[test]
    fn test_audio_mode_ignores_stream_kind() {
        let plan = DownloadPlanner::new(320).plan(MediaMode::Audio, &reps(), "18").unwrap();
        assert!(!plan.merge);
        assert_eq!(plan.format_selector, "18");
        assert_eq!(
            plan.post_process,
            PostProcess::ExtractAudio {
                codec: "mp3",
                quality_kbps: 320
            }
        );
    }

    #[test]
    fn test_unknown_format_id() {
        for mode in [MediaMode::Video, MediaMode::Audio] {
            let err = DownloadPlanner::default().plan(mode, &reps(), "missing-id").unwrap_err();
            assert_eq!(err, DownloadError::FormatNotFound("missing-id".into()));
        }
        let err = DownloadPlanner::default().plan(MediaMode::Video, &[], "18").unwrap_err();
        assert!(matches!(err, DownloadError::FormatNotFound(_)));
    }

    #[test]
    fn test_format_id_whitespace_tolerated() {
        let plan = DownloadPlanner::default().plan(MediaMode::Video, &reps(), " 137 ").unwrap();
        assert_eq!(plan.format_id, "137");
    }

    #[test]
    fn test_media_mode_parse() {
        assert_eq!(MediaMode::from_str("video").unwrap(), MediaMode::Video);
        assert_eq!(MediaMode::from_str("AUDIO").unwrap(), MediaMode::Audio);
        assert!(MediaMode::from_str("playlist").is_err());
        assert_eq!(MediaMode::Audio.to_string(), "audio");
        assert_eq!(ContainerHint::SourceNative.to_string(), "source-native");
    }

    #[test]
    fn test_audio_output_prefers_mp3() {
        let dir = TempDir::new().unwrap();
        let produced = dir.path().join("abc_Song.webm");
        fs::write(dir.path().join("abc_Song.mp3"), b"mp3").unwrap();
        fs::write(dir.path().join("abc_Song.m4a"), b"m4a").unwrap();

        assert_eq!(resolve_audio_output(&produced).unwrap(), dir.path().join("abc_Song.mp3"));
    }

    #[test]
    fn test_audio_output_falls_back_to_m4a() {
        let dir = TempDir::new().unwrap();
        let produced = dir.path().join("abc_Song.webm");
        fs::write(dir.path().join("abc_Song.m4a"), b"m4a").unwrap();

        assert_eq!(resolve_audio_output(&produced).unwrap(), dir.path().join("abc_Song.m4a"));
    }

    #[test]
    fn test_audio_output_missing() {
        let dir = TempDir::new().unwrap();
        let produced = dir.path().join("abc_Song.webm");
        fs::write(&produced, b"source").unwrap();

        let err = resolve_audio_output(&produced).unwrap_err();
        assert!(matches!(err, DownloadError::OutputNotFound(_)));
    }

    #[test]
    fn test_audio_output_title_with_dots() {
        let dir = TempDir::new().unwrap();
        let produced = dir.path().join("id_Vol. 2 Live.webm");
        fs::write(dir.path().join("id_Vol. 2 Live.mp3"), b"mp3").unwrap();

        assert_eq!(resolve_audio_output(&produced).unwrap(), dir.path().join("id_Vol. 2 Live.mp3"));
    }

    #[test]
    fn test_video_output_exact_and_renamed() {
        let dir = TempDir::new().unwrap();
        let produced = dir.path().join("id_Clip.mp4");
        fs::write(&produced, b"video").unwrap();
        assert_eq!(resolve_output(MediaMode::Video, &produced).unwrap(), produced);

        let renamed = dir.path().join("id_Other.mkv");
        fs::write(&renamed, b"video").unwrap();
        let expected = dir.path().join("id_Other.mp4");
        assert_eq!(resolve_output(MediaMode::Video, &expected).unwrap(), renamed);
    }

    #[test]
    fn test_video_output_missing() {
        let dir = TempDir::new().unwrap();
        let err = resolve_output(MediaMode::Video, &dir.path().join("nothing.mp4")).unwrap_err();
        assert!(matches!(err, DownloadError::OutputNotFound(_)));
    }
}
