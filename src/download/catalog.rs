//! Builds the user-facing catalog of download choices from raw representations.
//!
//! - Audio: every audio-only representation with a usable bitrate, sorted by
//!   bitrate descending, one entry per rounded bitrate.
//! - Video: one winner per pixel height, sorted ascending. Video-only
//!   representations beat progressive ones; within a tier the larger
//!   estimate wins and an unknown estimate loses to any known one.
//! - Video-only entries display their size plus the best audio stream's
//!   size, since the download merges the two.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use crate::download::error::DownloadError;
use crate::download::metadata::RawRepresentation;
use crate::download::planner::MediaMode;
use crate::download::size::{estimate, human_size, size_from_bitrate};

/// Audio-only download choice.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioOption {
    pub format_id: String,
    /// kbit/s
    pub bitrate_kbps: f64,
    /// Size from the representation's own signals
    pub estimated_size: Option<u64>,
    /// `estimated_size`, or a bitrate × duration estimate when that is unknown
    pub display_size: Option<u64>,
}

impl AudioOption {
    /// Deduplication key: bitrate rounded half-to-even.
    pub fn bitrate_tier(&self) -> i64 {
        self.bitrate_kbps.round_ties_even() as i64
    }

    /// `"128 kbps"`
    pub fn label(&self) -> String {
        format!("{} kbps", self.bitrate_tier())
    }

    pub fn size_label(&self) -> String {
        human_size(self.display_size)
    }
}

/// Video download choice for one resolution tier.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoOption {
    pub format_id: String,
    pub height: u32,
    /// Video stream only, before any audio is added
    pub estimated_size: Option<u64>,
    /// Representation already carries audio
    pub progressive: bool,
    /// Size of the file the user ends up with, merged audio included
    pub display_size: Option<u64>,
}

impl VideoOption {
    /// `"720p"`
    pub fn label(&self) -> String {
        format!("{}p", self.height)
    }

    pub fn size_label(&self) -> String {
        human_size(self.display_size)
    }

    /// Video-only outranks progressive, then larger estimate outranks smaller.
    /// `None` sorts below every known size, including a genuine zero.
    fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .progressive
            .cmp(&self.progressive)
            .then_with(|| self.estimated_size.cmp(&other.estimated_size))
    }
}

/// Ranked catalogs for one extraction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatCatalog {
    /// Ascending by height
    pub video: Vec<VideoOption>,
    /// Descending by bitrate, one per rounded bitrate
    pub audio: Vec<AudioOption>,
    /// Highest-bitrate audio option, used for merge estimates
    pub best_audio: Option<AudioOption>,
}

/// A catalog row in mode-independent form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub format_id: String,
    pub quality: String,
    pub size: String,
}

impl FormatCatalog {
    pub fn is_empty_for(&self, mode: MediaMode) -> bool {
        match mode {
            MediaMode::Video => self.video.is_empty(),
            MediaMode::Audio => self.audio.is_empty(),
        }
    }

    /// Rows to present for `mode`.
    pub fn options(&self, mode: MediaMode) -> Vec<CatalogEntry> {
        match mode {
            MediaMode::Video => self
                .video
                .iter()
                .map(|v| CatalogEntry {
                    format_id: v.format_id.clone(),
                    quality: v.label(),
                    size: v.size_label(),
                })
                .collect(),
            MediaMode::Audio => self
                .audio
                .iter()
                .map(|a| CatalogEntry {
                    format_id: a.format_id.clone(),
                    quality: a.label(),
                    size: a.size_label(),
                })
                .collect(),
        }
    }

    /// Like [`options`](Self::options), but an empty list is an `EmptyCatalog` error.
    pub fn ensure_options(&self, mode: MediaMode) -> Result<Vec<CatalogEntry>, DownloadError> {
        if self.is_empty_for(mode) {
            return Err(DownloadError::EmptyCatalog(mode));
        }
        Ok(self.options(mode))
    }
}

fn audio_candidates(formats: &[RawRepresentation], duration: Option<f64>) -> Vec<AudioOption> {
    formats
        .iter()
        .filter(|f| f.is_audio_only())
        .filter_map(|f| {
            let bitrate_kbps = f.audio_bitrate()?;
            let estimated_size = estimate(f.filesize, f.filesize_approx, f.tbr, duration);
            Some(AudioOption {
                format_id: f.format_id.clone(),
                bitrate_kbps,
                estimated_size,
                display_size: estimated_size.or_else(|| size_from_bitrate(Some(bitrate_kbps), duration)),
            })
        })
        .collect()
}

/// First-seen wins on equal bitrate.
fn pick_best_audio(candidates: &[AudioOption]) -> Option<AudioOption> {
    let mut best: Option<&AudioOption> = None;
    for candidate in candidates {
        if best.is_none_or(|current| candidate.bitrate_kbps > current.bitrate_kbps) {
            best = Some(candidate);
        }
    }
    best.cloned()
}

fn select_video_per_height(formats: &[RawRepresentation], duration: Option<f64>) -> BTreeMap<u32, VideoOption> {
    let mut by_height: BTreeMap<u32, VideoOption> = BTreeMap::new();

    for format in formats {
        if !format.has_video() {
            continue;
        }
        let Some(height) = format.known_height() else {
            continue;
        };

        let candidate = VideoOption {
            format_id: format.format_id.clone(),
            height,
            estimated_size: estimate(format.filesize, format.filesize_approx, format.tbr, duration),
            progressive: format.is_progressive(),
            display_size: None,
        };

        match by_height.get(&height) {
            Some(current) if candidate.rank_cmp(current) != Ordering::Greater => {}
            _ => {
                by_height.insert(height, candidate);
            }
        }
    }

    by_height
}

/// Size of the merged file for a video-only option.
///
/// Unknown components count as zero; both unknown stays unknown.
fn merged_size(video: Option<u64>, best_audio: Option<&AudioOption>, duration: Option<f64>) -> Option<u64> {
    let audio = best_audio.and_then(|a| {
        a.estimated_size
            .or_else(|| size_from_bitrate(Some(a.bitrate_kbps), duration))
    });

    match (video, audio) {
        (None, None) => None,
        (v, a) => Some(v.unwrap_or(0) + a.unwrap_or(0)),
    }
}

/// Builds video and audio catalogs from an extraction.
pub fn build_catalog(formats: &[RawRepresentation], duration_secs: Option<f64>) -> FormatCatalog {
    let duration = duration_secs.filter(|d| d.is_finite() && *d > 0.0);

    let mut audio_set = audio_candidates(formats, duration);
    let best_audio = pick_best_audio(&audio_set);

    let video: Vec<VideoOption> = select_video_per_height(formats, duration)
        .into_values()
        .map(|mut option| {
            option.display_size = if option.progressive {
                option.estimated_size
            } else {
                merged_size(option.estimated_size, best_audio.as_ref(), duration)
            };
            option
        })
        .collect();

    // Stable sort keeps extraction order among equal bitrates, so the
    // first-seen entry of a rounded tier is what survives deduplication.
    audio_set.sort_by(|a, b| b.bitrate_kbps.total_cmp(&a.bitrate_kbps));
    let mut seen_tiers = HashSet::new();
    audio_set.retain(|a| seen_tiers.insert(a.bitrate_tier()));

    log::debug!(
        "Built catalog from {} representations: {} video tiers, {} audio tiers, best audio {:?}",
        formats.len(),
        video.len(),
        audio_set.len(),
        best_audio.as_ref().map(|a| a.format_id.as_str())
    );

    FormatCatalog {
        video,
        audio: audio_set,
        best_audio,
    }
}
