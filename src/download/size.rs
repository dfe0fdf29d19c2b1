//! Best-effort byte-size estimation for media representations.
//!
//! Extractors report sizes with varying confidence. The estimator picks the
//! first usable signal in this order:
//!
//! 1. exact byte size (`filesize`)
//! 2. approximate byte size (`filesize_approx`)
//! 3. `bitrate_kbps * 1000 / 8 * duration_sec`
//!
//! An unknown size is `None`, never zero.

/// Bytes per binary megabyte used for display.
const BYTES_PER_MB: f64 = 1_048_576.0;

/// Marker rendered for sizes that cannot be estimated.
pub const UNKNOWN_SIZE: &str = "?";

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// A reported byte count, truncated; anything below one whole byte is unusable.
fn whole_bytes(value: Option<f64>) -> Option<u64> {
    positive(value)
        .map(|bytes| bytes.trunc() as u64)
        .filter(|bytes| *bytes > 0)
}

/// Converts a bitrate in kbit/s and a duration in seconds into a byte count.
///
/// Both inputs must be present and non-zero. The result truncates to whole
/// bytes; a computation that truncates to zero yields `None`.
pub fn size_from_bitrate(bitrate_kbps: Option<f64>, duration_sec: Option<f64>) -> Option<u64> {
    let kbps = positive(bitrate_kbps)?;
    let duration = positive(duration_sec)?;
    let bytes = (kbps * 1000.0 / 8.0 * duration).trunc();
    (bytes >= 1.0).then_some(bytes as u64)
}

/// Picks the best available size signal, see the module docs for precedence.
pub fn estimate(
    exact: Option<f64>,
    approx: Option<f64>,
    bitrate_kbps: Option<f64>,
    duration_sec: Option<f64>,
) -> Option<u64> {
    whole_bytes(exact)
        .or_else(|| whole_bytes(approx))
        .or_else(|| size_from_bitrate(bitrate_kbps, duration_sec))
}

/// Renders a size as binary megabytes with two decimals, or `?` when unknown.
pub fn human_size(bytes: Option<u64>) -> String {
    match bytes {
        Some(size) if size > 0 => format!("{:.2} MB", size as f64 / BYTES_PER_MB),
        _ => UNKNOWN_SIZE.to_string(),
    }
}
