//! Classification of yt-dlp failures.
//!
//! yt-dlp reports everything through stderr text, so the error kind is
//! recovered by matching known phrases.

use crate::download::error::DownloadError;

/// Kinds of yt-dlp failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YtDlpErrorType {
    /// Cookies rejected or login required
    InvalidCookies,
    /// Request flagged as automated
    BotDetection,
    /// Private, removed or region-locked media
    VideoUnavailable,
    /// No extractor for this URL
    UnsupportedUrl,
    /// Timeouts, DNS, refused connections
    NetworkError,
    /// ffmpeg merge or transcode failure
    PostProcessing,
    Unknown,
}

/// Analyzes yt-dlp stderr and determines the error kind
pub fn analyze_ytdlp_error(stderr: &str) -> YtDlpErrorType {
    let stderr_lower = stderr.to_lowercase();

    if stderr_lower.contains("cookies are no longer valid")
        || stderr_lower.contains("cookies have likely been rotated")
        || stderr_lower.contains("please sign in")
        || stderr_lower.contains("use --cookies-from-browser")
        || stderr_lower.contains("use --cookies for the authentication")
    {
        return YtDlpErrorType::InvalidCookies;
    }

    if stderr_lower.contains("sign in to confirm you're not a bot")
        || stderr_lower.contains("bot detection")
        || stderr_lower.contains("http error 403")
        || stderr_lower.contains("http error 429")
        || stderr_lower.contains("signature extraction failed")
    {
        return YtDlpErrorType::BotDetection;
    }

    if stderr_lower.contains("private video")
        || stderr_lower.contains("video unavailable")
        || stderr_lower.contains("this video is not available")
        || stderr_lower.contains("video has been removed")
        || stderr_lower.contains("this video does not exist")
        || stderr_lower.contains("not available in your country")
    {
        return YtDlpErrorType::VideoUnavailable;
    }

    if stderr_lower.contains("unsupported url") || stderr_lower.contains("is not a valid url") {
        return YtDlpErrorType::UnsupportedUrl;
    }

    if stderr_lower.contains("postprocessing")
        || stderr_lower.contains("ffmpeg")
        || stderr_lower.contains("ffprobe")
        || stderr_lower.contains("conversion failed")
    {
        return YtDlpErrorType::PostProcessing;
    }

    if stderr_lower.contains("timed out")
        || stderr_lower.contains("timeout")
        || stderr_lower.contains("connection")
        || stderr_lower.contains("network")
        || stderr_lower.contains("temporary failure in name resolution")
        || stderr_lower.contains("failed to connect")
    {
        return YtDlpErrorType::NetworkError;
    }

    YtDlpErrorType::Unknown
}

/// Returns the user-facing message for an error kind
pub fn get_error_message(error_type: YtDlpErrorType) -> &'static str {
    match error_type {
        YtDlpErrorType::InvalidCookies => "The site requires a signed-in session. Try another video or retry later.",
        YtDlpErrorType::BotDetection => "The site blocked the request. Try another video or retry later.",
        YtDlpErrorType::VideoUnavailable => "The video is unavailable. It may be private, removed or region-locked.",
        YtDlpErrorType::UnsupportedUrl => "This URL is not supported.",
        YtDlpErrorType::NetworkError => "Network problem. Try again in a minute.",
        YtDlpErrorType::PostProcessing => "Merging or converting the downloaded media failed.",
        YtDlpErrorType::Unknown => "The download failed. Check that the link is correct.",
    }
}

/// Picks the last `ERROR:` line from stderr, or the last non-empty line.
pub fn stderr_cause(stderr: &str) -> &str {
    let lines = || stderr.lines().map(str::trim).filter(|l| !l.is_empty());
    lines()
        .rev()
        .find(|l| l.starts_with("ERROR:"))
        .or_else(|| lines().next_back())
        .unwrap_or("yt-dlp exited without output")
}

fn with_cause(error_type: YtDlpErrorType, stderr: &str) -> String {
    format!("{} ({})", get_error_message(error_type), stderr_cause(stderr))
}

/// Maps a failed metadata run to a core error.
pub fn extraction_error(stderr: &str) -> DownloadError {
    let error_type = analyze_ytdlp_error(stderr);
    log::warn!("yt-dlp extraction failed, error type: {:?}", error_type);
    DownloadError::Extraction(with_cause(error_type, stderr))
}

/// Maps a failed download run to a core error. Network failures stay distinct
/// so the caller can retry them.
pub fn transfer_error(stderr: &str) -> DownloadError {
    let error_type = analyze_ytdlp_error(stderr);
    log::warn!("yt-dlp download failed, error type: {:?}", error_type);
    match error_type {
        YtDlpErrorType::NetworkError => DownloadError::Network(with_cause(error_type, stderr)),
        _ => DownloadError::Transfer(with_cause(error_type, stderr)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_cookies() {
        assert_eq!(
            analyze_ytdlp_error("ERROR: The provided YouTube account cookies are no longer valid"),
            YtDlpErrorType::InvalidCookies
        );
    }

    #[test]
    fn test_analyze_bot_detection() {
        assert_eq!(
            analyze_ytdlp_error("ERROR: [youtube] abc: Sign in to confirm you're not a bot"),
            YtDlpErrorType::BotDetection
        );
        assert_eq!(
            analyze_ytdlp_error("ERROR: unable to download video data: HTTP Error 403: Forbidden"),
            YtDlpErrorType::BotDetection
        );
    }

    #[test]
    fn test_analyze_unavailable_and_unsupported() {
        assert_eq!(
            analyze_ytdlp_error("ERROR: [youtube] xyz: Private video"),
            YtDlpErrorType::VideoUnavailable
        );
        assert_eq!(
            analyze_ytdlp_error("ERROR: Unsupported URL: https://example.com/"),
            YtDlpErrorType::UnsupportedUrl
        );
    }

    #[test]
    fn test_analyze_network_and_postprocessing() {
        assert_eq!(
            analyze_ytdlp_error("ERROR: Unable to download webpage: The read operation timed out"),
            YtDlpErrorType::NetworkError
        );
        assert_eq!(
            analyze_ytdlp_error("ERROR: Postprocessing: Conversion failed!"),
            YtDlpErrorType::PostProcessing
        );
        assert_eq!(analyze_ytdlp_error("something odd"), YtDlpErrorType::Unknown);
    }

    #[test]
    fn test_stderr_cause() {
        let stderr = "WARNING: a\nERROR: first\n\nERROR: second\nDeleting original file\n";
        assert_eq!(stderr_cause(stderr), "ERROR: second");
        assert_eq!(stderr_cause("just text\n"), "just text");
        assert_eq!(stderr_cause(""), "yt-dlp exited without output");
    }

    #[test]
    fn test_transfer_error_keeps_network_distinct() {
        assert!(matches!(
            transfer_error("ERROR: Connection reset by peer"),
            DownloadError::Network(_)
        ));
        assert!(matches!(
            transfer_error("ERROR: Postprocessing: ffmpeg not found"),
            DownloadError::Transfer(_)
        ));
        assert!(matches!(extraction_error("ERROR: Unsupported URL: x"), DownloadError::Extraction(_)));
    }
}
