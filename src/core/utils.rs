/// Formats a duration in seconds as `M:SS`, or `H:MM:SS` for an hour and longer.
///
/// Fractional seconds are truncated. Missing durations render as `Unknown`.
///
/// # Example
///
/// ```
/// use clipdeck::core::utils::format_duration;
///
/// assert_eq!(format_duration(Some(213.7)), "3:33");
/// assert_eq!(format_duration(Some(3725.0)), "1:02:05");
/// assert_eq!(format_duration(None), "Unknown");
/// ```
pub fn format_duration(duration_secs: Option<f64>) -> String {
    let Some(duration) = duration_secs.filter(|d| d.is_finite() && *d >= 0.0) else {
        return "Unknown".to_string();
    };

    let total = duration as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Formats a count with comma thousands separators.
///
/// # Example
///
/// ```
/// use clipdeck::core::utils::format_count;
///
/// assert_eq!(format_count(Some(1234567)), "1,234,567");
/// assert_eq!(format_count(None), "Unknown");
/// ```
pub fn format_count(count: Option<u64>) -> String {
    let Some(count) = count else {
        return "Unknown".to_string();
    };

    let digits = count.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result
}
