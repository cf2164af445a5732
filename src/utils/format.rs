//! Display formatting helpers for video metadata
//!
//! Pure functions that turn raw extractor output into display-ready fields:
//! duration strings, quality labels and safe download filenames.

/// Fallback filename used when no usable title is available
pub const FALLBACK_FILENAME: &str = "downloaded_video.mp4";

/// Resolution buckets, highest first. A format whose pixel height reaches a
/// bucket floor is labeled with that bucket; heights below the lowest floor
/// are dropped.
const QUALITY_BUCKETS: &[(u32, &str)] = &[
    (2160, "2160p"),
    (1440, "1440p"),
    (1080, "1080p"),
    (720, "720p"),
    (480, "480p"),
    (360, "360p"),
];

/// Format a duration in seconds as HH:MM:SS (or MM:SS under an hour)
///
/// Missing or zero durations render as "Unknown", matching live streams and
/// pages where the extractor reports no length.
pub fn format_duration(seconds: Option<u64>) -> String {
    let seconds = match seconds {
        Some(s) if s > 0 => s,
        _ => return "Unknown".to_string(),
    };

    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Map format pixel heights onto quality labels
///
/// Deduplicates (set semantics) and returns labels sorted descending by
/// resolution, e.g. `["1080p", "720p"]`.
pub fn quality_labels(heights: impl IntoIterator<Item = u32>) -> Vec<String> {
    let mut buckets = std::collections::BTreeSet::new();

    for height in heights {
        if let Some((_, label)) = QUALITY_BUCKETS.iter().find(|(floor, _)| height >= *floor) {
            buckets.insert(*label);
        }
    }

    let mut labels: Vec<String> = buckets.into_iter().map(String::from).collect();
    labels.sort_by_key(|label| {
        std::cmp::Reverse(label.trim_end_matches('p').parse::<u32>().unwrap_or(0))
    });
    labels
}

/// Build a safe download filename from a video title
///
/// Keeps alphanumerics, spaces, hyphens and underscores, trims trailing
/// whitespace and appends `.mp4`. Titles that sanitize to nothing fall back
/// to a fixed generic name, so this never fails on the success path of a
/// completed download.
pub fn suggested_filename(title: &str) -> String {
    let safe: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let safe = safe.trim_end();

    if safe.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        format!("{}.mp4", safe)
    }
}
