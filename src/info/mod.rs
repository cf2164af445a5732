//! Read-only metadata path
//!
//! Turns one extractor metadata call into the display-ready `VideoInfo`
//! record. Nothing is downloaded and nothing is cached; every request gets a
//! fresh lookup.

use std::sync::Arc;

use crate::extractor::models::{RawThumbnail, RawVideoInfo};
use crate::extractor::traits::MediaExtractor;
use crate::utils::error::VidmuxError;
use crate::utils::format::{format_duration, quality_labels};
use serde::Serialize;
use tracing::debug;

/// Display-ready video metadata
#[derive(Debug, Clone, Serialize)]
pub struct VideoInfo {
    pub title: String,
    pub thumbnail: Option<String>,
    /// Formatted as HH:MM:SS / MM:SS, or "Unknown"
    pub duration: String,
    pub duration_seconds: u64,
    /// Available quality labels, highest first
    pub formats: Vec<String>,
    pub uploader: String,
    pub view_count: u64,
    pub like_count: u64,
    pub webpage_url: String,
}

/// Metadata-only lookup service
pub struct VideoInfoService {
    extractor: Arc<dyn MediaExtractor>,
}

impl VideoInfoService {
    pub fn new(extractor: Arc<dyn MediaExtractor>) -> Self {
        Self { extractor }
    }

    /// Fetch metadata for `url` without downloading anything
    pub async fn fetch(&self, url: &str) -> Result<VideoInfo, VidmuxError> {
        debug!("Fetching video info for {}", url);
        let raw = self.extractor.extract_info(url).await?;
        Ok(build_video_info(raw, url))
    }
}

/// Map raw extractor output onto the display record
///
/// Absent fields degrade to neutral defaults rather than failing; a page
/// with no view counter is still previewable.
fn build_video_info(raw: RawVideoInfo, requested_url: &str) -> VideoInfo {
    let heights = raw.formats.iter().filter_map(|f| f.height);

    VideoInfo {
        title: raw
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Unknown Title".to_string()),
        thumbnail: best_thumbnail(&raw.thumbnails, raw.thumbnail),
        duration: format_duration(raw.duration),
        duration_seconds: raw.duration.unwrap_or(0),
        formats: quality_labels(heights),
        uploader: raw.uploader.unwrap_or_else(|| "Unknown".to_string()),
        view_count: raw.view_count.unwrap_or(0),
        like_count: raw.like_count.unwrap_or(0),
        webpage_url: raw
            .webpage_url
            .unwrap_or_else(|| requested_url.to_string()),
    }
}

/// Pick the highest-resolution thumbnail
///
/// Largest pixel area among entries with known dimensions wins; otherwise
/// the extractor's designated primary, then the first listed entry.
fn best_thumbnail(thumbnails: &[RawThumbnail], primary: Option<String>) -> Option<String> {
    let largest = thumbnails
        .iter()
        .filter_map(|t| {
            let area = t.width? as u64 * t.height? as u64;
            t.url.as_ref().map(|url| (area, url))
        })
        .max_by_key(|(area, _)| *area)
        .map(|(_, url)| url.clone());

    largest
        .or(primary)
        .or_else(|| thumbnails.iter().find_map(|t| t.url.clone()))
}
