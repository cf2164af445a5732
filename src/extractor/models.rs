//! Data structures for raw extractor output
//!
//! Mirrors the JSON yt-dlp emits from `--dump-json`. Every field the service
//! does not strictly need is optional or defaulted, so a partial record from
//! an unusual page never fails the parse.

use serde::{Deserialize, Serialize};

/// Raw video record as reported by the extractor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawVideoInfo {
    pub title: Option<String>,
    #[serde(default)]
    pub duration: Option<u64>,
    pub uploader: Option<String>,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub webpage_url: Option<String>,
    /// Primary thumbnail designated by the extractor
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub thumbnails: Vec<RawThumbnail>,
    #[serde(default)]
    pub formats: Vec<RawFormat>,
}

/// One entry of the extractor's thumbnail list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawThumbnail {
    pub url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// One entry of the extractor's format list
///
/// Storyboard and audio-only entries carry no height; they are skipped when
/// deriving quality labels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFormat {
    pub format_id: Option<String>,
    pub ext: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    #[serde(default)]
    pub filesize: Option<u64>,
    pub vcodec: Option<String>,
    pub acodec: Option<String>,
}
