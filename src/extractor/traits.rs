use std::path::Path;

use crate::extractor::models::RawVideoInfo;
use crate::utils::error::VidmuxError;
use async_trait::async_trait;

/// Core trait for media extraction backends
///
/// This trait isolates the pipeline from the specific extraction tool
/// (yt-dlp today, anything else tomorrow) and is the seam tests use to
/// inject fakes.
#[async_trait]
pub trait MediaExtractor: Send + Sync {
    /// Extract video metadata without downloading anything
    async fn extract_info(&self, url: &str) -> Result<RawVideoInfo, VidmuxError>;

    /// Download exactly one stream matching the selector expression to `dest`
    ///
    /// The selector is a quality-selector chain understood by the backend,
    /// e.g. `bestvideo[ext=mp4]/bestvideo`. The backend writes only `dest`;
    /// callers own any validation of the resulting file.
    async fn fetch_stream(
        &self,
        url: &str,
        selector: &str,
        dest: &Path,
    ) -> Result<(), VidmuxError>;
}
