//! Single-stream fetching with post-download validation
//!
//! Pulls one elementary stream (video-only or audio-only) into a job's
//! scratch directory and verifies the result exists and is non-empty. Retry
//! policy, if any, belongs to the caller.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::extractor::traits::MediaExtractor;
use crate::utils::error::VidmuxError;
use tracing::debug;

/// Which elementary stream to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Video,
    Audio,
}

impl StreamKind {
    /// Quality-selector expression passed to the extractor
    ///
    /// Prefers the interoperable container (mp4 video, m4a audio) and falls
    /// back to the best available stream of the same kind.
    pub fn selector(&self) -> &'static str {
        match self {
            StreamKind::Video => "bestvideo[ext=mp4]/bestvideo",
            StreamKind::Audio => "bestaudio[ext=m4a]/bestaudio",
        }
    }

    /// Deterministic staging file name inside the scratch directory
    pub fn staging_name(&self) -> &'static str {
        match self {
            StreamKind::Video => "video.mp4",
            StreamKind::Audio => "audio.m4a",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Video => write!(f, "video"),
            StreamKind::Audio => write!(f, "audio"),
        }
    }
}

/// Fetch one stream into `dir` and validate the result
///
/// Returns the path of the downloaded file. Fails with `StreamNotFound` if
/// the extractor reported success but wrote nothing, and `StreamEmpty` if the
/// file exists with zero bytes.
pub async fn fetch_stream(
    extractor: &dyn MediaExtractor,
    url: &str,
    kind: StreamKind,
    dir: &Path,
) -> Result<PathBuf, VidmuxError> {
    let dest = dir.join(kind.staging_name());

    debug!("Fetching {} stream for {} into {}", kind, url, dest.display());
    extractor.fetch_stream(url, kind.selector(), &dest).await?;

    let metadata = match tokio::fs::metadata(&dest).await {
        Ok(meta) => meta,
        Err(_) => return Err(VidmuxError::StreamNotFound(kind)),
    };
    if metadata.len() == 0 {
        return Err(VidmuxError::StreamEmpty(kind));
    }

    debug!("Fetched {} stream ({} bytes)", kind, metadata.len());
    Ok(dest)
}
