//! Error handling for vidmux

use crate::pipeline::StreamKind;
use thiserror::Error;

/// Main error type for vidmux
///
/// Every failure a request can hit maps to exactly one variant, so the
/// serving layer can translate errors into HTTP statuses without string
/// matching. External-tool diagnostics (yt-dlp/ffmpeg stderr) ride along in
/// the variant payload for logging and are never sent to clients verbatim.
#[derive(Debug, Error)]
pub enum VidmuxError {
    #[error("invalid or unsupported video URL")]
    InvalidUrl,

    #[error("failed to extract video metadata: {0}")]
    MetadataUnavailable(String),

    #[error("{0} stream missing after extraction")]
    StreamNotFound(StreamKind),

    #[error("{0} stream was downloaded but is empty")]
    StreamEmpty(StreamKind),

    #[error("stream extraction failed: {0}")]
    ExtractionError(String),

    #[error("failed to merge video and audio: {0}")]
    MergeFailed(String),

    #[error("merged file is {size} bytes, exceeds the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("output file not found")]
    NotFound,

    #[error("{0} not found. Please install it or pass an explicit path")]
    ToolNotFound(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
