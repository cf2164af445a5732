//! Download-and-merge pipeline

pub mod fetcher;
pub mod job;
pub mod merger;

// Re-export for convenience
pub use fetcher::StreamKind;
pub use job::{DownloadPipeline, FinishedDownload, JobState, ScratchDir};
pub use merger::{FfmpegMuxer, Muxer};
