//! Vidmux library

pub mod extractor;
pub mod info;
pub mod pipeline;
pub mod server;
pub mod utils;

// Re-export main types for easier use
pub use extractor::{MediaExtractor, RawVideoInfo, YtDlpExtractor};
pub use info::{VideoInfo, VideoInfoService};
pub use pipeline::{DownloadPipeline, FfmpegMuxer, FinishedDownload, Muxer, ScratchDir, StreamKind};
pub use utils::{AppSettings, VidmuxError};
