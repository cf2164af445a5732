//! Vidmux - video download-and-merge API server
//!
//! Accepts a video-page URL and serves either a metadata preview or a fully
//! merged mp4, fetching video and audio streams separately via yt-dlp and
//! muxing them with ffmpeg.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use vidmux::extractor::{MediaExtractor, YtDlpExtractor};
use vidmux::info::VideoInfoService;
use vidmux::pipeline::{DownloadPipeline, FfmpegMuxer, Muxer};
use vidmux::server::{self, AppState};
use vidmux::utils::AppSettings;

#[derive(Parser)]
#[command(name = "vidmux", about = "Video download-and-merge API server")]
struct Args {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "0.0.0.0:8000")]
    bind: SocketAddr,

    /// Base directory for per-job scratch directories (defaults to the
    /// system temp dir)
    #[arg(long)]
    temp_dir: Option<PathBuf>,

    /// Maximum merged file size in bytes
    #[arg(long)]
    max_file_size: Option<u64>,

    /// Maximum number of concurrent download jobs
    #[arg(long)]
    max_jobs: Option<usize>,

    /// Explicit path to the yt-dlp binary
    #[arg(long)]
    ytdlp_path: Option<PathBuf>,

    /// Explicit path to the ffmpeg binary
    #[arg(long)]
    ffmpeg_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut settings = AppSettings {
        bind_addr: args.bind,
        ..AppSettings::default()
    };
    if let Some(dir) = args.temp_dir {
        settings.temp_dir = dir;
    }
    if let Some(size) = args.max_file_size {
        settings.max_file_size = size;
    }
    if let Some(jobs) = args.max_jobs {
        settings.max_concurrent_jobs = jobs;
    }
    let settings = settings.normalized();

    // Both external tools must be available before requests are accepted
    let extractor: Arc<dyn MediaExtractor> = Arc::new(YtDlpExtractor::new(args.ytdlp_path)?);
    let muxer: Arc<dyn Muxer> = Arc::new(FfmpegMuxer::new(args.ffmpeg_path)?);

    let info_service = VideoInfoService::new(extractor.clone());
    let pipeline = DownloadPipeline::new(extractor, muxer, settings.clone());

    server::run(AppState::new(settings, info_service, pipeline)).await
}
