//! Muxing of separate video and audio streams into one container
//!
//! The video stream is copied verbatim (no re-encode); audio is re-encoded
//! to AAC, which every mp4 player handles regardless of what the source
//! platform served.

use std::path::{Path, PathBuf};

use crate::utils::error::VidmuxError;
use async_trait::async_trait;
use tokio::process::Command as AsyncCommand;
use tracing::{debug, error, info, warn};

/// Trait for combining a video file and an audio file into one container
///
/// Inputs must already exist and be non-empty; that is the caller's contract,
/// enforced by the stream fetcher. The output path is overwritten if present.
#[async_trait]
pub trait Muxer: Send + Sync {
    async fn mux(&self, video: &Path, audio: &Path, output: &Path) -> Result<(), VidmuxError>;
}

/// ffmpeg-backed muxer
pub struct FfmpegMuxer {
    ffmpeg_path: PathBuf,
}

impl FfmpegMuxer {
    /// Initialize the muxer and verify ffmpeg availability
    ///
    /// Search order mirrors the yt-dlp discovery chain: explicit path, then
    /// system PATH, then common installation paths.
    pub fn new(explicit_path: Option<PathBuf>) -> Result<Self, VidmuxError> {
        if let Some(path) = explicit_path {
            if path.is_file() {
                info!("Using configured ffmpeg at: {}", path.display());
                return Ok(Self { ffmpeg_path: path });
            }
            error!("Configured ffmpeg path does not exist: {}", path.display());
            return Err(VidmuxError::ToolNotFound("ffmpeg"));
        }

        match find_ffmpeg() {
            Some(path) => {
                info!("Found ffmpeg at: {}", path.display());
                Ok(Self { ffmpeg_path: path })
            }
            None => {
                error!("ffmpeg not found anywhere");
                Err(VidmuxError::ToolNotFound("ffmpeg"))
            }
        }
    }

    /// Get the path to the ffmpeg binary being used
    pub fn ffmpeg_path(&self) -> &Path {
        &self.ffmpeg_path
    }
}

#[async_trait]
impl Muxer for FfmpegMuxer {
    /// Merge `video` and `audio` into `output`
    /// Uses: ffmpeg -y -i video -i audio -c:v copy -c:a aac output
    async fn mux(&self, video: &Path, audio: &Path, output: &Path) -> Result<(), VidmuxError> {
        debug!(
            "Merging {} + {} into {}",
            video.display(),
            audio.display(),
            output.display()
        );

        // -y overwrites any stale output, so a half-written file from an
        // earlier attempt is never left ambiguous
        let result = AsyncCommand::new(&self.ffmpeg_path)
            .arg("-y")
            .arg("-i")
            .arg(video)
            .arg("-i")
            .arg(audio)
            .arg("-c:v")
            .arg("copy")
            .arg("-c:a")
            .arg("aac")
            .arg(output)
            .kill_on_drop(true)
            .output()
            .await?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            error!("ffmpeg merge failed: {}", stderr);
            return Err(VidmuxError::MergeFailed(stderr.trim().to_string()));
        }

        // ffmpeg can exit zero yet produce nothing useful on pathological input
        match tokio::fs::metadata(output).await {
            Ok(meta) if meta.len() > 0 => {
                info!("Merged output is {} bytes", meta.len());
                Ok(())
            }
            _ => Err(VidmuxError::MergeFailed(
                "merged output missing or empty".to_string(),
            )),
        }
    }
}

/// Find the ffmpeg binary on the system PATH or in common install locations
pub fn find_ffmpeg() -> Option<PathBuf> {
    if let Ok(path) = which::which("ffmpeg") {
        if path.exists() {
            return Some(path);
        }
    }

    let common_paths = [
        "/opt/homebrew/bin/ffmpeg",
        "/usr/local/bin/ffmpeg",
        "/usr/bin/ffmpeg",
    ];

    for path_str in common_paths {
        let path = PathBuf::from(path_str);
        if path.is_file() {
            return Some(path);
        }
    }

    warn!("ffmpeg not found in PATH or common locations");
    None
}
