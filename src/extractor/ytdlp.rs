//! yt-dlp backed media extractor
//!
//! Invokes a system-installed yt-dlp binary for both metadata extraction
//! (`--dump-json --no-download`) and single-stream fetches (`-f <selector>`).

use std::path::{Path, PathBuf};

use crate::extractor::models::RawVideoInfo;
use crate::extractor::traits::MediaExtractor;
use crate::utils::error::VidmuxError;
use async_trait::async_trait;
use tokio::process::Command as AsyncCommand;
use tracing::{debug, error, info, warn};

/// Media extractor using yt-dlp
pub struct YtDlpExtractor {
    ytdlp_path: PathBuf,
}

impl YtDlpExtractor {
    /// Initialize the extractor and verify yt-dlp availability
    ///
    /// Search order:
    /// 1. Explicitly configured path
    /// 2. System PATH
    /// 3. Common installation paths (Homebrew, pip, etc.)
    pub fn new(explicit_path: Option<PathBuf>) -> Result<Self, VidmuxError> {
        if let Some(path) = explicit_path {
            if path.is_file() {
                info!("Using configured yt-dlp at: {}", path.display());
                return Ok(Self { ytdlp_path: path });
            }
            error!("Configured yt-dlp path does not exist: {}", path.display());
            return Err(VidmuxError::ToolNotFound("yt-dlp"));
        }

        match find_ytdlp() {
            Some(path) => {
                info!("Found yt-dlp at: {}", path.display());
                Ok(Self { ytdlp_path: path })
            }
            None => {
                error!("yt-dlp not found anywhere");
                Err(VidmuxError::ToolNotFound("yt-dlp"))
            }
        }
    }

    /// Get the path to the yt-dlp binary being used
    pub fn ytdlp_path(&self) -> &Path {
        &self.ytdlp_path
    }
}

#[async_trait]
impl MediaExtractor for YtDlpExtractor {
    /// Extract video metadata without downloading
    /// Uses: yt-dlp --dump-json --no-download
    async fn extract_info(&self, url: &str) -> Result<RawVideoInfo, VidmuxError> {
        debug!("Extracting video info for URL: {}", url);

        let output = AsyncCommand::new(&self.ytdlp_path)
            .arg("--dump-json")
            .arg("--no-download")
            .arg("--no-playlist")
            .arg("--no-warnings")
            .arg(url)
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            error!("yt-dlp metadata extraction failed: {}", error_msg);
            return Err(VidmuxError::MetadataUnavailable(
                error_msg.trim().to_string(),
            ));
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        let info: RawVideoInfo = serde_json::from_str(&json_str)
            .map_err(|e| VidmuxError::MetadataUnavailable(e.to_string()))?;

        Ok(info)
    }

    /// Download one stream matching the selector expression
    /// Uses: yt-dlp -f <selector> -o <dest>
    async fn fetch_stream(
        &self,
        url: &str,
        selector: &str,
        dest: &Path,
    ) -> Result<(), VidmuxError> {
        debug!(
            "Fetching stream '{}' from {} into {}",
            selector,
            url,
            dest.display()
        );

        let output = AsyncCommand::new(&self.ytdlp_path)
            .arg("-f")
            .arg(selector)
            .arg("-o")
            .arg(dest)
            .arg("--no-playlist")
            .arg("--no-warnings")
            .arg(url)
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            error!("yt-dlp stream fetch failed: {}", error_msg);
            return Err(VidmuxError::ExtractionError(error_msg.trim().to_string()));
        }

        Ok(())
    }
}

// ============================================================
// yt-dlp Detection Functions
// ============================================================

/// Find the yt-dlp binary on the system PATH or in common install locations
pub fn find_ytdlp() -> Option<PathBuf> {
    if let Ok(path) = which::which("yt-dlp") {
        if path.exists() {
            return Some(path);
        }
    }

    let common_paths = [
        // macOS Homebrew (Apple Silicon)
        "/opt/homebrew/bin/yt-dlp",
        // macOS Homebrew (Intel) / manual installs
        "/usr/local/bin/yt-dlp",
        // System package managers
        "/usr/bin/yt-dlp",
        // Python.org installation
        "/Library/Frameworks/Python.framework/Versions/Current/bin/yt-dlp",
    ];

    for path_str in common_paths {
        let path = PathBuf::from(path_str);
        if path.is_file() {
            return Some(path);
        }
    }

    warn!("yt-dlp not found in PATH or common locations");
    None
}

// ============================================================
// Tests
// ============================================================
