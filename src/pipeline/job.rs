//! Per-request download job lifecycle
//!
//! One `DownloadPipeline::run` call owns one scratch directory and drives it
//! through fetch video → fetch audio → merge. Every failure path removes the
//! scratch directory before the error propagates; the success path hands the
//! directory to the caller inside `FinishedDownload` so cleanup can wait
//! until the file has been transmitted.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::extractor::traits::MediaExtractor;
use crate::pipeline::fetcher::{fetch_stream, StreamKind};
use crate::pipeline::merger::Muxer;
use crate::utils::config::AppSettings;
use crate::utils::error::VidmuxError;
use crate::utils::format::{suggested_filename, FALLBACK_FILENAME};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// File name of the merged output inside the scratch directory
const OUTPUT_NAME: &str = "merged_video.mp4";

/// States a download job moves through
///
/// `Ready` and `Failed` are terminal; any earlier state can transition to
/// `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Created,
    FetchingVideo,
    FetchingAudio,
    Merging,
    Ready,
    Failed,
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JobState::Created => "created",
            JobState::FetchingVideo => "fetching_video",
            JobState::FetchingAudio => "fetching_audio",
            JobState::Merging => "merging",
            JobState::Ready => "ready",
            JobState::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Job-exclusive temporary directory
///
/// Created under the configured base with a unique name, so concurrent jobs
/// never share paths. `cleanup` is idempotent; dropping an uncleaned
/// `ScratchDir` removes the directory as well, covering panics and cancelled
/// futures.
pub struct ScratchDir {
    path: PathBuf,
    cleaned: bool,
}

impl ScratchDir {
    /// Create a fresh scratch directory under `base`
    pub async fn create(base: &Path) -> Result<Self, VidmuxError> {
        let path = base.join(format!("vidmux-job-{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&path).await?;
        debug!("Created scratch directory {}", path.display());
        Ok(Self {
            path,
            cleaned: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory and everything under it
    ///
    /// Removing an already-removed or never-created directory is not an
    /// error.
    pub async fn cleanup(&mut self) {
        if self.cleaned {
            return;
        }
        self.cleaned = true;

        match tokio::fs::remove_dir_all(&self.path).await {
            Ok(()) => debug!("Removed scratch directory {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                "Failed to remove scratch directory {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if self.cleaned {
            return;
        }
        if let Err(e) = std::fs::remove_dir_all(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(
                    "Failed to remove scratch directory {} on drop: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}

/// Terminal result of a successful download job
///
/// Carries the scratch directory it lives in; whoever holds this value owns
/// cleanup. Dropping it removes the directory, so a client disconnect during
/// transmission still reclaims the staging space.
pub struct FinishedDownload {
    pub output_path: PathBuf,
    pub filename: String,
    pub size: u64,
    scratch: ScratchDir,
}

impl FinishedDownload {
    /// Remove the scratch directory, including the output file
    pub async fn cleanup(mut self) {
        self.scratch.cleanup().await;
    }
}

/// Sequences fetch → fetch → merge for one URL at a time
///
/// Constructed once at startup and shared; each `run` call is an independent
/// job with its own scratch directory, so concurrent runs never touch the
/// same path.
pub struct DownloadPipeline {
    extractor: Arc<dyn MediaExtractor>,
    muxer: Arc<dyn Muxer>,
    settings: AppSettings,
}

impl DownloadPipeline {
    pub fn new(
        extractor: Arc<dyn MediaExtractor>,
        muxer: Arc<dyn Muxer>,
        settings: AppSettings,
    ) -> Self {
        Self {
            extractor,
            muxer,
            settings,
        }
    }

    /// Run one download-and-merge job
    ///
    /// On failure the scratch directory is removed before the error returns.
    /// On success the caller receives the output path plus its scratch guard
    /// and must invoke (or drop into) cleanup after transmitting the file.
    pub async fn run(&self, url: &str) -> Result<FinishedDownload, VidmuxError> {
        let mut scratch = ScratchDir::create(&self.settings.temp_dir).await?;
        let mut state = JobState::Created;
        info!("Job {} started for {}", scratch.path().display(), url);

        match self.drive(url, scratch.path(), &mut state).await {
            Ok((output_path, size)) => {
                // Independent of the pipeline stages: a failed title lookup
                // falls back and never invalidates the finished download
                let filename = self.suggest_filename(url).await;
                state = JobState::Ready;
                info!(
                    "Job reached {} ({} bytes, filename {:?})",
                    state, size, filename
                );
                Ok(FinishedDownload {
                    output_path,
                    filename,
                    size,
                    scratch,
                })
            }
            Err(e) => {
                warn!("Job failed during {}: {}", state, e);
                state = JobState::Failed;
                scratch.cleanup().await;
                debug!("Job reached {}", state);
                Err(e)
            }
        }
    }

    /// The fetch → fetch → merge sequence
    ///
    /// Stages are strictly sequential: the audio fetch only starts after the
    /// video fetch succeeded, and the merge needs both inputs complete.
    async fn drive(
        &self,
        url: &str,
        dir: &Path,
        state: &mut JobState,
    ) -> Result<(PathBuf, u64), VidmuxError> {
        *state = JobState::FetchingVideo;
        let video = fetch_stream(self.extractor.as_ref(), url, StreamKind::Video, dir).await?;

        *state = JobState::FetchingAudio;
        let audio = fetch_stream(self.extractor.as_ref(), url, StreamKind::Audio, dir).await?;

        *state = JobState::Merging;
        let output = dir.join(OUTPUT_NAME);
        self.muxer.mux(&video, &audio, &output).await?;

        // The elementary streams are no longer needed once merged
        remove_staging(&[video, audio]).await;

        let size = tokio::fs::metadata(&output).await?.len();
        Ok((output, size))
    }

    /// Compute the suggested client-facing filename
    ///
    /// Never fails: a metadata error or unusable title degrades to the fixed
    /// fallback name.
    async fn suggest_filename(&self, url: &str) -> String {
        match self.extractor.extract_info(url).await {
            Ok(info) => suggested_filename(info.title.as_deref().unwrap_or_default()),
            Err(e) => {
                debug!("Filename lookup failed ({}), using fallback", e);
                FALLBACK_FILENAME.to_string()
            }
        }
    }
}

/// Remove staging files, warning instead of failing
async fn remove_staging(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = tokio::fs::remove_file(path).await {
            warn!("Failed to remove staging file {}: {}", path.display(), e);
        } else {
            debug!("Removed staging file {}", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_scratch_dirs_are_unique() {
        let base = TempDir::new().unwrap();
        let a = ScratchDir::create(base.path()).await.unwrap();
        let b = ScratchDir::create(base.path()).await.unwrap();

        assert_ne!(a.path(), b.path());
        assert!(a.path().is_dir());
        assert!(b.path().is_dir());
    }

    #[tokio::test]
    async fn test_cleanup_removes_contents() {
        let base = TempDir::new().unwrap();
        let mut scratch = ScratchDir::create(base.path()).await.unwrap();
        let inner = scratch.path().join("file.bin");
        tokio::fs::write(&inner, b"data").await.unwrap();

        scratch.cleanup().await;

        assert!(!inner.exists());
    }

    #[tokio::test]
    async fn test_cleanup_is_idempotent() {
        let base = TempDir::new().unwrap();
        let mut scratch = ScratchDir::create(base.path()).await.unwrap();

        scratch.cleanup().await;
        // Second call must be a no-op, not an error
        scratch.cleanup().await;
    }

    #[tokio::test]
    async fn test_drop_removes_uncleaned_directory() {
        let base = TempDir::new().unwrap();
        let path = {
            let scratch = ScratchDir::create(base.path()).await.unwrap();
            scratch.path().to_path_buf()
        };

        assert!(!path.exists(), "dropped scratch dir should be removed");
    }

    #[tokio::test]
    async fn test_cleanup_tolerates_already_deleted_directory() {
        let base = TempDir::new().unwrap();
        let mut scratch = ScratchDir::create(base.path()).await.unwrap();
        tokio::fs::remove_dir_all(scratch.path()).await.unwrap();

        scratch.cleanup().await;
    }

    #[test]
    fn test_job_state_names() {
        assert_eq!(JobState::FetchingVideo.to_string(), "fetching_video");
        assert_eq!(JobState::Ready.to_string(), "ready");
        assert_eq!(JobState::Failed.to_string(), "failed");
    }
}
