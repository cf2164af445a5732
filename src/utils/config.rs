//! Service configuration

use std::net::SocketAddr;
use std::path::PathBuf;

/// Service settings
///
/// Constructed once at startup and cloned into the serving state. There is
/// no global instance; every pipeline run receives its configuration
/// explicitly.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,

    /// Base directory for per-job scratch directories
    pub temp_dir: PathBuf,

    /// Maximum size of a merged output file (bytes)
    pub max_file_size: u64,

    /// Maximum number of download jobs running at once
    pub max_concurrent_jobs: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            bind_addr: ([0, 0, 0, 0], 8000).into(),
            temp_dir: std::env::temp_dir(),
            max_file_size: 2 * 1024 * 1024 * 1024, // 2 GiB
            max_concurrent_jobs: 4,
        }
    }
}

impl AppSettings {
    /// Clamp settings to usable minimums
    pub fn normalized(mut self) -> Self {
        if self.max_concurrent_jobs == 0 {
            self.max_concurrent_jobs = 1;
        }
        if self.max_file_size == 0 {
            self.max_file_size = 1;
        }
        self
    }
}
