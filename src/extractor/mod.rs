pub mod models;
pub mod traits;
pub mod ytdlp;

pub use models::{RawFormat, RawThumbnail, RawVideoInfo};
pub use traits::MediaExtractor;
pub use ytdlp::YtDlpExtractor;
