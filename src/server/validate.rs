//! Request URL validation
//!
//! Shape checks only: the URL must be http(s) and point at a recognized
//! video-page host. Whether the page actually resolves to a video is the
//! extractor's call.

use crate::utils::error::VidmuxError;
use url::Url;

/// Hosts recognized as single-video pages
const VIDEO_HOSTS: &[&str] = &["youtube.com", "youtu.be", "youtube-nocookie.com"];

/// Validate the shape of a requested video URL
pub fn validate_video_url(raw: &str) -> Result<Url, VidmuxError> {
    let url = Url::parse(raw).map_err(|_| VidmuxError::InvalidUrl)?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(VidmuxError::InvalidUrl);
    }

    let host = url.host_str().ok_or(VidmuxError::InvalidUrl)?;
    let recognized = VIDEO_HOSTS
        .iter()
        .any(|known| host == *known || host.ends_with(&format!(".{}", known)));

    if recognized {
        Ok(url)
    } else {
        Err(VidmuxError::InvalidUrl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_canonical_watch_urls() {
        assert!(validate_video_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ").is_ok());
        assert!(validate_video_url("https://youtube.com/watch?v=dQw4w9WgXcQ").is_ok());
        assert!(validate_video_url("https://m.youtube.com/watch?v=dQw4w9WgXcQ").is_ok());
        assert!(validate_video_url("http://youtube.com/watch?v=abc").is_ok());
    }

    #[test]
    fn test_accepts_short_urls() {
        assert!(validate_video_url("https://youtu.be/dQw4w9WgXcQ").is_ok());
    }

    #[test]
    fn test_rejects_other_hosts() {
        assert!(validate_video_url("https://example.com/watch?v=abc").is_err());
        assert!(validate_video_url("https://notyoutube.com/watch?v=abc").is_err());
        // Suffix match must not be fooled by lookalike domains
        assert!(validate_video_url("https://evilyoutube.com/watch?v=abc").is_err());
    }

    #[test]
    fn test_rejects_non_http_schemes() {
        assert!(validate_video_url("ftp://youtube.com/watch?v=abc").is_err());
        assert!(validate_video_url("file:///etc/passwd").is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(validate_video_url("").is_err());
        assert!(validate_video_url("not a url").is_err());
        assert!(validate_video_url("youtube.com/watch?v=abc").is_err());
    }
}
