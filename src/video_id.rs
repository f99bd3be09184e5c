//! YouTube video id extraction.

use regex::Regex;
use std::sync::LazyLock;

static DEFAULT_EXTRACTOR: LazyLock<VideoIdExtractor> = LazyLock::new(VideoIdExtractor::new);

/// Extracts video ids from YouTube URLs.
///
/// Patterns are tried in order and must match from the start of the input.
pub struct VideoIdExtractor {
    patterns: Vec<Regex>,
}

impl VideoIdExtractor {
    pub fn new() -> Self {
        let patterns = [
            r"^(?:https?://)?(?:www\.)?youtube\.com/watch\?v=([a-zA-Z0-9_-]+)",
            r"^(?:https?://)?(?:www\.)?youtube\.com/embed/([a-zA-Z0-9_-]+)",
            r"^(?:https?://)?(?:www\.)?youtu\.be/([a-zA-Z0-9_-]+)",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("Invalid regex"))
        .collect();

        Self { patterns }
    }

    /// Return the id captured by the first matching pattern.
    pub fn extract(&self, url: &str) -> Option<String> {
        self.patterns
            .iter()
            .find_map(|re| re.captures(url))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

impl Default for VideoIdExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract a video id using the shared extractor.
pub fn extract_video_id(url: &str) -> Option<String> {
    DEFAULT_EXTRACTOR.extract(url)
}

/// Thumbnail image URL for a video id.
pub fn thumbnail_url(video_id: &str) -> String {
    format!("http://img.youtube.com/vi/{}/0.jpg", video_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_urls() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "http://youtube.com/watch?v=dQw4w9WgXcQ",
            "www.youtube.com/watch?v=dQw4w9WgXcQ",
            "youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
        ] {
            assert_eq!(extract_video_id(url), Some("dQw4w9WgXcQ".to_string()), "{}", url);
        }
    }

    #[test]
    fn test_embed_urls() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/abc_DEF-123"),
            Some("abc_DEF-123".to_string())
        );
        assert_eq!(
            extract_video_id("youtube.com/embed/xyz"),
            Some("xyz".to_string())
        );
    }

    #[test]
    fn test_short_links() {
        assert_eq!(
            extract_video_id("https://youtu.be/abc123"),
            Some("abc123".to_string())
        );
        assert_eq!(
            extract_video_id("youtu.be/wXVvfFMTyzY?feature=shared"),
            Some("wXVvfFMTyzY".to_string())
        );
        assert_eq!(
            extract_video_id("http://www.youtu.be/5_EJwYeQusM"),
            Some("5_EJwYeQusM".to_string())
        );
    }

    #[test]
    fn test_non_matching_inputs() {
        for url in [
            "",
            "dQw4w9WgXcQ",
            "https://vimeo.com/12345",
            "https://www.youtube.com/playlist?list=PLtest",
            "https://youtube.com/shorts/abc123",
            "see https://youtu.be/abc123",
            "https://youtube.com/watch?v=",
        ] {
            assert_eq!(extract_video_id(url), None, "{}", url);
        }
    }

    #[test]
    fn test_extractor_is_deterministic() {
        let extractor = VideoIdExtractor::new();
        let url = "https://youtu.be/abc123";
        assert_eq!(extractor.extract(url), extractor.extract(url));
    }

    #[test]
    fn test_thumbnail_url() {
        assert_eq!(thumbnail_url("abc123"), "http://img.youtube.com/vi/abc123/0.jpg");
    }
}
