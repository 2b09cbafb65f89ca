mod error;
mod model;

use std::fmt::{self, Display};
use std::sync::OnceLock;

use regex::Regex;

pub use error::PlatformError;
pub use model::{MediaKind, RetrievedItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    YouTube,
    TikTok,
    Instagram,
    Vk,
}

impl Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::YouTube => "YouTube",
            Self::TikTok => "TikTok",
            Self::Instagram => "Instagram",
            Self::Vk => "VK",
        };
        write!(f, "{}", name)
    }
}

/// Ordered pattern table. The patterns are disjoint by construction, so
/// order never decides the outcome; `classify_all` in the tests keeps it
/// that way.
fn platform_patterns() -> &'static [(Platform, Regex)] {
    static PATTERNS: OnceLock<Vec<(Platform, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (
                Platform::YouTube,
                r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/shorts/)[\w-]+",
            ),
            (
                Platform::TikTok,
                r"(?:tiktok\.com/@[\w.-]+/video/|vm\.tiktok\.com/)[\w-]+",
            ),
            (Platform::Instagram, r"instagram\.com/(?:p|reel)/[\w-]+"),
            (Platform::Vk, r"(?:vk\.com|vkvideo\.ru)/"),
        ]
        .into_iter()
        .map(|(platform, pattern)| {
            let regex = Regex::new(pattern).unwrap_or_else(|e| {
                // Patterns are compile-time constants, a bad one is a bug.
                panic!("invalid platform pattern {:?}: {}", pattern, e)
            });
            (platform, regex)
        })
        .collect()
    })
}

/// Maps a URL to its source platform. Pure and total: malformed input
/// simply matches nothing and yields `None`.
pub fn classify(url: &str) -> Option<Platform> {
    platform_patterns()
        .iter()
        .find(|(_, pattern)| pattern.is_match(url))
        .map(|(platform, _)| *platform)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_all(url: &str) -> Vec<Platform> {
        platform_patterns()
            .iter()
            .filter(|(_, pattern)| pattern.is_match(url))
            .map(|(platform, _)| *platform)
            .collect()
    }

    #[test]
    fn classifies_youtube_variants() {
        assert_eq!(
            classify("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some(Platform::YouTube)
        );
        assert_eq!(classify("https://youtu.be/abc123"), Some(Platform::YouTube));
        assert_eq!(classify("https://youtube.com/shorts/xyz-987"), Some(Platform::YouTube));
    }

    #[test]
    fn classifies_tiktok_variants() {
        assert_eq!(
            classify("https://www.tiktok.com/@some.user/video/7299881234567"),
            Some(Platform::TikTok)
        );
        assert_eq!(classify("https://vm.tiktok.com/ZMabcdef/"), Some(Platform::TikTok));
    }

    #[test]
    fn classifies_instagram_posts_and_reels() {
        assert_eq!(classify("https://instagram.com/p/Cxyz_123"), Some(Platform::Instagram));
        assert_eq!(
            classify("https://www.instagram.com/reel/DAbc-456/"),
            Some(Platform::Instagram)
        );
    }

    #[test]
    fn classifies_vk() {
        assert_eq!(classify("https://vk.com/video-12345_67890"), Some(Platform::Vk));
        assert_eq!(classify("https://vkvideo.ru/video123"), Some(Platform::Vk));
    }

    #[test]
    fn unknown_urls_yield_none() {
        assert_eq!(classify("https://example.com/cat.jpg"), None);
        assert_eq!(classify("not even a url"), None);
        assert_eq!(classify(""), None);
        // Profile pages are not downloadable posts.
        assert_eq!(classify("https://instagram.com/some_user"), None);
    }

    #[test]
    fn patterns_are_disjoint() {
        let corpus = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/abc123",
            "https://youtube.com/shorts/xyz",
            "https://www.tiktok.com/@user/video/123456",
            "https://vm.tiktok.com/ZMabcdef/",
            "https://instagram.com/p/Cxyz",
            "https://www.instagram.com/reel/DAbc/",
            "https://vk.com/video-1_2",
            "https://vkvideo.ru/video1",
            "https://example.com/",
        ];
        for url in corpus {
            assert!(classify_all(url).len() <= 1, "overlapping patterns for {}", url);
        }
    }
}
