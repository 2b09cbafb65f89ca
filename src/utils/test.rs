use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::config::{AppConfig, DownloadConfig, InstagramConfig, TelegramConfig};
use crate::services::extractor::{DownloadService, ExtractorError, VideoExtractor};
use crate::services::instagram::{
    InstagramService, MediaDescriptor, MediaResource, ResourceKind, SocialClient, SocialError,
};
use crate::state::AppState;

/// Paths written by the stub downloaders, so tests can assert they are
/// removed again after relaying.
pub static EXTRACTED_FILES: Mutex<Vec<PathBuf>> = Mutex::new(Vec::new());
pub static CAROUSEL_FILES: Mutex<Vec<PathBuf>> = Mutex::new(Vec::new());
pub static CAROUSEL_LOGOUTS: AtomicU32 = AtomicU32::new(0);

fn test_downloads_dir() -> PathBuf {
    std::env::temp_dir().join(format!("mediagrab-e2e-{}", std::process::id()))
}

fn test_credentials() -> InstagramConfig {
    InstagramConfig {
        username: "user".to_string(),
        password: "pass".to_string(),
    }
}

/// Common test setup: installs a config and an `AppState` whose services
/// write real files into a temp downloads directory instead of hitting
/// the network. Safe to call from every test; only the first call wins.
pub fn setup_test_state() {
    let _ = AppConfig::set_global(AppConfig {
        telegram: TelegramConfig("1234567890:TESTTOKEN".to_string()),
        instagram: test_credentials(),
        download: DownloadConfig {
            dir: test_downloads_dir(),
        },
    });

    if AppState::get().is_err() {
        let state = AppState {
            download: DownloadService::with_extractor(
                Arc::new(StubExtractor {
                    counter: AtomicU32::new(0),
                }),
                Duration::ZERO,
            ),
            instagram: InstagramService::with_client(
                Box::new(StubSocialClient {
                    authenticated: false,
                    counter: AtomicU32::new(0),
                }),
                test_credentials(),
                test_downloads_dir(),
            ),
        };
        let _ = AppState::set_global(state);
    }
}

struct StubExtractor {
    counter: AtomicU32,
}

#[async_trait]
impl VideoExtractor for StubExtractor {
    async fn extract(&self, _url: &str) -> Result<PathBuf, ExtractorError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let path = test_downloads_dir().join(format!("video-{}.mp4", n));
        tokio::fs::write(&path, b"video").await?;
        EXTRACTED_FILES.lock().unwrap().push(path.clone());
        Ok(path)
    }
}

/// Serves a fixed two-item carousel (photo, then video) and counts
/// logouts.
struct StubSocialClient {
    authenticated: bool,
    counter: AtomicU32,
}

impl StubSocialClient {
    async fn write_asset(
        &self,
        resource: &MediaResource,
        folder: &Path,
        extension: &str,
    ) -> Result<PathBuf, SocialError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let path = folder.join(format!("carousel-{}-{}.{}", resource.id, n, extension));
        tokio::fs::write(&path, b"asset").await?;
        CAROUSEL_FILES.lock().unwrap().push(path.clone());
        Ok(path)
    }
}

#[async_trait]
impl SocialClient for StubSocialClient {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    async fn login(&mut self, _username: &str, _password: &str) -> Result<(), SocialError> {
        self.authenticated = true;
        Ok(())
    }

    async fn logout(&mut self) -> Result<(), SocialError> {
        CAROUSEL_LOGOUTS.fetch_add(1, Ordering::SeqCst);
        self.authenticated = false;
        Ok(())
    }

    async fn resolve_media_id(&self, _url: &str) -> Result<String, SocialError> {
        Ok("xyz".to_string())
    }

    async fn media_info(&self, id: &str) -> Result<MediaDescriptor, SocialError> {
        let photo = MediaResource {
            id: "1".to_string(),
            kind: ResourceKind::Photo,
            url: Url::parse("https://cdn.example.com/a.jpg").unwrap(),
        };
        let video = MediaResource {
            id: "2".to_string(),
            kind: ResourceKind::Video,
            url: Url::parse("https://cdn.example.com/b.mp4").unwrap(),
        };

        Ok(MediaDescriptor {
            id: id.to_string(),
            kind: ResourceKind::Photo,
            url: photo.url.clone(),
            resources: vec![photo, video],
        })
    }

    async fn download_photo(
        &self,
        resource: &MediaResource,
        folder: &Path,
    ) -> Result<PathBuf, SocialError> {
        self.write_asset(resource, folder, "jpg").await
    }

    async fn download_video(
        &self,
        resource: &MediaResource,
        folder: &Path,
    ) -> Result<PathBuf, SocialError> {
        self.write_asset(resource, folder, "mp4").await
    }
}
