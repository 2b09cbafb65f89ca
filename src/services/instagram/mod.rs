mod client;
mod error;
mod types;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::config::InstagramConfig;
use crate::platform::{PlatformError, RetrievedItem};

pub use client::InstagramClient;
pub use error::SocialError;
pub use types::{MediaDescriptor, MediaResource, ResourceKind};

/// Seam to the external social client: authentication, media resolution
/// and per-resource downloads.
#[async_trait]
pub trait SocialClient: Send + Sync {
    fn is_authenticated(&self) -> bool;

    async fn login(&mut self, username: &str, password: &str) -> Result<(), SocialError>;

    async fn logout(&mut self) -> Result<(), SocialError>;

    async fn resolve_media_id(&self, url: &str) -> Result<String, SocialError>;

    async fn media_info(&self, id: &str) -> Result<MediaDescriptor, SocialError>;

    async fn download_photo(&self, resource: &MediaResource, folder: &Path)
        -> Result<PathBuf, SocialError>;

    async fn download_video(&self, resource: &MediaResource, folder: &Path)
        -> Result<PathBuf, SocialError>;
}

/// Carousel retrieval strategy. The session is shared process-wide but
/// scoped to one request at a time: the mutex serializes concurrent
/// carousel requests, and logout runs exactly once per request whatever
/// the outcome.
#[derive(Clone)]
pub struct InstagramService {
    session: Arc<Mutex<Box<dyn SocialClient>>>,
    credentials: InstagramConfig,
    downloads_dir: PathBuf,
}

impl InstagramService {
    pub fn new(credentials: InstagramConfig, downloads_dir: PathBuf) -> Self {
        Self::with_client(Box::new(InstagramClient::new()), credentials, downloads_dir)
    }

    pub fn with_client(
        client: Box<dyn SocialClient>,
        credentials: InstagramConfig,
        downloads_dir: PathBuf,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(client)),
            credentials,
            downloads_dir,
        }
    }

    /// Fetches every photo and video of a post, in native order. Single
    /// posts come back as a one-element sequence.
    pub async fn fetch_carousel(&self, url: &str) -> Result<Vec<RetrievedItem>, PlatformError> {
        let mut client = self.session.lock().await;

        let result = self.fetch_inner(&mut **client, url).await;

        // Mandatory per-request cleanup: the session never outlives the
        // request, even when the fetch failed half-way.
        if let Err(e) = client.logout().await {
            warn!("Instagram logout failed: {}", e);
        }

        result
    }

    async fn fetch_inner(
        &self,
        client: &mut dyn SocialClient,
        url: &str,
    ) -> Result<Vec<RetrievedItem>, PlatformError> {
        if !client.is_authenticated() {
            client
                .login(&self.credentials.username, &self.credentials.password)
                .await
                .map_err(|e| PlatformError::AuthenticationFailed(e.to_string()))?;
        }

        let media_id = client.resolve_media_id(url).await?;
        let descriptor = client.media_info(&media_id).await?;

        let mut items = Vec::new();
        for resource in descriptor.into_resources() {
            match resource.kind {
                ResourceKind::Photo => {
                    let path = client.download_photo(&resource, &self.downloads_dir).await?;
                    items.push(RetrievedItem::photo(path));
                }
                ResourceKind::Video => {
                    let path = client.download_video(&resource, &self.downloads_dir).await?;
                    items.push(RetrievedItem::video(path));
                }
                ResourceKind::Other(ref kind) => {
                    info!("Skipping unsupported resource type {} in {}", kind, media_id);
                }
            }
        }

        Ok(items)
    }
}
