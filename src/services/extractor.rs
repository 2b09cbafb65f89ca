use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

use crate::platform::{Platform, PlatformError, RetrievedItem};

const MAX_ATTEMPTS: u32 = 3;
const RETRY_BACKOFF: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("Failed to run yt-dlp: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("{0}")]
    Extraction(String),
}

/// Seam to the external extraction engine: fetch one video by URL, write
/// it under the downloads directory, report the written path.
#[async_trait]
pub trait VideoExtractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<PathBuf, ExtractorError>;
}

/// Shells out to the `yt-dlp` binary. Files are named by the
/// source-assigned media id and its native extension, which keeps
/// concurrent requests from colliding in the shared downloads directory.
pub struct YtDlpExtractor {
    output_template: PathBuf,
}

impl YtDlpExtractor {
    pub fn new(downloads_dir: &Path) -> Self {
        Self {
            output_template: downloads_dir.join("%(id)s.%(ext)s"),
        }
    }
}

#[async_trait]
impl VideoExtractor for YtDlpExtractor {
    async fn extract(&self, url: &str) -> Result<PathBuf, ExtractorError> {
        let output = Command::new("yt-dlp")
            .arg("--output")
            .arg(&self.output_template)
            .arg("--format")
            .arg("best")
            .arg("--no-playlist")
            .arg("--no-warnings")
            .arg("--quiet")
            .arg("--print")
            .arg("after_move:filepath")
            .arg(url)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractorError::Extraction(stderr.trim().to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        match stdout.lines().rev().find(|line| !line.trim().is_empty()) {
            Some(path) => Ok(PathBuf::from(path.trim())),
            None => Err(ExtractorError::Extraction(
                "yt-dlp did not report an output file".to_string(),
            )),
        }
    }
}

/// Generic retrieval strategy for the yt-dlp platform family
/// (YouTube / TikTok / VK): one video per URL, retried with backoff.
#[derive(Clone)]
pub struct DownloadService {
    extractor: Arc<dyn VideoExtractor>,
    backoff: Duration,
}

impl DownloadService {
    pub fn new(downloads_dir: &Path) -> Self {
        Self::with_extractor(Arc::new(YtDlpExtractor::new(downloads_dir)), RETRY_BACKOFF)
    }

    pub fn with_extractor(extractor: Arc<dyn VideoExtractor>, backoff: Duration) -> Self {
        Self { extractor, backoff }
    }

    /// Downloads a single video, retrying up to three attempts with a
    /// fixed backoff in between. The final failure names the platform and
    /// the underlying cause; earlier failures are only warnings.
    pub async fn fetch_single(
        &self,
        url: &str,
        platform: Platform,
    ) -> Result<RetrievedItem, PlatformError> {
        let mut attempt = 1;
        loop {
            match self.extractor.extract(url).await {
                Ok(path) => return Ok(RetrievedItem::video(path)),
                Err(e) if attempt < MAX_ATTEMPTS => {
                    warn!("Attempt {} to download {} failed: {}", attempt, url, e);
                    tokio::time::sleep(self.backoff).await;
                    attempt += 1;
                }
                Err(e) => {
                    return Err(PlatformError::Extraction {
                        platform,
                        cause: e.to_string(),
                    })
                }
            }
        }
    }
}
