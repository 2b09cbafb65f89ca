use thiserror::Error;

use super::Platform;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Failed to download from {platform}: {cause}")]
    Extraction { platform: Platform, cause: String },

    #[error("Instagram login failed: {0}")]
    AuthenticationFailed(String),

    #[error("Media unavailable: {0}")]
    MediaUnavailable(String),
}
