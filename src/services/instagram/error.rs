use thiserror::Error;

use crate::platform::PlatformError;

#[derive(Debug, Error)]
pub enum SocialError {
    #[error("Login required: {0}")]
    LoginRequired(String),

    #[error("Media unavailable: {0}")]
    MediaUnavailable(String),

    #[error("Instagram API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SocialError> for PlatformError {
    fn from(error: SocialError) -> Self {
        match error {
            SocialError::LoginRequired(msg) => PlatformError::AuthenticationFailed(msg),
            SocialError::MediaUnavailable(msg) => PlatformError::MediaUnavailable(msg),
            other => PlatformError::MediaUnavailable(other.to_string()),
        }
    }
}
