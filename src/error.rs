use crate::config::ConfigError;
use crate::platform::PlatformError;

#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("App state error: {0}")]
    AppState(String),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Telegram request error: {0}")]
    Request(#[from] teloxide::RequestError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BotError {
    /// Short human-readable cause shown to the user when a request fails.
    /// Internal detail stays in the logs.
    pub fn user_message(&self) -> String {
        match self {
            BotError::Platform(e) => e.to_string(),
            _ => "Something went wrong, please try again later.".to_string(),
        }
    }
}

pub type BotResult<T> = Result<T, BotError>;

pub type HandlerResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;
