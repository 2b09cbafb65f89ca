use std::path::PathBuf;
use std::sync::OnceLock;

use thiserror::Error;

use crate::error::{BotError, BotResult};

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingKey(&'static str),
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub telegram: TelegramConfig,
    pub instagram: InstagramConfig,
    pub download: DownloadConfig,
}

#[derive(Clone, Debug)]
pub struct TelegramConfig(pub String);

#[derive(Clone, Debug)]
pub struct InstagramConfig {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug)]
pub struct DownloadConfig {
    pub dir: PathBuf,
}

impl AppConfig {
    pub fn set_global(config: AppConfig) -> BotResult<()> {
        APP_CONFIG
            .set(config)
            .map_err(|_| BotError::AppState("Failed to set global app config".to_string()))
    }

    pub fn get() -> BotResult<&'static AppConfig> {
        APP_CONFIG
            .get()
            .ok_or_else(|| BotError::AppState("App config not initialized".to_string()))
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingKey(key))
}

pub fn build_config() -> BotResult<AppConfig> {
    info!("Building AppConfig...");

    let config = AppConfig {
        telegram: TelegramConfig(required("TELEGRAM_BOT_TOKEN")?),
        instagram: InstagramConfig {
            username: required("INSTAGRAM_USERNAME")?,
            password: required("INSTAGRAM_PASSWORD")?,
        },
        download: DownloadConfig {
            dir: std::env::var("DOWNLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("downloads")),
        },
    };

    info!("AppConfig built");

    Ok(config)
}
