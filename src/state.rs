use std::sync::OnceLock;

use crate::config::AppConfig;
use crate::error::{BotError, BotResult};
use crate::services::extractor::DownloadService;
use crate::services::instagram::InstagramService;

static APP_STATE: OnceLock<AppState> = OnceLock::new();

pub struct AppState {
    pub download: DownloadService,
    pub instagram: InstagramService,
}

impl AppState {
    /// Builds the services from the global config and installs the state.
    pub fn init() -> BotResult<()> {
        let config = AppConfig::get()?;

        let state = AppState {
            download: DownloadService::new(&config.download.dir),
            instagram: InstagramService::new(config.instagram.clone(), config.download.dir.clone()),
        };

        Self::set_global(state)
    }

    pub fn set_global(state: AppState) -> BotResult<()> {
        APP_STATE
            .set(state)
            .map_err(|_| BotError::AppState("Failed to set global app state".to_string()))
    }

    pub fn get() -> BotResult<&'static AppState> {
        APP_STATE
            .get()
            .ok_or_else(|| BotError::AppState("App state not initialized".to_string()))
    }
}
