use teloxide::prelude::*;
use teloxide::Bot;

use crate::commands;
use crate::config::AppConfig;
use crate::error::{BotResult, HandlerResult};
use crate::handlers::handler_tree;
use crate::utils::http;

pub struct BotService {
    pub bot: Bot,
}

impl BotService {
    pub fn new() -> BotResult<Self> {
        let config = AppConfig::get()?;

        let client = http::create_telegram_client();
        let bot = Bot::with_client(config.telegram.0.clone(), client);

        Ok(Self { bot })
    }

    pub async fn start(&self) -> HandlerResult<()> {
        info!("Testing connection to Telegram API...");
        match self.bot.get_me().await {
            Ok(_) => info!("Successfully connected to Telegram API"),
            Err(e) => {
                error!("Failed to connect to Telegram API: {:?}", e);
                return Err(anyhow::anyhow!("Failed to connect to Telegram API: {}", e).into());
            }
        }

        commands::setup_user_commands(&self.bot).await?;

        Dispatcher::builder(self.bot.clone(), handler_tree())
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}
