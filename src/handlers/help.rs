use teloxide::prelude::*;

use crate::error::HandlerResult;

pub async fn handle(bot: Bot, msg: Message) -> HandlerResult<()> {
    let help_text = "🔍 Send a link from YouTube, TikTok, Instagram or VK.\n\n\
        Commands:\n\
        /start - Start the bot\n\
        /help - Show this help message";

    bot.send_message(msg.chat.id, help_text).await?;

    Ok(())
}
