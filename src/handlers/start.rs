use teloxide::prelude::*;

use crate::error::HandlerResult;

pub async fn handle(bot: Bot, msg: Message) -> HandlerResult<()> {
    let welcome_text = format!(
        "👋 Hi {}!\n\n\
        Send me a link from YouTube, TikTok, Instagram or VK \
        and I will download the media and send it back to you.\n\n\
        Use /help to see available commands.",
        msg.from.map(|user| user.first_name.clone()).unwrap_or_default()
    );

    bot.send_message(msg.chat.id, welcome_text).await?;

    Ok(())
}
