use teloxide::{macros::BotCommands, types::Message, Bot};

use crate::error::HandlerResult;
use crate::handlers::{help, start};

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Show help message")]
    Help,
}

pub async fn setup_user_commands(bot: &Bot) -> HandlerResult<()> {
    use teloxide::prelude::*;
    use teloxide::utils::command::BotCommands as _;

    bot.set_my_commands(Command::bot_commands()).await?;

    Ok(())
}

pub async fn answer(bot: Bot, msg: Message, cmd: Command) -> HandlerResult<()> {
    match cmd {
        Command::Start => start::handle(bot, msg).await,
        Command::Help => help::handle(bot, msg).await,
    }
}
