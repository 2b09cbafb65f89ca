use bot::BotService;
use config::AppConfig;
use state::AppState;

extern crate pretty_env_logger;
#[macro_use]
extern crate log;

mod bot;
mod commands;
mod config;
mod error;
mod handlers;
mod platform;
mod services;
mod state;
mod utils;


#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }
    let _ = pretty_env_logger::try_init_timed();

    info!("Starting bot...");

    let config = config::build_config()?;
    AppConfig::set_global(config)?;

    info!("Initializing AppState...");
    AppState::init()?;

    let bot_service = BotService::new()?;
    info!("Bot instance created");

    bot_service.start().await.map_err(|e| anyhow::anyhow!(e))?;

    Ok(())
}
