use teloxide::prelude::*;
use teloxide::types::{InputFile, MessageId};

use crate::config::AppConfig;
use crate::error::{BotResult, HandlerResult};
use crate::platform::{classify, MediaKind, Platform, RetrievedItem};
use crate::state::AppState;

/// Dispatch and lifecycle controller: classify, notify, fetch, relay,
/// report, clean. Every downloaded file is deleted before this handler
/// returns, success or failure.
pub async fn handle(bot: Bot, msg: Message) -> HandlerResult<()> {
    let url = match msg.text() {
        Some(text) => text.trim().to_string(),
        None => return Ok(()),
    };

    let Some(platform) = classify(&url) else {
        bot.send_message(msg.chat.id, "Unsupported platform or invalid link.")
            .await?;
        return Ok(());
    };

    let status_msg = bot
        .send_message(msg.chat.id, format!("⏳ Downloading from {}...", platform))
        .await?;

    let mut items: Vec<RetrievedItem> = Vec::new();

    let outcome = process_request(&bot, &msg, platform, &url, &mut items).await;

    finalize(&bot, msg.chat.id, status_msg.id, &url, &outcome, &items).await;

    Ok(())
}

/// Fetches via the strategy matching the platform, then relays every item
/// in order. Collected items stay in `items` so the caller can clean up
/// even when relaying fails half-way.
async fn process_request(
    bot: &Bot,
    msg: &Message,
    platform: Platform,
    url: &str,
    items: &mut Vec<RetrievedItem>,
) -> BotResult<()> {
    let state = AppState::get()?;
    let config = AppConfig::get()?;

    tokio::fs::create_dir_all(&config.download.dir).await?;

    match platform {
        Platform::Instagram => items.extend(state.instagram.fetch_carousel(url).await?),
        _ => items.push(state.download.fetch_single(url, platform).await?),
    }

    for item in items.iter() {
        let file = InputFile::file(item.path.clone());
        match item.kind {
            MediaKind::Video => {
                bot.send_video(msg.chat.id, file).await?;
            }
            MediaKind::Photo => {
                bot.send_photo(msg.chat.id, file).await?;
            }
        }
    }

    Ok(())
}

/// Reports the outcome, then deletes every downloaded file. A failing
/// status-message call must not keep the files around, so transport
/// errors here are logged instead of propagated.
async fn finalize(
    bot: &Bot,
    chat_id: ChatId,
    status_msg_id: MessageId,
    url: &str,
    outcome: &BotResult<()>,
    items: &[RetrievedItem],
) {
    match outcome {
        Ok(()) => {
            if let Err(e) = bot.delete_message(chat_id, status_msg_id).await {
                warn!("Failed to delete status message for {}: {}", url, e);
            }
        }
        Err(e) => {
            error!("Failed to handle {}: {}", url, e);
            if let Err(edit_err) = bot
                .edit_message_text(chat_id, status_msg_id, format!("❌ {}", e.user_message()))
                .await
            {
                warn!("Failed to report the error for {}: {}", url, edit_err);
            }
        }
    }

    cleanup(items).await;
}

/// Deletes every collected file. One failed deletion never stops the
/// others and never fails the request.
async fn cleanup(items: &[RetrievedItem]) {
    for item in items {
        if let Err(e) = tokio::fs::remove_file(&item.path).await {
            warn!("Failed to remove {}: {}", item.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BotError;
    use std::path::PathBuf;

    fn temp_item(name: &str, kind: MediaKind) -> RetrievedItem {
        let path = std::env::temp_dir()
            .join(format!("mediagrab-test-{}-{}", std::process::id(), name));
        std::fs::write(&path, b"media").unwrap();
        RetrievedItem { path, kind }
    }

    /// Every Telegram API call made with this bot fails, offline or not.
    fn unreachable_bot() -> Bot {
        Bot::new("123456:invalid-test-token")
    }

    #[tokio::test]
    async fn cleanup_removes_every_file() {
        let items = vec![
            temp_item("a.mp4", MediaKind::Video),
            temp_item("b.jpg", MediaKind::Photo),
        ];

        cleanup(&items).await;

        for item in &items {
            assert!(!item.path.exists());
        }
    }

    #[tokio::test]
    async fn cleanup_survives_missing_files() {
        let present = temp_item("c.jpg", MediaKind::Photo);
        let missing = RetrievedItem::video(PathBuf::from("/nonexistent/mediagrab-gone.mp4"));

        cleanup(&[missing, present.clone()]).await;

        assert!(!present.path.exists());
    }

    #[tokio::test]
    async fn finalize_cleans_up_when_status_delete_fails() {
        let item = temp_item("d.mp4", MediaKind::Video);

        finalize(
            &unreachable_bot(),
            ChatId(1),
            MessageId(1),
            "https://youtu.be/abc123",
            &Ok(()),
            std::slice::from_ref(&item),
        )
        .await;

        assert!(!item.path.exists());
    }

    #[tokio::test]
    async fn finalize_cleans_up_when_error_report_fails() {
        let item = temp_item("e.jpg", MediaKind::Photo);
        let outcome: BotResult<()> = Err(BotError::AppState("boom".to_string()));

        finalize(
            &unreachable_bot(),
            ChatId(1),
            MessageId(1),
            "https://instagram.com/p/xyz",
            &outcome,
            std::slice::from_ref(&item),
        )
        .await;

        assert!(!item.path.exists());
    }
}
