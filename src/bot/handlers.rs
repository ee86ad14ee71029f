use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::commands::{BotCommand, DetailCommand};
use crate::bot::AppState;
use crate::db::models::GeoPoint;

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

fn sender_id(msg: &Message) -> i64 {
    msg.from.as_ref().map(|u| u.id.0 as i64).unwrap_or(msg.chat.id.0)
}

pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: BotCommand,
    state: Arc<AppState>,
) -> HandlerResult {
    match cmd {
        BotCommand::Start => {
            let first_name = msg
                .from
                .as_ref()
                .map(|u| u.first_name.as_str())
                .unwrap_or_default();
            state.router.start(msg.chat.id.0, first_name).await?;
        }

        BotCommand::Help => {
            bot.send_message(msg.chat.id, BotCommand::descriptions().to_string())
                .await?;
        }
    }

    Ok(())
}

/// `/f<uuid>` and `/c<uuid>`.
pub async fn handle_detail(msg: Message, cmd: DetailCommand, state: Arc<AppState>) -> HandlerResult {
    tracing::info!(chat_id = msg.chat.id.0, ?cmd, "Detail command");
    state.router.detail(msg.chat.id.0, sender_id(&msg), cmd).await?;
    Ok(())
}

/// Menu taps and location shares. Both are checked on every message.
pub async fn handle_message(msg: Message, state: Arc<AppState>) -> HandlerResult {
    tracing::info!(
        chat_id = msg.chat.id.0,
        from = ?msg.from.as_ref().map(|u| (u.id.0, u.username.as_deref())),
        "Working"
    );

    let chat_id = msg.chat.id.0;
    let location = msg.location().map(|l| {
        tracing::info!(chat_id, latitude = l.latitude, longitude = l.longitude, "Location shared");
        GeoPoint::new(l.latitude, l.longitude)
    });

    state
        .router
        .message(chat_id, sender_id(&msg), msg.text(), location)
        .await?;

    Ok(())
}
