use std::sync::Arc;
use teloxide::prelude::*;

use crate::bot::AppState;

pub async fn handle_callback(
    q: CallbackQuery,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let data = match q.data.as_deref() {
        Some(d) => d,
        None => return Ok(()),
    };

    let user_id = q.from.id.0 as i64;

    // Lists go back to the chat the button lives in; private chats share the user's id.
    let chat_id = q
        .message
        .as_ref()
        .map(|m| m.chat().id.0)
        .unwrap_or(user_id);

    state.router.callback(&q.id, chat_id, user_id, data).await?;

    Ok(())
}

pub async fn handle_inline_query(
    q: InlineQuery,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing::info!(user_id = q.from.id.0, query = %q.query, "Inline query");
    state.router.inline_query(&q.id).await?;
    Ok(())
}
