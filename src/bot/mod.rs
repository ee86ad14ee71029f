pub mod callbacks;
pub mod commands;
pub mod handlers;
pub mod keyboards;
pub mod outbound;
pub mod payload;
pub mod render;
pub mod router;
pub mod transport;

use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::dptree;
use teloxide::prelude::*;

use router::Router;

/// Shared application state, accessible from all handlers.
pub struct AppState {
    pub router: Router,
}

/// Build the teloxide update handler tree.
///
/// `/start` and `/help` win over detail links, which win over menu text.
pub fn build_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    let command_handler = Update::filter_message()
        .filter_command::<commands::BotCommand>()
        .endpoint(handlers::handle_command);

    let detail_handler = Update::filter_message()
        .filter_map(|msg: Message| msg.text().and_then(commands::DetailCommand::parse))
        .endpoint(handlers::handle_detail);

    let callback_handler = Update::filter_callback_query()
        .endpoint(callbacks::handle_callback);

    let inline_handler = Update::filter_inline_query()
        .endpoint(callbacks::handle_inline_query);

    let message_handler = Update::filter_message()
        .endpoint(handlers::handle_message);

    dptree::entry()
        .branch(command_handler)
        .branch(detail_handler)
        .branch(callback_handler)
        .branch(inline_handler)
        .branch(message_handler)
}
