use std::sync::Arc;

use teloxide::prelude::*;
use tracing_subscriber::EnvFilter;

use cinema_bot::bot::{self, router::Router, transport::TelegramTransport, AppState};
use cinema_bot::config::AppConfig;
use cinema_bot::db::{seed::Catalog, Database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    tracing::info!("🎬 Starting cinema bot...");

    // Load config
    let config = AppConfig::from_env()?;

    // Initialize database
    let db = Database::connect(&config.database_url, config.db_max_connections).await?;
    db.run_migrations().await?;
    tracing::info!("Database connected and migrations applied.");

    if let Some(path) = &config.catalog_path {
        let catalog = Catalog::load(path).await?;
        db.seed_catalog(&catalog).await?;
    }

    // Create the Telegram bot
    let bot = Bot::new(&config.telegram_bot_token);

    // Build shared application state
    let state = Arc::new(AppState {
        router: Router::new(
            Arc::new(db),
            Arc::new(TelegramTransport::new(bot.clone())),
        ),
    });

    // Build the dispatcher
    let handler = bot::build_handler();

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
