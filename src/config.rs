use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub telegram_bot_token: String,
    pub database_url: String,

    /// Upper bound for the Postgres pool
    pub db_max_connections: u32,

    /// Optional JSON catalog (films + cinemas) upserted at startup
    pub catalog_path: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| anyhow::anyhow!("{} environment variable not set", key))
        };

        Ok(Self {
            telegram_bot_token: required("TELEGRAM_BOT_TOKEN")?,
            database_url: required("DATABASE_URL")?,
            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()?,
            catalog_path: lookup("CATALOG_PATH").filter(|p| !p.trim().is_empty()),
        })
    }
}
