pub mod models;
pub mod seed;
pub mod store;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::StoreError;
use models::{Cinema, Film, User};
use store::{CatalogStore, CinemaFilter, FilmFilter};

const FILM_COLUMNS: &str =
    "uuid, name, genre, year, rate, length, country, link, picture, cinemas";
const CINEMA_COLUMNS: &str = "uuid, name, url, latitude, longitude, films";

#[derive(Debug, Clone)]
pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> anyhow::Result<()> {
        // One statement per query; prepared statements reject batches.

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS films (
                uuid TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                genre TEXT,
                year INT NOT NULL,
                rate DOUBLE PRECISION NOT NULL,
                length TEXT NOT NULL,
                country TEXT NOT NULL,
                link TEXT NOT NULL,
                picture TEXT NOT NULL,
                cinemas TEXT[] NOT NULL DEFAULT '{}'
            )"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS cinemas (
                uuid TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                url TEXT NOT NULL,
                latitude DOUBLE PRECISION NOT NULL,
                longitude DOUBLE PRECISION NOT NULL,
                films TEXT[] NOT NULL DEFAULT '{}'
            )"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS users (
                telegram_id BIGINT PRIMARY KEY,
                films TEXT[] NOT NULL DEFAULT '{}'
            )"#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_films_genre ON films(genre)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl CatalogStore for Database {
    // ── Film Operations ────────────────────────────────────────────

    async fn find_films(&self, filter: &FilmFilter) -> Result<Vec<Film>, StoreError> {
        let films = match filter {
            FilmFilter::All => {
                sqlx::query_as::<_, Film>(&format!("SELECT {FILM_COLUMNS} FROM films"))
                    .fetch_all(&self.pool)
                    .await?
            }
            FilmFilter::Genre(genre) => {
                sqlx::query_as::<_, Film>(&format!(
                    "SELECT {FILM_COLUMNS} FROM films WHERE genre = $1"
                ))
                .bind(genre)
                .fetch_all(&self.pool)
                .await?
            }
            FilmFilter::Uuids(uuids) => {
                sqlx::query_as::<_, Film>(&format!(
                    "SELECT {FILM_COLUMNS} FROM films WHERE uuid = ANY($1)"
                ))
                .bind(uuids)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(films)
    }

    async fn find_film(&self, uuid: &str) -> Result<Option<Film>, StoreError> {
        let film = sqlx::query_as::<_, Film>(&format!(
            "SELECT {FILM_COLUMNS} FROM films WHERE uuid = $1"
        ))
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;
        Ok(film)
    }

    // ── Cinema Operations ──────────────────────────────────────────

    async fn find_cinemas(&self, filter: &CinemaFilter) -> Result<Vec<Cinema>, StoreError> {
        let cinemas = match filter {
            CinemaFilter::All => {
                sqlx::query_as::<_, Cinema>(&format!("SELECT {CINEMA_COLUMNS} FROM cinemas"))
                    .fetch_all(&self.pool)
                    .await?
            }
            CinemaFilter::Uuids(uuids) => {
                sqlx::query_as::<_, Cinema>(&format!(
                    "SELECT {CINEMA_COLUMNS} FROM cinemas WHERE uuid = ANY($1)"
                ))
                .bind(uuids)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(cinemas)
    }

    async fn find_cinema(&self, uuid: &str) -> Result<Option<Cinema>, StoreError> {
        let cinema = sqlx::query_as::<_, Cinema>(&format!(
            "SELECT {CINEMA_COLUMNS} FROM cinemas WHERE uuid = $1"
        ))
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?;
        Ok(cinema)
    }

    // ── User Operations ────────────────────────────────────────────

    async fn find_user(&self, telegram_id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT telegram_id, films FROM users WHERE telegram_id = $1",
        )
        .bind(telegram_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn save_user(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (telegram_id, films)
            VALUES ($1, $2)
            ON CONFLICT (telegram_id) DO UPDATE SET films = EXCLUDED.films
            "#,
        )
        .bind(user.telegram_id)
        .bind(&user.films)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
