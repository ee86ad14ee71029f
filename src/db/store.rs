use async_trait::async_trait;

use super::models::{Cinema, Film, User};
use crate::error::StoreError;

/// Which films a lookup should return.
#[derive(Debug, Clone, PartialEq)]
pub enum FilmFilter {
    All,
    Genre(String),
    Uuids(Vec<String>),
}

/// Which cinemas a lookup should return.
#[derive(Debug, Clone, PartialEq)]
pub enum CinemaFilter {
    All,
    Uuids(Vec<String>),
}

/// Read/upsert access to films, cinemas and users.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn find_films(&self, filter: &FilmFilter) -> Result<Vec<Film>, StoreError>;

    async fn find_film(&self, uuid: &str) -> Result<Option<Film>, StoreError>;

    async fn find_cinemas(&self, filter: &CinemaFilter) -> Result<Vec<Cinema>, StoreError>;

    async fn find_cinema(&self, uuid: &str) -> Result<Option<Cinema>, StoreError>;

    async fn find_user(&self, telegram_id: i64) -> Result<Option<User>, StoreError>;

    /// Insert or replace the user keyed by `telegram_id`.
    async fn save_user(&self, user: &User) -> Result<(), StoreError>;
}
