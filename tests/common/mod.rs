//! In-memory store and recording transport for router tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cinema_bot::bot::outbound::Outbound;
use cinema_bot::bot::router::Router;
use cinema_bot::bot::transport::Transport;
use cinema_bot::db::models::{Cinema, Film, GeoPoint, User};
use cinema_bot::db::store::{CatalogStore, CinemaFilter, FilmFilter};
use cinema_bot::error::{StoreError, TransportError};

#[derive(Default)]
pub struct MemoryStore {
    pub films: Vec<Film>,
    pub cinemas: Vec<Cinema>,
    pub users: Mutex<HashMap<i64, User>>,
    pub failing: AtomicBool,
}

impl MemoryStore {
    pub fn with_catalog(films: Vec<Film>, cinemas: Vec<Cinema>) -> Self {
        Self {
            films,
            cinemas,
            ..Default::default()
        }
    }

    pub fn user(&self, telegram_id: i64) -> Option<User> {
        self.users.lock().unwrap().get(&telegram_id).cloned()
    }

    pub fn put_user(&self, user: User) {
        self.users.lock().unwrap().insert(user.telegram_id, user);
    }

    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn find_films(&self, filter: &FilmFilter) -> Result<Vec<Film>, StoreError> {
        self.check()?;
        Ok(self
            .films
            .iter()
            .filter(|f| match filter {
                FilmFilter::All => true,
                FilmFilter::Genre(genre) => f.genre.as_deref() == Some(genre.as_str()),
                FilmFilter::Uuids(uuids) => uuids.contains(&f.uuid),
            })
            .cloned()
            .collect())
    }

    async fn find_film(&self, uuid: &str) -> Result<Option<Film>, StoreError> {
        self.check()?;
        Ok(self.films.iter().find(|f| f.uuid == uuid).cloned())
    }

    async fn find_cinemas(&self, filter: &CinemaFilter) -> Result<Vec<Cinema>, StoreError> {
        self.check()?;
        Ok(self
            .cinemas
            .iter()
            .filter(|c| match filter {
                CinemaFilter::All => true,
                CinemaFilter::Uuids(uuids) => uuids.contains(&c.uuid),
            })
            .cloned()
            .collect())
    }

    async fn find_cinema(&self, uuid: &str) -> Result<Option<Cinema>, StoreError> {
        self.check()?;
        Ok(self.cinemas.iter().find(|c| c.uuid == uuid).cloned())
    }

    async fn find_user(&self, telegram_id: i64) -> Result<Option<User>, StoreError> {
        self.check()?;
        Ok(self.user(telegram_id))
    }

    async fn save_user(&self, user: &User) -> Result<(), StoreError> {
        self.check()?;
        self.put_user(user.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingTransport {
    pub sent: Mutex<Vec<Outbound>>,
    pub fail_next: AtomicBool,
}

impl RecordingTransport {
    pub fn sent(&self) -> Vec<Outbound> {
        self.sent.lock().unwrap().clone()
    }

    /// Reject the next delivery without recording it.
    pub fn fail_once(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn deliver(&self, outbound: Outbound) -> Result<(), TransportError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(TransportError::InvalidUrl {
                url: String::new(),
                source: url::ParseError::EmptyHost,
            });
        }
        self.sent.lock().unwrap().push(outbound);
        Ok(())
    }
}

pub fn film(uuid: &str, name: &str, genre: Option<&str>, cinemas: &[&str]) -> Film {
    Film {
        uuid: uuid.to_string(),
        name: name.to_string(),
        genre: genre.map(str::to_string),
        year: 1999,
        rate: 8.1,
        length: "2h 16m".to_string(),
        country: "USA".to_string(),
        link: format!("https://films.example/{uuid}"),
        picture: format!("https://films.example/{uuid}.jpg"),
        cinemas: cinemas.iter().map(|c| c.to_string()).collect(),
    }
}

pub fn cinema(uuid: &str, name: &str, lat: f64, lon: f64, films: &[&str]) -> Cinema {
    Cinema {
        uuid: uuid.to_string(),
        name: name.to_string(),
        url: format!("https://cinemas.example/{uuid}"),
        location: GeoPoint::new(lat, lon),
        films: films.iter().map(|f| f.to_string()).collect(),
    }
}

/// Three films and three cinemas around Moscow.
pub fn sample_store() -> MemoryStore {
    MemoryStore::with_catalog(
        vec![
            film("f1", "The Matrix", Some("action"), &["c1", "c2"]),
            film("f2", "Groundhog Day", Some("comedy"), &["c2"]),
            film("f3", "Heat", Some("action"), &["c3"]),
        ],
        vec![
            cinema("c1", "Oktyabr", 55.7527, 37.5876, &["f1"]),
            cinema("c2", "Pioner", 55.7406, 37.5535, &["f1", "f2"]),
            cinema("c3", "Aurora", 59.9326, 30.3611, &["f3"]),
        ],
    )
}

pub fn router(store: Arc<MemoryStore>) -> (Router, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::default());
    (Router::new(store, transport.clone()), transport)
}
