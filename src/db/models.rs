use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Film {
    pub uuid: String,
    pub name: String,
    /// Genre tag such as "action" or "comedy"
    #[serde(rename = "type", default)]
    pub genre: Option<String>,
    pub year: i32,
    pub rate: f64,
    pub length: String,
    pub country: String,
    pub link: String,
    pub picture: String,
    #[serde(default)]
    pub cinemas: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, FromRow, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Cinema {
    pub uuid: String,
    pub name: String,
    pub url: String,
    #[sqlx(flatten)]
    pub location: GeoPoint,
    #[serde(default)]
    pub films: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub telegram_id: i64,
    /// Favorited film uuids. Duplicates are possible.
    pub films: Vec<String>,
}

impl User {
    pub fn new(telegram_id: i64) -> Self {
        Self {
            telegram_id,
            films: Vec::new(),
        }
    }

    pub fn has_favourite(&self, film_uuid: &str) -> bool {
        self.films.iter().any(|f| f == film_uuid)
    }

    /// Flip a favorite using the state the button was rendered with.
    ///
    /// `was_favourite == false` appends without checking for an existing entry;
    /// `was_favourite == true` drops every occurrence.
    pub fn toggle_favourite(&mut self, film_uuid: &str, was_favourite: bool) {
        if was_favourite {
            self.films.retain(|f| f != film_uuid);
        } else {
            self.films.push(film_uuid.to_string());
        }
    }
}
