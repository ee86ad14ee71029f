//! Reference catalog loading.
//!
//! Films and cinemas are immutable reference data; they reach the store only
//! through this upsert at startup.

use std::path::Path;

use serde::Deserialize;

use super::models::{Cinema, Film};
use super::Database;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub films: Vec<Film>,
    #[serde(default)]
    pub cinemas: Vec<Cinema>,
}

impl Catalog {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub async fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read catalog {:?}: {}", path, e))?;
        Self::from_json(&json)
    }
}

impl Database {
    /// Upsert every film and cinema in the catalog, keyed by uuid.
    pub async fn seed_catalog(&self, catalog: &Catalog) -> anyhow::Result<()> {
        for film in &catalog.films {
            sqlx::query(
                r#"
                INSERT INTO films (uuid, name, genre, year, rate, length, country, link, picture, cinemas)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                ON CONFLICT (uuid) DO UPDATE SET
                    name = EXCLUDED.name,
                    genre = EXCLUDED.genre,
                    year = EXCLUDED.year,
                    rate = EXCLUDED.rate,
                    length = EXCLUDED.length,
                    country = EXCLUDED.country,
                    link = EXCLUDED.link,
                    picture = EXCLUDED.picture,
                    cinemas = EXCLUDED.cinemas
                "#,
            )
            .bind(&film.uuid)
            .bind(&film.name)
            .bind(&film.genre)
            .bind(film.year)
            .bind(film.rate)
            .bind(&film.length)
            .bind(&film.country)
            .bind(&film.link)
            .bind(&film.picture)
            .bind(&film.cinemas)
            .execute(&self.pool)
            .await?;
        }

        for cinema in &catalog.cinemas {
            sqlx::query(
                r#"
                INSERT INTO cinemas (uuid, name, url, latitude, longitude, films)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (uuid) DO UPDATE SET
                    name = EXCLUDED.name,
                    url = EXCLUDED.url,
                    latitude = EXCLUDED.latitude,
                    longitude = EXCLUDED.longitude,
                    films = EXCLUDED.films
                "#,
            )
            .bind(&cinema.uuid)
            .bind(&cinema.name)
            .bind(&cinema.url)
            .bind(cinema.location.latitude)
            .bind(cinema.location.longitude)
            .bind(&cinema.films)
            .execute(&self.pool)
            .await?;
        }

        tracing::info!(
            films = catalog.films.len(),
            cinemas = catalog.cinemas.len(),
            "Catalog seeded"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_parses_nested_location() {
        let catalog = Catalog::from_json(
            r#"{
                "films": [],
                "cinemas": [{
                    "uuid": "c1",
                    "name": "Aurora",
                    "url": "https://aurora.example",
                    "location": { "latitude": 59.93, "longitude": 30.36 },
                    "films": ["f1", "f2"]
                }]
            }"#,
        )
        .unwrap();

        assert!(catalog.films.is_empty());
        assert_eq!(catalog.cinemas[0].location.latitude, 59.93);
        assert_eq!(catalog.cinemas[0].films.len(), 2);
    }

    #[test]
    fn test_bundled_catalog_is_consistent() {
        let catalog = Catalog::from_json(include_str!("../../data/catalog.json")).unwrap();

        assert_eq!(catalog.films.len(), 3);
        for film in &catalog.films {
            for uuid in &film.cinemas {
                let cinema = catalog.cinemas.iter().find(|c| &c.uuid == uuid).unwrap();
                assert!(cinema.films.contains(&film.uuid), "{} <-> {}", film.uuid, uuid);
            }
        }
    }

    #[test]
    fn test_catalog_rejects_non_object() {
        assert!(Catalog::from_json("[1, 2, 3]").is_err());
    }
}
