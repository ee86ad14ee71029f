//! Event routing: one inbound event in, one reply (or favorite toggle) out.
//!
//! Store failures are logged and dropped here; every other error is returned
//! to the dispatcher as a failure of that single event.

use std::sync::Arc;

use super::commands::DetailCommand;
use super::keyboards::{Menu, MenuAction};
use super::outbound::{Markup, Outbound};
use super::payload::ActionPayload;
use super::render;
use super::transport::Transport;
use crate::db::models::{GeoPoint, User};
use crate::db::store::{CatalogStore, CinemaFilter, FilmFilter};
use crate::error::RouteError;

pub struct Router {
    store: Arc<dyn CatalogStore>,
    transport: Arc<dyn Transport>,
}

impl Router {
    pub fn new(store: Arc<dyn CatalogStore>, transport: Arc<dyn Transport>) -> Self {
        Self { store, transport }
    }

    async fn send(&self, outbound: Outbound) -> Result<(), RouteError> {
        self.transport.deliver(outbound).await?;
        Ok(())
    }

    /// On store failure: log and return without replying.
    fn settle(event: &'static str, result: Result<(), RouteError>) -> Result<(), RouteError> {
        match result {
            Err(RouteError::Store(e)) => {
                tracing::error!(event, error = %e, "Catalog store failure, event dropped");
                Ok(())
            }
            other => other,
        }
    }

    // ── Messages ───────────────────────────────────────────────────

    pub async fn start(&self, chat_id: i64, first_name: &str) -> Result<(), RouteError> {
        self.send(render::greeting(chat_id, first_name)).await
    }

    /// A plain message: menu text and a shared location are handled
    /// independently, so one message can produce two replies. Both run
    /// before the first error is returned.
    pub async fn message(
        &self,
        chat_id: i64,
        user_id: i64,
        text: Option<&str>,
        location: Option<GeoPoint>,
    ) -> Result<(), RouteError> {
        let text_result = match text {
            Some(text) => self.text(chat_id, user_id, text).await,
            None => Ok(()),
        };
        let location_result = match location {
            Some(origin) => self.location(chat_id, origin).await,
            None => Ok(()),
        };
        text_result.and(location_result)
    }

    /// Menu taps. Text that is not a known label is ignored.
    pub async fn text(&self, chat_id: i64, user_id: i64, text: &str) -> Result<(), RouteError> {
        let Some(action) = MenuAction::from_label(text) else {
            tracing::debug!(chat_id, "Ignoring free text");
            return Ok(());
        };
        Self::settle("menu", self.menu(chat_id, user_id, action).await)
    }

    async fn menu(&self, chat_id: i64, user_id: i64, action: MenuAction) -> Result<(), RouteError> {
        match action {
            MenuAction::OpenFilms => {
                self.send(Outbound::plain(chat_id, render::CHOOSE_GENRE, Markup::Menu(Menu::Films)))
                    .await
            }
            MenuAction::ShowFavourites => self.favourites(chat_id, user_id).await,
            MenuAction::OpenCinemas => {
                self.send(Outbound::plain(chat_id, render::SEND_LOCATION, Markup::Menu(Menu::Cinemas)))
                    .await
            }
            MenuAction::AllFilms => self.films(chat_id, FilmFilter::All).await,
            MenuAction::Genre(genre) => self.films(chat_id, FilmFilter::Genre(genre.to_string())).await,
            MenuAction::Back => {
                self.send(Outbound::plain(chat_id, render::HOME_PROMPT, Markup::Menu(Menu::Home)))
                    .await
            }
        }
    }

    async fn films(&self, chat_id: i64, filter: FilmFilter) -> Result<(), RouteError> {
        let films = self.store.find_films(&filter).await?;
        self.send(Outbound::html(chat_id, render::film_list(&films), Menu::Films))
            .await
    }

    async fn cinemas(&self, chat_id: i64, filter: CinemaFilter) -> Result<(), RouteError> {
        let cinemas = self.store.find_cinemas(&filter).await?;
        self.send(Outbound::html(chat_id, render::cinema_list(&cinemas), Menu::Home))
            .await
    }

    async fn favourites(&self, chat_id: i64, user_id: i64) -> Result<(), RouteError> {
        let films = match self.store.find_user(user_id).await? {
            Some(user) => self.store.find_films(&FilmFilter::Uuids(user.films)).await?,
            None => Vec::new(),
        };
        self.send(Outbound::html(chat_id, render::favourite_list(&films), Menu::Home))
            .await
    }

    pub async fn location(&self, chat_id: i64, origin: GeoPoint) -> Result<(), RouteError> {
        let result = async {
            let cinemas = self.store.find_cinemas(&CinemaFilter::All).await?;
            self.send(Outbound::html(
                chat_id,
                render::nearest_cinemas(origin, cinemas),
                Menu::Home,
            ))
            .await
        }
        .await;
        Self::settle("location", result)
    }

    pub async fn detail(
        &self,
        chat_id: i64,
        user_id: i64,
        command: DetailCommand,
    ) -> Result<(), RouteError> {
        let result = match command {
            DetailCommand::Film(uuid) => self.film_detail(chat_id, user_id, &uuid).await,
            DetailCommand::Cinema(uuid) => self.cinema_detail(chat_id, &uuid).await,
        };
        Self::settle("detail", result)
    }

    async fn film_detail(&self, chat_id: i64, user_id: i64, uuid: &str) -> Result<(), RouteError> {
        let (film, user) = tokio::try_join!(self.store.find_film(uuid), self.store.find_user(user_id))?;
        let film = film.ok_or_else(|| RouteError::MissingRecord {
            kind: "film",
            uuid: uuid.to_string(),
        })?;
        let is_fav = user.is_some_and(|u| u.has_favourite(&film.uuid));

        self.send(render::film_detail(chat_id, &film, is_fav)?).await
    }

    async fn cinema_detail(&self, chat_id: i64, uuid: &str) -> Result<(), RouteError> {
        let cinema = self
            .store
            .find_cinema(uuid)
            .await?
            .ok_or_else(|| RouteError::MissingRecord {
                kind: "cinema",
                uuid: uuid.to_string(),
            })?;

        self.send(render::cinema_detail(chat_id, &cinema)?).await
    }

    // ── Callbacks ──────────────────────────────────────────────────

    /// Button presses. `chat_id` is where list replies go.
    pub async fn callback(
        &self,
        callback_id: &str,
        chat_id: i64,
        user_id: i64,
        data: &str,
    ) -> Result<(), RouteError> {
        let payload = ActionPayload::decode(data)?;
        tracing::debug!(user_id, ?payload, "Callback action");

        let result = match payload {
            ActionPayload::ShowCinemasMap { lat, lon } => {
                self.send(Outbound::Location {
                    chat_id,
                    latitude: lat,
                    longitude: lon,
                })
                .await
            }
            ActionPayload::ShowCinemas { cinema_uuids } => {
                self.cinemas(chat_id, CinemaFilter::Uuids(cinema_uuids)).await
            }
            ActionPayload::ToggleFavFilm { film_uuid, is_fav } => {
                self.toggle_favourite(callback_id, user_id, &film_uuid, is_fav)
                    .await
            }
            ActionPayload::ShowFilms { film_uuids } => {
                self.films(chat_id, FilmFilter::Uuids(film_uuids)).await
            }
        };
        Self::settle("callback", result)
    }

    /// Direction comes from the button, not from the stored favorites.
    async fn toggle_favourite(
        &self,
        callback_id: &str,
        user_id: i64,
        film_uuid: &str,
        is_fav: bool,
    ) -> Result<(), RouteError> {
        let mut user = self
            .store
            .find_user(user_id)
            .await?
            .unwrap_or_else(|| User::new(user_id));
        user.toggle_favourite(film_uuid, is_fav);
        self.store.save_user(&user).await?;

        tracing::info!(user_id, film_uuid, added = !is_fav, "Favorite toggled");

        let text = if is_fav { render::REMOVED } else { render::ADDED };
        self.send(Outbound::CallbackAnswer {
            callback_id: callback_id.to_string(),
            text: text.to_string(),
        })
        .await
    }

    // ── Inline queries ─────────────────────────────────────────────

    pub async fn inline_query(&self, query_id: &str) -> Result<(), RouteError> {
        let result = async {
            let films = self.store.find_films(&FilmFilter::All).await?;
            self.send(Outbound::InlineAnswer {
                query_id: query_id.to_string(),
                cards: render::inline_cards(&films),
                cache_time: render::INLINE_CACHE_TIME,
            })
            .await
        }
        .await;
        Self::settle("inline_query", result)
    }
}
