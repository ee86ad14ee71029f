//! Action payloads carried in inline-button callback data.
//!
//! The whole state of an action round-trips through the client as a flat JSON
//! object, e.g. `{"type":"tff","filmUuid":"f1","isFav":false}`.

use serde::{Deserialize, Serialize};

use crate::error::RouteError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ActionPayload {
    #[serde(rename = "tff", rename_all = "camelCase")]
    ToggleFavFilm { film_uuid: String, is_fav: bool },

    #[serde(rename = "sc", rename_all = "camelCase")]
    ShowCinemas { cinema_uuids: Vec<String> },

    #[serde(rename = "scm")]
    ShowCinemasMap { lat: f64, lon: f64 },

    #[serde(rename = "sf", rename_all = "camelCase")]
    ShowFilms { film_uuids: Vec<String> },
}

impl ActionPayload {
    pub fn encode(&self) -> Result<String, RouteError> {
        serde_json::to_string(self).map_err(RouteError::PayloadEncode)
    }

    pub fn decode(data: &str) -> Result<Self, RouteError> {
        serde_json::from_str(data).map_err(RouteError::MalformedPayload)
    }
}
