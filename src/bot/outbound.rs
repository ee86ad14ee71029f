//! Replies produced by the router, independent of the bot protocol client.

use super::keyboards::Menu;

#[derive(Debug, Clone, PartialEq)]
pub enum Button {
    /// Sends `data` back as callback data when pressed.
    Callback { text: String, data: String },
    Link { text: String, url: String },
}

impl Button {
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self::Callback {
            text: text.into(),
            data: data.into(),
        }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Link {
            text: text.into(),
            url: url.into(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Callback { text, .. } | Self::Link { text, .. } => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Markup {
    Menu(Menu),
    Inline(Vec<Vec<Button>>),
}

/// Photo with caption and inline buttons; used for film details and inline results.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoCard {
    pub id: String,
    pub photo_url: String,
    pub caption: String,
    pub buttons: Vec<Vec<Button>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Text {
        chat_id: i64,
        text: String,
        html: bool,
        markup: Markup,
    },
    Photo {
        chat_id: i64,
        card: PhotoCard,
    },
    Location {
        chat_id: i64,
        latitude: f64,
        longitude: f64,
    },
    CallbackAnswer {
        callback_id: String,
        text: String,
    },
    InlineAnswer {
        query_id: String,
        cards: Vec<PhotoCard>,
        cache_time: u32,
    },
}

impl Outbound {
    pub fn html(chat_id: i64, text: impl Into<String>, menu: Menu) -> Self {
        Self::Text {
            chat_id,
            text: text.into(),
            html: true,
            markup: Markup::Menu(menu),
        }
    }

    pub fn plain(chat_id: i64, text: impl Into<String>, markup: Markup) -> Self {
        Self::Text {
            chat_id,
            text: text.into(),
            html: false,
            markup,
        }
    }
}
