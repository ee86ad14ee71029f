//! Reply keyboards and the label → action table for menu taps.

use teloxide::types::{ButtonRequest, KeyboardButton, KeyboardMarkup};

pub const FILMS: &str = "Films";
pub const FAVOURITES: &str = "Favorites";
pub const CINEMAS: &str = "Cinemas";
pub const RANDOM: &str = "Random";
pub const ACTION: &str = "Action";
pub const COMEDY: &str = "Comedy";
pub const BACK: &str = "Back";
pub const SEND_LOCATION: &str = "Send location";

/// Reply keyboard shown under the input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    Home,
    Films,
    Cinemas,
}

/// What a menu button means once tapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    OpenFilms,
    ShowFavourites,
    OpenCinemas,
    AllFilms,
    Genre(&'static str),
    Back,
}

const LABELS: &[(&str, MenuAction)] = &[
    (FILMS, MenuAction::OpenFilms),
    (FAVOURITES, MenuAction::ShowFavourites),
    (CINEMAS, MenuAction::OpenCinemas),
    (RANDOM, MenuAction::AllFilms),
    (ACTION, MenuAction::Genre("action")),
    (COMEDY, MenuAction::Genre("comedy")),
    (BACK, MenuAction::Back),
];

impl MenuAction {
    /// Exact-match a message text against the known button labels.
    pub fn from_label(text: &str) -> Option<Self> {
        LABELS
            .iter()
            .find(|(label, _)| *label == text)
            .map(|(_, action)| *action)
    }
}

impl Menu {
    pub fn rows(self) -> Vec<Vec<&'static str>> {
        match self {
            Menu::Home => vec![vec![FILMS, CINEMAS], vec![FAVOURITES]],
            Menu::Films => vec![vec![RANDOM], vec![ACTION, COMEDY], vec![BACK]],
            Menu::Cinemas => vec![vec![SEND_LOCATION], vec![BACK]],
        }
    }

    pub fn markup(self) -> KeyboardMarkup {
        let rows = self
            .rows()
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|label| {
                        let button = KeyboardButton::new(label);
                        if label == SEND_LOCATION {
                            button.request(ButtonRequest::Location)
                        } else {
                            button
                        }
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        KeyboardMarkup::new(rows)
    }
}
