//! Response rendering: records in, HTML text and inline keyboards out.
//!
//! Everything here is pure; the router fetches the records and hands the
//! resulting [`Outbound`] to the transport.

use teloxide::utils::html::escape;

use super::keyboards::Menu;
use super::outbound::{Button, Markup, Outbound, PhotoCard};
use super::payload::ActionPayload;
use crate::db::models::{Cinema, Film, GeoPoint};
use crate::error::RouteError;
use crate::geo;

pub const NOTHING_FOUND: &str = "Nothing found.";
pub const NO_FAVOURITES: &str = "You haven't added anything yet.";
pub const CHOOSE_GENRE: &str = "Choose a genre";
pub const SEND_LOCATION: &str = "Send your location";
pub const HOME_PROMPT: &str = "What would you like to watch?";
pub const ADD_FAVOURITE: &str = "Add to favorites";
pub const REMOVE_FAVOURITE: &str = "Remove from favorites";
pub const SHOW_CINEMAS: &str = "Show cinemas";
pub const SHOW_ON_MAP: &str = "Show on map";
pub const SHOW_FILMS: &str = "Show films";
pub const ADDED: &str = "Added";
pub const REMOVED: &str = "Removed";

/// Inline query answers are never cached by the client.
pub const INLINE_CACHE_TIME: u32 = 0;

fn numbered<T>(items: &[T], line: impl Fn(&T) -> String) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    Some(
        items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("<b>{}.</b> {}", i + 1, line(item)))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

pub fn film_list(films: &[Film]) -> String {
    numbered(films, |f| format!("{} - /f{}", escape(&f.name), f.uuid))
        .unwrap_or_else(|| NOTHING_FOUND.to_string())
}

pub fn cinema_list(cinemas: &[Cinema]) -> String {
    numbered(cinemas, |c| format!("{} - /c{}", escape(&c.name), c.uuid))
        .unwrap_or_else(|| NOTHING_FOUND.to_string())
}

pub fn favourite_list(films: &[Film]) -> String {
    numbered(films, |f| {
        format!("{} - <b>{}</b> (/f{})", escape(&f.name), f.rate, f.uuid)
    })
    .unwrap_or_else(|| NO_FAVOURITES.to_string())
}

/// Every cinema with its distance from `origin` in km, nearest first.
pub fn by_distance(origin: GeoPoint, cinemas: Vec<Cinema>) -> Vec<(Cinema, f64)> {
    let mut ranked: Vec<(Cinema, f64)> = cinemas
        .into_iter()
        .map(|c| {
            let km = geo::distance_km(origin, c.location);
            (c, km)
        })
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
}

pub fn nearest_cinemas(origin: GeoPoint, cinemas: Vec<Cinema>) -> String {
    let ranked = by_distance(origin, cinemas);
    numbered(&ranked, |(c, km)| {
        format!(
            "{}. <em>Distance</em> - <strong>{}</strong> km. /c{}",
            escape(&c.name),
            km,
            c.uuid
        )
    })
    .unwrap_or_else(|| NOTHING_FOUND.to_string())
}

pub fn film_caption(film: &Film) -> String {
    format!(
        "Title: {}\nYear: {}\nRating: {}\nLength: {}\nCountry: {}",
        film.name, film.year, film.rate, film.length, film.country
    )
}

fn film_link(film: &Film) -> Button {
    Button::link(format!("More about {}", film.name), &film.link)
}

pub fn film_detail(chat_id: i64, film: &Film, is_fav: bool) -> Result<Outbound, RouteError> {
    let toggle = ActionPayload::ToggleFavFilm {
        film_uuid: film.uuid.clone(),
        is_fav,
    };
    let cinemas = ActionPayload::ShowCinemas {
        cinema_uuids: film.cinemas.clone(),
    };
    let label = if is_fav { REMOVE_FAVOURITE } else { ADD_FAVOURITE };

    Ok(Outbound::Photo {
        chat_id,
        card: PhotoCard {
            id: film.uuid.clone(),
            photo_url: film.picture.clone(),
            caption: film_caption(film),
            buttons: vec![
                vec![
                    Button::callback(label, toggle.encode()?),
                    Button::callback(SHOW_CINEMAS, cinemas.encode()?),
                ],
                vec![film_link(film)],
            ],
        },
    })
}

pub fn cinema_detail(chat_id: i64, cinema: &Cinema) -> Result<Outbound, RouteError> {
    let map = ActionPayload::ShowCinemasMap {
        lat: cinema.location.latitude,
        lon: cinema.location.longitude,
    };
    let films = ActionPayload::ShowFilms {
        film_uuids: cinema.films.clone(),
    };

    Ok(Outbound::plain(
        chat_id,
        format!("Cinema: {}", cinema.name),
        Markup::Inline(vec![
            vec![
                Button::link(&cinema.name, &cinema.url),
                Button::callback(SHOW_ON_MAP, map.encode()?),
            ],
            vec![Button::callback(SHOW_FILMS, films.encode()?)],
        ]),
    ))
}

pub fn inline_cards(films: &[Film]) -> Vec<PhotoCard> {
    films
        .iter()
        .map(|film| PhotoCard {
            id: film.uuid.clone(),
            photo_url: film.picture.clone(),
            caption: film_caption(film),
            buttons: vec![vec![film_link(film)]],
        })
        .collect()
}

pub fn greeting(chat_id: i64, first_name: &str) -> Outbound {
    Outbound::plain(
        chat_id,
        format!("Hello, {first_name}\nChoose a command to get started:"),
        Markup::Menu(Menu::Home),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn film(uuid: &str, name: &str) -> Film {
        Film {
            uuid: uuid.into(),
            name: name.into(),
            genre: None,
            year: 2001,
            rate: 7.5,
            length: "1h 40m".into(),
            country: "France".into(),
            link: format!("https://films.example/{uuid}"),
            picture: format!("https://films.example/{uuid}.jpg"),
            cinemas: vec!["c1".into(), "c2".into()],
        }
    }

    fn cinema(uuid: &str, lat: f64, lon: f64) -> Cinema {
        Cinema {
            uuid: uuid.into(),
            name: format!("Cinema {uuid}"),
            url: format!("https://cinema.example/{uuid}"),
            location: GeoPoint::new(lat, lon),
            films: vec!["f1".into()],
        }
    }

    #[test]
    fn test_list_lines_keep_input_order() {
        let films = vec![film("z", "Zodiac"), film("a", "Amelie"), film("m", "Memento")];
        let html = film_list(&films);
        let lines: Vec<&str> = html.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "<b>1.</b> Zodiac - /fz");
        assert_eq!(lines[1], "<b>2.</b> Amelie - /fa");
        assert_eq!(lines[2], "<b>3.</b> Memento - /fm");
    }

    #[test]
    fn test_empty_lists_have_sentences() {
        assert_eq!(film_list(&[]), NOTHING_FOUND);
        assert_eq!(cinema_list(&[]), NOTHING_FOUND);
        assert_eq!(favourite_list(&[]), NO_FAVOURITES);
    }

    #[test]
    fn test_names_are_escaped() {
        let html = film_list(&[film("1", "Tom & Jerry <3")]);
        assert_eq!(html, "<b>1.</b> Tom &amp; Jerry &lt;3 - /f1");
    }

    #[test]
    fn test_favourites_show_rating() {
        assert_eq!(
            favourite_list(&[film("f9", "Heat")]),
            "<b>1.</b> Heat - <b>7.5</b> (/ff9)"
        );
    }

    #[test]
    fn test_nearest_sorted_ascending() {
        let origin = GeoPoint::new(55.75, 37.62);
        let cinemas = vec![
            cinema("far", 59.93, 30.36),
            cinema("here", 55.75, 37.62),
            cinema("near", 55.80, 37.60),
        ];

        let ranked = by_distance(origin, cinemas);
        let uuids: Vec<&str> = ranked.iter().map(|(c, _)| c.uuid.as_str()).collect();
        assert_eq!(uuids, vec!["here", "near", "far"]);
        assert!(ranked.windows(2).all(|w| w[0].1 <= w[1].1));
        assert_eq!(ranked[0].1, 0.0);
    }

    #[test]
    fn test_nearest_lines_annotated() {
        let origin = GeoPoint::new(55.75, 37.62);
        let html = nearest_cinemas(origin, vec![cinema("c7", 55.75, 37.62)]);

        assert_eq!(
            html,
            "<b>1.</b> Cinema c7. <em>Distance</em> - <strong>0</strong> km. /cc7"
        );
    }

    #[test]
    fn test_film_detail_buttons() {
        let Outbound::Photo { card, .. } = film_detail(1, &film("f1", "Heat"), false).unwrap() else {
            panic!("expected a photo");
        };

        assert_eq!(card.buttons.len(), 2);
        assert_eq!(card.buttons[0][0].text(), ADD_FAVOURITE);
        assert_eq!(card.buttons[0][1].text(), SHOW_CINEMAS);
        assert_eq!(
            card.buttons[1][0],
            Button::link("More about Heat", "https://films.example/f1")
        );

        let Button::Callback { data, .. } = &card.buttons[0][1] else {
            panic!("expected callback");
        };
        assert_eq!(
            ActionPayload::decode(data).unwrap(),
            ActionPayload::ShowCinemas {
                cinema_uuids: vec!["c1".into(), "c2".into()]
            }
        );
    }

    #[test]
    fn test_cinema_detail_embeds_coordinates() {
        let Outbound::Text { text, markup, .. } = cinema_detail(1, &cinema("c1", 59.93, 30.36)).unwrap()
        else {
            panic!("expected text");
        };
        assert_eq!(text, "Cinema: Cinema c1");

        let Markup::Inline(rows) = markup else {
            panic!("expected inline keyboard");
        };
        let Button::Callback { data, .. } = &rows[0][1] else {
            panic!("expected callback");
        };
        assert_eq!(
            ActionPayload::decode(data).unwrap(),
            ActionPayload::ShowCinemasMap {
                lat: 59.93,
                lon: 30.36
            }
        );
        assert_eq!(rows[1][0].text(), SHOW_FILMS);
    }

    #[test]
    fn test_caption_has_all_fields() {
        let caption = film_caption(&film("f1", "Heat"));
        for part in ["Heat", "2001", "7.5", "1h 40m", "France"] {
            assert!(caption.contains(part), "caption missing {part}");
        }
    }
}
