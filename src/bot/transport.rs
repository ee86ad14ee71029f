use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, InlineQueryResult, InlineQueryResultPhoto,
    InputFile, ParseMode, ReplyMarkup,
};
use url::Url;

use super::outbound::{Button, Markup, Outbound, PhotoCard};
use crate::error::TransportError;

/// Sends router replies to the chat platform.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn deliver(&self, outbound: Outbound) -> Result<(), TransportError>;
}

pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn parse_url(raw: &str) -> Result<Url, TransportError> {
    Url::parse(raw).map_err(|source| TransportError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}

fn inline_keyboard(rows: Vec<Vec<Button>>) -> Result<InlineKeyboardMarkup, TransportError> {
    let rows = rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|button| -> Result<InlineKeyboardButton, TransportError> {
                    Ok(match button {
                        Button::Callback { text, data } => InlineKeyboardButton::callback(text, data),
                        Button::Link { text, url } => InlineKeyboardButton::url(text, parse_url(&url)?),
                    })
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, TransportError>>()?;
    Ok(InlineKeyboardMarkup::new(rows))
}

fn inline_result(card: PhotoCard) -> Result<InlineQueryResult, TransportError> {
    let photo_url = parse_url(&card.photo_url)?;
    let mut result = InlineQueryResultPhoto::new(card.id, photo_url.clone(), photo_url);
    result.caption = Some(card.caption);
    result.reply_markup = Some(inline_keyboard(card.buttons)?);
    Ok(InlineQueryResult::Photo(result))
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn deliver(&self, outbound: Outbound) -> Result<(), TransportError> {
        match outbound {
            Outbound::Text {
                chat_id,
                text,
                html,
                markup,
            } => {
                let mut req = self.bot.send_message(ChatId(chat_id), text);
                if html {
                    req = req.parse_mode(ParseMode::Html);
                }
                match markup {
                    Markup::Menu(menu) => req = req.reply_markup(ReplyMarkup::Keyboard(menu.markup())),
                    Markup::Inline(rows) => req = req.reply_markup(inline_keyboard(rows)?),
                }
                req.await?;
            }

            Outbound::Photo { chat_id, card } => {
                let photo = InputFile::url(parse_url(&card.photo_url)?);
                self.bot
                    .send_photo(ChatId(chat_id), photo)
                    .caption(card.caption)
                    .reply_markup(inline_keyboard(card.buttons)?)
                    .await?;
            }

            Outbound::Location {
                chat_id,
                latitude,
                longitude,
            } => {
                self.bot
                    .send_location(ChatId(chat_id), latitude, longitude)
                    .await?;
            }

            Outbound::CallbackAnswer { callback_id, text } => {
                self.bot.answer_callback_query(callback_id).text(text).await?;
            }

            Outbound::InlineAnswer {
                query_id,
                cards,
                cache_time,
            } => {
                let results = cards
                    .into_iter()
                    .map(inline_result)
                    .collect::<Result<Vec<_>, TransportError>>()?;
                self.bot
                    .answer_inline_query(query_id, results)
                    .cache_time(cache_time)
                    .await?;
            }
        }

        Ok(())
    }
}
