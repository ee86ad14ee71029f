//! Cinema catalog Telegram bot.
//!
//! Browse films and cinemas, keep favorites, find the nearest cinema.

pub mod bot;
pub mod config;
pub mod db;
pub mod error;
pub mod geo;
