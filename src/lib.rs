//! photo-ascii-bot library crate.
//!
//! The [`ascii`] module holds the image-to-text converter; the remaining
//! modules wrap it in a Telegram bot and a command-line front end.

pub mod ascii;
pub mod bot;
pub mod cli;
pub mod config;
pub mod telegram;
