//! Telegram Bot API integration module.
//!
//! A small typed HTTP client covering the methods the bot uses: polling
//! for updates, resolving and downloading photos, and sending or deleting
//! messages.

mod client;
mod retry;
mod types;

pub use client::{
    BotClient, TelegramError, ALLOWED_UPDATES, BOT_TOKEN_ENV, DEFAULT_POLL_TIMEOUT,
    TELEGRAM_API_BASE_URL,
};
pub use retry::{
    calculate_backoff, is_transient_network_error, rate_limit_delay, DEFAULT_BACKOFF_BASE,
    DEFAULT_BACKOFF_MAX, DEFAULT_MAX_RETRIES, DEFAULT_NETWORK_RETRIES,
};
pub use types::{ApiResponse, Chat, File, Message, ParseMode, PhotoSize, ResponseParameters, Update, User};
