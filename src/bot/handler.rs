//! Update dispatch and photo processing.

use crate::ascii::{convert_file, ConvertError, DEFAULT_WIDTH};
use crate::config::BotSettings;
use crate::telegram::{BotClient, Message, ParseMode, PhotoSize, TelegramError};

use super::format::{fenced_chunks, MAX_MESSAGE_LEN};
use super::temp_file::TempImage;

/// Greeting sent for `/start` and `/help`.
pub const WELCOME_MESSAGE: &str =
    "Send me an image, and I'll convert it into ASCII art!";

/// Notice shown while a photo is being converted.
pub const PROCESSING_MESSAGE: &str = "Processing your image... Please wait.";

/// Reply to any non-photo message that is not a command.
pub const HINT_MESSAGE: &str = "Please send a photo to convert it into ASCII art.";

/// Reply for any failure while handling a photo.
pub const GENERIC_ERROR_MESSAGE: &str =
    "Sorry, there was an error processing your image. Please try again.";

/// Bot commands understood by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
}

impl Command {
    /// Parse a command from message text.
    ///
    /// Accepts the `/cmd@botname` form used in group chats and ignores
    /// trailing arguments.
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?;
        let name = word.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name);
        match name.to_ascii_lowercase().as_str() {
            "start" => Some(Command::Start),
            "help" => Some(Command::Help),
            _ => None,
        }
    }
}

/// Pick the highest-resolution size of a photo.
///
/// Ties go to the later entry, matching the API's ascending order.
pub fn select_largest_photo(sizes: &[PhotoSize]) -> Option<&PhotoSize> {
    sizes.iter().max_by_key(|p| p.pixel_count())
}

/// Errors from handling a single photo message.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("Message has no photo")]
    NoPhoto,

    #[error(transparent)]
    Telegram(#[from] TelegramError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("Failed to create temporary file: {0}")]
    TempFile(#[source] std::io::Error),

    #[error("Conversion task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// A running bot: API client plus resolved settings.
pub struct Bot {
    pub(super) client: BotClient,
    pub(super) settings: BotSettings,
}

impl Bot {
    /// Build a bot from resolved settings.
    pub fn new(settings: BotSettings) -> Result<Self, TelegramError> {
        let client =
            BotClient::with_base_url(settings.token.clone(), settings.api_base_url.clone())?;
        Ok(Self { client, settings })
    }

    pub fn client(&self) -> &BotClient {
        &self.client
    }

    pub fn settings(&self) -> &BotSettings {
        &self.settings
    }

    /// Handle one incoming message.
    ///
    /// Never fails: errors are logged, and photo failures are reported to
    /// the sender as [`GENERIC_ERROR_MESSAGE`].
    pub async fn handle_message(&self, message: &Message) {
        let chat_id = message.chat.id;

        if !message.photo.is_empty() {
            log::info!("Received photo from chat {}", chat_id);
            self.handle_photo(message).await;
            return;
        }

        // Stickers, voice notes and documents get the hint like plain text
        let reply = match message.text.as_deref().and_then(Command::parse) {
            Some(command) => {
                log::info!("Received {:?} command from chat {}", command, chat_id);
                WELCOME_MESSAGE
            }
            None => {
                log::debug!("Replying with hint to message {}", message.message_id);
                HINT_MESSAGE
            }
        };

        if let Err(e) = self.client.send_message(chat_id, reply, None).await {
            log::error!("Failed to reply to chat {}: {}", chat_id, e);
        }
    }

    async fn handle_photo(&self, message: &Message) {
        let chat_id = message.chat.id;

        let notice = match self.client.send_message(chat_id, PROCESSING_MESSAGE, None).await {
            Ok(sent) => Some(sent.message_id),
            Err(e) => {
                log::warn!("Failed to send processing notice to chat {}: {}", chat_id, e);
                None
            }
        };

        if let Err(e) = self.reply_with_art(message).await {
            log::error!("Error processing image from chat {}: {}", chat_id, e);
            if let Err(e) = self
                .client
                .send_message(chat_id, GENERIC_ERROR_MESSAGE, None)
                .await
            {
                log::error!("Failed to report error to chat {}: {}", chat_id, e);
            }
        }

        if let Some(notice_id) = notice {
            if let Err(e) = self.client.delete_message(chat_id, notice_id).await {
                log::warn!("Failed to delete processing notice: {}", e);
            }
        }
    }

    async fn reply_with_art(&self, message: &Message) -> Result<(), HandlerError> {
        let art = self.render_photo(&message.photo).await?;
        let chunks = fenced_chunks(&art, MAX_MESSAGE_LEN);

        log::debug!("Sending art to chat {} in {} message(s)", message.chat.id, chunks.len());
        for chunk in &chunks {
            self.client
                .send_message_with_retry(message.chat.id, chunk, Some(ParseMode::MarkdownV2))
                .await?;
        }
        Ok(())
    }

    /// Download the largest photo size and convert it to ASCII text.
    ///
    /// The downloaded file lives in the configured temp directory only for
    /// the duration of this call.
    pub async fn render_photo(&self, sizes: &[PhotoSize]) -> Result<String, HandlerError> {
        let photo = select_largest_photo(sizes).ok_or(HandlerError::NoPhoto)?;
        log::debug!(
            "Selected {}x{} photo {}",
            photo.width,
            photo.height,
            photo.file_id
        );

        let file = self.client.get_file(&photo.file_id).await?;
        let file_path = file
            .file_path
            .ok_or_else(|| TelegramError::MissingFilePath {
                file_id: file.file_id.clone(),
            })?;

        let temp = TempImage::create_in(&self.settings.temp_dir).map_err(HandlerError::TempFile)?;
        self.client.download_file(&file_path, temp.path()).await?;

        let path = temp.path().to_path_buf();
        let art = tokio::task::spawn_blocking(move || convert_file(&path, DEFAULT_WIDTH)).await??;

        Ok(art)
    }
}
