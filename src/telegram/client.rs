//! BotClient - handles communication with the Telegram Bot API.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use super::retry::{
    calculate_backoff, is_gateway_status, is_transient_network_error, rate_limit_delay,
    DEFAULT_BACKOFF_BASE, DEFAULT_BACKOFF_MAX, DEFAULT_MAX_RETRIES, DEFAULT_NETWORK_RETRIES,
};
use super::types::{
    ApiResponse, DeleteMessageRequest, File, GetFileRequest, GetUpdatesRequest, Message,
    ParseMode, SendMessageRequest, Update, User,
};

/// The environment variable name for the bot token.
pub const BOT_TOKEN_ENV: &str = "BOT_TOKEN";

/// Default base URL for the Bot API.
pub const TELEGRAM_API_BASE_URL: &str = "https://api.telegram.org";

/// Default long-poll timeout passed to `getUpdates`.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(30);

/// Update kinds requested from `getUpdates`.
pub const ALLOWED_UPDATES: &[&str] = &["message"];

/// Default timeout for HTTP requests (30 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Bot API error code for flood control.
const ERROR_CODE_TOO_MANY_REQUESTS: i64 = 429;

/// Client for communicating with the Telegram Bot API.
pub struct BotClient {
    token: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl BotClient {
    /// Create a new BotClient with an explicit token.
    pub fn with_token(token: String) -> Result<Self, TelegramError> {
        Self::with_base_url(token, TELEGRAM_API_BASE_URL.to_string())
    }

    /// Create a new BotClient with a custom base URL.
    ///
    /// Useful for a self-hosted Bot API server or a mock server in tests.
    pub fn with_base_url(token: String, base_url: String) -> Result<Self, TelegramError> {
        if token.trim().is_empty() {
            return Err(TelegramError::MissingToken);
        }

        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// Get the bot token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a Bot API method: `{base}/bot{token}/{method}`.
    pub fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    /// URL of a downloadable file: `{base}/file/bot{token}/{file_path}`.
    pub fn file_url(&self, file_path: &str) -> String {
        format!(
            "{}/file/bot{}/{}",
            self.base_url,
            self.token,
            file_path.trim_start_matches('/')
        )
    }

    /// Call a Bot API method with a JSON body and unwrap the response envelope.
    async fn call<B, T>(
        &self,
        method: &str,
        body: &B,
        timeout: Option<Duration>,
    ) -> Result<T, TelegramError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.http_client.post(self.method_url(method)).json(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        if is_gateway_status(status) {
            // Surfaces as a status error so the retry loops treat it as transient
            response.error_for_status_ref()?;
        }
        let text = response.text().await?;

        let envelope: ApiResponse<T> = match serde_json::from_str(&text) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(TelegramError::Api {
                    code: status.as_u16() as i64,
                    description: format!("Malformed {} response: {}", method, e),
                });
            }
            Err(_) => {
                return Err(TelegramError::Api {
                    code: status.as_u16() as i64,
                    description: if text.is_empty() {
                        status.to_string()
                    } else {
                        text
                    },
                });
            }
        };

        if envelope.ok {
            return envelope.result.ok_or_else(|| TelegramError::Api {
                code: status.as_u16() as i64,
                description: format!("{} returned ok without a result", method),
            });
        }

        let code = envelope.error_code.unwrap_or(status.as_u16() as i64);
        let description = envelope
            .description
            .unwrap_or_else(|| "Unknown error".to_string());

        if code == ERROR_CODE_TOO_MANY_REQUESTS {
            let retry_after_secs = envelope.parameters.and_then(|p| p.retry_after);
            log::warn!(
                "Rate limited by Bot API on {}. Retry-After: {:?} seconds",
                method,
                retry_after_secs
            );
            return Err(TelegramError::RateLimit {
                message: description,
                retry_after_secs,
            });
        }

        Err(TelegramError::Api { code, description })
    }

    /// Fetch the bot's own account (`getMe`).
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &serde_json::Map::new(), None).await
    }

    /// Long-poll for new updates (`getUpdates`).
    ///
    /// `offset` acknowledges every update with a lower id. The HTTP timeout
    /// is extended by `poll_timeout` so the server can hold the request open.
    pub async fn get_updates(
        &self,
        offset: i64,
        poll_timeout: Duration,
    ) -> Result<Vec<Update>, TelegramError> {
        let body = GetUpdatesRequest {
            offset,
            timeout: poll_timeout.as_secs(),
            allowed_updates: ALLOWED_UPDATES,
        };
        self.call("getUpdates", &body, Some(poll_timeout + DEFAULT_TIMEOUT))
            .await
    }

    /// Long-poll with retry on transient network errors and flood control.
    pub async fn get_updates_with_retry(
        &self,
        offset: i64,
        poll_timeout: Duration,
    ) -> Result<Vec<Update>, TelegramError> {
        self.get_updates_with_retry_config(
            offset,
            poll_timeout,
            DEFAULT_NETWORK_RETRIES,
            DEFAULT_MAX_RETRIES,
            DEFAULT_BACKOFF_BASE,
            DEFAULT_BACKOFF_MAX,
        )
        .await
    }

    /// Long-poll with custom retry configuration for both network errors
    /// and rate limits.
    ///
    /// # Arguments
    ///
    /// * `network_retries` - Maximum retry attempts for network errors
    /// * `rate_limit_retries` - Maximum retry attempts for rate limiting
    /// * `backoff_base` - Base delay for exponential backoff
    /// * `backoff_max` - Maximum delay cap for backoff
    ///
    /// # Errors
    ///
    /// Returns `TelegramError::NetworkError` once network retries are
    /// exhausted, `TelegramError::RateLimit` once rate-limit retries are
    /// exhausted, and any other error immediately.
    pub async fn get_updates_with_retry_config(
        &self,
        offset: i64,
        poll_timeout: Duration,
        network_retries: u32,
        rate_limit_retries: u32,
        backoff_base: Duration,
        backoff_max: Duration,
    ) -> Result<Vec<Update>, TelegramError> {
        let mut network_attempt = 0u32;
        let mut rate_limit_attempt = 0u32;

        loop {
            match self.get_updates(offset, poll_timeout).await {
                Ok(updates) => return Ok(updates),

                Err(TelegramError::Http(ref http_err)) if is_transient_network_error(http_err) => {
                    network_attempt += 1;

                    if network_attempt > network_retries {
                        log::error!(
                            "Network error after {} attempts. Giving up. Error: {}",
                            network_attempt,
                            http_err
                        );
                        return Err(TelegramError::NetworkError {
                            message: http_err.to_string(),
                            attempts: network_attempt,
                        });
                    }

                    let delay = calculate_backoff(network_attempt - 1, backoff_base, backoff_max);
                    log::warn!(
                        "Network error (attempt {}/{}): {}. Retrying in {:?}...",
                        network_attempt,
                        network_retries + 1,
                        http_err,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }

                Err(TelegramError::RateLimit {
                    message,
                    retry_after_secs,
                }) => {
                    rate_limit_attempt += 1;

                    if rate_limit_attempt > rate_limit_retries {
                        log::error!(
                            "Rate limit exceeded after {} attempts. Giving up.",
                            rate_limit_attempt
                        );
                        return Err(TelegramError::RateLimit {
                            message,
                            retry_after_secs,
                        });
                    }

                    let delay = rate_limit_delay(
                        retry_after_secs,
                        rate_limit_attempt - 1,
                        backoff_base,
                        backoff_max,
                    );
                    log::info!(
                        "Rate limited (attempt {}/{}). Retrying in {:?}...",
                        rate_limit_attempt,
                        rate_limit_retries + 1,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }

                Err(e) => return Err(e),
            }
        }
    }

    /// Resolve a file id to a downloadable path (`getFile`).
    pub async fn get_file(&self, file_id: &str) -> Result<File, TelegramError> {
        self.call("getFile", &GetFileRequest { file_id }, None).await
    }

    /// Download a file to disk.
    ///
    /// Streams the body to `dest` without buffering it in memory. `dest`
    /// must already exist or be creatable; its parent is not created.
    ///
    /// # Returns
    ///
    /// The number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns `TelegramError::Api` for a non-success status,
    /// `TelegramError::Http` if the transfer fails, or
    /// `TelegramError::Io` if writing to disk fails.
    pub async fn download_file(&self, file_path: &str, dest: &Path) -> Result<u64, TelegramError> {
        let response = self.http_client.get(self.file_url(file_path)).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TelegramError::Api {
                code: status.as_u16() as i64,
                description: format!("File download failed: {}", error_text),
            });
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        file.flush().await?;
        log::debug!("Downloaded {} bytes to {:?}", written, dest);

        Ok(written)
    }

    /// Send a text message (`sendMessage`).
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: Option<ParseMode>,
    ) -> Result<Message, TelegramError> {
        let body = SendMessageRequest {
            chat_id,
            text,
            parse_mode,
        };
        self.call("sendMessage", &body, None).await
    }

    /// Send a text message, waiting out flood control.
    pub async fn send_message_with_retry(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: Option<ParseMode>,
    ) -> Result<Message, TelegramError> {
        self.send_message_with_retry_config(
            chat_id,
            text,
            parse_mode,
            DEFAULT_MAX_RETRIES,
            DEFAULT_BACKOFF_BASE,
            DEFAULT_BACKOFF_MAX,
        )
        .await
    }

    /// Send a text message with a custom rate-limit retry configuration.
    ///
    /// Only `RateLimit` responses are retried: a 429 means the message was
    /// not delivered, while a network failure may have delivered it.
    pub async fn send_message_with_retry_config(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: Option<ParseMode>,
        rate_limit_retries: u32,
        backoff_base: Duration,
        backoff_max: Duration,
    ) -> Result<Message, TelegramError> {
        let mut attempt = 0u32;

        loop {
            match self.send_message(chat_id, text, parse_mode).await {
                Err(TelegramError::RateLimit {
                    message,
                    retry_after_secs,
                }) if attempt < rate_limit_retries => {
                    let delay = rate_limit_delay(retry_after_secs, attempt, backoff_base, backoff_max);
                    attempt += 1;
                    log::info!(
                        "Rate limited sending to chat {} ({}; attempt {}/{}). Retrying in {:?}...",
                        chat_id,
                        message,
                        attempt,
                        rate_limit_retries + 1,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }

    /// Delete a message (`deleteMessage`).
    pub async fn delete_message(&self, chat_id: i64, message_id: i64) -> Result<(), TelegramError> {
        let body = DeleteMessageRequest {
            chat_id,
            message_id,
        };
        let _: bool = self.call("deleteMessage", &body, None).await?;
        Ok(())
    }
}

/// Errors that can occur during Bot API operations.
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("Bot token not configured")]
    MissingToken,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Bot API error {code}: {description}")]
    Api {
        /// Bot API `error_code`, or the HTTP status when none was given
        code: i64,
        description: String,
    },

    #[error("Rate limited: {message}")]
    RateLimit {
        message: String,
        /// `parameters.retry_after` from the response, if provided
        retry_after_secs: Option<u64>,
    },

    #[error("Network error: {message} (after {attempts} attempts)")]
    NetworkError { message: String, attempts: u32 },

    #[error("File {file_id} has no download path")]
    MissingFilePath { file_id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
