//! Long-polling loop.

use std::future::Future;

use crate::telegram::{TelegramError, Update};

use super::handler::Bot;

impl Bot {
    /// Run until Ctrl-C.
    pub async fn run(&self) -> Result<(), TelegramError> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Poll and handle updates until `shutdown` completes.
    ///
    /// Updates are handled one at a time, in order. A poll that still fails
    /// after its retries ends the loop with that error.
    pub async fn run_until<F>(&self, shutdown: F) -> Result<(), TelegramError>
    where
        F: Future<Output = ()>,
    {
        let me = self.client.get_me().await?;
        log::info!(
            "Bot is running as @{}",
            me.username.as_deref().unwrap_or(&me.first_name)
        );

        tokio::pin!(shutdown);
        let mut offset = 0i64;

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    log::info!("Shutting down");
                    return Ok(());
                }
                result = self.poll_once(offset) => {
                    offset = result?;
                }
            }
        }
    }

    /// Fetch one batch of updates, handle it, and return the next offset.
    pub async fn poll_once(&self, offset: i64) -> Result<i64, TelegramError> {
        let updates = self
            .client
            .get_updates_with_retry(offset, self.settings.poll_timeout)
            .await?;
        Ok(self.handle_updates(updates, offset).await)
    }

    /// Handle a batch of updates and return the offset acknowledging them.
    pub async fn handle_updates(&self, updates: Vec<Update>, offset: i64) -> i64 {
        let mut next = offset;
        for update in updates {
            next = next.max(update.update_id + 1);
            if let Some(message) = update.message {
                self.handle_message(&message).await;
            }
        }
        next
    }
}
