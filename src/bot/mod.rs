//! Chat bot glue around the converter.
//!
//! Receives photos over the Bot API, stores each one in a scoped temporary
//! file, converts it and replies with the art in a fenced code block.
//! Failures become a generic apology to the sender; the loop keeps running.

mod format;
mod handler;
mod runner;
mod temp_file;

pub use format::{escape_code, fenced, fenced_chunks, MAX_MESSAGE_LEN};
pub use handler::{
    select_largest_photo, Bot, Command, HandlerError, GENERIC_ERROR_MESSAGE, HINT_MESSAGE,
    PROCESSING_MESSAGE, WELCOME_MESSAGE,
};
pub use temp_file::TempImage;
