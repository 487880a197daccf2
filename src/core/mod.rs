//! # Core Module
//!
//! Configuration and shared Discord message utilities for the to-do bot.

pub mod config;
pub mod response;

// Re-export commonly used items
pub use config::Config;
pub use response::{
    chunk_for_message, chunk_text, truncate_for_embed, truncate_for_message, EMBED_LIMIT,
    MESSAGE_LIMIT,
};
