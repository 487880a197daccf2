//! # API Module
//!
//! Typed async client for the remote to-do store. All durable state (tasks,
//! reminders, guild configs, language packs) lives behind this REST/JSON
//! API; the bot itself holds nothing but the timer.

pub mod client;
pub mod models;
pub mod store;

pub use client::ApiClient;
pub use models::{GuildConfig, KnownUser, Reminder, Task};
pub use store::TaskStore;
