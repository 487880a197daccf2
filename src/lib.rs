// Core layer - configuration and Discord message utilities
pub mod core;

// API layer - typed client for the remote to-do store
pub mod api;

// Language layer - per-guild message templates
pub mod language;

// Application layer - slash command handling
pub mod commands;

// Scheduler layer - reminder matching and notification fan-out
pub mod scheduler;

// Re-export core config for convenience
pub use core::Config;

pub use api::{ApiClient, GuildConfig, Reminder, Task, TaskStore};
pub use commands::{CommandContext, CommandRegistry, SlashCommandHandler};
pub use language::LanguagePack;
pub use scheduler::{DispatchError, NotificationDispatcher, Notifier, ReminderScheduler};
