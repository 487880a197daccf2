//! # Command System
//!
//! Slash command (/) handling: a `SlashCommandHandler` trait per command
//! family, a name-keyed registry populated explicitly at startup, and the
//! command definitions/registration against the Discord API.

pub mod context;
pub mod handler;
pub mod handlers;
pub mod registry;
pub mod slash;

pub use context::CommandContext;
pub use handler::SlashCommandHandler;
pub use registry::CommandRegistry;

pub use slash::{
    create_slash_commands, get_channel_option, get_integer_option, get_string_option,
    get_user_option, register_global_commands, register_guild_commands,
};
