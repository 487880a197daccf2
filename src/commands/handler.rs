//! Slash command handler trait

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

use super::context::CommandContext;

/// One handler per command family; registered with a [`CommandRegistry`]
/// and dispatched by command name.
///
/// [`CommandRegistry`]: super::registry::CommandRegistry
#[async_trait]
pub trait SlashCommandHandler: Send + Sync {
    /// Command name(s) this handler processes.
    fn command_names(&self) -> &'static [&'static str];

    /// Handle the slash command.
    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // The registry stores handlers as trait objects
    fn _assert_object_safe(_: &dyn SlashCommandHandler) {}
}
