//! Utility command handlers
//!
//! Handles: ping, help

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::create_slash_commands;

use super::respond;

/// Handler for utility commands: ping, help
pub struct UtilityHandler;

#[async_trait]
impl SlashCommandHandler for UtilityHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["ping", "help"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        match command.data.name.as_str() {
            "ping" => self.handle_ping(&ctx, serenity_ctx, command).await,
            "help" => self.handle_help(serenity_ctx, command).await,
            _ => Ok(()),
        }
    }
}

impl UtilityHandler {
    /// Handle /ping command
    async fn handle_ping(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let uptime = format_uptime(ctx.start_time.elapsed().as_secs());
        respond(serenity_ctx, command, &format!("🏓 Pong! Up for {uptime}.")).await
    }

    /// Handle /help command - embed listing every registered command
    async fn handle_help(
        &self,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        // the command builders are serde_json maps underneath, so the
        // definitions double as the help source of truth
        let entries: Vec<(String, String)> = create_slash_commands()
            .iter()
            .filter_map(|cmd| {
                let name = cmd.0.get("name")?.as_str()?.to_string();
                let description = cmd.0.get("description")?.as_str()?.to_string();
                Some((name, description))
            })
            .collect();

        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| {
                        message.embed(|embed| {
                            embed.title("Commands").color(0x2ECC71);
                            for (name, description) in &entries {
                                embed.field(format!("/{name}"), description, false);
                            }
                            embed
                        })
                    })
            })
            .await?;
        Ok(())
    }
}

/// Render seconds of uptime as a compact human string.
fn format_uptime(seconds: u64) -> String {
    let (days, rem) = (seconds / 86_400, seconds % 86_400);
    let (hours, rem) = (rem / 3_600, rem % 3_600);
    let minutes = rem / 60;
    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utility_handler_commands() {
        let handler = UtilityHandler;
        let names = handler.command_names();
        assert!(names.contains(&"ping"));
        assert!(names.contains(&"help"));
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(59), "0m");
        assert_eq!(format_uptime(60), "1m");
        assert_eq!(format_uptime(3_660), "1h 1m");
        assert_eq!(format_uptime(90_061), "1d 1h 1m");
    }
}
