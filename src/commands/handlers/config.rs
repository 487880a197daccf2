//! Guild configuration command handler
//!
//! Handles: config (get / set / reset), owner-only

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serenity::model::application::interaction::application_command::{
    ApplicationCommandInteraction, CommandDataOption,
};
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::{get_channel_option, get_string_option, get_user_option};
use crate::language::{render, LanguagePack};

use super::respond;

/// Handler for the /config command
pub struct ConfigHandler;

#[async_trait]
impl SlashCommandHandler for ConfigHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["config"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let Some(guild_id) = command.guild_id else {
            return respond(serenity_ctx, command, "This command only works in a server.").await;
        };
        let pack = ctx.api.language_for_guild(&guild_id.to_string()).await?;

        let owner_id = match serenity_ctx.cache.guild(guild_id) {
            Some(guild) => guild.owner_id,
            None => serenity_ctx.http.get_guild(guild_id.0).await?.owner_id,
        };
        if command.user.id != owner_id {
            return respond(serenity_ctx, command, &pack.owner_error).await;
        }

        let Some(subcommand) = command.data.options.first() else {
            return Ok(());
        };

        let guild_id = guild_id.to_string();
        match subcommand.name.as_str() {
            "get" => {
                self.handle_get(&ctx, serenity_ctx, command, &pack, &guild_id)
                    .await
            }
            "set" => {
                self.handle_set(
                    &ctx,
                    serenity_ctx,
                    command,
                    &subcommand.options,
                    &pack,
                    &guild_id,
                )
                .await
            }
            "reset" => {
                self.handle_reset(&ctx, serenity_ctx, command, &pack, &guild_id)
                    .await
            }
            _ => Ok(()),
        }
    }
}

impl ConfigHandler {
    /// Handle /config get - show the current settings
    async fn handle_get(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        pack: &LanguagePack,
        guild_id: &str,
    ) -> Result<()> {
        match ctx.api.config(guild_id).await {
            Ok(config) => {
                let message = render(
                    &pack.get_config,
                    &[&config.channel_id, &config.user_id, &config.language],
                );
                respond(serenity_ctx, command, &message).await
            }
            Err(e) => {
                info!("Config lookup failed for guild {guild_id}: {e}");
                respond(serenity_ctx, command, &pack.config_error).await
            }
        }
    }

    /// Handle /config set - update channel, mention target, and/or language
    async fn handle_set(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        options: &[CommandDataOption],
        pack: &LanguagePack,
        guild_id: &str,
    ) -> Result<()> {
        let channel = get_channel_option(options, "channel").map(|id| id.to_string());
        let user = get_user_option(options, "user").map(|id| id.to_string());
        let language = get_string_option(options, "language");

        if channel.is_none() && user.is_none() && language.is_none() {
            return respond(serenity_ctx, command, &pack.save_error).await;
        }

        ctx.api
            .update_config(
                guild_id,
                channel.as_deref().unwrap_or(""),
                user.as_deref().unwrap_or(""),
                language.as_deref().unwrap_or(""),
            )
            .await?;
        info!("Config updated for guild {guild_id}");

        respond(serenity_ctx, command, &pack.saved).await
    }

    /// Handle /config reset - back to defaults, language en
    async fn handle_reset(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        pack: &LanguagePack,
        guild_id: &str,
    ) -> Result<()> {
        ctx.api.update_config(guild_id, "", "", "en").await?;
        info!("Config reset for guild {guild_id}");

        respond(serenity_ctx, command, &pack.config_reset).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_handler_commands() {
        let handler = ConfigHandler;
        assert_eq!(handler.command_names(), &["config"]);
    }
}
