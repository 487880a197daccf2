//! Reminder command handler
//!
//! Handles: reminder (list / add / delete). Times are local wall-clock
//! `HH:MM` at the deployment's fixed offset.

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
use crate::commands::slash::{get_integer_option, get_string_option};
use crate::language::{render, LanguagePack};

use super::respond;

/// Handler for the /reminder command
pub struct ReminderHandler;

#[async_trait]
impl SlashCommandHandler for ReminderHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["reminder"]
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

        let Some(subcommand) = command.data.options.first() else {
            return Ok(());
        };

        match subcommand.name.as_str() {
            "list" => self.handle_list(&ctx, serenity_ctx, command, &pack).await,
            "add" => {
                self.handle_add(&ctx, serenity_ctx, command, &subcommand.options, &pack)
                    .await
            }
            "delete" => {
                self.handle_delete(&ctx, serenity_ctx, command, &subcommand.options, &pack)
                    .await
            }
            _ => Ok(()),
        }
    }
}

impl ReminderHandler {
    /// Handle /reminder list
    async fn handle_list(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        pack: &LanguagePack,
    ) -> Result<()> {
        let user_id = command.user.id.to_string();
        let reminders = ctx.api.reminders(&user_id).await?;

        if reminders.is_empty() {
            return respond(serenity_ctx, command, &pack.no_reminders).await;
        }

        let lines = reminders
            .iter()
            .map(|r| format!("- {}. {:02}:{:02}", r.id, r.hour, r.minute))
            .collect::<Vec<_>>()
            .join("\n");
        respond(serenity_ctx, command, &render(&pack.reminder_list, &[&lines])).await
    }

    /// Handle /reminder add
    async fn handle_add(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        options: &[CommandDataOption],
        pack: &LanguagePack,
    ) -> Result<()> {
        let time = get_string_option(options, "time").unwrap_or_default();
        let Some((hour, minute)) = parse_time(&time) else {
            return respond(serenity_ctx, command, &pack.reminder_error).await;
        };

        let user_id = command.user.id.to_string();
        match ctx.api.add_reminder(&user_id, hour, minute).await {
            Ok(()) => {
                info!("Reminder {hour:02}:{minute:02} added for user {user_id}");
                respond(serenity_ctx, command, &pack.add_reminder).await
            }
            Err(e) => {
                info!("Reminder add rejected for user {user_id}: {e}");
                respond(serenity_ctx, command, &pack.reminder_error).await
            }
        }
    }

    /// Handle /reminder delete
    async fn handle_delete(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        options: &[CommandDataOption],
        pack: &LanguagePack,
    ) -> Result<()> {
        let Some(reminder_id) = get_integer_option(options, "id") else {
            return respond(serenity_ctx, command, &pack.reminder_error).await;
        };

        let user_id = command.user.id.to_string();
        match ctx.api.delete_reminder(&user_id, reminder_id).await {
            Ok(()) => {
                info!("Reminder {reminder_id} deleted for user {user_id}");
                respond(serenity_ctx, command, &pack.remove_reminder).await
            }
            Err(e) => {
                info!("Reminder delete rejected for user {user_id}: {e}");
                respond(serenity_ctx, command, &pack.reminder_error).await
            }
        }
    }
}

/// Parse `HH:MM` into an in-range (hour, minute) pair.
fn parse_time(time: &str) -> Option<(u32, u32)> {
    let (hour, minute) = time.trim().split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    (hour < 24 && minute < 60).then_some((hour, minute))
}
