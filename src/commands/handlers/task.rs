//! Task command handlers
//!
//! Handles: add, list, delete, setdone, setpending

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use log::info;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::api::Task;
use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::{get_integer_option, get_string_option};
use crate::core::response::truncate_for_message;
use crate::language::{render, LanguagePack};
use crate::scheduler::clock::due_date_epoch;

use super::respond;

/// Handler for task CRUD commands
pub struct TaskHandler;

#[async_trait]
impl SlashCommandHandler for TaskHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["add", "list", "delete", "setdone", "setpending"]
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
        let guild_id = guild_id.to_string();
        let pack = ctx.api.language_for_guild(&guild_id).await?;

        match command.data.name.as_str() {
            "add" => {
                self.handle_add(&ctx, serenity_ctx, command, &pack, &guild_id)
                    .await
            }
            "list" => self.handle_list(&ctx, serenity_ctx, command, &pack).await,
            "delete" => self.handle_delete(&ctx, serenity_ctx, command, &pack).await,
            "setdone" => {
                self.handle_set_status(&ctx, serenity_ctx, command, &pack, true)
                    .await
            }
            "setpending" => {
                self.handle_set_status(&ctx, serenity_ctx, command, &pack, false)
                    .await
            }
            _ => Ok(()),
        }
    }
}

impl TaskHandler {
    /// Handle /add - create a dated task
    async fn handle_add(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        pack: &LanguagePack,
        guild_id: &str,
    ) -> Result<()> {
        let date = get_string_option(&command.data.options, "date")
            .ok_or_else(|| anyhow::anyhow!("Missing date parameter"))?;
        let task = get_string_option(&command.data.options, "task")
            .ok_or_else(|| anyhow::anyhow!("Missing task parameter"))?;

        if NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
            return respond(
                serenity_ctx,
                command,
                "❌ Invalid date. Use `YYYY-MM-DD`, e.g. `2024-06-01`.",
            )
            .await;
        }

        let user_id = command.user.id.to_string();
        ctx.api.add_task(&user_id, guild_id, &task, &date).await?;
        info!("Task added for user {user_id} in guild {guild_id}: {task} ({date})");

        respond(serenity_ctx, command, &render(&pack.add, &[&task, &date])).await
    }

    /// Handle /list - the caller's tasks, optionally filtered by status
    async fn handle_list(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        pack: &LanguagePack,
    ) -> Result<()> {
        let user_id = command.user.id.to_string();
        let status_filter = get_string_option(&command.data.options, "status");

        let mut tasks = ctx.api.tasks_by_user(&user_id).await?;
        if let Some(status) = &status_filter {
            let want_done = status == "done";
            tasks.retain(|task| task.status == want_done);
        }

        if tasks.is_empty() {
            return respond(serenity_ctx, command, &pack.no_tasks).await;
        }

        let lines = tasks
            .iter()
            .map(|task| self.format_task_line(ctx, task, pack))
            .collect::<Vec<_>>()
            .join("\n");

        let message = match &status_filter {
            Some(status) => {
                let label = if status == "done" { &pack.done } else { &pack.pending };
                render(
                    &pack.list_status,
                    &[&tasks.len().to_string(), label, &lines],
                )
            }
            None => render(&pack.list, &[&lines]),
        };

        respond(serenity_ctx, command, &truncate_for_message(&message)).await
    }

    /// Handle /delete - remove one of the caller's tasks
    async fn handle_delete(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        pack: &LanguagePack,
    ) -> Result<()> {
        let Some(task_id) = get_integer_option(&command.data.options, "id") else {
            return respond(serenity_ctx, command, "❌ Provide a task id.").await;
        };
        let user_id = command.user.id.to_string();
        ctx.api.delete_task(&user_id, task_id).await?;
        info!("Task {task_id} deleted by user {user_id}");

        respond(
            serenity_ctx,
            command,
            &render(&pack.delete_task, &[&task_id.to_string()]),
        )
        .await
    }

    /// Handle /setdone and /setpending
    async fn handle_set_status(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        pack: &LanguagePack,
        done: bool,
    ) -> Result<()> {
        let Some(task_id) = get_integer_option(&command.data.options, "id") else {
            return respond(serenity_ctx, command, "❌ Provide a task id.").await;
        };
        ctx.api.update_task_status(task_id, done).await?;
        info!(
            "Task {task_id} marked {} by user {}",
            if done { "done" } else { "pending" },
            command.user.id
        );

        let template = if done { &pack.set_done } else { &pack.set_undone };
        respond(serenity_ctx, command, &render(template, &[&task_id.to_string()])).await
    }

    fn format_task_line(&self, ctx: &CommandContext, task: &Task, pack: &LanguagePack) -> String {
        let label = if task.status { &pack.done } else { &pack.pending };
        match due_date_epoch(&task.date, ctx.local_utc_offset_hours) {
            Some(epoch) => {
                format!("- {}. {} | <t:{epoch}:F> - **{label}**", task.id, task.task)
            }
            None => format!("- {}. {} | {} - **{label}**", task.id, task.task, task.date),
        }
    }
}
