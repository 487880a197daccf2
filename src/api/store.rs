//! Read/delete seam used by the reminder scheduler
//!
//! The scheduler only ever reads from the store and deletes overdue tasks;
//! putting that slice behind a trait lets the tick and dispatch logic run
//! against an in-memory fake in tests.

use anyhow::Result;
use async_trait::async_trait;

use super::client::ApiClient;
use super::models::{GuildConfig, Reminder, Task};
use crate::language::LanguagePack;

/// The slice of the remote store the scheduler depends on.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn users(&self) -> Result<Vec<String>>;
    async fn reminders(&self, user_id: &str) -> Result<Vec<Reminder>>;
    async fn config_guilds(&self) -> Result<Vec<String>>;
    async fn config(&self, guild_id: &str) -> Result<GuildConfig>;
    async fn tasks_by_guild(&self, guild_id: &str) -> Result<Vec<Task>>;
    async fn task_count(&self) -> Result<i64>;
    async fn language(&self) -> Result<LanguagePack>;
    async fn language_for_guild(&self, guild_id: &str) -> Result<LanguagePack>;
    async fn delete_task(&self, user_id: &str, task_id: i64) -> Result<()>;
}

#[async_trait]
impl TaskStore for ApiClient {
    async fn users(&self) -> Result<Vec<String>> {
        ApiClient::users(self).await
    }

    async fn reminders(&self, user_id: &str) -> Result<Vec<Reminder>> {
        ApiClient::reminders(self, user_id).await
    }

    async fn config_guilds(&self) -> Result<Vec<String>> {
        ApiClient::config_guilds(self).await
    }

    async fn config(&self, guild_id: &str) -> Result<GuildConfig> {
        ApiClient::config(self, guild_id).await
    }

    async fn tasks_by_guild(&self, guild_id: &str) -> Result<Vec<Task>> {
        ApiClient::tasks_by_guild(self, guild_id).await
    }

    async fn task_count(&self) -> Result<i64> {
        ApiClient::task_count(self).await
    }

    async fn language(&self) -> Result<LanguagePack> {
        ApiClient::language(self).await
    }

    async fn language_for_guild(&self, guild_id: &str) -> Result<LanguagePack> {
        ApiClient::language_for_guild(self, guild_id).await
    }

    async fn delete_task(&self, user_id: &str, task_id: i64) -> Result<()> {
        ApiClient::delete_task(self, user_id, task_id).await
    }
}
