//! HTTP client for the remote to-do store
//!
//! Every call carries the client-wide timeout so a hung upstream never
//! stalls a scheduler tick; callers treat a timeout like any other fetch
//! failure.

use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::models::{GuildConfig, KnownUser, Reminder, Task};
use crate::language::LanguagePack;

/// List responses wrap their payload in a `data` array.
#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct CountResponse {
    #[serde(default)]
    count: i64,
}

#[derive(Debug, Deserialize)]
struct LanguageResponse {
    language: LanguagePack,
}

/// Generic `{code, message, error?}` acknowledgement for mutations.
#[derive(Debug, Deserialize)]
struct AckResponse {
    #[serde(default)]
    error: Option<String>,
}

/// Async client for the task/config/reminder/language store.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client with a bounded per-request timeout.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;
        Ok(ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------

    pub async fn tasks_by_user(&self, user_id: &str) -> Result<Vec<Task>> {
        let response: ListResponse<Task> = self
            .http
            .get(self.url("/tasks/user"))
            .query(&[("id", user_id)])
            .send()
            .await
            .with_context(|| format!("fetching tasks for user {user_id}"))?
            .json()
            .await
            .context("decoding task list")?;
        Ok(response.data)
    }

    pub async fn tasks_by_guild(&self, guild_id: &str) -> Result<Vec<Task>> {
        let response: ListResponse<Task> = self
            .http
            .get(self.url("/tasks/guild"))
            .query(&[("id", guild_id)])
            .send()
            .await
            .with_context(|| format!("fetching tasks for guild {guild_id}"))?
            .json()
            .await
            .context("decoding task list")?;
        Ok(response.data)
    }

    pub async fn task_count(&self) -> Result<i64> {
        let response: CountResponse = self
            .http
            .get(self.url("/tasks/count"))
            .send()
            .await
            .context("fetching task count")?
            .json()
            .await
            .context("decoding task count")?;
        Ok(response.count)
    }

    pub async fn add_task(
        &self,
        user_id: &str,
        guild_id: &str,
        task: &str,
        date: &str,
    ) -> Result<()> {
        let body = json!({
            "guildID": guild_id,
            "userID": user_id,
            "task": task,
            "date": date,
        });
        self.http
            .post(self.url("/tasks"))
            .json(&body)
            .send()
            .await
            .context("creating task")?
            .error_for_status()
            .context("store rejected task creation")?;
        debug!("Created task for user {user_id} in guild {guild_id}");
        Ok(())
    }

    /// Delete a task by id. Deleting an id that is already gone is treated
    /// as success: the store returns a not-found ack rather than an error,
    /// and the scheduler relies on this being idempotent.
    pub async fn delete_task(&self, user_id: &str, task_id: i64) -> Result<()> {
        let body = json!({ "userID": user_id, "id": task_id });
        let response = self
            .http
            .delete(self.url("/tasks"))
            .json(&body)
            .send()
            .await
            .with_context(|| format!("deleting task {task_id}"))?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            debug!("Task {task_id} already deleted");
            return Ok(());
        }
        response
            .error_for_status()
            .with_context(|| format!("store rejected deletion of task {task_id}"))?;
        Ok(())
    }

    pub async fn update_task_status(&self, task_id: i64, done: bool) -> Result<()> {
        let body = json!({ "status": done });
        self.http
            .patch(self.url(&format!("/tasks/{task_id}")))
            .json(&body)
            .send()
            .await
            .with_context(|| format!("updating task {task_id}"))?
            .error_for_status()
            .with_context(|| format!("store rejected status update of task {task_id}"))?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Guild config
    // ------------------------------------------------------------------

    /// Fetch a guild's config, creating the default one when the store has
    /// none yet. The bot never operates on an absent config; joining a guild
    /// creates one, but a missed `guild_create` must not wedge the guild.
    pub async fn config(&self, guild_id: &str) -> Result<GuildConfig> {
        let response = self
            .http
            .get(self.url("/config"))
            .query(&[("guildID", guild_id)])
            .send()
            .await
            .with_context(|| format!("fetching config for guild {guild_id}"))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            warn!("No config for guild {guild_id}, creating default");
            self.create_config(guild_id).await?;
            return Ok(GuildConfig {
                guild_id: guild_id.to_string(),
                channel_id: String::new(),
                user_id: String::new(),
                language: "en".to_string(),
            });
        }

        response
            .error_for_status()
            .context("store rejected config fetch")?
            .json()
            .await
            .context("decoding guild config")
    }

    pub async fn create_config(&self, guild_id: &str) -> Result<()> {
        let body = json!({ "guildID": guild_id, "language": "en" });
        self.http
            .post(self.url("/config"))
            .json(&body)
            .send()
            .await
            .with_context(|| format!("creating config for guild {guild_id}"))?
            .error_for_status()
            .context("store rejected config creation")?;
        Ok(())
    }

    pub async fn update_config(
        &self,
        guild_id: &str,
        channel_id: &str,
        user_id: &str,
        language: &str,
    ) -> Result<()> {
        let body = json!({
            "guildID": guild_id,
            "channelID": channel_id,
            "userID": user_id,
            "language": language,
        });
        self.http
            .patch(self.url("/config"))
            .json(&body)
            .send()
            .await
            .with_context(|| format!("updating config for guild {guild_id}"))?
            .error_for_status()
            .context("store rejected config update")?;
        Ok(())
    }

    pub async fn delete_config(&self, guild_id: &str) -> Result<()> {
        let body = json!({ "guildID": guild_id });
        self.http
            .delete(self.url("/config"))
            .json(&body)
            .send()
            .await
            .with_context(|| format!("deleting config for guild {guild_id}"))?
            .error_for_status()
            .context("store rejected config deletion")?;
        Ok(())
    }

    /// Guild ids that currently have a config, i.e. every guild the bot is
    /// a member of.
    pub async fn config_guilds(&self) -> Result<Vec<String>> {
        let guilds: Vec<String> = self
            .http
            .get(self.url("/config/guilds"))
            .send()
            .await
            .context("fetching configured guilds")?
            .json()
            .await
            .context("decoding guild list")?;
        Ok(guilds)
    }

    // ------------------------------------------------------------------
    // Reminders
    // ------------------------------------------------------------------

    pub async fn reminders(&self, user_id: &str) -> Result<Vec<Reminder>> {
        let response: ListResponse<Reminder> = self
            .http
            .get(self.url("/reminders"))
            .query(&[("userID", user_id)])
            .send()
            .await
            .with_context(|| format!("fetching reminders for user {user_id}"))?
            .json()
            .await
            .context("decoding reminder list")?;
        Ok(response.data)
    }

    pub async fn add_reminder(&self, user_id: &str, hour: u32, minute: u32) -> Result<()> {
        let body = json!({ "userID": user_id, "hour": hour, "minute": minute });
        let ack: AckResponse = self
            .http
            .post(self.url("/reminders"))
            .json(&body)
            .send()
            .await
            .context("creating reminder")?
            .json()
            .await
            .context("decoding reminder ack")?;
        if let Some(error) = ack.error {
            return Err(anyhow!("store rejected reminder: {error}"));
        }
        Ok(())
    }

    pub async fn delete_reminder(&self, user_id: &str, reminder_id: i64) -> Result<()> {
        let body = json!({ "userID": user_id, "id": reminder_id });
        let ack: AckResponse = self
            .http
            .delete(self.url("/reminders"))
            .json(&body)
            .send()
            .await
            .with_context(|| format!("deleting reminder {reminder_id}"))?
            .json()
            .await
            .context("decoding reminder ack")?;
        if let Some(error) = ack.error {
            return Err(anyhow!("store rejected reminder deletion: {error}"));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Language and users
    // ------------------------------------------------------------------

    /// The store-wide default language pack (used for presence text).
    pub async fn language(&self) -> Result<LanguagePack> {
        let response: LanguageResponse = self
            .http
            .get(self.url("/language"))
            .send()
            .await
            .context("fetching language pack")?
            .json()
            .await
            .context("decoding language pack")?;
        Ok(response.language)
    }

    /// The language pack selected by a guild's `language` config field.
    pub async fn language_for_guild(&self, guild_id: &str) -> Result<LanguagePack> {
        let response: LanguageResponse = self
            .http
            .get(self.url("/language"))
            .query(&[("guildID", guild_id)])
            .send()
            .await
            .with_context(|| format!("fetching language pack for guild {guild_id}"))?
            .json()
            .await
            .context("decoding language pack")?;
        Ok(response.language)
    }

    /// Every user id known to the store.
    pub async fn users(&self) -> Result<Vec<String>> {
        let users: Vec<KnownUser> = self
            .http
            .get(self.url("/users"))
            .send()
            .await
            .context("fetching known users")?
            .json()
            .await
            .context("decoding user list")?;
        Ok(users.into_iter().map(|u| u.user_id).collect())
    }
}
