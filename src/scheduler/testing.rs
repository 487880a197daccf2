//! In-memory fakes for scheduler tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::api::{GuildConfig, Reminder, Task, TaskStore};
use crate::language::LanguagePack;

use super::notify::Notifier;

pub fn task(id: i64, user: &str, guild: &str, text: &str, date: &str, done: bool) -> Task {
    Task {
        id,
        user_id: user.to_string(),
        guild_id: guild.to_string(),
        task: text.to_string(),
        date: date.to_string(),
        status: done,
    }
}

/// Recording in-memory stand-in for the remote store. Guilds registered via
/// `with_guild_tasks` get a config pointing at channel `chan-<guild>` with
/// mention target `owner-<guild>`.
#[derive(Default)]
pub struct FakeStore {
    users: Vec<String>,
    reminders: HashMap<String, Vec<Reminder>>,
    failing_reminder_users: HashSet<String>,
    guilds: Vec<String>,
    configs: HashMap<String, GuildConfig>,
    tasks: HashMap<String, Vec<Task>>,
    task_count: i64,
    fail_count: bool,
    failing_deletes: HashSet<i64>,
    deletes: Mutex<Vec<i64>>,
}

impl FakeStore {
    pub fn new() -> Self {
        FakeStore::default()
    }

    pub fn with_guild_tasks(mut self, guild: &str, tasks: Vec<Task>) -> Self {
        self.guilds.push(guild.to_string());
        self.configs.insert(
            guild.to_string(),
            GuildConfig {
                guild_id: guild.to_string(),
                channel_id: format!("chan-{guild}"),
                user_id: format!("owner-{guild}"),
                language: "en".to_string(),
            },
        );
        self.tasks.insert(guild.to_string(), tasks);
        self
    }

    pub fn with_user_reminder(mut self, user: &str, hour: u32, minute: u32) -> Self {
        if !self.users.contains(&user.to_string()) {
            self.users.push(user.to_string());
        }
        let next_id = 1 + self.reminders.values().map(Vec::len).sum::<usize>() as i64;
        self.reminders.entry(user.to_string()).or_default().push(Reminder {
            id: next_id,
            user_id: user.to_string(),
            hour,
            minute,
        });
        self
    }

    /// Register a user whose reminder fetch always fails.
    pub fn with_failing_reminders(mut self, user: &str) -> Self {
        self.users.push(user.to_string());
        self.failing_reminder_users.insert(user.to_string());
        self
    }

    pub fn with_failing_delete(mut self, task_id: i64) -> Self {
        self.failing_deletes.insert(task_id);
        self
    }

    pub fn with_task_count(mut self, count: i64) -> Self {
        self.task_count = count;
        self
    }

    pub fn with_failing_count(mut self) -> Self {
        self.fail_count = true;
        self
    }

    pub fn deleted_ids(&self) -> Vec<i64> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskStore for FakeStore {
    async fn users(&self) -> Result<Vec<String>> {
        Ok(self.users.clone())
    }

    async fn reminders(&self, user_id: &str) -> Result<Vec<Reminder>> {
        if self.failing_reminder_users.contains(user_id) {
            return Err(anyhow!("simulated reminder fetch failure for {user_id}"));
        }
        Ok(self.reminders.get(user_id).cloned().unwrap_or_default())
    }

    async fn config_guilds(&self) -> Result<Vec<String>> {
        Ok(self.guilds.clone())
    }

    async fn config(&self, guild_id: &str) -> Result<GuildConfig> {
        self.configs
            .get(guild_id)
            .cloned()
            .ok_or_else(|| anyhow!("no config for guild {guild_id}"))
    }

    async fn tasks_by_guild(&self, guild_id: &str) -> Result<Vec<Task>> {
        Ok(self.tasks.get(guild_id).cloned().unwrap_or_default())
    }

    async fn task_count(&self) -> Result<i64> {
        if self.fail_count {
            return Err(anyhow!("simulated count failure"));
        }
        Ok(self.task_count)
    }

    async fn language(&self) -> Result<LanguagePack> {
        Ok(LanguagePack::default())
    }

    async fn language_for_guild(&self, _guild_id: &str) -> Result<LanguagePack> {
        Ok(LanguagePack::default())
    }

    async fn delete_task(&self, _user_id: &str, task_id: i64) -> Result<()> {
        if self.failing_deletes.contains(&task_id) {
            return Err(anyhow!("simulated delete failure for task {task_id}"));
        }
        self.deletes.lock().unwrap().push(task_id);
        Ok(())
    }
}

/// Recording stand-in for the Discord side.
#[derive(Default)]
pub struct FakeNotifier {
    sent: Mutex<Vec<(String, String)>>,
    notices: Mutex<Vec<String>>,
    presences: Mutex<Vec<String>>,
    missing_guilds: HashSet<String>,
    missing_channels: HashSet<String>,
}

impl FakeNotifier {
    pub fn new() -> Self {
        FakeNotifier::default()
    }

    pub fn with_missing_guild(mut self, guild_id: &str) -> Self {
        self.missing_guilds.insert(guild_id.to_string());
        self
    }

    pub fn with_missing_channel(mut self, channel_id: &str) -> Self {
        self.missing_channels.insert(channel_id.to_string());
        self
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn operator_notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }

    pub fn presences(&self) -> Vec<String> {
        self.presences.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn guild_exists(&self, guild_id: &str) -> bool {
        !self.missing_guilds.contains(guild_id)
    }

    async fn channel_exists(&self, channel_id: &str) -> bool {
        !self.missing_channels.contains(channel_id)
    }

    async fn send(&self, channel_id: &str, content: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((channel_id.to_string(), content.to_string()));
        Ok(())
    }

    async fn set_presence(&self, text: &str) -> Result<()> {
        self.presences.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn operator_notice(&self, text: &str) {
        self.notices.lock().unwrap().push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builder_assigns_unique_reminder_ids() {
        let store = FakeStore::new()
            .with_user_reminder("u1", 9, 0)
            .with_user_reminder("u1", 18, 30)
            .with_user_reminder("u2", 7, 0);

        let mut ids: Vec<i64> = Vec::new();
        for user in ["u1", "u2"] {
            for reminder in store.reminders(user).await.unwrap() {
                ids.push(reminder.id);
            }
        }
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
