//! Wire types for the remote to-do store
//!
//! Field renames follow the store's camelCase JSON keys.

use serde::{Deserialize, Serialize};

/// A dated to-do task owned by one user inside one guild.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "guildID")]
    pub guild_id: String,
    /// Free-form task description.
    pub task: String,
    /// Due date, `YYYY-MM-DD`.
    pub date: String,
    /// `true` once the task is marked done.
    pub status: bool,
}

impl Task {
    pub fn is_pending(&self) -> bool {
        !self.status
    }

    /// Done tasks whose due date has passed are eligible for cleanup
    /// deletion. `YYYY-MM-DD` strings compare correctly lexicographically.
    pub fn is_overdue_done(&self, today: &str) -> bool {
        self.status && self.date.as_str() < today
    }
}

/// A user's daily reminder time, in local wall-clock hours/minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    #[serde(rename = "reminderID", alias = "id")]
    pub id: i64,
    #[serde(rename = "userID", default)]
    pub user_id: String,
    pub hour: u32,
    pub minute: u32,
}

impl Reminder {
    /// The store should only hand out in-range times, but a malformed row
    /// must be skipped by the scheduler rather than matched.
    pub fn is_valid(&self) -> bool {
        self.hour < 24 && self.minute < 60
    }
}

/// Per-guild notification settings. `channel_id` and `user_id` are empty
/// strings until an admin runs `/config set`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildConfig {
    #[serde(rename = "guildID")]
    pub guild_id: String,
    #[serde(rename = "channelID", default)]
    pub channel_id: String,
    #[serde(rename = "userID", default)]
    pub user_id: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

/// A user id known to the store (anyone who ever created a task/reminder).
#[derive(Debug, Clone, Deserialize)]
pub struct KnownUser {
    #[serde(rename = "userID")]
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_wire_format() {
        let json = r#"{
            "id": 3,
            "userID": "111",
            "guildID": "222",
            "task": "water the plants",
            "date": "2024-01-01",
            "status": false
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 3);
        assert_eq!(task.user_id, "111");
        assert!(task.is_pending());
        assert!(!task.is_overdue_done("2024-01-02"));
    }

    #[test]
    fn test_overdue_done_requires_done_status() {
        let done = Task {
            id: 1,
            user_id: "u".into(),
            guild_id: "g".into(),
            task: "t".into(),
            date: "2023-12-01".into(),
            status: true,
        };
        let pending = Task { status: false, ..done.clone() };
        assert!(done.is_overdue_done("2024-01-02"));
        assert!(!pending.is_overdue_done("2024-01-02"));
        // due today is not overdue
        assert!(!Task { date: "2024-01-02".into(), ..done }.is_overdue_done("2024-01-02"));
    }

    #[test]
    fn test_reminder_accepts_both_id_keys() {
        let a: Reminder =
            serde_json::from_str(r#"{"reminderID": 5, "hour": 9, "minute": 30}"#).unwrap();
        let b: Reminder = serde_json::from_str(r#"{"id": 5, "hour": 9, "minute": 30}"#).unwrap();
        assert_eq!(a.id, 5);
        assert_eq!(b.id, 5);
        assert!(a.is_valid());
    }

    #[test]
    fn test_reminder_range_validation() {
        let bad_hour = Reminder { id: 1, user_id: String::new(), hour: 24, minute: 0 };
        let bad_minute = Reminder { id: 1, user_id: String::new(), hour: 0, minute: 60 };
        assert!(!bad_hour.is_valid());
        assert!(!bad_minute.is_valid());
    }

    #[test]
    fn test_guild_config_defaults() {
        let config: GuildConfig = serde_json::from_str(r#"{"guildID": "222"}"#).unwrap();
        assert_eq!(config.guild_id, "222");
        assert!(config.channel_id.is_empty());
        assert!(config.user_id.is_empty());
        assert_eq!(config.language, "en");
    }
}
