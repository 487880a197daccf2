//! # Language Module
//!
//! Per-guild message templates served by the remote store. Every user-facing
//! string is a template with positional `{0}`, `{1}`, ... placeholders so a
//! guild can run the bot in its configured language. Missing keys fall back
//! to the built-in English strings, so a partial pack never panics.

use serde::{Deserialize, Serialize};

/// One guild's message templates, as returned by `GET /language`.
///
/// Field names mirror the wire keys of the store; defaults are the English
/// pack so a sparse response still renders something sensible.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguagePack {
    pub add: String,
    pub list: String,
    pub list_status: String,
    pub no_tasks: String,
    pub done: String,
    pub pending: String,
    #[serde(rename = "deleteTask")]
    pub delete_task: String,
    #[serde(rename = "setDone")]
    pub set_done: String,
    #[serde(rename = "setUndone")]
    pub set_undone: String,
    #[serde(rename = "getConfig")]
    pub get_config: String,
    #[serde(rename = "configError")]
    pub config_error: String,
    pub saved: String,
    #[serde(rename = "saveError")]
    pub save_error: String,
    #[serde(rename = "configReset")]
    pub config_reset: String,
    #[serde(rename = "ownerError")]
    pub owner_error: String,
    pub reminder: String,
    #[serde(rename = "noReminders")]
    pub no_reminders: String,
    #[serde(rename = "reminderList")]
    pub reminder_list: String,
    #[serde(rename = "addReminder")]
    pub add_reminder: String,
    #[serde(rename = "removeReminder")]
    pub remove_reminder: String,
    #[serde(rename = "reminderError")]
    pub reminder_error: String,
    #[serde(rename = "defaultActivity")]
    pub default_activity: String,
    #[serde(rename = "defaultActivityPlural")]
    pub default_activity_plural: String,
    #[serde(rename = "noTasksActivity")]
    pub no_tasks_activity: String,
}

impl Default for LanguagePack {
    fn default() -> Self {
        LanguagePack {
            add: "Task \"{0}\" added for {1}.".to_string(),
            list: "**Your tasks:**\n{0}".to_string(),
            list_status: "You have {0} {1} task(s):\n{2}".to_string(),
            no_tasks: "You have no tasks.".to_string(),
            done: "done".to_string(),
            pending: "pending".to_string(),
            delete_task: "Task {0} deleted.".to_string(),
            set_done: "Task {0} marked as done.".to_string(),
            set_undone: "Task {0} marked as pending.".to_string(),
            get_config: "Channel: <#{0}>\nUser: {1}\nLanguage: {2}".to_string(),
            config_error: "Could not read this server's configuration.".to_string(),
            saved: "Configuration saved.".to_string(),
            save_error: "Nothing to save: provide a channel, user, or language.".to_string(),
            config_reset: "Configuration reset to defaults.".to_string(),
            owner_error: "Only the server owner can change the configuration.".to_string(),
            reminder: "You have {0} pending task(s)".to_string(),
            no_reminders: "You have no reminders. Add one with `/reminder add`.".to_string(),
            reminder_list: "**Your reminders:**\n{0}".to_string(),
            add_reminder: "Reminder added.".to_string(),
            remove_reminder: "Reminder removed.".to_string(),
            reminder_error: "Could not save that reminder. Use HH:MM, e.g. 09:30.".to_string(),
            default_activity: "1 pending task".to_string(),
            default_activity_plural: "{0} pending tasks".to_string(),
            no_tasks_activity: "a clear to-do list".to_string(),
        }
    }
}

/// Substitute positional `{0}`, `{1}`, ... placeholders into a template.
///
/// Placeholders beyond the supplied arguments are left in place, matching
/// how the store's templates behave when a key is rendered partially.
pub fn render(template: &str, args: &[&str]) -> String {
    let mut out = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{i}}}"), arg);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_placeholder() {
        assert_eq!(render("Task {0} deleted.", &["7"]), "Task 7 deleted.");
    }

    #[test]
    fn test_render_multiple_placeholders() {
        assert_eq!(
            render("Task \"{0}\" added for {1}.", &["buy milk", "2024-06-01"]),
            "Task \"buy milk\" added for 2024-06-01."
        );
    }

    #[test]
    fn test_render_repeated_placeholder() {
        assert_eq!(render("{0} and {0}", &["again"]), "again and again");
    }

    #[test]
    fn test_render_missing_argument_leaves_placeholder() {
        assert_eq!(render("{0} of {1}", &["one"]), "one of {1}");
    }

    #[test]
    fn test_partial_pack_falls_back_to_english() {
        let pack: LanguagePack =
            serde_json::from_str(r#"{"add": "Tarea \"{0}\" agregada para {1}."}"#).unwrap();
        assert_eq!(pack.add, "Tarea \"{0}\" agregada para {1}.");
        assert_eq!(pack.done, "done");
        assert!(!pack.reminder.is_empty());
    }

    #[test]
    fn test_wire_keys_are_camel_case() {
        let pack: LanguagePack = serde_json::from_str(
            r#"{"setDone": "ok {0}", "noTasksActivity": "nothing to do"}"#,
        )
        .unwrap();
        assert_eq!(pack.set_done, "ok {0}");
        assert_eq!(pack.no_tasks_activity, "nothing to do");
    }
}
