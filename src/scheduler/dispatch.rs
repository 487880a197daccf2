//! Per-guild notification fan-out
//!
//! When a tick matches at least one reminder, the dispatcher builds each
//! affected guild's task digest, sends it to the configured channel, and
//! cleans up completed tasks whose due date has passed. Every failure mode
//! is contained to the guild being dispatched.

use log::{debug, info, warn};
use std::sync::Arc;
use thiserror::Error;

use crate::api::TaskStore;
use crate::core::response::chunk_for_message;
use crate::language::render;

use super::clock::due_date_epoch;
use super::notify::Notifier;

/// Why one guild's dispatch was abandoned. None of these propagate out of
/// the scheduler tick; they are logged (and, where the guild or channel has
/// gone missing, surfaced to the operator channel).
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("guild {0} not found")]
    GuildNotFound(String),
    #[error("channel {channel_id} not found in guild {guild_id}")]
    ChannelNotFound { guild_id: String, channel_id: String },
    #[error("upstream fetch failed: {0}")]
    UpstreamFetchFailed(String),
    #[error("failed to send notification: {0}")]
    NotificationSendFailed(String),
    #[error("failed to delete task {task_id}: {reason}")]
    TaskDeleteFailed { task_id: i64, reason: String },
    #[error("failed to update presence: {0}")]
    PresenceUpdateFailed(String),
}

/// What one guild dispatch did, for logging and tests.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Number of messages sent (0 when the guild had no pending tasks,
    /// >1 when the digest needed chunking).
    pub messages_sent: usize,
    /// Pending tasks included in the digest.
    pub pending_count: usize,
    /// Overdue done tasks successfully deleted.
    pub deleted: usize,
    /// Overdue done tasks whose deletion failed (logged, not fatal).
    pub delete_failures: usize,
}

/// Builds and sends one guild's reminder digest.
pub struct NotificationDispatcher {
    store: Arc<dyn TaskStore>,
    offset_hours: i32,
}

impl NotificationDispatcher {
    pub fn new(store: Arc<dyn TaskStore>, offset_hours: i32) -> Self {
        NotificationDispatcher {
            store,
            offset_hours,
        }
    }

    /// Dispatch the digest for one guild.
    ///
    /// Overdue done tasks are deleted even when there is nothing to send,
    /// and deletion is best-effort per task. A guild or channel that no
    /// longer resolves raises an operator notice and aborts this guild
    /// without touching its tasks.
    pub async fn dispatch_guild(
        &self,
        notifier: &dyn Notifier,
        guild_id: &str,
        today: &str,
    ) -> Result<DispatchReport, DispatchError> {
        let pack = self
            .store
            .language_for_guild(guild_id)
            .await
            .map_err(|e| DispatchError::UpstreamFetchFailed(e.to_string()))?;
        let config = self
            .store
            .config(guild_id)
            .await
            .map_err(|e| DispatchError::UpstreamFetchFailed(e.to_string()))?;
        let tasks = self
            .store
            .tasks_by_guild(guild_id)
            .await
            .map_err(|e| DispatchError::UpstreamFetchFailed(e.to_string()))?;

        if !notifier.guild_exists(guild_id).await {
            notifier
                .operator_notice(&format!(
                    "Reminder dispatch skipped: guild {guild_id} no longer exists."
                ))
                .await;
            return Err(DispatchError::GuildNotFound(guild_id.to_string()));
        }
        if config.channel_id.is_empty() || !notifier.channel_exists(&config.channel_id).await {
            notifier
                .operator_notice(&format!(
                    "Reminder dispatch skipped: channel {} in guild {guild_id} is not \
                     configured or no longer exists.",
                    config.channel_id
                ))
                .await;
            return Err(DispatchError::ChannelNotFound {
                guild_id: guild_id.to_string(),
                channel_id: config.channel_id,
            });
        }

        let (pending, overdue_done): (Vec<_>, Vec<_>) = tasks
            .into_iter()
            .partition(|task| task.is_pending());
        let overdue_done: Vec<_> = overdue_done
            .into_iter()
            .filter(|task| task.is_overdue_done(today))
            .collect();

        let mut report = DispatchReport {
            pending_count: pending.len(),
            ..DispatchReport::default()
        };

        if pending.is_empty() {
            debug!("No pending tasks for guild {guild_id}, nothing to send");
        } else {
            let lines: Vec<String> = pending
                .iter()
                .map(|task| match due_date_epoch(&task.date, self.offset_hours) {
                    Some(epoch) => format!("- {}. {} | <t:{epoch}:F>", task.id, task.task),
                    None => format!("- {}. {} | {}", task.id, task.task, task.date),
                })
                .collect();
            let header = render(&pack.reminder, &[&pending.len().to_string()]);
            let message = format!(
                "<@!{}> **{header}**:\n{}",
                config.user_id,
                lines.join("\n")
            );

            for chunk in chunk_for_message(&message) {
                notifier
                    .send(&config.channel_id, &chunk)
                    .await
                    .map_err(|e| DispatchError::NotificationSendFailed(e.to_string()))?;
                report.messages_sent += 1;
            }
            info!(
                "Sent reminder digest with {} task(s) to guild {guild_id}",
                pending.len()
            );
        }

        // Cleanup runs whether or not a digest went out.
        for task in &overdue_done {
            match self.store.delete_task(&task.user_id, task.id).await {
                Ok(()) => {
                    debug!("Deleted overdue done task {} in guild {guild_id}", task.id);
                    report.deleted += 1;
                }
                Err(e) => {
                    let err = DispatchError::TaskDeleteFailed {
                        task_id: task.id,
                        reason: e.to_string(),
                    };
                    warn!("Cleanup in guild {guild_id}: {err}");
                    report.delete_failures += 1;
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{task, FakeNotifier, FakeStore};
    use super::*;

    fn dispatcher(store: &Arc<FakeStore>) -> NotificationDispatcher {
        NotificationDispatcher::new(Arc::clone(store) as Arc<dyn TaskStore>, -5)
    }

    #[tokio::test]
    async fn test_digest_and_cleanup_for_one_guild() {
        let store = Arc::new(
            FakeStore::new().with_guild_tasks(
                "g1",
                vec![
                    task(1, "u1", "g1", "file taxes", "2024-01-01", false),
                    task(2, "u1", "g1", "water plants", "2023-12-01", true),
                ],
            ),
        );
        let notifier = FakeNotifier::new();

        let report = dispatcher(&store)
            .dispatch_guild(&notifier, "g1", "2024-01-02")
            .await
            .unwrap();

        assert_eq!(report.messages_sent, 1);
        assert_eq!(report.pending_count, 1);
        assert_eq!(report.deleted, 1);
        assert_eq!(report.delete_failures, 0);

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        let (channel, content) = &sent[0];
        assert_eq!(channel, "chan-g1");
        assert!(content.contains("- 1. file taxes"));
        assert!(content.contains("<@!owner-g1>"));
        assert!(!content.contains("water plants"));

        assert_eq!(store.deleted_ids(), vec![2]);
    }

    #[tokio::test]
    async fn test_no_pending_tasks_sends_nothing_but_still_cleans_up() {
        let store = Arc::new(FakeStore::new().with_guild_tasks(
            "g1",
            vec![task(2, "u1", "g1", "old chore", "2023-12-01", true)],
        ));
        let notifier = FakeNotifier::new();

        let report = dispatcher(&store)
            .dispatch_guild(&notifier, "g1", "2024-01-02")
            .await
            .unwrap();

        assert_eq!(report.messages_sent, 0);
        assert_eq!(report.deleted, 1);
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_done_but_not_overdue_is_kept() {
        let store = Arc::new(FakeStore::new().with_guild_tasks(
            "g1",
            vec![task(2, "u1", "g1", "done today", "2024-01-02", true)],
        ));
        let notifier = FakeNotifier::new();

        let report = dispatcher(&store)
            .dispatch_guild(&notifier, "g1", "2024-01-02")
            .await
            .unwrap();

        assert_eq!(report.deleted, 0);
        assert!(store.deleted_ids().is_empty());
    }

    #[tokio::test]
    async fn test_missing_channel_aborts_with_operator_notice() {
        let store = Arc::new(FakeStore::new().with_guild_tasks(
            "g1",
            vec![
                task(1, "u1", "g1", "pending", "2024-01-01", false),
                task(2, "u1", "g1", "overdue", "2023-12-01", true),
            ],
        ));
        let notifier = FakeNotifier::new().with_missing_channel("chan-g1");

        let err = dispatcher(&store)
            .dispatch_guild(&notifier, "g1", "2024-01-02")
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::ChannelNotFound { .. }));
        assert!(notifier.sent().is_empty());
        assert!(store.deleted_ids().is_empty());
        assert_eq!(notifier.operator_notices().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_guild_aborts_with_operator_notice() {
        let store = Arc::new(FakeStore::new().with_guild_tasks(
            "g1",
            vec![task(1, "u1", "g1", "pending", "2024-01-01", false)],
        ));
        let notifier = FakeNotifier::new().with_missing_guild("g1");

        let err = dispatcher(&store)
            .dispatch_guild(&notifier, "g1", "2024-01-02")
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::GuildNotFound(_)));
        assert!(notifier.sent().is_empty());
        assert_eq!(notifier.operator_notices().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_failure_is_contained_per_task() {
        let store = Arc::new(
            FakeStore::new()
                .with_guild_tasks(
                    "g1",
                    vec![
                        task(2, "u1", "g1", "first", "2023-12-01", true),
                        task(3, "u1", "g1", "second", "2023-12-02", true),
                    ],
                )
                .with_failing_delete(2),
        );
        let notifier = FakeNotifier::new();

        let report = dispatcher(&store)
            .dispatch_guild(&notifier, "g1", "2024-01-02")
            .await
            .unwrap();

        assert_eq!(report.deleted, 1);
        assert_eq!(report.delete_failures, 1);
        assert_eq!(store.deleted_ids(), vec![3]);
    }

    #[tokio::test]
    async fn test_redeleting_same_task_is_a_no_op() {
        let store = Arc::new(FakeStore::new().with_guild_tasks(
            "g1",
            vec![task(2, "u1", "g1", "old", "2023-12-01", true)],
        ));
        let notifier = FakeNotifier::new();
        let dispatcher = dispatcher(&store);

        // the store keeps serving the task, mimicking an overlapping tick
        dispatcher
            .dispatch_guild(&notifier, "g1", "2024-01-02")
            .await
            .unwrap();
        let second = dispatcher
            .dispatch_guild(&notifier, "g1", "2024-01-02")
            .await
            .unwrap();

        assert_eq!(second.delete_failures, 0);
        assert_eq!(store.deleted_ids(), vec![2, 2]);
    }
}
