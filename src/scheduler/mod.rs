//! # Reminder Scheduler
//!
//! The only continuously-running state in the bot: a repeating timer that,
//! once per tick, refreshes the bot's presence, evaluates every known
//! user's reminders against the current local time, and fans out task
//! digests to the guilds whose mention target matched. All durable state is
//! fetched fresh from the remote store each tick.
//!
//! Failure isolation is the design rule here: a broken user, guild, or
//! presence update is logged and the rest of the tick continues; no error
//! escapes a tick, and no tick failure stops the timer.

pub mod clock;
pub mod dispatch;
pub mod matcher;
pub mod notify;

#[cfg(test)]
mod testing;

pub use clock::{local_parts, TickTime};
pub use dispatch::{DispatchError, DispatchReport, NotificationDispatcher};
pub use notify::{DiscordNotifier, Notifier};

use chrono::Utc;
use log::{error, info, warn};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::api::TaskStore;
use crate::language::render;

/// Periodic reminder evaluation and notification fan-out.
///
/// Idle until [`start`](Self::start) is called (from the gateway `ready`
/// event), then Running until the process exits. Ticks are single-flight:
/// if a tick is still working when the next one fires, the new tick is
/// skipped rather than piling up overlapping reads against the store.
pub struct ReminderScheduler {
    store: Arc<dyn TaskStore>,
    dispatcher: NotificationDispatcher,
    offset_hours: i32,
    tick_interval: Duration,
    started: AtomicBool,
    tick_running: Arc<AtomicBool>,
}

impl ReminderScheduler {
    pub fn new(store: Arc<dyn TaskStore>, offset_hours: i32, tick_interval: Duration) -> Self {
        ReminderScheduler {
            dispatcher: NotificationDispatcher::new(Arc::clone(&store), offset_hours),
            store,
            offset_hours,
            tick_interval,
            started: AtomicBool::new(false),
            tick_running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Transition Idle -> Running. Subsequent calls (gateway reconnects
    /// re-fire `ready`) are no-ops.
    pub fn start(self: &Arc<Self>, notifier: Arc<dyn Notifier>) {
        if self.started.swap(true, Ordering::SeqCst) {
            return;
        }
        info!(
            "Reminder scheduler running (interval {}s, UTC{:+}h)",
            self.tick_interval.as_secs(),
            self.offset_hours
        );

        let scheduler = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(scheduler.tick_interval);
            loop {
                interval.tick().await;
                if scheduler.tick_running.swap(true, Ordering::SeqCst) {
                    warn!("Previous scheduler tick still running, skipping this one");
                    continue;
                }
                let scheduler = Arc::clone(&scheduler);
                let notifier = Arc::clone(&notifier);
                tokio::spawn(async move {
                    scheduler.tick(notifier.as_ref()).await;
                    scheduler.tick_running.store(false, Ordering::SeqCst);
                });
            }
        });
    }

    /// One full tick at the current wall-clock time.
    pub async fn tick(&self, notifier: &dyn Notifier) {
        let now = clock::local_parts(Utc::now(), self.offset_hours);
        self.tick_at(notifier, &now).await;
    }

    /// One full tick against an explicit tick time (split out for tests).
    pub async fn tick_at(&self, notifier: &dyn Notifier, now: &TickTime) {
        // Presence is cosmetic: a failure here must never block dispatch.
        if let Err(e) = self.update_presence(notifier).await {
            warn!("{e}");
        }

        let matched_users = self.matching_users(now).await;
        if matched_users.is_empty() {
            return;
        }
        info!(
            "{} user(s) hit a reminder at {:02}:{:02}",
            matched_users.len(),
            now.local_hour,
            now.minute
        );

        let guilds = match self.store.config_guilds().await {
            Ok(guilds) => guilds,
            Err(e) => {
                error!("Could not list configured guilds, skipping dispatch: {e}");
                return;
            }
        };

        for guild_id in guilds {
            let config = match self.store.config(&guild_id).await {
                Ok(config) => config,
                Err(e) => {
                    error!("Could not load config for guild {guild_id}: {e}");
                    continue;
                }
            };
            if !matched_users.contains(&config.user_id) {
                continue;
            }
            if let Err(e) = self
                .dispatcher
                .dispatch_guild(notifier, &guild_id, &now.date)
                .await
            {
                error!("Dispatch failed for guild {guild_id}: {e}");
            }
        }
    }

    /// Users with at least one valid reminder matching this tick. A failed
    /// reminder fetch for one user never stops evaluation of the rest.
    async fn matching_users(&self, now: &TickTime) -> HashSet<String> {
        let users = match self.store.users().await {
            Ok(users) => users,
            Err(e) => {
                error!("Could not list known users: {e}");
                return HashSet::new();
            }
        };

        let mut matched = HashSet::new();
        for user_id in users {
            let reminders = match self.store.reminders(&user_id).await {
                Ok(reminders) => reminders,
                Err(e) => {
                    error!("Could not fetch reminders for user {user_id}: {e}");
                    continue;
                }
            };
            for reminder in reminders {
                if !reminder.is_valid() {
                    warn!(
                        "Skipping out-of-range reminder {} for user {user_id}",
                        reminder.id
                    );
                    continue;
                }
                if matcher::matches(reminder.hour, reminder.minute, now.local_hour, now.minute) {
                    matched.insert(user_id.clone());
                    break;
                }
            }
        }
        matched
    }

    /// Refresh the bot's status text from the outstanding task count.
    async fn update_presence(&self, notifier: &dyn Notifier) -> Result<(), DispatchError> {
        let count = self
            .store
            .task_count()
            .await
            .map_err(|e| DispatchError::PresenceUpdateFailed(e.to_string()))?;
        let pack = self
            .store
            .language()
            .await
            .map_err(|e| DispatchError::PresenceUpdateFailed(e.to_string()))?;

        let text = match count {
            0 => pack.no_tasks_activity.clone(),
            1 => pack.default_activity.clone(),
            n => render(&pack.default_activity_plural, &[&n.to_string()]),
        };
        notifier
            .set_presence(&text)
            .await
            .map_err(|e| DispatchError::PresenceUpdateFailed(e.to_string()))
    }
}
