//! Discord side-effect seam for the scheduler
//!
//! The scheduler's only writes to Discord are: send a message, set the
//! bot's presence, and raise operator diagnostics. Putting those behind a
//! trait keeps the tick and dispatch logic testable with a recording fake.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{error, info};
use serenity::model::gateway::Activity;
use serenity::model::id::{ChannelId, GuildId};
use serenity::prelude::Context;

/// Chat-platform operations the scheduler needs.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Whether the bot can still see this guild.
    async fn guild_exists(&self, guild_id: &str) -> bool;

    /// Whether the channel id resolves to a channel the bot can see.
    async fn channel_exists(&self, channel_id: &str) -> bool;

    /// Send one message to a channel by id.
    async fn send(&self, channel_id: &str, content: &str) -> Result<()>;

    /// Update the bot's visible status text.
    async fn set_presence(&self, text: &str) -> Result<()>;

    /// Best-effort diagnostic to the operator channel; never fails loudly.
    async fn operator_notice(&self, text: &str);
}

/// Production notifier backed by a serenity gateway context.
pub struct DiscordNotifier {
    ctx: Context,
    operator_channel_id: u64,
}

impl DiscordNotifier {
    pub fn new(ctx: Context, operator_channel_id: u64) -> Self {
        DiscordNotifier {
            ctx,
            operator_channel_id,
        }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn guild_exists(&self, guild_id: &str) -> bool {
        match guild_id.parse::<u64>() {
            Ok(id) => self.ctx.cache.guild(GuildId(id)).is_some(),
            Err(_) => false,
        }
    }

    async fn channel_exists(&self, channel_id: &str) -> bool {
        match channel_id.parse::<u64>() {
            Ok(id) => self.ctx.cache.guild_channel(ChannelId(id)).is_some(),
            Err(_) => false,
        }
    }

    async fn send(&self, channel_id: &str, content: &str) -> Result<()> {
        let id = channel_id
            .parse::<u64>()
            .map_err(|_| anyhow!("invalid channel id: {channel_id}"))?;
        ChannelId(id).say(&self.ctx.http, content).await?;
        Ok(())
    }

    async fn set_presence(&self, text: &str) -> Result<()> {
        self.ctx.set_activity(Activity::watching(text)).await;
        Ok(())
    }

    async fn operator_notice(&self, text: &str) {
        info!("Operator notice: {text}");
        let channel = ChannelId(self.operator_channel_id);
        if let Err(e) = channel
            .send_message(&self.ctx.http, |message| {
                message.embed(|embed| embed.title("To-Do Bot").color(0xE74C3C).description(text))
            })
            .await
        {
            error!("Failed to reach operator channel {channel}: {e}");
        }
    }
}
