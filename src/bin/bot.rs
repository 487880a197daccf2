use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info, warn};
use serenity::async_trait;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::gateway::Ready;
use serenity::model::guild::{Guild, UnavailableGuild};
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::Arc;
use std::time::Duration;

use tasklord::commands::registry::default_registry;
use tasklord::commands::{register_global_commands, register_guild_commands};
use tasklord::scheduler::{DiscordNotifier, ReminderScheduler};
use tasklord::{ApiClient, CommandContext, CommandRegistry, Config, Notifier, TaskStore};

struct Handler {
    context: Arc<CommandContext>,
    registry: CommandRegistry,
    scheduler: Arc<ReminderScheduler>,
    guild_id: Option<GuildId>,
    operator_channel_id: u64,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        // Register slash commands - guild commands for development (instant),
        // global for production
        if let Some(guild_id) = self.guild_id {
            info!("🔧 Development mode: Registering commands for guild {guild_id}");
            if let Err(e) = register_guild_commands(&ctx, guild_id).await {
                error!("❌ Failed to register guild slash commands: {e}");
            }
        } else {
            info!("🌍 Production mode: Registering commands globally");
            if let Err(e) = register_global_commands(&ctx).await {
                error!("❌ Failed to register global slash commands: {e}");
            }
        }

        let notifier = Arc::new(DiscordNotifier::new(ctx.clone(), self.operator_channel_id));

        notifier
            .operator_notice(&format!(
                "{} is online, watching {} guild(s).",
                ready.user.name,
                ready.guilds.len()
            ))
            .await;

        // Re-fired on gateway reconnects; start() is a no-op after the first.
        self.scheduler.start(notifier);
    }

    async fn guild_create(&self, _ctx: Context, guild: Guild, is_new: bool) {
        if !is_new {
            return;
        }
        info!("🆕 Joined new guild: {} ({})", guild.name, guild.id);
        if let Err(e) = self.context.api.create_config(&guild.id.to_string()).await {
            error!("Could not create config for new guild {}: {e}", guild.id);
        }
    }

    async fn guild_delete(&self, _ctx: Context, incomplete: UnavailableGuild, _full: Option<Guild>) {
        // Outages also fire this event; only a real removal should drop state.
        if incomplete.unavailable {
            return;
        }
        info!("👋 Removed from guild {}", incomplete.id);
        if let Err(e) = self
            .context
            .api
            .delete_config(&incomplete.id.to_string())
            .await
        {
            error!("Could not delete config for guild {}: {e}", incomplete.id);
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::ApplicationCommand(command) = interaction {
            let name = command.data.name.clone();
            let Some(handler) = self.registry.get(&name) else {
                warn!("Received unknown slash command: /{name}");
                let _ = command
                    .create_interaction_response(&ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message.content("❌ Unknown command.")
                            })
                    })
                    .await;
                return;
            };

            if let Err(e) = handler.handle(Arc::clone(&self.context), &ctx, &command).await {
                error!("Error handling slash command '/{name}': {e}");
                let _ = command
                    .create_interaction_response(&ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message.content(
                                    "❌ Sorry, I encountered an error processing your command. Please try again.",
                                )
                            })
                    })
                    .await;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting To-Do Discord Bot...");

    let api = ApiClient::new(&config.api_base_url, config.api_timeout_secs)?;
    let context = Arc::new(CommandContext::new(
        api.clone(),
        config.operator_channel_id,
        config.local_utc_offset_hours,
    ));
    let registry = default_registry();
    info!("Command registry populated with {} commands", registry.len());

    let scheduler = Arc::new(ReminderScheduler::new(
        Arc::new(api) as Arc<dyn TaskStore>,
        config.local_utc_offset_hours,
        Duration::from_secs(config.tick_interval_secs),
    ));

    // Parse guild ID if provided for development mode
    let guild_id = config
        .discord_guild_id
        .as_ref()
        .and_then(|id| id.parse::<u64>().ok())
        .map(GuildId);

    let handler = Handler {
        context,
        registry,
        scheduler,
        guild_id,
        operator_channel_id: config.operator_channel_id,
    };

    let intents = GatewayIntents::GUILDS;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
