use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info, warn};
use serenity::async_trait;
use serenity::http::Http;
use serenity::model::application::interaction::Interaction;
use serenity::model::gateway::Ready;
use serenity::model::guild::Guild;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::Arc;

use faction_bot::commands::{create_all_handlers, CommandContext, CommandRegistry, Dispatcher};
use faction_bot::core::Config;
use faction_bot::database::{open_store, Repository};
use faction_bot::discord::{
    register_guild_commands, to_inbound, InteractionPayload, SerenityGateway, SerenityResponder,
};
use faction_bot::features::{EventBus, EventListener, MapCatalog};
use faction_bot::interaction::InteractionReply;

struct Handler {
    dispatcher: Arc<Dispatcher>,
    guild_id: Option<GuildId>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        if let Some(guild_id) = self.guild_id {
            if let Err(e) =
                register_guild_commands(&ctx.http, guild_id, self.dispatcher.registry()).await
            {
                error!("Failed to register commands for configured guild {guild_id}: {e}");
            }
        }
    }

    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: bool) {
        if is_new {
            info!("🆕 Joined new guild: {} ({})", guild.name, guild.id);
        } else {
            info!("📥 Guild available: {} ({})", guild.name, guild.id);
        }

        let registry = self.dispatcher.registry();
        if let Err(e) = register_guild_commands(&ctx.http, guild.id, registry).await {
            error!("Failed to register commands for guild {}: {e}", guild.id);
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Some(event) = to_inbound(&ctx, &interaction) else {
            return;
        };
        let Some(payload) = InteractionPayload::from_interaction(interaction) else {
            warn!("Interaction converted but has no reply channel");
            return;
        };

        let responder = SerenityResponder::new(ctx.http.clone(), payload);
        let mut reply = InteractionReply::new(Box::new(responder));
        self.dispatcher.dispatch(event, &mut reply).await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting faction bot for faction {}...", config.faction_id);

    let store = open_store(&config.database)?;
    let repository = Repository::new(store);

    // REST client for posts made outside an interaction
    let http = Arc::new(Http::new(&config.discord_token));
    let gateway = Arc::new(SerenityGateway::new(http));

    let events = EventBus::new();
    let listener = EventListener::new(repository.clone(), gateway.clone());
    let receiver = events.subscribe();
    tokio::spawn(async move {
        listener.run(receiver).await;
    });

    let registry = CommandRegistry::from_handlers(create_all_handlers())?;
    info!("📋 {} commands registered", registry.len());

    let context = CommandContext::new(
        repository,
        events,
        MapCatalog::from_file(&config.map_data_path),
        gateway,
        config.faction_id.clone(),
    );

    let handler = Handler {
        dispatcher: Arc::new(Dispatcher::new(registry, context)),
        guild_id: config.discord_guild_id.map(GuildId),
    };

    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::GUILD_MEMBERS;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Establishing WebSocket connection to Discord gateway...");
    info!("Gateway intents: {intents:?}");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
