//! serenity gateway adapter.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::client::{Client, Context, EventHandler};
use serenity::http::Http;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::id::ChannelId;
use serenity::prelude::GatewayIntents;
use tracing::{error, info};

use crate::error::{RelayError, Result};
use crate::relay::{Relay, ReplySink};

/// Sends replies to one Discord channel.
pub struct ChannelSink {
    http: Arc<Http>,
    channel: ChannelId,
}

impl ChannelSink {
    pub fn new(http: Arc<Http>, channel: ChannelId) -> Self {
        Self { http, channel }
    }
}

#[async_trait]
impl ReplySink for ChannelSink {
    async fn send(&self, text: &str) -> Result<()> {
        self.channel
            .say(&self.http, text)
            .await
            .map(|_| ())
            .map_err(|e| RelayError::Platform(e.to_string()))
    }
}

/// Gateway event handler feeding every human message to the relay.
pub struct Handler {
    relay: Arc<Relay>,
}

impl Handler {
    pub fn new(relay: Arc<Relay>) -> Self {
        Self { relay }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let user_id = msg.author.id.to_string();
        let sink = ChannelSink::new(ctx.http.clone(), msg.channel_id);
        if let Err(e) = self.relay.handle_incoming(&user_id, &msg.content, &sink).await {
            error!(
                user = user_id.as_str(),
                channel = %msg.channel_id,
                category = %e.category(),
                error = %e,
                "failed to deliver reply"
            );
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(bot = ready.user.name.as_str(), "connected to Discord");
    }
}

/// Intents needed to read message text in guilds and DMs.
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILD_MESSAGES | GatewayIntents::DIRECT_MESSAGES | GatewayIntents::MESSAGE_CONTENT
}

/// Connect to the gateway and run until the connection ends.
pub async fn run(relay: Arc<Relay>) -> Result<()> {
    let token = relay.config().require_discord_token()?.to_string();
    let mut client = Client::builder(&token, intents())
        .event_handler(Handler::new(relay))
        .await
        .map_err(|e| RelayError::Platform(format!("failed to build gateway client: {e}")))?;
    client
        .start()
        .await
        .map_err(|e| RelayError::Platform(format!("gateway connection ended: {e}")))
}
