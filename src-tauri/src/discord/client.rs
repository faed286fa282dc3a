//! Discord Rich Presence client using discord-sdk

use std::time::Duration;

use async_trait::async_trait;
use discord_sdk::{
    activity::{ActivityBuilder, Assets},
    wheel::{UserState, Wheel},
    Discord, Subscriptions,
};

use crate::error::PresenceError;
use crate::presence::{Activity, PresenceClient};

/// Timeout for waiting for Discord handshake
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

struct Connection {
    client_id: String,
    discord: Discord,
    // Keeps the event receivers alive for the lifetime of the connection
    _wheel: Wheel,
}

/// Talks to the local Discord client over IPC
#[derive(Default)]
pub struct DiscordClient {
    connection: Option<Connection>,
}

impl DiscordClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PresenceClient for DiscordClient {
    fn name(&self) -> &'static str {
        "Discord"
    }

    async fn login(&mut self, client_id: &str) -> Result<(), PresenceError> {
        if let Some(connection) = &self.connection {
            if connection.client_id == client_id {
                return Ok(());
            }
        }
        self.logout().await;

        let app_id: i64 = client_id
            .parse()
            .map_err(|_| PresenceError::InvalidClientId(client_id.to_string()))?;

        let (wheel, handler) = Wheel::new(Box::new(|err| {
            tracing::warn!("Discord error: {:?}", err);
        }));

        let mut user_spoke = wheel.user();

        let discord = Discord::new(app_id, Subscriptions::ACTIVITY, Box::new(handler))
            .map_err(|e| PresenceError::Unavailable(format!("{:?}", e)))?;

        tracing::info!("Discord connecting...");

        let handshake = tokio::time::timeout(HANDSHAKE_TIMEOUT, async {
            if user_spoke.0.changed().await.is_err() {
                Err("Discord connection closed".to_string())
            } else {
                match &*user_spoke.0.borrow() {
                    UserState::Connected(user) => Ok(user.clone()),
                    UserState::Disconnected(err) => Err(format!("Discord disconnected: {:?}", err)),
                }
            }
        })
        .await;

        let user = match handshake {
            Ok(Ok(user)) => user,
            Ok(Err(e)) => {
                discord.disconnect().await;
                return Err(PresenceError::Handshake(e));
            }
            Err(_) => {
                discord.disconnect().await;
                return Err(PresenceError::Timeout);
            }
        };

        tracing::info!(
            "Discord Rich Presence connected as {}#{}",
            user.username,
            user.discriminator.unwrap_or(0)
        );

        self.connection = Some(Connection {
            client_id: client_id.to_string(),
            discord,
            _wheel: wheel,
        });

        Ok(())
    }

    async fn logout(&mut self) {
        if let Some(connection) = self.connection.take() {
            connection.discord.disconnect().await;
            tracing::info!("Discord Rich Presence disconnected");
        }
    }

    async fn set_activity(&mut self, activity: &Activity) -> Result<(), PresenceError> {
        let connection = self.connection.as_ref().ok_or(PresenceError::NotConnected)?;

        let builder = ActivityBuilder::new()
            .details(activity.details.clone())
            .state(activity.state.clone())
            .assets(Assets::default().large(activity.image_key.clone(), None::<String>));

        connection
            .discord
            .update_activity(builder)
            .await
            .map(|_| ())
            .map_err(|e| PresenceError::Activity(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_non_numeric_client_id() {
        let mut client = DiscordClient::new();
        let err = client.login("not-a-number").await.unwrap_err();
        assert!(matches!(err, PresenceError::InvalidClientId(_)));
    }

    #[tokio::test]
    async fn set_activity_requires_connection() {
        let mut client = DiscordClient::new();
        let err = client.set_activity(&Activity::idle()).await.unwrap_err();
        assert!(matches!(err, PresenceError::NotConnected));
    }
}
