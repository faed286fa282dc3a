//! Presence session lifecycle: login, activity updates, platform switching

use super::activity::Activity;
use super::platform::{ClientIds, Platform};
use super::traits::PresenceClient;
use crate::error::{AppError, PresenceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn(Platform),
    /// The last login attempt failed
    Errored,
}

/// Owns the single connection to the presence service.
///
/// `connection_failed` is what the front end polls to decide whether to offer
/// a reconnect button. It is set by a failed startup login, a failed platform
/// switch, a failed activity update, or a reconnect that lost a live session.
/// It is cleared only by a successful
/// [`SessionManager::reconnect`] or [`SessionManager::switch_platform`].
pub struct SessionManager {
    client: Box<dyn PresenceClient>,
    client_ids: ClientIds,
    state: SessionState,
    connection_failed: bool,
}

impl SessionManager {
    pub fn new(client: Box<dyn PresenceClient>, client_ids: ClientIds) -> Self {
        Self {
            client,
            client_ids,
            state: SessionState::LoggedOut,
            connection_failed: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn connection_failed(&self) -> bool {
        self.connection_failed
    }

    async fn login(&mut self, platform: Platform) -> Result<(), PresenceError> {
        let client_id = self.client_ids.get(platform).to_string();

        match self.client.login(&client_id).await {
            Ok(()) => {
                tracing::info!("{} connected as {:?}", self.client.name(), platform);
                self.state = SessionState::LoggedIn(platform);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("{} login failed for {:?}: {}", self.client.name(), platform, e);
                self.state = SessionState::Errored;
                Err(e)
            }
        }
    }

    async fn logout(&mut self) {
        self.client.logout().await;
        self.state = SessionState::LoggedOut;
    }

    /// Activities are dropped while no session is logged in.
    async fn send(&mut self, activity: &Activity) -> Result<(), PresenceError> {
        if !matches!(self.state, SessionState::LoggedIn(_)) {
            tracing::debug!("Not logged in, dropping activity {:?}", activity);
            return Ok(());
        }

        tracing::debug!("Updating presence: {:?}", activity);
        self.client.set_activity(activity).await
    }

    /// Log in as Switch 1 and show the idle activity. A login failure only
    /// raises the connection flag; a failed activity update is fatal.
    pub async fn startup(&mut self) -> Result<(), AppError> {
        if self.login(Platform::Switch1).await.is_err() {
            self.connection_failed = true;
        }

        self.send(&Activity::idle()).await.map_err(|e| {
            tracing::error!("Failed to set startup activity: {}", e);
            AppError::Activity(e)
        })
    }

    pub async fn shutdown(&mut self) {
        tracing::info!("Closing presence session");
        self.logout().await;
    }

    /// Log in again as Switch 1. An existing Switch 1 session is kept and only
    /// re-sent the idle activity. The connection flag is cleared on success and
    /// raised only when a failed attempt tore down a live session.
    pub async fn reconnect(&mut self) -> bool {
        if self.state != SessionState::LoggedIn(Platform::Switch1) {
            let was_live = matches!(self.state, SessionState::LoggedIn(_));
            if was_live {
                self.logout().await;
            }

            if self.login(Platform::Switch1).await.is_err() {
                if was_live {
                    self.connection_failed = true;
                }
                return false;
            }
        }

        if let Err(e) = self.send(&Activity::idle()).await {
            tracing::warn!("Reconnect failed to set activity: {}", e);
            return false;
        }

        self.connection_failed = false;
        true
    }

    /// Drop the current session and log in with the selected platform's id.
    pub async fn switch_platform(&mut self, selector: &str) -> bool {
        let platform = Platform::from_selector(selector);
        tracing::info!("Switching presence to {:?}", platform);

        self.logout().await;

        if self.login(platform).await.is_err() {
            self.connection_failed = true;
            return false;
        }

        if let Err(e) = self.send(&Activity::idle()).await {
            tracing::warn!("Platform switch failed to set activity: {}", e);
            self.connection_failed = true;
            return false;
        }

        self.connection_failed = false;
        true
    }

    /// Show `title` as the current game. `image_key` defaults to the title.
    pub async fn set_activity(
        &mut self,
        title: &str,
        status: &str,
        image_key: Option<&str>,
    ) -> Result<(), AppError> {
        let activity = Activity::playing(title, status, image_key);

        self.send(&activity).await.map_err(|e| {
            tracing::error!("Failed to set activity for {}: {}", title, e);
            self.connection_failed = true;
            AppError::Activity(e)
        })
    }
}
