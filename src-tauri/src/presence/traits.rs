use async_trait::async_trait;

use super::activity::Activity;
use crate::error::PresenceError;

/// Connection to a rich presence service (Discord in production)
#[async_trait]
pub trait PresenceClient: Send + Sync {
    /// Returns the name of this presence client (for logging)
    fn name(&self) -> &'static str;

    /// Log in with the given application client id. Logging in again with
    /// the id of the active connection succeeds without reconnecting.
    async fn login(&mut self, client_id: &str) -> Result<(), PresenceError>;

    /// Drop the active connection, if any
    async fn logout(&mut self);

    /// Replace the displayed activity
    async fn set_activity(&mut self, activity: &Activity) -> Result<(), PresenceError>;
}

