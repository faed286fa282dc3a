//! Entry surface used by the front end

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::catalog::CatalogProvider;
use crate::error::AppError;
use crate::pins::PinStore;
use crate::presence::SessionManager;

pub struct App {
    session: Mutex<SessionManager>,
    pins: PinStore,
    catalog: CatalogProvider,
    lifetime: CancellationToken,
}

impl App {
    pub fn new(session: SessionManager, pins: PinStore, catalog: CatalogProvider) -> Self {
        Self {
            session: Mutex::new(session),
            pins,
            catalog,
            lifetime: CancellationToken::new(),
        }
    }

    pub async fn startup(&self) -> Result<(), AppError> {
        self.session.lock().await.startup().await
    }

    pub async fn shutdown(&self) {
        self.lifetime.cancel();
        self.session.lock().await.shutdown().await;
    }

    pub async fn check_connection_failed(&self) -> bool {
        self.session.lock().await.connection_failed()
    }

    pub async fn reconnect(&self) -> bool {
        self.session.lock().await.reconnect().await
    }

    /// Defaults to the Switch 1 catalog
    pub async fn games_list(&self) -> String {
        self.primary_catalog().await
    }

    pub async fn set_game(&self, title: &str, status: &str) -> Result<(), AppError> {
        self.session
            .lock()
            .await
            .set_activity(title, status, None)
            .await
    }

    pub async fn set_game_with_image(
        &self,
        title: &str,
        status: &str,
        image_key: &str,
    ) -> Result<(), AppError> {
        tracing::debug!("Setting game with image key: {}", image_key);
        self.session
            .lock()
            .await
            .set_activity(title, status, Some(image_key))
            .await
    }

    pub fn pin_game(&self, title: &str) -> Result<(), AppError> {
        self.pins.toggle(title)?;
        Ok(())
    }

    pub fn pins(&self) -> Result<String, AppError> {
        Ok(self.pins.display_items()?)
    }

    pub fn is_non_windows_host(&self) -> bool {
        cfg!(not(target_os = "windows"))
    }

    pub async fn switch_platform(&self, selector: &str) -> bool {
        self.session.lock().await.switch_platform(selector).await
    }

    pub async fn primary_catalog(&self) -> String {
        self.catalog.primary_catalog(&self.lifetime).await
    }

    pub fn secondary_catalog(&self) -> String {
        self.catalog.secondary_catalog()
    }
}
