mod app;
mod catalog;
mod control_server;
mod discord;
mod error;
mod logging;
mod pins;
mod presence;
mod settings;

use std::sync::Arc;

pub use app::App;
pub use catalog::{CatalogProvider, Game, FALLBACK_CATALOG};
pub use control_server::ControlServer;
pub use discord::DiscordClient;
pub use error::{AppError, PinError, PresenceError};
pub use pins::PinStore;
pub use presence::{
    title_case, Activity, ClientIds, Platform, PresenceClient, SessionManager, SessionState,
};
pub use settings::{config_dir, load_settings, AppSettings};

pub fn run() {
    let log_guard = logging::init_logging();

    if let Err(e) = serve() {
        tracing::error!("{}", e);
        drop(log_guard);
        std::process::exit(1);
    }
}

fn serve() -> Result<(), String> {
    let config_dir = config_dir().map_err(|e| e.to_string())?;
    let settings = load_settings(&config_dir);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {}", e))?;

    let session = SessionManager::new(Box::new(DiscordClient::new()), ClientIds::from(&settings));
    let app = Arc::new(App::new(
        session,
        PinStore::new(config_dir),
        CatalogProvider::new(&settings.local_catalog, settings.games_url.clone()),
    ));

    runtime
        .block_on(app.startup())
        .map_err(|e| format!("Startup failed: {}", e))?;

    let server = match ControlServer::start(
        Arc::clone(&app),
        runtime.handle().clone(),
        settings.control_port,
    ) {
        Ok(server) => server,
        Err(e) => {
            runtime.block_on(app.shutdown());
            return Err(e);
        }
    };

    runtime.block_on(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
        }
        tracing::info!("Shutting down");
        server.stop();
        app.shutdown().await;
    });

    Ok(())
}
