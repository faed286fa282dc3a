use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PinError;

/// Directory under the user's home that holds pins and settings
pub const CONFIG_DIR_NAME: &str = "NS-RPC";

const SETTINGS_FILE: &str = "settings.json";

pub const SWITCH1_CLIENT_ID: &str = "1114647533562646700";
pub const SWITCH2_CLIENT_ID: &str = "1420215431465140285";
pub const GAMES_URL: &str =
    "https://raw.githubusercontent.com/fouwaru/NS2-RPC/refs/heads/master/games.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Port of the localhost control server used by the front end
    pub control_port: u16,
    pub games_url: String,
    pub local_catalog: PathBuf,
    pub switch1_client_id: String,
    pub switch2_client_id: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            control_port: 34116,
            games_url: GAMES_URL.to_string(),
            local_catalog: PathBuf::from("games.json"),
            switch1_client_id: SWITCH1_CLIENT_ID.to_string(),
            switch2_client_id: SWITCH2_CLIENT_ID.to_string(),
        }
    }
}

/// `<home>/NS-RPC`, not created here.
pub fn config_dir() -> Result<PathBuf, PinError> {
    let home = dirs::home_dir().ok_or(PinError::HomeDir)?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Load settings from `dir`, falling back to defaults when the file is
/// missing or cannot be parsed.
pub fn load_settings(dir: &Path) -> AppSettings {
    let path = dir.join(SETTINGS_FILE);
    tracing::debug!("Loading settings from {}", path.display());

    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(_) => return AppSettings::default(),
    };

    match serde_json::from_str(&contents) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to parse settings, using defaults: {}", e);
            AppSettings::default()
        }
    }
}
