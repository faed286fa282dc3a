use crate::settings::AppSettings;

/// Console whose Discord application is used for presence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Switch1,
    Switch2,
}

impl Platform {
    /// Map a front-end selector to a platform; anything unrecognised is Switch 1.
    pub fn from_selector(selector: &str) -> Self {
        match selector {
            "switch2" | "platform-2" => Platform::Switch2,
            _ => Platform::Switch1,
        }
    }
}

/// Discord application ids for each platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIds {
    pub switch1: String,
    pub switch2: String,
}

impl ClientIds {
    pub fn get(&self, platform: Platform) -> &str {
        match platform {
            Platform::Switch1 => &self.switch1,
            Platform::Switch2 => &self.switch2,
        }
    }
}

impl Default for ClientIds {
    fn default() -> Self {
        Self::from(&AppSettings::default())
    }
}

impl From<&AppSettings> for ClientIds {
    fn from(settings: &AppSettings) -> Self {
        Self {
            switch1: settings.switch1_client_id.clone(),
            switch2: settings.switch2_client_id.clone(),
        }
    }
}
