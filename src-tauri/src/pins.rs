//! Pinned favourite titles, persisted as a JSON array of strings.

use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::Game;
use crate::error::PinError;

const PINS_FILE: &str = "pinned.json";
const NO_PINS_TITLE: &str = "No Pins!";

pub struct PinStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl PinStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn pins_path(&self) -> PathBuf {
        self.dir.join(PINS_FILE)
    }

    fn ensure_dir(&self) -> Result<(), PinError> {
        if self.dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(&self.dir).map_err(|source| PinError::CreateDir {
            path: self.dir.clone(),
            source,
        })
    }

    /// Read the current pins. A missing, unreadable or malformed file is an
    /// empty list.
    pub fn load(&self) -> Result<Vec<String>, PinError> {
        self.ensure_dir()?;

        let path = self.pins_path();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(_) => return Ok(Vec::new()),
        };

        match serde_json::from_slice(&bytes) {
            Ok(pins) => Ok(pins),
            Err(e) => {
                tracing::debug!("Ignoring malformed pin file {}: {}", path.display(), e);
                Ok(Vec::new())
            }
        }
    }

    /// Remove the first occurrence of `title`, or append it when absent.
    pub fn toggle(&self, title: &str) -> Result<Vec<String>, PinError> {
        let _guard = self.write_lock.lock();

        let mut pins = self.load()?;
        match pins.iter().position(|pin| pin == title) {
            Some(index) => {
                pins.remove(index);
                tracing::debug!("Unpinned {}", title);
            }
            None => {
                pins.push(title.to_string());
                tracing::debug!("Pinned {}", title);
            }
        }

        let json = serde_json::to_vec(&pins)?;
        let path = self.pins_path();
        fs::write(&path, json).map_err(|source| PinError::Write { path, source })?;

        Ok(pins)
    }

    /// Pins as catalog entries with empty image keys, or a single
    /// "No Pins!" entry when nothing is pinned.
    pub fn display_items(&self) -> Result<String, PinError> {
        let pins = self.load()?;

        let mut items: Vec<Game> = pins
            .into_iter()
            .map(|title| Game {
                title,
                img: String::new(),
            })
            .collect();

        if items.is_empty() {
            items.push(Game {
                title: NO_PINS_TITLE.to_string(),
                img: String::new(),
            });
        }

        Ok(serde_json::to_string(&items)?)
    }
}
