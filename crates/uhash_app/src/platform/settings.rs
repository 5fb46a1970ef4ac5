use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;
use log::LevelFilter;
use serde::Deserialize;
use uhash_engine::{Algorithm, HashSettings, DEFAULT_CHUNK_SIZE};

use super::logging::LogDestination;

pub const SETTINGS_FILENAME: &str = "uhash.ron";

/// Contents of `uhash.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub algorithm: Algorithm,
    pub chunk_size: usize,
    pub log_level: String,
    pub log_destination: LogDestination,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            log_level: "info".to_string(),
            log_destination: LogDestination::default(),
        }
    }
}

impl Settings {
    pub fn hash_settings(&self) -> HashSettings {
        HashSettings {
            algorithm: self.algorithm,
            chunk_size: self.chunk_size.max(1),
        }
    }

    /// Unknown level names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

/// Reads settings from `path`. `Ok(None)` when the file does not exist.
pub fn load(path: &Path) -> anyhow::Result<Option<Settings>> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read settings from {:?}", path))
        }
    };
    let settings = ron::from_str(&content)
        .with_context(|| format!("Failed to parse settings from {:?}", path))?;
    Ok(Some(settings))
}

/// Like [`load`], but any problem is reported on stderr and replaced by
/// defaults. Runs before the logger exists.
pub fn load_or_default(path: &Path) -> Settings {
    match load(path) {
        Ok(Some(settings)) => settings,
        Ok(None) => Settings::default(),
        Err(err) => {
            eprintln!("Warning: {err:#}; using default settings");
            Settings::default()
        }
    }
}
