use std::{
    fs, io,
    path::{Path, PathBuf},
};

use color_eyre::eyre::WrapErr;
use log::debug;
use serde::{Deserialize, Serialize};

/// Player preferences, read from a TOML file. Missing keys fall back to
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Edge length of new cubes
    pub dimension: usize,
    /// Number of random quarter turns applied to a new cube
    pub scramble_moves: usize,
    /// Whether to print the clock while playing
    pub show_timer: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            dimension: 3,
            scramble_moves: 25,
            show_timer: true,
        }
    }
}

impl Settings {
    /// `<config dir>/cube/settings.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cube").join("settings.toml"))
    }

    /// Read settings from `path`, or the defaults if there is no such file.
    pub fn load(path: &Path) -> color_eyre::Result<Settings> {
        match fs::read_to_string(path) {
            Ok(text) => toml::from_str(&text)
                .wrap_err_with(|| format!("Failed to parse the settings in {}", path.display())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", path.display());
                Ok(Settings::default())
            }
            Err(e) => {
                Err(e).wrap_err_with(|| format!("Failed to read the settings in {}", path.display()))
            }
        }
    }
}
