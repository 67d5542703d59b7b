use crate::screen::ScreenKind;
use crate::sound::SoundResource;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StartScreen {
    #[default]
    Home,
    Silly,
}

/// Contents of `config.yml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub night_mode: bool,
    pub start_screen: StartScreen,
    /// `bell`, `off`, or a path to a sample file.
    pub sound: String,
    pub log_level: String,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub silly: bool,
    pub night: bool,
    pub mute: bool,
}

#[derive(Debug, Clone)]
pub struct SettingsLocation {
    pub path: PathBuf,
    pub exists: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            night_mode: false,
            start_screen: StartScreen::Home,
            sound: "bell".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn apply(mut self, overrides: &Overrides) -> Self {
        if overrides.silly {
            self.start_screen = StartScreen::Silly;
        }
        if overrides.night {
            self.night_mode = true;
        }
        if overrides.mute {
            self.sound = "off".to_string();
        }
        self
    }

    pub fn start_kind(&self) -> ScreenKind {
        match self.start_screen {
            StartScreen::Home => ScreenKind::Home,
            StartScreen::Silly => ScreenKind::Silly,
        }
    }

    /// `None` when sound is switched off.
    pub fn sound_resource(&self) -> Option<SoundResource> {
        match self.sound.trim() {
            "" | "bell" => Some(SoundResource::Bell),
            "off" | "none" => None,
            path => Some(SoundResource::File(PathBuf::from(path))),
        }
    }
}

pub fn locate_settings(explicit: Option<PathBuf>) -> Result<SettingsLocation> {
    let path = match explicit {
        Some(path) => path,
        None => default_settings_path()?,
    };
    let exists = path.exists();
    Ok(SettingsLocation { path, exists })
}

pub fn load_settings(location: &SettingsLocation) -> Result<Settings> {
    if !location.exists {
        return Ok(Settings::default());
    }
    read_settings(&location.path)
}

fn read_settings(path: &Path) -> Result<Settings> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
    if data.trim().is_empty() {
        return Ok(Settings::default());
    }
    let settings: Settings =
        serde_yaml::from_str(&data).with_context(|| format!("parsing settings file {:?}", path))?;
    Ok(settings)
}

pub fn data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "reminders").context("locating data directory")?;
    Ok(dirs.data_dir().to_path_buf())
}

fn default_settings_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "reminders").context("locating config directory")?;
    Ok(dirs.config_dir().join("config.yml"))
}
