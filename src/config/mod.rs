use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::overlay::OverlayConfig;

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfigData {
    /// Gesture switches and size limits handed to the overlay at startup
    #[serde(default)]
    pub overlay: OverlayConfig,

    /// Last opened background image (reopened on startup if it still exists)
    #[serde(default)]
    pub last_image_path: Option<PathBuf>,
}

/// Runtime configuration resource
#[derive(Resource, Debug, Clone)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: get_config_path(),
            dirty: false,
        }
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to update the last image path in config
#[derive(Message)]
pub struct UpdateLastImagePathRequest {
    pub path: PathBuf,
}

/// Get the path to the config file (platform-appropriate location)
fn get_config_path() -> PathBuf {
    crate::paths::config_file()
}

/// Result of loading config from disk
#[derive(Debug, Clone)]
pub struct LoadConfigResult {
    pub config: AppConfig,
    /// Error message if config was reset to defaults due to an error
    pub reset_reason: Option<String>,
}

/// Load configuration from disk.
///
/// Called from `main` before the app is built, since the overlay reads its
/// gesture switches once at construction.
pub fn load_config() -> LoadConfigResult {
    load_config_from(get_config_path())
}

fn load_config_from(config_path: PathBuf) -> LoadConfigResult {
    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => {
                let parsed = parse_config(&json);
                if parsed.1.is_none() {
                    info!("Loaded config from {:?}", config_path);
                }
                parsed
            }
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (AppConfigData::default(), None)
    };

    LoadConfigResult {
        config: AppConfig {
            data,
            config_path,
            dirty: false,
        },
        reset_reason,
    }
}

fn parse_config(json: &str) -> (AppConfigData, Option<String>) {
    match serde_json::from_str(json) {
        Ok(data) => (data, None),
        Err(e) => {
            warn!("Failed to parse config file: {}", e);
            (
                AppConfigData::default(),
                Some(format!("Configuration file was corrupted: {}", e)),
            )
        }
    }
}

/// Save configuration to disk
fn save_config(config: &AppConfig) -> Result<(), String> {
    let json = serde_json::to_string_pretty(&config.data)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;
    std::fs::write(&config.config_path, json)
        .map_err(|e| format!("Failed to save config: {}", e))?;
    info!("Config saved to {:?}", config.config_path);
    Ok(())
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            match save_config(&config) {
                Ok(()) => config.dirty = false,
                Err(e) => error!("{}", e),
            }
        }
    }
}

/// System to update last image path
fn update_last_image_path_system(
    mut events: MessageReader<UpdateLastImagePathRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.last_image_path.as_ref() == Some(&event.path) {
            continue;
        }
        config.data.last_image_path = Some(event.path.clone());
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

/// Installs the config loaded by `main`
pub struct ConfigPlugin {
    loaded: LoadConfigResult,
}

impl ConfigPlugin {
    pub fn new(loaded: LoadConfigResult) -> Self {
        Self { loaded }
    }
}

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        let reset = ConfigResetNotification {
            show: self.loaded.reset_reason.is_some(),
            reason: self.loaded.reset_reason.clone(),
        };

        app.insert_resource(self.loaded.config.clone())
            .insert_resource(reset)
            .add_message::<SaveConfigRequest>()
            .add_message::<UpdateLastImagePathRequest>()
            .add_systems(
                Update,
                (
                    update_last_image_path_system
                        .run_if(on_message::<UpdateLastImagePathRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}
