use bevy::prelude::*;
use image_mapper::MapperOptions;
use image_mapper::constants::MAX_RECENT_MAPS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Default image shown when the config names none
pub const DEFAULT_IMAGE: &str = "images/example.png";

/// Map file opened when the config names none
pub const DEFAULT_MAP_FILE: &str = "assets/maps/example.json";

/// Viewer configuration persisted to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerConfigData {
    /// Asset path of the mapped image
    #[serde(default = "default_image")]
    pub image: String,

    /// Map file opened on startup
    #[serde(default = "default_map_file")]
    pub map_file: Option<PathBuf>,

    /// Mapper options, each missing field falls back to its default
    #[serde(default)]
    pub options: MapperOptions,

    /// Recently opened map files for quick access
    #[serde(default)]
    pub recent_maps: Vec<PathBuf>,
}

fn default_image() -> String {
    DEFAULT_IMAGE.to_string()
}

fn default_map_file() -> Option<PathBuf> {
    Some(PathBuf::from(DEFAULT_MAP_FILE))
}

impl Default for ViewerConfigData {
    fn default() -> Self {
        Self {
            image: default_image(),
            map_file: default_map_file(),
            options: MapperOptions::default(),
            recent_maps: Vec::new(),
        }
    }
}

impl ViewerConfigData {
    /// Move `path` to the front of the recent list, keeping it bounded
    pub fn push_recent_map(&mut self, path: PathBuf) {
        self.recent_maps.retain(|p| p != &path);
        self.recent_maps.insert(0, path);
        self.recent_maps.truncate(MAX_RECENT_MAPS);
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct ViewerConfig {
    /// The persisted configuration data
    pub data: ViewerConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data: ViewerConfigData::default(),
            config_path: crate::paths::config_file(),
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

/// Message to remember an opened map file
#[derive(Message)]
pub struct AddRecentMapRequest {
    pub path: PathBuf,
}

/// Parse config JSON, falling back to defaults with a reason on failure
fn parse_config(json: &str) -> (ViewerConfigData, Option<String>) {
    match serde_json::from_str(json) {
        Ok(data) => (data, None),
        Err(e) => {
            warn!("Failed to parse config file: {}", e);
            (
                ViewerConfigData::default(),
                Some(format!("Configuration file was corrupted: {}", e)),
            )
        }
    }
}

/// Load configuration from disk
fn load_config(config_path: &std::path::Path) -> (ViewerConfigData, Option<String>) {
    if !config_path.exists() {
        info!("No config file found, using defaults");
        return (ViewerConfigData::default(), None);
    }

    match std::fs::read_to_string(config_path) {
        Ok(json) => {
            let result = parse_config(&json);
            if result.1.is_none() {
                info!("Loaded config from {:?}", config_path);
            }
            result
        }
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            (
                ViewerConfigData::default(),
                Some(format!("Could not read configuration file: {}", e)),
            )
        }
    }
}

/// Save configuration to disk
fn save_config(config: &ViewerConfig) {
    if let Err(e) = crate::paths::ensure_directories() {
        warn!("Failed to create config directories: {}", e);
    }
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<ViewerConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let (data, reset_reason) = load_config(&config.config_path);
    config.data = data;
    config.dirty = false;

    if let Some(reason) = reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<ViewerConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

/// System to add a map file to the recent list
fn add_recent_map_system(
    mut events: MessageReader<AddRecentMapRequest>,
    mut config: ResMut<ViewerConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.push_recent_map(event.path.clone());
        config.data.map_file = Some(event.path.clone());
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewerConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<AddRecentMapRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    add_recent_map_system.run_if(on_message::<AddRecentMapRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_mapper::HighlightColor;

    #[test]
    fn test_viewer_config_data_default() {
        let data = ViewerConfigData::default();
        assert_eq!(data.image, DEFAULT_IMAGE);
        assert_eq!(data.map_file, Some(PathBuf::from(DEFAULT_MAP_FILE)));
        assert!(data.recent_maps.is_empty());
        assert_eq!(data.options, MapperOptions::default());
    }

    #[test]
    fn test_partial_options_fall_back_to_defaults() {
        let json = r#"{
            "image": "images/floor.png",
            "options": { "responsive": true, "fillColor": "rgba(255, 0, 0, 0.25)" }
        }"#;
        let (data, reason) = parse_config(json);

        assert!(reason.is_none());
        assert_eq!(data.image, "images/floor.png");
        assert_eq!(data.map_file, Some(PathBuf::from(DEFAULT_MAP_FILE)));
        assert!(data.options.responsive);
        assert!(data.options.active);
        assert_eq!(data.options.fill_color, HighlightColor::rgba(255, 0, 0, 0.25));
        assert_eq!(data.options.area_key_name, "id");
    }

    #[test]
    fn test_corrupted_config_resets_with_reason() {
        let (data, reason) = parse_config("{ not json");
        assert_eq!(data, ViewerConfigData::default());
        assert!(reason.unwrap().starts_with("Configuration file was corrupted"));
    }

    #[test]
    fn test_viewer_config_data_serialization() {
        let mut data = ViewerConfigData {
            map_file: Some(PathBuf::from("/maps/floor.json")),
            ..Default::default()
        };
        data.options.line_width = 3.0;
        data.recent_maps = vec![PathBuf::from("/maps/one.json")];

        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"mapFile\""));
        assert!(json.contains("\"recentMaps\""));

        let parsed: ViewerConfigData = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, data);
    }

    #[test]
    fn test_push_recent_map_moves_to_front_and_truncates() {
        let mut data = ViewerConfigData::default();
        for i in 0..MAX_RECENT_MAPS + 2 {
            data.push_recent_map(PathBuf::from(format!("/maps/{}.json", i)));
        }
        assert_eq!(data.recent_maps.len(), MAX_RECENT_MAPS);

        data.push_recent_map(PathBuf::from("/maps/3.json"));
        assert_eq!(data.recent_maps[0], PathBuf::from("/maps/3.json"));
        assert_eq!(data.recent_maps.len(), MAX_RECENT_MAPS);
        assert_eq!(
            data.recent_maps
                .iter()
                .filter(|p| **p == PathBuf::from("/maps/3.json"))
                .count(),
            1
        );
    }
}
