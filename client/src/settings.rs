//! Viewer settings read from `<game folder>/render.ron`.

use bevy::prelude::*;
use ron::{from_str, ser::PrettyConfig};
use serde::{Deserialize, Serialize};
use shared::GameFolderPaths;
use std::fs;
use std::path::Path;

use crate::constants::RENDER_SETTINGS_PATH;
use crate::world::WaterRenderConfig;

/// Wave spawned by a mouse click.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickWave {
    pub speed: f64,
    pub height: f64,
    pub height_jitter: f64,
    pub length: f64,
    pub delta_length: f64,
}

impl Default for ClickWave {
    fn default() -> Self {
        Self {
            speed: 1.5,
            height: 12.0,
            height_jitter: 3.0,
            length: 40.0,
            delta_length: 0.05,
        }
    }
}

fn default_pan_speed() -> f32 {
    400.0
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(default)]
    pub water: WaterRenderConfig,
    /// World units per second.
    #[serde(default = "default_pan_speed")]
    pub pan_speed: f32,
    #[serde(default)]
    pub click_wave: ClickWave,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            water: WaterRenderConfig::default(),
            pan_speed: default_pan_speed(),
            click_wave: ClickWave::default(),
        }
    }
}

fn write_settings_to_path(
    settings: &ClientSettings,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let pretty_config = PrettyConfig::new()
        .with_depth_limit(3)
        .with_separate_tuple_members(true);

    let serialized = ron::ser::to_string_pretty(settings, pretty_config)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serialized)?;
    Ok(())
}

/// Loads the settings, writing the defaults out when the file is missing.
/// An unreadable file is reported and replaced by defaults in memory only.
pub fn load_client_settings(game_folder_paths: &GameFolderPaths) -> ClientSettings {
    let path = game_folder_paths.game_folder_path.join(RENDER_SETTINGS_PATH);

    match fs::read_to_string(&path) {
        Ok(content) => match from_str::<ClientSettings>(&content) {
            Ok(settings) => {
                info!("Loaded render settings from {}", path.display());
                settings
            }
            Err(e) => {
                warn!("Ignoring invalid render settings {}: {}", path.display(), e);
                ClientSettings::default()
            }
        },
        Err(_) => {
            let settings = ClientSettings::default();
            if let Err(e) = write_settings_to_path(&settings, &path) {
                error!(
                    "Failed to create default render settings at {}: {}",
                    path.display(),
                    e
                );
            }
            settings
        }
    }
}
