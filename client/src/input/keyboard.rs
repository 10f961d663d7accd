use crate::{constants::BINDS_PATH, input::data::GameAction, input::KeyMap};
use crate::debug::DebugOptions;
use bevy::prelude::*;
use ron::{from_str, ser::PrettyConfig};
use server::world::save::SaveRequestEvent;
use shared::water::WaterConfig;
use shared::GameFolderPaths;
use std::path::Path;
use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::PathBuf,
};

use crate::world::WaterRenderConfig;

fn write_keybindings_to_path(key_map: &KeyMap, binds_path: &Path) -> Result<(), std::io::Error> {
    let pretty_config = PrettyConfig::new()
        .with_depth_limit(3)
        .with_separate_tuple_members(true)
        .with_enumerate_arrays(true);

    let serialized = ron::ser::to_string_pretty(key_map, pretty_config)
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::Other, "serialization failed"))?;
    if let Some(parent) = binds_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(binds_path)?;
    file.write_all(serialized.as_bytes())
}

pub fn is_action_pressed(
    action: GameAction,
    keyboard_input: &ButtonInput<KeyCode>,
    key_map: &KeyMap,
) -> bool {
    if let Some(key_codes) = key_map.map.get(&action) {
        for key_code in key_codes {
            if keyboard_input.pressed(*key_code) {
                return true;
            }
        }
    }
    false
}

pub fn is_action_just_pressed(
    action: GameAction,
    keyboard_input: &ButtonInput<KeyCode>,
    key_map: &KeyMap,
) -> bool {
    if let Some(key_codes) = key_map.map.get(&action) {
        for key_code in key_codes {
            if keyboard_input.just_pressed(*key_code) {
                return true;
            }
        }
    }
    false
}

pub(crate) fn default_key_map() -> BTreeMap<GameAction, Vec<KeyCode>> {
    let mut map = BTreeMap::new();
    map.insert(GameAction::PanLeft, vec![KeyCode::KeyA, KeyCode::ArrowLeft]);
    map.insert(GameAction::PanRight, vec![KeyCode::KeyD, KeyCode::ArrowRight]);
    map.insert(GameAction::PanUp, vec![KeyCode::KeyW, KeyCode::ArrowUp]);
    map.insert(GameAction::PanDown, vec![KeyCode::KeyS, KeyCode::ArrowDown]);
    map.insert(GameAction::ToggleWaveRendering, vec![KeyCode::F2]);
    map.insert(GameAction::ToggleWaterSimulation, vec![KeyCode::Space]);
    map.insert(GameAction::ToggleInspector, vec![KeyCode::F3]);
    map.insert(GameAction::SaveLevel, vec![KeyCode::F5]);
    map
}

pub fn get_bindings(game_folder_paths: &GameFolderPaths) -> KeyMap {
    let binds_path: PathBuf = game_folder_paths.game_folder_path.join(BINDS_PATH);

    if let Ok(content) = fs::read_to_string(binds_path.as_path()) {
        if let Ok(key_map) = from_str::<KeyMap>(&content) {
            return key_map;
        }
    }

    let key_map = KeyMap::default();
    if let Err(e) = write_keybindings_to_path(&key_map, binds_path.as_path()) {
        error!(
            "Failed to create default keybindings file at {:?}: {}",
            binds_path, e
        );
    }
    key_map
}

pub fn toggle_actions_system(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    key_map: Res<KeyMap>,
    mut render_config: ResMut<WaterRenderConfig>,
    mut water_config: ResMut<WaterConfig>,
    mut debug_options: ResMut<DebugOptions>,
    mut saves: EventWriter<SaveRequestEvent>,
) {
    if is_action_just_pressed(GameAction::ToggleWaveRendering, &keyboard_input, &key_map) {
        render_config.wave_rendering_enabled = !render_config.wave_rendering_enabled;
        info!(
            "Wave rendering {}",
            if render_config.wave_rendering_enabled {
                "enabled"
            } else {
                "disabled"
            }
        );
    }

    if is_action_just_pressed(GameAction::ToggleWaterSimulation, &keyboard_input, &key_map) {
        water_config.enabled = !water_config.enabled;
        info!("Water simulation paused: {}", !water_config.enabled);
    }

    if is_action_just_pressed(GameAction::ToggleInspector, &keyboard_input, &key_map) {
        debug_options.toggle_inspector();
    }

    if is_action_just_pressed(GameAction::SaveLevel, &keyboard_input, &key_map) {
        saves.write(SaveRequestEvent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_has_a_default_key() {
        let map = default_key_map();
        for action in [
            GameAction::PanLeft,
            GameAction::PanRight,
            GameAction::PanUp,
            GameAction::PanDown,
            GameAction::ToggleWaveRendering,
            GameAction::ToggleWaterSimulation,
            GameAction::ToggleInspector,
            GameAction::SaveLevel,
        ] {
            assert!(map.get(&action).is_some_and(|keys| !keys.is_empty()));
        }
    }

    #[test]
    fn bindings_fall_back_to_defaults_and_are_written() {
        let folder = std::env::temp_dir().join(format!("tidewater-binds-{}", std::process::id()));
        let _ = fs::remove_dir_all(&folder);
        let paths = GameFolderPaths {
            game_folder_path: folder.clone(),
        };

        assert_eq!(get_bindings(&paths), KeyMap::default());
        assert!(folder.join(BINDS_PATH).exists());
        assert_eq!(get_bindings(&paths), KeyMap::default());
        let _ = fs::remove_dir_all(&folder);
    }

    #[test]
    fn pressed_action_reads_any_bound_key() {
        let key_map = KeyMap::default();
        let mut input = ButtonInput::<KeyCode>::default();
        input.press(KeyCode::ArrowLeft);
        assert!(is_action_pressed(GameAction::PanLeft, &input, &key_map));
        assert!(is_action_just_pressed(GameAction::PanLeft, &input, &key_map));
        assert!(!is_action_pressed(GameAction::PanRight, &input, &key_map));
    }
}
