use bevy::prelude::*;
use bevy_log::{error, info};
use ron::ser::PrettyConfig;
use shared::physics::Body;
use shared::water::Water;
use shared::world::{LevelCycle, LevelData, LevelName, SolidMap};
use shared::GameFolderPaths;
use std::{fs::File, io::Write, path::Path};

use crate::world::data::level_file_path;

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct SaveRequestEvent;

pub fn save_level_system(
    level_name: Res<LevelName>,
    cycle: Res<LevelCycle>,
    solids: Res<SolidMap>,
    water: Res<Water>,
    bodies: Query<&Body>,
    game_folder_path: Res<GameFolderPaths>,
    mut event: EventReader<SaveRequestEvent>,
) {
    // Reads all events to prevent them from being queued forever and repeatedly request a save
    if event.read().count() == 0 {
        return;
    }

    let level_data = LevelData {
        name: level_name.0.clone(),
        cycle: cycle.0,
        solids: solids.rects().to_vec(),
        water: Some(water.to_node()),
        bodies: bodies.iter().map(|body| body.rect).collect(),
    };

    let save_file_path = level_file_path(&level_name.0, &game_folder_path);

    if let Err(e) = save_level_data(&level_data, &save_file_path) {
        error!("Failed to save level data: {}", e);
    } else {
        info!("Level data saved successfully! Name: {}", level_name.0);
    }
}

pub fn save_level_data(
    level_data: &LevelData,
    file_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    // configure RON serialization
    let pretty_config = PrettyConfig::new()
        .with_depth_limit(3)
        .with_separate_tuple_members(true)
        .with_enumerate_arrays(true);

    let serialized = ron::ser::to_string_pretty(level_data, pretty_config)?;
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = File::create(file_path)?;
    file.write_all(serialized.as_bytes())?;
    info!("Level data saved to {}", file_path.display());
    Ok(())
}
