use bevy_log::info;
use ron::de::from_str;
use shared::world::LevelData;
use shared::GameFolderPaths;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::world::data::level_file_path;

pub fn load_level_data(
    level_name: &str,
    game_folder_paths: &GameFolderPaths,
) -> Result<LevelData, Box<dyn std::error::Error>> {
    let file_path: PathBuf = level_file_path(level_name, game_folder_paths);
    let path: &Path = file_path.as_path();

    if !path.exists() {
        info!(
            "Level data file not found: {}. Starting from an empty level.",
            file_path.display()
        );
        return Ok(LevelData {
            name: level_name.to_string(),
            ..Default::default()
        });
    }

    let contents: String = fs::read_to_string(path)?;
    let level_data: LevelData = from_str(&contents)?;

    info!("Found level data file from disk: {}", file_path.display());

    Ok(level_data)
}
