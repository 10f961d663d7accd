use std::path::PathBuf;

use shared::{GameFolderPaths, LEVELS_PATH};

pub fn level_file_path(level_name: &str, game_folder_paths: &GameFolderPaths) -> PathBuf {
    game_folder_paths
        .game_folder_path
        .join(LEVELS_PATH)
        .join(format!("{level_name}.ron"))
}
