//! Water-body simulation shared by the headless level host and the viewer.
//!
//! The crate owns the simulation side only: level geometry seams, the formula
//! seam used by currents, and the water subsystem itself (surface segments,
//! waves, areas and the per-level [`water::Water`] manager). Drawing lives in
//! the client crate.

use std::path::PathBuf;

use bevy_ecs::resource::Resource;

pub mod constants;
pub mod formula;
pub mod physics;
pub mod sets;
pub mod water;
pub mod world;

pub use constants::*;

#[derive(Resource, Debug, Clone)]
pub struct GameFolderPaths {
    pub game_folder_path: PathBuf,
}

pub fn get_game_folder_paths(game_folder_path: Option<String>) -> GameFolderPaths {
    let mut paths = default_game_folder_paths();

    if let Some(game_data) = game_folder_path {
        paths.game_folder_path = game_data.into();
    }

    paths
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(target_os = "windows")]
pub fn default_game_folder_paths() -> GameFolderPaths {
    let base = std::env::var_os("APPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(home_dir);
    GameFolderPaths {
        game_folder_path: base.join("tidewater"),
    }
}

#[cfg(target_os = "macos")]
pub fn default_game_folder_paths() -> GameFolderPaths {
    GameFolderPaths {
        game_folder_path: home_dir().join("Library/Application Support/tidewater"),
    }
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub fn default_game_folder_paths() -> GameFolderPaths {
    GameFolderPaths {
        game_folder_path: home_dir().join(".local/share/tidewater"),
    }
}
