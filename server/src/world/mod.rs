pub(crate) mod data;
pub mod load_from_file;
pub mod save;
pub mod simulation;

use bevy::prelude::*;
use shared::sets::WaterUpdateSet;

use save::{save_level_system, SaveRequestEvent};
use simulation::{enforce_tick_limit, TickLimit};

/// Host-side systems around the water simulation: tick limit and saving.
pub struct LevelHostPlugin;

impl Plugin for LevelHostPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TickLimit>()
            .add_event::<SaveRequestEvent>()
            .add_systems(
                FixedUpdate,
                (enforce_tick_limit, save_level_system)
                    .chain()
                    .in_set(WaterUpdateSet::Host),
            );
    }
}
