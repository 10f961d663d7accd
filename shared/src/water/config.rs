use bevy::prelude::*;

/// Runtime switches for the water simulation.
#[derive(Resource, Clone, Debug, Reflect)]
#[reflect(Resource)]
pub struct WaterConfig {
    /// When false areas are left untouched each tick; edits still apply.
    pub enabled: bool,
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
