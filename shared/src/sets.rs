use bevy::prelude::*;

/// Ordering of the water systems inside `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum WaterUpdateSet {
    /// Area, solid and wave requests coming from hosts.
    Edits,
    /// Cycle advance and per-area processing.
    Simulation,
    /// Entity drift driven by water currents.
    Currents,
    /// Saving and other host bookkeeping after the tick settled.
    Host,
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameUpdateSet {
    Input,
    Camera,
    Rendering,
}
