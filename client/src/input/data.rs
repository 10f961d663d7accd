use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameAction {
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    ToggleWaveRendering,
    ToggleWaterSimulation,
    ToggleInspector,
    SaveLevel,
}
