use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};

use super::Rect;
use crate::water::WaterNode;

/// Simulation tick counter of the loaded level.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCycle(pub u64);

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct LevelName(pub String);

/// On-disk level description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub name: String,
    #[serde(default)]
    pub cycle: u64,
    #[serde(default)]
    pub solids: Vec<Rect>,
    #[serde(default)]
    pub water: Option<WaterNode>,
    /// Hitboxes of the drifting bodies placed in the level.
    #[serde(default)]
    pub bodies: Vec<Rect>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_reads_from_ron() {
        let text = r#"LevelData(
            name: "harbour",
            solids: ["0,200,400,20", "150,0,20,200"],
            water: Some((
                current_x_formula: Some("1"),
                area: [(rect: "0,100,400,100")],
            )),
            bodies: ["20,90,10,10"],
        )"#;

        let level: LevelData = ron::from_str(text).unwrap();
        assert_eq!(level.name, "harbour");
        assert_eq!(level.cycle, 0);
        assert_eq!(level.solids[1], Rect::new(150, 0, 20, 200));
        let water = level.water.unwrap();
        assert_eq!(water.zorder, 3);
        assert_eq!(water.area[0].rect, "0,100,400,100");
        assert_eq!(level.bodies, vec![Rect::new(20, 90, 10, 10)]);
    }
}
