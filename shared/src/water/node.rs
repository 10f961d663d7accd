//! Persisted form of a level's water.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_WATER_ZORDER;

fn default_zorder() -> i32 {
    DEFAULT_WATER_ZORDER
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterNode {
    #[serde(default = "default_zorder")]
    pub zorder: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_x_formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_y_formula: Option<String>,
    #[serde(default)]
    pub area: Vec<AreaNode>,
}

impl Default for WaterNode {
    fn default() -> Self {
        Self {
            zorder: DEFAULT_WATER_ZORDER,
            current_x_formula: None,
            current_y_formula: None,
            area: Vec::new(),
        }
    }
}

/// Rects are kept as text here and validated when the manager is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaNode {
    pub rect: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let node: WaterNode = ron::from_str("(area: [(rect: \"0,0,10,10\")])").unwrap();
        assert_eq!(node.zorder, DEFAULT_WATER_ZORDER);
        assert_eq!(node.current_x_formula, None);
        assert_eq!(node.area.len(), 1);
        assert_eq!(node.area[0].rect, "0,0,10,10");

        let empty: WaterNode = ron::from_str("()").unwrap();
        assert_eq!(empty, WaterNode::default());
    }

    #[test]
    fn formulas_survive_ron() {
        let node = WaterNode {
            zorder: 5,
            current_x_formula: Some("2".into()),
            current_y_formula: None,
            area: vec![AreaNode {
                rect: "1,2,3,4".into(),
            }],
        };
        let text = ron::to_string(&node).unwrap();
        assert!(!text.contains("current_y_formula"));
        let back: WaterNode = ron::from_str(&text).unwrap();
        assert_eq!(back, node);
    }
}
