//! Current-driven drift for level bodies.
//!
//! Every tick a body starts from its own baseline velocity, has the level's
//! water current added on top and is moved by the result. Bodies whose center
//! ends up inside a water area are tagged [`Submerged`].

use bevy::prelude::*;
use bevy_log::debug;

use crate::formula::{FormulaEntity, FormulaValue};
use crate::water::Water;
use crate::world::{LevelCycle, Rect};

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Body {
    pub rect: Rect,
    /// Baseline movement per tick before currents are applied.
    pub velocity: IVec2,
}

impl Body {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            velocity: IVec2::ZERO,
        }
    }
}

/// Present while the body's center is inside a water area.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submerged {
    pub area: Rect,
}

/// What current formulas can see of a body.
pub struct BodyView<'a> {
    pub body: &'a Body,
    pub cycle: u64,
}

impl FormulaEntity for BodyView<'_> {
    fn query_value(&self, key: &str) -> FormulaValue {
        let rect = self.body.rect;
        match key {
            "x" => rect.x().into(),
            "y" => rect.y().into(),
            "w" => rect.w().into(),
            "h" => rect.h().into(),
            "mid_x" => rect.center().x.into(),
            "mid_y" => rect.center().y.into(),
            "velocity_x" => self.body.velocity.x.into(),
            "velocity_y" => self.body.velocity.y.into(),
            "cycle" => FormulaValue::Int(self.cycle.min(i64::MAX as u64) as i64),
            _ => FormulaValue::Null,
        }
    }
}

/// Moves `body` one tick and returns the area it ended up in, if any.
pub fn drift_body(body: &mut Body, water: &Water, cycle: u64) -> Option<Rect> {
    let mut xvelocity = body.velocity.x;
    let mut yvelocity = body.velocity.y;
    water.get_current(
        &BodyView { body, cycle },
        Some(&mut xvelocity),
        Some(&mut yvelocity),
    );

    body.rect = body.rect.translated(xvelocity, yvelocity);
    water.is_underwater(&body.rect)
}

pub fn drift_bodies(
    mut commands: Commands,
    water: Res<Water>,
    cycle: Res<LevelCycle>,
    mut bodies: Query<(Entity, &mut Body, Option<&Submerged>)>,
) {
    for (entity, mut body, submerged) in bodies.iter_mut() {
        let area = drift_body(&mut body, &water, cycle.0);

        match (area, submerged) {
            (Some(area), Some(current)) if current.area == area => {}
            (Some(area), _) => {
                debug!("Body {entity} entered water {area}");
                commands.entity(entity).insert(Submerged { area });
            }
            (None, Some(_)) => {
                debug!("Body {entity} left the water");
                commands.entity(entity).remove::<Submerged>();
            }
            (None, None) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;

    use super::*;
    use crate::formula::ArithmeticCompiler;
    use crate::water::{AreaNode, WaterNode};

    fn water_with_current(x: &str, y: Option<&str>) -> Water {
        let node = WaterNode {
            current_x_formula: Some(x.to_string()),
            current_y_formula: y.map(str::to_string),
            area: vec![AreaNode {
                rect: "0,100,400,100".to_string(),
            }],
            ..WaterNode::default()
        };
        Water::from_node(Some(&node), &ArithmeticCompiler).unwrap()
    }

    #[test]
    fn view_exposes_body_attributes() {
        let body = Body {
            rect: Rect::new(10, 20, 4, 6),
            velocity: IVec2::new(-1, 2),
        };
        let view = BodyView {
            body: &body,
            cycle: 9,
        };
        assert_eq!(view.query_value("mid_x"), FormulaValue::Int(12));
        assert_eq!(view.query_value("mid_y"), FormulaValue::Int(23));
        assert_eq!(view.query_value("velocity_x"), FormulaValue::Int(-1));
        assert_eq!(view.query_value("cycle"), FormulaValue::Int(9));
        assert_eq!(view.query_value("depth"), FormulaValue::Null);
    }

    #[test]
    fn current_adds_to_baseline_velocity() {
        let water = water_with_current("3", Some("0 - 1"));
        let mut body = Body {
            rect: Rect::new(10, 120, 10, 10),
            velocity: IVec2::new(1, 0),
        };

        let area = drift_body(&mut body, &water, 0);
        assert_eq!(body.rect, Rect::new(14, 119, 10, 10));
        assert_eq!(body.velocity, IVec2::new(1, 0));
        assert_eq!(area, Some(Rect::new(0, 100, 400, 100)));
    }

    #[test]
    fn body_above_the_water_is_dry() {
        let water = Water::default();
        let mut body = Body::new(Rect::new(10, 10, 10, 10));
        assert_eq!(drift_body(&mut body, &water, 0), None);
        assert_eq!(body.rect, Rect::new(10, 10, 10, 10));
    }

    #[test]
    fn system_tags_and_untags_submerged_bodies() {
        let mut world = World::new();
        world.insert_resource(water_with_current("0", Some("0 - 20")));
        world.insert_resource(LevelCycle(0));
        let body = world
            .spawn(Body::new(Rect::new(10, 130, 10, 10)))
            .id();

        world.run_system_once(drift_bodies).unwrap();
        assert_eq!(
            world.get::<Submerged>(body),
            Some(&Submerged {
                area: Rect::new(0, 100, 400, 100)
            })
        );

        world.run_system_once(drift_bodies).unwrap();
        assert!(world.get::<Submerged>(body).is_none());
        assert_eq!(world.get::<Body>(body).unwrap().rect.y(), 90);
    }
}
