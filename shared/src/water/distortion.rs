//! Raster distortion applied to everything drawn inside a water area.
//!
//! Each tick an area recomputes its [`WaterDistortion`] from the level cycle.
//! While a frame is being drawn the distortions are registered in the
//! [`DistortionRegistry`], keyed by area, and level drawing runs its vertices
//! through [`DistortionRegistry::distort_point`]. Registration is scoped by
//! [`DrawingScope`], which unregisters every area it registered when it ends,
//! on every exit path.

use bevy::math::Vec2;
use bevy_ecs::resource::Resource;

use super::AreaId;
use crate::world::Rect;

/// Horizontal displacement at the crest of the ripple, in level units.
const RIPPLE_AMPLITUDE: f32 = 2.0;
/// Phase advance per level cycle.
const RIPPLE_PHASE_PER_CYCLE: f32 = 0.08;
/// Phase advance per row below the water line.
const RIPPLE_PHASE_PER_ROW: f32 = 0.06;
/// Cycles after which the ripple repeats, keeps the phase small.
const RIPPLE_PERIOD_CYCLES: u64 = 7854;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WaterDistortion {
    cycle: u64,
    area: Rect,
}

impl WaterDistortion {
    pub fn compute(cycle: u64, area: Rect) -> Self {
        Self { cycle, area }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Sideways shift for a row at `y`.
    pub fn offset_at(&self, y: f32) -> f32 {
        let phase = (self.cycle % RIPPLE_PERIOD_CYCLES) as f32 * RIPPLE_PHASE_PER_CYCLE
            + (y - self.area.y() as f32) * RIPPLE_PHASE_PER_ROW;
        RIPPLE_AMPLITUDE * phase.sin()
    }

    /// Points outside the area are returned unchanged.
    pub fn distort_point(&self, p: Vec2) -> Vec2 {
        if !self.area.contains_point(p.floor().as_ivec2()) {
            return p;
        }
        Vec2::new(p.x + self.offset_at(p.y), p.y)
    }
}

#[derive(Resource, Debug, Default)]
pub struct DistortionRegistry {
    active: Vec<(AreaId, WaterDistortion)>,
}

impl DistortionRegistry {
    /// Registering an area twice replaces its distortion.
    pub fn register(&mut self, id: AreaId, distortion: WaterDistortion) {
        match self.active.iter_mut().find(|(active, _)| *active == id) {
            Some(slot) => slot.1 = distortion,
            None => self.active.push((id, distortion)),
        }
    }

    pub fn unregister(&mut self, id: AreaId) -> bool {
        let before = self.active.len();
        self.active.retain(|(active, _)| *active != id);
        before != self.active.len()
    }

    pub fn is_registered(&self, id: AreaId) -> bool {
        self.active.iter().any(|(active, _)| *active == id)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn distort_point(&self, p: Vec2) -> Vec2 {
        self.active
            .iter()
            .fold(p, |p, (_, distortion)| distortion.distort_point(p))
    }
}

/// Live registration of a manager's areas for one frame.
///
/// Created by [`super::Water::begin_drawing`]. Dropping the scope, or calling
/// [`DrawingScope::end_drawing`], unregisters the areas.
#[must_use = "dropping the scope immediately unregisters the water distortions"]
#[derive(Debug)]
pub struct DrawingScope<'a> {
    registry: &'a mut DistortionRegistry,
    registered: Vec<AreaId>,
}

impl<'a> DrawingScope<'a> {
    pub(crate) fn new(
        registry: &'a mut DistortionRegistry,
        areas: impl IntoIterator<Item = (AreaId, WaterDistortion)>,
    ) -> Self {
        let mut registered = Vec::new();
        for (id, distortion) in areas {
            registry.register(id, distortion);
            registered.push(id);
        }
        Self {
            registry,
            registered,
        }
    }

    pub fn registry(&self) -> &DistortionRegistry {
        self.registry
    }

    pub fn registered(&self) -> &[AreaId] {
        &self.registered
    }

    pub fn distort_point(&self, p: Vec2) -> Vec2 {
        self.registry.distort_point(p)
    }

    /// Ends the scope now; the areas are unregistered as it drops.
    pub fn end_drawing(self) {}
}

impl Drop for DrawingScope<'_> {
    fn drop(&mut self) {
        for id in self.registered.drain(..) {
            self.registry.unregister(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distortion_only_moves_points_inside_its_area() {
        let distortion = WaterDistortion::compute(10, Rect::new(0, 100, 50, 50));
        let outside = Vec2::new(10.0, 50.0);
        assert_eq!(distortion.distort_point(outside), outside);

        let inside = Vec2::new(10.0, 120.0);
        let moved = distortion.distort_point(inside);
        assert_eq!(moved.y, inside.y);
        assert!((moved.x - inside.x).abs() <= RIPPLE_AMPLITUDE);
        assert_eq!(moved.x - inside.x, distortion.offset_at(120.0));
    }

    #[test]
    fn ripple_moves_with_the_cycle() {
        let area = Rect::new(0, 0, 10, 10);
        let a = WaterDistortion::compute(3, area).offset_at(5.0);
        let b = WaterDistortion::compute(4, area).offset_at(5.0);
        assert_ne!(a, b);
    }

    #[test]
    fn register_replaces_and_unregister_reports() {
        let mut registry = DistortionRegistry::default();
        let area = Rect::new(0, 0, 10, 10);
        registry.register(AreaId(1), WaterDistortion::compute(0, area));
        registry.register(AreaId(1), WaterDistortion::compute(5, area));
        assert_eq!(registry.len(), 1);
        assert!(registry.unregister(AreaId(1)));
        assert!(!registry.unregister(AreaId(1)));
        assert!(registry.is_empty());
    }

    #[test]
    fn scope_unregisters_on_drop_and_on_end() {
        let mut registry = DistortionRegistry::default();
        let area = Rect::new(0, 0, 10, 10);
        registry.register(AreaId(99), WaterDistortion::compute(0, area));

        {
            let scope = DrawingScope::new(
                &mut registry,
                [
                    (AreaId(1), WaterDistortion::compute(0, area)),
                    (AreaId(2), WaterDistortion::compute(0, area)),
                ],
            );
            assert_eq!(scope.registry().len(), 3);
        }
        assert_eq!(registry.len(), 1);
        assert!(registry.is_registered(AreaId(99)));

        let scope = DrawingScope::new(&mut registry, [(AreaId(3), WaterDistortion::compute(0, area))]);
        assert_eq!(scope.registered(), &[AreaId(3)]);
        scope.end_drawing();
        assert_eq!(registry.len(), 1);
    }
}
