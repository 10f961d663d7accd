use bevy::math::IVec2;
use bevy_ecs::resource::Resource;
use bevy_log::{debug, info};

use super::area::{AreaId, WaterArea};
use super::distortion::{DistortionRegistry, DrawingScope};
use super::error::WaterError;
use super::node::{AreaNode, WaterNode};
use super::wave::WaveSpawn;
use crate::constants::DEFAULT_WATER_ZORDER;
use crate::formula::{compile_optional, CompiledFormula, FormulaCompiler, FormulaEntity};
use crate::world::{Rect, Solidity};

/// All water of one level.
///
/// Overlapping areas are allowed; every lookup takes the first area in list
/// order.
#[derive(Resource, Debug)]
pub struct Water {
    zorder: i32,
    current_x: Option<CompiledFormula>,
    current_y: Option<CompiledFormula>,
    areas: Vec<WaterArea>,
    next_id: u32,
}

impl Default for Water {
    fn default() -> Self {
        Self {
            zorder: DEFAULT_WATER_ZORDER,
            current_x: None,
            current_y: None,
            areas: Vec::new(),
            next_id: 0,
        }
    }
}

impl Water {
    /// Builds the manager from persisted state. Any malformed rect or formula
    /// fails the whole construction.
    pub fn from_node(
        node: Option<&WaterNode>,
        compiler: &dyn FormulaCompiler,
    ) -> Result<Water, WaterError> {
        let Some(node) = node else {
            return Ok(Water::default());
        };

        let current_x = compile_optional(compiler, node.current_x_formula.as_deref())
            .map_err(|source| WaterError::InvalidCurrentFormula { axis: "x", source })?;
        let current_y = compile_optional(compiler, node.current_y_formula.as_deref())
            .map_err(|source| WaterError::InvalidCurrentFormula { axis: "y", source })?;

        let mut water = Water {
            zorder: node.zorder,
            current_x,
            current_y,
            ..Water::default()
        };

        for (index, area) in node.area.iter().enumerate() {
            let rect = area
                .rect
                .parse::<Rect>()
                .map_err(|source| WaterError::InvalidAreaRect { index, source })?;
            water.add_rect(rect);
        }

        info!(
            "Built water with {} area(s) at zorder {}",
            water.areas.len(),
            water.zorder
        );
        Ok(water)
    }

    pub fn to_node(&self) -> WaterNode {
        WaterNode {
            zorder: self.zorder,
            current_x_formula: self.current_x.as_ref().map(|f| f.source().to_string()),
            current_y_formula: self.current_y.as_ref().map(|f| f.source().to_string()),
            area: self
                .areas
                .iter()
                .map(|area| AreaNode {
                    rect: area.rect().to_string(),
                })
                .collect(),
        }
    }

    pub fn zorder(&self) -> i32 {
        self.zorder
    }

    pub fn areas(&self) -> &[WaterArea] {
        &self.areas
    }

    pub fn area(&self, id: AreaId) -> Option<&WaterArea> {
        self.areas.iter().find(|area| area.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn add_rect(&mut self, rect: Rect) -> AreaId {
        let id = AreaId(self.next_id);
        self.next_id += 1;
        self.areas.push(WaterArea::new(id, rect));
        id
    }

    /// Removes every area intersecting `rect`.
    pub fn delete_rect(&mut self, rect: &Rect) -> usize {
        let before = self.areas.len();
        self.areas.retain(|area| !area.rect().intersects(rect));
        before - self.areas.len()
    }

    pub fn process(&mut self, level: &dyn Solidity, cycle: u64) {
        for area in &mut self.areas {
            area.process(level, cycle);
        }
    }

    pub fn add_wave(
        &mut self,
        point: IVec2,
        xvelocity: f64,
        height: f64,
        length: f64,
        delta_height: f64,
        delta_length: f64,
    ) {
        self.spawn_wave(
            point,
            WaveSpawn {
                xvelocity,
                height,
                length,
                delta_height,
                delta_length,
            },
        );
    }

    /// Returns whether an area took the wave.
    pub fn spawn_wave(&mut self, point: IVec2, spawn: WaveSpawn) -> bool {
        match self
            .areas
            .iter_mut()
            .find(|area| area.rect().contains_point(point))
        {
            Some(area) => {
                area.push_wave(point.x, spawn);
                true
            }
            None => {
                debug!("No water at {point}, wave dropped");
                false
            }
        }
    }

    /// Adds the current at `entity` to the supplied outputs. Axes without a
    /// formula, or without an output, are left alone.
    pub fn get_current(
        &self,
        entity: &dyn FormulaEntity,
        xvelocity: Option<&mut i32>,
        yvelocity: Option<&mut i32>,
    ) {
        if let (Some(formula), Some(out)) = (&self.current_x, xvelocity) {
            *out += formula.execute(entity).as_int();
        }

        if let (Some(formula), Some(out)) = (&self.current_y, yvelocity) {
            *out += formula.execute(entity).as_int();
        }
    }

    pub fn has_current(&self) -> bool {
        self.current_x.is_some() || self.current_y.is_some()
    }

    /// Rect of the first area holding the center of `rect`.
    pub fn is_underwater(&self, rect: &Rect) -> Option<Rect> {
        let center = rect.center();
        self.areas
            .iter()
            .map(WaterArea::rect)
            .find(|area| area.contains_point(center))
    }

    pub fn is_underwater_flag(&self, rect: &Rect) -> bool {
        self.is_underwater(rect).is_some()
    }

    /// Registers every area's distortion until the returned scope ends.
    pub fn begin_drawing<'a>(&self, registry: &'a mut DistortionRegistry) -> DrawingScope<'a> {
        DrawingScope::new(
            registry,
            self.areas
                .iter()
                .map(|area| (area.id(), area.distortion())),
        )
    }

    pub fn invalidate_surfaces(&mut self) {
        for area in &mut self.areas {
            area.invalidate_surface();
        }
    }

    /// Invalidates the areas whose top row could be affected by an edit
    /// covering `rect`.
    pub fn invalidate_surfaces_in(&mut self, rect: &Rect) -> usize {
        let mut count = 0;
        for area in self
            .areas
            .iter_mut()
            .filter(|area| area.rect().intersects(rect))
        {
            area.invalidate_surface();
            count += 1;
        }
        count
    }
}
