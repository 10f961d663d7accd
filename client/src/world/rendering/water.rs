//! Draws the level's water into a [`Canvas`].
//!
//! Two ways of drawing an area exist. The flat path, used by default, darkens
//! everything behind the water with a reverse-subtract blend and draws a
//! straight double water line. The wave path shapes the water line from the
//! heights of the area's live waves and is only taken when
//! [`WaterRenderConfig::wave_rendering_enabled`] is set.

use std::f64::consts::TAU;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use shared::water::{DrawingScope, Water, WaterArea, Wave};
use shared::world::Rect;

use super::canvas::{BlendMode, Canvas, Primitive, ShadeModel, StateScope, Vertex};
use crate::constants::{
    DEEP_SUBTRACT_TINT, SHALLOW_SUBTRACT_TINT, SHALLOW_WATER_DEPTH, WATERLINE_COLOR,
    WATERLINE_SHADOW_COLOR, WATERLINE_SHADOW_OFFSET, WATERLINE_WIDTH, WAVE_BODY_COLOR,
};

#[derive(Resource, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Resource)]
pub struct WaterRenderConfig {
    /// Shape the water line from live waves instead of drawing it flat.
    #[serde(default)]
    pub wave_rendering_enabled: bool,
}

impl Default for WaterRenderConfig {
    fn default() -> Self {
        Self {
            wave_rendering_enabled: false,
        }
    }
}

/// Height contribution of a wave at `proportion` of its length away.
#[inline]
fn crest(height: f64, proportion: f64) -> f64 {
    height * (proportion * TAU).cos() * (1.0 - proportion)
}

/// Sums the height of every wave over the columns `x..x + w`.
///
/// Waves close to one of their bounds add a second, mirrored contribution as
/// if part of them had bounced off the bound.
pub fn accumulate_wave_heights(waves: &[Wave], x: i32, w: i32) -> Vec<f32> {
    let mut heights = vec![0.0f32; w.max(0) as usize];

    for wave in waves {
        let begin_x = ((wave.xpos - wave.length) as i32).max(x);
        let end_x = ((wave.xpos + wave.length + 1.0) as i32).min(x + w);

        for xpos in begin_x..end_x {
            let index = (xpos - x) as usize;
            let mut height = 0.0;

            let distance = (wave.xpos - xpos as f64).abs() as i32;
            height += crest(wave.height, distance as f64 / wave.length);

            let wrap_left = ((wave.xpos - wave.left_bound as f64)
                + (xpos - wave.left_bound) as f64) as i32;
            if (wrap_left as f64) < wave.length {
                height += crest(wave.height, wrap_left as f64 / wave.length);
            }

            let wrap_right = ((wave.right_bound as f64 - wave.xpos)
                + (wave.right_bound - xpos) as f64) as i32;
            if (wrap_right as f64) < wave.length {
                height += crest(wave.height, wrap_right as f64 / wave.length);
            }

            *height_slot(&mut heights, index) += height as f32;
        }
    }

    heights
}

fn height_slot(heights: &mut [f32], index: usize) -> &mut f32 {
    debug_assert!(
        index < heights.len(),
        "wave column {index} outside {} columns",
        heights.len()
    );
    &mut heights[index]
}

fn height_at(heights: &[f32], index: usize) -> f32 {
    debug_assert!(
        index < heights.len(),
        "wave column {index} outside {} columns",
        heights.len()
    );
    heights[index]
}

#[derive(Debug, Clone, Default)]
pub struct WaterRenderer {
    config: WaterRenderConfig,
}

impl WaterRenderer {
    pub fn new(config: WaterRenderConfig) -> Self {
        Self { config }
    }

    /// Draws every area visible in `viewport` and ends `scope`.
    ///
    /// Returns true when at least one area was drawn. The canvas state is the
    /// same after the call as before it.
    pub fn draw<C: Canvas + ?Sized>(
        &self,
        water: &Water,
        scope: DrawingScope<'_>,
        canvas: &mut C,
        viewport: Rect,
    ) -> bool {
        let mut canvas = StateScope::new(canvas);
        canvas.state_mut().shade_model = ShadeModel::Smooth;

        let mut drawn = false;
        for area in water
            .areas()
            .iter()
            .filter(|area| area.rect().intersects(&viewport))
        {
            if self.draw_area(area, &mut *canvas, viewport) {
                drawn = true;
            }
        }

        scope.end_drawing();
        drawn
    }

    fn draw_area<C: Canvas + ?Sized>(&self, area: &WaterArea, canvas: &mut C, viewport: Rect) -> bool {
        let mut canvas = StateScope::new(canvas);
        canvas.state_mut().line_smooth = true;
        canvas.state_mut().polygon_smooth = true;

        let drew_waves = self.config.wave_rendering_enabled
            && !area.waves().is_empty()
            && draw_waves(area, &mut *canvas, viewport);

        if !drew_waves {
            draw_flat(area.rect(), &mut *canvas);
        }

        true
    }
}

fn draw_waves<C: Canvas + ?Sized>(area: &WaterArea, canvas: &mut C, viewport: Rect) -> bool {
    let rect = area.rect();
    let heights = accumulate_wave_heights(area.waves(), viewport.x(), viewport.w());

    let begin_x = viewport.x().max(rect.x());
    let end_x = viewport.x2().min(rect.x2());
    if end_x <= begin_x + 1 {
        return false;
    }

    let mut canvas = StateScope::new(canvas);
    canvas.state_mut().texture_2d = false;
    canvas.state_mut().texture_coord_array = false;
    canvas.state_mut().color = WAVE_BODY_COLOR;

    let surface: Vec<Vec2> = (begin_x..end_x)
        .map(|xpos| {
            let index = (xpos - viewport.x()) as usize;
            Vec2::new(xpos as f32, rect.y() as f32 - height_at(&heights, index))
        })
        .collect();

    let shallow_y = (rect.y() + SHALLOW_WATER_DEPTH) as f32;
    let body: Vec<Vec2> = surface
        .iter()
        .flat_map(|p| [Vec2::new(p.x, shallow_y), *p])
        .collect();
    canvas.draw_points(Primitive::TriangleStrip, &body);

    let (left, right) = (begin_x as f32, end_x as f32);
    let bottom = rect.y2() as f32;
    canvas.draw_points(
        Primitive::TriangleStrip,
        &[
            Vec2::new(left, shallow_y),
            Vec2::new(right, shallow_y),
            Vec2::new(left, bottom),
            Vec2::new(right, bottom),
        ],
    );

    canvas.state_mut().line_width = WATERLINE_WIDTH;
    canvas.state_mut().color = WATERLINE_COLOR;
    canvas.draw_points(Primitive::LineStrip, &surface);

    canvas.state_mut().color = WATERLINE_SHADOW_COLOR;
    let shadow: Vec<Vec2> = surface
        .iter()
        .map(|p| Vec2::new(p.x, p.y + WATERLINE_SHADOW_OFFSET))
        .collect();
    canvas.draw_points(Primitive::LineStrip, &shadow);

    true
}

fn draw_flat<C: Canvas + ?Sized>(rect: Rect, canvas: &mut C) {
    let mut canvas = StateScope::new(canvas);
    canvas.state_mut().blend = BlendMode::SUBTRACT;
    canvas.state_mut().texture_2d = false;
    canvas.state_mut().texture_coord_array = false;

    let (left, right) = (rect.x() as f32, rect.x2() as f32);
    let top = rect.y() as f32;
    let shallow_y = (rect.y() + SHALLOW_WATER_DEPTH).min(rect.y2()) as f32;
    let bottom = rect.y2() as f32;

    canvas.draw(
        Primitive::TriangleStrip,
        &[
            Vertex::new(left, top, SHALLOW_SUBTRACT_TINT),
            Vertex::new(right, top, SHALLOW_SUBTRACT_TINT),
            Vertex::new(left, shallow_y, DEEP_SUBTRACT_TINT),
            Vertex::new(right, shallow_y, DEEP_SUBTRACT_TINT),
            Vertex::new(left, bottom, DEEP_SUBTRACT_TINT),
            Vertex::new(right, bottom, DEEP_SUBTRACT_TINT),
        ],
    );

    canvas.state_mut().blend = BlendMode::ALPHA;
    canvas.state_mut().line_smooth = false;
    canvas.state_mut().line_width = WATERLINE_WIDTH;

    canvas.state_mut().color = WATERLINE_COLOR;
    canvas.draw_points(Primitive::Lines, &[Vec2::new(left, top), Vec2::new(right, top)]);

    canvas.state_mut().color = WATERLINE_SHADOW_COLOR;
    let shadow_y = top + WATERLINE_SHADOW_OFFSET;
    canvas.draw_points(
        Primitive::Lines,
        &[Vec2::new(left, shadow_y), Vec2::new(right, shadow_y)],
    );
}
