//! Immediate-mode drawing surface used by the level and water drawers.
//!
//! Drawers push primitives in level coordinates (y grows downward) together
//! with the render state they were drawn under. The [`DrawList`] canvas
//! records them so the frame can be replayed with Bevy meshes and gizmos.
//! State changes go through [`StateScope`], which puts the canvas state back
//! as it was when the scope ends.

use std::ops::{Deref, DerefMut};

use bevy::color::Srgba;
use bevy::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendEquation {
    Add,
    /// Destination minus source.
    ReverseSubtract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendMode {
    pub equation: BlendEquation,
    pub src: BlendFactor,
    pub dst: BlendFactor,
}

impl BlendMode {
    pub const ALPHA: BlendMode = BlendMode {
        equation: BlendEquation::Add,
        src: BlendFactor::SrcAlpha,
        dst: BlendFactor::OneMinusSrcAlpha,
    };

    /// Darkens whatever is already drawn by the source colour.
    pub const SUBTRACT: BlendMode = BlendMode {
        equation: BlendEquation::ReverseSubtract,
        src: BlendFactor::One,
        dst: BlendFactor::One,
    };
}

impl Default for BlendMode {
    fn default() -> Self {
        Self::ALPHA
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadeModel {
    #[default]
    Flat,
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub texture_2d: bool,
    pub texture_coord_array: bool,
    pub line_smooth: bool,
    pub polygon_smooth: bool,
    pub blend: BlendMode,
    pub shade_model: ShadeModel,
    pub line_width: f32,
    pub color: Srgba,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            texture_2d: true,
            texture_coord_array: true,
            line_smooth: false,
            polygon_smooth: false,
            blend: BlendMode::ALPHA,
            shade_model: ShadeModel::Flat,
            line_width: 1.0,
            color: Srgba::WHITE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    TriangleStrip,
    LineStrip,
    /// Independent segments, two vertices each.
    Lines,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec2,
    pub color: Srgba,
}

impl Vertex {
    pub fn new(x: f32, y: f32, color: Srgba) -> Self {
        Self {
            position: Vec2::new(x, y),
            color,
        }
    }
}

pub trait Canvas {
    fn state(&self) -> &RenderState;

    fn state_mut(&mut self) -> &mut RenderState;

    fn draw(&mut self, primitive: Primitive, vertices: &[Vertex]);

    /// Draws `points` in the current colour.
    fn draw_points(&mut self, primitive: Primitive, points: &[Vec2]) {
        let color = self.state().color;
        let vertices: Vec<Vertex> = points
            .iter()
            .map(|p| Vertex {
                position: *p,
                color,
            })
            .collect();
        self.draw(primitive, &vertices);
    }
}

/// Saves the canvas state on creation and restores it on drop.
pub struct StateScope<'a, C: Canvas + ?Sized> {
    canvas: &'a mut C,
    saved: RenderState,
}

impl<'a, C: Canvas + ?Sized> StateScope<'a, C> {
    pub fn new(canvas: &'a mut C) -> Self {
        let saved = *canvas.state();
        Self { canvas, saved }
    }
}

impl<C: Canvas + ?Sized> Deref for StateScope<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> DerefMut for StateScope<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.canvas
    }
}

impl<C: Canvas + ?Sized> Drop for StateScope<'_, C> {
    fn drop(&mut self) {
        *self.canvas.state_mut() = self.saved;
    }
}

/// One recorded primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub primitive: Primitive,
    pub vertices: Vec<Vertex>,
    pub state: RenderState,
    pub layer: i32,
}

/// Canvas that records everything drawn on it.
#[derive(Debug, Default)]
pub struct DrawList {
    state: RenderState,
    layer: i32,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer stamped on the commands drawn from now on. Higher layers are
    /// drawn on top.
    pub fn set_layer(&mut self, layer: i32) {
        self.layer = layer;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Canvas for DrawList {
    fn state(&self) -> &RenderState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RenderState {
        &mut self.state
    }

    fn draw(&mut self, primitive: Primitive, vertices: &[Vertex]) {
        if vertices.is_empty() {
            return;
        }

        self.commands.push(DrawCommand {
            primitive,
            vertices: vertices.to_vec(),
            state: self.state,
            layer: self.layer,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_restores_state_on_drop() {
        let mut list = DrawList::new();
        let before = *list.state();

        {
            let mut scope = StateScope::new(&mut list);
            scope.state_mut().blend = BlendMode::SUBTRACT;
            scope.state_mut().line_width = 2.0;
            scope.draw_points(Primitive::Lines, &[Vec2::ZERO, Vec2::X]);
            assert_eq!(scope.state().line_width, 2.0);
        }

        assert_eq!(*list.state(), before);
        assert_eq!(list.commands().len(), 1);
        assert_eq!(list.commands()[0].state.blend, BlendMode::SUBTRACT);
    }

    #[test]
    fn nested_scopes_unwind_in_order() {
        let mut list = DrawList::new();
        {
            let mut outer = StateScope::new(&mut list);
            outer.state_mut().shade_model = ShadeModel::Smooth;
            {
                let mut inner = StateScope::new(&mut *outer);
                inner.state_mut().line_smooth = true;
            }
            assert!(!outer.state().line_smooth);
            assert_eq!(outer.state().shade_model, ShadeModel::Smooth);
        }
        assert_eq!(*list.state(), RenderState::default());
    }

    #[test]
    fn empty_draws_are_not_recorded() {
        let mut list = DrawList::new();
        list.draw(Primitive::TriangleStrip, &[]);
        assert!(list.is_empty());
    }

    #[test]
    fn commands_carry_the_current_layer() {
        let mut list = DrawList::new();
        list.set_layer(3);
        list.draw_points(Primitive::LineStrip, &[Vec2::ZERO, Vec2::ONE]);
        assert_eq!(list.commands()[0].layer, 3);
    }
}
