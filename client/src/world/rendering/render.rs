use bevy::prelude::*;
use shared::physics::{Body, Submerged};
use shared::water::{DistortionRegistry, Water};
use shared::world::SolidMap;

use super::canvas::DrawList;
use super::level::draw_level;
use super::water::{WaterRenderConfig, WaterRenderer};
use super::water_mesh::FrameDrawList;
use crate::camera::{level_viewport, LevelCamera};
use crate::constants::LEVEL_LAYER;

/// Records this frame's level and water into [`FrameDrawList`].
///
/// Solids and bodies are drawn while the water distortions are registered,
/// the water itself last, which also ends the registration.
pub fn level_render_system(
    water: Res<Water>,
    solids: Res<SolidMap>,
    config: Res<WaterRenderConfig>,
    mut registry: ResMut<DistortionRegistry>,
    bodies: Query<(&Body, Has<Submerged>)>,
    camera: Query<(&Camera, &GlobalTransform), With<LevelCamera>>,
    mut frame: ResMut<FrameDrawList>,
) {
    let Ok((camera, transform)) = camera.single() else {
        return;
    };
    let Some(viewport) = level_viewport(camera, transform) else {
        return;
    };

    let mut list = DrawList::new();
    let scope = water.begin_drawing(&mut registry);

    list.set_layer(LEVEL_LAYER);
    draw_level(&solids, bodies.iter(), &scope, &mut list, viewport);

    list.set_layer(water.zorder());
    WaterRenderer::new(config.clone()).draw(&water, scope, &mut list, viewport);

    frame.commands = list.into_commands();
}
