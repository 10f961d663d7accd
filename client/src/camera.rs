use bevy::prelude::*;
use shared::world::{LevelData, Rect};

use crate::input::{data::GameAction, keyboard::is_action_pressed, KeyMap};
use crate::settings::ClientSettings;

#[derive(Component)]
pub struct LevelCamera;

/// Level point under a world position. The level's y axis points down.
pub fn world_to_level(p: Vec2) -> IVec2 {
    IVec2::new(p.x.floor() as i32, (-p.y).floor() as i32)
}

/// Part of the level the camera currently shows.
pub fn level_viewport(camera: &Camera, transform: &GlobalTransform) -> Option<Rect> {
    let size = camera.logical_viewport_size()?;
    let top_left = camera.viewport_to_world_2d(transform, Vec2::ZERO).ok()?;
    let bottom_right = camera.viewport_to_world_2d(transform, size).ok()?;

    let a = world_to_level(top_left);
    let b = world_to_level(bottom_right);
    Some(Rect::from_coordinates(a.x, a.y, b.x + 1, b.y + 1))
}

/// Initial camera position: centered on the level's content.
fn level_center(level: &LevelData) -> Vec2 {
    let water: Vec<Rect> = level
        .water
        .iter()
        .flat_map(|node| node.area.iter())
        .filter_map(|area| area.rect.parse().ok())
        .collect();

    let (mut min, mut max) = (IVec2::MAX, IVec2::MIN);
    for rect in level.solids.iter().chain(&level.bodies).chain(&water) {
        min = min.min(IVec2::new(rect.x(), rect.y()));
        max = max.max(IVec2::new(rect.x2(), rect.y2()));
    }

    if min.x > max.x {
        return Vec2::ZERO;
    }
    let center = (min + max).as_vec2() / 2.0;
    Vec2::new(center.x, -center.y)
}

pub fn spawn_camera(commands: &mut Commands, level: &LevelData) {
    let center = level_center(level);
    commands.spawn((
        Camera2d,
        LevelCamera,
        Transform::from_xyz(center.x, center.y, 100.0),
    ));
}

pub fn camera_pan_system(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    key_map: Res<KeyMap>,
    settings: Res<ClientSettings>,
    time: Res<Time>,
    mut camera: Query<&mut Transform, With<LevelCamera>>,
) {
    let Ok(mut transform) = camera.single_mut() else {
        return;
    };

    let mut direction = Vec2::ZERO;
    if is_action_pressed(GameAction::PanLeft, &keyboard_input, &key_map) {
        direction.x -= 1.0;
    }
    if is_action_pressed(GameAction::PanRight, &keyboard_input, &key_map) {
        direction.x += 1.0;
    }
    if is_action_pressed(GameAction::PanUp, &keyboard_input, &key_map) {
        direction.y += 1.0;
    }
    if is_action_pressed(GameAction::PanDown, &keyboard_input, &key_map) {
        direction.y -= 1.0;
    }

    let delta = direction.normalize_or_zero() * settings.pan_speed * time.delta_secs();
    transform.translation += delta.extend(0.0);
}
