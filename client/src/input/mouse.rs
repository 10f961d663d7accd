use bevy::prelude::*;
use rand::Rng;
use shared::water::{WaveRequest, WaveSpawn};

use crate::camera::{world_to_level, LevelCamera};
use crate::settings::{ClickWave, ClientSettings};

/// Spawn parameters for a click, with the direction and height jittered so
/// repeated clicks do not stack identical waves.
pub fn click_wave_spawn(wave: &ClickWave, rng: &mut impl Rng) -> WaveSpawn {
    let direction = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    let jitter = if wave.height_jitter > 0.0 {
        rng.gen_range(-wave.height_jitter..wave.height_jitter)
    } else {
        0.0
    };

    WaveSpawn {
        xvelocity: direction * wave.speed,
        height: (wave.height + jitter).max(0.0),
        length: wave.length,
        delta_height: 0.0,
        delta_length: wave.delta_length,
    }
}

pub fn spawn_wave_on_click_system(
    mouse_input: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform), With<LevelCamera>>,
    settings: Res<ClientSettings>,
    mut requests: EventWriter<WaveRequest>,
) {
    if !mouse_input.just_pressed(MouseButton::Left) {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, transform)) = camera.single() else {
        return;
    };
    let Ok(world) = camera.viewport_to_world_2d(transform, cursor) else {
        return;
    };

    let point = world_to_level(world);
    let spawn = click_wave_spawn(&settings.click_wave, &mut rand::thread_rng());
    debug!("Wave requested at {point}: {spawn:?}");
    requests.write(WaveRequest { point, spawn });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn click_waves_stay_within_jitter() {
        let wave = ClickWave::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            let spawn = click_wave_spawn(&wave, &mut rng);
            assert_eq!(spawn.xvelocity.abs(), wave.speed);
            assert!(spawn.height >= wave.height - wave.height_jitter);
            assert!(spawn.height <= wave.height + wave.height_jitter);
            assert_eq!(spawn.length, wave.length);
        }
    }

    #[test]
    fn no_jitter_means_exact_height() {
        let wave = ClickWave {
            height_jitter: 0.0,
            ..ClickWave::default()
        };
        let spawn = click_wave_spawn(&wave, &mut StdRng::seed_from_u64(1));
        assert_eq!(spawn.height, wave.height);
    }
}
