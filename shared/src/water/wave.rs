//! Cosmetic surface waves travelling along the top edge of a water area.
//!
//! Waves are purely visual: they move sideways at a constant speed, lose a
//! fixed fraction of their height every tick and bounce between the bounds of
//! the surface segment they were spawned in.

use super::surface::SurfaceSegment;

/// Fraction of its height a wave keeps after each tick.
pub const WAVE_HEIGHT_DECAY: f64 = 0.996;

/// Waves at or below this height are culled.
pub const MIN_WAVE_HEIGHT: f64 = 0.5;

/// Parameters of an add-wave request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSpawn {
    /// Horizontal speed in level units per tick.
    pub xvelocity: f64,
    pub height: f64,
    /// Radius of the wave's influence on the water line.
    pub length: f64,
    pub delta_height: f64,
    /// Added to the length every tick.
    pub delta_length: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub xpos: f64,
    pub xvelocity: f64,
    pub height: f64,
    pub length: f64,
    /// Carried with the wave but not integrated; height decays geometrically.
    pub delta_height: f64,
    pub delta_length: f64,
    pub left_bound: i32,
    pub right_bound: i32,
}

impl Wave {
    pub fn new(x: i32, spawn: WaveSpawn, bounds: SurfaceSegment) -> Self {
        Self {
            xpos: x as f64,
            xvelocity: spawn.xvelocity,
            height: spawn.height,
            length: spawn.length,
            delta_height: spawn.delta_height,
            delta_length: spawn.delta_length,
            left_bound: bounds.begin,
            right_bound: bounds.end,
        }
    }

    /// One integration step. Velocity is per tick, not time scaled, and the
    /// position is never clamped here.
    pub fn advance(&mut self) {
        self.xpos += self.xvelocity;
        self.height *= WAVE_HEIGHT_DECAY;
        self.length += self.delta_length;
    }

    /// Turns the wave around once it has moved past a bound while still
    /// heading away from it. A wave may overshoot a bound for a tick.
    pub fn reflect(&mut self) {
        if self.xpos < self.left_bound as f64 && self.xvelocity < 0.0 {
            self.xvelocity = -self.xvelocity;
        }

        if self.xpos > self.right_bound as f64 && self.xvelocity > 0.0 {
            self.xvelocity = -self.xvelocity;
        }
    }

    pub fn is_dead(&self) -> bool {
        self.height <= MIN_WAVE_HEIGHT || self.length <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn(xvelocity: f64, height: f64, length: f64, delta_length: f64) -> WaveSpawn {
        WaveSpawn {
            xvelocity,
            height,
            length,
            delta_height: 0.0,
            delta_length,
        }
    }

    #[test]
    fn advance_decays_height_and_grows_length() {
        let mut wave = Wave::new(
            50,
            spawn(0.5, 20.0, 10.0, 0.25),
            SurfaceSegment::new(0, 1000),
        );

        for _ in 0..100 {
            wave.advance();
        }

        let expected_height = 20.0 * WAVE_HEIGHT_DECAY.powi(100);
        assert!((wave.height - expected_height).abs() < 1e-9);
        assert!((wave.length - 35.0).abs() < 1e-9);
        assert!((wave.xpos - 100.0).abs() < 1e-9);
    }

    #[test]
    fn reflect_only_turns_waves_heading_out() {
        let bounds = SurfaceSegment::new(10, 20);

        let mut leaving_left = Wave::new(9, spawn(-1.0, 5.0, 5.0, 0.0), bounds);
        leaving_left.reflect();
        assert_eq!(leaving_left.xvelocity, 1.0);

        // Already turned around: left alone even though still out of bounds.
        let mut returning = Wave::new(9, spawn(1.0, 5.0, 5.0, 0.0), bounds);
        returning.reflect();
        assert_eq!(returning.xvelocity, 1.0);

        let mut leaving_right = Wave::new(21, spawn(2.0, 5.0, 5.0, 0.0), bounds);
        leaving_right.reflect();
        assert_eq!(leaving_right.xvelocity, -2.0);

        // Sitting exactly on a bound is still inside.
        let mut on_bound = Wave::new(20, spawn(2.0, 5.0, 5.0, 0.0), bounds);
        on_bound.reflect();
        assert_eq!(on_bound.xvelocity, 2.0);
    }

    #[test]
    fn dead_when_flat_or_collapsed() {
        let bounds = SurfaceSegment::new(0, 10);
        assert!(Wave::new(0, spawn(0.0, 0.5, 5.0, 0.0), bounds).is_dead());
        assert!(Wave::new(0, spawn(0.0, 5.0, 0.0, 0.0), bounds).is_dead());
        assert!(Wave::new(0, spawn(0.0, 5.0, -1.0, 0.0), bounds).is_dead());
        assert!(!Wave::new(0, spawn(0.0, 0.51, 0.1, 0.0), bounds).is_dead());
    }

    #[test]
    fn shrinking_wave_dies_once_length_runs_out() {
        let mut wave = Wave::new(0, spawn(0.0, 10.0, 3.0, -1.0), SurfaceSegment::new(0, 10));
        wave.advance();
        wave.advance();
        assert!(!wave.is_dead());
        wave.advance();
        assert!(wave.is_dead());
    }
}
