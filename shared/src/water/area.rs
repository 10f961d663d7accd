use std::fmt;

use serde::{Deserialize, Serialize};

use super::distortion::WaterDistortion;
use super::surface::{SurfaceSegment, SurfaceSegments};
use super::wave::{Wave, WaveSpawn};
use crate::world::{Rect, Solidity};

/// Stable handle of an area inside one [`super::Water`] manager.
///
/// Ids are never reused by a manager, so a stale id simply stops matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AreaId(pub u32);

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "area#{}", self.0)
    }
}

/// One rectangular body of water.
#[derive(Debug, Clone)]
pub struct WaterArea {
    id: AreaId,
    rect: Rect,
    waves: Vec<Wave>,
    segments: SurfaceSegments,
    distortion: WaterDistortion,
}

impl WaterArea {
    pub fn new(id: AreaId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            waves: Vec::new(),
            segments: SurfaceSegments::default(),
            distortion: WaterDistortion::compute(0, rect),
        }
    }

    pub fn id(&self) -> AreaId {
        self.id
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    pub fn segments(&self) -> &SurfaceSegments {
        &self.segments
    }

    pub fn distortion(&self) -> WaterDistortion {
        self.distortion
    }

    /// Runs one simulation tick for this area.
    pub fn process(&mut self, level: &dyn Solidity, cycle: u64) {
        self.segments.ensure(&self.rect, level);
        self.distortion = WaterDistortion::compute(cycle, self.rect);

        for wave in &mut self.waves {
            wave.advance();
            wave.reflect();
        }

        self.waves.retain(|wave| !wave.is_dead());
    }

    /// Bounds a wave spawned at `x` bounces between.
    ///
    /// Falls back to the whole width of the area when no cached segment holds
    /// `x`, which includes areas that were never processed.
    pub fn wave_bounds_at(&self, x: i32) -> SurfaceSegment {
        self.segments
            .find_containing(x)
            .unwrap_or_else(|| SurfaceSegment::new(self.rect.x(), self.rect.x2()))
    }

    pub fn push_wave(&mut self, x: i32, spawn: WaveSpawn) {
        let bounds = self.wave_bounds_at(x);
        self.waves.push(Wave::new(x, spawn, bounds));
    }

    pub fn invalidate_surface(&mut self) {
        self.segments.invalidate();
    }
}
