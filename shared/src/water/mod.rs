//! Rectangular water bodies with cosmetic surface waves and currents.
//!
//! A level owns one [`Water`] manager holding any number of [`WaterArea`]s.
//! Every tick each area makes sure its surface segments are known, refreshes
//! its raster distortion, then advances, reflects and culls its waves. Hosts
//! read the manager to drift entities ([`Water::get_current`],
//! [`Water::is_underwater`]) and to draw the water.
//!
//! Surface segments are cached per area and never notice level edits on their
//! own: after changing solids call [`Water::invalidate_surfaces_in`] (the
//! [`WaterPlugin`] does this for [`SolidEdit`] events).

mod area;
mod config;
mod distortion;
mod error;
mod manager;
mod node;
mod plugin;
mod surface;
mod wave;

pub use area::{AreaId, WaterArea};
pub use config::WaterConfig;
pub use distortion::{DistortionRegistry, DrawingScope, WaterDistortion};
pub use error::WaterError;
pub use manager::Water;
pub use node::{AreaNode, WaterNode};
pub use plugin::{SolidEdit, WaterEdit, WaterPlugin, WaveRequest};
pub use surface::{scan_surface_segments, SurfaceSegment, SurfaceSegments};
pub use wave::{Wave, WaveSpawn, MIN_WAVE_HEIGHT, WAVE_HEIGHT_DECAY};
