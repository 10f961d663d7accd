//! Bevy plugin running the water simulation inside `FixedUpdate`.

use bevy::prelude::*;
use bevy_log::{debug, info};

use super::{DistortionRegistry, Water, WaterConfig, WaveSpawn};
use crate::physics::drift_bodies;
use crate::sets::WaterUpdateSet;
use crate::world::{LevelCycle, Rect, SolidMap};

/// Asks for a wave at a level point. Points outside every area are ignored.
#[derive(Event, Debug, Clone, Copy)]
pub struct WaveRequest {
    pub point: IVec2,
    pub spawn: WaveSpawn,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaterEdit {
    AddRect(Rect),
    DeleteRect(Rect),
}

/// Level geometry edits. Applying one invalidates the surface of every area
/// the edit touches.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolidEdit {
    Add(Rect),
    Remove(Rect),
}

pub struct WaterPlugin;

impl Plugin for WaterPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WaterConfig>()
            .init_resource::<Water>()
            .init_resource::<SolidMap>()
            .init_resource::<LevelCycle>()
            .init_resource::<DistortionRegistry>()
            .register_type::<WaterConfig>()
            .add_event::<WaveRequest>()
            .add_event::<WaterEdit>()
            .add_event::<SolidEdit>()
            .configure_sets(
                FixedUpdate,
                (
                    WaterUpdateSet::Edits,
                    WaterUpdateSet::Simulation,
                    WaterUpdateSet::Currents,
                    WaterUpdateSet::Host,
                )
                    .chain(),
            )
            .add_systems(
                FixedUpdate,
                (apply_water_edits, apply_solid_edits, apply_wave_requests)
                    .chain()
                    .in_set(WaterUpdateSet::Edits),
            )
            .add_systems(
                FixedUpdate,
                (advance_cycle, process_water)
                    .chain()
                    .in_set(WaterUpdateSet::Simulation),
            )
            .add_systems(FixedUpdate, drift_bodies.in_set(WaterUpdateSet::Currents));
    }
}

fn apply_water_edits(mut edits: EventReader<WaterEdit>, mut water: ResMut<Water>) {
    for edit in edits.read() {
        match *edit {
            WaterEdit::AddRect(rect) => {
                let id = water.add_rect(rect);
                info!("Added water {id} at {rect}");
            }
            WaterEdit::DeleteRect(rect) => {
                let removed = water.delete_rect(&rect);
                info!("Removed {removed} water area(s) touching {rect}");
            }
        }
    }
}

fn apply_solid_edits(
    mut edits: EventReader<SolidEdit>,
    mut solids: ResMut<SolidMap>,
    mut water: ResMut<Water>,
) {
    for edit in edits.read() {
        let touched = match *edit {
            SolidEdit::Add(rect) => {
                solids.add(rect);
                water.invalidate_surfaces_in(&rect)
            }
            SolidEdit::Remove(rect) => {
                let removed: Vec<Rect> = solids
                    .rects()
                    .iter()
                    .filter(|solid| solid.intersects(&rect))
                    .copied()
                    .collect();
                solids.remove(&rect);
                removed
                    .iter()
                    .map(|solid| water.invalidate_surfaces_in(solid))
                    .sum()
            }
        };
        debug!("{edit:?} invalidated {touched} water surface(s)");
    }
}

fn apply_wave_requests(mut requests: EventReader<WaveRequest>, mut water: ResMut<Water>) {
    for request in requests.read() {
        water.spawn_wave(request.point, request.spawn);
    }
}

fn advance_cycle(mut cycle: ResMut<LevelCycle>) {
    cycle.0 += 1;
}

fn process_water(
    mut water: ResMut<Water>,
    solids: Res<SolidMap>,
    cycle: Res<LevelCycle>,
    config: Res<WaterConfig>,
) {
    if !config.enabled {
        return;
    }

    water.process(solids.as_ref(), cycle.0);
}
