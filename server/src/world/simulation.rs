use bevy::prelude::*;
use bevy_log::info;

use super::save::SaveRequestEvent;

/// Number of ticks the host runs before saving and exiting. `None` runs
/// until interrupted.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickLimit(pub Option<u64>);

pub fn enforce_tick_limit(
    limit: Res<TickLimit>,
    mut ticks: Local<u64>,
    mut saves: EventWriter<SaveRequestEvent>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(limit) = limit.0 else {
        return;
    };

    *ticks += 1;
    if *ticks != limit {
        return;
    }

    info!("Tick limit {} reached, saving and exiting", limit);
    saves.write(SaveRequestEvent);
    exit.write(AppExit::Success);
}
