use std::time::Duration;

use bevy::prelude::*;
use bevy_app::ScheduleRunnerPlugin;
use bevy_log::{error, info, LogPlugin};
use shared::{
    constants::{LEVEL_LOAD_ERROR, WATER_BUILD_ERROR},
    formula::ArithmeticCompiler,
    physics::Body,
    water::{Water, WaterError, WaterPlugin},
    world::{LevelCycle, LevelData, LevelName, SolidMap},
    GameFolderPaths,
};

use crate::world::{
    load_from_file::load_level_data,
    simulation::TickLimit,
    LevelHostPlugin,
};

#[derive(Resource, Debug, Clone)]
pub struct LevelHostConfig {
    pub level_name: String,
    pub tick_limit: Option<u64>,
    pub tick_rate: u64,
}

/// Inserts the level's state into `app`. Fails without touching the app when
/// the level's water cannot be built.
pub fn setup_level(app: &mut App, level: LevelData) -> Result<(), WaterError> {
    let water = Water::from_node(level.water.as_ref(), &ArithmeticCompiler)?;

    info!(
        "Level {}: {} solid(s), {} water area(s), {} body(ies)",
        level.name,
        level.solids.len(),
        water.areas().len(),
        level.bodies.len()
    );

    app.insert_resource(water);
    app.insert_resource(SolidMap::new(level.solids));
    app.insert_resource(LevelCycle(level.cycle));
    app.insert_resource(LevelName(level.name));

    let world = app.world_mut();
    for rect in level.bodies {
        world.spawn(Body::new(rect));
    }

    Ok(())
}

/// Adds the simulation and host plugins and loads `level`. Shared by the
/// headless host and the viewer.
pub fn add_level_host(
    app: &mut App,
    level: LevelData,
    game_folder_paths: GameFolderPaths,
) -> Result<(), WaterError> {
    app.insert_resource(game_folder_paths);
    app.add_plugins((WaterPlugin, LevelHostPlugin));
    setup_level(app, level)
}

pub fn init(config: LevelHostConfig, game_folder_paths: GameFolderPaths) {
    let mut app = App::new();
    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / config.tick_rate as f64,
        ))),
    );
    app.add_plugins(LogPlugin::default());
    app.insert_resource(Time::<Fixed>::from_hz(config.tick_rate as f64));

    let level = match load_level_data(&config.level_name, &game_folder_paths) {
        Ok(data) => data,
        Err(err) => {
            error!("{} {}: {}", LEVEL_LOAD_ERROR, config.level_name, err);
            std::process::exit(1);
        }
    };

    if let Err(err) = add_level_host(&mut app, level, game_folder_paths) {
        error!("{} {}: {}", WATER_BUILD_ERROR, config.level_name, err);
        std::process::exit(1);
    }

    app.insert_resource(TickLimit(config.tick_limit));
    info!(
        "Hosting level {} at {} ticks per second",
        config.level_name, config.tick_rate
    );
    app.insert_resource(config);

    app.run();
}
