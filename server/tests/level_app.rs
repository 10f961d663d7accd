use std::path::PathBuf;

use bevy::prelude::*;
use server::init::add_level_host;
use server::world::load_from_file::load_level_data;
use server::world::save::SaveRequestEvent;
use server::world::simulation::TickLimit;
use shared::physics::{Body, Submerged};
use shared::water::{
    AreaNode, SolidEdit, SurfaceSegment, Water, WaterEdit, WaterNode, WaveRequest, WaveSpawn,
};
use shared::world::{LevelCycle, LevelData, Rect};
use shared::GameFolderPaths;

fn scratch_folder(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "tidewater-app-{name}-{}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&path);
    path
}

fn harbour() -> LevelData {
    LevelData {
        name: "harbour".to_string(),
        cycle: 0,
        solids: vec![Rect::new(0, 200, 400, 20)],
        water: Some(WaterNode {
            current_x_formula: Some("2".to_string()),
            area: vec![AreaNode {
                rect: "0,100,400,100".to_string(),
            }],
            ..WaterNode::default()
        }),
        bodies: vec![Rect::new(20, 120, 10, 10), Rect::new(20, 10, 10, 10)],
    }
}

fn level_app(name: &str, level: LevelData) -> App {
    let mut app = App::new();
    let paths = GameFolderPaths {
        game_folder_path: scratch_folder(name),
    };
    add_level_host(&mut app, level, paths).unwrap();
    app
}

fn tick(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}

fn spawn(height: f64) -> WaveSpawn {
    WaveSpawn {
        xvelocity: 1.0,
        height,
        length: 20.0,
        delta_height: 0.0,
        delta_length: 0.0,
    }
}

#[test]
fn waves_are_spawned_and_processed_each_tick() {
    let mut app = level_app("waves", harbour());

    app.world_mut().send_event(WaveRequest {
        point: IVec2::new(50, 110),
        spawn: spawn(10.0),
    });
    app.world_mut().send_event(WaveRequest {
        point: IVec2::new(50, 10),
        spawn: spawn(10.0),
    });
    tick(&mut app);

    let water = app.world().resource::<Water>();
    let waves = water.areas()[0].waves();
    assert_eq!(waves.len(), 1);
    assert_eq!(waves[0].xpos, 51.0);
    assert!(waves[0].height < 10.0);
    assert_eq!(app.world().resource::<LevelCycle>().0, 1);

    for _ in 0..3 {
        tick(&mut app);
    }
    let water = app.world().resource::<Water>();
    assert_eq!(water.areas()[0].waves()[0].xpos, 54.0);
    assert_eq!(app.world().resource::<LevelCycle>().0, 4);
}

#[test]
fn water_edits_add_and_remove_areas() {
    let mut app = level_app("edits", harbour());

    app.world_mut()
        .send_event(WaterEdit::AddRect(Rect::new(500, 0, 50, 50)));
    tick(&mut app);
    assert_eq!(app.world().resource::<Water>().areas().len(), 2);

    app.world_mut()
        .send_event(WaterEdit::DeleteRect(Rect::new(390, 150, 200, 10)));
    tick(&mut app);
    let water = app.world().resource::<Water>();
    assert_eq!(water.areas().len(), 1);
    assert_eq!(water.areas()[0].rect(), Rect::new(500, 0, 50, 50));
}

#[test]
fn solid_edits_reshape_the_surface() {
    let mut app = level_app("solids", harbour());
    tick(&mut app);

    app.world_mut()
        .send_event(SolidEdit::Add(Rect::new(100, 90, 20, 20)));
    tick(&mut app);

    let segments: Vec<SurfaceSegment> = app.world().resource::<Water>().areas()[0]
        .segments()
        .get()
        .map(|segments| segments.iter().copied().collect())
        .unwrap_or_default();
    assert_eq!(
        segments,
        vec![SurfaceSegment::new(0, 100), SurfaceSegment::new(120, 399)]
    );

    app.world_mut()
        .send_event(SolidEdit::Remove(Rect::new(110, 95, 1, 1)));
    tick(&mut app);
    let segments = app.world().resource::<Water>().areas()[0]
        .segments()
        .get()
        .map(|segments| segments.len());
    assert_eq!(segments, Some(1));
}

#[test]
fn currents_drift_bodies_and_mark_them_submerged() {
    let mut app = level_app("currents", harbour());
    tick(&mut app);
    tick(&mut app);

    let mut query = app.world_mut().query::<(&Body, Option<&Submerged>)>();
    let mut bodies: Vec<(Rect, bool)> = query
        .iter(app.world())
        .map(|(body, submerged)| (body.rect, submerged.is_some()))
        .collect();
    bodies.sort_by_key(|(rect, _)| rect.y());

    // The current applies everywhere, not only under water.
    assert_eq!(
        bodies,
        vec![
            (Rect::new(24, 10, 10, 10), false),
            (Rect::new(24, 120, 10, 10), true),
        ]
    );
}

#[test]
fn save_request_writes_the_level_back() {
    let mut app = level_app("save", harbour());
    app.world_mut().send_event(WaveRequest {
        point: IVec2::new(50, 110),
        spawn: spawn(10.0),
    });
    tick(&mut app);
    app.world_mut().send_event(SaveRequestEvent);
    tick(&mut app);

    let paths = app.world().resource::<GameFolderPaths>().clone();
    let saved = load_level_data("harbour", &paths).unwrap();
    assert_eq!(saved.cycle, 2);
    assert_eq!(saved.solids, vec![Rect::new(0, 200, 400, 20)]);
    let water = saved.water.unwrap();
    assert_eq!(water.current_x_formula.as_deref(), Some("2"));
    assert_eq!(water.area[0].rect, "0,100,400,100");
    assert_eq!(saved.bodies.len(), 2);

    let _ = std::fs::remove_dir_all(&paths.game_folder_path);
}

#[test]
fn tick_limit_saves_and_exits() {
    let mut app = level_app("limit", harbour());
    app.insert_resource(TickLimit(Some(3)));

    tick(&mut app);
    tick(&mut app);
    assert!(app.should_exit().is_none());
    tick(&mut app);
    assert_eq!(app.should_exit(), Some(AppExit::Success));

    let paths = app.world().resource::<GameFolderPaths>().clone();
    assert_eq!(load_level_data("harbour", &paths).unwrap().cycle, 3);
    let _ = std::fs::remove_dir_all(&paths.game_folder_path);
}

#[test]
fn broken_water_does_not_start() {
    let mut level = harbour();
    if let Some(water) = level.water.as_mut() {
        water.area.push(AreaNode {
            rect: "1,2,three,4".to_string(),
        });
    }

    let mut app = App::new();
    let paths = GameFolderPaths {
        game_folder_path: scratch_folder("broken"),
    };
    assert!(add_level_host(&mut app, level, paths).is_err());
}
