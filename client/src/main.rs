mod camera;
mod constants;
mod debug;
mod input;
mod settings;
mod world;

use bevy::{prelude::*, sprite::Material2dPlugin, window::PresentMode};
use bevy_inspector_egui::{bevy_egui::EguiPlugin, DefaultInspectorConfigPlugin};
use clap::Parser;
use constants::BACKGROUND_COLOR;
use debug::{inspector_ui, inspector_visible, DebugOptions};
use input::keyboard::{get_bindings, toggle_actions_system};
use input::mouse::spawn_wave_on_click_system;
use server::init::add_level_host;
use server::world::load_from_file::load_level_data;
use shared::constants::{DEFAULT_LEVEL_NAME, LEVEL_LOAD_ERROR, WATER_BUILD_ERROR};
use shared::sets::GameUpdateSet;
use shared::{get_game_folder_paths, TICKS_PER_SECOND};
use world::{
    level_render_system, replay_draw_list_system, setup_water_materials,
    sync_waterline_width_system, FrameDrawList, WaterBlendMaterial, WaterRenderConfig,
    WaterlineGizmos,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = DEFAULT_LEVEL_NAME)]
    level: String,

    #[arg(short, long)]
    game_folder_path: Option<String>,
}

fn main() {
    let args = Args::parse();
    let game_folder_paths = get_game_folder_paths(args.game_folder_path);

    println!(
        "Starting application with game folder: {}",
        game_folder_paths.game_folder_path.display()
    );

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Tidewater".to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    app.add_plugins(EguiPlugin {
        enable_multipass_for_primary_context: false,
    })
    .add_plugins(DefaultInspectorConfigPlugin)
    .add_systems(Update, inspector_ui.run_if(inspector_visible));

    app.add_plugins(Material2dPlugin::<WaterBlendMaterial>::default())
        .init_gizmo_group::<WaterlineGizmos>();

    let level = match load_level_data(&args.level, &game_folder_paths) {
        Ok(level) => level,
        Err(err) => {
            error!("{} {}: {}", LEVEL_LOAD_ERROR, args.level, err);
            std::process::exit(1);
        }
    };
    let settings = settings::load_client_settings(&game_folder_paths);
    let key_map = get_bindings(&game_folder_paths);
    let camera_level = level.clone();

    app.insert_resource(Time::<Fixed>::from_hz(TICKS_PER_SECOND as f64));
    if let Err(err) = add_level_host(&mut app, level, game_folder_paths) {
        error!("{} {}: {}", WATER_BUILD_ERROR, args.level, err);
        std::process::exit(1);
    }

    app.insert_resource(ClearColor(BACKGROUND_COLOR.into()))
        .insert_resource(settings.water.clone())
        .register_type::<WaterRenderConfig>()
        .insert_resource(settings)
        .insert_resource(key_map)
        .init_resource::<DebugOptions>()
        .init_resource::<FrameDrawList>()
        .configure_sets(
            Update,
            (
                GameUpdateSet::Input,
                GameUpdateSet::Camera,
                GameUpdateSet::Rendering,
            )
                .chain(),
        )
        .add_systems(
            Startup,
            (
                setup_water_materials,
                move |mut commands: Commands| camera::spawn_camera(&mut commands, &camera_level),
            ),
        )
        .add_systems(
            Update,
            (toggle_actions_system, spawn_wave_on_click_system).in_set(GameUpdateSet::Input),
        )
        .add_systems(Update, camera::camera_pan_system.in_set(GameUpdateSet::Camera))
        .add_systems(
            Update,
            (
                level_render_system,
                replay_draw_list_system,
                sync_waterline_width_system,
            )
                .chain()
                .in_set(GameUpdateSet::Rendering),
        )
        .run();
}
