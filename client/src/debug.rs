use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_inspector_egui::bevy_egui::EguiContext;
use bevy_inspector_egui::bevy_inspector::ui_for_resource;
use shared::water::{Water, WaterConfig};
use shared::world::LevelCycle;

use crate::world::WaterRenderConfig;

#[derive(Resource, Default)]
pub struct DebugOptions {
    is_inspector_visible: bool,
}

impl DebugOptions {
    pub fn toggle_inspector(&mut self) {
        self.is_inspector_visible = !self.is_inspector_visible;
        info!(
            "Inspector is now {}",
            if self.is_inspector_visible {
                "visible"
            } else {
                "hidden"
            }
        );
    }

    pub fn is_inspector_visible(&self) -> bool {
        self.is_inspector_visible
    }
}

pub fn inspector_visible(options: Res<DebugOptions>) -> bool {
    options.is_inspector_visible()
}

pub fn inspector_ui(world: &mut World) {
    let Ok(egui_context) = world
        .query_filtered::<&mut EguiContext, With<PrimaryWindow>>()
        .single(world)
    else {
        return;
    };
    let mut egui_context = egui_context.clone();

    let cycle = world.resource::<LevelCycle>().0;
    let (areas, waves) = {
        let water = world.resource::<Water>();
        let waves: usize = water.areas().iter().map(|a| a.waves().len()).sum();
        (water.areas().len(), waves)
    };

    egui::Window::new("Water").show(egui_context.get_mut(), |ui| {
        ui.label(format!("cycle {cycle}, {areas} area(s), {waves} wave(s)"));
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading("Rendering");
            ui_for_resource::<WaterRenderConfig>(world, ui);
            ui.heading("Simulation");
            ui_for_resource::<WaterConfig>(world, ui);
        });
    });
}
