use bevy::color::Srgba;

pub const BINDS_PATH: &str = "keybindings.ron";
pub const RENDER_SETTINGS_PATH: &str = "render.ron";

/// Extra depth below the water line that is tinted as shallow water.
pub const SHALLOW_WATER_DEPTH: i32 = 100;

pub const WATERLINE_COLOR: Srgba = Srgba::WHITE;
/// Second water line, drawn just below the first.
pub const WATERLINE_SHADOW_COLOR: Srgba = Srgba::new(0.0, 0.9, 0.75, 0.5);
pub const WATERLINE_SHADOW_OFFSET: f32 = 2.0;
pub const WATERLINE_WIDTH: f32 = 2.0;

pub const WAVE_BODY_COLOR: Srgba = Srgba::new(0.0, 0.2, 0.239, 0.6);

/// Subtracted from the scene under flat water.
pub const SHALLOW_SUBTRACT_TINT: Srgba = Srgba::new(0.275, 0.0, 0.0, 0.196);
pub const DEEP_SUBTRACT_TINT: Srgba = Srgba::new(0.376, 0.071, 0.0, 0.251);

pub const SOLID_COLOR: Srgba = Srgba::new(0.361, 0.306, 0.251, 1.0);
pub const BODY_COLOR: Srgba = Srgba::new(0.839, 0.627, 0.204, 1.0);
pub const SUBMERGED_BODY_COLOR: Srgba = Srgba::new(0.588, 0.471, 0.275, 1.0);
pub const BACKGROUND_COLOR: Srgba = Srgba::new(0.573, 0.769, 0.871, 1.0);

/// Layer of level solids and bodies in the draw list.
pub const LEVEL_LAYER: i32 = 0;
