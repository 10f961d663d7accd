pub const TICKS_PER_SECOND: u64 = 50;
pub const DEFAULT_WATER_ZORDER: i32 = 3;
pub const LEVELS_PATH: &str = "levels";
pub const DEFAULT_LEVEL_NAME: &str = "default";
pub const LEVEL_LOAD_ERROR: &str = "Failed to load level data";
pub const WATER_BUILD_ERROR: &str = "Failed to build water from level data";
