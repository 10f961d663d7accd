pub mod canvas;
pub mod level;
pub mod render;
pub mod water;
pub mod water_material;
pub mod water_mesh;

pub use render::*;
pub use water::*;
pub use water_material::*;
pub use water_mesh::*;
