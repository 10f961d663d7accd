pub mod data;
pub mod rect;
pub mod solids;

pub use data::*;
pub use rect::*;
pub use solids::*;
