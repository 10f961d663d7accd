pub mod rendering;

pub use rendering::*;
