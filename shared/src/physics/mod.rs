//! Level entities pushed around by water currents.

pub mod water;

pub use water::*;
