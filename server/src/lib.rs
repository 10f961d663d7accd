//! Headless level host: loads a level, runs the water simulation at a fixed
//! tick rate and writes the level back out.

pub mod init;
pub mod world;
