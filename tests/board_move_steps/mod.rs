//! Step definitions for board move scenarios.

pub mod world;

mod given;
mod when;
