//! SSU-RUN - A side-scrolling runner game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (scrolling, spawning, physics, collisions)
//! - `tuning`: Data-driven game balance
//! - `audio`: Event-to-sound mapping, procedural playback on the web

pub mod audio;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, every per-tick constant assumes it)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Length of one tick in milliseconds
    pub const TICK_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;
    /// Top surface of the ground platforms (75% down the screen)
    pub const GROUND_Y: f32 = VIEWPORT_HEIGHT * 0.75;
}
