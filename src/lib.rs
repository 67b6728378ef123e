//! Track Titans - a neon arcade driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (vehicle, hazards, collisions, run state)
//! - `game`: Screen flow and the run driver that owns the simulation
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser DOM helpers
//! - `persistence`: Key/value storage back ends (file, LocalStorage, memory)

pub mod audio;
pub mod clock;
pub mod game;
pub mod highscores;
pub mod input;
pub mod persistence;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Command, Game, Screen};
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (world units, y grows downward)
    pub const SCREEN_WIDTH: f32 = 1000.0;
    pub const SCREEN_HEIGHT: f32 = 700.0;

    /// The road occupies the middle band of the screen
    pub const ROAD_WIDTH: f32 = 600.0;
    pub const TRACK_LEFT: f32 = SCREEN_WIDTH / 4.0;
    pub const TRACK_RIGHT: f32 = TRACK_LEFT + ROAD_WIDTH;
    /// Cosmetic road scroll per tick
    pub const ROAD_SCROLL_SPEED: f32 = 5.0;

    /// Vehicle footprint
    pub const VEHICLE_WIDTH: f32 = 80.0;
    pub const VEHICLE_HEIGHT: f32 = 160.0;
    /// Resting y of the vehicle's top edge
    pub const GROUND_Y: f32 = SCREEN_HEIGHT - VEHICLE_HEIGHT - 10.0;
    /// Horizontal speed while steering (units/tick)
    pub const STEER_SPEED: f32 = 5.0;
    /// Initial upward jump velocity (units/tick)
    pub const JUMP_LAUNCH_VELOCITY: f32 = 15.0;
    /// Jump velocity lost per tick while airborne
    pub const JUMP_GRAVITY: f32 = 0.8;

    /// Hazard fall speed shared by every kind (units/tick)
    pub const HAZARD_SPEED: f32 = 5.0;

    /// Scoring
    pub const COIN_SCORE: u64 = 10;
    pub const CLEAR_SCORE: u64 = 20;
    pub const START_LIVES: u32 = 3;

    /// Longest accepted player name (characters)
    pub const MAX_NAME_LEN: usize = 15;
}
