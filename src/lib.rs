//! Pipe Runner - A side-scrolling platformer simulation
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (physics, collisions, game state)
//! - `audio`: Sound effect routing for the host's audio backend
//! - `platform`: Frame clock and browser binding
//! - `settings`: Player preferences
//! - `autopilot`: Seeded demo driver

pub mod audio;
pub mod autopilot;
pub mod platform;
pub mod settings;
pub mod sim;

pub use audio::{AudioManager, AudioSink, SoundEffect};
pub use autopilot::Autopilot;
pub use settings::Settings;

/// Game configuration constants
///
/// Velocities and accelerations are in pixels per tick; durations are in seconds.
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Level grid
    pub const TILE_SIZE: f32 = 32.0;
    /// World y of the ground line (top of the floor tiles)
    pub const GROUND_LEVEL: f32 = 500.0;
    /// Far patrol boundary for enemies
    pub const WORLD_EDGE_X: f32 = 6000.0;
    /// Reaching this x on the surface wins the level
    pub const GOAL_X: f32 = 6200.0;
    /// Power-ups past this x are retired
    pub const WORLD_WIDTH: f32 = 6400.0;
    /// Layout extents
    pub const SURFACE_GROUND_TILES: usize = 200;
    pub const UNDERGROUND_TILES: usize = 100;
    /// Underground ceiling row
    pub const CEILING_Y: f32 = 50.0;
    /// Row for question blocks and bricks
    pub const BLOCK_ROW_Y: f32 = 400.0;
    pub const PIPE_SIZE: f32 = 64.0;
    /// Power-ups pop out this far above the block top
    pub const POWER_UP_SPAWN_RISE: f32 = 20.0;

    /// Physics
    pub const GRAVITY: f32 = 0.8;
    pub const FRICTION: f32 = 0.8;
    pub const WALK_SPEED: f32 = 4.0;
    pub const RUN_SPEED: f32 = 6.0;
    pub const JUMP_POWER: f32 = 15.0;
    pub const STOMP_BOUNCE: f32 = 5.0;
    pub const ENEMY_SPEED: f32 = 1.0;
    /// Power-ups fall at this fraction of gravity
    pub const POWER_UP_GRAVITY_SCALE: f32 = 0.5;

    /// Player dimensions
    pub const PLAYER_WIDTH: f32 = 24.0;
    pub const SMALL_HEIGHT: f32 = 24.0;
    pub const TALL_HEIGHT: f32 = 32.0;
    pub const CROUCH_HEIGHT: f32 = 24.0;
    /// Walk cycle
    pub const ANIM_FRAME_SECS: f32 = 0.15;
    pub const ANIM_FRAMES: u8 = 3;
    /// Minimum |vx| that counts as walking for the animation
    pub const ANIM_MIN_SPEED: f32 = 0.5;

    /// Enemy cliff probe (lead in velocity units, depth below the feet)
    pub const CLIFF_LEAD: f32 = 10.0;
    pub const CLIFF_PROBE_DEPTH: f32 = 10.0;

    /// Pipe entry tolerances
    pub const PIPE_CENTER_TOLERANCE: f32 = 10.0;
    pub const PIPE_TOP_ABOVE: f32 = 5.0;
    pub const PIPE_TOP_BELOW: f32 = 10.0;

    /// Timers
    pub const INVULNERABILITY_SECS: f32 = 2.0;
    pub const PIPE_SWAP_DELAY_SECS: f32 = 1.0;
    pub const START_TIME_SECS: f32 = 400.0;
    pub const START_LIVES: u32 = 3;

    /// Score values
    pub const SCORE_GOOMBA: u64 = 100;
    pub const SCORE_KOOPA: u64 = 200;
    pub const SCORE_COIN: u64 = 200;
    pub const SCORE_POWER_UP: u64 = 1000;
    pub const SCORE_BLOCK: u64 = 50;
}
