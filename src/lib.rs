//! Adaptive Breakout - a brick-breaking simulation whose difficulty follows the player
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, difficulty, session phases)
//! - `config`: Immutable tuning passed into a session at construction
//! - `metrics`: End-of-session summary record
//! - `records`: JSON list-of-records store and aggregate statistics
//! - `runner`: Fixed-tick loop driver and input sources

pub mod config;
pub mod error;
pub mod metrics;
pub mod records;
pub mod runner;
pub mod sim;

pub use config::GameConfig;
pub use error::{ConfigError, RecordStoreError, SessionError};
pub use metrics::SessionRecord;
pub use records::{RecordStore, Statistics};

use glam::Vec2;

/// Default tuning values, used by `GameConfig::default()`
pub mod consts {
    /// Target simulation rate (ticks per second)
    pub const FPS: u32 = 60;

    /// Play area
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH_DEFAULT: f32 = 120.0;
    pub const PADDLE_WIDTH_MIN: f32 = 60.0;
    pub const PADDLE_WIDTH_MAX: f32 = 150.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    /// Pixels per tick
    pub const PADDLE_SPEED: f32 = 8.0;
    pub const PADDLE_SPEED_MAX: f32 = 15.0;
    /// Distance from the bottom edge to the paddle's top
    pub const PADDLE_BOTTOM_OFFSET: f32 = 50.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Pixels per tick
    pub const BALL_SPEED_DEFAULT: f32 = 5.0;
    pub const BALL_SPEED_MIN: f32 = 3.0;
    pub const BALL_SPEED_MAX: f32 = 12.0;
    /// Gap between a resting ball and the paddle
    pub const BALL_REST_GAP: f32 = 5.0;
    /// Maximum launch/reflection angle from vertical (degrees)
    pub const MAX_BOUNCE_ANGLE_DEG: f32 = 60.0;

    /// Brick grid defaults
    pub const BRICK_COLS: u32 = 10;
    pub const BRICK_ROWS: u32 = 5;
    pub const CHALLENGE_BRICK_ROWS: u32 = 7;
    pub const BRICK_WIDTH: f32 = 70.0;
    pub const BRICK_HEIGHT: f32 = 25.0;
    pub const BRICK_PADDING: f32 = 5.0;
    pub const BRICK_OFFSET_TOP: f32 = 60.0;
    pub const POINTS_PER_BRICK: u32 = 10;

    /// Adaptive difficulty
    pub const DIFFICULTY_CHECK_INTERVAL: u32 = 10;
    pub const HIT_RATE_THRESHOLD_HIGH: f32 = 0.8;
    pub const PADDLE_WIDTH_ADJUSTMENT: f32 = 10.0;
    pub const PADDLE_SPEED_ADJUSTMENT: f32 = 1.0;

    /// Lives per mode
    pub const INITIAL_LIVES: u32 = 3;
    pub const CHALLENGE_LIVES: u32 = 2;
    /// Ball speed multiplier for challenge mode
    pub const CHALLENGE_SPEED_MULTIPLIER: f32 = 1.5;
}

/// Velocity for a heading measured in degrees from straight up.
///
/// Positive headings lean right. Screen y grows downward, so "up" is -y.
#[inline]
pub fn velocity_from_heading(speed: f32, heading_deg: f32) -> Vec2 {
    let rad = heading_deg.to_radians();
    Vec2::new(speed * rad.sin(), -speed * rad.cos())
}

/// Heading of a velocity in degrees from straight up (inverse of `velocity_from_heading`)
#[cfg(test)]
pub(crate) fn heading_of(vel: Vec2) -> f32 {
    vel.x.atan2(-vel.y).to_degrees()
}
