//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected, seedable RNG only
//! - Stable iteration order (grid order for bricks)
//! - No rendering, timing or I/O

pub mod collision;
pub mod difficulty;
pub mod geometry;
pub mod mode;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{BrickHit, WallHit, paddle_reflection_angle};
pub use difficulty::{DifficultyController, Evaluation};
pub use geometry::Rect;
pub use mode::{GameMode, ModeRules, OnClear};
pub use snapshot::{BallView, BrickView, Snapshot};
pub use state::{Ball, Brick, GamePhase, GameState, HitCounters, Outcome, Paddle, brick_grid};
pub use tick::{GameEvent, TickInput, TickReport, TickStatus, tick};
