//! Game configuration
//!
//! An immutable tuning structure handed to each session at construction.
//! Loaded from JSON; any missing field falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Play area dimensions (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }
}

/// Paddle defaults and bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleConfig {
    /// Starting width
    pub width: f32,
    pub min_width: f32,
    pub max_width: f32,
    pub height: f32,
    /// Starting speed (pixels per tick)
    pub speed: f32,
    pub max_speed: f32,
    /// Distance from the bottom edge to the paddle's top
    pub bottom_offset: f32,
}

impl Default for PaddleConfig {
    fn default() -> Self {
        Self {
            width: PADDLE_WIDTH_DEFAULT,
            min_width: PADDLE_WIDTH_MIN,
            max_width: PADDLE_WIDTH_MAX,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
            max_speed: PADDLE_SPEED_MAX,
            bottom_offset: PADDLE_BOTTOM_OFFSET,
        }
    }
}

/// Ball defaults and bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub radius: f32,
    /// Base launch speed (pixels per tick), before any mode multiplier
    pub speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Gap between a resting ball and the paddle
    pub rest_gap: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            speed: BALL_SPEED_DEFAULT,
            min_speed: BALL_SPEED_MIN,
            max_speed: BALL_SPEED_MAX,
            rest_gap: BALL_REST_GAP,
        }
    }
}

/// Brick grid layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickConfig {
    pub cols: u32,
    /// Rows in classic mode
    pub rows: u32,
    /// Rows in challenge mode
    pub challenge_rows: u32,
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub offset_top: f32,
    pub points: u32,
}

impl Default for BrickConfig {
    fn default() -> Self {
        Self {
            cols: BRICK_COLS,
            rows: BRICK_ROWS,
            challenge_rows: CHALLENGE_BRICK_ROWS,
            width: BRICK_WIDTH,
            height: BRICK_HEIGHT,
            padding: BRICK_PADDING,
            offset_top: BRICK_OFFSET_TOP,
            points: POINTS_PER_BRICK,
        }
    }
}

impl BrickConfig {
    /// Total width of one grid row including padding
    pub fn grid_width(&self) -> f32 {
        let cols = self.cols as f32;
        cols * self.width + (cols - 1.0).max(0.0) * self.padding
    }

    /// Left offset that centers the grid horizontally
    pub fn offset_left(&self, screen_width: f32) -> f32 {
        (screen_width - self.grid_width()) / 2.0
    }
}

/// Adaptive difficulty tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    /// Cumulative brick hits between evaluations
    pub check_interval: u32,
    /// Short-window hit rate above which the paddle shrinks
    pub high_threshold: f32,
    /// Width removed per adjustment
    pub width_step: f32,
    /// Speed added per adjustment (only when width actually shrank)
    pub speed_step: f32,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            check_interval: DIFFICULTY_CHECK_INTERVAL,
            high_threshold: HIT_RATE_THRESHOLD_HIGH,
            width_step: PADDLE_WIDTH_ADJUSTMENT,
            speed_step: PADDLE_SPEED_ADJUSTMENT,
        }
    }
}

/// Starting lives per mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LivesConfig {
    pub classic: u32,
    pub challenge: u32,
}

impl Default for LivesConfig {
    fn default() -> Self {
        Self {
            classic: INITIAL_LIVES,
            challenge: CHALLENGE_LIVES,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    pub paddle: PaddleConfig,
    pub ball: BallConfig,
    pub bricks: BrickConfig,
    pub difficulty: DifficultyConfig,
    pub lives: LivesConfig,
    /// Ball speed multiplier applied in challenge mode
    pub challenge_speed_multiplier: f32,
    /// Target tick rate
    pub fps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            paddle: PaddleConfig::default(),
            ball: BallConfig::default(),
            bricks: BrickConfig::default(),
            difficulty: DifficultyConfig::default(),
            lives: LivesConfig::default(),
            challenge_speed_multiplier: CHALLENGE_SPEED_MULTIPLIER,
            fps: FPS,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Seconds per tick
    pub fn tick_seconds(&self) -> f64 {
        1.0 / f64::from(self.fps.max(1))
    }

    /// Check that the starting entities can be built from this config
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.screen;
        if !(s.width > 0.0 && s.height > 0.0) {
            return Err(ConfigError::invalid("screen", "dimensions must be positive"));
        }

        let p = &self.paddle;
        if !(p.min_width > 0.0 && p.min_width <= p.max_width) {
            return Err(ConfigError::invalid(
                "paddle.min_width",
                format!("need 0 < min_width <= max_width, got {} / {}", p.min_width, p.max_width),
            ));
        }
        if !(p.min_width..=p.max_width).contains(&p.width) {
            return Err(ConfigError::invalid(
                "paddle.width",
                format!("{} is outside [{}, {}]", p.width, p.min_width, p.max_width),
            ));
        }
        if p.max_width > s.width {
            return Err(ConfigError::invalid("paddle.max_width", "wider than the screen"));
        }
        if !(p.height > 0.0 && p.speed >= 0.0 && p.speed <= p.max_speed) {
            return Err(ConfigError::invalid(
                "paddle.speed",
                "need positive height and 0 <= speed <= max_speed",
            ));
        }
        if !(p.bottom_offset >= p.height && p.bottom_offset < s.height) {
            return Err(ConfigError::invalid(
                "paddle.bottom_offset",
                "paddle must sit inside the play area",
            ));
        }

        let b = &self.ball;
        if !(b.radius > 0.0 && b.min_speed > 0.0 && b.min_speed <= b.max_speed) {
            return Err(ConfigError::invalid(
                "ball",
                "need positive radius and 0 < min_speed <= max_speed",
            ));
        }
        if s.width < 2.0 * b.radius || s.height < 2.0 * b.radius {
            return Err(ConfigError::invalid(
                "ball.radius",
                format!("ball diameter {} does not fit the screen", 2.0 * b.radius),
            ));
        }
        if !(b.speed > 0.0 && self.challenge_speed_multiplier > 0.0) {
            return Err(ConfigError::invalid("ball.speed", "launch speed must be positive"));
        }
        for launch in [b.speed, b.speed * self.challenge_speed_multiplier] {
            if !(b.min_speed..=b.max_speed).contains(&launch) {
                return Err(ConfigError::invalid(
                    "ball.speed",
                    format!(
                        "launch speed {} is outside [{}, {}]",
                        launch, b.min_speed, b.max_speed
                    ),
                ));
            }
        }

        let g = &self.bricks;
        if g.cols == 0 || g.rows == 0 || g.challenge_rows == 0 {
            return Err(ConfigError::invalid("bricks", "grid needs at least one row and column"));
        }
        if !(g.width > 0.0 && g.height > 0.0 && g.padding >= 0.0) {
            return Err(ConfigError::invalid("bricks", "brick dimensions must be positive"));
        }
        if g.grid_width() > s.width {
            return Err(ConfigError::invalid(
                "bricks.cols",
                format!("grid width {} exceeds screen width {}", g.grid_width(), s.width),
            ));
        }

        let d = &self.difficulty;
        if d.check_interval == 0 {
            return Err(ConfigError::invalid("difficulty.check_interval", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&d.high_threshold) {
            return Err(ConfigError::invalid("difficulty.high_threshold", "must be within [0, 1]"));
        }

        if self.lives.classic == 0 || self.lives.challenge == 0 {
            return Err(ConfigError::invalid("lives", "each mode needs at least one life"));
        }
        if self.fps == 0 {
            return Err(ConfigError::invalid("fps", "must be at least 1"));
        }
        Ok(())
    }
}
