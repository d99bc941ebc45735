//! Game state and core simulation types
//!
//! One `GameState` is one session: it exclusively owns every entity,
//! counter and the RNG that drives launch headings.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyController;
use super::geometry::Rect;
use super::mode::{GameMode, ModeRules};
use crate::config::GameConfig;
use crate::consts::MAX_BOUNCE_ANGLE_DEG;
use crate::error::SessionError;
use crate::velocity_from_heading;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first launch
    NotStarted,
    /// Active gameplay (the ball may still be resting after a lost life)
    Playing,
    /// Out of lives
    GameOver,
    /// Classic grid cleared
    Won,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Won)
    }

    /// Outcome as seen by the metrics recorder
    pub fn outcome(&self) -> Outcome {
        match self {
            GamePhase::Won => Outcome::Won,
            GamePhase::GameOver => Outcome::Lost,
            GamePhase::NotStarted | GamePhase::Playing => Outcome::Incomplete,
        }
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
    /// Quit before reaching a terminal phase
    Incomplete,
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal pixels per tick
    pub speed: f32,
    pub min_width: f32,
    pub max_width: f32,
    pub max_speed: f32,
    /// Width of the play area the paddle is clamped to
    area_width: f32,
}

impl Paddle {
    /// Paddle centered horizontally at its configured height
    pub fn new(config: &GameConfig) -> Self {
        let p = &config.paddle;
        Self {
            pos: Vec2::new(
                (config.screen.width - p.width) / 2.0,
                config.screen.height - p.bottom_offset,
            ),
            width: p.width,
            height: p.height,
            speed: p.speed,
            min_width: p.min_width,
            max_width: p.max_width,
            max_speed: p.max_speed,
            area_width: config.screen.width,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    pub fn move_left(&mut self) {
        self.pos.x = (self.pos.x - self.speed).max(0.0);
    }

    pub fn move_right(&mut self) {
        self.pos.x = (self.pos.x + self.speed).min(self.area_width - self.width);
    }

    /// Change width within `[min_width, max_width]`.
    ///
    /// Returns true if the width actually changed. The paddle stays inside
    /// the play area after growing.
    pub fn adjust_width(&mut self, delta: f32) -> bool {
        let old = self.width;
        self.width = (self.width + delta).clamp(self.min_width, self.max_width);
        self.pos.x = self.pos.x.min(self.area_width - self.width).max(0.0);
        self.width != old
    }

    /// Change speed; only the upper bound is enforced
    pub fn adjust_speed(&mut self, delta: f32) {
        self.speed = (self.speed + delta).min(self.max_speed);
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    /// Displacement per tick (dx, dy)
    pub vel: Vec2,
    pub radius: f32,
    /// Launch speed; follows `adjust_speed`
    pub speed: f32,
    /// False while resting on the paddle
    pub active: bool,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Gap kept between a resting ball and the paddle
    rest_gap: f32,
}

impl Ball {
    /// Resting ball above the paddle
    pub fn new(config: &GameConfig, speed: f32, paddle: &Paddle) -> Self {
        let b = &config.ball;
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: b.radius,
            speed,
            active: false,
            min_speed: b.min_speed,
            max_speed: b.max_speed,
            rest_gap: b.rest_gap,
        };
        ball.reset(paddle);
        ball
    }

    pub fn bounds(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }

    /// Launch at a uniformly random heading within ±60° of vertical.
    ///
    /// No-op (returns false) when the ball is already in flight.
    pub fn launch<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.active {
            return false;
        }
        let heading = rng.random_range(-MAX_BOUNCE_ANGLE_DEG..=MAX_BOUNCE_ANGLE_DEG);
        self.vel = velocity_from_heading(self.speed, heading);
        self.active = true;
        true
    }

    /// Advance one tick
    pub fn step(&mut self) {
        if self.active {
            self.pos += self.vel;
        }
    }

    /// Park the ball centered above the paddle, velocity zeroed
    pub fn reset(&mut self, paddle: &Paddle) {
        self.pos = Vec2::new(
            paddle.center_x(),
            paddle.pos.y - self.radius - self.rest_gap,
        );
        self.vel = Vec2::ZERO;
        self.active = false;
    }

    /// Keep a resting ball centered on the paddle
    pub fn follow(&mut self, paddle: &Paddle) {
        if !self.active {
            self.pos.x = paddle.center_x();
        }
    }

    /// Rescale velocity to `|vel| + delta`, clamped to `[min_speed, max_speed]`.
    ///
    /// Heading is preserved. A resting ball keeps zero velocity but its
    /// launch speed is still updated.
    pub fn adjust_speed(&mut self, delta: f32) {
        let current = self.vel.length();
        let new_speed = (current + delta).clamp(self.min_speed, self.max_speed);
        if current > 0.0 {
            self.vel *= new_speed / current;
        }
        self.speed = new_speed;
    }
}

/// A brick. Destroyed bricks stay in the grid with `visible == false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub points: u32,
    pub visible: bool,
    /// Grid row (renderers pick colors from it)
    pub row: u32,
    pub col: u32,
}

/// Build a full grid of visible bricks, row-major from the top-left
pub fn brick_grid(config: &GameConfig, rows: u32) -> Vec<Brick> {
    let g = &config.bricks;
    let left = g.offset_left(config.screen.width);
    let mut bricks = Vec::with_capacity((rows * g.cols) as usize);
    for row in 0..rows {
        for col in 0..g.cols {
            let x = left + col as f32 * (g.width + g.padding);
            let y = g.offset_top + row as f32 * (g.height + g.padding);
            bricks.push(Brick {
                rect: Rect::new(x, y, g.width, g.height),
                points: g.points,
                visible: true,
                row,
                col,
            });
        }
    }
    bricks
}

/// Brick-hit and paddle-catch tallies
///
/// "Misses" count every paddle catch, so a hit rate is the share of
/// brick hits among all brick-hit-or-paddle-catch events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitCounters {
    /// Whole-session brick hits
    pub total_hits: u32,
    /// Whole-session paddle catches
    pub total_misses: u32,
    /// Brick hits since the last difficulty checkpoint
    pub window_hits: u32,
    /// Paddle catches since the last difficulty checkpoint
    pub window_misses: u32,
}

impl HitCounters {
    pub fn record_hit(&mut self) {
        self.total_hits += 1;
        self.window_hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.total_misses += 1;
        self.window_misses += 1;
    }

    pub fn reset_window(&mut self) {
        self.window_hits = 0;
        self.window_misses = 0;
    }

    pub fn total_hit_rate(&self) -> f32 {
        hit_rate(self.total_hits, self.total_misses)
    }

    pub fn window_hit_rate(&self) -> f32 {
        hit_rate(self.window_hits, self.window_misses)
    }
}

fn hit_rate(hits: u32, misses: u32) -> f32 {
    let attempts = hits + misses;
    if attempts == 0 {
        0.0
    } else {
        hits as f32 / attempts as f32
    }
}

/// One game session
#[derive(Debug, Clone)]
pub struct GameState<R = Pcg32> {
    config: GameConfig,
    /// Per-mode parameters
    pub rules: ModeRules,
    /// Seed the RNG was created from (0 for injected RNGs)
    pub seed: u64,
    pub(crate) rng: R,
    pub phase: GamePhase,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Grid order; iteration order decides which of two overlapping bricks is hit
    pub bricks: Vec<Brick>,
    pub counters: HitCounters,
    pub difficulty: DifficultyController,
    pub score: u64,
    pub lives: u32,
    /// Grid generation (1-based); only grows in endless mode
    pub level: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Tick of the first launch
    pub start_tick: Option<u64>,
    /// Tick of the terminal transition
    pub end_tick: Option<u64>,
}

impl GameState<Pcg32> {
    /// Create a session with a seeded PCG generator
    pub fn new(config: GameConfig, mode: GameMode, seed: u64) -> Result<Self, SessionError> {
        let mut state = Self::with_rng(config, mode, Pcg32::seed_from_u64(seed))?;
        state.seed = seed;
        Ok(state)
    }
}

impl<R: Rng> GameState<R> {
    /// Create a session with a caller-supplied random source
    pub fn with_rng(config: GameConfig, mode: GameMode, rng: R) -> Result<Self, SessionError> {
        config.validate()?;

        let rules = mode.rules(&config);
        let paddle = Paddle::new(&config);
        let ball = Ball::new(&config, rules.ball_speed, &paddle);
        let bricks = brick_grid(&config, rules.brick_rows);
        let difficulty = DifficultyController::new(config.difficulty);

        log::info!(
            "New {} session: {} lives, {} bricks, ball speed {:.2}",
            mode,
            rules.starting_lives,
            bricks.len(),
            rules.ball_speed
        );

        Ok(Self {
            config,
            rules,
            seed: 0,
            rng,
            phase: GamePhase::NotStarted,
            paddle,
            ball,
            bricks,
            counters: HitCounters::default(),
            difficulty,
            score: 0,
            lives: rules.starting_lives,
            level: 1,
            time_ticks: 0,
            start_tick: None,
            end_tick: None,
        })
    }
}

impl<R> GameState<R> {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.rules.mode
    }

    /// True once no brick is visible
    pub fn all_cleared(&self) -> bool {
        !self.bricks.iter().any(|b| b.visible)
    }

    pub fn visible_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.visible).count()
    }

    /// Replace the grid with a fresh one and advance the level
    pub fn regenerate_bricks(&mut self) {
        self.bricks = brick_grid(&self.config, self.rules.brick_rows);
        self.level += 1;
    }

    /// Seconds between the first launch and the terminal transition
    ///
    /// Zero if the session never started or never reached a terminal phase.
    pub fn duration_secs(&self) -> f64 {
        match (self.start_tick, self.end_tick) {
            (Some(start), Some(end)) => end.saturating_sub(start) as f64 * self.config.tick_seconds(),
            _ => 0.0,
        }
    }
}
