//! Read-only view of a session for renderers and input sources

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::mode::GameMode;
use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallView {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickView {
    pub rect: Rect,
    pub visible: bool,
    pub row: u32,
}

/// Geometry and counters at the end of a tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub mode: GameMode,
    pub phase: GamePhase,
    pub paddle: Rect,
    pub paddle_speed: f32,
    pub ball: BallView,
    pub bricks: Vec<BrickView>,
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub hits: u32,
    pub misses: u32,
    /// Cumulative hit rate so far
    pub hit_rate: f32,
}

impl<R> GameState<R> {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            mode: self.mode(),
            phase: self.phase,
            paddle: self.paddle.rect(),
            paddle_speed: self.paddle.speed,
            ball: BallView {
                pos: self.ball.pos,
                vel: self.ball.vel,
                radius: self.ball.radius,
                active: self.ball.active,
            },
            bricks: self
                .bricks
                .iter()
                .map(|b| BrickView {
                    rect: b.rect,
                    visible: b.visible,
                    row: b.row,
                })
                .collect(),
            score: self.score,
            lives: self.lives,
            level: self.level,
            hits: self.counters.total_hits,
            misses: self.counters.total_misses,
            hit_rate: self.counters.total_hit_rate(),
        }
    }
}
