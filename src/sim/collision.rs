//! Collision detection and bounce response
//!
//! Discrete per-tick AABB tests against walls, the paddle and bricks. Every
//! bounce changes only the direction of travel; speed magnitude is kept.
//! Very fast balls can tunnel through thin obstacles.

use super::geometry::Rect;
use super::state::{Ball, Brick, Paddle};
use crate::config::ScreenConfig;
use crate::consts::MAX_BOUNCE_ANGLE_DEG;
use crate::velocity_from_heading;

/// Which walls a ball bounced off this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHit {
    pub side: bool,
    pub top: bool,
}

impl WallHit {
    pub fn any(&self) -> bool {
        self.side || self.top
    }
}

/// A destroyed brick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickHit {
    /// Index into the brick grid
    pub index: usize,
    pub points: u32,
    /// True when dx was negated, false when dy was
    pub horizontal: bool,
}

/// Reflect off the left, right and top walls, clamping the ball back inside.
///
/// There is no bottom wall.
pub fn bounce_walls(ball: &mut Ball, area: &ScreenConfig) -> WallHit {
    let mut hit = WallHit::default();
    let r = ball.radius;

    if ball.pos.x - r <= 0.0 || ball.pos.x + r >= area.width {
        ball.vel.x = -ball.vel.x;
        ball.pos.x = ball.pos.x.clamp(r, area.width - r);
        hit.side = true;
    }

    if ball.pos.y - r <= 0.0 {
        ball.vel.y = -ball.vel.y;
        ball.pos.y = r;
        hit.top = true;
    }

    hit
}

/// Reflection heading (degrees from vertical) for a paddle contact at `hit_pos`.
///
/// `hit_pos` is the ball's horizontal position across the paddle, 0 at the
/// left edge and 1 at the right; out-of-range values are clamped.
pub fn paddle_reflection_angle(hit_pos: f32) -> f32 {
    (hit_pos.clamp(0.0, 1.0) - 0.5) * 2.0 * MAX_BOUNCE_ANGLE_DEG
}

/// Bounce off the paddle.
///
/// Only a downward-moving ball whose bounding box overlaps the paddle
/// bounces. The new heading depends on where it struck the paddle, speed is
/// preserved, and the ball is placed on the paddle's top edge. Returns the
/// reflection angle on a bounce.
pub fn bounce_paddle(ball: &mut Ball, paddle: &Paddle) -> Option<f32> {
    if !ball.active || ball.vel.y <= 0.0 || !ball.bounds().intersects(&paddle.rect()) {
        return None;
    }

    let hit_pos = (ball.pos.x - paddle.pos.x) / paddle.width;
    let angle = paddle_reflection_angle(hit_pos);
    let speed = ball.vel.length();
    ball.vel = velocity_from_heading(speed, angle);
    ball.pos.y = paddle.pos.y - ball.radius;

    log::trace!("Paddle bounce at {:.2} -> {:.1} deg", hit_pos, angle);
    Some(angle)
}

/// Destroy the first visible brick the ball overlaps and reflect off it.
///
/// At most one brick is hit per tick. The reflection axis comes from the
/// brick edge nearest the ball center; ties go to the left/right edges.
pub fn hit_brick(ball: &mut Ball, bricks: &mut [Brick]) -> Option<BrickHit> {
    if !ball.active {
        return None;
    }
    let bounds = ball.bounds();
    let (index, brick) = bricks
        .iter_mut()
        .enumerate()
        .find(|(_, b)| b.visible && bounds.intersects(&b.rect))?;

    brick.visible = false;
    let horizontal = reflect_off_brick(ball, &brick.rect);

    log::trace!(
        "Brick {} (row {}, col {}) destroyed, {} reflection",
        index,
        brick.row,
        brick.col,
        if horizontal { "horizontal" } else { "vertical" }
    );

    Some(BrickHit {
        index,
        points: brick.points,
        horizontal,
    })
}

/// Negate dx if a side edge is nearest the ball center, otherwise dy.
///
/// Returns true for a horizontal (dx) reflection.
pub fn reflect_off_brick(ball: &mut Ball, rect: &Rect) -> bool {
    let horizontal = rect.edge_distances(ball.pos).nearest_is_side();
    if horizontal {
        ball.vel.x = -ball.vel.x;
    } else {
        ball.vel.y = -ball.vel.y;
    }
    horizontal
}

/// True once the ball's top has dropped past the bottom edge
pub fn ball_missed(ball: &Ball, area: &ScreenConfig) -> bool {
    ball.active && ball.pos.y - ball.radius > area.height
}
