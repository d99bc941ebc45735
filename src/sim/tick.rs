//! Fixed timestep simulation tick
//!
//! Advances one session by one discrete step. Order within a tick:
//! launch intent, paddle movement, ball motion, walls, paddle, bricks,
//! life loss, full-clear check, difficulty evaluation.

use rand::Rng;

use super::collision::{ball_missed, bounce_paddle, bounce_walls, hit_brick};
use super::mode::OnClear;
use super::state::{GamePhase, GameState, Outcome};

/// Player intents for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held
    pub move_left: bool,
    /// Held
    pub move_right: bool,
    /// Edge-triggered
    pub launch: bool,
    /// Edge-triggered; ends the loop without a terminal phase
    pub quit: bool,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Ball left the paddle (first serve, after a lost life, or after a regeneration)
    Launched,
    WallBounce,
    /// Reflection angle in degrees from vertical
    PaddleBounce { angle: f32 },
    BrickDestroyed { index: usize, points: u32 },
    LifeLost { lives: u32 },
    DifficultyRaised { width: f32, speed: f32 },
    /// Endless mode grid cleared; `level` is the new level
    LevelCleared { level: u32 },
    GameOver,
    Won,
}

/// Whether the loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Running,
    Finished(Outcome),
    Quit,
}

/// Status plus the events produced by one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub status: TickStatus,
    pub events: Vec<GameEvent>,
}

impl TickReport {
    fn new(status: TickStatus) -> Self {
        Self {
            status,
            events: Vec::new(),
        }
    }
}

/// Advance the session by one tick
pub fn tick<R: Rng>(state: &mut GameState<R>, input: &TickInput) -> TickReport {
    if input.quit {
        log::info!("Quit at tick {} ({:?})", state.time_ticks, state.phase);
        return TickReport::new(TickStatus::Quit);
    }

    if state.phase.is_terminal() {
        return TickReport::new(TickStatus::Finished(state.phase.outcome()));
    }

    state.time_ticks += 1;
    let mut report = TickReport::new(TickStatus::Running);

    // Launch intent
    if input.launch && !state.ball.active {
        if state.phase == GamePhase::NotStarted {
            state.phase = GamePhase::Playing;
            state.start_tick = Some(state.time_ticks);
            log::info!("Session started ({} mode)", state.mode());
        }
        state.ball.launch(&mut state.rng);
        report.events.push(GameEvent::Launched);
    }

    // Paddle movement; a resting ball rides along
    if input.move_left {
        state.paddle.move_left();
    }
    if input.move_right {
        state.paddle.move_right();
    }
    state.ball.follow(&state.paddle);

    if state.phase != GamePhase::Playing {
        return report;
    }

    step_physics(state, &mut report);

    if let Some(eval) = state
        .difficulty
        .update(&mut state.counters, &mut state.paddle)
    {
        if eval.raised {
            report.events.push(GameEvent::DifficultyRaised {
                width: state.paddle.width,
                speed: state.paddle.speed,
            });
        }
    }

    if state.phase.is_terminal() {
        report.status = TickStatus::Finished(state.phase.outcome());
    }
    report
}

fn step_physics<R: Rng>(state: &mut GameState<R>, report: &mut TickReport) {
    if !state.ball.active {
        return;
    }

    state.ball.step();

    let screen = state.config().screen;
    if bounce_walls(&mut state.ball, &screen).any() {
        report.events.push(GameEvent::WallBounce);
    }

    // A paddle catch counts against the hit rate
    if let Some(angle) = bounce_paddle(&mut state.ball, &state.paddle) {
        state.counters.record_miss();
        report.events.push(GameEvent::PaddleBounce { angle });
    }

    if let Some(hit) = hit_brick(&mut state.ball, &mut state.bricks) {
        state.score += u64::from(hit.points);
        state.counters.record_hit();
        report.events.push(GameEvent::BrickDestroyed {
            index: hit.index,
            points: hit.points,
        });
    }

    if ball_missed(&state.ball, &screen) {
        state.lives = state.lives.saturating_sub(1);
        report.events.push(GameEvent::LifeLost { lives: state.lives });
        if state.lives == 0 {
            finish(state, GamePhase::GameOver);
            report.events.push(GameEvent::GameOver);
            return;
        }
        log::debug!("Life lost, {} remaining", state.lives);
        state.ball.reset(&state.paddle);
    }

    if state.all_cleared() {
        match state.rules.on_clear {
            OnClear::Win => {
                finish(state, GamePhase::Won);
                report.events.push(GameEvent::Won);
            }
            OnClear::Regenerate => {
                state.regenerate_bricks();
                log::info!("Grid cleared, entering level {}", state.level);
                state.ball.reset(&state.paddle);
                state.ball.launch(&mut state.rng);
                report.events.push(GameEvent::LevelCleared { level: state.level });
                report.events.push(GameEvent::Launched);
            }
        }
    }
}

fn finish<R>(state: &mut GameState<R>, phase: GamePhase) {
    state.phase = phase;
    state.end_tick = Some(state.time_ticks);
    log::info!(
        "Session ended {:?} at tick {}: score {}, level {}",
        phase,
        state.time_ticks,
        state.score,
        state.level
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::GameMode;
    use glam::Vec2;

    fn launch() -> TickInput {
        TickInput {
            launch: true,
            ..Default::default()
        }
    }

    fn new_state(mode: GameMode) -> GameState {
        GameState::new(GameConfig::default(), mode, 12345).unwrap()
    }

    /// Put the ball just under a brick, heading up into it
    fn aim_at_brick(state: &mut GameState, index: usize) {
        let rect = state.bricks[index].rect;
        state.ball.active = true;
        state.ball.pos = Vec2::new(rect.center().x, rect.bottom() + state.ball.radius + 1.0);
        state.ball.vel = Vec2::new(0.0, -5.0);
    }

    #[test]
    fn test_tick_not_started_to_playing() {
        let mut state = new_state(GameMode::Classic);
        let report = tick(&mut state, &TickInput::default());
        assert_eq!(report.status, TickStatus::Running);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert!(state.start_tick.is_none());

        let report = tick(&mut state, &launch());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.ball.active);
        assert_eq!(state.start_tick, Some(2));
        assert!(report.events.contains(&GameEvent::Launched));
    }

    #[test]
    fn test_resting_ball_follows_paddle() {
        let mut state = new_state(GameMode::Classic);
        let input = TickInput {
            move_left: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.ball.pos.x, state.paddle.center_x());
        assert!(state.paddle.pos.x < (800.0 - state.paddle.width) / 2.0);
    }

    #[test]
    fn test_quit_before_start() {
        let mut state = new_state(GameMode::Classic);
        let report = tick(
            &mut state,
            &TickInput {
                quit: true,
                ..Default::default()
            },
        );
        assert_eq!(report.status, TickStatus::Quit);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_life_loss_resets_ball() {
        let mut state = new_state(GameMode::Classic);
        tick(&mut state, &launch());
        state.ball.pos = Vec2::new(400.0, 620.0);
        state.ball.vel = Vec2::new(0.0, 5.0);
        let report = tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 2);
        assert!(!state.ball.active);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(report.events.contains(&GameEvent::LifeLost { lives: 2 }));
        assert!(state.end_tick.is_none());
    }

    #[test]
    fn test_game_over_on_last_life() {
        let mut state = new_state(GameMode::Classic);
        tick(&mut state, &launch());
        state.lives = 1;
        state.ball.pos = Vec2::new(400.0, 620.0);
        state.ball.vel = Vec2::new(0.0, 5.0);
        let report = tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(report.status, TickStatus::Finished(Outcome::Lost));
        assert_eq!(state.end_tick, Some(state.time_ticks));
    }

    #[test]
    fn test_terminal_phase_freezes_state() {
        let mut state = new_state(GameMode::Classic);
        tick(&mut state, &launch());
        state.phase = GamePhase::GameOver;
        let ticks = state.time_ticks;
        let pos = state.ball.pos;
        let report = tick(
            &mut state,
            &TickInput {
                move_right: true,
                launch: true,
                ..Default::default()
            },
        );
        assert_eq!(report.status, TickStatus::Finished(Outcome::Lost));
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.ball.pos, pos);
    }

    #[test]
    fn test_brick_hit_scores() {
        let mut state = new_state(GameMode::Classic);
        tick(&mut state, &launch());
        aim_at_brick(&mut state, 45);
        let report = tick(&mut state, &TickInput::default());
        assert!(!state.bricks[45].visible);
        assert_eq!(state.score, 10);
        assert_eq!(state.counters.total_hits, 1);
        assert_eq!(state.counters.window_hits, 1);
        assert!(state.ball.vel.y > 0.0);
        assert!(report
            .events
            .contains(&GameEvent::BrickDestroyed { index: 45, points: 10 }));
    }

    #[test]
    fn test_paddle_catch_counts_as_miss() {
        let mut state = new_state(GameMode::Classic);
        tick(&mut state, &launch());
        state.ball.pos = Vec2::new(state.paddle.center_x(), state.paddle.pos.y - 9.0);
        state.ball.vel = Vec2::new(0.0, 5.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.counters.total_misses, 1);
        assert_eq!(state.counters.window_misses, 1);
        assert_eq!(state.lives, 3);
        assert!(state.ball.vel.y < 0.0);
    }

    #[test]
    fn test_classic_last_brick_wins() {
        let mut state = new_state(GameMode::Classic);
        tick(&mut state, &launch());
        for brick in state.bricks.iter_mut().skip(1) {
            brick.visible = false;
        }
        aim_at_brick(&mut state, 0);
        let report = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(report.status, TickStatus::Finished(Outcome::Won));
        assert_eq!(state.end_tick, Some(state.time_ticks));
        assert!(report.events.contains(&GameEvent::Won));
    }

    #[test]
    fn test_challenge_clear_regenerates() {
        let mut state = new_state(GameMode::Challenge);
        tick(&mut state, &launch());
        for brick in state.bricks.iter_mut().skip(1) {
            brick.visible = false;
        }
        aim_at_brick(&mut state, 0);
        let report = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 2);
        assert!(state.ball.active);
        assert!(state.bricks.iter().all(|b| b.visible));
        assert_eq!(report.status, TickStatus::Running);
        assert!(report.events.contains(&GameEvent::LevelCleared { level: 2 }));
        assert!(state.end_tick.is_none());
    }

    #[test]
    fn test_relaunch_after_life_loss_keeps_start_tick() {
        let mut state = new_state(GameMode::Classic);
        tick(&mut state, &launch());
        state.ball.pos = Vec2::new(400.0, 620.0);
        state.ball.vel = Vec2::new(0.0, 5.0);
        tick(&mut state, &TickInput::default());
        assert!(!state.ball.active);
        tick(&mut state, &launch());
        assert!(state.ball.active);
        assert_eq!(state.start_tick, Some(1));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = new_state(GameMode::Classic);
        let mut state2 = new_state(GameMode::Classic);
        let inputs = [
            TickInput {
                move_left: true,
                ..Default::default()
            },
            launch(),
            TickInput {
                move_right: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }
        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.ball.pos, state2.ball.pos);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.paddle.pos, state2.paddle.pos);
    }
}
