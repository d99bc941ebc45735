use adaptive_breakout::GameConfig;
use adaptive_breakout::runner::{Autopilot, Pacing, ScriptedInput, run_session, run_session_with};
use adaptive_breakout::sim::{
    GameEvent, GameMode, GamePhase, GameState, Outcome, TickInput, TickStatus, tick,
};
use glam::Vec2;

fn launch() -> TickInput {
    TickInput {
        launch: true,
        ..Default::default()
    }
}

fn idle() -> TickInput {
    TickInput::default()
}

/// Place the ball just below a brick, moving straight up into it
fn aim_at_brick(state: &mut GameState, index: usize) {
    let rect = state.bricks[index].rect;
    state.ball.active = true;
    state.ball.pos = Vec2::new(rect.center().x, rect.bottom() + state.ball.radius + 1.0);
    state.ball.vel = Vec2::new(0.0, -5.0);
}

/// Place the ball below the screen so the next tick is a miss
fn drop_ball(state: &mut GameState) {
    state.ball.active = true;
    state.ball.pos = Vec2::new(400.0, state.config().screen.height + 20.0);
    state.ball.vel = Vec2::new(0.0, 5.0);
}

#[test]
fn test_twelve_straight_hits_raise_difficulty_once() {
    let mut state = GameState::new(GameConfig::default(), GameMode::Classic, 11).unwrap();
    tick(&mut state, &launch());
    let (width, speed) = (state.paddle.width, state.paddle.speed);

    let mut raised_at = Vec::new();
    for hit in 1..=12 {
        // Bottom row first so no other brick is in the way
        aim_at_brick(&mut state, 49 - hit);
        let report = tick(&mut state, &idle());
        assert_eq!(state.counters.total_hits, hit as u32);
        if report
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::DifficultyRaised { .. }))
        {
            raised_at.push(hit);
        }
    }

    assert_eq!(raised_at, vec![10]);
    assert_eq!(state.paddle.width, width - 10.0);
    assert_eq!(state.paddle.speed, speed + 1.0);
    assert_eq!(state.difficulty.last_check_hits(), 10);
    assert_eq!(state.counters.window_hits, 2);
    assert_eq!(state.counters.window_misses, 0);
}

#[test]
fn test_lives_drop_one_per_miss_until_game_over() {
    let mut state = GameState::new(GameConfig::default(), GameMode::Classic, 3).unwrap();
    tick(&mut state, &launch());

    for expected in [2, 1] {
        drop_ball(&mut state);
        let report = tick(&mut state, &idle());
        assert_eq!(state.lives, expected);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(report.status, TickStatus::Running);
        assert!(!state.ball.active);
        tick(&mut state, &launch());
    }

    drop_ball(&mut state);
    let report = tick(&mut state, &idle());
    assert_eq!(state.lives, 0);
    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(report.status, TickStatus::Finished(Outcome::Lost));
    assert!(state.end_tick.is_some());
}

#[test]
fn test_endless_mode_levels_up_per_clear() {
    let mut state = GameState::new(GameConfig::default(), GameMode::Challenge, 21).unwrap();
    tick(&mut state, &launch());

    for expected_level in 2..=4 {
        let last = state.bricks.len() - 1;
        for brick in state.bricks.iter_mut().take(last) {
            brick.visible = false;
        }
        aim_at_brick(&mut state, last);
        let report = tick(&mut state, &idle());
        assert_eq!(state.level, expected_level);
        assert!(state.ball.active, "ball relaunches after regeneration");
        assert_eq!(state.visible_bricks(), state.bricks.len());
        assert_eq!(report.status, TickStatus::Running);
    }
    assert_eq!(state.phase, GamePhase::Playing);
}

#[test]
fn test_quit_mid_game_leaves_phase_untouched() {
    let mut state = GameState::new(GameConfig::default(), GameMode::Classic, 8).unwrap();
    let mut script = vec![launch()];
    script.extend(std::iter::repeat_n(idle(), 20));
    script.push(TickInput {
        quit: true,
        ..Default::default()
    });
    let result = run_session(&mut state, &mut ScriptedInput::new(script), Pacing::Unpaced, None);

    assert_eq!(result.status, TickStatus::Quit);
    assert_eq!(state.phase, GamePhase::Playing);
    assert!(state.start_tick.is_some());
    assert!(state.end_tick.is_none());
    assert_eq!(result.record.duration, 0.0);
    assert!(!result.record.won);
}

#[test]
fn test_autopilot_session_keeps_invariants() {
    let config = GameConfig::default();
    let (min_w, max_w) = (config.paddle.min_width, config.paddle.max_width);
    let mut state = GameState::new(config, GameMode::Classic, 2024).unwrap();
    let mut pilot = Autopilot::new(0.6);
    let mut last_speed = state.paddle.speed;
    let mut last_width = state.paddle.width;

    let result = run_session_with(
        &mut state,
        &mut pilot,
        Pacing::Unpaced,
        Some(60 * 60 * 5),
        |s, report| {
            assert!((min_w..=max_w).contains(&s.paddle.width));
            if s.paddle.speed > last_speed {
                assert!(s.paddle.width < last_width, "speed rose without a shrink");
            }
            assert!(s.paddle.width <= last_width, "difficulty never eases");
            last_speed = s.paddle.speed;
            last_width = s.paddle.width;

            if let TickStatus::Finished(_) = report.status {
                assert!(s.end_tick.is_some());
            }
        },
    );

    assert!(state.start_tick.is_some());
    assert!(result.record.bricks_hit > 0);
    assert!((0.0..=1.0).contains(&result.record.hit_rate));
    if result.record.won {
        assert_eq!(state.visible_bricks(), 0);
        assert!(result.record.duration > 0.0);
    }
}

#[test]
fn test_same_seed_same_session() {
    let play = || {
        let mut state = GameState::new(GameConfig::default(), GameMode::Challenge, 77).unwrap();
        let result = run_session(&mut state, &mut Autopilot::new(0.4), Pacing::Unpaced, Some(5000));
        (result.record.score, result.record.bricks_hit, state.ball.pos, state.lives)
    };
    assert_eq!(play(), play());
}
