//! Fixed-tick loop driver
//!
//! Polls an input source at each tick boundary, advances the session, and
//! invokes the metrics recorder exactly once when the loop ends.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::metrics::{self, SessionRecord};
use crate::sim::{GameState, Snapshot, TickInput, TickReport, TickStatus, tick};

/// Supplies player intents once per tick
pub trait InputSource {
    fn poll(&mut self, view: &Snapshot) -> TickInput;
}

/// Loop pacing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep to the next tick boundary at the configured fps
    RealTime,
    /// Run ticks back to back
    Unpaced,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// Last tick status; the tick cap reports `Quit`
    pub status: TickStatus,
    /// Ticks executed by this run
    pub ticks: u64,
    pub record: SessionRecord,
}

/// Run until a terminal phase, a quit intent, or `max_ticks`
pub fn run_session<R: Rng, I: InputSource + ?Sized>(
    state: &mut GameState<R>,
    input: &mut I,
    pacing: Pacing,
    max_ticks: Option<u64>,
) -> RunResult {
    run_session_with(state, input, pacing, max_ticks, |_, _| {})
}

/// `run_session` with a per-tick observer (renderers, tracing)
pub fn run_session_with<R, I, F>(
    state: &mut GameState<R>,
    input: &mut I,
    pacing: Pacing,
    max_ticks: Option<u64>,
    mut on_tick: F,
) -> RunResult
where
    R: Rng,
    I: InputSource + ?Sized,
    F: FnMut(&GameState<R>, &TickReport),
{
    let tick_len = Duration::from_secs_f64(state.config().tick_seconds());
    let mut next_tick = Instant::now() + tick_len;
    let mut ticks = 0u64;

    let status = loop {
        if max_ticks.is_some_and(|max| ticks >= max) {
            log::info!("Tick cap of {ticks} reached");
            break TickStatus::Quit;
        }

        let intents = input.poll(&state.snapshot());
        let report = tick(state, &intents);
        ticks += 1;
        on_tick(state, &report);

        if report.status != TickStatus::Running {
            break report.status;
        }

        if pacing == Pacing::RealTime {
            let now = Instant::now();
            if next_tick > now {
                std::thread::sleep(next_tick - now);
                next_tick += tick_len;
            } else {
                // Fell behind; don't try to catch up
                next_tick = now + tick_len;
            }
        }
    };

    RunResult {
        status,
        ticks,
        record: metrics::summarize(state),
    }
}

/// Replays a fixed list of intents, then quits
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    inputs: Vec<TickInput>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(inputs: Vec<TickInput>) -> Self {
        Self { inputs, cursor: 0 }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _view: &Snapshot) -> TickInput {
        let input = self.inputs.get(self.cursor).copied().unwrap_or(TickInput {
            quit: true,
            ..Default::default()
        });
        self.cursor += 1;
        input
    }
}

/// Demo player: serves whenever the ball rests and keeps the paddle under it.
///
/// The aim point drifts across the paddle over time so bounce angles vary.
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Fraction of the half-width by which the aim point may drift (0 = dead center)
    pub drift: f32,
}

impl Autopilot {
    pub fn new(drift: f32) -> Self {
        Self {
            drift: drift.clamp(0.0, 1.0),
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, view: &Snapshot) -> TickInput {
        let mut input = TickInput::default();
        if !view.ball.active {
            input.launch = true;
            return input;
        }

        let t = view.tick as f32 * 0.01;
        let wobble = (t.sin() * 0.7 + (t * 0.7).sin() * 0.3) * self.drift;
        let target = view.ball.pos.x + wobble * view.paddle.w / 2.0;
        let center = view.paddle.center().x;
        let deadband = (view.paddle_speed / 2.0).max(1.0);

        if target < center - deadband {
            input.move_left = true;
        } else if target > center + deadband {
            input.move_right = true;
        }
        input
    }
}
