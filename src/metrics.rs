//! End-of-session metrics
//!
//! Derived once, after the loop ends, from the session's counters and
//! tick timestamps.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::sim::{GameMode, GamePhase, GameState, HitCounters};

/// Timestamp format used in persisted records
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Immutable summary of one finished (or abandoned) session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub mode: GameMode,
    pub score: u64,
    pub level: u32,
    /// Seconds from first launch to the terminal transition
    pub duration: f64,
    /// Cumulative brick hits over hits plus paddle catches
    pub hit_rate: f64,
    pub bricks_hit: u32,
    pub lives_remaining: u32,
    pub timestamp: String,
    pub won: bool,
}

impl SessionRecord {
    pub fn from_state<R>(state: &GameState<R>, timestamp: DateTime<Local>) -> Self {
        Self {
            mode: state.mode(),
            score: state.score,
            level: state.level,
            duration: state.duration_secs(),
            hit_rate: session_hit_rate(&state.counters),
            bricks_hit: state.counters.total_hits,
            lives_remaining: state.lives,
            timestamp: timestamp.format(TIMESTAMP_FORMAT).to_string(),
            won: state.phase == GamePhase::Won,
        }
    }
}

/// Whole-session hit rate at full precision
fn session_hit_rate(counters: &HitCounters) -> f64 {
    let attempts = u64::from(counters.total_hits) + u64::from(counters.total_misses);
    if attempts == 0 {
        0.0
    } else {
        f64::from(counters.total_hits) / attempts as f64
    }
}

/// Record stamped with the current local time
pub fn summarize<R>(state: &GameState<R>) -> SessionRecord {
    SessionRecord::from_state(state, Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use chrono::TimeZone;

    fn stamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap()
    }

    #[test]
    fn test_unstarted_session() {
        let state = GameState::new(GameConfig::default(), GameMode::Classic, 1).unwrap();
        let record = SessionRecord::from_state(&state, stamp());
        assert_eq!(record.duration, 0.0);
        assert_eq!(record.hit_rate, 0.0);
        assert_eq!(record.score, 0);
        assert_eq!(record.lives_remaining, 3);
        assert!(!record.won);
        assert_eq!(record.timestamp, "2024-03-09 14:05:00");
    }

    #[test]
    fn test_won_session() {
        let mut state = GameState::new(GameConfig::default(), GameMode::Classic, 1).unwrap();
        state.phase = GamePhase::Won;
        state.start_tick = Some(0);
        state.end_tick = Some(300);
        state.score = 500;
        for _ in 0..50 {
            state.counters.record_hit();
        }
        for _ in 0..50 {
            state.counters.record_miss();
        }
        let record = SessionRecord::from_state(&state, stamp());
        assert!(record.won);
        assert!((record.duration - 5.0).abs() < 1e-9);
        assert!((record.hit_rate - 0.5).abs() < 1e-9);
        assert_eq!(record.bricks_hit, 50);
    }

    #[test]
    fn test_hit_rate_is_not_rounded_through_f32() {
        let mut state = GameState::new(GameConfig::default(), GameMode::Classic, 1).unwrap();
        state.counters.record_hit();
        state.counters.record_miss();
        state.counters.record_miss();
        let record = SessionRecord::from_state(&state, stamp());
        assert_eq!(record.hit_rate, 1.0 / 3.0);
    }

    #[test]
    fn test_record_field_names() {
        let state = GameState::new(GameConfig::default(), GameMode::Challenge, 1).unwrap();
        let json = serde_json::to_value(SessionRecord::from_state(&state, stamp())).unwrap();
        for key in [
            "mode",
            "score",
            "level",
            "duration",
            "hit_rate",
            "bricks_hit",
            "lives_remaining",
            "timestamp",
            "won",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["mode"], "challenge");
    }
}
