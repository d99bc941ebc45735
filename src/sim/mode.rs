//! Game modes
//!
//! Per-mode parameters are resolved once, at session creation, into a
//! `ModeRules` value. Nothing downstream branches on the mode itself.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Selectable game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Bounded: clearing the grid wins the session
    #[default]
    Classic,
    /// Endless: faster ball, fewer lives, the grid regenerates on every clear
    Challenge,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Challenge => "challenge",
        }
    }

    /// Resolve this mode's parameters against a config
    pub fn rules(&self, config: &GameConfig) -> ModeRules {
        match self {
            GameMode::Classic => ModeRules {
                mode: *self,
                starting_lives: config.lives.classic,
                ball_speed: config.ball.speed,
                brick_rows: config.bricks.rows,
                on_clear: OnClear::Win,
            },
            GameMode::Challenge => ModeRules {
                mode: *self,
                starting_lives: config.lives.challenge,
                ball_speed: config.ball.speed * config.challenge_speed_multiplier,
                brick_rows: config.bricks.challenge_rows,
                on_clear: OnClear::Regenerate,
            },
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" => Ok(GameMode::Classic),
            "challenge" | "endless" => Ok(GameMode::Challenge),
            other => Err(format!("unknown mode '{other}' (expected classic or challenge)")),
        }
    }
}

/// What happens when every brick has been destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnClear {
    /// Session ends as won
    Win,
    /// Fresh grid, next level, ball relaunched automatically
    Regenerate,
}

/// Per-mode parameters fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeRules {
    pub mode: GameMode,
    pub starting_lives: u32,
    /// Launch speed with the mode multiplier applied
    pub ball_speed: f32,
    pub brick_rows: u32,
    pub on_clear: OnClear,
}
