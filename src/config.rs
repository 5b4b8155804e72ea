use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::board::MapLayout;
use crate::types::Color;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 5;
pub const MIN_TARGET_SCORE: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DisplayMode {
    Board,
    #[default]
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("need at least {MIN_PLAYERS} players, got {0}")]
    TooFewPlayers(usize),
    #[error("at most {MAX_PLAYERS} players are supported, got {0}")]
    TooManyPlayers(usize),
    #[error("player number {0} is used twice")]
    DuplicateNumber(u8),
    #[error("colour {0} is used twice")]
    DuplicateColor(Color),
    #[error("target score must be at least {MIN_TARGET_SCORE}, got {0}")]
    TargetTooLow(u8),
    #[error("minimax time limit must be positive")]
    ZeroTimeLimit,
    #[error("round limit must be positive")]
    ZeroRoundLimit,
    #[error("unknown player code {0:?}")]
    UnknownPlayerCode(String),
    #[error("invalid options: {0}")]
    Options(String),
}

/// Flat options map controlling a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub target_score: u8,
    pub minimax_max_depth: u8,
    /// Seconds of wall clock each AI turn may use.
    pub minimax_time_limit: u64,
    pub display_mode_focus: DisplayMode,
    /// Dice are rolled at the table and typed in.
    pub table_top_mode: bool,
    pub seed: u64,
    pub random_layout: bool,
    pub round_limit: u32,
    pub parallel_search: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_score: 10,
            minimax_max_depth: 1,
            minimax_time_limit: 90,
            display_mode_focus: DisplayMode::Text,
            table_top_mode: false,
            seed: 42,
            random_layout: false,
            round_limit: 200,
            parallel_search: false,
        }
    }
}

impl GameConfig {
    pub fn from_json(text: &str) -> Result<Self, SetupError> {
        let config: GameConfig =
            serde_json::from_str(text).map_err(|e| SetupError::Options(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        if self.target_score < MIN_TARGET_SCORE {
            return Err(SetupError::TargetTooLow(self.target_score));
        }
        if self.minimax_time_limit == 0 {
            return Err(SetupError::ZeroTimeLimit);
        }
        if self.round_limit == 0 {
            return Err(SetupError::ZeroRoundLimit);
        }
        Ok(())
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.minimax_time_limit)
    }

    pub fn layout(&self) -> MapLayout {
        if self.random_layout {
            MapLayout::Random
        } else {
            MapLayout::Default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_options_fill_defaults() {
        let config = GameConfig::from_json(r#"{"target_score": 8, "display_mode_focus": "board"}"#)
            .unwrap();
        assert_eq!(config.target_score, 8);
        assert_eq!(config.display_mode_focus, DisplayMode::Board);
        assert_eq!(config.minimax_time_limit, 90);
    }

    #[test]
    fn rejects_low_target() {
        let err = GameConfig::from_json(r#"{"target_score": 2}"#).unwrap_err();
        assert_eq!(err, SetupError::TargetTooLow(2));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(matches!(
            GameConfig::from_json(r#"{"victory": 3}"#),
            Err(SetupError::Options(_))
        ));
    }
}
