use serde::{Deserialize, Serialize};

use super::types::{Difficulty, Player};

/// The computer always plays this side: O is the maximizer in the search.
pub const COMPUTER_PLAYER: Player = Player::O;

pub const DEFAULT_COMPUTER_DELAY_MS: u64 = 260;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    VsComputer,
    TwoPlayer,
}

impl GameMode {
    pub fn toggled(self) -> GameMode {
        match self {
            GameMode::VsComputer => GameMode::TwoPlayer,
            GameMode::TwoPlayer => GameMode::VsComputer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicTacToeSettings {
    pub difficulty: Difficulty,
    pub mode: GameMode,
    pub computer_delay_ms: u64,
}

impl Default for TicTacToeSettings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            mode: GameMode::default(),
            computer_delay_ms: DEFAULT_COMPUTER_DELAY_MS,
        }
    }
}
