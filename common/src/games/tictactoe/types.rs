use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn mark(self) -> Mark {
        match self {
            Player::X => Mark::X,
            Player::O => Mark::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn player(self) -> Option<Player> {
        match self {
            Mark::X => Some(Player::X),
            Mark::O => Some(Player::O),
            Mark::Empty => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Mark::Empty
    }
}

impl From<Option<Player>> for Mark {
    fn from(player: Option<Player>) -> Self {
        player.map_or(Mark::Empty, Player::mark)
    }
}

/// Three board indices that win the game when marked by one player.
pub type Line = [usize; 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Ongoing,
    Win { player: Player, line: Line },
    Draw,
}

impl Verdict {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Verdict::Ongoing)
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            Verdict::Win { player, .. } => Some(*player),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("Unknown difficulty: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    OutOfRange { index: usize },
    CellOccupied { index: usize },
    GameOver,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::OutOfRange { index } => write!(f, "Position {} is out of bounds", index),
            MoveError::CellOccupied { index } => write!(f, "Cell {} is already marked", index),
            MoveError::GameOver => write!(f, "Game is already over"),
        }
    }
}

impl std::error::Error for MoveError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    WrongLength { found: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::WrongLength { found } => {
                write!(f, "Board must have 9 cells, got {}", found)
            }
        }
    }
}

impl std::error::Error for BoardError {}
