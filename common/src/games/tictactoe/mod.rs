mod board;
mod bot_controller;
mod game_state;
mod minimax;
mod settings;
mod types;
mod win_detector;

pub use board::{BOARD_SIZE, Board, CELL_COUNT, CENTER};
pub use bot_controller::{
    MinimaxStrategy, MoveStrategy, RandomStrategy, WinOrBlockStrategy, select_move,
};
pub use game_state::{ScoreTally, TicTacToeGameState};
pub use minimax::{best_move, score};
pub use settings::{COMPUTER_PLAYER, DEFAULT_COMPUTER_DELAY_MS, GameMode, TicTacToeSettings};
pub use types::{BoardError, Difficulty, Line, Mark, MoveError, Player, Verdict};
pub use win_detector::{LINES, check_win};
