use crate::games::SessionRng;
use crate::{log_debug, log_warn};

use super::board::Board;
use super::minimax::best_move;
use super::types::{Difficulty, Player};
use super::win_detector::{LINES, completing_cell};

pub trait MoveStrategy {
    fn pick_move(&self, board: &Board, player: Player, rng: &mut SessionRng) -> Option<usize>;
}

/// Uniform pick among the empty cells.
pub struct RandomStrategy;

impl MoveStrategy for RandomStrategy {
    fn pick_move(&self, board: &Board, _player: Player, rng: &mut SessionRng) -> Option<usize> {
        let available_moves = board.available_moves();
        if available_moves.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..available_moves.len());
        Some(available_moves[idx])
    }
}

/// Completes the first own two-in-a-line, else blocks the first opposing one.
/// Returns `None` when neither exists.
pub struct WinOrBlockStrategy;

impl MoveStrategy for WinOrBlockStrategy {
    fn pick_move(&self, board: &Board, player: Player, _rng: &mut SessionRng) -> Option<usize> {
        find_completing_move(board, player)
            .or_else(|| find_completing_move(board, player.opponent()))
    }
}

fn find_completing_move(board: &Board, player: Player) -> Option<usize> {
    LINES
        .iter()
        .find_map(|&line| completing_cell(board, line, player))
}

pub struct MinimaxStrategy;

impl MoveStrategy for MinimaxStrategy {
    fn pick_move(&self, board: &Board, player: Player, _rng: &mut SessionRng) -> Option<usize> {
        best_move(board, player)
    }
}

/// Picks the computer's next cell for `difficulty`.
///
/// Callers are expected to check `Board::evaluate` first; `None` means there
/// was nothing left to play.
pub fn select_move(
    board: &Board,
    player: Player,
    difficulty: Difficulty,
    rng: &mut SessionRng,
) -> Option<usize> {
    let pick = match difficulty {
        Difficulty::Easy => RandomStrategy.pick_move(board, player, rng),
        Difficulty::Medium => WinOrBlockStrategy
            .pick_move(board, player, rng)
            .or_else(|| RandomStrategy.pick_move(board, player, rng)),
        Difficulty::Hard => MinimaxStrategy.pick_move(board, player, rng),
    };

    match pick {
        Some(index) => log_debug!("{} ({}) picks cell {}", player, difficulty, index),
        None => log_warn!("No move available for {} on board\n{}", player, board),
    }

    pick
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Mark::{Empty as E, O, X};

    fn rng() -> SessionRng {
        SessionRng::new(12345)
    }

    #[test]
    fn test_random_only_returns_empty_cells() {
        let board = Board::from_marks([X, O, E, X, E, O, E, X, O]);
        let empty = board.available_moves();

        for seed in 0..500 {
            let mut rng = SessionRng::new(seed);
            let pick = RandomStrategy.pick_move(&board, Player::X, &mut rng).unwrap();
            assert!(empty.contains(&pick), "seed {} picked {}", seed, pick);
        }
    }

    #[test]
    fn test_random_reaches_every_empty_cell() {
        let board = Board::from_marks([X, E, E, E, O, E, E, E, E]);
        let mut rng = rng();
        let mut seen = [false; 9];

        for _ in 0..500 {
            let pick = RandomStrategy.pick_move(&board, Player::X, &mut rng).unwrap();
            seen[pick] = true;
        }

        for index in board.available_moves() {
            assert!(seen[index], "cell {} was never picked", index);
        }
    }

    #[test]
    fn test_random_on_full_board_is_none() {
        let board = Board::from_marks([X, O, X, X, O, O, O, X, X]);

        assert_eq!(RandomStrategy.pick_move(&board, Player::O, &mut rng()), None);
    }

    #[test]
    fn test_win_or_block_prefers_win() {
        let board = Board::from_marks([O, O, E, X, X, E, E, E, E]);

        assert_eq!(
            WinOrBlockStrategy.pick_move(&board, Player::O, &mut rng()),
            Some(2)
        );
    }

    #[test]
    fn test_win_or_block_takes_own_line_before_earlier_block() {
        let board = Board::from_marks([X, X, E, O, O, E, E, E, E]);

        assert_eq!(
            WinOrBlockStrategy.pick_move(&board, Player::O, &mut rng()),
            Some(5)
        );
    }

    #[test]
    fn test_win_or_block_blocks_when_no_win() {
        let board = Board::from_marks([X, E, E, E, O, E, X, E, E]);

        assert_eq!(
            WinOrBlockStrategy.pick_move(&board, Player::O, &mut rng()),
            Some(3)
        );
    }

    #[test]
    fn test_win_or_block_uses_scan_order_between_threats() {
        // X threatens both row 0 (cell 2) and column 0 (cell 6).
        let board = Board::from_marks([X, X, E, X, O, E, E, E, O]);

        assert_eq!(
            WinOrBlockStrategy.pick_move(&board, Player::O, &mut rng()),
            Some(2)
        );
    }

    #[test]
    fn test_win_or_block_acts_for_x_too() {
        let board = Board::from_marks([X, E, E, O, O, E, X, E, E]);

        assert_eq!(
            WinOrBlockStrategy.pick_move(&board, Player::X, &mut rng()),
            Some(5)
        );
    }

    #[test]
    fn test_win_or_block_without_threats_is_none() {
        let board = Board::from_marks([X, E, E, E, O, E, E, E, E]);

        assert_eq!(
            WinOrBlockStrategy.pick_move(&board, Player::O, &mut rng()),
            None
        );
    }

    #[test]
    fn test_select_move_hard_opens_center() {
        assert_eq!(
            select_move(&Board::new(), Player::O, Difficulty::Hard, &mut rng()),
            Some(4)
        );
    }

    #[test]
    fn test_select_move_medium_takes_win() {
        let board = Board::from_marks([X, X, E, O, O, E, E, E, E]);

        assert_eq!(
            select_move(&board, Player::O, Difficulty::Medium, &mut rng()),
            Some(5)
        );
    }

    #[test]
    fn test_select_move_medium_falls_back_to_random() {
        let board = Board::from_marks([X, E, E, E, O, E, E, E, E]);
        let empty = board.available_moves();

        for seed in 0..50 {
            let mut rng = SessionRng::new(seed);
            let pick = select_move(&board, Player::O, Difficulty::Medium, &mut rng).unwrap();
            assert!(empty.contains(&pick));
        }
    }

    #[test]
    fn test_select_move_easy_is_seed_deterministic() {
        let board = Board::from_marks([X, E, E, E, O, E, E, E, E]);

        let first = select_move(&board, Player::O, Difficulty::Easy, &mut SessionRng::new(9));
        let second = select_move(&board, Player::O, Difficulty::Easy, &mut SessionRng::new(9));

        assert_eq!(first, second);
        assert!(board.available_moves().contains(&first.unwrap()));
    }

    #[test]
    fn test_select_move_on_full_board_is_none() {
        let board = Board::from_marks([X, O, X, X, O, O, O, X, X]);

        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(select_move(&board, Player::O, difficulty, &mut rng()), None);
        }
    }
}
