use std::ops::Deref;

use super::board::{Board, CENTER};
use super::types::{Mark, Player, Verdict};

const WIN_SCORE: i32 = 10;

/// Perfect-play move for `player`, or `None` when the position is already
/// decided.
///
/// O is always the maximizer and X the minimizer. Among equally scored
/// moves the lowest index wins.
pub fn best_move(board: &Board, player: Player) -> Option<usize> {
    if board.is_empty() {
        return Some(CENTER);
    }
    let mut board = *board;
    search(&mut board, player, 0).index
}

/// Minimax value of the position with `player` to move.
pub fn score(board: &Board, player: Player) -> i32 {
    let mut board = *board;
    search(&mut board, player, 0).score
}

struct SearchResult {
    score: i32,
    index: Option<usize>,
}

/// Marks a cell for the lifetime of the guard and clears it on drop.
struct Placement<'a> {
    board: &'a mut Board,
    index: usize,
}

impl<'a> Placement<'a> {
    fn new(board: &'a mut Board, index: usize, player: Player) -> Self {
        board.set(index, player.mark());
        Self { board, index }
    }

    fn board_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        self.board.set(self.index, Mark::Empty);
    }
}

fn terminal_score(verdict: Verdict, depth: i32) -> Option<i32> {
    match verdict {
        Verdict::Win {
            player: Player::O, ..
        } => Some(WIN_SCORE - depth),
        Verdict::Win {
            player: Player::X, ..
        } => Some(depth - WIN_SCORE),
        Verdict::Draw => Some(0),
        Verdict::Ongoing => None,
    }
}

fn search(board: &mut Board, player: Player, depth: i32) -> SearchResult {
    if let Some(score) = terminal_score(board.evaluate(), depth) {
        return SearchResult { score, index: None };
    }

    let maximizing = player == Player::O;
    let mut best = SearchResult {
        score: if maximizing { i32::MIN } else { i32::MAX },
        index: None,
    };

    for index in board.available_moves() {
        let mut placed = Placement::new(board, index, player);
        let child = search(placed.board_mut(), player.opponent(), depth + 1).score;
        drop(placed);

        let improves = if maximizing {
            child > best.score
        } else {
            child < best.score
        };
        if improves {
            best = SearchResult {
                score: child,
                index: Some(index),
            };
        }
    }

    best
}
