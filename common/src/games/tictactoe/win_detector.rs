use super::board::Board;
use super::types::{Line, Mark, Player};

/// Rows, then columns, then the two diagonals. Scans depend on this order.
pub const LINES: [Line; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn check_win(board: &Board) -> Option<(Player, Line)> {
    LINES.iter().find_map(|&line| {
        let [a, b, c] = line.map(|i| board.cell(i));
        match a.player() {
            Some(player) if a == b && b == c => Some((player, line)),
            _ => None,
        }
    })
}

/// Returns the empty cell of `line` when the other two hold `player`'s mark.
pub fn completing_cell(board: &Board, line: Line, player: Player) -> Option<usize> {
    let mark = player.mark();
    let owned = line.iter().filter(|&&i| board.cell(i) == mark).count();
    if owned != 2 {
        return None;
    }
    line.iter().copied().find(|&i| board.cell(i) == Mark::Empty)
}
