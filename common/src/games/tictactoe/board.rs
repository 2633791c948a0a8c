use std::fmt;

use super::types::{BoardError, Mark, MoveError, Player, Verdict};
use super::win_detector::check_win;

pub const BOARD_SIZE: usize = 3;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;
pub const CENTER: usize = 4;

/// 3x3 grid stored row-major; index `i` is row `i / 3`, column `i % 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_marks(cells: [Mark; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    /// Panics on an index past the board; use `get` for unchecked input.
    pub(crate) fn cell(&self, index: usize) -> Mark {
        self.cells[index]
    }

    pub(crate) fn set(&mut self, index: usize, mark: Mark) {
        self.cells[index] = mark;
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    pub fn available_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn evaluate(&self) -> Verdict {
        if let Some((player, line)) = check_win(self) {
            return Verdict::Win { player, line };
        }
        if self.is_full() {
            Verdict::Draw
        } else {
            Verdict::Ongoing
        }
    }

    /// Returns a copy of the board with `player`'s mark at `index`.
    ///
    /// The receiver is never modified, so a rejected move leaves the
    /// caller's board exactly as it was.
    pub fn apply_move(&self, index: usize, player: Player) -> Result<Board, MoveError> {
        if self.evaluate().is_terminal() {
            return Err(MoveError::GameOver);
        }
        match self.get(index) {
            None => Err(MoveError::OutOfRange { index }),
            Some(Mark::Empty) => {
                let mut next = *self;
                next.set(index, player.mark());
                Ok(next)
            }
            Some(_) => Err(MoveError::CellOccupied { index }),
        }
    }
}

impl TryFrom<&[Option<Player>]> for Board {
    type Error = BoardError;

    fn try_from(cells: &[Option<Player>]) -> Result<Self, Self::Error> {
        if cells.len() != CELL_COUNT {
            return Err(BoardError::WrongLength { found: cells.len() });
        }
        let mut board = Board::new();
        for (index, &cell) in cells.iter().enumerate() {
            board.set(index, Mark::from(cell));
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.cells.chunks(BOARD_SIZE).enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            for (col, cell) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                let symbol = match cell {
                    Mark::Empty => '.',
                    Mark::X => 'X',
                    Mark::O => 'O',
                };
                write!(f, "{}", symbol)?;
            }
        }
        Ok(())
    }
}
