use crate::games::SessionRng;
use crate::log;

use super::board::Board;
use super::bot_controller::select_move;
use super::settings::{COMPUTER_PLAYER, GameMode, TicTacToeSettings};
use super::types::{Difficulty, MoveError, Player, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreTally {
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
}

impl ScoreTally {
    pub fn record(&mut self, verdict: &Verdict) {
        match verdict {
            Verdict::Win {
                player: Player::X, ..
            } => self.x_wins += 1,
            Verdict::Win {
                player: Player::O, ..
            } => self.o_wins += 1,
            Verdict::Draw => self.draws += 1,
            Verdict::Ongoing => {}
        }
    }
}

/// One session: the board in play, whose turn it is and the running tally.
///
/// A finished board stays in place (so the front end can show the winning
/// line) until `start_next_round` or `reset` clears it.
#[derive(Debug)]
pub struct TicTacToeGameState {
    pub board: Board,
    pub current_player: Player,
    pub settings: TicTacToeSettings,
    pub scores: ScoreTally,
    pub last_move: Option<usize>,
}

impl TicTacToeGameState {
    pub fn new(settings: TicTacToeSettings) -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            settings,
            scores: ScoreTally::default(),
            last_move: None,
        }
    }

    pub fn verdict(&self) -> Verdict {
        self.board.evaluate()
    }

    pub fn place_mark(&mut self, index: usize) -> Result<Verdict, MoveError> {
        self.board = self.board.apply_move(index, self.current_player)?;
        self.last_move = Some(index);

        let verdict = self.board.evaluate();
        match verdict {
            Verdict::Ongoing => self.switch_turn(),
            Verdict::Win { player, line } => {
                log!("{} wins on cells {:?}", player, line);
                self.scores.record(&verdict);
            }
            Verdict::Draw => {
                log!("Round ends in a draw");
                self.scores.record(&verdict);
            }
        }

        Ok(verdict)
    }

    pub fn is_computer_turn(&self) -> bool {
        self.settings.mode == GameMode::VsComputer
            && self.current_player == COMPUTER_PLAYER
            && !self.verdict().is_terminal()
    }

    /// Lets the computer move for the current player. `None` when the round
    /// is already over.
    pub fn play_computer_turn(&mut self, rng: &mut SessionRng) -> Option<(usize, Verdict)> {
        if self.verdict().is_terminal() {
            return None;
        }
        let index = select_move(
            &self.board,
            self.current_player,
            self.settings.difficulty,
            rng,
        )?;
        let verdict = self.place_mark(index).ok()?;
        Some((index, verdict))
    }

    pub fn start_next_round(&mut self) {
        self.board = Board::new();
        self.current_player = Player::X;
        self.last_move = None;
    }

    pub fn reset(&mut self) {
        self.start_next_round();
        self.scores = ScoreTally::default();
    }

    pub fn swap_turn(&mut self) {
        self.switch_turn();
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.settings.difficulty = difficulty;
    }

    pub fn toggle_mode(&mut self) -> GameMode {
        self.settings.mode = self.settings.mode.toggled();
        self.settings.mode
    }

    fn switch_turn(&mut self) {
        self.current_player = self.current_player.opponent();
    }
}
