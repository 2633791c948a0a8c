use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use common::games::SessionRng;
use common::games::tictactoe::{
    Board, CELL_COUNT, Difficulty, GameMode, Mark, MoveError, TicTacToeGameState, Verdict,
};
use common::{log, log_warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Place(usize),
    Reset,
    Swap,
    ToggleMode,
    SetDifficulty(Difficulty),
    Help,
    Quit,
}

/// Cells are typed 1-9 on the prompt and stored 0-8.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err("Empty command".to_string());
    };

    if let Ok(cell) = head.parse::<usize>() {
        if (1..=CELL_COUNT).contains(&cell) {
            return Ok(Command::Place(cell - 1));
        }
        return Err(format!("Cell must be between 1 and {}", CELL_COUNT));
    }

    match head.to_ascii_lowercase().as_str() {
        "r" | "reset" => Ok(Command::Reset),
        "s" | "swap" => Ok(Command::Swap),
        "m" | "mode" => Ok(Command::ToggleMode),
        "d" | "difficulty" => {
            let level = parts
                .next()
                .ok_or_else(|| "Usage: d <easy|medium|hard>".to_string())?;
            Ok(Command::SetDifficulty(level.parse()?))
        }
        "h" | "help" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("Unknown command: {}", other)),
    }
}

const HELP: &str = "\
Commands:
  1-9          place a mark (cells numbered left to right, top to bottom)
  d <level>    set computer difficulty: easy, medium, hard
  m            toggle the computer opponent
  s            swap whose turn it is
  r            reset board and scores
  q            quit";

pub struct TerminalGame<R, W> {
    input: R,
    output: W,
    state: TicTacToeGameState,
    rng: SessionRng,
}

impl<R: BufRead, W: Write> TerminalGame<R, W> {
    pub fn new(input: R, output: W, state: TicTacToeGameState, rng: SessionRng) -> Self {
        Self {
            input,
            output,
            state,
            rng,
        }
    }

    /// Runs until `q` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", HELP)?;
        self.render()?;

        loop {
            if self.state.is_computer_turn() {
                self.play_computer()?;
                continue;
            }

            write!(self.output, "{} > ", self.state.current_player)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }
            if line.trim().is_empty() {
                continue;
            }

            match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.apply(command)?,
                Err(message) => writeln!(self.output, "{}", message)?,
            }
        }

        self.render_scores()
    }

    fn apply(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Place(index) => match self.state.place_mark(index) {
                Ok(verdict) => self.after_move(verdict)?,
                Err(e) => writeln!(self.output, "{}", describe_error(e))?,
            },
            Command::Reset => {
                self.state.reset();
                writeln!(self.output, "Board and scores cleared")?;
                self.render()?;
            }
            Command::Swap => {
                self.state.swap_turn();
                writeln!(self.output, "{} to move", self.state.current_player)?;
            }
            Command::ToggleMode => {
                let mode = self.state.toggle_mode();
                let label = match mode {
                    GameMode::VsComputer => "on",
                    GameMode::TwoPlayer => "off",
                };
                writeln!(self.output, "Computer opponent: {}", label)?;
            }
            Command::SetDifficulty(difficulty) => {
                self.state.set_difficulty(difficulty);
                writeln!(self.output, "Difficulty: {}", difficulty)?;
            }
            Command::Help => writeln!(self.output, "{}", HELP)?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn play_computer(&mut self) -> io::Result<()> {
        let delay = self.state.settings.computer_delay_ms;
        if delay > 0 {
            thread::sleep(Duration::from_millis(delay));
        }

        let player = self.state.current_player;
        match self.state.play_computer_turn(&mut self.rng) {
            Some((index, verdict)) => {
                writeln!(self.output, "Computer ({}) plays {}", player, index + 1)?;
                self.after_move(verdict)
            }
            None => {
                log_warn!("Computer had no move, starting a new round");
                self.state.start_next_round();
                self.render()
            }
        }
    }

    fn after_move(&mut self, verdict: Verdict) -> io::Result<()> {
        self.render()?;
        match verdict {
            Verdict::Ongoing => return Ok(()),
            Verdict::Win { player, line } => {
                let cells: Vec<String> = line.iter().map(|i| (i + 1).to_string()).collect();
                writeln!(self.output, "{} wins ({})", player, cells.join("-"))?;
            }
            Verdict::Draw => writeln!(self.output, "Draw")?,
        }
        self.render_scores()?;
        log!(
            "Round over, score X {} - O {} - draws {}",
            self.state.scores.x_wins,
            self.state.scores.o_wins,
            self.state.scores.draws
        );

        self.state.start_next_round();
        writeln!(self.output, "New round")?;
        self.render()
    }

    fn render(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", render_board(&self.state.board))
    }

    fn render_scores(&mut self) -> io::Result<()> {
        let scores = self.state.scores;
        writeln!(
            self.output,
            "X {} - O {} - Draws {}",
            scores.x_wins, scores.o_wins, scores.draws
        )
    }
}

fn describe_error(error: MoveError) -> String {
    match error {
        MoveError::OutOfRange { index } => format!("Cell {} does not exist", index + 1),
        MoveError::CellOccupied { index } => format!("Cell {} is already taken", index + 1),
        MoveError::GameOver => "The round is over".to_string(),
    }
}

/// Empty cells show their 1-based number so the player knows what to type.
pub fn render_board(board: &Board) -> String {
    board
        .cells()
        .chunks(3)
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(col, mark)| match mark {
                    Mark::Empty => (row * 3 + col + 1).to_string(),
                    Mark::X => "X".to_string(),
                    Mark::O => "O".to_string(),
                })
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect::<Vec<_>>()
        .join("\n--+---+--\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::games::tictactoe::{Player, TicTacToeSettings};
    use std::io::Cursor;

    fn settings(mode: GameMode) -> TicTacToeSettings {
        TicTacToeSettings {
            mode,
            computer_delay_ms: 0,
            ..TicTacToeSettings::default()
        }
    }

    fn run_script(mode: GameMode, script: &str) -> (String, TicTacToeGameState) {
        let mut output = Vec::new();
        let state = TicTacToeGameState::new(settings(mode));
        let mut game = TerminalGame::new(Cursor::new(script), &mut output, state, SessionRng::new(5));
        game.run().unwrap();
        let TerminalGame { state, .. } = game;
        (String::from_utf8(output).unwrap(), state)
    }

    #[test]
    fn test_parse_cells_are_one_based() {
        assert_eq!(parse_command("1"), Ok(Command::Place(0)));
        assert_eq!(parse_command(" 9 \n"), Ok(Command::Place(8)));
        assert!(parse_command("0").is_err());
        assert!(parse_command("10").is_err());
    }

    #[test]
    fn test_parse_controls() {
        assert_eq!(parse_command("r"), Ok(Command::Reset));
        assert_eq!(parse_command("S"), Ok(Command::Swap));
        assert_eq!(parse_command("mode"), Ok(Command::ToggleMode));
        assert_eq!(
            parse_command("d easy"),
            Ok(Command::SetDifficulty(Difficulty::Easy))
        );
        assert_eq!(parse_command("q"), Ok(Command::Quit));
        assert!(parse_command("d").is_err());
        assert!(parse_command("d brutal").is_err());
        assert!(parse_command("jump").is_err());
    }

    #[test]
    fn test_render_board_numbers_empty_cells() {
        let mut board = Board::new();
        board = board.apply_move(0, Player::X).unwrap();
        board = board.apply_move(4, Player::O).unwrap();

        assert_eq!(
            render_board(&board),
            "X | 2 | 3\n--+---+--\n4 | O | 6\n--+---+--\n7 | 8 | 9"
        );
    }

    #[test]
    fn test_two_player_win_is_announced_and_tallied() {
        let (output, state) = run_script(GameMode::TwoPlayer, "1\n4\n2\n5\n3\nq\n");

        assert!(output.contains("X wins (1-2-3)"));
        assert!(output.contains("X 1 - O 0 - Draws 0"));
        assert!(state.board.is_empty());
        assert_eq!(state.scores.x_wins, 1);
    }

    #[test]
    fn test_occupied_cell_is_reported_and_turn_kept() {
        let (output, state) = run_script(GameMode::TwoPlayer, "5\n5\n");

        assert!(output.contains("Cell 5 is already taken"));
        assert_eq!(state.current_player, Player::O);
    }

    #[test]
    fn test_computer_answers_corner_with_center() {
        let (output, state) = run_script(GameMode::VsComputer, "1\n");

        assert!(output.contains("Computer (O) plays 5"));
        assert_eq!(state.current_player, Player::X);
    }

    #[test]
    fn test_reset_clears_scores() {
        let (output, state) = run_script(GameMode::TwoPlayer, "1\n4\n2\n5\n3\nr\n");

        assert!(output.contains("Board and scores cleared"));
        assert_eq!(state.scores.x_wins, 0);
    }

    #[test]
    fn test_swap_against_computer_lets_it_open() {
        let (output, state) = run_script(GameMode::VsComputer, "s\n");

        assert!(output.contains("O to move"));
        assert!(output.contains("Computer (O) plays 5"));
        assert_eq!(state.current_player, Player::X);
    }

    #[test]
    fn test_toggle_mode_hands_o_to_computer() {
        let (output, state) = run_script(GameMode::TwoPlayer, "1\nm\n");

        assert!(output.contains("Computer opponent: on"));
        assert!(output.contains("Computer (O) plays 5"));
        assert_eq!(state.board.get(4), Some(Mark::O));
    }
}
