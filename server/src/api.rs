use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::games::SessionRng;
use common::games::tictactoe::{
    Board, BoardError, Difficulty, LINES, Line, Player, Verdict, select_move,
};
use common::log_debug;
use serde::{Deserialize, Serialize};

/// Cells as the web page keeps them: `null`, `"X"` or `"O"`.
pub type WireBoard = Vec<Option<Player>>;

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub board: WireBoard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictKind {
    Ongoing,
    Win,
    Draw,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct EvaluateResponse {
    pub verdict: VerdictKind,
    pub winner: Option<Player>,
    pub line: Option<Line>,
}

impl From<Verdict> for EvaluateResponse {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Ongoing => Self {
                verdict: VerdictKind::Ongoing,
                winner: None,
                line: None,
            },
            Verdict::Win { player, line } => Self {
                verdict: VerdictKind::Win,
                winner: Some(player),
                line: Some(line),
            },
            Verdict::Draw => Self {
                verdict: VerdictKind::Draw,
                winner: None,
                line: None,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub board: WireBoard,
    pub player: Player,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Fixes the random source for the easy and medium levels.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct MoveResponse {
    pub index: Option<usize>,
}

#[derive(Debug)]
pub struct ApiError(BoardError);

impl From<BoardError> for ApiError {
    fn from(e: BoardError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.0.to_string()).into_response()
    }
}

pub async fn evaluate_handler(
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    let board = Board::try_from(request.board.as_slice())?;
    Ok(Json(board.evaluate().into()))
}

pub async fn move_handler(
    Json(request): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, ApiError> {
    let board = Board::try_from(request.board.as_slice())?;

    if board.evaluate().is_terminal() {
        return Ok(Json(MoveResponse { index: None }));
    }

    let mut rng = match request.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    let index = select_move(&board, request.player, request.difficulty, &mut rng);
    log_debug!(
        "Move request for {} at {}: {:?}",
        request.player,
        request.difficulty,
        index
    );

    Ok(Json(MoveResponse { index }))
}

pub async fn lines_handler() -> Json<[Line; 8]> {
    Json(LINES)
}
