//! Turn engine: the single entry point that advances a game by one ply.
//!
//! [`Game::play_turn`] validates a requested move against the side to move,
//! the move shape and mandatory capture, then executes it, promotes, and
//! hands the turn over. A capture always ends the turn, even if the same
//! piece could jump again.

use log::debug;

use crate::board::{Board, GameStatus, Move, MoveError, in_bounds, wrap_col};
use crate::eval::EvalWeights;
use crate::history::{PositionHistory, PositionLog, position_key};
use crate::piece::{PieceView, Side};
use crate::selector::select_move;

/// Whose turn it is and how many plies have been played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnState {
    pub current_side: Side,
    pub plies: u32,
}

impl Default for TurnState {
    fn default() -> Self {
        Self {
            current_side: Side::White,
            plies: 0,
        }
    }
}

/// Shape of a requested move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveShape {
    Step,
    Jump,
}

fn classify(dr: i32, dc: usize) -> Result<MoveShape, MoveError> {
    match (dr.abs(), dc) {
        (2, 2 | 6) => Ok(MoveShape::Jump),
        (1, 1 | 7) => Ok(MoveShape::Step),
        _ => Err(MoveError::InvalidMoveShape),
    }
}

/// A game in progress.
pub struct Game {
    board: Board,
    turn: TurnState,
    weights: EvalWeights,
    rng: fastrand::Rng,
    log: PositionLog,
    track_repetition: bool,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Start a new game: the initial board and White to move.
pub fn new_game() -> (Board, TurnState) {
    (Board::new(), TurnState::default())
}

impl Game {
    /// New game from the starting layout with an entropy-seeded RNG.
    pub fn new() -> Self {
        let (board, turn) = new_game();
        Self::from_parts(board, turn, fastrand::Rng::new())
    }

    /// New game whose AI tie-breaks are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        let (board, turn) = new_game();
        Self::from_parts(board, turn, fastrand::Rng::with_seed(seed))
    }

    /// Game continuing from a prepared position.
    pub fn from_board(board: Board, to_move: Side) -> Self {
        let turn = TurnState {
            current_side: to_move,
            plies: 0,
        };
        Self::from_parts(board, turn, fastrand::Rng::new())
    }

    fn from_parts(board: Board, turn: TurnState, rng: fastrand::Rng) -> Self {
        let mut log = PositionLog::new();
        log.record(position_key(&board));
        Self {
            board,
            turn,
            weights: EvalWeights::default(),
            rng,
            log,
            track_repetition: false,
        }
    }

    /// Replace the tie-break RNG seed.
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = fastrand::Rng::with_seed(seed);
    }

    /// Evaluation weights used by [`Game::select_ai_move`] from now on.
    pub fn set_weights(&mut self, weights: EvalWeights) {
        self.weights = weights;
    }

    /// Feed the game's own position log to the evaluator. Off by default.
    pub fn set_repetition_tracking(&mut self, enabled: bool) {
        self.track_repetition = enabled;
    }

    /// Start over from the initial position, keeping weights and RNG.
    pub fn reset(&mut self) {
        let (board, turn) = new_game();
        self.board = board;
        self.turn = turn;
        self.log.clear();
        self.log.record(position_key(&self.board));
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move and plies played so far.
    pub fn turn(&self) -> TurnState {
        self.turn
    }

    /// Side to move.
    pub fn current_side(&self) -> Side {
        self.turn.current_side
    }

    /// Keys of every position reached, including the starting one.
    pub fn history(&self) -> &PositionLog {
        &self.log
    }

    /// Piece on a cell, for rendering.
    pub fn cell_at(&self, row: usize, col: usize) -> Option<PieceView> {
        self.board.cell_at(row, col)
    }

    pub fn check_game_status(&self) -> GameStatus {
        self.board.check_game_status()
    }

    /// Play one move for the side to move.
    ///
    /// # Errors
    /// A [`MoveError`] naming the violated rule. Nothing changes on error.
    pub fn play_turn(&mut self, r1: i32, c1: i32, r2: i32, c2: i32) -> Result<(), MoveError> {
        if !in_bounds(r1) || !in_bounds(r2) {
            return Err(MoveError::OffBoard);
        }
        let (c1, c2) = (wrap_col(c1), wrap_col(c2));
        let (r1u, r2u) = (r1 as usize, r2 as usize);
        let side = self.turn.current_side;

        let piece = self.board.cell_at(r1u, c1).ok_or(MoveError::EmptySource)?;
        if piece.side != side {
            return Err(MoveError::WrongSideToMove);
        }

        let dr = r2 - r1;
        let dc = (c2 as i32 - c1 as i32).rem_euclid(crate::constants::N_I32) as usize;
        match classify(dr, dc)? {
            MoveShape::Jump => {
                self.board.perform_jump(r1, c1 as i32, r2, c2 as i32)?;
            }
            MoveShape::Step => {
                if self.board.has_capture_available(side) {
                    return Err(MoveError::MandatoryCaptureAvailable);
                }
                if !self.board.is_empty(r2, c2 as i32) {
                    return Err(MoveError::DestinationOccupied);
                }
                if !piece.may_move_rowwise(dr) {
                    return Err(MoveError::BackwardMoveDenied);
                }
                self.board.remove(r1u, c1);
                self.board.place(r2u, c2, piece);
            }
        }

        if !piece.is_king() && r2u == side.promotion_row() {
            self.board.place(r2u, c2, piece.promoted());
            debug!("{side} man promoted on {r2u},{c2}");
        }

        debug!("{side} played {}", Move::new(r1u, c1, r2u, c2));
        self.turn.current_side = side.opponent();
        self.turn.plies += 1;
        self.log.record(position_key(&self.board));
        Ok(())
    }

    /// Choose a move for `side` without playing it.
    pub fn select_ai_move(&mut self, side: Side) -> Option<Move> {
        let history: Option<&dyn PositionHistory> = if self.track_repetition {
            Some(&self.log)
        } else {
            None
        };
        select_move(&mut self.board, side, &self.weights, history, &mut self.rng)
    }

    /// Let the engine move for the side to move.
    ///
    /// Returns `Ok(None)` when that side has no legal move.
    pub fn play_ai_turn(&mut self) -> Result<Option<Move>, MoveError> {
        let Some(mv) = self.select_ai_move(self.turn.current_side) else {
            return Ok(None);
        };
        let (r1, c1, r2, c2) = mv.coords();
        self.play_turn(r1, c1, r2, c2)?;
        Ok(Some(mv))
    }
}
