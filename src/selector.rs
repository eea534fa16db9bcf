//! One-ply move selection for an automated side.
//!
//! Each candidate is played on the shared board with [`Board::apply_trial`],
//! scored with [`evaluate`], and taken back before the next one is tried.
//! The best-scoring move wins; exact ties are broken with the caller's RNG.

use log::{debug, trace};

use crate::board::{Board, Move};
use crate::eval::{EvalWeights, evaluate};
use crate::history::PositionHistory;
use crate::piece::Side;

/// Moves `side` may legally choose from: the jumps if any exist, else the steps.
pub fn candidate_moves(board: &Board, side: Side) -> Vec<Move> {
    if board.has_capture_available(side) {
        board.legal_jumps(side)
    } else {
        board.legal_steps(side)
    }
}

/// Score every candidate for `side` by looking one ply ahead.
///
/// The board is returned exactly as it was passed in.
pub fn score_moves(
    board: &mut Board,
    side: Side,
    weights: &EvalWeights,
    history: Option<&dyn PositionHistory>,
) -> Vec<(Move, f64)> {
    let candidates = candidate_moves(board, side);
    let mut scored = Vec::with_capacity(candidates.len());
    for mv in candidates {
        let undo = board.apply_trial(mv);
        let score = evaluate(board, side, weights, history);
        board.undo(undo);
        trace!("{side} candidate {mv} scores {score:.3}");
        scored.push((mv, score));
    }
    scored
}

/// Pick a move for `side`, or `None` if it has no legal move.
pub fn select_move(
    board: &mut Board,
    side: Side,
    weights: &EvalWeights,
    history: Option<&dyn PositionHistory>,
    rng: &mut fastrand::Rng,
) -> Option<Move> {
    let scored = score_moves(board, side, weights, history);
    let best = scored
        .iter()
        .map(|&(_, s)| s)
        .fold(f64::NEG_INFINITY, f64::max);
    let best_moves: Vec<Move> = scored
        .iter()
        .filter(|&&(_, s)| s == best)
        .map(|&(mv, _)| mv)
        .collect();

    if best_moves.is_empty() {
        debug!("{side} has no move to choose");
        return None;
    }
    let mv = best_moves[rng.usize(..best_moves.len())];
    debug!(
        "{side} picks {mv} (score {best:.3}, {} tied of {})",
        best_moves.len(),
        scored.len()
    );
    Some(mv)
}
