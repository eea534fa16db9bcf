//! Static evaluation of a position from one side's point of view.
//!
//! The score is a weighted sum of independent terms:
//!
//! 1. material (kings worth [`W_KING`] men),
//! 2. mobility, counting jumps when any exist and steps otherwise,
//! 3. capture pressure and pieces hanging to an opponent jump,
//! 4. promotion progress of men,
//! 5. center occupation and diagonal formations,
//! 6. a repetition penalty, only when a [`PositionHistory`] is supplied.
//!
//! Positive scores favor `me`.

use crate::board::{Board, middle_column};
use crate::constants::*;
use crate::history::{PositionHistory, position_key};
use crate::piece::{Rank, Side};

/// Weights of the evaluation terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalWeights {
    pub man: f64,
    pub king: f64,
    pub mobility: f64,
    pub capture: f64,
    pub threat: f64,
    pub promotion: f64,
    pub center: f64,
    pub formation: f64,
    pub repetition: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            man: W_MAN,
            king: W_KING,
            mobility: W_MOBILITY,
            capture: W_CAPTURE,
            threat: W_THREAT,
            promotion: W_PROMOTION,
            center: W_CENTER,
            formation: W_FORMATION,
            repetition: W_REPETITION,
        }
    }
}

/// Weighted value of every term, already signed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EvalTerms {
    pub material: f64,
    pub mobility: f64,
    pub capture_pressure: f64,
    pub threat_penalty: f64,
    pub promotion: f64,
    pub center: f64,
    pub formation: f64,
    pub repetition: f64,
}

impl EvalTerms {
    /// Sum of all terms, as returned by [`evaluate`].
    pub fn total(&self) -> f64 {
        self.material
            + self.mobility
            + self.capture_pressure
            + self.threat_penalty
            + self.promotion
            + self.center
            + self.formation
            + self.repetition
    }
}

/// Score the board for `me`.
pub fn evaluate(
    board: &Board,
    me: Side,
    weights: &EvalWeights,
    history: Option<&dyn PositionHistory>,
) -> f64 {
    evaluate_terms(board, me, weights, history).total()
}

/// Score the board for `me`, keeping the individual terms.
pub fn evaluate_terms(
    board: &Board,
    me: Side,
    weights: &EvalWeights,
    history: Option<&dyn PositionHistory>,
) -> EvalTerms {
    let op = me.opponent();

    let (my_men, my_kings) = count_material(board, me);
    let (op_men, op_kings) = count_material(board, op);
    let material = (weights.man * my_men as f64 + weights.king * my_kings as f64)
        - (weights.man * op_men as f64 + weights.king * op_kings as f64);

    let mobility = weights.mobility
        * (count_legal_moves(board, me) as f64 - count_legal_moves(board, op) as f64);

    let my_capture = u8::from(board.has_capture_available(me));
    let op_capture = u8::from(board.has_capture_available(op));
    let capture_pressure = weights.capture * (f64::from(my_capture) - f64::from(op_capture));

    let threat_penalty = -weights.threat * count_threatened_pieces(board, me) as f64;

    let promotion =
        weights.promotion * (promotion_progress(board, me) - promotion_progress(board, op));

    let center =
        weights.center * (count_in_center(board, me) as f64 - count_in_center(board, op) as f64);

    let formation = weights.formation
        * (formation_pairs(board, me) as f64 - formation_pairs(board, op) as f64);

    let repetition = history.map_or(0.0, |h| {
        let repeats = h.occurrences(position_key(board));
        if repeats >= REPETITION_THRESHOLD {
            -weights.repetition * repeats as f64
        } else {
            0.0
        }
    });

    EvalTerms {
        material,
        mobility,
        capture_pressure,
        threat_penalty,
        promotion,
        center,
        formation,
        repetition,
    }
}

/// `(men, kings)` owned by `side`.
pub fn count_material(board: &Board, side: Side) -> (usize, usize) {
    board
        .pieces(side)
        .fold((0, 0), |(men, kings), (_, _, p)| match p.rank {
            Rank::Man => (men + 1, kings),
            Rank::King => (men, kings + 1),
        })
}

/// Legal move count under mandatory capture: jumps if any exist, else steps.
pub fn count_legal_moves(board: &Board, side: Side) -> usize {
    let jumps = board.legal_jumps(side).len();
    if jumps > 0 {
        jumps
    } else {
        board.legal_steps(side).len()
    }
}

/// How many distinct pieces of `side` the opponent could take with one jump.
pub fn count_threatened_pieces(board: &Board, side: Side) -> usize {
    let mut hit = [[false; N]; N];
    for mv in board.legal_jumps(side.opponent()) {
        let mid_row = (mv.from_row as usize + mv.to_row as usize) / 2;
        if let Ok(mid_col) = middle_column(mv.from_col as i32, mv.to_col as i32) {
            hit[mid_row][mid_col] = true;
        }
    }
    hit.iter().flatten().filter(|&&h| h).count()
}

/// Summed progress of `side`'s men toward their promotion row, each in 0..=1.
pub fn promotion_progress(board: &Board, side: Side) -> f64 {
    let last = (N - 1) as f64;
    board
        .pieces(side)
        .filter(|(_, _, p)| p.rank == Rank::Man)
        .map(|(r, _, _)| match side {
            Side::White => r as f64 / last,
            Side::Black => (last - r as f64) / last,
        })
        .sum()
}

/// Pieces of `side` inside the center window.
pub fn count_in_center(board: &Board, side: Side) -> usize {
    board
        .pieces(side)
        .filter(|(r, c, _)| CENTER_ROWS.contains(r) && CENTER_COLS.contains(c))
        .count()
}

/// Unordered pairs of `side`'s pieces that touch diagonally (columns wrap).
pub fn formation_pairs(board: &Board, side: Side) -> usize {
    let touching: usize = board
        .pieces(side)
        .map(|(r, c, _)| {
            [(1, 1), (1, -1), (-1, 1), (-1, -1)]
                .iter()
                .filter(|&&(dr, dc)| {
                    board
                        .get(r as i32 + dr, c as i32 + dc)
                        .is_some_and(|p| p.side == side)
                })
                .count()
        })
        .sum();
    // each pair is seen from both ends
    touching / 2
}
