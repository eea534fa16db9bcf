//! Constants for board geometry, the starting layout, and evaluation weights.
//!
//! The board is a cylinder: rows are bounded, columns wrap around modulo
//! [`N`]. All evaluation weights used by [`crate::eval::EvalWeights::default`]
//! are defined here.

use crate::piece::{Piece, Side};

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 8;

/// Board size as a signed value, for coordinate arithmetic.
pub const N_I32: i32 = N as i32;

/// Row a White man promotes on.
pub const WHITE_PROMOTION_ROW: usize = N - 1;

/// Row a Black man promotes on.
pub const BLACK_PROMOTION_ROW: usize = 0;

// =============================================================================
// Starting Layout
// =============================================================================

/// Initial placement as `(row, col, piece)`. Deliberately asymmetric:
/// one White man against two Black men.
pub const INITIAL_PIECES: [(usize, usize, Piece); 3] = [
    (1, 0, Piece::man(Side::White)),
    (6, 1, Piece::man(Side::Black)),
    (7, 0, Piece::man(Side::Black)),
];

// =============================================================================
// Evaluation Weights
// =============================================================================

/// Material value of a man.
pub const W_MAN: f64 = 1.0;

/// Material value of a king (roughly three men).
pub const W_KING: f64 = 2.8;

/// Per legal move difference.
pub const W_MOBILITY: f64 = 0.08;

/// Having a capture available while the opponent has none (and vice versa).
pub const W_CAPTURE: f64 = 1.0;

/// Penalty per own piece that the opponent can take with one jump.
pub const W_THREAT: f64 = 1.0;

/// Promotion progress of men, summed over all men.
pub const W_PROMOTION: f64 = 0.15;

/// Per piece standing in the center window.
pub const W_CENTER: f64 = 0.05;

/// Per diagonally adjacent pair of own pieces.
pub const W_FORMATION: f64 = 0.05;

/// Penalty per prior occurrence of the current position.
pub const W_REPETITION: f64 = 2.0;

/// Occurrences of a position needed before the repetition penalty applies.
pub const REPETITION_THRESHOLD: usize = 2;

/// Rows counted as center (inclusive range).
pub const CENTER_ROWS: std::ops::RangeInclusive<usize> = 2..=5;

/// Columns counted as center (inclusive range).
pub const CENTER_COLS: std::ops::RangeInclusive<usize> = 2..=5;

// =============================================================================
// Self-play
// =============================================================================

/// Ply cap for automated games. Kings can shuffle forever on a cylinder.
pub const MAX_GAME_PLIES: u32 = 200;

/// Seed for the Zobrist key table. Fixed so position keys are stable.
pub const ZOBRIST_SEED: u64 = 0x5EED_C4EC_0000_0008;

// =============================================================================
// Console
// =============================================================================

/// Messages kept for display by the console front end.
pub const MESSAGE_LOG_LEN: usize = 3;
