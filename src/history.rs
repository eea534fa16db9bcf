//! Position keys and the optional repetition history used by the evaluator.
//!
//! Keys are Zobrist hashes over the occupied cells. The side to move is not
//! part of the key: the evaluator asks about board states it produces itself.

use std::sync::OnceLock;

use crate::board::Board;
use crate::constants::{N, ZOBRIST_SEED};
use crate::piece::{Piece, Rank};

/// Anything that can tell how often a position has been seen.
pub trait PositionHistory {
    /// Number of recorded occurrences of the position with this key.
    fn occurrences(&self, key: u64) -> usize;
}

/// Plain list of position keys, one per recorded ply.
#[derive(Debug, Clone, Default)]
pub struct PositionLog {
    keys: Vec<u64>,
}

impl PositionLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the key of a position just reached.
    pub fn record(&mut self, key: u64) {
        self.keys.push(key);
    }

    /// Number of recorded positions.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Forget every recorded position.
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

impl PositionHistory for PositionLog {
    fn occurrences(&self, key: u64) -> usize {
        self.keys.iter().filter(|&&k| k == key).count()
    }
}

/// One random key per (cell, side, rank).
struct ZobristKeys {
    pieces: [[u64; 4]; N * N],
}

static ZOBRIST: OnceLock<ZobristKeys> = OnceLock::new();

fn zobrist() -> &'static ZobristKeys {
    ZOBRIST.get_or_init(|| {
        let mut rng = fastrand::Rng::with_seed(ZOBRIST_SEED);
        let mut pieces = [[0u64; 4]; N * N];
        for cell in &mut pieces {
            for key in cell.iter_mut() {
                *key = rng.u64(..);
            }
        }
        ZobristKeys { pieces }
    })
}

#[inline]
fn piece_index(piece: Piece) -> usize {
    piece.side.index() * 2
        + match piece.rank {
            Rank::Man => 0,
            Rank::King => 1,
        }
}

/// Zobrist key of the board's piece placement.
pub fn position_key(board: &Board) -> u64 {
    let keys = zobrist();
    board
        .occupied()
        .fold(0, |h, (r, c, p)| h ^ keys.pieces[r * N + c][piece_index(p)])
}
