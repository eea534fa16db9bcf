//! Pieces, sides, and the direction tables they move along.

use std::fmt;

/// One of the two players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// The other side.
    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Row direction a man of this side moves in.
    #[inline]
    pub const fn forward(self) -> i32 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// Row on which a man of this side is promoted.
    #[inline]
    pub const fn promotion_row(self) -> usize {
        match self {
            Side::White => crate::constants::WHITE_PROMOTION_ROW,
            Side::Black => crate::constants::BLACK_PROMOTION_ROW,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "white"),
            Side::Black => write!(f, "black"),
        }
    }
}

/// Men move forward only; kings move both ways.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Rank {
    Man,
    King,
}

/// A playing token. Immutable; promotion replaces the man with a new king.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub side: Side,
    pub rank: Rank,
}

/// Read-only view of an occupied cell handed to renderers.
pub type PieceView = Piece;

/// A `(row, col)` offset.
pub type Direction = (i32, i32);

const WHITE_MAN_STEPS: [Direction; 2] = [(1, 1), (1, -1)];
const BLACK_MAN_STEPS: [Direction; 2] = [(-1, 1), (-1, -1)];
const KING_STEPS: [Direction; 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const WHITE_MAN_JUMPS: [Direction; 2] = [(2, 2), (2, -2)];
const BLACK_MAN_JUMPS: [Direction; 2] = [(-2, 2), (-2, -2)];
const KING_JUMPS: [Direction; 4] = [(2, 2), (2, -2), (-2, 2), (-2, -2)];

impl Piece {
    pub const fn new(side: Side, rank: Rank) -> Self {
        Self { side, rank }
    }

    pub const fn man(side: Side) -> Self {
        Self::new(side, Rank::Man)
    }

    pub const fn king(side: Side) -> Self {
        Self::new(side, Rank::King)
    }

    #[inline]
    pub const fn is_king(self) -> bool {
        matches!(self.rank, Rank::King)
    }

    /// The king this piece becomes on promotion.
    #[must_use]
    pub const fn promoted(self) -> Self {
        Self::king(self.side)
    }

    /// Single-cell diagonal moves.
    pub const fn steps(self) -> &'static [Direction] {
        match (self.side, self.rank) {
            (Side::White, Rank::Man) => &WHITE_MAN_STEPS,
            (Side::Black, Rank::Man) => &BLACK_MAN_STEPS,
            (_, Rank::King) => &KING_STEPS,
        }
    }

    /// Two-cell capturing moves.
    pub const fn jumps(self) -> &'static [Direction] {
        match (self.side, self.rank) {
            (Side::White, Rank::Man) => &WHITE_MAN_JUMPS,
            (Side::Black, Rank::Man) => &BLACK_MAN_JUMPS,
            (_, Rank::King) => &KING_JUMPS,
        }
    }

    /// Whether a move changing the row by `dr` is allowed for this piece.
    /// Kings go both ways; men only forward.
    #[inline]
    pub const fn may_move_rowwise(self, dr: i32) -> bool {
        self.is_king() || dr.signum() == self.side.forward()
    }

    /// One-letter symbol: `w`/`b` for men, `W`/`B` for kings.
    pub const fn symbol(self) -> char {
        match (self.side, self.rank) {
            (Side::White, Rank::Man) => 'w',
            (Side::Black, Rank::Man) => 'b',
            (Side::White, Rank::King) => 'W',
            (Side::Black, Rank::King) => 'B',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self.rank {
            Rank::Man => "man",
            Rank::King => "king",
        };
        write!(f, "{} {rank}", self.side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_man_steps_are_forward_only() {
        assert_eq!(Piece::man(Side::White).steps(), &[(1, 1), (1, -1)]);
        assert_eq!(Piece::man(Side::Black).steps(), &[(-1, 1), (-1, -1)]);
    }

    #[test]
    fn test_king_steps_all_diagonals() {
        let expected = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
        assert_eq!(Piece::king(Side::White).steps(), &expected);
        assert_eq!(Piece::king(Side::Black).steps(), &expected);
    }

    #[test]
    fn test_jump_tables() {
        assert_eq!(Piece::man(Side::White).jumps(), &[(2, 2), (2, -2)]);
        assert_eq!(Piece::man(Side::Black).jumps(), &[(-2, 2), (-2, -2)]);
        assert_eq!(Piece::king(Side::Black).jumps().len(), 4);
    }

    #[test]
    fn test_promotion_keeps_side() {
        let king = Piece::man(Side::Black).promoted();
        assert_eq!(king.side, Side::Black);
        assert!(king.is_king());
    }

    #[test]
    fn test_may_move_rowwise() {
        let w = Piece::man(Side::White);
        assert!(w.may_move_rowwise(1));
        assert!(w.may_move_rowwise(2));
        assert!(!w.may_move_rowwise(-1));
        let b = Piece::man(Side::Black);
        assert!(b.may_move_rowwise(-2));
        assert!(!b.may_move_rowwise(1));
        assert!(Piece::king(Side::White).may_move_rowwise(-1));
    }

    #[test]
    fn test_opponent_and_symbols() {
        assert_eq!(Side::White.opponent(), Side::Black);
        assert_eq!(Side::Black.opponent(), Side::White);
        assert_eq!(Piece::king(Side::White).symbol(), 'W');
        assert_eq!(Piece::man(Side::Black).to_string(), "black man");
    }
}
