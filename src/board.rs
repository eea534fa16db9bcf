//! Cylindrical 8x8 board: occupancy, wrap-aware geometry, and jump execution.
//!
//! Rows run from 0 (White's home side) to 7 and are bounded. Columns wrap:
//! stepping off column 7 lands on column 0 and vice versa, so every column
//! is reduced with [`wrap_col`] before it is used.

use std::fmt;

use crate::constants::{INITIAL_PIECES, N, N_I32};
use crate::piece::{Piece, PieceView, Side};

/// A rule violation. Every failing operation leaves the board untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// No piece on the source cell
    EmptySource,
    /// The piece on the source cell belongs to the side not on move
    WrongSideToMove,
    /// Neither a one-cell step nor a two-cell jump
    InvalidMoveShape,
    /// A jump must cover exactly two rows
    InvalidJumpGeometry,
    /// Men only move toward the opponent's home row
    BackwardMoveDenied,
    /// Nothing to capture between source and destination
    NoVictim,
    /// The jumped piece belongs to the mover
    FriendlyFireDenied,
    /// The destination cell is taken
    DestinationOccupied,
    /// A capture exists, so a plain step is not allowed
    MandatoryCaptureAvailable,
    /// Columns are not two apart on the cylinder
    InvalidColumnDelta,
    /// Row outside 0..8
    OffBoard,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::EmptySource => write!(f, "no piece on the source cell"),
            MoveError::WrongSideToMove => write!(f, "cannot move the opponent's piece"),
            MoveError::InvalidMoveShape => write!(f, "invalid move"),
            MoveError::InvalidJumpGeometry => {
                write!(f, "invalid jump: rows must differ by exactly 2")
            }
            MoveError::BackwardMoveDenied => write!(f, "a man cannot move backward"),
            MoveError::NoVictim => write!(f, "there is no piece to jump over"),
            MoveError::FriendlyFireDenied => write!(f, "cannot jump over your own piece"),
            MoveError::DestinationOccupied => write!(f, "destination cell is not empty"),
            MoveError::MandatoryCaptureAvailable => {
                write!(f, "a jump is available and must be taken")
            }
            MoveError::InvalidColumnDelta => {
                write!(f, "invalid column shift: must be +2 or -2")
            }
            MoveError::OffBoard => write!(f, "row is outside the board"),
        }
    }
}

impl std::error::Error for MoveError {}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The loser has no pieces left
    NoPieces,
    /// The loser has pieces but none of them can move
    Blocked,
}

/// Result of [`Board::check_game_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Continue,
    GameOver { winner: Side, reason: EndReason },
}

impl GameStatus {
    /// True for any [`GameStatus::GameOver`].
    #[inline]
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::GameOver { .. })
    }

    /// The winning side, if the game is over.
    pub fn winner(self) -> Option<Side> {
        match self {
            GameStatus::Continue => None,
            GameStatus::GameOver { winner, .. } => Some(winner),
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Continue => write!(f, "continue"),
            GameStatus::GameOver { winner, reason } => {
                let why = match reason {
                    EndReason::NoPieces => "no pieces left",
                    EndReason::Blocked => "opponent is blocked",
                };
                write!(f, "game over: {winner} wins ({why})")
            }
        }
    }
}

/// A move between two cells. Columns are always stored normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from_row: u8,
    pub from_col: u8,
    pub to_row: u8,
    pub to_col: u8,
}

impl Move {
    pub fn new(from_row: usize, from_col: usize, to_row: usize, to_col: usize) -> Self {
        Self {
            from_row: from_row as u8,
            from_col: (from_col % N) as u8,
            to_row: to_row as u8,
            to_col: (to_col % N) as u8,
        }
    }

    #[inline]
    pub fn is_jump(self) -> bool {
        self.from_row.abs_diff(self.to_row) == 2
    }

    /// `(r1, c1, r2, c2)` in the form [`crate::game::Game::play_turn`] takes.
    pub fn coords(self) -> (i32, i32, i32, i32) {
        (
            self.from_row as i32,
            self.from_col as i32,
            self.to_row as i32,
            self.to_col as i32,
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{} -> {},{}",
            self.from_row, self.from_col, self.to_row, self.to_col
        )
    }
}

/// Everything needed to take back a move made with [`Board::apply_trial`].
#[derive(Debug, Clone, Copy)]
pub struct Undo {
    mv: Move,
    source: Option<Piece>,
    target: Option<Piece>,
    captured: Option<(usize, usize, Option<Piece>)>,
}

/// Reduce a column onto the cylinder.
#[inline]
pub fn wrap_col(col: i32) -> usize {
    col.rem_euclid(N_I32) as usize
}

/// Whether a row lies on the board. Columns never leave the board.
#[inline]
pub fn in_bounds(row: i32) -> bool {
    (0..N_I32).contains(&row)
}

/// The column strictly between two columns that are two apart on the
/// cylinder, following the short way round.
pub fn middle_column(c1: i32, c2: i32) -> Result<usize, MoveError> {
    match (c2 - c1).rem_euclid(N_I32) {
        2 => Ok(wrap_col(c1 + 1)),
        6 => Ok(wrap_col(c1 - 1)),
        _ => Err(MoveError::InvalidColumnDelta),
    }
}

/// The 8x8 playing surface, indexed `[row][col]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Piece>; N]; N],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Board with the starting layout.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for (row, col, piece) in INITIAL_PIECES {
            board.place(row, col, piece);
        }
        board
    }

    /// Board with no pieces at all.
    pub fn empty() -> Self {
        Self {
            cells: [[None; N]; N],
        }
    }

    /// Piece at `(row, col)`, or `None` for an empty cell or a row off the board.
    #[inline]
    pub fn get(&self, row: i32, col: i32) -> Option<Piece> {
        if !in_bounds(row) {
            return None;
        }
        self.cells[row as usize][wrap_col(col)]
    }

    /// Snapshot accessor for renderers. Rows off the board read as empty.
    #[inline]
    pub fn cell_at(&self, row: usize, col: usize) -> Option<PieceView> {
        self.cells.get(row)?[col % N]
    }

    /// Put a piece on a cell, replacing whatever was there.
    pub fn place(&mut self, row: usize, col: usize, piece: Piece) {
        self.cells[row][col % N] = Some(piece);
    }

    /// Clear a cell, returning its previous content.
    pub fn remove(&mut self, row: usize, col: usize) -> Option<Piece> {
        self.cells[row][col % N].take()
    }

    /// True iff the cell is on the board and holds no piece.
    #[inline]
    pub fn is_empty(&self, row: i32, col: i32) -> bool {
        in_bounds(row) && self.cells[row as usize][wrap_col(col)].is_none()
    }

    /// All occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(c, cell)| cell.map(|p| (r, c, p)))
        })
    }

    /// Cells occupied by `side`, in row-major order.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (usize, usize, Piece)> + '_ {
        self.occupied().filter(move |(_, _, p)| p.side == side)
    }

    /// `(white, black)` piece counts.
    pub fn count_pieces(&self) -> (usize, usize) {
        self.occupied()
            .fold((0, 0), |(w, b), (_, _, p)| match p.side {
                Side::White => (w + 1, b),
                Side::Black => (w, b + 1),
            })
    }

    /// Execute one capturing jump.
    ///
    /// On success the jumping piece lands on the destination, source and
    /// victim cells are cleared, and the fresh game status is returned.
    /// Promotion is left to the caller.
    ///
    /// # Errors
    /// Any [`MoveError`] describing why the jump is illegal. The board is
    /// unchanged in that case.
    pub fn perform_jump(
        &mut self,
        r1: i32,
        c1: i32,
        r2: i32,
        c2: i32,
    ) -> Result<GameStatus, MoveError> {
        if !in_bounds(r1) || !in_bounds(r2) {
            return Err(MoveError::OffBoard);
        }
        let (c1, c2) = (wrap_col(c1), wrap_col(c2));
        let (r1u, r2u) = (r1 as usize, r2 as usize);

        let piece = self.cells[r1u][c1].ok_or(MoveError::EmptySource)?;
        let dr = r2 - r1;
        if dr.abs() != 2 {
            return Err(MoveError::InvalidJumpGeometry);
        }
        let mid_col = middle_column(c1 as i32, c2 as i32)?;
        if !piece.may_move_rowwise(dr) {
            return Err(MoveError::BackwardMoveDenied);
        }
        let mid_row = ((r1 + r2) / 2) as usize;
        let victim = self.cells[mid_row][mid_col].ok_or(MoveError::NoVictim)?;
        if victim.side == piece.side {
            return Err(MoveError::FriendlyFireDenied);
        }
        if self.cells[r2u][c2].is_some() {
            return Err(MoveError::DestinationOccupied);
        }

        self.cells[r2u][c2] = Some(piece);
        self.cells[r1u][c1] = None;
        self.cells[mid_row][mid_col] = None;

        Ok(self.check_game_status())
    }

    /// Legal jumps of the piece on `(row, col)`.
    fn piece_jumps(&self, row: usize, col: usize, piece: Piece) -> impl Iterator<Item = Move> + '_ {
        let (r, c) = (row as i32, col as i32);
        piece.jumps().iter().filter_map(move |&(dr, dc)| {
            let (tr, tc) = (r + dr, c + dc);
            if !self.is_empty(tr, tc) || !piece.may_move_rowwise(dr) {
                return None;
            }
            let victim = self.get(r + dr / 2, c + dc / 2)?;
            (victim.side != piece.side).then(|| Move::new(row, col, tr as usize, wrap_col(tc)))
        })
    }

    /// Legal non-capturing steps of the piece on `(row, col)`.
    fn piece_steps(&self, row: usize, col: usize, piece: Piece) -> impl Iterator<Item = Move> + '_ {
        let (r, c) = (row as i32, col as i32);
        piece.steps().iter().filter_map(move |&(dr, dc)| {
            let (tr, tc) = (r + dr, c + dc);
            (self.is_empty(tr, tc) && piece.may_move_rowwise(dr))
                .then(|| Move::new(row, col, tr as usize, wrap_col(tc)))
        })
    }

    /// Every legal jump for `side`, scanning the board row by row.
    pub fn legal_jumps(&self, side: Side) -> Vec<Move> {
        self.pieces(side)
            .flat_map(|(r, c, p)| self.piece_jumps(r, c, p))
            .collect()
    }

    /// Every legal step for `side`, ignoring mandatory capture.
    pub fn legal_steps(&self, side: Side) -> Vec<Move> {
        self.pieces(side)
            .flat_map(|(r, c, p)| self.piece_steps(r, c, p))
            .collect()
    }

    /// True iff some piece of `side` can jump.
    pub fn has_capture_available(&self, side: Side) -> bool {
        self.pieces(side)
            .any(|(r, c, p)| self.piece_jumps(r, c, p).next().is_some())
    }

    /// True iff `side` has at least one legal step or jump.
    pub fn has_any_legal_move(&self, side: Side) -> bool {
        self.pieces(side).any(|(r, c, p)| {
            self.piece_jumps(r, c, p).next().is_some() || self.piece_steps(r, c, p).next().is_some()
        })
    }

    /// Decide whether the game is over.
    ///
    /// Piece counts are checked first, then whether White is blocked, then
    /// whether Black is blocked.
    pub fn check_game_status(&self) -> GameStatus {
        let (white, black) = self.count_pieces();
        if black == 0 {
            return GameStatus::GameOver {
                winner: Side::White,
                reason: EndReason::NoPieces,
            };
        }
        if white == 0 {
            return GameStatus::GameOver {
                winner: Side::Black,
                reason: EndReason::NoPieces,
            };
        }
        if !self.has_any_legal_move(Side::White) {
            return GameStatus::GameOver {
                winner: Side::Black,
                reason: EndReason::Blocked,
            };
        }
        if !self.has_any_legal_move(Side::Black) {
            return GameStatus::GameOver {
                winner: Side::White,
                reason: EndReason::Blocked,
            };
        }
        GameStatus::Continue
    }

    /// Make a move without validating it or promoting, for lookahead.
    /// The returned [`Undo`] restores the board exactly.
    pub fn apply_trial(&mut self, mv: Move) -> Undo {
        let (fr, fc) = (mv.from_row as usize, mv.from_col as usize);
        let (tr, tc) = (mv.to_row as usize, mv.to_col as usize);

        let source = self.cells[fr][fc].take();
        let target = self.cells[tr][tc];
        self.cells[tr][tc] = source;

        // A jump whose columns are not two apart has no victim to lift
        let captured = if mv.is_jump() {
            let mr = (fr + tr) / 2;
            middle_column(fc as i32, tc as i32)
                .ok()
                .map(|mc| (mr, mc, self.cells[mr][mc].take()))
        } else {
            None
        };

        Undo {
            mv,
            source,
            target,
            captured,
        }
    }

    /// Take back a move made with [`Board::apply_trial`].
    pub fn undo(&mut self, undo: Undo) {
        let mv = undo.mv;
        self.cells[mv.from_row as usize][mv.from_col as usize] = undo.source;
        self.cells[mv.to_row as usize][mv.to_col as usize] = undo.target;
        if let Some((mr, mc, piece)) = undo.captured {
            self.cells[mr][mc] = piece;
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..N).rev() {
            write!(f, "{row} ")?;
            for col in 0..N {
                let ch = self.cells[row][col].map_or('.', Piece::symbol);
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for col in 0..N {
            write!(f, "{col} ")?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setpos(pieces: &[(usize, usize, Piece)]) -> Board {
        let mut board = Board::empty();
        for &(r, c, p) in pieces {
            board.place(r, c, p);
        }
        board
    }

    const WM: Piece = Piece::man(Side::White);
    const BM: Piece = Piece::man(Side::Black);
    const WK: Piece = Piece::king(Side::White);

    #[test]
    fn test_initial_layout() {
        let board = Board::new();
        assert_eq!(board.get(1, 0), Some(WM));
        assert_eq!(board.get(6, 1), Some(BM));
        assert_eq!(board.get(7, 0), Some(BM));
        assert_eq!(board.count_pieces(), (1, 2));
    }

    #[test]
    fn test_wrap_col() {
        for c in -16..24 {
            assert_eq!(wrap_col(c), c.rem_euclid(8) as usize);
            assert_eq!(wrap_col(c), wrap_col(c + 8));
        }
        assert_eq!(wrap_col(8), 0);
        assert_eq!(wrap_col(-1), 7);
    }

    #[test]
    fn test_in_bounds() {
        assert!(in_bounds(0));
        assert!(in_bounds(7));
        assert!(!in_bounds(8));
        assert!(!in_bounds(-1));
    }

    #[test]
    fn test_is_empty_wraps_columns() {
        let board = setpos(&[(3, 7, BM)]);
        assert!(!board.is_empty(3, 7));
        assert!(!board.is_empty(3, -1));
        assert!(!board.is_empty(3, 15));
        assert!(board.is_empty(3, 0));
        assert!(!board.is_empty(8, 0));
    }

    #[test]
    fn test_middle_column() {
        assert_eq!(middle_column(2, 4), Ok(3));
        assert_eq!(middle_column(4, 2), Ok(3));
        assert_eq!(middle_column(0, 6), Ok(7));
        assert_eq!(middle_column(7, 1), Ok(0));
        assert_eq!(middle_column(0, 3), Err(MoveError::InvalidColumnDelta));
        assert_eq!(middle_column(5, 5), Err(MoveError::InvalidColumnDelta));
    }

    #[test]
    fn test_middle_column_adjacent_to_both() {
        for c1 in 0..8 {
            for c2 in [c1 + 2, c1 - 2] {
                let m = middle_column(c1, c2).unwrap() as i32;
                let d1 = (m - c1).rem_euclid(8);
                let d2 = (m - c2).rem_euclid(8);
                assert!(d1 == 1 || d1 == 7, "c1={c1} c2={c2} m={m}");
                assert!(d2 == 1 || d2 == 7, "c1={c1} c2={c2} m={m}");
            }
        }
    }

    #[test]
    fn test_perform_jump_basic() {
        let mut board = setpos(&[(2, 2, WM), (3, 3, BM)]);
        let status = board.perform_jump(2, 2, 4, 4).unwrap();
        assert!(board.get(2, 2).is_none());
        assert!(board.get(3, 3).is_none());
        assert_eq!(board.get(4, 4), Some(WM));
        assert_eq!(
            status,
            GameStatus::GameOver {
                winner: Side::White,
                reason: EndReason::NoPieces
            }
        );
    }

    #[test]
    fn test_perform_jump_errors_leave_board_untouched() {
        let board = setpos(&[(2, 2, WM), (3, 3, BM), (3, 1, WM), (5, 5, BM), (4, 6, BM)]);
        let cases = [
            ((4, 4, 6, 6), MoveError::EmptySource),
            ((2, 2, 3, 3), MoveError::InvalidJumpGeometry),
            ((2, 2, 4, 5), MoveError::InvalidColumnDelta),
            ((5, 5, 7, 7), MoveError::BackwardMoveDenied),
            ((2, 2, 4, 0), MoveError::FriendlyFireDenied),
            ((3, 1, 5, 3), MoveError::NoVictim),
            ((2, 2, 9, 4), MoveError::OffBoard),
        ];
        for ((r1, c1, r2, c2), expected) in cases {
            let mut b = board.clone();
            assert_eq!(b.perform_jump(r1, c1, r2, c2), Err(expected), "{r1},{c1}->{r2},{c2}");
            assert_eq!(b, board);
        }
    }

    #[test]
    fn test_perform_jump_destination_occupied() {
        let mut board = setpos(&[(2, 2, WM), (3, 3, BM), (4, 4, BM)]);
        assert_eq!(
            board.perform_jump(2, 2, 4, 4),
            Err(MoveError::DestinationOccupied)
        );
    }

    #[test]
    fn test_perform_jump_across_wrap() {
        let mut board = setpos(&[(2, 0, WM), (3, 7, BM), (0, 4, BM)]);
        assert!(board.perform_jump(2, 0, 4, 6).is_ok());
        assert!(board.get(2, 0).is_none());
        assert!(board.get(3, 7).is_none());
        assert_eq!(board.get(4, 6), Some(WM));
    }

    #[test]
    fn test_king_jumps_backward() {
        let mut board = setpos(&[(4, 4, WK), (3, 3, BM), (7, 7, BM)]);
        assert!(board.perform_jump(4, 4, 2, 2).is_ok());
        assert_eq!(board.get(2, 2), Some(WK));
    }

    #[test]
    fn test_legal_moves_enumeration() {
        let board = setpos(&[(2, 0, WM), (3, 7, BM), (3, 1, WM)]);
        let jumps = board.legal_jumps(Side::White);
        assert_eq!(jumps, vec![Move::new(2, 0, 4, 6)]);
        assert!(board.has_capture_available(Side::White));
        assert!(!board.has_capture_available(Side::Black));

        let steps = board.legal_steps(Side::White);
        // (2,0) is hemmed in on both sides; (3,1) has two steps
        assert_eq!(steps.len(), 2);
        assert!(steps.iter().all(|m| !m.is_jump()));
    }

    #[test]
    fn test_blocked_white_man() {
        let board = setpos(&[(1, 1, WM), (2, 0, BM), (2, 2, BM), (3, 3, BM), (3, 7, BM)]);
        assert!(!board.has_any_legal_move(Side::White));
        assert!(board.has_any_legal_move(Side::Black));
        assert_eq!(
            board.check_game_status(),
            GameStatus::GameOver {
                winner: Side::Black,
                reason: EndReason::Blocked
            }
        );
    }

    #[test]
    fn test_man_on_last_row_is_blocked() {
        let board = setpos(&[(7, 3, WM), (0, 3, BM)]);
        assert!(!board.has_any_legal_move(Side::White));
        assert!(!board.has_any_legal_move(Side::Black));
        // White is checked first
        assert_eq!(board.check_game_status().winner(), Some(Side::Black));
    }

    #[test]
    fn test_status_continue() {
        assert_eq!(Board::new().check_game_status(), GameStatus::Continue);
    }

    #[test]
    fn test_apply_trial_and_undo_restore_exactly() {
        let original = setpos(&[(2, 0, WM), (3, 7, BM), (5, 5, BM)]);
        let mut board = original.clone();
        for mv in board.legal_jumps(Side::White) {
            let undo = board.apply_trial(mv);
            assert_ne!(board, original);
            board.undo(undo);
            assert_eq!(board, original);
        }
        for mv in original.legal_steps(Side::Black) {
            let undo = board.apply_trial(mv);
            board.undo(undo);
            assert_eq!(board, original);
        }
    }

    #[test]
    fn test_malformed_trial_jump_captures_nothing() {
        let original = setpos(&[(2, 2, WM), (3, 2, BM), (3, 3, BM)]);
        let mut board = original.clone();
        let undo = board.apply_trial(Move::new(2, 2, 4, 5));
        assert_eq!(board.get(3, 2), Some(BM));
        assert_eq!(board.get(3, 3), Some(BM));
        assert_eq!(board.get(4, 5), Some(WM));
        board.undo(undo);
        assert_eq!(board, original);
    }

    #[test]
    fn test_cell_at_off_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.cell_at(1, 0), Some(WM));
        assert_eq!(board.cell_at(1, 8), Some(WM));
        assert_eq!(board.cell_at(8, 0), None);
        assert_eq!(board.cell_at(usize::MAX, 3), None);
    }

    #[test]
    fn test_display() {
        let s = Board::new().to_string();
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "7 b . . . . . . . ");
        assert_eq!(lines[6], "1 w . . . . . . . ");
    }
}
