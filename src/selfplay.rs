//! Automated games: the engine plays both sides.
//!
//! Every move goes through [`Game::play_turn`], so a self-play game obeys
//! exactly the same rules as a human one. Games that run past the ply cap
//! are reported as unfinished.

use log::info;

use crate::board::{EndReason, GameStatus, Move, MoveError};
use crate::game::Game;
use crate::piece::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Finished { winner: Side, reason: EndReason },
    PlyLimit,
}

/// Moves and result of one automated game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub moves: Vec<Move>,
    pub outcome: Outcome,
}

impl GameRecord {
    pub fn plies(&self) -> usize {
        self.moves.len()
    }
}

/// Play `game` to the end, or until `max_plies` more plies have been made.
///
/// # Errors
/// Only if the selector proposes a move the turn engine rejects.
pub fn play_game(game: &mut Game, max_plies: u32) -> Result<GameRecord, MoveError> {
    let mut moves = Vec::new();

    let outcome = loop {
        if let GameStatus::GameOver { winner, reason } = game.check_game_status() {
            break Outcome::Finished { winner, reason };
        }
        if moves.len() >= max_plies as usize {
            break Outcome::PlyLimit;
        }
        match game.play_ai_turn()? {
            Some(mv) => moves.push(mv),
            None => {
                break Outcome::Finished {
                    winner: game.current_side().opponent(),
                    reason: EndReason::Blocked,
                };
            }
        }
    };

    info!("game ended after {} plies: {outcome:?}", moves.len());
    Ok(GameRecord { moves, outcome })
}

/// Totals over a series of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeriesSummary {
    pub games: usize,
    pub white_wins: usize,
    pub black_wins: usize,
    pub unfinished: usize,
    pub total_plies: usize,
}

impl SeriesSummary {
    fn add(&mut self, record: &GameRecord) {
        self.games += 1;
        self.total_plies += record.plies();
        match record.outcome {
            Outcome::Finished {
                winner: Side::White,
                ..
            } => self.white_wins += 1,
            Outcome::Finished {
                winner: Side::Black,
                ..
            } => self.black_wins += 1,
            Outcome::PlyLimit => self.unfinished += 1,
        }
    }

    pub fn average_plies(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_plies as f64 / self.games as f64
        }
    }
}

/// Play `games` games from the initial position. Game `i` uses seed `seed + i`.
///
/// # Errors
/// See [`play_game`].
pub fn run_series(games: usize, seed: u64, max_plies: u32) -> Result<SeriesSummary, MoveError> {
    let mut summary = SeriesSummary::default();
    for i in 0..games {
        let mut game = Game::with_seed(seed.wrapping_add(i as u64));
        let record = play_game(&mut game, max_plies)?;
        summary.add(&record);
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::piece::Piece;

    #[test]
    fn test_game_respects_ply_cap() {
        let mut game = Game::with_seed(7);
        let record = play_game(&mut game, 30).unwrap();
        assert!(record.plies() <= 30);
        if record.outcome == Outcome::PlyLimit {
            assert_eq!(record.plies(), 30);
        }
    }

    #[test]
    fn test_outcome_matches_board_status() {
        let mut game = Game::with_seed(11);
        let record = play_game(&mut game, 500).unwrap();
        if let Outcome::Finished { winner, reason } = record.outcome {
            assert_eq!(
                game.check_game_status(),
                GameStatus::GameOver { winner, reason }
            );
        }
    }

    #[test]
    fn test_same_seed_same_game() {
        let a = play_game(&mut Game::with_seed(5), 60).unwrap();
        let b = play_game(&mut Game::with_seed(5), 60).unwrap();
        assert_eq!(a.moves, b.moves);
        assert_eq!(a.outcome, b.outcome);
    }

    #[test]
    fn test_finished_position_plays_nothing() {
        let mut board = Board::empty();
        board.place(3, 3, Piece::man(Side::White));
        let mut game = Game::from_board(board, Side::Black);
        let record = play_game(&mut game, 10).unwrap();
        assert!(record.moves.is_empty());
        assert_eq!(
            record.outcome,
            Outcome::Finished {
                winner: Side::White,
                reason: EndReason::NoPieces
            }
        );
    }

    #[test]
    fn test_capture_ends_game() {
        let mut board = Board::empty();
        board.place(2, 2, Piece::man(Side::White));
        board.place(3, 3, Piece::man(Side::Black));
        let mut game = Game::from_board(board, Side::White);
        let record = play_game(&mut game, 10).unwrap();
        assert_eq!(record.moves, vec![Move::new(2, 2, 4, 4)]);
        assert_eq!(
            record.outcome,
            Outcome::Finished {
                winner: Side::White,
                reason: EndReason::NoPieces
            }
        );
    }

    #[test]
    fn test_series_totals() {
        let summary = run_series(4, 100, 40).unwrap();
        assert_eq!(summary.games, 4);
        assert_eq!(
            summary.white_wins + summary.black_wins + summary.unfinished,
            4
        );
        assert!(summary.average_plies() <= 40.0);
    }
}
