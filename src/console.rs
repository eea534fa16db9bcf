//! Line-oriented text front end.
//!
//! Reads one command per line and answers in GTP style: `= message` on
//! success, `? message` on failure, each followed by a blank line.
//!
//! ## Commands
//!
//! - `move <r1> <c1> <r2> <c2>` - Play a move for the side to move
//! - `<r1> <c1> <r2> <c2>` - Same as `move`
//! - `ai` - Let the engine move for the side to move
//! - `board` - Show the board
//! - `status` - Show whose turn it is, or the result
//! - `messages` - Show the recent message log
//! - `new` - Start a new game
//! - `help` - List commands
//! - `quit` - Exit
//!
//! In [`Mode::HumanVsAi`] the engine answers every human move itself and
//! `move` is refused on its turn; in [`Mode::AiVsAi`] it plays the whole
//! game as soon as the loop starts.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use crate::board::GameStatus;
use crate::constants::{MAX_GAME_PLIES, MESSAGE_LOG_LEN};
use crate::game::Game;
use crate::piece::Side;

const KNOWN_COMMANDS: &[&str] = &[
    "ai", "board", "help", "messages", "move", "new", "quit", "status",
];

/// Who is at the controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    HumanVsHuman,
    /// Human plays White, the engine plays Black
    HumanVsAi,
    AiVsAi,
}

impl Mode {
    fn is_ai(self, side: Side) -> bool {
        match self {
            Mode::HumanVsHuman => false,
            Mode::HumanVsAi => side == Side::Black,
            Mode::AiVsAi => true,
        }
    }
}

/// The last few messages shown to the players.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: VecDeque<String>,
}

impl MessageLog {
    pub fn push(&mut self, msg: impl Into<String>) {
        self.messages.push_back(msg.into());
        while self.messages.len() > MESSAGE_LOG_LEN {
            self.messages.pop_front();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

pub struct Console {
    game: Game,
    mode: Mode,
    ai_delay: Duration,
    messages: MessageLog,
}

impl Console {
    pub fn new(game: Game, mode: Mode) -> Self {
        Self {
            game,
            mode,
            ai_delay: Duration::ZERO,
            messages: MessageLog::default(),
        }
    }

    /// Pause before each engine move so a watcher can follow the game.
    pub fn with_ai_delay(mut self, delay: Duration) -> Self {
        self.ai_delay = delay;
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.game.board())?;
        if self.mode.is_ai(self.game.current_side()) {
            let report = self.engine_replies();
            writeln!(out, "= {report}\n")?;
            out.flush()?;
        }

        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            let command = parts[0].to_lowercase();
            let (success, message) = if parts.len() == 4 && parts[0].parse::<i32>().is_ok() {
                self.execute("move", &parts)
            } else {
                self.execute(&command, &parts[1..])
            };

            let prefix = if success { '=' } else { '?' };
            writeln!(out, "{prefix} {message}\n")?;
            out.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Execute one command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "help" => (true, KNOWN_COMMANDS.join("\n")),

            "quit" => (true, String::new()),

            "board" => (true, format!("\n{}", self.game.board())),

            "status" => (true, self.status_line()),

            "messages" => (true, self.messages.iter().collect::<Vec<_>>().join("\n")),

            "new" => {
                self.game.reset();
                self.messages.push("new game");
                let mut reply = format!("\n{}", self.game.board());
                if self.mode.is_ai(self.game.current_side()) {
                    reply.push('\n');
                    reply.push_str(&self.engine_replies());
                }
                (true, reply)
            }

            "move" => {
                if self.game.check_game_status().is_over() {
                    return (false, "game is over, use 'new'".to_string());
                }
                let side = self.game.current_side();
                if self.mode.is_ai(side) {
                    return (false, format!("{side} is played by the engine"));
                }
                let coords: Result<Vec<i32>, _> = args.iter().map(|a| a.parse::<i32>()).collect();
                let (r1, c1, r2, c2) = match coords.as_deref() {
                    Ok(&[r1, c1, r2, c2]) => (r1, c1, r2, c2),
                    _ => return (false, "expected four integers: r1 c1 r2 c2".to_string()),
                };
                match self.game.play_turn(r1, c1, r2, c2) {
                    Ok(()) => {
                        let msg = format!("{side} played {r1},{c1} -> {r2},{c2}");
                        (true, self.after_move(msg))
                    }
                    Err(e) => {
                        self.messages.push(format!("Error: {e}"));
                        (false, e.to_string())
                    }
                }
            }

            "ai" => {
                if self.game.check_game_status().is_over() {
                    return (false, "game is over, use 'new'".to_string());
                }
                let side = self.game.current_side();
                match self.game.play_ai_turn() {
                    Ok(Some(mv)) => {
                        let msg = format!("{side} (AI) played {mv}");
                        (true, self.after_move(msg))
                    }
                    Ok(None) => (false, format!("{side} has no legal move")),
                    Err(e) => {
                        self.messages.push(format!("Error: {e}"));
                        (false, e.to_string())
                    }
                }
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    /// Log a played move, then let the engine answer or report the result.
    fn after_move(&mut self, msg: String) -> String {
        self.messages.push(msg.clone());
        let mut reply = msg;
        if self.mode.is_ai(self.game.current_side()) {
            reply.push('\n');
            reply.push_str(&self.engine_replies());
        } else if let over @ GameStatus::GameOver { .. } = self.game.check_game_status() {
            reply.push('\n');
            reply.push_str(&over.to_string());
        }
        reply
    }

    /// Let the engine move for as long as it is on turn and the game is on.
    fn engine_replies(&mut self) -> String {
        let mut lines = Vec::new();
        let mut played = 0;
        loop {
            let status = self.game.check_game_status();
            if status.is_over() {
                lines.push(status.to_string());
                break;
            }
            let side = self.game.current_side();
            if !self.mode.is_ai(side) {
                break;
            }
            if played >= MAX_GAME_PLIES {
                lines.push(format!("stopped after {played} engine plies"));
                break;
            }
            if !self.ai_delay.is_zero() {
                thread::sleep(self.ai_delay);
            }
            match self.game.play_ai_turn() {
                Ok(Some(mv)) => {
                    played += 1;
                    let msg = format!("{side} (AI) played {mv}");
                    self.messages.push(msg.clone());
                    lines.push(msg);
                }
                Ok(None) => {
                    lines.push(format!("{side} has no legal move"));
                    break;
                }
                Err(e) => {
                    self.messages.push(format!("Error: {e}"));
                    lines.push(format!("Error: {e}"));
                    break;
                }
            }
        }
        lines.join("\n")
    }

    fn status_line(&self) -> String {
        match self.game.check_game_status() {
            GameStatus::Continue => format!(
                "{} to move (ply {})",
                self.game.current_side(),
                self.game.turn().plies
            ),
            over => over.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::piece::Piece;
    use std::io::Cursor;

    fn human_game() -> Console {
        Console::new(Game::with_seed(1), Mode::HumanVsHuman)
    }

    #[test]
    fn test_message_log_keeps_last_three() {
        let mut log = MessageLog::default();
        for i in 0..5 {
            log.push(format!("m{i}"));
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.iter().collect::<Vec<_>>(), vec!["m2", "m3", "m4"]);
    }

    #[test]
    fn test_move_command() {
        let mut console = human_game();
        let (success, response) = console.execute("move", &["1", "0", "2", "1"]);
        assert!(success, "{response}");
        assert_eq!(console.game().current_side(), Side::Black);
        assert!(console.game().cell_at(2, 1).is_some());
    }

    #[test]
    fn test_move_command_errors() {
        let mut console = human_game();
        let (success, response) = console.execute("move", &["1", "0"]);
        assert!(!success);
        assert!(response.contains("four integers"));

        let (success, response) = console.execute("move", &["6", "1", "5", "2"]);
        assert!(!success);
        assert_eq!(response, "cannot move the opponent's piece");
        assert_eq!(console.messages().len(), 1);
    }

    #[test]
    fn test_unknown_command() {
        let mut console = human_game();
        let (success, response) = console.execute("castle", &[]);
        assert!(!success);
        assert!(response.contains("unknown command"));
    }

    #[test]
    fn test_engine_answers_in_human_vs_ai() {
        let mut console = Console::new(Game::with_seed(3), Mode::HumanVsAi);
        let (success, response) = console.execute("move", &["1", "0", "2", "1"]);
        assert!(success, "{response}");
        assert!(response.contains("black (AI) played"));
        assert_eq!(console.game().current_side(), Side::White);
    }

    #[test]
    fn test_engine_side_cannot_be_moved_by_hand() {
        let mut console = Console::new(Game::with_seed(3), Mode::HumanVsAi);
        let (success, response) = console.execute("ai", &[]);
        assert!(success, "{response}");
        // the engine has already answered for Black
        assert!(response.contains("white (AI) played"));
        assert!(response.contains("black (AI) played"));
        assert_eq!(console.game().current_side(), Side::White);
        assert_eq!(console.game().turn().plies, 2);
    }

    #[test]
    fn test_move_refused_on_engine_turn() {
        let mut board = Board::empty();
        board.place(2, 2, Piece::man(Side::White));
        board.place(6, 1, Piece::man(Side::Black));
        let mut console = Console::new(Game::from_board(board, Side::Black), Mode::HumanVsAi);
        let before = console.game().board().clone();
        let (success, response) = console.execute("move", &["6", "1", "5", "2"]);
        assert!(!success);
        assert_eq!(response, "black is played by the engine");
        assert_eq!(console.game().board(), &before);
        assert_eq!(console.game().current_side(), Side::Black);
    }

    #[test]
    fn test_moves_refused_after_game_over() {
        let mut board = Board::empty();
        board.place(2, 2, Piece::man(Side::White));
        board.place(3, 3, Piece::man(Side::Black));
        let mut console = Console::new(Game::from_board(board, Side::White), Mode::HumanVsHuman);
        let (success, response) = console.execute("move", &["2", "2", "4", "4"]);
        assert!(success);
        assert!(response.contains("white wins"));
        let (success, _) = console.execute("ai", &[]);
        assert!(!success);
    }

    #[test]
    fn test_run_loop() {
        let mut console = human_game();
        let input = Cursor::new("# comment\n1 0 2 7\nstatus\nquit\nboard\n");
        let mut out = Vec::new();
        console.run(input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("= white played 1,0 -> 2,7"));
        assert!(text.contains("= black to move (ply 1)"));
        // nothing after quit is executed
        assert_eq!(text.lines().filter(|l| l.starts_with('=')).count(), 3);
    }

    #[test]
    fn test_ai_vs_ai_plays_out() {
        let mut console = Console::new(Game::with_seed(9), Mode::AiVsAi);
        let mut out = Vec::new();
        console.run(Cursor::new("status\n"), &mut out).unwrap();
        assert!(console.game().turn().plies > 0);
    }
}
