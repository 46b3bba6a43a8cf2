//! Go Text Protocol (GTP) front end.
//!
//! GTP is a text-based protocol for communicating with Go-playing programs.
//! This module implements GTP version 2 on top of a [`Session`], so the
//! opponent can be driven by graphical clients like Sabaki or GoGui.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <size>` - Start a new game on a `size`x`size` board
//! - `clear_board` - Reset the current game
//! - `komi <value>` - Accepted and ignored (no scoring is done)
//! - `play <color> <vertex>` - Play a move or `pass`
//! - `genmove <color>` - Let the opponent move and print its vertex
//! - `showboard` - Print the board
//! - `difficulty <easy|medium|hard>` - Change the opponent's tier
//! - `export_state` - Print the game state as JSON
//!
//! ## Example
//!
//! ```ignore
//! use go_opponent::gtp::GtpEngine;
//! use go_opponent::session::Session;
//! let mut engine = GtpEngine::new(Session::new(19, Default::default()));
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::board::{Color, Point};
use crate::constants::MAX_GTP_BOARD_SIZE;
use crate::difficulty::Difficulty;
use crate::error::MoveError;
use crate::session::Session;

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "difficulty",
    "export_state",
    "genmove",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "version",
];

/// Column letters; GTP skips 'I'.
const COLUMNS: &[u8] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// Parse a vertex like "D4" on a board of `size`.
///
/// Rows count from 1 at the bottom. Returns `None` for anything that is not
/// a point on the board (including "pass").
pub fn parse_vertex(s: &str, size: usize) -> Option<Point> {
    let s = s.trim();
    let letter = s.bytes().next()?.to_ascii_uppercase();
    let col = COLUMNS.iter().position(|&c| c == letter)?;
    let number: usize = s.get(1..)?.parse().ok()?;
    if col >= size || number == 0 || number > size {
        return None;
    }
    Some((size - number, col))
}

/// Format a point as a GTP vertex on a board of `size`.
///
/// Returns `None` for points off the board or columns past 'Z'.
pub fn format_vertex((row, col): Point, size: usize) -> Option<String> {
    let letter = *COLUMNS.get(col)?;
    if row >= size || col >= size {
        return None;
    }
    Some(format!("{}{}", letter as char, size - row))
}

fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "b" | "black" => Some(Color::Black),
        "w" | "white" => Some(Color::White),
        _ => None,
    }
}

/// GTP engine state.
pub struct GtpEngine {
    session: Session,
}

impl GtpEngine {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the GTP command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Serve commands from `input` until EOF or `quit`.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            debug!(%command, ?args, "gtp command");
            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        let size = self.session.position().size();
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<usize>() {
                    Ok(size) if (1..=MAX_GTP_BOARD_SIZE).contains(&size) => {
                        self.session.new_game(size);
                        (true, String::new())
                    }
                    Ok(_) => (false, "unacceptable size".to_string()),
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                self.session.reset();
                (true, String::new())
            }

            "komi" => match args.first().map(|a| a.parse::<f32>()) {
                Some(Ok(_)) => (true, String::new()),
                Some(Err(_)) => (false, "invalid komi".to_string()),
                None => (false, "missing argument".to_string()),
            },

            "play" => {
                let [color, vertex, ..] = args else {
                    return (false, "missing arguments".to_string());
                };
                let Some(color) = parse_color(color) else {
                    return (false, "invalid color".to_string());
                };
                if vertex.eq_ignore_ascii_case("pass") {
                    if color != self.session.position().to_move() {
                        return (false, MoveError::OutOfTurn.to_string());
                    }
                    self.session.pass();
                    return (true, String::new());
                }
                let Some(pt) = parse_vertex(vertex, size) else {
                    return (false, "invalid vertex".to_string());
                };
                match self.session.play_as(pt, color) {
                    Ok(_) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => {
                let Some(color) = args.first().and_then(|c| parse_color(c)) else {
                    return (false, "invalid color".to_string());
                };
                if color != self.session.position().to_move() {
                    return (false, "out of turn".to_string());
                }
                // Refuse before moving: the answer could not be written.
                if size > MAX_GTP_BOARD_SIZE {
                    return (false, "board too large for gtp vertices".to_string());
                }
                let outcome = self.session.ai_move();
                match (outcome.played, outcome.message) {
                    (Some(pt), _) => match format_vertex(pt, size) {
                        Some(vertex) => (true, vertex),
                        None => (false, "board too large for gtp vertices".to_string()),
                    },
                    (None, Some(message)) => (false, message.to_lowercase()),
                    (None, None) => (true, "pass".to_string()),
                }
            }

            "showboard" => (true, format!("\n{}", self.session.position().board())),

            "difficulty" => match args.first().map(|a| a.parse::<Difficulty>()) {
                Some(Ok(d)) => {
                    self.session.set_difficulty(d);
                    (true, String::new())
                }
                Some(Err(e)) => (false, e.to_string()),
                None => (true, self.session.difficulty().to_string()),
            },

            "export_state" => (true, self.session.state().to_json()),

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GtpEngine {
        GtpEngine::new(Session::new(9, Difficulty::Hard).with_seed(5))
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = GtpEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = GtpEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_vertex_roundtrip() {
        assert_eq!(parse_vertex("A1", 9), Some((8, 0)));
        assert_eq!(parse_vertex("J9", 9), Some((0, 8)));
        assert_eq!(parse_vertex("d4", 19), Some((15, 3)));
        assert_eq!(parse_vertex("I5", 9), None);
        assert_eq!(parse_vertex("K1", 9), None);
        assert_eq!(parse_vertex("A0", 9), None);
        assert_eq!(parse_vertex("pass", 9), None);
        for pt in [(0, 0), (4, 7), (8, 8)] {
            assert_eq!(parse_vertex(&format_vertex(pt, 9).unwrap(), 9), Some(pt));
        }
    }

    #[test]
    fn test_name_and_protocol() {
        let mut engine = engine();
        assert_eq!(engine.execute("name", &[]), (true, "go-opponent".to_string()));
        assert_eq!(engine.execute("protocol_version", &[]), (true, "2".to_string()));
    }

    #[test]
    fn test_known_command() {
        let mut engine = engine();
        assert_eq!(engine.execute("known_command", &["genmove"]).1, "true");
        assert_eq!(engine.execute("known_command", &["unknown_cmd"]).1, "false");
    }

    #[test]
    fn test_boardsize() {
        let mut engine = engine();
        assert!(engine.execute("boardsize", &["13"]).0);
        assert_eq!(engine.session().position().size(), 13);
        assert!(!engine.execute("boardsize", &["26"]).0);
        assert!(!engine.execute("boardsize", &["x"]).0);
    }

    #[test]
    fn test_play_and_clear() {
        let mut engine = engine();
        assert!(engine.execute("play", &["black", "D4"]).0);
        assert!(!engine.execute("play", &["white", "D4"]).0);
        assert!(!engine.execute("play", &["black", "E5"]).0);

        assert!(engine.execute("clear_board", &[]).0);
        assert_eq!(engine.session().position().move_count(), 0);
    }

    #[test]
    fn test_genmove_plays_for_side_to_move() {
        let mut engine = engine();
        let (ok, vertex) = engine.execute("genmove", &["b"]);
        assert!(ok);
        assert!(parse_vertex(&vertex, 9).is_some());
        assert_eq!(engine.session().position().to_move(), Color::White);
        assert!(!engine.execute("genmove", &["b"]).0);
    }

    #[test]
    fn test_format_vertex_limits() {
        assert_eq!(format_vertex((0, 24), 25).as_deref(), Some("Z25"));
        assert_eq!(format_vertex((0, 25), 30), None);
        assert_eq!(format_vertex((9, 0), 9), None);
    }

    #[test]
    fn test_genmove_on_oversized_board() {
        for seed in 0..40 {
            let mut engine = GtpEngine::new(Session::new(30, Difficulty::Easy).with_seed(seed));
            let (ok, message) = engine.execute("genmove", &["b"]);
            assert!(!ok);
            assert!(message.contains("too large"));
            assert_eq!(engine.session().position().move_count(), 0);
        }
    }

    #[test]
    fn test_play_out_of_turn() {
        let mut engine = engine();
        assert_eq!(
            engine.execute("play", &["white", "D4"]),
            (false, "illegal move: out of turn".to_string())
        );
        assert_eq!(
            engine.execute("play", &["white", "pass"]),
            (false, "illegal move: out of turn".to_string())
        );
        assert_eq!(engine.session().position().move_count(), 0);
    }

    #[test]
    fn test_difficulty_command() {
        let mut engine = engine();
        assert!(engine.execute("difficulty", &["easy"]).0);
        assert_eq!(engine.execute("difficulty", &[]).1, "easy");
        assert!(!engine.execute("difficulty", &["brutal"]).0);
    }

    #[test]
    fn test_serve_transcript() {
        let mut engine = engine();
        let input = "1 boardsize 5\n# comment\n2 play b C3\n3 export_state\nquit\nname\n";
        let mut out = Vec::new();
        engine.serve(input.as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("=1 \n\n=2 \n\n=3 {\"board\""));
        assert!(out.ends_with("= \n\n"));
        assert!(!out.contains("go-opponent"));
    }
}
