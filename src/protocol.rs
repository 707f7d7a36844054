//! Line-based text protocol for driving a game from another program.
//!
//! The framing follows GTP: a request is an optional numeric id followed by
//! a command and its arguments; a response is `=[id] text` on success or
//! `?[id] text` on failure, followed by a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`, `list_commands`,
//!   `known_command <cmd>`, `quit`
//! - `new [ai|multiplayer] [name1] [name2]` - Start a new game
//! - `showboard` - Print the board diagram
//! - `select <row> <col>` - Select (or deselect) a piece
//! - `move <row> <col>` - Move the selected piece
//! - `destinations <row> <col>` - Squares the piece may move to
//! - `turn`, `score`, `outcome` - Game status
//! - `genmove` - Let the AI play the side on turn
//!
//! When a move hands the turn to the AI, the server waits out the pacing
//! delay, plays the AI's turn, and reports it in the same response.
//!
//! ## Example
//!
//! ```ignore
//! use checkers_rust::protocol::ProtocolEngine;
//! let mut engine = ProtocolEngine::new(Default::default());
//! engine.run(std::io::stdin().lock(), std::io::stdout())?;
//! ```

use std::io::{BufRead, Write};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::board::{Player, Square};
use crate::game::{
    AiTurn, Destination, Game, GameConfig, GameMode, MoveReport, PlayerNames, Selection,
};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "destinations",
    "genmove",
    "known_command",
    "list_commands",
    "move",
    "name",
    "new",
    "outcome",
    "protocol_version",
    "quit",
    "score",
    "select",
    "showboard",
    "turn",
    "version",
];

/// Protocol server state.
pub struct ProtocolEngine {
    game: Game,
}

impl ProtocolEngine {
    pub fn new(config: GameConfig) -> Self {
        Self::with_game(Game::new(GameMode::VersusAi, PlayerNames::default(), config))
    }

    pub fn with_game(game: Game) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Serve requests from `input` until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read request")?;

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

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n").context("failed to write response")?;
            output.flush().context("failed to flush response")?;

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
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    fn parse_square(args: &[&str]) -> Result<(usize, usize)> {
        let [row, col, ..] = args else {
            bail!("expected <row> <col>");
        };
        let row = row.parse().with_context(|| format!("invalid row {row:?}"))?;
        let col = col.parse().with_context(|| format!("invalid column {col:?}"))?;
        Ok((row, col))
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, "checkers-rust".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "1".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                None => (false, "missing argument".to_string()),
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
            },

            "quit" => (true, String::new()),

            "new" => {
                let mode = match args.first().map(|m| m.to_lowercase()) {
                    None => GameMode::VersusAi,
                    Some(m) if m == "ai" => GameMode::VersusAi,
                    Some(m) if m == "multiplayer" => GameMode::Multiplayer,
                    Some(m) => return (false, format!("unknown mode: {m}")),
                };
                let p1 = args.get(1).copied().unwrap_or_default();
                let p2 = args.get(2).copied().unwrap_or_default();
                self.game.reset_game(mode, PlayerNames::new(p1, p2));
                (true, String::new())
            }

            "showboard" => (true, format!("\n{}", self.game.board())),

            "destinations" => match Self::parse_square(args) {
                Ok((row, col)) => (true, format_squares(&self.game.legal_destinations(row, col))),
                Err(e) => (false, format!("{e:#}")),
            },

            "select" => {
                let (row, col) = match Self::parse_square(args) {
                    Ok(rc) => rc,
                    Err(e) => return (false, format!("{e:#}")),
                };
                match self.game.submit_selection(row, col) {
                    Ok(Selection::Selected {
                        square,
                        destinations,
                    }) => (
                        true,
                        format!("selected {square}: {}", format_squares(&destinations)),
                    ),
                    Ok(Selection::Deselected) => (true, "deselected".to_string()),
                    Err(rejection) => (false, rejection.to_string()),
                }
            }

            "move" => {
                let (row, col) = match Self::parse_square(args) {
                    Ok(rc) => rc,
                    Err(e) => return (false, format!("{e:#}")),
                };
                match self.game.submit_destination(row, col) {
                    Ok(Destination::Moved(report)) => {
                        let mut message = format_report(&report);
                        if let Some(ai) = self.settle_ai() {
                            message.push_str("\nai ");
                            message.push_str(&ai);
                        }
                        if let Some(banner) = self.game.outcome_message() {
                            message.push('\n');
                            message.push_str(&banner);
                        }
                        (true, message)
                    }
                    Ok(Destination::Deselected) => (true, "deselected".to_string()),
                    Err(rejection) => (false, rejection.to_string()),
                }
            }

            "genmove" => {
                let turn = match self.game.mode() {
                    GameMode::VersusAi => self.game.request_ai_move(),
                    GameMode::Multiplayer => self.game.play_turn_for_current(),
                };
                match turn {
                    Ok(turn) => {
                        let mut message = format_ai_turn(&turn);
                        if let Some(banner) = self.game.outcome_message() {
                            message.push('\n');
                            message.push_str(&banner);
                        }
                        (true, message)
                    }
                    Err(rejection) => (false, rejection.to_string()),
                }
            }

            "turn" => (true, self.game.turn_label()),

            "score" => (
                true,
                format!(
                    "{}\n{}",
                    self.game.score_line(Player::One),
                    self.game.score_line(Player::Two)
                ),
            ),

            "outcome" => (
                true,
                self.game
                    .outcome_message()
                    .unwrap_or_else(|| "none".to_string()),
            ),

            _ => (false, format!("unknown command: {command}")),
        }
    }

    /// Wait out a pending AI move and play it.
    fn settle_ai(&mut self) -> Option<String> {
        let wait = self.game.ai_due_in(Instant::now())?;
        debug!(?wait, "waiting for ai move");
        thread::sleep(wait);
        match self.game.poll(Instant::now())? {
            Ok(turn) => Some(format_ai_turn(&turn)),
            Err(rejection) => Some(rejection.to_string()),
        }
    }
}

fn format_squares(squares: &[Square]) -> String {
    squares
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_report(report: &MoveReport) -> String {
    if report.result.chain_available() {
        format!(
            "{} continue: {}",
            report.mv,
            format_squares(&report.result.chain)
        )
    } else {
        report.mv.to_string()
    }
}

fn format_ai_turn(turn: &AiTurn) -> String {
    match turn {
        AiTurn::NoMove => "none".to_string(),
        AiTurn::Played(reports) => reports
            .iter()
            .map(|r| r.mv.to_string())
            .collect::<Vec<_>>()
            .join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn engine() -> ProtocolEngine {
        ProtocolEngine::new(GameConfig {
            ai_delay: Duration::ZERO,
            seed: Some(11),
            ..GameConfig::default()
        })
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = ProtocolEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = ProtocolEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_name_command() {
        let mut engine = engine();
        let (success, response) = engine.execute("name", &[]);
        assert!(success);
        assert_eq!(response, "checkers-rust");
    }

    #[test]
    fn test_known_command() {
        let mut engine = engine();

        let (success, response) = engine.execute("known_command", &["select"]);
        assert!(success);
        assert_eq!(response, "true");

        let (success, response) = engine.execute("known_command", &["komi"]);
        assert!(success);
        assert_eq!(response, "false");
    }

    #[test]
    fn test_select_and_move_plays_ai_reply() {
        let mut engine = engine();
        let (success, response) = engine.execute("select", &["5", "0"]);
        assert!(success);
        assert_eq!(response, "selected (5,0): (4,1)");

        let (success, response) = engine.execute("move", &["4", "1"]);
        assert!(success, "{response}");
        assert!(response.starts_with("(5,0)-(4,1)\nai "), "{response}");
        assert_eq!(engine.game().turn_owner(), Player::One);
    }

    #[test]
    fn test_bad_arguments() {
        let mut engine = engine();
        let (success, _) = engine.execute("select", &["5"]);
        assert!(!success);
        let (success, response) = engine.execute("select", &["x", "0"]);
        assert!(!success);
        assert!(response.contains("invalid row"));
        let (success, response) = engine.execute("select", &["2", "1"]);
        assert!(!success);
        assert!(response.contains("opponent"));
    }

    #[test]
    fn test_new_multiplayer() {
        let mut engine = engine();
        let (success, _) = engine.execute("new", &["multiplayer", "Ada", "Grace"]);
        assert!(success);
        assert_eq!(engine.execute("turn", &[]).1, "Ada's Turn");
        let (success, _) = engine.execute("new", &["chess"]);
        assert!(!success);
    }

    #[test]
    fn test_run_loop() {
        let mut engine = engine();
        let input = b"1 name\n# comment\n\n2 score\nbogus\nquit\nname\n";
        let mut output = Vec::new();
        engine.run(&input[..], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("=1 checkers-rust"));
        assert!(text.contains("=2 Player 1 (You): 0\nPlayer 2 (AI): 0"));
        assert!(text.contains("? unknown command: bogus"));
        assert_eq!(text.matches("checkers-rust").count(), 1);
    }
}
