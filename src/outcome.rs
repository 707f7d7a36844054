//! Terminal-state detection.

use std::fmt;

use crate::board::{Board, Player};
use crate::rules::all_legal_moves;

/// How a game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Player1Wins,
    Player2Wins,
    Draw,
}

impl Outcome {
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Player1Wins => Some(Player::One),
            Outcome::Player2Wins => Some(Player::Two),
            Outcome::Draw => None,
        }
    }

    fn win_for(player: Player) -> Self {
        match player {
            Player::One => Outcome::Player1Wins,
            Player::Two => Outcome::Player2Wins,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Player1Wins => write!(f, "player1 wins"),
            Outcome::Player2Wins => write!(f, "player2 wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// Inspect `board` with `to_move` on turn.
///
/// A side with no pieces loses; that is checked for both sides before the
/// side on turn is tested for having no legal move, which is a draw.
pub fn evaluate(board: &Board, to_move: Player) -> Option<Outcome> {
    for player in [Player::One, Player::Two] {
        if board.count(player) == 0 {
            return Some(Outcome::win_for(player.opponent()));
        }
    }
    if all_legal_moves(board, to_move).is_empty() {
        return Some(Outcome::Draw);
    }
    None
}
