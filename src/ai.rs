//! Greedy AI opponent.
//!
//! The policy has no lookahead: the first capture in enumeration order is
//! always taken, otherwise a legal move is drawn uniformly at random.

use fastrand::Rng;
use tracing::trace;

use crate::board::{Board, Player, Square};
use crate::rules::{Move, all_legal_moves, captures_for};

/// Pick a move for `player`, or `None` if it has no legal move.
pub fn select_move(board: &Board, player: Player, rng: &mut Rng) -> Option<Move> {
    let moves = all_legal_moves(board, player);
    if moves.is_empty() {
        return None;
    }

    if let Some(&capture) = moves.iter().find(|m| m.is_capture) {
        trace!(%capture, "ai takes first capture");
        return Some(capture);
    }

    let mv = moves[rng.usize(..moves.len())];
    trace!(%mv, candidates = moves.len(), "ai picks random move");
    Some(mv)
}

/// Next link of a capture chain for the piece on `from`: its first capture.
pub fn select_continuation(board: &Board, from: Square) -> Option<Move> {
    let piece = board.at(from)?;
    captures_for(board, from, piece)
        .first()
        .map(|&to| Move::capture(from, to))
}
