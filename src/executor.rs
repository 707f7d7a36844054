//! Move execution: relocation, capture removal, crowning, chain detection.

use crate::board::{Board, Player, Square};
use crate::rules::{captures_for, jumped_square};

/// Pieces captured by each side since the last reset.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Scores {
    pub player1: u32,
    pub player2: u32,
}

impl Scores {
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player1,
            Player::Two => self.player2,
        }
    }

    fn credit(&mut self, player: Player) {
        match player {
            Player::One => self.player1 += 1,
            Player::Two => self.player2 += 1,
        }
    }
}

/// What happened when a move was applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The mover after the move (crowning already applied).
    pub player: Player,
    /// Square of the removed enemy piece, if the move was a capture.
    pub captured: Option<Square>,
    /// The piece was crowned by this move.
    pub promoted: bool,
    /// Further capture landings for the same piece. Non-empty means the turn
    /// must continue with one of these.
    pub chain: Vec<Square>,
}

impl MoveOutcome {
    pub fn captured(&self) -> bool {
        self.captured.is_some()
    }

    pub fn chain_available(&self) -> bool {
        !self.chain.is_empty()
    }
}

/// Move the piece on `from` to `to` and resolve the consequences.
///
/// The move is assumed legal; validation is the caller's job. Returns `None`
/// if `from` is empty.
pub fn apply_move(
    board: &mut Board,
    scores: &mut Scores,
    from: Square,
    to: Square,
) -> Option<MoveOutcome> {
    let mut piece = board.take(from)?;

    let mut promoted = false;
    if !piece.is_king && to.row == piece.owner.king_row() {
        piece.is_king = true;
        promoted = true;
    }
    board.put(to, Some(piece));

    let mut captured = None;
    if to.row.abs_diff(from.row) >= 2 {
        if let Some(sq) = jumped_square(board, from, to) {
            board.put(sq, None);
            scores.credit(piece.owner);
            captured = Some(sq);
        }
    }

    let chain = match captured {
        Some(_) => captures_for(board, to, piece),
        None => Vec::new(),
    };

    Some(MoveOutcome {
        player: piece.owner,
        captured,
        promoted,
        chain,
    })
}
