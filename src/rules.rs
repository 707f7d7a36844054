//! Move rules: directions, move validity, and move enumeration.
//!
//! Every function here is pure over a [`Board`]. Simple moves are exactly one
//! diagonal step for every kind of piece. Captures enumerated for play are the
//! two-square jump in each allowed direction; [`is_valid_capture`] also accepts
//! a king's long jump over a single enemy piece on an otherwise clear
//! diagonal, but that form is never generated.

use std::fmt;

use crate::board::{Board, Piece, Player, Square, is_within_bounds};

/// A diagonal unit step `(row, col)`.
pub type Direction = (i32, i32);

/// Up-board pair first, then down-board.
const KING_DIRECTIONS: [Direction; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// A candidate move for one piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub is_capture: bool,
}

impl Move {
    pub fn simple(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            is_capture: false,
        }
    }

    pub fn capture(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            is_capture: true,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture { 'x' } else { '-' };
        write!(f, "{}{sep}{}", self.from, self.to)
    }
}

/// Directions `piece` may move in: all four for a king, the two forward
/// diagonals for a man.
pub fn allowed_directions(piece: Piece) -> &'static [Direction] {
    if piece.is_king {
        return &KING_DIRECTIONS;
    }
    if piece.owner.forward() < 0 {
        &KING_DIRECTIONS[..2]
    } else {
        &KING_DIRECTIONS[2..]
    }
}

fn delta(from: Square, to: Square) -> (i32, i32) {
    (
        to.row as i32 - from.row as i32,
        to.col as i32 - from.col as i32,
    )
}

fn lands_on_empty(board: &Board, to: Square) -> bool {
    is_within_bounds(to.row as i32, to.col as i32) && board.at(to).is_none()
}

/// A one-square diagonal step in an allowed direction onto an empty square.
pub fn is_valid_simple_move(board: &Board, from: Square, to: Square, piece: Piece) -> bool {
    if !lands_on_empty(board, to) {
        return false;
    }
    let step = delta(from, to);
    allowed_directions(piece).contains(&step)
}

/// A jump along an allowed diagonal onto an empty square.
///
/// Two squares: the midpoint must hold an opponent piece. Longer (kings
/// only): the intervening squares must hold exactly one opponent piece and
/// nothing else.
pub fn is_valid_capture(board: &Board, from: Square, to: Square, piece: Piece) -> bool {
    if !lands_on_empty(board, to) {
        return false;
    }
    let (dr, dc) = delta(from, to);
    let distance = dr.abs();
    if distance < 2 || distance != dc.abs() {
        return false;
    }
    let unit = (dr.signum(), dc.signum());
    if !allowed_directions(piece).contains(&unit) {
        return false;
    }
    if distance > 2 && !piece.is_king {
        return false;
    }

    let mut jumped = false;
    for step in 1..distance {
        let Some(sq) = from.offset(unit.0 * step, unit.1 * step) else {
            return false;
        };
        match board.at(sq) {
            None => {}
            Some(other) if other.owner != piece.owner && !jumped => jumped = true,
            Some(_) => return false,
        }
    }
    jumped
}

/// The square a capture from `from` to `to` removes, if any.
pub fn jumped_square(board: &Board, from: Square, to: Square) -> Option<Square> {
    let (dr, dc) = delta(from, to);
    let distance = dr.abs();
    if distance < 2 || distance != dc.abs() {
        return None;
    }
    let unit = (dr.signum(), dc.signum());
    (1..distance)
        .filter_map(|step| from.offset(unit.0 * step, unit.1 * step))
        .find(|&sq| board.at(sq).is_some())
}

/// Two-square capture landings for `piece` standing on `from`.
pub fn captures_for(board: &Board, from: Square, piece: Piece) -> Vec<Square> {
    allowed_directions(piece)
        .iter()
        .filter_map(|&(dr, dc)| from.offset(2 * dr, 2 * dc))
        .filter(|&to| is_valid_capture(board, from, to, piece))
        .collect()
}

/// One-square moves for `piece` standing on `from`.
pub fn simple_moves_for(board: &Board, from: Square, piece: Piece) -> Vec<Square> {
    allowed_directions(piece)
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .filter(|&to| is_valid_simple_move(board, from, to, piece))
        .collect()
}

/// Squares of `player` pieces that have at least one capture, row-major.
pub fn mandatory_captures(board: &Board, player: Player) -> Vec<Square> {
    board
        .squares_of(player)
        .filter(|&(sq, piece)| !captures_for(board, sq, piece).is_empty())
        .map(|(sq, _)| sq)
        .collect()
}

/// Every simple move and two-square capture for `player`.
///
/// Pieces are visited row-major; per piece, each allowed direction yields its
/// simple move then its capture.
pub fn all_legal_moves(board: &Board, player: Player) -> Vec<Move> {
    let mut moves = Vec::new();
    for (from, piece) in board.squares_of(player) {
        for &(dr, dc) in allowed_directions(piece) {
            if let Some(to) = from.offset(dr, dc) {
                if is_valid_simple_move(board, from, to, piece) {
                    moves.push(Move::simple(from, to));
                }
            }
            if let Some(to) = from.offset(2 * dr, 2 * dc) {
                if is_valid_capture(board, from, to, piece) {
                    moves.push(Move::capture(from, to));
                }
            }
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col)
    }

    fn board(text: &str) -> Board {
        Board::from_diagram(text).unwrap()
    }

    #[test]
    fn test_allowed_directions() {
        assert_eq!(
            allowed_directions(Piece::man(Player::One)),
            &[(-1, -1), (-1, 1)]
        );
        assert_eq!(allowed_directions(Piece::man(Player::Two)), &[(1, -1), (1, 1)]);
        assert_eq!(allowed_directions(Piece::king(Player::Two)).len(), 4);

        for player in [Player::One, Player::Two] {
            let dirs = allowed_directions(Piece::man(player));
            assert!(dirs.iter().all(|&(dr, _)| dr == player.forward()));
        }
    }

    #[test]
    fn test_simple_move_one_square_only() {
        let b = board(
            "-.-.-.-.
             .-.-.-.-
             -.-.-.-.
             .-.-.-.-
             -.-.-.-.
             .-.-O-.-
             -.-.-.-.
             .-.-.-.-",
        );
        let king = Piece::king(Player::One);
        let from = sq(5, 4);
        assert!(is_valid_simple_move(&b, from, sq(4, 3), king));
        assert!(is_valid_simple_move(&b, from, sq(6, 5), king));
        // No sliding, even for a king.
        assert!(!is_valid_simple_move(&b, from, sq(3, 2), king));
        // Not diagonal.
        assert!(!is_valid_simple_move(&b, from, sq(4, 4), king));
    }

    #[test]
    fn test_man_cannot_move_backwards() {
        let b = Board::new();
        let man = Piece::man(Player::One);
        assert!(is_valid_simple_move(&b, sq(5, 0), sq(4, 1), man));
        let mut b = b;
        b.set(6, 1, None);
        assert!(!is_valid_simple_move(&b, sq(5, 0), sq(6, 1), man));
    }

    #[test]
    fn test_simple_move_onto_occupied_square() {
        let b = Board::new();
        let man = Piece::man(Player::One);
        assert!(!is_valid_simple_move(&b, sq(6, 1), sq(5, 0), man));
    }

    #[test]
    fn test_two_square_capture() {
        let b = board(
            "-.-.-.-.
             .-.-.-.-
             -.-.-.-.
             .-.-.-.-
             -.-x-.-.
             .-.-o-.-
             -.-.-.-.
             .-.-.-.-",
        );
        let man = Piece::man(Player::One);
        assert!(is_valid_capture(&b, sq(5, 4), sq(3, 2), man));
        assert!(!is_valid_capture(&b, sq(5, 4), sq(3, 6), man));
        assert_eq!(captures_for(&b, sq(5, 4), man), vec![sq(3, 2)]);
        assert_eq!(jumped_square(&b, sq(5, 4), sq(3, 2)), Some(sq(4, 3)));
    }

    #[test]
    fn test_cannot_jump_own_piece() {
        let b = board(
            "-.-.-.-.
             .-.-.-.-
             -.-.-.-.
             .-.-.-.-
             -.-o-.-.
             .-.-o-.-
             -.-.-.-.
             .-.-.-.-",
        );
        assert!(captures_for(&b, sq(5, 4), Piece::man(Player::One)).is_empty());
    }

    #[test]
    fn test_capture_landing_must_be_empty() {
        let b = board(
            "-.-.-.-.
             .-.-.-.-
             -.-.-.-.
             .-x-.-.-
             -.-x-.-.
             .-.-o-.-
             -.-.-.-.
             .-.-.-.-",
        );
        assert!(!is_valid_capture(&b, sq(5, 4), sq(3, 2), Piece::man(Player::One)));
    }

    #[test]
    fn test_king_long_capture() {
        let king = Piece::king(Player::One);
        let mut b = Board::empty();
        b.set(7, 0, Some(king));
        b.set(5, 2, Some(Piece::man(Player::Two)));
        assert!(is_valid_capture(&b, sq(7, 0), sq(4, 3), king));
        assert!(is_valid_capture(&b, sq(7, 0), sq(2, 5), king));
        assert_eq!(jumped_square(&b, sq(7, 0), sq(2, 5)), Some(sq(5, 2)));

        // A man may not make the long jump.
        assert!(!is_valid_capture(&b, sq(7, 0), sq(4, 3), Piece::man(Player::One)));

        // Two pieces in the way invalidate it.
        b.set(3, 4, Some(Piece::man(Player::Two)));
        assert!(!is_valid_capture(&b, sq(7, 0), sq(2, 5), king));

        // An own piece anywhere on the path invalidates it.
        b.set(3, 4, None);
        b.set(6, 1, Some(Piece::man(Player::One)));
        assert!(!is_valid_capture(&b, sq(7, 0), sq(4, 3), king));

        // No enemy on the path means no capture.
        let mut empty_path = Board::empty();
        empty_path.set(7, 0, Some(king));
        assert!(!is_valid_capture(&empty_path, sq(7, 0), sq(4, 3), king));
    }

    #[test]
    fn test_long_captures_are_not_enumerated() {
        let mut b = Board::empty();
        let king = Piece::king(Player::One);
        b.set(7, 0, Some(king));
        b.set(4, 3, Some(Piece::man(Player::Two)));
        assert!(is_valid_capture(&b, sq(7, 0), sq(3, 4), king));
        assert!(captures_for(&b, sq(7, 0), king).is_empty());
        assert!(all_legal_moves(&b, Player::One).iter().all(|m| !m.is_capture));
        assert!(mandatory_captures(&b, Player::One).is_empty());
    }

    #[test]
    fn test_mandatory_captures() {
        let b = board(
            "-.-.-.-.
             .-.-.-.-
             -.-.-.-.
             .-.-.-.-
             -.-x-.-.
             .-.-o-o-
             -.-.-.-.
             .-.-.-.-",
        );
        assert_eq!(mandatory_captures(&b, Player::One), vec![sq(5, 4)]);
        // The Player 2 man can jump back over (5,4) to (6,5).
        assert_eq!(mandatory_captures(&b, Player::Two), vec![sq(4, 3)]);
        assert!(mandatory_captures(&Board::new(), Player::One).is_empty());
    }

    #[test]
    fn test_opening_move_count() {
        let b = Board::new();
        let moves = all_legal_moves(&b, Player::One);
        assert_eq!(moves.len(), 7);
        assert!(moves.iter().all(|m| !m.is_capture && m.from.row == 5));
        assert_eq!(moves[0], Move::simple(sq(5, 0), sq(4, 1)));
        assert_eq!(all_legal_moves(&b, Player::Two).len(), 7);
    }

    #[test]
    fn test_enumeration_order_simple_before_capture() {
        let b = board(
            "-.-.-.-.
             .-.-.-.-
             -.-.-.-.
             .-.-.-.-
             -.-.-x-.
             .-.-o-.-
             -.-.-.-.
             .-.-.-.-",
        );
        let moves = all_legal_moves(&b, Player::One);
        assert_eq!(
            moves,
            vec![
                Move::simple(sq(5, 4), sq(4, 3)),
                Move::capture(sq(5, 4), sq(3, 6)),
            ]
        );
    }
}
