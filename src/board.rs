//! Board model: players, pieces, squares, and the 8x8 grid.
//!
//! Rows run 0..8 top to bottom and columns 0..8 left to right. Only dark
//! squares, where `row + col` is odd, ever hold a piece. The board itself does
//! no rule checking beyond bounds; legality lives in [`crate::rules`].

use std::fmt;

use crate::constants::{
    BOARD_SIZE, GLYPH_EMPTY, GLYPH_LIGHT, GLYPH_P1_KING, GLYPH_P1_MAN, GLYPH_P2_KING,
    GLYPH_P2_MAN, HOME_ROWS,
};
use crate::error::DiagramError;

/// One of the two sides.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    /// Starts on rows 5-7 and moves up the board.
    One,
    /// Starts on rows 0-2 and moves down the board.
    Two,
}

impl Player {
    /// Numeric id, 1 or 2.
    pub fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Row step of a forward move for a man of this side.
    pub fn forward(self) -> i32 {
        match self {
            Player::One => -1,
            Player::Two => 1,
        }
    }

    /// The far row, where men of this side are crowned.
    pub fn king_row(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => BOARD_SIZE - 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.id())
    }
}

/// A piece on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub owner: Player,
    pub is_king: bool,
}

impl Piece {
    pub fn man(owner: Player) -> Self {
        Self {
            owner,
            is_king: false,
        }
    }

    pub fn king(owner: Player) -> Self {
        Self {
            owner,
            is_king: true,
        }
    }

    fn glyph(self) -> char {
        match (self.owner, self.is_king) {
            (Player::One, false) => GLYPH_P1_MAN,
            (Player::One, true) => GLYPH_P1_KING,
            (Player::Two, false) => GLYPH_P2_MAN,
            (Player::Two, true) => GLYPH_P2_KING,
        }
    }

    fn from_glyph(c: char) -> Option<Self> {
        match c {
            GLYPH_P1_MAN => Some(Piece::man(Player::One)),
            GLYPH_P1_KING => Some(Piece::king(Player::One)),
            GLYPH_P2_MAN => Some(Piece::man(Player::Two)),
            GLYPH_P2_KING => Some(Piece::king(Player::Two)),
            _ => None,
        }
    }
}

/// A board coordinate. Always inside the grid when produced by this crate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: usize,
    pub col: usize,
}

impl Square {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Dark squares are the only ones pieces may stand on.
    pub fn is_playable(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// The square `(dr, dc)` steps away, or `None` if that falls off the board.
    pub fn offset(self, dr: i32, dc: i32) -> Option<Square> {
        let row = self.row as i32 + dr;
        let col = self.col as i32 + dc;
        if is_within_bounds(row, col) {
            Some(Square::new(row as usize, col as usize))
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// True iff both coordinates lie in `0..8`.
pub fn is_within_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

/// Read-only grid handed to renderers.
pub type Snapshot = [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE];

/// The 8x8 checkers board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: Snapshot,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// A board in the standard starting layout.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.initialize();
        board
    }

    /// A board with no pieces.
    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Replace every cell with the starting layout: Player 2 on the dark
    /// squares of rows 0-2, Player 1 on rows 5-7, no kings.
    pub fn initialize(&mut self) {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let sq = Square::new(row, col);
                self.cells[row][col] = if !sq.is_playable() {
                    None
                } else if row < HOME_ROWS {
                    Some(Piece::man(Player::Two))
                } else if row >= BOARD_SIZE - HOME_ROWS {
                    Some(Piece::man(Player::One))
                } else {
                    None
                };
            }
        }
    }

    /// The piece at `(row, col)`, or `None` for an empty or off-board square.
    pub fn get(&self, row: usize, col: usize) -> Option<Piece> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return None;
        }
        self.cells[row][col]
    }

    /// Put `value` on `(row, col)`. Writes off the board are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: Option<Piece>) {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return;
        }
        self.cells[row][col] = value;
    }

    pub fn at(&self, sq: Square) -> Option<Piece> {
        self.get(sq.row, sq.col)
    }

    pub fn put(&mut self, sq: Square, value: Option<Piece>) {
        self.set(sq.row, sq.col, value);
    }

    /// Remove and return the piece on `sq`.
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.at(sq);
        self.put(sq, None);
        piece
    }

    /// Every square holding a piece of `player`, in row-major order.
    pub fn squares_of(&self, player: Player) -> impl Iterator<Item = (Square, Piece)> + '_ {
        playable_squares().filter_map(move |sq| match self.at(sq) {
            Some(p) if p.owner == player => Some((sq, p)),
            _ => None,
        })
    }

    /// Number of pieces `player` has left.
    pub fn count(&self, player: Player) -> usize {
        self.squares_of(player).count()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.cells
    }

    /// Parse a diagram of 8 lines of 8 glyphs (see [`crate::constants`]).
    /// Whitespace inside a line is ignored, as are blank lines.
    pub fn from_diagram(text: &str) -> Result<Board, DiagramError> {
        let rows: Vec<Vec<char>> = text
            .lines()
            .map(|l| l.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|r| !r.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE {
            return Err(DiagramError::RowCount(rows.len()));
        }

        let mut board = Board::empty();
        for (row, glyphs) in rows.iter().enumerate() {
            if glyphs.len() != BOARD_SIZE {
                return Err(DiagramError::RowWidth {
                    row,
                    len: glyphs.len(),
                });
            }
            for (col, &glyph) in glyphs.iter().enumerate() {
                if glyph == GLYPH_LIGHT || glyph == GLYPH_EMPTY {
                    continue;
                }
                let piece = Piece::from_glyph(glyph)
                    .ok_or(DiagramError::UnknownGlyph { glyph, row, col })?;
                if !Square::new(row, col).is_playable() {
                    return Err(DiagramError::LightSquare { row, col });
                }
                board.set(row, col, Some(piece));
            }
        }
        Ok(board)
    }
}

/// All 32 dark squares in row-major order.
pub fn playable_squares() -> impl Iterator<Item = Square> {
    (0..BOARD_SIZE)
        .flat_map(|row| (0..BOARD_SIZE).map(move |col| Square::new(row, col)))
        .filter(|sq| sq.is_playable())
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let ch = match self.get(row, col) {
                    Some(piece) => piece.glyph(),
                    None if Square::new(row, col).is_playable() => GLYPH_EMPTY,
                    None => GLYPH_LIGHT,
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
