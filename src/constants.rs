//! Constants for board geometry, pacing, and defaults.
//!
//! Runtime overrides for the timing values live in
//! [`GameConfig`](crate::game::GameConfig).

use std::time::Duration;

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). Checkers is always played on 8x8.
pub const BOARD_SIZE: usize = 8;

/// Number of rows each side fills at the start of a game.
pub const HOME_ROWS: usize = 3;

/// Pieces per side in the initial layout.
pub const PIECES_PER_SIDE: usize = HOME_ROWS * BOARD_SIZE / 2;

// =============================================================================
// Pacing
// =============================================================================

/// Pause before the AI plays its move.
pub const AI_MOVE_DELAY: Duration = Duration::from_millis(500);

/// How long the "must capture" advisory stays visible.
pub const CAPTURE_ADVISORY_DURATION: Duration = Duration::from_millis(2000);

// =============================================================================
// Names
// =============================================================================

/// Default name for Player 1.
pub const DEFAULT_PLAYER1_NAME: &str = "Player 1";

/// Default name for Player 2.
pub const DEFAULT_PLAYER2_NAME: &str = "Player 2";

/// Advisory text shown when a capture is mandatory.
pub const CAPTURE_ADVISORY_TEXT: &str = "You must capture!";

// =============================================================================
// Diagram Glyphs
// =============================================================================

/// Light (never playable) square.
pub const GLYPH_LIGHT: char = '-';

/// Dark empty square.
pub const GLYPH_EMPTY: char = '.';

/// Player 1 man and king.
pub const GLYPH_P1_MAN: char = 'o';
pub const GLYPH_P1_KING: char = 'O';

/// Player 2 man and king.
pub const GLYPH_P2_MAN: char = 'x';
pub const GLYPH_P2_KING: char = 'X';
