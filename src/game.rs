//! Turn controller and the interface offered to a presentation layer.
//!
//! A [`Game`] owns a [`GameState`] and is the only thing that mutates it.
//! Human input arrives through [`Game::submit_selection`] and
//! [`Game::submit_destination`]; the AI plays through
//! [`Game::request_ai_move`] or, after the pacing delay, [`Game::poll`].
//! Renderers read snapshots and drain [`GameEvent`]s; the core never calls
//! back into them.
//!
//! ## Turn flow
//!
//! ```text
//! Idle --select own piece--> Selected --pick destination--> move applied
//!   ^                          |                              |
//!   +--reselect / other cell---+        chain? --yes--> Selected (captures only)
//!   +-------------------------------------no--- turn passes, outcome checked
//! ```

use std::time::{Duration, Instant};

use fastrand::Rng;
use tracing::{debug, info, trace};

use crate::ai::{select_continuation, select_move};
use crate::board::{Board, Player, Snapshot, Square};
use crate::constants::{
    AI_MOVE_DELAY, BOARD_SIZE, CAPTURE_ADVISORY_DURATION, CAPTURE_ADVISORY_TEXT,
    DEFAULT_PLAYER1_NAME, DEFAULT_PLAYER2_NAME,
};
use crate::error::Rejection;
use crate::executor::{MoveOutcome, Scores, apply_move};
use crate::outcome::{Outcome, evaluate};
use crate::rules::{Move, captures_for, mandatory_captures, simple_moves_for};
use crate::schedule::DeferredMove;

/// The side the AI plays in [`GameMode::VersusAi`].
pub const AI_PLAYER: Player = Player::Two;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GameMode {
    /// One human (Player 1) against the AI (Player 2).
    #[default]
    VersusAi,
    /// Two humans sharing the board.
    Multiplayer,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerNames {
    pub player1: String,
    pub player2: String,
}

impl Default for PlayerNames {
    fn default() -> Self {
        Self {
            player1: DEFAULT_PLAYER1_NAME.to_string(),
            player2: DEFAULT_PLAYER2_NAME.to_string(),
        }
    }
}

impl PlayerNames {
    /// Names are trimmed; a blank name falls back to the default.
    pub fn new(player1: &str, player2: &str) -> Self {
        let pick = |name: &str, default: &str| {
            let name = name.trim();
            if name.is_empty() {
                default.to_string()
            } else {
                name.to_string()
            }
        };
        Self {
            player1: pick(player1, DEFAULT_PLAYER1_NAME),
            player2: pick(player2, DEFAULT_PLAYER2_NAME),
        }
    }

    pub fn get(&self, player: Player) -> &str {
        match player {
            Player::One => &self.player1,
            Player::Two => &self.player2,
        }
    }
}

/// Runtime knobs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Pause between the human's move and the AI's reply.
    pub ai_delay: Duration,
    /// Lifetime of the "must capture" advisory.
    pub advisory_duration: Duration,
    /// Seed for the AI's random choices; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ai_delay: AI_MOVE_DELAY,
            advisory_duration: CAPTURE_ADVISORY_DURATION,
            seed: None,
        }
    }
}

/// Selection state of the side on turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Selected {
        square: Square,
        destinations: Vec<Square>,
        /// The piece is mid-chain and may only continue capturing.
        chain: bool,
    },
}

/// Everything that changes during play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub current: Player,
    pub phase: Phase,
    pub scores: Scores,
    pub outcome: Option<Outcome>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_board(Board::new(), Player::One)
    }
}

impl GameState {
    /// A fresh state on `board` with `to_move` on turn. The outcome is only
    /// evaluated after moves, not here.
    pub fn with_board(board: Board, to_move: Player) -> Self {
        Self {
            board,
            current: to_move,
            phase: Phase::Idle,
            scores: Scores::default(),
            outcome: None,
        }
    }

    fn chain_square(&self) -> Option<Square> {
        match self.phase {
            Phase::Selected {
                square,
                chain: true,
                ..
            } => Some(square),
            _ => None,
        }
    }

    fn selected(&self) -> Option<Square> {
        match self.phase {
            Phase::Selected { square, .. } => Some(square),
            Phase::Idle => None,
        }
    }
}

/// Notifications for a presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    GameReset,
    SelectionChanged(Option<Square>),
    CaptureRequired,
    PieceMoved {
        from: Square,
        to: Square,
        captured: Option<Square>,
    },
    Promoted(Square),
    ChainContinues(Square),
    TurnPassed(Player),
    AiMoveScheduled,
    GameOver(Outcome),
}

/// A transient message that clears itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Advisory {
    pub message: &'static str,
    pub expires: Instant,
}

/// Answer to [`Game::submit_selection`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    Selected {
        square: Square,
        destinations: Vec<Square>,
    },
    Deselected,
}

/// Answer to [`Game::submit_destination`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    Moved(MoveReport),
    Deselected,
}

/// One applied move and what followed from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub mv: Move,
    pub result: MoveOutcome,
    /// The opponent is now on turn.
    pub turn_passed: bool,
    /// Set if this move ended the game.
    pub outcome: Option<Outcome>,
}

/// Answer to [`Game::request_ai_move`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AiTurn {
    /// The moves of the AI's turn, more than one for a capture chain.
    Played(Vec<MoveReport>),
    /// The AI had no legal move; the game has been evaluated instead.
    NoMove,
}

/// A checkers game between two humans or a human and the AI.
pub struct Game {
    state: GameState,
    mode: GameMode,
    names: PlayerNames,
    config: GameConfig,
    rng: Rng,
    pending_ai: DeferredMove,
    advisory: Option<Advisory>,
    events: Vec<GameEvent>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameMode::default(), PlayerNames::default(), GameConfig::default())
    }
}

impl Game {
    pub fn new(mode: GameMode, names: PlayerNames, config: GameConfig) -> Self {
        Self::from_state(mode, names, config, GameState::default())
    }

    /// Start from an arbitrary position.
    pub fn from_state(
        mode: GameMode,
        names: PlayerNames,
        config: GameConfig,
        state: GameState,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };
        Self {
            state,
            mode,
            names,
            config,
            rng,
            pending_ai: DeferredMove::default(),
            advisory: None,
            events: Vec::new(),
        }
    }

    /// Throw away the current game and start over from the opening layout.
    pub fn reset_game(&mut self, mode: GameMode, names: PlayerNames) {
        info!(?mode, player1 = %names.player1, player2 = %names.player2, "new game");
        self.state = GameState::default();
        self.mode = mode;
        self.names = names;
        self.pending_ai.cancel();
        self.advisory = None;
        self.events.clear();
        self.emit(GameEvent::GameReset);
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn board_snapshot(&self) -> Snapshot {
        self.state.board.snapshot()
    }

    pub fn turn_owner(&self) -> Player {
        self.state.current
    }

    pub fn scores(&self) -> Scores {
        self.state.scores
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn names(&self) -> &PlayerNames {
        &self.names
    }

    pub fn selected(&self) -> Option<Square> {
        self.state.selected()
    }

    pub fn is_ai_pending(&self) -> bool {
        self.pending_ai.is_pending()
    }

    /// Time until the pending AI move is due.
    pub fn ai_due_in(&self, now: Instant) -> Option<Duration> {
        self.pending_ai.remaining(now)
    }

    /// The advisory, if it has not yet expired at `now`.
    pub fn active_advisory(&self, now: Instant) -> Option<Advisory> {
        self.advisory.filter(|a| now < a.expires)
    }

    /// Take every event recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Where the piece on `(row, col)` may go right now, for highlighting.
    ///
    /// Only captures are offered while its side has one anywhere on the
    /// board, and only the chaining piece's captures mid-chain.
    pub fn legal_destinations(&self, row: usize, col: usize) -> Vec<Square> {
        if self.state.outcome.is_some() || row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Vec::new();
        }
        let sq = Square::new(row, col);
        if let Some(chained) = self.state.chain_square() {
            if chained != sq {
                return Vec::new();
            }
        }
        self.destinations_from(sq)
    }

    fn destinations_from(&self, sq: Square) -> Vec<Square> {
        let board = &self.state.board;
        let Some(piece) = board.at(sq) else {
            return Vec::new();
        };
        if mandatory_captures(board, piece.owner).is_empty() {
            simple_moves_for(board, sq, piece)
        } else {
            captures_for(board, sq, piece)
        }
    }

    // -------------------------------------------------------------------------
    // Human input
    // -------------------------------------------------------------------------

    fn check_human_input(&self) -> Result<(), Rejection> {
        if self.state.outcome.is_some() {
            return Err(Rejection::GameOver);
        }
        if self.pending_ai.is_pending()
            || (self.mode == GameMode::VersusAi && self.state.current == AI_PLAYER)
        {
            return Err(Rejection::AiMovePending);
        }
        Ok(())
    }

    fn square(row: usize, col: usize) -> Result<Square, Rejection> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(Rejection::OutOfBounds { row, col });
        }
        Ok(Square::new(row, col))
    }

    /// Pick up (or put back) the piece on `(row, col)`.
    pub fn submit_selection(&mut self, row: usize, col: usize) -> Result<Selection, Rejection> {
        self.check_human_input()?;
        let sq = Self::square(row, col)?;

        if let Some(chained) = self.state.chain_square() {
            if chained != sq {
                return Err(Rejection::ChainInProgress(chained));
            }
            return Ok(Selection::Selected {
                square: sq,
                destinations: self.destinations_from(sq),
            });
        }

        let piece = self.state.board.at(sq).ok_or(Rejection::EmptySquare(sq))?;
        if piece.owner != self.state.current {
            return Err(Rejection::NotOwnPiece(sq));
        }

        if self.state.selected() == Some(sq) {
            debug!(%sq, "deselected");
            self.deselect();
            return Ok(Selection::Deselected);
        }

        let mandatory = mandatory_captures(&self.state.board, self.state.current);
        if !mandatory.is_empty() && !mandatory.contains(&sq) {
            debug!(%sq, ?mandatory, "selection refused, capture required");
            self.advisory = Some(Advisory {
                message: CAPTURE_ADVISORY_TEXT,
                expires: Instant::now() + self.config.advisory_duration,
            });
            self.emit(GameEvent::CaptureRequired);
            return Err(Rejection::CaptureRequired);
        }

        let destinations = self.destinations_from(sq);
        debug!(%sq, ?destinations, "selected");
        self.state.phase = Phase::Selected {
            square: sq,
            destinations: destinations.clone(),
            chain: false,
        };
        self.emit(GameEvent::SelectionChanged(Some(sq)));
        Ok(Selection::Selected {
            square: sq,
            destinations,
        })
    }

    /// Move the selected piece to `(row, col)`. A square that is not one of
    /// the offered destinations just drops the selection, except mid-chain,
    /// where it is refused with [`Rejection::ChainInProgress`] and the
    /// selection stays.
    pub fn submit_destination(
        &mut self,
        row: usize,
        col: usize,
    ) -> Result<Destination, Rejection> {
        self.check_human_input()?;
        let to = Self::square(row, col)?;

        let (from, offered, chain) = match &self.state.phase {
            Phase::Idle => return Err(Rejection::NoSelection),
            Phase::Selected {
                square,
                destinations,
                chain,
            } => (*square, destinations.contains(&to), *chain),
        };
        if !offered {
            if chain {
                return Err(Rejection::ChainInProgress(from));
            }
            debug!(%to, "destination not offered, deselecting");
            self.deselect();
            return Ok(Destination::Deselected);
        }

        let mv = Move {
            from,
            to,
            is_capture: chain || from.row.abs_diff(to.row) >= 2,
        };
        self.play(mv).map(Destination::Moved)
    }

    fn deselect(&mut self) {
        self.state.phase = Phase::Idle;
        self.emit(GameEvent::SelectionChanged(None));
    }

    // -------------------------------------------------------------------------
    // AI
    // -------------------------------------------------------------------------

    /// Play the AI's whole turn now, cancelling any pending deferred move.
    pub fn request_ai_move(&mut self) -> Result<AiTurn, Rejection> {
        if self.state.outcome.is_some() {
            return Err(Rejection::GameOver);
        }
        if self.mode != GameMode::VersusAi || self.state.current != AI_PLAYER {
            return Err(Rejection::NotAiTurn);
        }
        self.pending_ai.cancel();
        self.play_turn_for_current()
    }

    /// Play the pending AI move if it is due at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<Result<AiTurn, Rejection>> {
        if self.pending_ai.fire(now) {
            Some(self.request_ai_move())
        } else {
            None
        }
    }

    /// Let the AI policy play a full turn for whoever is on move. Used for the
    /// AI side and for self-play. A chain in progress is finished first.
    pub fn play_turn_for_current(&mut self) -> Result<AiTurn, Rejection> {
        if self.state.outcome.is_some() {
            return Err(Rejection::GameOver);
        }
        let player = self.state.current;
        let first = match self.state.chain_square() {
            Some(sq) => select_continuation(&self.state.board, sq),
            None => select_move(&self.state.board, player, &mut self.rng),
        };
        let Some(mut mv) = first else {
            info!(%player, "no legal move");
            self.finish_if_over();
            return Ok(AiTurn::NoMove);
        };

        let mut reports = Vec::new();
        loop {
            debug!(%player, %mv, "ai move");
            let report = self.play(mv)?;
            let chain_from = report.mv.to;
            let continues = report.result.chain_available() && report.outcome.is_none();
            reports.push(report);
            if !continues {
                break;
            }
            match select_continuation(&self.state.board, chain_from) {
                Some(next) => mv = next,
                None => break,
            }
        }
        Ok(AiTurn::Played(reports))
    }

    // -------------------------------------------------------------------------
    // Shared move path
    // -------------------------------------------------------------------------

    fn play(&mut self, mv: Move) -> Result<MoveReport, Rejection> {
        let state = &mut self.state;
        let result = apply_move(&mut state.board, &mut state.scores, mv.from, mv.to)
            .ok_or(Rejection::EmptySquare(mv.from))?;

        self.emit(GameEvent::PieceMoved {
            from: mv.from,
            to: mv.to,
            captured: result.captured,
        });
        if result.promoted {
            debug!(sq = %mv.to, "crowned");
            self.emit(GameEvent::Promoted(mv.to));
        }

        let turn_passed = !result.chain_available();
        if turn_passed {
            self.state.phase = Phase::Idle;
            self.state.current = self.state.current.opponent();
            debug!(player = %self.state.current, "turn passed");
            self.emit(GameEvent::SelectionChanged(None));
            self.emit(GameEvent::TurnPassed(self.state.current));
        } else {
            debug!(sq = %mv.to, chain = ?result.chain, "chain continues");
            self.state.phase = Phase::Selected {
                square: mv.to,
                destinations: result.chain.clone(),
                chain: true,
            };
            self.emit(GameEvent::ChainContinues(mv.to));
        }

        let outcome = self.finish_if_over();
        if outcome.is_none()
            && turn_passed
            && self.mode == GameMode::VersusAi
            && self.state.current == AI_PLAYER
        {
            trace!(delay = ?self.config.ai_delay, "ai move scheduled");
            self.pending_ai.schedule(Instant::now(), self.config.ai_delay);
            self.emit(GameEvent::AiMoveScheduled);
        }

        Ok(MoveReport {
            mv,
            result,
            turn_passed,
            outcome,
        })
    }

    fn finish_if_over(&mut self) -> Option<Outcome> {
        let outcome = evaluate(&self.state.board, self.state.current)?;
        info!(%outcome, scores = ?self.state.scores, "game over");
        self.state.outcome = Some(outcome);
        self.state.phase = Phase::Idle;
        self.pending_ai.cancel();
        self.emit(GameEvent::GameOver(outcome));
        Some(outcome)
    }

    fn emit(&mut self, event: GameEvent) {
        trace!(?event, "event");
        self.events.push(event);
    }

    // -------------------------------------------------------------------------
    // Labels
    // -------------------------------------------------------------------------

    /// Whose turn it is, phrased for the player.
    pub fn turn_label(&self) -> String {
        match (self.mode, self.state.current) {
            (GameMode::VersusAi, Player::One) => "Your Turn".to_string(),
            (GameMode::VersusAi, Player::Two) => "AI's Turn".to_string(),
            (GameMode::Multiplayer, player) => format!("{}'s Turn", self.names.get(player)),
        }
    }

    /// The end-of-game banner, if the game is over.
    pub fn outcome_message(&self) -> Option<String> {
        let outcome = self.state.outcome?;
        let message = match (self.mode, outcome.winner()) {
            (_, None) => "It's a Draw!".to_string(),
            (GameMode::VersusAi, Some(Player::One)) => "You Win!".to_string(),
            (GameMode::VersusAi, Some(Player::Two)) => "AI Wins!".to_string(),
            (GameMode::Multiplayer, Some(player)) => format!("{} Wins!", self.names.get(player)),
        };
        Some(message)
    }

    /// Scoreboard line for `player`.
    pub fn score_line(&self, player: Player) -> String {
        let score = self.state.scores.get(player);
        let name = self.names.get(player);
        match player {
            Player::One => format!("{name} (You): {score}"),
            Player::Two => {
                let role = match self.mode {
                    GameMode::VersusAi => "AI",
                    GameMode::Multiplayer => "Player 2",
                };
                format!("{name} ({role}): {score}")
            }
        }
    }
}
