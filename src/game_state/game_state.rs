//! Authoritative position plus the history needed to judge it.
//!
//! `GameState` pairs the rules-library board with everything the library does
//! not remember on its own: where the game started, every move played so far,
//! the repetition history, and a result recorded outside the board (a
//! resignation). `Clone` is the disposable-copy operation used by trial moves.

use shakmaty::{Chess, Position};

use crate::errors::{EngineError, EngineResult};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::{Color, Status};
use crate::utils::fen_generator::{generate_fen, repetition_key};
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone)]
pub struct GameState {
    /// Position the game started from.
    pub initial: Chess,
    /// Current board.
    pub board: Chess,

    /// Moves played from `initial`, in coordinate form (`e2e4`, `e7e8q`).
    pub move_history: Vec<String>,
    /// Repetition keys of every position reached, `initial` included.
    pub repetition_history: Vec<String>,

    /// Result recorded in the game record that the board cannot show.
    pub recorded_result: Option<Status>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::from_position(Chess::default())
    }
}

impl GameState {
    #[inline]
    pub fn new_game() -> Self {
        Self::default()
    }

    pub fn from_fen(fen: &str) -> EngineResult<Self> {
        let position = parse_fen(fen).map_err(EngineError::InvalidFen)?;
        Ok(Self::from_position(position))
    }

    pub fn from_position(position: Chess) -> Self {
        let key = repetition_key(&position);
        Self {
            initial: position.clone(),
            board: position,
            move_history: Vec::new(),
            repetition_history: vec![key],
            recorded_result: None,
        }
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(&self.board)
    }

    #[inline]
    pub fn initial_fen(&self) -> String {
        generate_fen(&self.initial)
    }

    /// Whether the game started from somewhere other than the standard setup.
    pub fn has_custom_setup(&self) -> bool {
        self.initial_fen() != STARTING_POSITION_FEN
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        Color::from(self.board.turn())
    }

    #[inline]
    pub fn ply(&self) -> usize {
        self.move_history.len()
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.board.halfmoves()
    }

    /// How many times the current position has occurred, counting now.
    pub fn repetition_count(&self) -> usize {
        let Some(current) = self.repetition_history.last() else {
            return 0;
        };
        self.repetition_history
            .iter()
            .filter(|key| *key == current)
            .count()
    }

    /// Record a move already validated by the rules engine.
    pub(crate) fn push_move(&mut self, next: Chess, coordinates: String) {
        self.repetition_history.push(repetition_key(&next));
        self.move_history.push(coordinates);
        self.board = next;
    }
}
