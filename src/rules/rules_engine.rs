//! Rules engine abstraction used by the turn pipeline.
//!
//! Everything that needs chess knowledge (legality, check, draw detection,
//! record format) goes through this trait, so the arbiter, applicator and
//! oracle never touch a board directly.

use crate::errors::{EngineResult, IllegalMove};
use crate::game_state::chess_types::{GameState, MovePair, Status};

pub trait RulesEngine {
    /// Standard starting position with an empty history.
    fn new_position(&self) -> GameState;

    /// Rebuild a position from a persisted game record.
    fn load_position(&self, record: &str) -> EngineResult<GameState>;

    /// Apply one move. The input position is never modified.
    fn apply(&self, position: &GameState, pair: MovePair) -> Result<GameState, IllegalMove>;

    fn status(&self, position: &GameState) -> Status;

    /// Render the persisted game record for a position.
    fn serialize(&self, position: &GameState) -> String;

    /// Every legal move pair of the side to move, when the engine can list
    /// them directly. Engines that return `None` are enumerated by trial.
    fn legal_move_pairs(&self, _position: &GameState) -> Option<Vec<MovePair>> {
        None
    }
}
