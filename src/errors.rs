//! Errors used throughout the turn pipeline.
//!
//! Every failure is terminal for the invocation that hit it. The lifecycle
//! controller folds the component errors below into a single [`AbortReason`],
//! which is what gets reported back to the participant.

use serde::Serialize;
use thiserror::Error;

use crate::game_state::chess_types::MovePair;

/// Malformed or unrecognized issue title.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "input", rename_all = "snake_case")]
pub enum ParseError {
    /// Both the label and the game number are blank.
    #[error("the game title is blank")]
    MissingTitle,

    /// The label is not the configured command prefix.
    #[error("`{0}` is not the game label")]
    UnknownLabel(String),

    /// The action field is neither `new` nor `move`.
    #[error("`{0}` is not a command, new|move are the only allowed commands")]
    UnknownCommand(String),

    /// A `move` action without a four-character coordinate pair.
    #[error("`{0}` is not a move, expected four characters such as e2e4")]
    MissingOrInvalidMove(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Turn-order violation found in the event log.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnRejection {
    #[error("{actor} made the previous move and cannot take the next turn")]
    ConsecutiveMove { actor: String },
}

/// The rules engine refused the move. Carries the attempted pair for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("'{pair}' is an invalid move")]
pub struct IllegalMove {
    pub pair: MovePair,
}

/// The rules engine could not produce a position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid game record: {0}")]
    InvalidRecord(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Failures of the game record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("game record I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The record changed between read and conditional write.
    #[error("game record changed since it was read")]
    Conflict,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Terminal outcome of an invocation that did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum AbortReason {
    #[error("could not parse command: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    ConsecutiveMove(#[from] TurnRejection),

    #[error(transparent)]
    IllegalMove(#[from] IllegalMove),

    #[error("rules engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("game record could not be updated: {0}")]
    Persistence(String),

    #[error("another move was recorded first")]
    WriteConflict,
}

impl From<EngineError> for AbortReason {
    fn from(err: EngineError) -> Self {
        AbortReason::EngineUnavailable(err.to_string())
    }
}

impl From<StoreError> for AbortReason {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => AbortReason::WriteConflict,
            StoreError::Io(io) => AbortReason::Persistence(io.to_string()),
        }
    }
}
