//! Square and move-pair conversions for coordinate notation.
//!
//! Converts between human-readable coordinates (`e4`, `e2e4`) and the
//! square/move-pair types used by the command parser, the event log and the
//! rules engine.

use crate::game_state::chess_types::{MovePair, Square};

/// Convert a coordinate (for example: "e4") to a square.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, String> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(format!("Invalid algebraic square: {square}"));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(format!("Invalid algebraic file: {}", file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(format!("Invalid algebraic rank: {}", rank as char));
    }

    Square::new(file - b'a', rank - b'1').ok_or_else(|| format!("Invalid algebraic square: {square}"))
}

/// Convert exactly four coordinate characters (for example: "e2e4") to a move pair.
pub fn coordinates_to_move_pair(coordinates: &str) -> Result<MovePair, String> {
    if coordinates.len() != 4 || !coordinates.is_ascii() {
        return Err(format!("Invalid move coordinates: {coordinates}"));
    }

    let from = algebraic_to_square(&coordinates[0..2])?;
    let to = algebraic_to_square(&coordinates[2..4])?;
    Ok(MovePair::new(from, to))
}
