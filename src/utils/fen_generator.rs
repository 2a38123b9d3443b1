//! Position-to-FEN generation and repetition keys.

use shakmaty::{fen::Fen, Chess, EnPassantMode};

pub fn generate_fen(position: &Chess) -> String {
    Fen::from_position(position.clone(), EnPassantMode::Legal).to_string()
}

/// Identity of a position for repetition counting: placement, side to move,
/// castling rights and a legal en-passant square. The move clocks are left out.
pub fn repetition_key(position: &Chess) -> String {
    generate_fen(position)
        .split_whitespace()
        .take(4)
        .collect::<Vec<_>>()
        .join(" ")
}
