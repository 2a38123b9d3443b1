//! FEN-to-position parser.
//!
//! Builds a rules-library position from a Forsyth-Edwards Notation string.
//! Board legality (king counts, impossible checks) is validated by the
//! library; this layer only normalizes the error into text.

use shakmaty::{fen::Fen, CastlingMode, Chess};

pub fn parse_fen(fen: &str) -> Result<Chess, String> {
    let parsed: Fen = fen
        .trim()
        .parse()
        .map_err(|e| format!("Invalid FEN '{fen}': {e}"))?;

    parsed
        .into_position(CastlingMode::Standard)
        .map_err(|e| format!("Illegal position in FEN '{fen}': {e}"))
}
