//! Canonical chess-rule constants.
//!
//! Static literals shared by the position model and the rules engine: the
//! standard starting position and the draw thresholds the rules library does
//! not track on its own.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmoves without a capture or pawn move after which the game is drawn.
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Number of occurrences of one position that ends the game.
pub const REPETITION_LIMIT: usize = 3;
