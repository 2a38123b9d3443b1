use shakmaty::{uci::UciMove, CastlingMode, Chess, Move, Position, Role};

use crate::game_state::chess_types::MovePair;
use crate::utils::algebraic::coordinates_to_move_pair;

/// Resolve a four- or five-character coordinate move (`e2e4`, `e7e8q`) against
/// the board. Fails when the move is malformed or not legal.
///
/// A four-character pawn move onto the last rank promotes to a queen. Castling
/// is only accepted in king-two-squares form (`e1g1`), never king-takes-rook.
pub fn long_algebraic_to_move(long_algebraic: &str, board: &Chess) -> Result<Move, String> {
    let bytes = long_algebraic.as_bytes();
    if !long_algebraic.is_ascii() || (bytes.len() != 4 && bytes.len() != 5) {
        return Err(format!("Invalid long algebraic move: {long_algebraic}"));
    }

    let pair = coordinates_to_move_pair(&long_algebraic[0..4])?;
    let promotion = if bytes.len() == 5 {
        Some(char_to_promotion(bytes[4] as char)?)
    } else {
        default_promotion(board, pair)
    };

    let uci = UciMove::Normal {
        from: pair.from.into(),
        to: pair.to.into(),
        promotion,
    };
    let mv = uci
        .to_move(board)
        .map_err(|e| format!("Illegal move {long_algebraic}: {e}"))?;

    // The library also resolves e1h1 to castling; only e1g1 names that move here.
    if move_to_pair(&mv) != Some(pair) {
        return Err(format!("Illegal move {long_algebraic}: not in standard coordinate form"));
    }

    Ok(mv)
}

/// Resolve a move pair, applying the queen default for promotions.
#[inline]
pub fn move_pair_to_move(pair: MovePair, board: &Chess) -> Result<Move, String> {
    long_algebraic_to_move(&pair.to_string(), board)
}

/// Coordinate form of a move, with a promotion suffix when it promotes.
pub fn move_to_long_algebraic(mv: &Move) -> String {
    UciMove::from_move(mv, CastlingMode::Standard).to_string()
}

/// Origin and destination of a move in standard coordinate form.
pub fn move_to_pair(mv: &Move) -> Option<MovePair> {
    match UciMove::from_move(mv, CastlingMode::Standard) {
        UciMove::Normal { from, to, .. } => Some(MovePair::new(from.into(), to.into())),
        _ => None,
    }
}

fn default_promotion(board: &Chess, pair: MovePair) -> Option<Role> {
    let is_pawn = board.board().role_at(pair.from.into()) == Some(Role::Pawn);
    let last_rank = pair.to.rank() == 0 || pair.to.rank() == 7;
    (is_pawn && last_rank).then_some(Role::Queen)
}

fn char_to_promotion(ch: char) -> Result<Role, String> {
    match ch.to_ascii_lowercase() {
        'n' => Ok(Role::Knight),
        'b' => Ok(Role::Bishop),
        'r' => Ok(Role::Rook),
        'q' => Ok(Role::Queen),
        _ => Err(format!("Invalid promotion piece character: {ch}")),
    }
}

#[cfg(test)]
mod tests {
    use super::{long_algebraic_to_move, move_pair_to_move, move_to_long_algebraic};
    use crate::utils::fen_parser::parse_fen;
    use shakmaty::{Chess, Role};

    #[test]
    fn long_algebraic_round_trip_simple_move() {
        let board = Chess::default();
        let mv = long_algebraic_to_move("e2e4", &board).expect("e2e4 should be legal");
        assert_eq!(move_to_long_algebraic(&mv), "e2e4");
    }

    #[test]
    fn four_character_promotion_defaults_to_queen() {
        let board = parse_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("FEN should parse");
        let pair = "a7a8".parse().expect("pair should parse");
        let mv = move_pair_to_move(pair, &board).expect("promotion should be legal");
        assert_eq!(mv.promotion(), Some(Role::Queen));
        assert_eq!(move_to_long_algebraic(&mv), "a7a8q");

        let under = long_algebraic_to_move("a7a8n", &board).expect("underpromotion should be legal");
        assert_eq!(under.promotion(), Some(Role::Knight));
    }

    #[test]
    fn castling_only_in_king_two_squares_form() {
        let board = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let castle = long_algebraic_to_move("e1g1", &board).expect("castle should be legal");
        assert!(castle.is_castle());
        assert_eq!(move_to_long_algebraic(&castle), "e1g1");
        assert!(long_algebraic_to_move("e1h1", &board).is_err());
    }

    #[test]
    fn en_passant_is_resolved() {
        let board =
            parse_fen("rnbqkbnr/pppp1ppp/8/4pP2/8/8/PPPPP1PP/RNBQKBNR w KQkq e6 0 3").expect("FEN should parse");
        let ep = long_algebraic_to_move("f5e6", &board).expect("en passant should be legal");
        assert!(ep.is_en_passant());
    }

    #[test]
    fn rejects_illegal_and_malformed_moves() {
        let board = Chess::default();
        assert!(long_algebraic_to_move("e2e5", &board).is_err());
        assert!(long_algebraic_to_move("e7e5", &board).is_err());
        assert!(long_algebraic_to_move("e2e2", &board).is_err());
        assert!(long_algebraic_to_move("e2", &board).is_err());
        assert!(long_algebraic_to_move("e2e4x", &board).is_err());
    }
}
