//! Rules engine backed by the `shakmaty` move generator.
//!
//! The library answers legality, check, mate, stalemate and insufficient
//! material. Fifty-move and repetition draws are judged from the bookkeeping
//! kept in [`GameState`], and resignations come from the record header.

use shakmaty::Position;
use tracing::debug;

use crate::errors::{EngineError, EngineResult, IllegalMove};
use crate::game_state::chess_rules::{FIFTY_MOVE_HALFMOVES, REPETITION_LIMIT};
use crate::game_state::chess_types::{Color, GameState, MovePair, Status};
use crate::rules::rules_engine::RulesEngine;
use crate::utils::long_algebraic::{move_pair_to_move, move_to_long_algebraic, move_to_pair};
use crate::utils::pgn::{read_pgn, write_pgn};

#[derive(Debug, Clone, Copy, Default)]
pub struct ShakmatyRules;

impl ShakmatyRules {
    pub fn new() -> Self {
        Self
    }

    /// Status as shown by the board and history alone.
    fn board_status(position: &GameState) -> Status {
        let board = &position.board;
        if board.is_checkmate() {
            return Status::WonByCheckmate(position.side_to_move().opposite());
        }
        if board.is_stalemate() {
            return Status::Stalemate;
        }
        if board.is_insufficient_material() {
            return Status::InsufficientMaterial;
        }
        if position.halfmove_clock() >= FIFTY_MOVE_HALFMOVES {
            return Status::FiftyMoveDraw;
        }
        if position.repetition_count() >= REPETITION_LIMIT {
            return Status::ThreefoldRepetition;
        }
        Status::InProgress
    }

    /// Reconcile the record's result header with what the board shows.
    fn recorded_result(result: &str, on_board: Status) -> Option<Status> {
        let expected = match result {
            "1-0" => Status::WonByResignation(Color::White),
            "0-1" => Status::WonByResignation(Color::Black),
            "1/2-1/2" => Status::Unknown,
            _ => return None,
        };

        if on_board.result_token() == result {
            None
        } else {
            Some(expected)
        }
    }
}

impl RulesEngine for ShakmatyRules {
    fn new_position(&self) -> GameState {
        GameState::new_game()
    }

    fn load_position(&self, record: &str) -> EngineResult<GameState> {
        let parsed = read_pgn(record).map_err(EngineError::InvalidRecord)?;
        let mut state = parsed.state;
        state.recorded_result = Self::recorded_result(&parsed.result, Self::board_status(&state));
        debug!(
            ply = state.ply(),
            result = %parsed.result,
            "loaded game record"
        );
        Ok(state)
    }

    fn apply(&self, position: &GameState, pair: MovePair) -> Result<GameState, IllegalMove> {
        if self.status(position).is_over() {
            return Err(IllegalMove { pair });
        }

        let mv = move_pair_to_move(pair, &position.board).map_err(|_| IllegalMove { pair })?;
        let next = position
            .board
            .clone()
            .play(&mv)
            .map_err(|_| IllegalMove { pair })?;

        let mut applied = position.clone();
        applied.push_move(next, move_to_long_algebraic(&mv));
        Ok(applied)
    }

    fn status(&self, position: &GameState) -> Status {
        position
            .recorded_result
            .unwrap_or_else(|| Self::board_status(position))
    }

    fn serialize(&self, position: &GameState) -> String {
        write_pgn(position, self.status(position).result_token())
    }

    fn legal_move_pairs(&self, position: &GameState) -> Option<Vec<MovePair>> {
        if self.status(position).is_over() {
            return Some(Vec::new());
        }

        let mut pairs = Vec::<MovePair>::new();
        for mv in position.board.legal_moves() {
            // Four promotion choices share one pair.
            if let Some(pair) = move_to_pair(&mv) {
                if !pairs.contains(&pair) {
                    pairs.push(pair);
                }
            }
        }
        Some(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::ShakmatyRules;
    use crate::game_state::chess_types::{Color, GameState, MovePair, Status};
    use crate::rules::rules_engine::RulesEngine;

    fn pair(text: &str) -> MovePair {
        text.parse().expect("pair should parse")
    }

    fn play_all(engine: &ShakmatyRules, moves: &[&str]) -> GameState {
        moves.iter().fold(engine.new_position(), |state, mv| {
            engine.apply(&state, pair(mv)).expect("scripted move should be legal")
        })
    }

    #[test]
    fn new_position_is_in_progress() {
        let engine = ShakmatyRules::new();
        let state = engine.new_position();
        assert_eq!(engine.status(&state), Status::InProgress);
        assert_eq!(state.side_to_move(), Color::White);
    }

    #[test]
    fn fools_mate_is_won_by_black() {
        let engine = ShakmatyRules::new();
        let state = play_all(&engine, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert_eq!(engine.status(&state), Status::WonByCheckmate(Color::Black));
    }

    #[test]
    fn scholars_mate_is_won_by_white() {
        let engine = ShakmatyRules::new();
        let state = play_all(
            &engine,
            &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"],
        );
        assert_eq!(engine.status(&state), Status::WonByCheckmate(Color::White));
    }

    #[test]
    fn moves_after_game_over_are_illegal() {
        let engine = ShakmatyRules::new();
        let state = play_all(&engine, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert!(engine.apply(&state, pair("a2a3")).is_err());
        assert_eq!(engine.legal_move_pairs(&state), Some(Vec::new()));
    }

    #[test]
    fn illegal_move_leaves_position_untouched() {
        let engine = ShakmatyRules::new();
        let state = engine.new_position();
        let fen = state.get_fen();

        let err = engine.apply(&state, pair("e2e5")).expect_err("e2e5 should be illegal");
        assert_eq!(err.pair, pair("e2e5"));
        assert_eq!(state.get_fen(), fen);

        let after = engine.apply(&state, pair("e2e4")).expect("e2e4 should be legal");
        assert_eq!(
            after.get_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );
    }

    #[test]
    fn wrong_side_to_move_is_illegal() {
        let engine = ShakmatyRules::new();
        assert!(engine.apply(&engine.new_position(), pair("e7e5")).is_err());
    }

    #[test]
    fn threefold_repetition_by_knight_shuffle() {
        let engine = ShakmatyRules::new();
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        let once = play_all(&engine, &shuffle);
        assert_eq!(engine.status(&once), Status::InProgress);

        let twice = play_all(&engine, &[shuffle, shuffle].concat());
        assert_eq!(twice.repetition_count(), 3);
        assert_eq!(engine.status(&twice), Status::ThreefoldRepetition);
    }

    #[test]
    fn fifty_move_draw_from_halfmove_clock() {
        let engine = ShakmatyRules::new();
        let state = GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 80").expect("FEN should parse");
        assert_eq!(engine.status(&state), Status::InProgress);

        let after = engine.apply(&state, pair("a1a2")).expect("rook move should be legal");
        assert_eq!(engine.status(&after), Status::FiftyMoveDraw);
    }

    #[test]
    fn stalemate_and_insufficient_material() {
        let engine = ShakmatyRules::new();
        let stalemate = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert_eq!(engine.status(&stalemate), Status::Stalemate);

        let bare = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(engine.status(&bare), Status::InsufficientMaterial);
    }

    #[test]
    fn pawn_reaching_last_rank_becomes_queen() {
        let engine = ShakmatyRules::new();
        let state = GameState::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("FEN should parse");
        let after = engine.apply(&state, pair("a7a8")).expect("promotion should be legal");
        assert_eq!(after.get_fen(), "Q7/8/8/8/8/8/8/k6K b - - 0 1");
        assert_eq!(after.move_history, ["a7a8q"]);
    }

    #[test]
    fn record_round_trip_is_byte_identical() {
        let engine = ShakmatyRules::new();
        let state = play_all(&engine, &["e2e4", "c7c5", "g1f3", "d7d6", "e1e2"]);
        let record = engine.serialize(&state);

        let loaded = engine.load_position(&record).expect("record should load");
        assert_eq!(loaded.get_fen(), state.get_fen());
        assert_eq!(engine.serialize(&loaded), record);
    }

    #[test]
    fn finished_record_round_trip_keeps_status() {
        let engine = ShakmatyRules::new();
        let state = play_all(&engine, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        let record = engine.serialize(&state);
        assert!(record.contains("[Result \"0-1\"]"));

        let loaded = engine.load_position(&record).expect("record should load");
        assert_eq!(loaded.recorded_result, None);
        assert_eq!(engine.status(&loaded), Status::WonByCheckmate(Color::Black));
        assert_eq!(engine.serialize(&loaded), record);
    }

    #[test]
    fn decisive_result_without_mate_is_resignation() {
        let engine = ShakmatyRules::new();
        let record = "[Result \"1-0\"]\n\n1. e2e4 e7e5 1-0\n";
        let loaded = engine.load_position(record).expect("record should load");
        assert_eq!(engine.status(&loaded), Status::WonByResignation(Color::White));
        assert!(engine.apply(&loaded, pair("g1f3")).is_err());
    }

    #[test]
    fn malformed_record_is_an_engine_error() {
        let engine = ShakmatyRules::new();
        assert!(engine.load_position("1. e2e5 *").is_err());
    }

    #[test]
    fn fast_path_lists_twenty_opening_moves() {
        let engine = ShakmatyRules::new();
        let pairs = engine
            .legal_move_pairs(&engine.new_position())
            .expect("shakmaty rules should list moves");
        assert_eq!(pairs.len(), 20);
    }

    #[test]
    fn fast_path_collapses_promotion_choices() {
        let engine = ShakmatyRules::new();
        let state = GameState::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("FEN should parse");
        let pairs = engine
            .legal_move_pairs(&state)
            .expect("shakmaty rules should list moves");
        assert_eq!(pairs.iter().filter(|p| **p == pair("a7a8")).count(), 1);
    }
}
