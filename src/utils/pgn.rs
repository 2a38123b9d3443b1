//! Game record read/write.
//!
//! The persisted record is PGN-shaped text: a fixed header block followed by
//! the movetext in coordinate form. Writing is deterministic, so a record that
//! is read and written again comes back byte-identical.

use std::collections::BTreeMap;

use shakmaty::Position;

use crate::game_state::game_state::GameState;
use crate::utils::long_algebraic::{long_algebraic_to_move, move_to_long_algebraic};

pub const EVENT_NAME: &str = "Issue Chess Game";

const RESULT_TOKENS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

#[derive(Debug, Clone)]
pub struct PgnGame {
    pub state: GameState,
    pub result: String,
}

/// Render the record of `state` with the given result token.
pub fn write_pgn(state: &GameState, result: &str) -> String {
    let result = result_or_unknown(result);
    let mut headers = BTreeMap::<&str, String>::new();
    headers.insert("Event", EVENT_NAME.to_owned());
    headers.insert("Site", "?".to_owned());
    headers.insert("Round", "-".to_owned());
    headers.insert("White", "White".to_owned());
    headers.insert("Black", "Black".to_owned());
    headers.insert("Result", result.to_owned());

    if state.has_custom_setup() {
        headers.insert("SetUp", "1".to_owned());
        headers.insert("FEN", state.initial_fen());
    }

    let mut out = String::new();
    for (key, value) in &headers {
        out.push_str(&format!("[{key} \"{}\"]\n", value.replace('"', "\\\"")));
    }
    out.push('\n');

    // Black to move in a custom setup opens with "N..." instead of "N.".
    let black_first = state.initial.turn() == shakmaty::Color::Black;
    let first_number = state.initial.fullmoves().get() as usize;

    let mut movetext_parts = Vec::<String>::with_capacity(state.move_history.len() + 1);
    for (ply, lan) in state.move_history.iter().enumerate() {
        let offset = ply + usize::from(black_first);
        let number = first_number + offset / 2;
        if offset % 2 == 0 {
            movetext_parts.push(format!("{number}. {lan}"));
        } else if ply == 0 {
            movetext_parts.push(format!("{number}... {lan}"));
        } else {
            movetext_parts.push(lan.clone());
        }
    }
    movetext_parts.push(result.to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    out
}

/// Parse a record and replay its movetext.
pub fn read_pgn(pgn: &str) -> Result<PgnGame, String> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext = String::new();

    for line in pgn.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if line.starts_with('[') {
            let (key, value) = split_header(line)?;
            headers.insert(key, value);
        } else {
            movetext.push_str(line);
            movetext.push(' ');
        }
    }

    let mut state = match (headers.get("SetUp").map(String::as_str), headers.get("FEN")) {
        (Some("1"), Some(fen)) => GameState::from_fen(fen).map_err(|e| e.to_string())?,
        (Some("1"), None) => return Err("record has SetUp but no FEN header".to_owned()),
        _ => GameState::new_game(),
    };

    let moves = main_line(&movetext);
    let mut result = "*";
    for raw in moves.split_whitespace() {
        match Token::from(raw) {
            Token::MoveNumber => {}
            Token::Result(token) => {
                result = token;
                break;
            }
            Token::Move(lan) => {
                let mv = long_algebraic_to_move(lan, &state.board)?;
                let next = state
                    .board
                    .clone()
                    .play(&mv)
                    .map_err(|_| format!("illegal move in record: {lan}"))?;
                state.push_move(next, move_to_long_algebraic(&mv));
            }
        }
    }

    // The header is authoritative when both are present.
    let result = match headers.get("Result") {
        Some(header) => result_or_unknown(header),
        None => result,
    };

    Ok(PgnGame {
        state,
        result: result.to_owned(),
    })
}

/// `[Key "value"]` to its key and unescaped value.
fn split_header(line: &str) -> Result<(String, String), String> {
    let malformed = || format!("malformed record header: {line}");
    let inner = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(malformed)?;
    let (key, quoted) = inner.split_once(' ').ok_or_else(malformed)?;
    let value = quoted
        .trim()
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(malformed)?;
    Ok((key.trim().to_owned(), value.replace("\\\"", "\"")))
}

/// Movetext without `{comments}` and `(variations)`.
fn main_line(movetext: &str) -> String {
    let mut depth = 0usize;
    movetext
        .chars()
        .filter(|ch| match *ch {
            '{' | '(' => {
                depth += 1;
                false
            }
            '}' | ')' => {
                depth = depth.saturating_sub(1);
                false
            }
            _ => depth == 0,
        })
        .collect()
}

enum Token<'a> {
    MoveNumber,
    Result(&'a str),
    Move(&'a str),
}

impl<'a> From<&'a str> for Token<'a> {
    fn from(raw: &'a str) -> Self {
        let number = raw.trim_end_matches('.');
        if number.len() < raw.len() && !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()) {
            return Token::MoveNumber;
        }

        let bare = raw.trim_end_matches(['+', '#', '!', '?']);
        if RESULT_TOKENS.contains(&bare) {
            Token::Result(bare)
        } else {
            Token::Move(bare)
        }
    }
}

fn result_or_unknown(result: &str) -> &str {
    if RESULT_TOKENS.contains(&result) {
        result
    } else {
        "*"
    }
}
