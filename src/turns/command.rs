//! Issue-title command parser.
//!
//! Titles look like `chess|move|e2e4|12`: a label, the action, the move
//! coordinates and the game number. Wrapping quotes are stripped first and the
//! trailing fields are optional. The label must equal the configured prefix.
//! The event log classifies past titles through [`parse`] as well, so a title
//! counts as a move there exactly when it would be played here.

use serde::Serialize;

use crate::errors::{ParseError, ParseResult};
use crate::game_state::chess_types::MovePair;
use crate::utils::algebraic::coordinates_to_move_pair;

const NEW_ACTION: &str = "new";
const MOVE_ACTION: &str = "move";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    NewGame {
        label: String,
        game_number: String,
    },
    Move {
        label: String,
        pair: MovePair,
        game_number: String,
    },
}

impl Command {
    pub fn label(&self) -> &str {
        match self {
            Command::NewGame { label, .. } | Command::Move { label, .. } => label,
        }
    }

    pub fn game_number(&self) -> &str {
        match self {
            Command::NewGame { game_number, .. } | Command::Move { game_number, .. } => game_number,
        }
    }

    pub fn move_pair(&self) -> Option<MovePair> {
        match self {
            Command::Move { pair, .. } => Some(*pair),
            Command::NewGame { .. } => None,
        }
    }
}

/// Remove leading and trailing runs of `"`.
#[inline]
fn strip_quotes(raw: &str) -> &str {
    raw.trim_start_matches('"').trim_end_matches('"')
}

/// Parse an issue title. `fallback_id` stands in for a missing game number.
pub fn parse(raw_title: &str, fallback_id: &str, prefix: &str) -> ParseResult<Command> {
    let mut fields = strip_quotes(raw_title).split('|');
    let label = fields.next().unwrap_or_default();
    let action = fields.next().unwrap_or_default();
    let move_field = fields.next().unwrap_or_default();
    // A trailing empty field counts as absent.
    let game_number = fields
        .next()
        .filter(|field| !field.is_empty())
        .unwrap_or(fallback_id);

    if label.trim().is_empty() && game_number.trim().is_empty() {
        return Err(ParseError::MissingTitle);
    }
    if label != prefix {
        return Err(ParseError::UnknownLabel(label.to_owned()));
    }

    match action {
        NEW_ACTION => Ok(Command::NewGame {
            label: label.to_owned(),
            game_number: game_number.to_owned(),
        }),
        MOVE_ACTION => {
            let pair = coordinates_to_move_pair(move_field)
                .map_err(|_| ParseError::MissingOrInvalidMove(move_field.to_owned()))?;
            Ok(Command::Move {
                label: label.to_owned(),
                pair,
                game_number: game_number.to_owned(),
            })
        }
        other => Err(ParseError::UnknownCommand(other.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse, strip_quotes, Command};
    use crate::errors::ParseError;

    #[test]
    fn parses_full_move_title() {
        let command = parse("chess|move|e2e4|7", "99", "chess").expect("title should parse");
        assert_eq!(
            command,
            Command::Move {
                label: "chess".to_owned(),
                pair: "e2e4".parse().expect("pair should parse"),
                game_number: "7".to_owned(),
            }
        );
        assert_eq!(command.game_number(), "7");
    }

    #[test]
    fn missing_game_number_falls_back() {
        let command = parse("chess|move|g1f3", "42", "chess").expect("title should parse");
        assert_eq!(command.game_number(), "42");

        let command = parse("chess|new", "42", "chess").expect("title should parse");
        assert_eq!(
            command,
            Command::NewGame {
                label: "chess".to_owned(),
                game_number: "42".to_owned(),
            }
        );

        let command = parse("chess|move|g1f3|", "42", "chess").expect("title should parse");
        assert_eq!(command.game_number(), "42");
    }

    #[test]
    fn wrapping_quotes_are_stripped() {
        assert_eq!(strip_quotes("\"\"chess|new\""), "chess|new");
        let command = parse("\"chess|move|d2d4|3\"", "1", "chess").expect("quoted title should parse");
        assert_eq!(command.move_pair().map(|p| p.to_string()), Some("d2d4".to_owned()));
    }

    #[test]
    fn new_ignores_move_field() {
        let command = parse("chess|new|zzzz|5", "1", "chess").expect("title should parse");
        assert_eq!(command.move_pair(), None);
        assert_eq!(command.game_number(), "5");
    }

    #[test]
    fn blank_move_is_rejected() {
        assert_eq!(
            parse("chess|move||5", "1", "chess"),
            Err(ParseError::MissingOrInvalidMove(String::new()))
        );
        assert_eq!(
            parse("chess|move", "1", "chess"),
            Err(ParseError::MissingOrInvalidMove(String::new()))
        );
    }

    #[test]
    fn malformed_moves_are_rejected() {
        for bad in ["e2e", "e2e4q", "i2e4", "e9e4", "E2E4"] {
            let title = format!("chess|move|{bad}|5");
            assert_eq!(
                parse(&title, "1", "chess"),
                Err(ParseError::MissingOrInvalidMove(bad.to_owned())),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert_eq!(
            parse("chess|resign|e2e4|5", "1", "chess"),
            Err(ParseError::UnknownCommand("resign".to_owned()))
        );
        assert_eq!(parse("chess", "1", "chess"), Err(ParseError::UnknownCommand(String::new())));
    }

    #[test]
    fn foreign_label_is_rejected() {
        assert_eq!(
            parse("x|move|e2e4|1", "1", "chess"),
            Err(ParseError::UnknownLabel("x".to_owned()))
        );
        assert_eq!(
            parse("chess|move|e2e4|1", "1", "Chess"),
            Err(ParseError::UnknownLabel("chess".to_owned()))
        );
        let command = parse("x|move|e2e4|1", "1", "x").expect("configured label should parse");
        assert_eq!(command.label(), "x");
    }

    #[test]
    fn action_must_match_exactly() {
        assert_eq!(
            parse("chess|newgame", "1", "chess"),
            Err(ParseError::UnknownCommand("newgame".to_owned()))
        );
        assert_eq!(
            parse("chess|moves|e2e4", "1", "chess"),
            Err(ParseError::UnknownCommand("moves".to_owned()))
        );
    }

    #[test]
    fn blank_title_is_rejected() {
        assert_eq!(parse("", "", "chess"), Err(ParseError::MissingTitle));
        assert_eq!(parse(" |move|e2e4", " ", "chess"), Err(ParseError::MissingTitle));
    }

    #[test]
    fn fields_round_trip_for_well_formed_titles() {
        for (label, action, mv, number) in [
            ("chess", "move", "a2a4", "1"),
            ("Chess", "move", "h7h5", "300"),
            ("chess", "new", "", "8"),
        ] {
            let title = format!("{label}|{action}|{mv}|{number}");
            let command = parse(&title, "fallback", label).expect("title should parse");
            assert_eq!(command.label(), label);
            assert_eq!(command.game_number(), number);
            assert_eq!(
                command.move_pair().map(|p| p.to_string()).unwrap_or_default(),
                mv
            );
        }
    }
}
