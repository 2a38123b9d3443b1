//! Feedback to the participant who opened the issue.
//!
//! The issue tracker itself sits behind [`Notifier`]. [`messages`] holds the
//! comment texts so every outcome reads the same whichever notifier is used.

use std::fmt;

use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Eyes,
    Rocket,
    Confused,
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reaction::Eyes => write!(f, "eyes"),
            Reaction::Rocket => write!(f, "rocket"),
            Reaction::Confused => write!(f, "confused"),
        }
    }
}

pub const GAME_OVER_LABEL: &str = "game-over";

pub trait Notifier {
    fn react(&mut self, reaction: Reaction);
    fn comment(&mut self, body: &str);
    fn close(&mut self);
    fn label(&mut self, label: &str);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Notification {
    Reaction(Reaction),
    Comment(String),
    Close,
    Label(String),
}

/// Keeps every notification in order and logs it.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    pub sent: Vec<Notification>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn comments(&self) -> impl Iterator<Item = &str> + '_ {
        self.sent.iter().filter_map(|n| match n {
            Notification::Comment(body) => Some(body.as_str()),
            _ => None,
        })
    }

    pub fn reactions(&self) -> impl Iterator<Item = Reaction> + '_ {
        self.sent.iter().filter_map(|n| match n {
            Notification::Reaction(reaction) => Some(*reaction),
            _ => None,
        })
    }

    pub fn closed(&self) -> bool {
        self.sent.contains(&Notification::Close)
    }
}

impl Notifier for RecordingNotifier {
    fn react(&mut self, reaction: Reaction) {
        info!(%reaction, "reaction");
        self.sent.push(Notification::Reaction(reaction));
    }

    fn comment(&mut self, body: &str) {
        info!(body, "comment");
        self.sent.push(Notification::Comment(body.to_owned()));
    }

    fn close(&mut self) {
        info!("close issue");
        self.sent.push(Notification::Close);
    }

    fn label(&mut self, label: &str) {
        info!(label, "label");
        self.sent.push(Notification::Label(label.to_owned()));
    }
}

pub mod messages {
    use crate::errors::AbortReason;
    use crate::turns::game_stats::GameStats;

    fn invite(repository: &str) -> String {
        format!("Invite a friend to take the next turn! https://github.com/{repository}")
    }

    pub fn done(actor: &str, repository: &str) -> String {
        format!(
            "@{actor} Done. View back at https://github.com/{repository}\n\n{}",
            invite(repository)
        )
    }

    pub fn game_over(stats: &GameStats, repository: &str) -> String {
        format!(
            "That's game over! Thank you for playing that chess game. That game had {} moves, {} players, and went for {} hours. Let's play again at https://github.com/{repository}.\n\nPlayers that game: {}",
            stats.moves,
            stats.players.len(),
            stats.elapsed_hours,
            stats.players.join(", ")
        )
    }

    /// The one comment that reports an aborted invocation.
    pub fn abort(reason: &AbortReason, actor: &str, repository: &str, record_path: &str) -> String {
        match reason {
            AbortReason::Parse(_) => {
                format!("@{actor} The game title or move was unable to be parsed.")
            }
            AbortReason::ConsecutiveMove(_) => format!(
                "@{actor} Slow down! You _just_ moved, so can't immediately take the next turn. {}",
                invite(repository)
            ),
            AbortReason::IllegalMove(illegal) => format!(
                "@{actor} Whaaa.. '{}' is an invalid move! Usually this is because someone squeezed a move in just before you.",
                illegal.pair
            ),
            AbortReason::EngineUnavailable(_) => {
                format!("@{actor} Game data couldn't be loaded: {record_path}.")
            }
            AbortReason::Persistence(_) => {
                format!("@{actor} Game data {record_path} couldn't be updated :(")
            }
            AbortReason::WriteConflict => format!(
                "@{actor} Someone moved first! Your move was not saved, take another look at the board."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::messages;
    use super::{Notification, Notifier, Reaction, RecordingNotifier};
    use crate::errors::{AbortReason, IllegalMove, ParseError};
    use crate::turns::game_stats::GameStats;

    #[test]
    fn recording_notifier_keeps_order() {
        let mut notifier = RecordingNotifier::new();
        notifier.react(Reaction::Eyes);
        notifier.comment("hello");
        notifier.label("game-over");
        notifier.close();

        assert_eq!(
            notifier.sent,
            vec![
                Notification::Reaction(Reaction::Eyes),
                Notification::Comment("hello".to_owned()),
                Notification::Label("game-over".to_owned()),
                Notification::Close,
            ]
        );
        assert!(notifier.closed());
        assert_eq!(notifier.comments().collect::<Vec<_>>(), ["hello"]);
    }

    #[test]
    fn abort_messages_name_the_actor() {
        let illegal = AbortReason::from(IllegalMove {
            pair: "e2e5".parse().expect("pair should parse"),
        });
        let text = messages::abort(&illegal, "alice", "owner/repo", "games/chess.pgn");
        assert!(text.starts_with("@alice Whaaa.. 'e2e5' is an invalid move!"));

        let parse = AbortReason::from(ParseError::MissingTitle);
        assert_eq!(
            messages::abort(&parse, "bob", "owner/repo", "games/chess.pgn"),
            "@bob The game title or move was unable to be parsed."
        );
        assert!(messages::abort(&AbortReason::WriteConflict, "bob", "o/r", "p").contains("Someone moved first"));
    }

    #[test]
    fn game_over_summary_counts() {
        let stats = GameStats {
            moves: 4,
            players: vec!["alice".to_owned(), "bob".to_owned()],
            start_time: None,
            end_time: None,
            elapsed_hours: 3,
        };
        let text = messages::game_over(&stats, "owner/repo");
        assert!(text.contains("That game had 4 moves, 2 players, and went for 3 hours."));
        assert!(text.ends_with("Players that game: alice, bob"));
    }
}
