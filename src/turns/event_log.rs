//! Past issue events, most recent first.
//!
//! Events carrying the "confused" reaction were rejected when they ran and are
//! invisible to every query here. Titles are classified by the command parser
//! itself, so only titles that would have been played count as moves.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ParseError;
use crate::game_state::chess_types::MovePair;
use crate::turns::command::{parse, Command};

pub const DEFAULT_COMMAND_PREFIX: &str = "chess";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub actor: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub rejected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    New,
    /// A move event. The pair is `None` when the title's coordinates are malformed.
    Move(Option<MovePair>),
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentMove {
    pub actor: String,
    pub pair: Option<MovePair>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub actor: String,
    pub moves: usize,
}

#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
    prefix: String,
}

impl EventLog {
    /// `events` must be ordered most recent first.
    pub fn new(events: Vec<Event>) -> Self {
        Self::with_prefix(events, DEFAULT_COMMAND_PREFIX)
    }

    pub fn with_prefix(events: Vec<Event>, prefix: &str) -> Self {
        let rejected = events.iter().filter(|event| event.rejected).count();
        if rejected > 0 {
            debug!(rejected, total = events.len(), "skipping rejected events");
        }
        Self {
            events,
            prefix: prefix.to_owned(),
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Classify a past title with the same parser that plays moves.
    pub fn classify(&self, event: &Event) -> EventKind {
        match parse(&event.title, "", &self.prefix) {
            Ok(Command::NewGame { .. }) => EventKind::New,
            Ok(Command::Move { pair, .. }) => EventKind::Move(Some(pair)),
            // Label and action matched, only the coordinates are bad.
            Err(ParseError::MissingOrInvalidMove(_)) => EventKind::Move(None),
            Err(_) => EventKind::Other,
        }
    }

    /// Events that were not rejected.
    pub fn accepted(&self) -> impl Iterator<Item = &Event> + '_ {
        self.events.iter().filter(|event| !event.rejected)
    }

    /// Accepted events of the current game: everything before the most recent
    /// `new` boundary, which is itself excluded.
    pub fn current_game(&self) -> impl Iterator<Item = (&Event, EventKind)> + '_ {
        self.accepted()
            .map(move |event| (event, self.classify(event)))
            .take_while(|(_, kind)| *kind != EventKind::New)
    }

    /// Move events of the current game, most recent first.
    pub fn current_moves(&self) -> impl Iterator<Item = (&Event, Option<MovePair>)> + '_ {
        self.current_game().filter_map(|(event, kind)| match kind {
            EventKind::Move(pair) => Some((event, pair)),
            _ => None,
        })
    }

    /// The last `limit` moves of the current game.
    pub fn recent_moves(&self, limit: usize) -> Vec<RecentMove> {
        self.current_moves()
            .take(limit)
            .map(|(event, pair)| RecentMove {
                actor: event.actor.clone(),
                pair,
            })
            .collect()
    }

    /// Move counts per actor across every game, highest first, ties by name.
    pub fn leaderboard(&self, limit: usize, exclude: Option<&str>) -> Vec<LeaderboardEntry> {
        let mut counts = HashMap::<&str, usize>::new();
        for event in self.accepted() {
            if Some(event.actor.as_str()) == exclude {
                continue;
            }
            if matches!(self.classify(event), EventKind::Move(_)) {
                *counts.entry(event.actor.as_str()).or_default() += 1;
            }
        }

        let mut entries: Vec<LeaderboardEntry> = counts
            .into_iter()
            .map(|(actor, moves)| LeaderboardEntry {
                actor: actor.to_owned(),
                moves,
            })
            .collect();
        entries.sort_by(|a, b| b.moves.cmp(&a.moves).then_with(|| a.actor.cmp(&b.actor)));
        entries.truncate(limit);
        entries
    }
}
