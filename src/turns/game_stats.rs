//! End-of-game summary built from the event log.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::turns::event_log::EventLog;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameStats {
    pub moves: usize,
    /// Participants in first-seen order, most recent mover first.
    pub players: Vec<String>,
    /// Timestamp of the earliest counted move.
    pub start_time: Option<DateTime<Utc>>,
    /// Timestamp of the latest counted move.
    pub end_time: Option<DateTime<Utc>>,
    pub elapsed_hours: i64,
}

impl GameStats {
    /// Scan the current game's moves. An empty or partial log yields zeroes,
    /// never an error.
    pub fn collect(log: &EventLog) -> Self {
        let mut stats = GameStats::default();

        for (event, _) in log.current_moves() {
            if stats.moves == 0 {
                stats.end_time = Some(event.created_at);
            }
            stats.moves += 1;
            stats.start_time = Some(event.created_at);
            if !stats.players.contains(&event.actor) {
                stats.players.push(event.actor.clone());
            }
        }

        stats.elapsed_hours = match (stats.start_time, stats.end_time) {
            (Some(start), Some(end)) => (start - end).num_hours().abs(),
            _ => 0,
        };
        stats
    }
}
