//! One move against the authoritative position.

use tracing::info;

use crate::errors::IllegalMove;
use crate::game_state::chess_types::{GameState, MovePair, Status};
use crate::rules::rules_engine::RulesEngine;
use crate::turns::event_log::EventLog;
use crate::turns::game_stats::GameStats;

#[derive(Debug, Clone)]
pub struct Applied {
    pub position: GameState,
    pub status: Status,
    /// Present only when the move ended the game.
    pub stats: Option<GameStats>,
}

/// Apply `pair` to `position` through the engine. On failure `position` is
/// exactly what it was.
pub fn apply<E>(
    engine: &E,
    position: &GameState,
    pair: MovePair,
    log: &EventLog,
) -> Result<Applied, IllegalMove>
where
    E: RulesEngine + ?Sized,
{
    let next = engine.apply(position, pair)?;
    let status = engine.status(&next);

    let stats = status.is_over().then(|| GameStats::collect(log));
    if let Some(stats) = &stats {
        info!(%status, moves = stats.moves, players = stats.players.len(), "game over");
    }

    Ok(Applied {
        position: next,
        status,
        stats,
    })
}

impl Applied {
    /// Fresh game with nothing applied yet.
    pub fn new_game<E>(engine: &E) -> Self
    where
        E: RulesEngine + ?Sized,
    {
        let position = engine.new_position();
        let status = engine.status(&position);
        Self {
            position,
            status,
            stats: None,
        }
    }
}
