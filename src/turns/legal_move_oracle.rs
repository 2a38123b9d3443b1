//! Legal-move discovery for the next round of choices.
//!
//! [`enumerate`] tries all 64 x 64 origin/destination pairs against a fresh
//! copy of the position and keeps the ones the engine accepts. Both origins
//! and destinations are visited file-major (a1..a8, b1..b8, ...), so the map
//! comes out in that order. [`enumerate_with_fast_path`] asks the engine for
//! its move list first and only falls back to trials when it has none; the
//! two always agree.

use std::collections::HashSet;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use crate::game_state::chess_types::{GameState, MovePair, Square};
use crate::rules::rules_engine::RulesEngine;

/// Origin square to legal destinations, in file-major order. Origins without
/// a legal move are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegalMoveMap {
    entries: Vec<(Square, Vec<Square>)>,
}

impl LegalMoveMap {
    /// Record a destination. Origins must arrive grouped, in order.
    fn push(&mut self, from: Square, to: Square) {
        match self.entries.last_mut() {
            Some((origin, destinations)) if *origin == from => destinations.push(to),
            _ => self.entries.push((from, vec![to])),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Square, &[Square])> + '_ {
        self.entries
            .iter()
            .map(|(origin, destinations)| (*origin, destinations.as_slice()))
    }

    pub fn origins(&self) -> impl Iterator<Item = Square> + '_ {
        self.entries.iter().map(|(origin, _)| *origin)
    }

    pub fn destinations(&self, from: Square) -> Option<&[Square]> {
        self.entries
            .iter()
            .find(|(origin, _)| *origin == from)
            .map(|(_, destinations)| destinations.as_slice())
    }

    /// Total number of origin/destination pairs.
    pub fn move_count(&self) -> usize {
        self.entries.iter().map(|(_, destinations)| destinations.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for LegalMoveMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (origin, destinations) in &self.entries {
            map.serialize_entry(origin, destinations)?;
        }
        map.end()
    }
}

/// Brute-force enumeration: 4096 trial applications.
pub fn enumerate<E>(engine: &E, position: &GameState) -> LegalMoveMap
where
    E: RulesEngine + ?Sized,
{
    let mut map = LegalMoveMap::default();
    let mut trials = 0usize;

    for from in Square::file_major() {
        for to in Square::file_major() {
            trials += 1;
            // Every trial starts from its own copy.
            let trial = position.clone();
            if engine.apply(&trial, MovePair::new(from, to)).is_ok() {
                map.push(from, to);
            }
        }
    }

    debug!(trials, legal = map.move_count(), "enumerated legal moves by trial");
    map
}

/// Same map as [`enumerate`], built from the engine's own move list when it
/// offers one.
pub fn enumerate_with_fast_path<E>(engine: &E, position: &GameState) -> LegalMoveMap
where
    E: RulesEngine + ?Sized,
{
    let Some(pairs) = engine.legal_move_pairs(position) else {
        return enumerate(engine, position);
    };

    let legal: HashSet<MovePair> = pairs.into_iter().collect();
    let mut map = LegalMoveMap::default();
    for from in Square::file_major() {
        for to in Square::file_major() {
            if legal.contains(&MovePair::new(from, to)) {
                map.push(from, to);
            }
        }
    }

    debug!(legal = map.move_count(), "enumerated legal moves from engine list");
    map
}
