//! Per-invocation controller.
//!
//! One triggering issue runs through `Idle -> Parsed -> Authorized -> Applied
//! -> Enumerated -> Done`. A new-game command skips `Authorized`. Any failure
//! lands in `Aborted`, is reported to the participant, and leaves the stored
//! record alone.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{ControllerConfig, LEADERBOARD_LIMIT, RECENT_MOVES_LIMIT};
use crate::errors::AbortReason;
use crate::game_state::chess_types::{GameState, Status};
use crate::rules::rules_engine::RulesEngine;
use crate::turns::command::{parse, Command};
use crate::turns::event_log::{Event, EventLog, LeaderboardEntry, RecentMove};
use crate::turns::game_stats::GameStats;
use crate::turns::game_store::GameStore;
use crate::turns::legal_move_oracle::{enumerate_with_fast_path, LegalMoveMap};
use crate::turns::move_applicator::{self, Applied};
use crate::turns::notifications::{messages, Notifier, Reaction, GAME_OVER_LABEL};
use crate::turns::turn_arbiter::authorize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", content = "reason", rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Idle,
    Parsed,
    Authorized,
    Applied,
    Enumerated,
    Done,
    Aborted(AbortReason),
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Idle => write!(f, "idle"),
            Stage::Parsed => write!(f, "parsed"),
            Stage::Authorized => write!(f, "authorized"),
            Stage::Applied => write!(f, "applied"),
            Stage::Enumerated => write!(f, "enumerated"),
            Stage::Done => write!(f, "done"),
            Stage::Aborted(_) => write!(f, "aborted"),
        }
    }
}

/// Everything an invocation hands to rendering and persistence.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Outcome {
    pub stage: Stage,
    /// Stages entered after `Idle`, in order.
    pub trail: Vec<Stage>,
    pub command: Option<Command>,
    pub status: Option<Status>,
    pub fen: Option<String>,
    /// Record written to the store.
    pub record: Option<String>,
    pub legal_moves: Option<LegalMoveMap>,
    pub stats: Option<GameStats>,
    pub recent_moves: Vec<RecentMove>,
    pub leaderboard: Vec<LeaderboardEntry>,
    #[serde(skip)]
    pub position: Option<GameState>,
}

impl Outcome {
    pub fn abort_reason(&self) -> Option<&AbortReason> {
        match &self.stage {
            Stage::Aborted(reason) => Some(reason),
            _ => None,
        }
    }
}

pub struct Lifecycle<E, N, S> {
    config: ControllerConfig,
    engine: E,
    notifier: N,
    store: S,
    stage: Stage,
    trail: Vec<Stage>,
}

impl<E, N, S> Lifecycle<E, N, S>
where
    E: RulesEngine,
    N: Notifier,
    S: GameStore,
{
    pub fn new(config: ControllerConfig, engine: E, notifier: N, store: S) -> Self {
        Self {
            config,
            engine,
            notifier,
            store,
            stage: Stage::Idle,
            trail: Vec::new(),
        }
    }

    pub fn into_parts(self) -> (N, S) {
        (self.notifier, self.store)
    }

    /// Handle the triggering issue. `events` are the earlier issues, most
    /// recent first, without the triggering one.
    pub fn run(&mut self, events: Vec<Event>) -> Outcome {
        let log = EventLog::with_prefix(events, &self.config.command_prefix);
        info!(
            actor = %self.config.actor,
            title = %self.config.issue_title,
            events = log.len(),
            "handling issue"
        );

        self.notifier.react(Reaction::Eyes);
        self.notifier.react(Reaction::Rocket);

        let mut outcome = Outcome::default();
        match self.drive(&log, &mut outcome) {
            Ok(()) => self.finish(&outcome),
            Err(reason) => self.abort(reason),
        }

        outcome.stage = self.stage.clone();
        outcome.trail = self.trail.clone();
        outcome
    }

    fn drive(&mut self, log: &EventLog, outcome: &mut Outcome) -> Result<(), AbortReason> {
        let actor = self.config.actor.clone();
        let command = parse(
            &self.config.issue_title,
            &self.config.issue_number,
            &self.config.command_prefix,
        )?;
        outcome.command = Some(command.clone());
        self.advance(Stage::Parsed);

        let (applied, expected, commit) = match &command {
            Command::NewGame { .. } => {
                if let Some(existing) = self.store.read_record()? {
                    self.store
                        .delete_record(&existing, &format!("@{actor} delete to allow new game"))?;
                }
                (Applied::new_game(&self.engine), None, format!("@{actor} new game"))
            }
            Command::Move { pair, .. } => {
                if self.config.enforce_turn_order {
                    authorize(&actor, log)?;
                } else {
                    debug!(actor = %actor, "turn order not enforced");
                }
                self.advance(Stage::Authorized);

                let previous = self.store.read_record()?;
                let position = match previous.as_deref() {
                    Some(record) => self.engine.load_position(record)?,
                    None => {
                        debug!("no game record, starting a fresh game");
                        self.engine.new_position()
                    }
                };
                let applied = move_applicator::apply(&self.engine, &position, *pair, log)?;
                (applied, previous, format!("@{actor} move {pair}"))
            }
        };
        self.advance(Stage::Applied);

        let legal_moves = enumerate_with_fast_path(&self.engine, &applied.position);
        self.advance(Stage::Enumerated);

        let record = self.engine.serialize(&applied.position);
        self.store.write_record(expected.as_deref(), &record, &commit)?;

        if let Some(pair) = command.move_pair() {
            outcome.recent_moves.push(RecentMove {
                actor: actor.clone(),
                pair: Some(pair),
            });
            outcome.recent_moves.extend(log.recent_moves(RECENT_MOVES_LIMIT));
        }
        outcome.leaderboard = log.leaderboard(LEADERBOARD_LIMIT, self.config.owner());
        outcome.status = Some(applied.status);
        outcome.fen = Some(applied.position.get_fen());
        outcome.record = Some(record);
        outcome.legal_moves = Some(legal_moves);
        outcome.stats = applied.stats;
        outcome.position = Some(applied.position);

        self.advance(Stage::Done);
        Ok(())
    }

    fn finish(&mut self, outcome: &Outcome) {
        let repository = self.config.repository.clone();
        if let Some(stats) = &outcome.stats {
            self.notifier.label(GAME_OVER_LABEL);
            self.notifier.comment(&messages::game_over(stats, &repository));
        }
        self.notifier
            .comment(&messages::done(&self.config.actor, &repository));
        self.notifier.close();
    }

    fn abort(&mut self, reason: AbortReason) {
        warn!(actor = %self.config.actor, %reason, "invocation aborted");
        let text = messages::abort(
            &reason,
            &self.config.actor,
            &self.config.repository,
            &self.config.game_data_path.to_string_lossy(),
        );
        self.advance(Stage::Aborted(reason));

        self.notifier.react(Reaction::Confused);
        self.notifier.comment(&text);
        self.notifier.close();
    }

    fn advance(&mut self, next: Stage) {
        info!(from = %self.stage, to = %next, "stage transition");
        self.stage = next.clone();
        self.trail.push(next);
    }
}
