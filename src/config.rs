//! Controller configuration.
//!
//! Every field can be given as a flag or through the environment variables the
//! issue workflow exports (`REPOSITORY`, `EVENT_ISSUE_NUMBER`,
//! `EVENT_ISSUE_TITLE`, `EVENT_USER_LOGIN`, `GAME_DATA_PATH`).

use std::path::PathBuf;

use clap::Parser;

use crate::turns::event_log::DEFAULT_COMMAND_PREFIX;

pub const DEFAULT_GAME_DATA_PATH: &str = "chess_games/chess.pgn";
pub const RECENT_MOVES_LIMIT: usize = 4;
pub const LEADERBOARD_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// `owner/name` of the repository hosting the game.
    pub repository: String,
    /// Number of the triggering issue, the fallback game number.
    pub issue_number: String,
    pub issue_title: String,
    pub actor: String,
    pub game_data_path: PathBuf,
    pub command_prefix: String,
    /// Reject a move by whoever made the previous one.
    pub enforce_turn_order: bool,
}

impl ControllerConfig {
    pub fn new(
        repository: impl Into<String>,
        issue_number: impl Into<String>,
        issue_title: impl Into<String>,
        actor: impl Into<String>,
    ) -> Self {
        Self {
            repository: repository.into(),
            issue_number: issue_number.into(),
            issue_title: issue_title.into(),
            actor: actor.into(),
            game_data_path: PathBuf::from(DEFAULT_GAME_DATA_PATH),
            command_prefix: DEFAULT_COMMAND_PREFIX.to_owned(),
            enforce_turn_order: true,
        }
    }

    /// The repository owner, left off the leaderboard.
    pub fn owner(&self) -> Option<&str> {
        self.repository
            .split_once('/')
            .map(|(owner, _)| owner)
            .filter(|owner| !owner.is_empty())
    }
}

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "issue_chess")]
#[command(about = "Play one issue-driven chess move and list the next legal moves")]
pub struct ControllerArgs {
    /// Repository hosting the game, owner/name.
    #[arg(long, env = "REPOSITORY")]
    pub repository: String,

    /// Number of the triggering issue.
    #[arg(long, env = "EVENT_ISSUE_NUMBER")]
    pub issue_number: String,

    /// Title of the triggering issue, e.g. chess|move|e2e4|1.
    #[arg(long, env = "EVENT_ISSUE_TITLE")]
    pub issue_title: String,

    /// Login of the participant who opened the issue.
    #[arg(long, env = "EVENT_USER_LOGIN")]
    pub actor: String,

    /// Game record file.
    #[arg(long, env = "GAME_DATA_PATH", default_value = DEFAULT_GAME_DATA_PATH)]
    pub game_data_path: PathBuf,

    /// JSON array of earlier issue events, most recent first.
    #[arg(long, env = "EVENT_LOG_PATH")]
    pub events: Option<PathBuf>,

    /// Label every command title starts with.
    #[arg(long, env = "COMMAND_PREFIX", default_value = DEFAULT_COMMAND_PREFIX)]
    pub command_prefix: String,

    /// Let the previous mover move again.
    #[arg(long, env = "ALLOW_CONSECUTIVE_MOVES")]
    pub allow_consecutive_moves: bool,

    /// Print the board to stderr after the move.
    #[arg(long)]
    pub show_board: bool,
}

impl ControllerArgs {
    pub fn to_config(&self) -> ControllerConfig {
        ControllerConfig {
            repository: self.repository.clone(),
            issue_number: self.issue_number.clone(),
            issue_title: self.issue_title.clone(),
            actor: self.actor.clone(),
            game_data_path: self.game_data_path.clone(),
            command_prefix: self.command_prefix.clone(),
            enforce_turn_order: !self.allow_consecutive_moves,
        }
    }
}
