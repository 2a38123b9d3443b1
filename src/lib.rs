//! Crate root module declarations for the issue-driven chess controller.
//!
//! Exposes the position model, the rules engine abstraction, the per-issue
//! turn pipeline and the notation helpers so the binary, tests and benches can
//! import stable module paths.

pub mod config;
pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod rules {
    pub mod rules_engine;
    pub mod shakmaty_rules;
}

pub mod turns {
    pub mod command;
    pub mod event_log;
    pub mod game_stats;
    pub mod game_store;
    pub mod legal_move_oracle;
    pub mod lifecycle;
    pub mod move_applicator;
    pub mod notifications;
    pub mod turn_arbiter;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod pgn;
    pub mod render_game_state;
}
