//! Value types shared by the rules engine and the turn pipeline.
//!
//! Squares are indexed `rank * 8 + file` (`0 == a1`, `63 == h8`), the same
//! layout the rules library uses, but every enumeration the turn pipeline
//! performs walks the board file-major (a1..a8, b1..b8, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use crate::game_state::game_state::GameState;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl From<shakmaty::Color> for Color {
    fn from(color: shakmaty::Color) -> Self {
        match color {
            shakmaty::Color::White => Color::White,
            shakmaty::Color::Black => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// One of the 64 board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Build a square from zero-based file (`a == 0`) and rank (`1 == 0`).
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self(rank * 8 + file))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// All squares in file-major order: a1, a2, ..., a8, b1, ..., h8.
    pub fn file_major() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|file| (0..8u8).map(move |rank| Square(rank * 8 + file)))
    }
}

impl From<Square> for shakmaty::Square {
    fn from(square: Square) -> Self {
        shakmaty::Square::new(u32::from(square.0))
    }
}

impl From<shakmaty::Square> for Square {
    fn from(square: shakmaty::Square) -> Self {
        Self(square as u8)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = char::from(b'a' + self.file());
        let rank = char::from(b'1' + self.rank());
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::utils::algebraic::algebraic_to_square(s)
    }
}

impl Serialize for Square {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Origin and destination of a move in four-character coordinate form (`e2e4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MovePair {
    pub from: Square,
    pub to: Square,
}

impl MovePair {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for MovePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl FromStr for MovePair {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::utils::algebraic::coordinates_to_move_pair(s)
    }
}

impl Serialize for MovePair {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MovePair {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Game status as reported by the rules engine after each applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "winner")]
pub enum Status {
    InProgress,
    WonByCheckmate(Color),
    WonByResignation(Color),
    Stalemate,
    InsufficientMaterial,
    FiftyMoveDraw,
    ThreefoldRepetition,
    Unknown,
}

impl Status {
    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, Status::InProgress)
    }

    /// PGN result token for the record header.
    pub const fn result_token(self) -> &'static str {
        match self {
            Status::WonByCheckmate(Color::White) | Status::WonByResignation(Color::White) => "1-0",
            Status::WonByCheckmate(Color::Black) | Status::WonByResignation(Color::Black) => "0-1",
            Status::Stalemate
            | Status::InsufficientMaterial
            | Status::FiftyMoveDraw
            | Status::ThreefoldRepetition => "1/2-1/2",
            Status::InProgress | Status::Unknown => "*",
        }
    }

    /// Human-readable sentence used in notifications.
    pub const fn describe(self) -> &'static str {
        match self {
            Status::InProgress => "Game is in progress.",
            Status::WonByCheckmate(Color::White) => "Game won by white with a checkmate.",
            Status::WonByCheckmate(Color::Black) => "Game won by black with a checkmate.",
            Status::WonByResignation(Color::White) => "Game won by white for resign.",
            Status::WonByResignation(Color::Black) => "Game won by black for resign.",
            Status::Stalemate => "Game was a draw due to stalemate.",
            Status::InsufficientMaterial => {
                "Game was a draw due to insufficient material to checkmate."
            }
            Status::FiftyMoveDraw => "Game was a draw due to fifty rule move.",
            Status::ThreefoldRepetition => "Game was a draw due to threefold repetition.",
            Status::Unknown => "Game terminated. Something went wrong.",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::InProgress => write!(f, "in_progress"),
            Status::WonByCheckmate(color) => write!(f, "{color}_won"),
            Status::WonByResignation(color) => write!(f, "{color}_won_resign"),
            Status::Stalemate => write!(f, "stalemate"),
            Status::InsufficientMaterial => write!(f, "insufficient_material"),
            Status::FiftyMoveDraw => write!(f, "fifty_rule_move"),
            Status::ThreefoldRepetition => write!(f, "threefold_repetition"),
            Status::Unknown => write!(f, "unknown"),
        }
    }
}
