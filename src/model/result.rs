//! Board results and the per-board score pair shown next to them

use crate::error::{Result, TournamentError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boards played in every team match
pub const BOARDS: [u8; 4] = [1, 2, 3, 4];

/// The outcome of a single board, from the point of view of team A (team1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultCode {
    #[serde(rename = "A")]
    AWins,
    #[serde(rename = "B")]
    BWins,
    #[serde(rename = "D")]
    Draw,
}

impl ResultCode {
    /// Parse a stored code. Only the exact letters A, B and D count.
    pub fn from_stored(s: &str) -> Option<ResultCode> {
        match s {
            "A" => Some(ResultCode::AWins),
            "B" => Some(ResultCode::BWins),
            "D" => Some(ResultCode::Draw),
            _ => None,
        }
    }

    /// Points for (team A, team B)
    pub fn score(&self) -> (f64, f64) {
        match self {
            ResultCode::AWins => (1.0, 0.0),
            ResultCode::BWins => (0.0, 1.0),
            ResultCode::Draw => (0.5, 0.5),
        }
    }
}

/// Lenient parsing for typed input: surrounding blanks and lowercase are accepted
impl std::str::FromStr for ResultCode {
    type Err = TournamentError;

    fn from_str(s: &str) -> Result<Self> {
        ResultCode::from_stored(&s.trim().to_uppercase())
            .ok_or_else(|| TournamentError::InvalidResultCode(s.to_string()))
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultCode::AWins => write!(f, "A wins"),
            ResultCode::BWins => write!(f, "B wins"),
            ResultCode::Draw => write!(f, "Draw"),
        }
    }
}

/// Derive the displayed score pair from a raw stored code.
///
/// Anything other than exactly "A", "B" or "D" counts as (0, 0).
pub fn derive_score(code: Option<&str>) -> (f64, f64) {
    code.and_then(ResultCode::from_stored)
        .map(|c| c.score())
        .unwrap_or((0.0, 0.0))
}

/// Reject board numbers outside 1-4
pub fn validate_board(board: u8) -> Result<u8> {
    if BOARDS.contains(&board) {
        Ok(board)
    } else {
        Err(TournamentError::InvalidBoard(board))
    }
}

/// A stored result for one board of a match.
///
/// The code is kept raw: the backend owns the set of valid codes, and
/// anything unrecognised still has to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardResult {
    pub board: u8,
    #[serde(default)]
    pub result: Option<String>,
}

impl BoardResult {
    pub fn code(&self) -> Option<ResultCode> {
        self.result.as_deref().and_then(ResultCode::from_stored)
    }

    pub fn score(&self) -> (f64, f64) {
        derive_score(self.result.as_deref())
    }
}

/// Format a half-point score the way the tables show it: 1, 0, 0.5
pub fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{}", points as i64)
    } else {
        format!("{}", points)
    }
}
