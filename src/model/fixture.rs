use super::result::{BoardResult, BOARDS};
use serde::{Deserialize, Serialize};

/// A row of `GET /api/matches`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub id: u32,
    pub round: u32,
    pub team1_id: u32,
    pub team2_id: u32,
    #[serde(default)]
    pub team1_score: f64,
    #[serde(default)]
    pub team2_score: f64,
    #[serde(default)]
    pub start_time: Option<String>,
}

/// The match record inside a full-details payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: u32,
    pub round: u32,
    pub team1_id: u32,
    pub team1_name: String,
    pub team2_id: u32,
    pub team2_name: String,
    /// Unset when the round has no start time yet
    #[serde(default)]
    pub date_time: Option<String>,
    #[serde(default)]
    pub team1_score: f64,
    #[serde(default)]
    pub team2_score: f64,
}

/// A player assigned to a board for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPlayer {
    pub board: u8,
    pub team_id: u32,
    pub player_id: u32,
    pub player_name: String,
}

/// `GET /api/match/{id}/full-details`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetail {
    #[serde(rename = "match")]
    pub fixture: Match,
    #[serde(default)]
    pub players: Vec<MatchPlayer>,
    #[serde(default)]
    pub results: Vec<BoardResult>,
}

/// One board as displayed: both players and, once played, the score pair
#[derive(Debug, Clone, PartialEq)]
pub struct BoardLine {
    pub board: u8,
    pub player_a: String,
    pub player_b: String,
    pub result: Option<BoardResult>,
}

impl BoardLine {
    pub fn score(&self) -> Option<(f64, f64)> {
        self.result.as_ref().map(|r| r.score())
    }

    pub fn is_pending(&self) -> bool {
        self.result.is_none()
    }
}

impl MatchDetail {
    pub fn id(&self) -> u32 {
        self.fixture.id
    }

    pub fn round(&self) -> u32 {
        self.fixture.round
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    /// Players fielded by one team, in payload order
    pub fn lineup(&self, team_id: u32) -> Vec<&MatchPlayer> {
        self.players.iter().filter(|p| p.team_id == team_id).collect()
    }

    /// Name of the player a team fielded on a board
    pub fn player_on(&self, team_id: u32, board: u8) -> Option<&str> {
        board_player(&self.lineup(team_id), board)
    }

    /// The result stored for a board; a later entry for the same board wins
    pub fn result_for(&self, board: u8) -> Option<&BoardResult> {
        self.results.iter().rev().find(|r| r.board == board)
    }

    /// Boards 1-4 with names filled in ("Board N" when nobody is assigned)
    pub fn board_lines(&self) -> Vec<BoardLine> {
        let side_a = self.lineup(self.fixture.team1_id);
        let side_b = self.lineup(self.fixture.team2_id);

        BOARDS
            .iter()
            .map(|&board| {
                let fallback = || format!("Board {}", board);
                BoardLine {
                    board,
                    player_a: board_player(&side_a, board)
                        .map(String::from)
                        .unwrap_or_else(fallback),
                    player_b: board_player(&side_b, board)
                        .map(String::from)
                        .unwrap_or_else(fallback),
                    result: self.result_for(board).cloned(),
                }
            })
            .collect()
    }
}

fn board_player<'a>(lineup: &[&'a MatchPlayer], board: u8) -> Option<&'a str> {
    lineup
        .iter()
        .copied()
        .find(|p| p.board == board)
        .map(|p| p.player_name.as_str())
}
