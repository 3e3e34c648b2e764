//! Typed access to the tournament REST endpoints

pub mod http;
#[cfg(test)]
pub(crate) mod memory;

pub use http::{ClientConfig, HttpTransport};

use crate::error::{Result, TournamentError};
use crate::model::{
    best_players_from_value, BestPlayer, MatchDetail, MatchSummary, ResultCode, Standing, Team,
};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Moves raw JSON bodies to and from the backend.
///
/// `get` fails on any non-success status; `post` only reports whether the
/// write was accepted. Implementations must be shareable across threads so
/// match details can be fetched in parallel.
pub trait Transport: Sync {
    fn get(&self, path: &str) -> Result<String>;
    fn post(&self, path: &str, body: String) -> Result<()>;
}

#[derive(Serialize)]
struct UpdateRoundRequest<'a> {
    round: u32,
    date_time: &'a str,
}

#[derive(Serialize)]
struct SubmitResultRequest {
    board: u8,
    result: ResultCode,
}

#[derive(Serialize)]
struct NameRequest<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct RatingRequest {
    rating: i32,
}

/// Client for the tournament backend
pub struct ApiClient<T: Transport> {
    transport: T,
}

impl ApiClient<HttpTransport> {
    /// Connect over HTTP using the given configuration
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let body = self.transport.get(path)?;
        serde_json::from_str(&body).map_err(|source| TournamentError::Malformed {
            path: path.to_string(),
            source,
        })
    }

    fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let body = serde_json::to_string(body).map_err(|source| TournamentError::Malformed {
            path: path.to_string(),
            source,
        })?;
        self.transport.post(path, body)
    }

    pub fn matches(&self) -> Result<Vec<MatchSummary>> {
        self.get_json("/api/matches")
    }

    pub fn match_details(&self, match_id: u32) -> Result<MatchDetail> {
        self.get_json(&format!("/api/match/{}/full-details", match_id))
    }

    /// Move every match of a round to a new UTC timestamp
    pub fn update_round_time(&self, round: u32, date_time: &str) -> Result<()> {
        self.post_json("/api/update-match", &UpdateRoundRequest { round, date_time })
    }

    pub fn submit_board_result(&self, match_id: u32, board: u8, result: ResultCode) -> Result<()> {
        self.post_json(
            &format!("/api/match/{}/submit-single", match_id),
            &SubmitResultRequest { board, result },
        )
    }

    pub fn standings(&self) -> Result<Vec<Standing>> {
        self.get_json("/api/standings")
    }

    pub fn teams(&self) -> Result<Vec<Team>> {
        self.get_json("/api/teams")
    }

    pub fn rename_team(&self, team_id: u32, name: &str) -> Result<()> {
        self.post_json(&format!("/api/team/{}/edit-name", team_id), &NameRequest { name })
    }

    pub fn rename_player(&self, player_id: u32, name: &str) -> Result<()> {
        self.post_json(&format!("/api/player/{}/edit-name", player_id), &NameRequest { name })
    }

    pub fn set_player_rating(&self, player_id: u32, rating: i32) -> Result<()> {
        self.post_json(
            &format!("/api/player/{}/edit-rating", player_id),
            &RatingRequest { rating },
        )
    }

    /// The leaderboard; a payload without a `players` array counts as empty
    pub fn best_players(&self) -> Result<Vec<BestPlayer>> {
        const PATH: &str = "/api/best_players";
        let payload: serde_json::Value = self.get_json(PATH)?;
        if !payload.get("players").is_some_and(|p| p.is_array()) {
            warn!("{} returned no players array, showing an empty leaderboard", PATH);
        }
        let players = best_players_from_value(payload).map_err(|source| {
            TournamentError::Malformed {
                path: PATH.to_string(),
                source,
            }
        })?;
        debug!("Loaded {} leaderboard entries", players.len());
        Ok(players)
    }
}
