use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A row of `GET /api/standings`, already ordered by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub played: u32,
    #[serde(default)]
    pub match_points: f64,
    #[serde(default)]
    pub game_points: f64,
}

/// A leaderboard entry from `GET /api/best_players`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestPlayer {
    #[serde(alias = "id")]
    pub player_id: u32,
    pub rank: u32,
    pub name: String,
    #[serde(alias = "team", default)]
    pub team_name: String,
    #[serde(default)]
    pub points: f64,
    #[serde(default)]
    pub games: u32,
    #[serde(default)]
    pub performance: Option<f64>,
}

/// Pull the leaderboard out of a best-players payload.
///
/// A payload without a `players` array yields an empty leaderboard; only
/// entries inside a present array are held to the record shape.
pub fn best_players_from_value(payload: Value) -> Result<Vec<BestPlayer>, serde_json::Error> {
    match payload {
        Value::Object(mut map) => match map.remove("players") {
            Some(players @ Value::Array(_)) => serde_json::from_value(players),
            _ => Ok(Vec::new()),
        },
        _ => Ok(Vec::new()),
    }
}
