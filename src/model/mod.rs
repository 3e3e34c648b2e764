pub mod fixture;
pub mod result;
pub mod standings;
pub mod team;

pub use fixture::{BoardLine, Match, MatchDetail, MatchPlayer, MatchSummary};
pub use result::{derive_score, format_points, validate_board, BoardResult, ResultCode, BOARDS};
pub use standings::{best_players_from_value, BestPlayer, Standing};
pub use team::{Player, Team};
