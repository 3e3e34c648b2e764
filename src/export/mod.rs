//! Export of tournament tables to files

pub mod workbook;

pub use workbook::write_tournament_to_xlsx;

use crate::error::Result;
use crate::model::Standing;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct StandingRecord<'a> {
    position: usize,
    team: &'a str,
    played: u32,
    match_points: f64,
    game_points: f64,
}

/// Write the standings table as CSV, one team per row
pub fn write_standings_csv(rows: &[Standing], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for (idx, standing) in rows.iter().enumerate() {
        writer.serialize(StandingRecord {
            position: idx + 1,
            team: &standing.name,
            played: standing.played,
            match_points: standing.match_points,
            game_points: standing.game_points,
        })?;
    }
    writer.flush()?;
    Ok(())
}
