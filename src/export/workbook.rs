use crate::error::Result;
use crate::model::{format_points, BestPlayer, Standing};
use crate::schedule::Schedule;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;

/// Write standings, the leaderboard and the schedule to an Excel file
pub fn write_tournament_to_xlsx(
    standings: &[Standing],
    best_players: &[BestPlayer],
    schedule: &Schedule,
    path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();

    let standings_sheet = workbook.add_worksheet();
    write_standings_sheet(standings_sheet, standings)?;

    let players_sheet = workbook.add_worksheet();
    write_best_players_sheet(players_sheet, best_players)?;

    // Schedule sheet only when there is something to list
    if !schedule.is_empty() {
        let schedule_sheet = workbook.add_worksheet();
        write_schedule_sheet(schedule_sheet, schedule)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border_bottom(FormatBorder::Thin)
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str]) -> Result<()> {
    let format = header_format();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &format)?;
    }
    Ok(())
}

fn write_standings_sheet(sheet: &mut Worksheet, rows: &[Standing]) -> Result<()> {
    sheet.set_name("Standings")?;

    sheet.set_column_width(0, 5)?;   // #
    sheet.set_column_width(1, 24)?;  // Team
    sheet.set_column_width(2, 8)?;   // Played
    sheet.set_column_width(3, 10)?;  // MatchPts
    sheet.set_column_width(4, 10)?;  // GamePts

    write_headers(sheet, &["#", "Team", "Played", "MatchPts", "GamePts"])?;

    let center_format = Format::new().set_align(FormatAlign::Center);
    let points_format = Format::new().set_align(FormatAlign::Right).set_num_format("0.0");

    for (idx, standing) in rows.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_number_with_format(row, 0, (idx + 1) as f64, &center_format)?;
        sheet.write_string(row, 1, &standing.name)?;
        sheet.write_number_with_format(row, 2, standing.played as f64, &center_format)?;
        sheet.write_number_with_format(row, 3, standing.match_points, &points_format)?;
        sheet.write_number_with_format(row, 4, standing.game_points, &points_format)?;
    }

    Ok(())
}

fn write_best_players_sheet(sheet: &mut Worksheet, players: &[BestPlayer]) -> Result<()> {
    sheet.set_name("Best Players")?;

    sheet.set_column_width(0, 6)?;   // Rank
    sheet.set_column_width(1, 22)?;  // Name
    sheet.set_column_width(2, 22)?;  // Team
    sheet.set_column_width(3, 8)?;   // Points
    sheet.set_column_width(4, 8)?;   // Games
    sheet.set_column_width(5, 12)?;  // Performance

    write_headers(sheet, &["Rank", "Name", "Team", "Points", "Games", "Performance"])?;

    let center_format = Format::new().set_align(FormatAlign::Center);
    let points_format = Format::new().set_align(FormatAlign::Right).set_num_format("0.0");

    for (idx, player) in players.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_number_with_format(row, 0, player.rank as f64, &center_format)?;
        sheet.write_string(row, 1, &player.name)?;
        sheet.write_string(row, 2, &player.team_name)?;
        sheet.write_number_with_format(row, 3, player.points, &points_format)?;
        sheet.write_number_with_format(row, 4, player.games as f64, &center_format)?;
        if let Some(performance) = player.performance {
            sheet.write_number_with_format(row, 5, performance, &center_format)?;
        }
    }

    Ok(())
}

/// One row per board, grouped by round in schedule order
fn write_schedule_sheet(sheet: &mut Worksheet, schedule: &Schedule) -> Result<()> {
    sheet.set_name("Schedule")?;

    sheet.set_column_width(0, 7)?;   // Round
    sheet.set_column_width(1, 22)?;  // Time
    sheet.set_column_width(2, 7)?;   // Match
    sheet.set_column_width(3, 20)?;  // Team A
    sheet.set_column_width(4, 20)?;  // Team B
    sheet.set_column_width(5, 7)?;   // Board
    sheet.set_column_width(6, 20)?;  // Player A
    sheet.set_column_width(7, 20)?;  // Player B
    sheet.set_column_width(8, 9)?;   // Score

    write_headers(
        sheet,
        &["Round", "Time", "Match", "Team A", "Team B", "Board", "Player A", "Player B", "Score"],
    )?;

    let center_format = Format::new().set_align(FormatAlign::Center);

    let mut row = 1u32;
    for round in schedule.rounds() {
        let time = round.date_time().unwrap_or_default();
        for detail in &round.matches {
            let m = &detail.fixture;
            for line in detail.board_lines() {
                sheet.write_number_with_format(row, 0, round.number as f64, &center_format)?;
                sheet.write_string(row, 1, time)?;
                sheet.write_number_with_format(row, 2, m.id as f64, &center_format)?;
                sheet.write_string(row, 3, &m.team1_name)?;
                sheet.write_string(row, 4, &m.team2_name)?;
                sheet.write_number_with_format(row, 5, line.board as f64, &center_format)?;
                sheet.write_string(row, 6, &line.player_a)?;
                sheet.write_string(row, 7, &line.player_b)?;
                if let Some((a, b)) = line.score() {
                    let score = format!("{}-{}", format_points(a), format_points(b));
                    sheet.write_string_with_format(row, 8, &score, &center_format)?;
                }
                row += 1;
            }
        }
    }

    Ok(())
}
