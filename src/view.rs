//! Plain-text rendering of the tournament views

use crate::error::{Result, TournamentError};
use crate::model::{format_points, BestPlayer, Standing, Team};
use crate::schedule::{editable_round_time, format_round_time, Schedule};
use chrono::TimeZone;
use std::fmt;

/// Per-invocation display settings, passed to every view.
///
/// `admin` only changes what is shown and which commands the CLI offers.
/// It is not an authorization check; the backend accepts writes from anyone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewContext {
    pub admin: bool,
}

impl ViewContext {
    pub fn new(admin: bool) -> Self {
        Self { admin }
    }

    pub fn require_admin(&self) -> Result<()> {
        if self.admin {
            Ok(())
        } else {
            Err(TournamentError::AdminRequired)
        }
    }
}

/// Rounds, matches and boards
pub struct ScheduleView<'a, Tz> {
    pub schedule: &'a Schedule,
    pub ctx: &'a ViewContext,
    pub tz: &'a Tz,
}

impl<Tz> fmt::Display for ScheduleView<'_, Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tournament Schedule")?;

        if self.schedule.is_empty() {
            return writeln!(f, "\nNo matches scheduled.");
        }

        for round in self.schedule.rounds() {
            writeln!(f, "\nRound {}", round.number)?;
            if let Some(raw) = round.date_time() {
                if self.ctx.admin {
                    writeln!(f, "  Time: {}", editable_round_time(raw, self.tz))?;
                } else {
                    writeln!(f, "  {}", format_round_time(raw, self.tz))?;
                }
            }

            for detail in &round.matches {
                let m = &detail.fixture;
                write!(f, "\n  ")?;
                if self.ctx.admin {
                    write!(f, "[match {}] ", m.id)?;
                }
                write!(f, "{} vs {}", m.team1_name, m.team2_name)?;
                if detail.has_results() {
                    write!(
                        f,
                        " ({}-{})",
                        format_points(m.team1_score),
                        format_points(m.team2_score)
                    )?;
                }
                writeln!(f)?;

                for line in detail.board_lines() {
                    write!(f, "    {}. {} vs {}", line.board, line.player_a, line.player_b)?;
                    match line.score() {
                        Some((a, b)) => write!(f, "  {}-{}", format_points(a), format_points(b))?,
                        None if self.ctx.admin => write!(f, "  pending")?,
                        None => {}
                    }
                    writeln!(f)?;
                }
            }
        }
        Ok(())
    }
}

/// Team table in server order, numbered from 1
pub struct StandingsView<'a>(pub &'a [Standing]);

impl fmt::Display for StandingsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.0;
        let w = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(0).max(4);

        writeln!(
            f,
            "{:>3}  {:<w$}  {:>6}  {:>8}  {:>7}",
            "#", "Team", "Played", "MatchPts", "GamePts"
        )?;
        for (idx, row) in rows.iter().enumerate() {
            writeln!(
                f,
                "{:>3}  {:<w$}  {:>6}  {:>8}  {:>7}",
                idx + 1,
                row.name,
                row.played,
                format_points(row.match_points),
                format_points(row.game_points)
            )?;
        }
        Ok(())
    }
}

/// Rosters, with ids shown in admin mode so edits can target them
pub struct TeamsView<'a> {
    pub teams: &'a [Team],
    pub ctx: &'a ViewContext,
}

impl fmt::Display for TeamsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Teams")?;

        for team in self.teams {
            if self.ctx.admin {
                writeln!(f, "\n{} [team {}]", team.name, team.id)?;
            } else {
                writeln!(f, "\n{}", team.name)?;
            }

            let w = team
                .players
                .iter()
                .map(|p| p.name.chars().count())
                .max()
                .unwrap_or(0)
                .max(4);
            writeln!(f, "  {:>2}  {:<w$}  {:>6}", "#", "Name", "Rating")?;
            for (idx, player) in team.players.iter().enumerate() {
                write!(f, "  {:>2}  {:<w$}  {:>6}", idx + 1, player.name, player.rating)?;
                if self.ctx.admin {
                    write!(f, "  [player {}]", player.id)?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// The best-player leaderboard
pub struct BestPlayersView<'a>(pub &'a [BestPlayer]);

impl fmt::Display for BestPlayersView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let players = self.0;
        if players.is_empty() {
            return writeln!(f, "No player results yet.");
        }

        let nw = players.iter().map(|p| p.name.chars().count()).max().unwrap_or(0).max(4);
        let tw = players
            .iter()
            .map(|p| p.team_name.chars().count())
            .max()
            .unwrap_or(0)
            .max(4);

        writeln!(
            f,
            "{:>4}  {:<nw$}  {:<tw$}  {:>6}  {:>5}  {:>11}",
            "Rank", "Name", "Team", "Points", "Games", "Performance"
        )?;
        for p in players {
            let performance = p
                .performance
                .map(|v| format!("{:.0}", v))
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                f,
                "{:>4}  {:<nw$}  {:<tw$}  {:>6}  {:>5}  {:>11}",
                p.rank,
                p.name,
                p.team_name,
                format_points(p.points),
                p.games,
                performance
            )?;
        }
        Ok(())
    }
}

pub fn render_schedule<Tz>(schedule: &Schedule, ctx: &ViewContext, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    ScheduleView { schedule, ctx, tz }.to_string()
}

pub fn render_standings(rows: &[Standing]) -> String {
    StandingsView(rows).to_string()
}

pub fn render_teams(teams: &[Team], ctx: &ViewContext) -> String {
    TeamsView { teams, ctx }.to_string()
}

pub fn render_best_players(players: &[BestPlayer]) -> String {
    BestPlayersView(players).to_string()
}
