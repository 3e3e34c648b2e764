use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use chess_tournament::export;
use chess_tournament::view::{self, ViewContext};
use chess_tournament::{ApiClient, ClientConfig, HttpTransport, ResultCode, Roster, Schedule};

type Api = ApiClient<HttpTransport>;

#[derive(Parser)]
#[command(name = "chess-tournament")]
#[command(about = "View and administer a chess team tournament", long_about = None)]
struct Cli {
    /// Base URL of the tournament backend
    #[arg(long, global = true, env = "TOURNAMENT_API_URL", default_value = ClientConfig::DEFAULT_URL)]
    server: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "TOURNAMENT_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// Show admin details and allow edits (display setting, not access control)
    #[arg(long, global = true, env = "TOURNAMENT_ADMIN")]
    admin: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show rounds, matches and board results
    Schedule,

    /// Show the team standings
    Standings,

    /// Show team rosters
    Teams,

    /// Show the best-player leaderboard
    BestPlayers,

    /// Move every match of a round to a new time (admin)
    SetRoundTime {
        /// Round number
        round: u32,

        /// Local date and time, e.g. 2025-06-01T10:00
        datetime: String,
    },

    /// Record the result of one board (admin)
    SubmitResult {
        /// Match id as shown by `schedule --admin`
        match_id: u32,

        /// Board number (1-4)
        board: u8,

        /// A (team A wins), B (team B wins) or D (draw)
        result: String,
    },

    /// Rename a team (admin)
    RenameTeam {
        team_id: u32,
        name: String,
    },

    /// Rename a player (admin)
    RenamePlayer {
        player_id: u32,
        name: String,
    },

    /// Change a player's rating (admin)
    SetRating {
        player_id: u32,

        #[arg(allow_negative_numbers = true)]
        rating: i32,
    },

    /// Export tables to a file (.xlsx for everything, .csv for standings)
    Export {
        /// Output file
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let ctx = ViewContext::new(cli.admin);

    let config = ClientConfig::new(&cli.server).with_timeout(Duration::from_secs(cli.timeout));
    let api = ApiClient::connect(&config).context("Failed to set up the backend client")?;

    match cli.command {
        Commands::Schedule => show_schedule(&api, &ctx)?,
        Commands::Standings => show_standings(&api)?,
        Commands::Teams => show_teams(&api, &ctx)?,
        Commands::BestPlayers => show_best_players(&api)?,
        Commands::SetRoundTime { round, datetime } => {
            set_round_time(&api, &ctx, round, &datetime)?;
        }
        Commands::SubmitResult { match_id, board, result } => {
            submit_result(&api, &ctx, match_id, board, &result)?;
        }
        Commands::RenameTeam { team_id, name } => {
            ctx.require_admin()?;
            let mut roster = Roster::load(&api).context("Failed to load teams")?;
            roster
                .rename_team(&api, team_id, &name)
                .with_context(|| format!("Failed to rename team {}", team_id))?;
            print!("{}", view::render_teams(roster.teams(), &ctx));
        }
        Commands::RenamePlayer { player_id, name } => {
            ctx.require_admin()?;
            let mut roster = Roster::load(&api).context("Failed to load teams")?;
            roster
                .rename_player(&api, player_id, &name)
                .with_context(|| format!("Failed to rename player {}", player_id))?;
            print!("{}", view::render_teams(roster.teams(), &ctx));
        }
        Commands::SetRating { player_id, rating } => {
            ctx.require_admin()?;
            let mut roster = Roster::load(&api).context("Failed to load teams")?;
            roster
                .set_player_rating(&api, player_id, rating)
                .with_context(|| format!("Failed to set rating of player {}", player_id))?;
            print!("{}", view::render_teams(roster.teams(), &ctx));
        }
        Commands::Export { output } => export_tables(&api, &output)?,
    }

    Ok(())
}

fn show_schedule(api: &Api, ctx: &ViewContext) -> Result<()> {
    let schedule = Schedule::load(api).context("Failed to load schedule")?;
    print!("{}", view::render_schedule(&schedule, ctx, &Local));
    Ok(())
}

fn show_standings(api: &Api) -> Result<()> {
    let rows = api.standings().context("Failed to load standings")?;
    print!("{}", view::render_standings(&rows));
    Ok(())
}

fn show_teams(api: &Api, ctx: &ViewContext) -> Result<()> {
    let roster = Roster::load(api).context("Failed to load teams")?;
    print!("{}", view::render_teams(roster.teams(), ctx));
    Ok(())
}

fn show_best_players(api: &Api) -> Result<()> {
    let players = api.best_players().context("Failed to load best players")?;
    print!("{}", view::render_best_players(&players));
    Ok(())
}

fn set_round_time(api: &Api, ctx: &ViewContext, round: u32, datetime: &str) -> Result<()> {
    ctx.require_admin()?;
    let mut schedule = Schedule::load(api).context("Failed to load schedule")?;
    let stamp = schedule
        .set_round_time(api, round, datetime, &Local)
        .with_context(|| format!("Failed to update round {}", round))?;
    println!("Round {} now starts at {}", round, stamp);
    print!("{}", view::render_schedule(&schedule, ctx, &Local));
    Ok(())
}

fn submit_result(api: &Api, ctx: &ViewContext, match_id: u32, board: u8, result: &str) -> Result<()> {
    ctx.require_admin()?;
    let code: ResultCode = result.parse()?;
    let mut schedule = Schedule::load(api).context("Failed to load schedule")?;
    if schedule.find_match(match_id).is_none() {
        anyhow::bail!("Match {} is not on the schedule", match_id);
    }
    schedule
        .submit_board_result(api, match_id, board, code)
        .with_context(|| format!("Failed to submit board {} of match {}", board, match_id))?;
    print!("{}", view::render_schedule(&schedule, ctx, &Local));
    Ok(())
}

fn export_tables(api: &Api, output: &PathBuf) -> Result<()> {
    let ext = output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "xlsx" => {
            let standings = api.standings().context("Failed to load standings")?;
            let players = api.best_players().context("Failed to load best players")?;
            let schedule = Schedule::load(api).context("Failed to load schedule")?;
            println!("Writing Excel file: {}", output.display());
            export::write_tournament_to_xlsx(&standings, &players, &schedule, output)
                .context("Failed to write Excel file")?;
        }
        "csv" => {
            let standings = api.standings().context("Failed to load standings")?;
            println!("Writing CSV file: {}", output.display());
            export::write_standings_csv(&standings, output).context("Failed to write CSV file")?;
        }
        _ => {
            anyhow::bail!("Unsupported output format: {}", ext);
        }
    }

    println!("Done!");
    Ok(())
}
