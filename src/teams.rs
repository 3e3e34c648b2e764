//! Team rosters and their admin edits
//!
//! Every edit is written and then the whole roster list is fetched again,
//! whether or not the write was accepted, so the local copy always shows
//! what the backend holds.

use crate::api::{ApiClient, Transport};
use crate::error::{Result, TournamentError};
use crate::model::{Player, Team};
use log::{info, warn};

/// Trim a new team or player name, rejecting empty ones
pub fn clean_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        Err(TournamentError::InvalidName)
    } else {
        Ok(name)
    }
}

#[derive(Debug, Default, Clone)]
pub struct Roster {
    teams: Vec<Team>,
}

impl Roster {
    pub fn from_teams(teams: Vec<Team>) -> Self {
        Self { teams }
    }

    pub fn load<T: Transport>(api: &ApiClient<T>) -> Result<Self> {
        Ok(Self::from_teams(api.teams()?))
    }

    pub fn reload<T: Transport>(&mut self, api: &ApiClient<T>) -> Result<()> {
        self.teams = api.teams()?;
        Ok(())
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, team_id: u32) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    pub fn find_player(&self, player_id: u32) -> Option<(&Team, &Player)> {
        self.teams
            .iter()
            .find_map(|t| t.player(player_id).map(|p| (t, p)))
    }

    pub fn rename_team<T: Transport>(
        &mut self,
        api: &ApiClient<T>,
        team_id: u32,
        name: &str,
    ) -> Result<()> {
        let name = clean_name(name)?;
        let written = api.rename_team(team_id, name);
        self.finish_edit(api, written)?;
        info!("Team {} renamed to {}", team_id, name);
        Ok(())
    }

    pub fn rename_player<T: Transport>(
        &mut self,
        api: &ApiClient<T>,
        player_id: u32,
        name: &str,
    ) -> Result<()> {
        let name = clean_name(name)?;
        self.require_player(player_id)?;
        let written = api.rename_player(player_id, name);
        self.finish_edit(api, written)?;
        info!("Player {} renamed to {}", player_id, name);
        Ok(())
    }

    pub fn set_player_rating<T: Transport>(
        &mut self,
        api: &ApiClient<T>,
        player_id: u32,
        rating: i32,
    ) -> Result<()> {
        self.require_player(player_id)?;
        let written = api.set_player_rating(player_id, rating);
        self.finish_edit(api, written)?;
        info!("Player {} rating set to {}", player_id, rating);
        Ok(())
    }

    fn require_player(&self, player_id: u32) -> Result<()> {
        match self.find_player(player_id) {
            Some(_) => Ok(()),
            None => Err(TournamentError::PlayerNotFound(player_id)),
        }
    }

    /// Refetch after a write; a write error takes precedence over a refetch error
    fn finish_edit<T: Transport>(&mut self, api: &ApiClient<T>, written: Result<()>) -> Result<()> {
        let refreshed = self.reload(api);
        if let Err(e) = &written {
            warn!("Edit rejected: {}", e);
        }
        written?;
        refreshed
    }
}
