//! Round-based schedule: aggregation of match details and admin edits
//!
//! The schedule is a local copy of server state. Round-time edits patch the
//! copy once the backend accepts them; board results always trigger a full
//! re-aggregation, because the backend recomputes team scores and the client
//! does not duplicate that logic.

pub mod time;

pub use time::{editable_round_time, format_round_time, to_utc_timestamp};

use crate::api::{ApiClient, Transport};
use crate::error::Result;
use crate::model::{validate_board, MatchDetail, ResultCode};
use chrono::TimeZone;
use log::{debug, info};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Fetch the match list, then every match's full details in parallel.
///
/// All or nothing: if any detail fetch fails the whole load fails. The
/// returned list keeps the server's list order.
pub fn aggregate_matches<T: Transport>(api: &ApiClient<T>) -> Result<Vec<MatchDetail>> {
    let summaries = api.matches()?;
    debug!("Fetching details for {} matches", summaries.len());

    let details = summaries
        .par_iter()
        .map(|summary| api.match_details(summary.id))
        .collect::<Result<Vec<_>>>()?;

    info!("Loaded {} matches", details.len());
    Ok(details)
}

/// Partition matches by round, keeping first-seen order within each round
pub fn group_by_round(matches: &[MatchDetail]) -> BTreeMap<u32, Vec<&MatchDetail>> {
    let mut rounds: BTreeMap<u32, Vec<&MatchDetail>> = BTreeMap::new();
    for detail in matches {
        rounds.entry(detail.round()).or_default().push(detail);
    }
    rounds
}

/// One round of the schedule
#[derive(Debug, Clone)]
pub struct Round<'a> {
    pub number: u32,
    pub matches: Vec<&'a MatchDetail>,
}

impl Round<'_> {
    /// The round's time, taken from its first match
    pub fn date_time(&self) -> Option<&str> {
        self.matches.first().and_then(|m| m.fixture.date_time.as_deref())
    }
}

/// Locally held schedule with its admin operations
#[derive(Debug, Default, Clone)]
pub struct Schedule {
    matches: Vec<MatchDetail>,
}

impl Schedule {
    pub fn from_matches(matches: Vec<MatchDetail>) -> Self {
        Self { matches }
    }

    pub fn load<T: Transport>(api: &ApiClient<T>) -> Result<Self> {
        Ok(Self::from_matches(aggregate_matches(api)?))
    }

    /// Re-run the aggregation. The current copy is kept if it fails.
    pub fn reload<T: Transport>(&mut self, api: &ApiClient<T>) -> Result<()> {
        self.matches = aggregate_matches(api)?;
        Ok(())
    }

    pub fn matches(&self) -> &[MatchDetail] {
        &self.matches
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn find_match(&self, match_id: u32) -> Option<&MatchDetail> {
        self.matches.iter().find(|m| m.id() == match_id)
    }

    pub fn by_round(&self) -> BTreeMap<u32, Vec<&MatchDetail>> {
        group_by_round(&self.matches)
    }

    pub fn rounds(&self) -> Vec<Round<'_>> {
        self.by_round()
            .into_iter()
            .map(|(number, matches)| Round { number, matches })
            .collect()
    }

    /// Move a whole round to a new time.
    ///
    /// `input` is wall-clock time (`YYYY-MM-DDTHH:MM`) in `tz`. Once the
    /// backend accepts the change every local match of that round carries the
    /// new UTC timestamp, which is also returned. On failure nothing changes
    /// locally and the error is returned.
    pub fn set_round_time<T: Transport, Tz: TimeZone>(
        &mut self,
        api: &ApiClient<T>,
        round: u32,
        input: &str,
        tz: &Tz,
    ) -> Result<String> {
        let timestamp = to_utc_timestamp(input, tz)?;
        api.update_round_time(round, &timestamp)?;

        let mut patched = 0;
        for detail in self.matches.iter_mut().filter(|m| m.round() == round) {
            detail.fixture.date_time = Some(timestamp.clone());
            patched += 1;
        }
        info!("Round {} moved to {} ({} matches)", round, timestamp, patched);
        Ok(timestamp)
    }

    /// Record one board's result, then reload everything from the backend
    pub fn submit_board_result<T: Transport>(
        &mut self,
        api: &ApiClient<T>,
        match_id: u32,
        board: u8,
        result: ResultCode,
    ) -> Result<()> {
        let board = validate_board(board)?;
        api.submit_board_result(match_id, board, result)?;
        info!("Match {} board {}: {}", match_id, board, result);
        self.reload(api)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::MemoryTransport;
    use crate::error::TournamentError;
    use chrono::{FixedOffset, Utc};

    fn detail_json(id: u32, round: u32, results: &str) -> String {
        format!(
            r#"{{"match": {{"id": {id}, "round": {round},
                "team1_id": 1, "team1_name": "Knights",
                "team2_id": 2, "team2_name": "Rooks",
                "date_time": "2025-06-20 10:00",
                "team1_score": 0, "team2_score": 0}},
              "players": [], "results": [{results}]}}"#
        )
    }

    fn list_json(matches: &[(u32, u32)]) -> String {
        let rows: Vec<String> = matches
            .iter()
            .map(|(id, round)| {
                format!(r#"{{"id": {id}, "round": {round}, "team1_id": 1, "team2_id": 2}}"#)
            })
            .collect();
        format!("[{}]", rows.join(","))
    }

    fn transport_for(matches: &[(u32, u32)]) -> MemoryTransport {
        matches.iter().fold(
            MemoryTransport::new().respond("/api/matches", &list_json(matches)),
            |t, &(id, round)| {
                t.respond(
                    &format!("/api/match/{}/full-details", id),
                    &detail_json(id, round, ""),
                )
            },
        )
    }

    #[test]
    fn test_aggregate_keeps_list_order() {
        let layout = [(5, 1), (2, 2), (9, 1), (1, 3)];
        let api = ApiClient::new(transport_for(&layout));
        let details = aggregate_matches(&api).unwrap();
        let ids: Vec<u32> = details.iter().map(|d| d.id()).collect();
        assert_eq!(ids, vec![5, 2, 9, 1]);
    }

    #[test]
    fn test_aggregate_is_all_or_nothing() {
        let layout = [(1, 1), (2, 1), (3, 2)];
        let api = ApiClient::new(transport_for(&layout).fail("/api/match/2/full-details", 404));
        let err = aggregate_matches(&api).unwrap_err();
        assert!(matches!(err, TournamentError::Status { status: 404, .. }));
    }

    #[test]
    fn test_list_failure_stops_before_details() {
        let api = ApiClient::new(transport_for(&[(1, 1)]).fail("/api/matches", 500));
        assert!(Schedule::load(&api).is_err());
        assert_eq!(api.transport().get_count("/api/match/1/full-details"), 0);
    }

    #[test]
    fn test_empty_schedule() {
        let api = ApiClient::new(MemoryTransport::new().respond("/api/matches", "[]"));
        let schedule = Schedule::load(&api).unwrap();
        assert!(schedule.is_empty());
        assert!(schedule.rounds().is_empty());
    }

    #[test]
    fn test_group_by_round_is_stable() {
        let layout = [(1, 2), (2, 1), (3, 2), (4, 3), (5, 1), (6, 2)];
        let api = ApiClient::new(transport_for(&layout));
        let schedule = Schedule::load(&api).unwrap();
        let grouped = schedule.by_round();

        assert_eq!(grouped.len(), 3);
        let ids = |round: u32| -> Vec<u32> { grouped[&round].iter().map(|d| d.id()).collect() };
        assert_eq!(ids(1), vec![2, 5]);
        assert_eq!(ids(2), vec![1, 3, 6]);
        assert_eq!(ids(3), vec![4]);

        let total: usize = grouped.values().map(|v| v.len()).sum();
        assert_eq!(total, layout.len());
    }

    #[test]
    fn test_round_time_comes_from_first_match() {
        let mut first: MatchDetail = serde_json::from_str(&detail_json(1, 4, "")).unwrap();
        first.fixture.date_time = Some("2025-07-01T09:00:00.000Z".to_string());
        let second: MatchDetail = serde_json::from_str(&detail_json(2, 4, "")).unwrap();

        let schedule = Schedule::from_matches(vec![first, second]);
        let rounds = schedule.rounds();
        assert_eq!(rounds[0].date_time(), Some("2025-07-01T09:00:00.000Z"));
    }

    #[test]
    fn test_round_without_time() {
        let mut untimed: MatchDetail = serde_json::from_str(&detail_json(1, 6, "")).unwrap();
        untimed.fixture.date_time = None;

        let mut schedule = Schedule::from_matches(vec![untimed]);
        assert_eq!(schedule.rounds()[0].date_time(), None);

        let api = ApiClient::new(MemoryTransport::new());
        schedule.set_round_time(&api, 6, "2025-06-01T10:00", &Utc).unwrap();
        assert_eq!(schedule.rounds()[0].date_time(), Some("2025-06-01T10:00:00.000Z"));
    }

    #[test]
    fn test_set_round_time_patches_only_that_round() {
        let layout = [(1, 3), (2, 2), (3, 3)];
        let api = ApiClient::new(transport_for(&layout));
        let mut schedule = Schedule::load(&api).unwrap();

        let stamp = schedule
            .set_round_time(&api, 3, "2025-06-01T10:00", &Utc)
            .unwrap();
        assert_eq!(stamp, "2025-06-01T10:00:00.000Z");

        for detail in schedule.matches() {
            if detail.round() == 3 {
                assert_eq!(detail.fixture.date_time.as_deref(), Some(stamp.as_str()));
            } else {
                assert_eq!(detail.fixture.date_time.as_deref(), Some("2025-06-20 10:00"));
            }
        }

        let posts = api.transport().posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].0, "/api/update-match");
        let body: serde_json::Value = serde_json::from_str(&posts[0].1).unwrap();
        assert_eq!(body, serde_json::json!({"round": 3, "date_time": stamp}));
    }

    #[test]
    fn test_set_round_time_uses_given_zone() {
        let api = ApiClient::new(transport_for(&[(1, 3)]));
        let mut schedule = Schedule::load(&api).unwrap();
        let cest = FixedOffset::east_opt(2 * 3600).unwrap();
        schedule
            .set_round_time(&api, 3, "2025-06-01T10:00", &cest)
            .unwrap();
        assert_eq!(
            schedule.matches()[0].fixture.date_time.as_deref(),
            Some("2025-06-01T08:00:00.000Z")
        );
    }

    #[test]
    fn test_set_round_time_failure_changes_nothing() {
        let api = ApiClient::new(transport_for(&[(1, 3), (2, 3)]).fail("/api/update-match", 400));
        let mut schedule = Schedule::load(&api).unwrap();
        let before = schedule.clone();

        let err = schedule
            .set_round_time(&api, 3, "2025-06-01T10:00", &Utc)
            .unwrap_err();
        assert!(err.is_status());
        assert_eq!(schedule.matches(), before.matches());
    }

    #[test]
    fn test_set_round_time_bad_input_sends_nothing() {
        let api = ApiClient::new(transport_for(&[(1, 3)]));
        let mut schedule = Schedule::load(&api).unwrap();
        assert!(schedule.set_round_time(&api, 3, "soon", &Utc).is_err());
        assert!(api.transport().posts().is_empty());
    }

    #[test]
    fn test_submit_board_result_reloads_everything() {
        let transport = transport_for(&[(7, 1), (8, 1)])
            .respond("/api/match/7/full-details", &detail_json(7, 1, r#"{"board": 2, "result": "D"}"#));
        let api = ApiClient::new(transport);
        let mut schedule = Schedule::load(&api).unwrap();
        assert!(!schedule.find_match(7).unwrap().has_results());

        schedule
            .submit_board_result(&api, 7, 2, ResultCode::Draw)
            .unwrap();

        assert_eq!(api.transport().get_count("/api/matches"), 2);
        assert_eq!(api.transport().get_count("/api/match/8/full-details"), 2);

        let detail = schedule.find_match(7).unwrap();
        let line = &detail.board_lines()[1];
        assert_eq!(line.board, 2);
        assert_eq!(line.score(), Some((0.5, 0.5)));
    }

    #[test]
    fn test_submit_rejects_bad_board_locally() {
        let api = ApiClient::new(transport_for(&[(7, 1)]));
        let mut schedule = Schedule::load(&api).unwrap();
        assert!(matches!(
            schedule.submit_board_result(&api, 7, 5, ResultCode::AWins),
            Err(TournamentError::InvalidBoard(5))
        ));
        assert!(api.transport().posts().is_empty());
    }

    #[test]
    fn test_submit_failure_skips_reload() {
        let api = ApiClient::new(transport_for(&[(7, 1)]).fail("/api/match/7/submit-single", 400));
        let mut schedule = Schedule::load(&api).unwrap();
        assert!(schedule
            .submit_board_result(&api, 7, 1, ResultCode::AWins)
            .is_err());
        assert_eq!(api.transport().get_count("/api/matches"), 1);
    }

    #[test]
    fn test_failed_reload_keeps_previous_copy() {
        let api = ApiClient::new(transport_for(&[(7, 1)]));
        let mut schedule = Schedule::load(&api).unwrap();

        let api = ApiClient::new(transport_for(&[(7, 1)]).fail("/api/match/7/full-details", 503));
        assert!(schedule.reload(&api).is_err());
        assert_eq!(schedule.matches().len(), 1);
    }
}
