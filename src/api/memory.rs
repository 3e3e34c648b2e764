//! In-memory transport used by the unit tests

use super::Transport;
use crate::error::{Result, TournamentError};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Canned responses per path.
///
/// Each path holds a queue of bodies: a GET pops the front while more than
/// one is queued and keeps serving the last one after that, so a test can
/// script "before" and "after" states for a reload.
#[derive(Default)]
pub struct MemoryTransport {
    bodies: Mutex<HashMap<String, VecDeque<String>>>,
    failures: Mutex<HashMap<String, u16>>,
    gets: Mutex<Vec<String>>,
    posts: Mutex<Vec<(String, String)>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a body for GET requests to `path`
    pub fn respond(self, path: &str, body: &str) -> Self {
        self.bodies
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(body.to_string());
        self
    }

    /// Answer every request to `path` with a non-success status
    pub fn fail(self, path: &str, status: u16) -> Self {
        self.failures.lock().unwrap().insert(path.to_string(), status);
        self
    }

    pub fn get_count(&self, path: &str) -> usize {
        self.gets.lock().unwrap().iter().filter(|p| *p == path).count()
    }

    pub fn posts(&self) -> Vec<(String, String)> {
        self.posts.lock().unwrap().clone()
    }

    fn check_failure(&self, path: &str) -> Result<()> {
        match self.failures.lock().unwrap().get(path) {
            Some(&status) => Err(TournamentError::Status {
                path: path.to_string(),
                status,
            }),
            None => Ok(()),
        }
    }
}

impl Transport for MemoryTransport {
    fn get(&self, path: &str) -> Result<String> {
        self.gets.lock().unwrap().push(path.to_string());
        self.check_failure(path)?;

        let mut bodies = self.bodies.lock().unwrap();
        let queue = bodies.get_mut(path).ok_or_else(|| TournamentError::Status {
            path: path.to_string(),
            status: 404,
        })?;
        let body = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        body.ok_or_else(|| TournamentError::Status {
            path: path.to_string(),
            status: 404,
        })
    }

    fn post(&self, path: &str, body: String) -> Result<()> {
        self.check_failure(path)?;
        self.posts.lock().unwrap().push((path.to_string(), body));
        Ok(())
    }
}
