//! Blocking HTTP transport for the tournament backend

use super::Transport;
use crate::error::{Result, TournamentError};
use log::debug;
use std::time::Duration;
use url::Url;

/// Where the backend lives and how long to wait for it
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub const DEFAULT_URL: &'static str = "http://127.0.0.1:5000";

    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_URL)
    }
}

/// JSON over HTTP with a shared connection pool
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base: Url,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut base = Url::parse(&config.base_url)
            .map_err(|e| TournamentError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        // Keep any path prefix when joining endpoint paths onto it
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("chess-tournament/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TournamentError::Http {
                path: config.base_url.clone(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client, base })
    }

    /// Resolve an endpoint path such as `/api/matches` against the base URL
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| TournamentError::InvalidUrl(format!("{}: {}", path, e)))
    }

    fn check_status(path: &str, response: &reqwest::blocking::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(TournamentError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            })
        }
    }
}

fn request_failed(path: &str, e: reqwest::Error) -> TournamentError {
    TournamentError::Http {
        path: path.to_string(),
        message: e.to_string(),
    }
}

impl Transport for HttpTransport {
    fn get(&self, path: &str) -> Result<String> {
        let url = self.endpoint(path)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|e| request_failed(path, e))?;

        Self::check_status(path, &response)?;
        response.text().map_err(|e| request_failed(path, e))
    }

    fn post(&self, path: &str, body: String) -> Result<()> {
        let url = self.endpoint(path)?;
        debug!("POST {} {}", url, body);

        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|e| request_failed(path, e))?;

        Self::check_status(path, &response)
    }
}
