use thiserror::Error;

#[derive(Error, Debug)]
pub enum TournamentError {
    #[error("Request to {path} failed: {message}")]
    Http { path: String, message: String },

    #[error("{path} returned HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("Malformed response from {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid board: {0} (expected 1-4)")]
    InvalidBoard(u8),

    #[error("Invalid result code: {0} (expected A, B or D)")]
    InvalidResultCode(String),

    #[error("Invalid date/time: {0} (expected YYYY-MM-DDTHH:MM)")]
    InvalidDateTime(String),

    #[error("Name must not be empty")]
    InvalidName,

    #[error("Player {0} not found in the loaded teams")]
    PlayerNotFound(u32),

    #[error("Admin mode is off - pass --admin to make changes")]
    AdminRequired,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),
}

impl TournamentError {
    /// True when the server answered, but with a non-success status
    pub fn is_status(&self) -> bool {
        matches!(self, TournamentError::Status { .. })
    }
}

pub type Result<T> = std::result::Result<T, TournamentError>;
