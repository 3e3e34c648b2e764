pub mod api;
pub mod error;
pub mod export;
pub mod model;
pub mod schedule;
pub mod teams;
pub mod view;

pub use api::{ApiClient, ClientConfig, HttpTransport, Transport};
pub use error::{Result, TournamentError};
pub use model::*;
pub use schedule::Schedule;
pub use teams::Roster;
pub use view::ViewContext;
