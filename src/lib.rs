pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod router;
pub mod schemas;

pub use api::{ApiClient, HistoryPage};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, ErrorKind};
pub use router::{RouteRecord, Router, View};
