//! HTTP layer for the channel dashboard: HTML pages, JSON endpoints, and
//! the dataset cache behind them.

pub mod response;
pub mod routes;
pub mod state;
pub mod views;

pub use routes::router;
pub use state::{AppState, DatasetCache};
