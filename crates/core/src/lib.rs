//! Core types, CSV loading, and feature engineering for the channel dashboard.

pub mod config;
pub mod error;
pub mod features;
pub mod loader;
pub mod parse;
pub mod schema;

pub use config::*;
pub use error::{Error, Result};
pub use loader::load_dataset;
pub use schema::*;
