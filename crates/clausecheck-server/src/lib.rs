//! HTTP surface and process bootstrap for clausecheck.

pub mod api;
pub mod config;

pub use api::{AppState, RouterOptions, router};
pub use config::{Config, StoreBackend};
