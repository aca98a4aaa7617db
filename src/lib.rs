//! Paginated, filterable JSON views of a delimited price list.
//!
//! The [`data`] layer does the work (load, filter, window); [`api`] wraps one
//! load-then-select cycle per call and [`server`] exposes it over HTTP.

pub mod api;
pub mod config;
pub mod data;
pub mod request_log;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use server::{app_router, run_server};
