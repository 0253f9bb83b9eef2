pub mod api;
pub mod config;
pub mod error;
pub mod feeds;
pub mod jobs;
pub mod notify;
pub mod telemetry;
