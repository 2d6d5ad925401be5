//! Review Radar - a pull request review dashboard backend.
//!
//! This library polls GitHub for the open pull requests of a fixed set of
//! repositories, pairs each pull request with its most relevant review
//! verdict, and publishes the aggregated result as a JSON document served
//! from an in-memory cache.

pub mod cache;
pub mod config;
pub mod github;
pub mod refresh;
pub mod server;
pub mod types;
