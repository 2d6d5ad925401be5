//! Startup configuration.
//!
//! Everything the process needs is resolved here once, at startup: the
//! GitHub credential and listen port from the environment, and the
//! compiled-in repository and bot-login tables. The resulting [`Config`] is
//! passed explicitly to the refresh task and the server; nothing reads the
//! environment after startup.

use std::time::Duration;

use thiserror::Error;

use crate::types::{InvalidRepoId, RepoId};

/// The repositories aggregated into every snapshot.
///
/// The set is fixed at startup and never discovered dynamically.
const REPOSITORIES: &[&str] = &[
    "RedHatInsights/patchman-ui",
    "RedHatInsights/vulnerability-ui",
    "RedHatInsights/insights-dashboard",
    "RedHatInsights/insights-inventory-frontend",
    "RedHatInsights/compliance-frontend",
    "RedHatInsights/insights-advisor-frontend",
    "RedHatInsights/vuln4shift-frontend",
    "RedHatInsights/insights-remediations-frontend",
    "RedHatInsights/frontend-components",
    "RedHatInsights/ocp-advisor-frontend",
    "RedHatInsights/drift-frontend",
    "RedHatInsights/malware-detection-frontend",
    "RedHatInsights/tasks-frontend",
];

/// Author logins whose pull requests never appear in a snapshot.
const BOT_LOGINS: &[&str] = &["dependabot[bot]"];

/// Default listen port when `PORT` is unset.
const DEFAULT_PORT: u16 = 8080;

/// Default refresh interval (10 minutes) when
/// `REVIEW_RADAR_REFRESH_INTERVAL_MINS` is unset.
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 600;

/// Errors that make the configuration unusable. All of these are fatal at
/// startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The GitHub credential is missing.
    #[error("missing GitHub credential: set the TOKEN environment variable")]
    MissingToken,

    /// `PORT` is set but not a valid port number.
    #[error("invalid PORT value {0:?}")]
    InvalidPort(String),

    /// A compiled-in repository entry is malformed.
    #[error(transparent)]
    InvalidRepository(#[from] InvalidRepoId),
}

/// Resolved process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer credential for the upstream API.
    pub token: String,

    /// Port the HTTP server listens on.
    pub port: u16,

    /// Interval between refresh cycles.
    pub refresh_interval: Duration,

    /// The repositories to aggregate, in snapshot insertion order.
    pub repositories: Vec<RepoId>,

    /// Author logins filtered out of every snapshot.
    pub bot_logins: Vec<String>,
}

impl Config {
    /// Builds the configuration from the environment and the compiled-in
    /// tables.
    ///
    /// Reads `TOKEN` (required), `PORT` (optional), and
    /// `REVIEW_RADAR_REFRESH_INTERVAL_MINS` (optional).
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = std::env::var("TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let refresh_interval = std::env::var("REVIEW_RADAR_REFRESH_INTERVAL_MINS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(|mins| Duration::from_secs(mins * 60))
            .unwrap_or(Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS));

        Ok(Config {
            token,
            port,
            refresh_interval,
            repositories: compiled_repositories()?,
            bot_logins: BOT_LOGINS.iter().map(|login| login.to_string()).collect(),
        })
    }
}

/// Parses the compiled-in repository table.
fn compiled_repositories() -> Result<Vec<RepoId>, InvalidRepoId> {
    REPOSITORIES.iter().map(|name| RepoId::parse(name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_repositories_all_parse() {
        let repos = compiled_repositories().unwrap();
        assert_eq!(repos.len(), REPOSITORIES.len());
        assert_eq!(repos[0], RepoId::new("RedHatInsights", "patchman-ui"));
    }

    #[test]
    fn bot_logins_include_dependabot() {
        assert!(BOT_LOGINS.contains(&"dependabot[bot]"));
    }
}
