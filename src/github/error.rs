//! GitHub API error types.
//!
//! Fetch errors are local to their unit of work: the refresh cycle logs
//! them and skips the affected repository or pull request, so there is no
//! retry taxonomy here - only what the logs need.

use std::time::Duration;

use thiserror::Error;

/// An upstream fetch failure.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The GitHub API call failed.
    #[error("GitHub API request failed: {0}")]
    Api(#[from] octocrab::Error),

    /// The call did not complete within the configured bound.
    #[error("GitHub API request timed out after {0:?}")]
    Timeout(Duration),
}
