//! GitHub API access.
//!
//! This module defines the [`PullRequestSource`] trait, the seam between the
//! refresh cycle and the upstream API, and its octocrab-backed
//! implementation. The trait-based design enables mock sources for testing
//! the cycle without a network.

use std::future::Future;

use crate::types::{PrNumber, PullRequest, RepoId, Review};

mod client;
mod error;

pub use client::GitHubClient;
pub use error::FetchError;

/// Read-only access to pull requests and reviews of the upstream API.
///
/// Both operations are full fetches; there is no incremental variant.
/// Implementations must bound each call so an unresponsive upstream cannot
/// hang a refresh cycle.
///
/// # Example (mock for testing)
///
/// ```ignore
/// struct FakeSource {
///     pulls: HashMap<RepoId, Vec<PullRequest>>,
/// }
///
/// impl PullRequestSource for FakeSource {
///     async fn list_open_pulls(&self, repo: &RepoId) -> Result<Vec<PullRequest>, FetchError> {
///         Ok(self.pulls.get(repo).cloned().unwrap_or_default())
///     }
///     // ...
/// }
/// ```
pub trait PullRequestSource {
    /// Lists the open pull requests of one repository.
    fn list_open_pulls(
        &self,
        repo: &RepoId,
    ) -> impl Future<Output = Result<Vec<PullRequest>, FetchError>> + Send;

    /// Lists the reviews of one pull request, in upstream order.
    fn list_reviews(
        &self,
        repo: &RepoId,
        number: PrNumber,
    ) -> impl Future<Output = Result<Vec<Review>, FetchError>> + Send;
}
