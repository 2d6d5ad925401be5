//! Octocrab-backed implementation of [`PullRequestSource`].
//!
//! One client serves every configured repository; operations take the
//! target [`RepoId`] explicitly. Upstream models are mapped into the domain
//! types at the edge so nothing octocrab-specific leaks into the refresh
//! cycle.

use std::future::Future;
use std::time::Duration;

use octocrab::Octocrab;
use octocrab::models::IssueState;
use octocrab::models::pulls;

use crate::types::{PrNumber, PullRequest, PullState, RepoId, Review, ReviewState};

use super::error::FetchError;
use super::PullRequestSource;

/// Pulls and reviews are fetched in pages of this size.
const PAGE_SIZE: u8 = 100;

/// Default bound on a single API call.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A GitHub API client for the configured repositories.
#[derive(Clone)]
pub struct GitHubClient {
    /// The underlying octocrab client.
    client: Octocrab,

    /// Bound applied to every outbound call.
    request_timeout: Duration,
}

impl GitHubClient {
    /// Creates a client authenticated with a personal access token.
    pub fn from_token(token: impl Into<String>) -> Result<Self, octocrab::Error> {
        let client = Octocrab::builder().personal_token(token.into()).build()?;
        Ok(Self::new(client))
    }

    /// Creates a client from a pre-configured Octocrab instance.
    pub fn new(client: Octocrab) -> Self {
        GitHubClient {
            client,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Overrides the per-call timeout.
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Runs one API call under the configured time bound.
    async fn bounded<T, F>(&self, call: F) -> Result<T, FetchError>
    where
        F: Future<Output = Result<T, octocrab::Error>>,
    {
        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(result) => result.map_err(FetchError::Api),
            Err(_) => Err(FetchError::Timeout(self.request_timeout)),
        }
    }
}

impl PullRequestSource for GitHubClient {
    async fn list_open_pulls(&self, repo: &RepoId) -> Result<Vec<PullRequest>, FetchError> {
        let mut page = 1u32;
        let mut all_pulls = Vec::new();

        loop {
            let page_result = self
                .bounded(
                    self.client
                        .pulls(&repo.owner, &repo.repo)
                        .list()
                        .state(octocrab::params::State::Open)
                        .per_page(PAGE_SIZE)
                        .page(page)
                        .send(),
                )
                .await?;

            let items = page_result.items;
            let is_last_page = items.len() < usize::from(PAGE_SIZE);

            all_pulls.extend(items.into_iter().map(map_pull));

            if is_last_page {
                break;
            }
            page += 1;
        }

        Ok(all_pulls)
    }

    async fn list_reviews(
        &self,
        repo: &RepoId,
        number: PrNumber,
    ) -> Result<Vec<Review>, FetchError> {
        let mut page = 1u32;
        let mut all_reviews = Vec::new();

        loop {
            let page_result = self
                .bounded(
                    self.client
                        .pulls(&repo.owner, &repo.repo)
                        .list_reviews(number.0)
                        .per_page(PAGE_SIZE)
                        .page(page)
                        .send(),
                )
                .await?;

            let items = page_result.items;
            let is_last_page = items.len() < usize::from(PAGE_SIZE);

            all_reviews.extend(items.into_iter().map(map_review));

            if is_last_page {
                break;
            }
            page += 1;
        }

        Ok(all_reviews)
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

/// Maps an upstream pull request into the domain snapshot type.
fn map_pull(pull: pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: PrNumber(pull.number),
        title: pull.title.unwrap_or_default(),
        author: pull.user.map(|user| user.login).unwrap_or_default(),
        state: match pull.state {
            Some(IssueState::Open) => PullState::Open,
            _ => PullState::Closed,
        },
        draft: pull.draft.unwrap_or(false),
        labels: pull
            .labels
            .unwrap_or_default()
            .into_iter()
            .map(|label| label.name)
            .collect(),
        head_ref: pull.head.ref_field,
        base_ref: pull.base.ref_field,
        created_at: pull.created_at.unwrap_or(chrono::DateTime::UNIX_EPOCH),
        updated_at: pull.updated_at.unwrap_or(chrono::DateTime::UNIX_EPOCH),
    }
}

/// Maps an upstream review into the domain type.
fn map_review(review: pulls::Review) -> Review {
    Review {
        reviewer: review.user.map(|user| user.login).unwrap_or_default(),
        state: map_review_state(review.state),
        submitted_at: review.submitted_at,
    }
}

/// Maps the upstream review state, which is optional and non-exhaustive.
///
/// States this service has no use for collapse to `Pending`, which the
/// selection rule ignores.
fn map_review_state(state: Option<pulls::ReviewState>) -> ReviewState {
    match state {
        Some(pulls::ReviewState::Approved) => ReviewState::Approved,
        Some(pulls::ReviewState::ChangesRequested) => ReviewState::ChangesRequested,
        Some(pulls::ReviewState::Commented) => ReviewState::Commented,
        Some(pulls::ReviewState::Dismissed) => ReviewState::Dismissed,
        _ => ReviewState::Pending,
    }
}
