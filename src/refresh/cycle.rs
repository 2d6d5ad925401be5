//! One refresh cycle: fetch, filter, select, aggregate, publish.
//!
//! Failure policy: errors are local to their unit of work. A repository
//! whose pull request list cannot be fetched is skipped for the cycle; a
//! pull request whose reviews cannot be fetched is skipped for the cycle;
//! everything else proceeds. A snapshot that fails to serialize is
//! discarded without publishing, so the previously published snapshot
//! stays live.

use bytes::Bytes;
use tracing::{error, info, warn};

use crate::cache::SnapshotCache;
use crate::github::PullRequestSource;
use crate::types::{AnnotatedPullRequest, RepoId};

use super::aggregate::aggregate;
use super::filter::retain_reviewable;
use super::select::select_review;

/// Runs one full cycle against the source and returns the aggregated,
/// ordered result.
///
/// Repositories are visited sequentially in configuration order; each
/// repository's results are accumulated separately before aggregation, so
/// one repository's pull requests can never be attributed to another.
pub async fn run_cycle<S: PullRequestSource>(
    source: &S,
    repositories: &[RepoId],
    bot_logins: &[String],
) -> Vec<AnnotatedPullRequest> {
    let mut per_repo = Vec::with_capacity(repositories.len());

    for repo in repositories {
        let pulls = match source.list_open_pulls(repo).await {
            Ok(pulls) => retain_reviewable(pulls, bot_logins),
            Err(e) => {
                warn!(repo = %repo, error = %e, "skipping repository for this cycle");
                continue;
            }
        };

        let mut annotated = Vec::with_capacity(pulls.len());
        for pull in pulls {
            match source.list_reviews(repo, pull.number).await {
                Ok(reviews) => annotated.push(AnnotatedPullRequest {
                    review: select_review(&reviews),
                    pull,
                }),
                Err(e) => {
                    warn!(
                        repo = %repo,
                        pr = %pull.number,
                        error = %e,
                        "skipping pull request for this cycle: review fetch failed"
                    );
                }
            }
        }
        per_repo.push(annotated);
    }

    aggregate(per_repo)
}

/// Serializes the aggregated result into a publishable snapshot document.
pub fn encode_snapshot(pulls: &[AnnotatedPullRequest]) -> Result<Bytes, serde_json::Error> {
    serde_json::to_vec(pulls).map(Bytes::from)
}

/// Runs one cycle and publishes the result.
///
/// On serialization failure nothing is published and the previous snapshot
/// remains authoritative.
pub async fn refresh_once<S: PullRequestSource>(
    source: &S,
    repositories: &[RepoId],
    bot_logins: &[String],
    cache: &SnapshotCache,
) {
    let annotated = run_cycle(source, repositories, bot_logins).await;

    match encode_snapshot(&annotated) {
        Ok(snapshot) => {
            info!(pulls = annotated.len(), bytes = snapshot.len(), "published snapshot");
            cache.publish(snapshot);
        }
        Err(e) => {
            error!(error = %e, "snapshot serialization failed; keeping previous snapshot");
        }
    }
}
