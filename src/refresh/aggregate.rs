//! Cross-repository aggregation.

use crate::types::AnnotatedPullRequest;

/// Unions the per-repository results into one sequence ordered by last
/// update, most recent first.
///
/// The sort is stable: entries with identical `updated_at` keep their
/// relative insertion order (repository configuration order, then
/// within-repository fetch order). No deduplication is performed.
pub fn aggregate(per_repo: Vec<Vec<AnnotatedPullRequest>>) -> Vec<AnnotatedPullRequest> {
    let mut all: Vec<AnnotatedPullRequest> = per_repo.into_iter().flatten().collect();
    all.sort_by(|a, b| b.pull.updated_at.cmp(&a.pull.updated_at));
    all
}
