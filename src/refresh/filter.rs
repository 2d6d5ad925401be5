//! Pull request filtering.

use crate::types::PullRequest;

/// Keeps only the pull requests worth reviewing: open ones not authored by
/// an automation bot.
///
/// Pure function; preserves input order. An empty input yields an empty
/// output.
pub fn retain_reviewable(pulls: Vec<PullRequest>, bot_logins: &[String]) -> Vec<PullRequest> {
    pulls
        .into_iter()
        .filter(|pull| pull.state.is_open() && !bot_logins.iter().any(|bot| *bot == pull.author))
        .collect()
}
