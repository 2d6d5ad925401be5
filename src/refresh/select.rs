//! Review selection.
//!
//! Out of the reviews submitted against one pull request, exactly one is
//! surfaced in the snapshot. Approved and ChangesRequested are terminal
//! decisions, so the first one encountered wins and scanning stops there;
//! Commented is informational, so when no terminal decision exists the most
//! recent comment in input order is the most relevant. The scan order is the
//! upstream response order, not the submission timestamps.

use crate::types::{Review, ReviewSelection};

/// Picks the representative review from an upstream-ordered sequence.
///
/// Precedence:
/// 1. The first Approved or ChangesRequested review, scanning in input
///    order; the scan short-circuits there.
/// 2. Otherwise the last Commented review of a full scan.
/// 3. Otherwise [`ReviewSelection::NoSignificantReview`].
pub fn select_review(reviews: &[Review]) -> ReviewSelection {
    let mut last_comment = None;

    for review in reviews {
        if review.state.is_terminal() {
            return ReviewSelection::review(review.clone());
        }
        if review.state.is_comment() {
            last_comment = Some(review);
        }
    }

    match last_comment {
        Some(comment) => ReviewSelection::review(comment.clone()),
        None => ReviewSelection::NoSignificantReview,
    }
}
