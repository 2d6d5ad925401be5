//! Pull request and review types.
//!
//! These types are immutable snapshots of upstream state at fetch time.
//! Nothing here is persisted between refresh cycles; a cycle rebuilds the
//! whole data set from scratch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::PrNumber;

/// The state of a pull request as reported by the upstream API.
///
/// The list endpoint reports merged pull requests as `Closed`; the
/// distinction does not matter here because only open pull requests survive
/// filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PullState {
    /// The PR is open.
    Open,

    /// The PR was closed (with or without merging).
    Closed,
}

impl PullState {
    /// Returns true if the PR is open.
    pub fn is_open(&self) -> bool {
        matches!(self, PullState::Open)
    }
}

/// The verdict carried by a single review.
///
/// This mirrors GitHub's review `state` field. Only the first three
/// variants participate in review selection; `Dismissed` and `Pending`
/// exist on the wire and are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewState {
    /// The reviewer approved the changes.
    Approved,

    /// The reviewer requested changes.
    ChangesRequested,

    /// The reviewer left comments without a verdict.
    Commented,

    /// A previously submitted review was dismissed.
    Dismissed,

    /// The review has been started but not submitted.
    Pending,
}

impl ReviewState {
    /// Returns true if this state represents a decision (approval or a
    /// request for changes) rather than commentary.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReviewState::Approved | ReviewState::ChangesRequested)
    }

    /// Returns true if this state is an informational comment.
    pub fn is_comment(&self) -> bool {
        matches!(self, ReviewState::Commented)
    }
}

/// A single review submitted against a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Login of the reviewer.
    pub reviewer: String,

    /// The verdict carried by this review.
    pub state: ReviewState,

    /// When the review was submitted. Pending reviews have no timestamp.
    pub submitted_at: Option<DateTime<Utc>>,
}

/// The outcome of review selection for one pull request.
///
/// Selection always produces a well-defined value: either the chosen review
/// or an explicit marker that no significant review exists. Serialization
/// therefore never emits a bare null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReviewSelection {
    /// The review picked by the precedence rule.
    Review {
        /// The selected review.
        review: Review,
    },

    /// No approved, changes-requested, or commented review exists.
    NoSignificantReview,
}

impl ReviewSelection {
    /// Wraps a review chosen by the selection rule.
    pub fn review(review: Review) -> Self {
        ReviewSelection::Review { review }
    }

    /// Returns the selected review, if any.
    pub fn selected(&self) -> Option<&Review> {
        match self {
            ReviewSelection::Review { review } => Some(review),
            ReviewSelection::NoSignificantReview => None,
        }
    }

    /// Returns true if a review was selected.
    pub fn is_significant(&self) -> bool {
        matches!(self, ReviewSelection::Review { .. })
    }
}

/// Snapshot of one pull request as fetched from the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// The PR number within its repository.
    pub number: PrNumber,

    /// The PR title.
    pub title: String,

    /// Login of the PR author.
    pub author: String,

    /// Whether the PR is open or closed.
    pub state: PullState,

    /// Whether the PR is a draft.
    pub draft: bool,

    /// Names of the labels attached to the PR.
    pub labels: Vec<String>,

    /// The name of the PR's head branch (e.g., "feature-branch").
    pub head_ref: String,

    /// The branch the PR targets (e.g., "main").
    pub base_ref: String,

    /// When the PR was created.
    pub created_at: DateTime<Utc>,

    /// When the PR was last updated. Drives snapshot ordering.
    pub updated_at: DateTime<Utc>,
}

/// A pull request paired with its selected review.
///
/// This is the externally visible unit: the published snapshot is a JSON
/// array of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedPullRequest {
    /// The pull request itself, flattened into the top-level object.
    #[serde(flatten)]
    pub pull: PullRequest,

    /// The representative review, or the explicit no-review marker.
    pub review: ReviewSelection,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_review_state() -> impl Strategy<Value = ReviewState> {
        prop_oneof![
            Just(ReviewState::Approved),
            Just(ReviewState::ChangesRequested),
            Just(ReviewState::Commented),
            Just(ReviewState::Dismissed),
            Just(ReviewState::Pending),
        ]
    }

    mod review_state {
        use super::*;

        #[test]
        fn is_terminal_correct() {
            assert!(ReviewState::Approved.is_terminal());
            assert!(ReviewState::ChangesRequested.is_terminal());
            assert!(!ReviewState::Commented.is_terminal());
            assert!(!ReviewState::Dismissed.is_terminal());
            assert!(!ReviewState::Pending.is_terminal());
        }

        #[test]
        fn is_comment_correct() {
            assert!(!ReviewState::Approved.is_comment());
            assert!(!ReviewState::ChangesRequested.is_comment());
            assert!(ReviewState::Commented.is_comment());
            assert!(!ReviewState::Dismissed.is_comment());
            assert!(!ReviewState::Pending.is_comment());
        }

        proptest! {
            #[test]
            fn serde_roundtrip(state in arb_review_state()) {
                let json = serde_json::to_string(&state).unwrap();
                let parsed: ReviewState = serde_json::from_str(&json).unwrap();
                prop_assert_eq!(state, parsed);
            }
        }

        #[test]
        fn serializes_as_upstream_wire_names() {
            assert_eq!(
                serde_json::to_string(&ReviewState::ChangesRequested).unwrap(),
                "\"CHANGES_REQUESTED\""
            );
            assert_eq!(
                serde_json::to_string(&ReviewState::Approved).unwrap(),
                "\"APPROVED\""
            );
        }
    }

    mod review_selection {
        use super::*;

        fn sample_review() -> Review {
            Review {
                reviewer: "octocat".to_string(),
                state: ReviewState::Approved,
                submitted_at: None,
            }
        }

        #[test]
        fn selected_returns_the_review() {
            let selection = ReviewSelection::review(sample_review());
            assert!(selection.is_significant());
            assert_eq!(selection.selected(), Some(&sample_review()));
        }

        #[test]
        fn marker_has_no_review() {
            let selection = ReviewSelection::NoSignificantReview;
            assert!(!selection.is_significant());
            assert_eq!(selection.selected(), None);
        }

        #[test]
        fn marker_serializes_as_tagged_object() {
            let json = serde_json::to_value(&ReviewSelection::NoSignificantReview).unwrap();
            assert_eq!(json, serde_json::json!({ "kind": "no_significant_review" }));
        }

        #[test]
        fn selected_review_serializes_with_kind_tag() {
            let json = serde_json::to_value(ReviewSelection::review(sample_review())).unwrap();
            assert_eq!(json["kind"], "review");
            assert_eq!(json["review"]["reviewer"], "octocat");
            assert_eq!(json["review"]["state"], "APPROVED");
        }
    }

    mod annotated_pull_request {
        use super::*;
        use chrono::TimeZone;

        #[test]
        fn pull_fields_flatten_into_top_level() {
            let annotated = AnnotatedPullRequest {
                pull: PullRequest {
                    number: PrNumber(12),
                    title: "Fix parser".to_string(),
                    author: "octocat".to_string(),
                    state: PullState::Open,
                    draft: false,
                    labels: vec!["bug".to_string()],
                    head_ref: "fix-parser".to_string(),
                    base_ref: "main".to_string(),
                    created_at: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
                    updated_at: Utc.with_ymd_and_hms(2024, 1, 16, 9, 30, 0).unwrap(),
                },
                review: ReviewSelection::NoSignificantReview,
            };

            let json = serde_json::to_value(&annotated).unwrap();
            assert_eq!(json["number"], 12);
            assert_eq!(json["title"], "Fix parser");
            assert_eq!(json["state"], "open");
            assert_eq!(json["review"]["kind"], "no_significant_review");
            assert!(json.get("pull").is_none());
        }
    }
}
