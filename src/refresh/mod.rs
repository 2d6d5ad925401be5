//! The refresh pipeline.
//!
//! A refresh cycle rebuilds the published snapshot from scratch:
//!
//! 1. For each configured repository, fetch its open pull requests
//!    ([`filter`] removes closed and bot-authored entries).
//! 2. For each surviving pull request, fetch its reviews and pick the
//!    representative one ([`select`]).
//! 3. Union the per-repository results and order them ([`aggregate`]).
//! 4. Serialize and publish into the shared cache ([`cycle`]).
//!
//! Errors are local to their unit of work: a failing repository or pull
//! request is skipped for the cycle and everything else proceeds. A cycle
//! that fails to serialize publishes nothing, leaving the previous snapshot
//! live.
//!
//! [`task`] drives cycles on a fixed interval from a single tokio task, so
//! cycles are strictly sequential and can never overlap.

mod aggregate;
mod cycle;
mod filter;
mod select;
mod task;

pub use aggregate::aggregate;
pub use cycle::{encode_snapshot, refresh_once, run_cycle};
pub use filter::retain_reviewable;
pub use select::select_review;
pub use task::{RefreshConfig, run_refresh_loop};
