//! Timer-driven refresh task.
//!
//! A single tokio task owns the refresh schedule. Cycles run inline in the
//! task's loop, so two cycles can never be in flight at once; a tick that
//! lands while a cycle is still running is delayed rather than queued
//! ([`MissedTickBehavior::Delay`]), which skips the overlapping trigger.
//! The first tick fires immediately, so the initial empty snapshot is
//! replaced as soon as the first cycle completes.
//!
//! The loop itself never exits on a cycle error; only cancellation stops it.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::SnapshotCache;
use crate::github::PullRequestSource;
use crate::types::RepoId;

use super::cycle::refresh_once;

/// Configuration for the refresh task.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// The repositories to aggregate, in snapshot insertion order.
    pub repositories: Vec<RepoId>,

    /// Author logins filtered out of every snapshot.
    pub bot_logins: Vec<String>,

    /// Interval between cycle starts.
    pub interval: Duration,
}

/// Runs refresh cycles on the configured interval until cancelled.
pub async fn run_refresh_loop<S: PullRequestSource>(
    source: S,
    config: RefreshConfig,
    cache: SnapshotCache,
    shutdown: CancellationToken,
) {
    info!(
        repositories = config.repositories.len(),
        interval_secs = config.interval.as_secs(),
        "refresh loop started"
    );

    let mut ticker = tokio::time::interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("shutdown signal received, stopping refresh loop");
                break;
            }

            _ = ticker.tick() => {
                debug!("starting refresh cycle");
                refresh_once(&source, &config.repositories, &config.bot_logins, &cache).await;
            }
        }
    }

    info!("refresh loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::FetchError;
    use crate::types::{PrNumber, PullRequest, Review};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts cycles; every repository fetch succeeds with no pulls.
    #[derive(Clone, Default)]
    struct CountingSource {
        cycles: Arc<AtomicUsize>,
    }

    impl PullRequestSource for CountingSource {
        async fn list_open_pulls(&self, _repo: &RepoId) -> Result<Vec<PullRequest>, FetchError> {
            self.cycles.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn list_reviews(
            &self,
            _repo: &RepoId,
            _number: PrNumber,
        ) -> Result<Vec<Review>, FetchError> {
            Ok(Vec::new())
        }
    }

    fn config() -> RefreshConfig {
        RefreshConfig {
            repositories: vec![RepoId::new("octocat", "hello-world")],
            bot_logins: Vec::new(),
            interval: Duration::from_secs(60),
        }
    }

    /// Lets the spawned loop run until it parks on its next tick.
    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn first_cycle_runs_immediately() {
        let source = CountingSource::default();
        let cycles = source.cycles.clone();
        let shutdown = CancellationToken::new();

        let task = tokio::spawn(run_refresh_loop(
            source,
            config(),
            SnapshotCache::new(),
            shutdown.clone(),
        ));

        // Without advancing the clock: only the immediate first tick fires.
        settle().await;
        assert_eq!(cycles.load(Ordering::SeqCst), 1);

        shutdown.cancel();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn cycles_fire_once_per_interval() {
        let source = CountingSource::default();
        let cycles = source.cycles.clone();
        let shutdown = CancellationToken::new();

        let task = tokio::spawn(run_refresh_loop(
            source,
            config(),
            SnapshotCache::new(),
            shutdown.clone(),
        ));

        settle().await;
        tokio::time::advance(Duration::from_secs(60)).await;
        settle().await;
        tokio::time::advance(Duration::from_secs(60)).await;
        settle().await;

        assert_eq!(cycles.load(Ordering::SeqCst), 3);

        shutdown.cancel();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_stops_the_loop() {
        let source = CountingSource::default();
        let cycles = source.cycles.clone();
        let shutdown = CancellationToken::new();

        let task = tokio::spawn(run_refresh_loop(
            source,
            config(),
            SnapshotCache::new(),
            shutdown.clone(),
        ));

        settle().await;
        shutdown.cancel();
        task.await.unwrap();

        let after_shutdown = cycles.load(Ordering::SeqCst);
        tokio::time::advance(Duration::from_secs(300)).await;
        settle().await;
        assert_eq!(cycles.load(Ordering::SeqCst), after_shutdown);
    }
}
