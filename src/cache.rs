//! Shared snapshot cache.
//!
//! The cache is the single mutable resource shared between the refresh task
//! and the request handlers. The refresh task builds a fully-formed snapshot
//! off to the side and publishes it with one swap; readers clone the current
//! `Bytes` handle (a refcount bump) and never observe a partial write.
//!
//! The lock is held only for the swap or the clone, never across I/O, so a
//! slow refresh cannot block reads and reads cannot block each other in any
//! observable way.

use std::sync::{Arc, PoisonError, RwLock};

use bytes::Bytes;

/// The snapshot served before the first refresh cycle completes: an empty
/// JSON array.
pub const EMPTY_SNAPSHOT: &[u8] = b"[]";

/// A process-wide slot holding the currently published snapshot.
///
/// Cloning the cache clones the handle; all clones share the same slot.
#[derive(Clone)]
pub struct SnapshotCache {
    slot: Arc<RwLock<Bytes>>,
}

impl SnapshotCache {
    /// Creates a cache holding the initial empty snapshot.
    pub fn new() -> Self {
        SnapshotCache {
            slot: Arc::new(RwLock::new(Bytes::from_static(EMPTY_SNAPSHOT))),
        }
    }

    /// Atomically replaces the published snapshot.
    pub fn publish(&self, snapshot: Bytes) {
        let mut guard = self
            .slot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = snapshot;
    }

    /// Returns the currently published snapshot.
    pub fn load(&self) -> Bytes {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SnapshotCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotCache")
            .field("len", &self.load().len())
            .finish()
    }
}
