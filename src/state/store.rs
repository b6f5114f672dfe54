//! Snapshot container owned by the orchestrator.
//!
//! Readers get an `Arc<DashboardState>` that never changes under them;
//! each event produces a new snapshot that is swapped in atomically.

use arc_swap::ArcSwap;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::config::SnapshotPolicy;
use crate::state::event::StateEvent;
use crate::state::snapshot::DashboardState;

/// Capacity of the change-notification channel. Slow observers see `Lagged`
/// and should re-read the snapshot.
const CHANGE_CAPACITY: usize = 64;

/// Notification that a new snapshot is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub version: u64,
    pub kind: &'static str,
}

/// Holds the current snapshot. Only the orchestrator applies events.
pub struct StateStore {
    current: ArcSwap<DashboardState>,
    changes: broadcast::Sender<StateChange>,
    policy: SnapshotPolicy,
}

impl StateStore {
    pub fn new(policy: SnapshotPolicy) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        Self {
            current: ArcSwap::from_pointee(DashboardState::default()),
            changes,
            policy,
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<DashboardState> {
        self.current.load_full()
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.changes.subscribe()
    }

    pub fn policy(&self) -> SnapshotPolicy {
        self.policy
    }

    /// Apply an event and publish the resulting snapshot.
    pub(crate) fn apply(&self, event: StateEvent) -> Arc<DashboardState> {
        let policy = self.policy;
        let mut applied = None;
        // rcu may rerun the closure if another event lands concurrently.
        self.current.rcu(|current| {
            let mut next = DashboardState::clone(current);
            next.apply(&event, policy);
            let next = Arc::new(next);
            applied = Some(Arc::clone(&next));
            next
        });

        let applied = applied.unwrap_or_else(|| self.current.load_full());
        tracing::trace!(version = applied.version, kind = event.kind(), "State updated");
        // No subscribers is fine.
        let _ = self.changes.send(StateChange {
            version: applied.version,
            kind: event.kind(),
        });
        applied
    }
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore")
            .field("version", &self.current.load().version)
            .field("policy", &self.policy)
            .finish()
    }
}

/// Read-only handle on the dashboard state.
#[derive(Clone, Debug)]
pub struct StateView {
    store: Arc<StateStore>,
}

impl StateView {
    pub(crate) fn new(store: Arc<StateStore>) -> Self {
        Self { store }
    }

    pub fn snapshot(&self) -> Arc<DashboardState> {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.store.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::snapshot::TransactionDraft;

    #[test]
    fn test_snapshots_are_immutable() {
        let store = StateStore::new(SnapshotPolicy::Append);
        let before = store.snapshot();
        store.apply(StateEvent::PendingEdited(TransactionDraft::new("a", "b", "1")));
        assert!(before.pending_transaction.is_empty());
        assert_eq!(store.snapshot().pending_transaction.sender, "a");
        assert_eq!(store.snapshot().version, 1);
    }

    #[tokio::test]
    async fn test_changes_are_published() {
        let store = StateStore::new(SnapshotPolicy::Append);
        let mut rx = store.subscribe();
        store.apply(StateEvent::Failed("boom".into()));
        store.apply(StateEvent::ErrorDismissed);

        assert_eq!(rx.recv().await.unwrap(), StateChange { version: 1, kind: "failed" });
        assert_eq!(rx.recv().await.unwrap(), StateChange { version: 2, kind: "error_dismissed" });
        assert!(store.snapshot().last_error.is_none());
    }
}
