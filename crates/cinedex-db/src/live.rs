//! Live query subscriptions over `tokio::sync::watch`.

use std::fmt;

use tokio::sync::watch;

/// A live snapshot stream over one cache query.
///
/// Holds the query's latest result and wakes whenever a write to the
/// underlying table re-evaluates it. Snapshots arrive in write order; a
/// slow observer sees writes coalesced into the newest snapshot.
#[derive(Debug)]
pub struct LiveQuery<T> {
    receiver: watch::Receiver<T>,
}

impl<T: Clone> LiveQuery<T> {
    pub(crate) fn new(receiver: watch::Receiver<T>) -> Self {
        Self { receiver }
    }

    /// Returns the latest snapshot.
    #[must_use]
    pub fn current(&self) -> T {
        self.receiver.borrow().clone()
    }

    /// Waits for the next re-evaluation and returns the new snapshot.
    ///
    /// Returns `None` once the owning store has been dropped.
    pub async fn next(&mut self) -> Option<T> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Projects every snapshot through `f`, keeping the subscription.
    pub fn map<U, F>(self, f: F) -> MappedLiveQuery<T, U>
    where
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        MappedLiveQuery {
            inner: self,
            f: Box::new(f),
        }
    }
}

/// A [`LiveQuery`] with a projection applied to every snapshot.
pub struct MappedLiveQuery<T, U> {
    inner: LiveQuery<T>,
    f: Box<dyn Fn(T) -> U + Send + Sync>,
}

impl<T: Clone, U> MappedLiveQuery<T, U> {
    /// Returns the latest snapshot, projected.
    #[must_use]
    pub fn current(&self) -> U {
        (self.f)(self.inner.current())
    }

    /// Waits for the next re-evaluation and returns the projected snapshot.
    ///
    /// Returns `None` once the owning store has been dropped.
    pub async fn next(&mut self) -> Option<U> {
        self.inner.next().await.map(&self.f)
    }
}

impl<T: fmt::Debug, U> fmt::Debug for MappedLiveQuery<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappedLiveQuery")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}
