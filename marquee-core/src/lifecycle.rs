// Generation counters guarding late async results

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Per-component request generation.
///
/// Every request takes a [`Ticket`]. Starting a newer request or unmounting the
/// component bumps the generation, so results carried by older tickets are dropped
/// instead of being applied to a view that no longer shows them.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    current: Arc<AtomicU64>,
}

#[derive(Debug, Clone)]
pub struct Ticket {
    issued: u64,
    current: Arc<AtomicU64>,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Ticket {
        let issued = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            issued,
            current: Arc::clone(&self.current),
        }
    }

    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.issued
    }

    /// Run `apply` with `value` only if no newer request or unmount happened since `begin`.
    pub fn apply<T, R>(&self, value: T, apply: impl FnOnce(T) -> R) -> Option<R> {
        if self.is_current() {
            Some(apply(value))
        } else {
            tracing::debug!(ticket = self.issued, "Discarding stale result");
            None
        }
    }
}
