use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// Single-slot cache of the most recently published board output.
///
/// `store` swaps in a whole new buffer under the write lock; readers clone the `Arc` under the
/// read lock and keep using it after a later swap. The readiness flag is set by the first
/// `store` and never cleared.
#[derive(Debug, Default)]
pub struct ReadySwap {
    current: RwLock<Option<Arc<[u8]>>>,
    ready: AtomicBool,
}

impl ReadySwap {
    /// Create an empty, not-ready slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `bytes` as the current output and mark the slot ready.
    pub fn store(&self, bytes: impl Into<Arc<[u8]>>) {
        let bytes = bytes.into();
        {
            let mut guard = self.current.write().unwrap_or_else(|p| p.into_inner());
            *guard = Some(bytes);
        }
        self.ready.store(true, Ordering::Release);
    }

    /// Snapshot of the current output, `None` before the first successful `store`.
    pub fn load(&self) -> Option<Arc<[u8]>> {
        self.current
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    /// Return `true` once any output has been published.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/ready.rs"]
mod tests;
