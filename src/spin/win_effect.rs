//! Transient "you won" flag raised once a destination is final

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::time;

#[derive(Debug, Default)]
pub struct WinEffect {
    active: AtomicBool,
    generation: AtomicU64,
}

impl WinEffect {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Raise the flag and clear it after `visible_for`. Only the most recent
    /// raise clears the flag; earlier timers are ignored.
    pub fn trigger(self: &Arc<Self>, visible_for: Duration) {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.active.store(true, Ordering::Release);

        let effect = Arc::clone(self);
        tokio::spawn(async move {
            time::sleep(visible_for).await;
            if effect.generation.load(Ordering::Acquire) == generation {
                effect.active.store(false, Ordering::Release);
            }
        });
    }
}
