//! Debounced apply for the free-text deck editor.
//!
//! Each draft waits for a quiet period before it replaces the deck. A newer
//! draft supersedes any draft still waiting, so only the last text typed in a
//! burst is ever parsed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cardsheet_core::EditorSession;
use tokio::sync::Mutex;

pub struct DraftApplier {
    delay: Duration,
    latest: Arc<AtomicU64>,
}

impl DraftApplier {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Quiet period in whole milliseconds, saturating at `u64::MAX`.
    pub fn delay_ms(&self) -> u64 {
        u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX)
    }

    /// Schedule `text` to be applied after the quiet period.
    ///
    /// Returns the draft's generation number.
    pub fn schedule(&self, session: Arc<Mutex<EditorSession>>, text: String) -> u64 {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = Arc::clone(&self.latest);
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if latest.load(Ordering::SeqCst) != generation {
                return;
            }

            let mut session = session.lock().await;
            // A newer draft may have arrived while waiting for the lock.
            if latest.load(Ordering::SeqCst) != generation {
                return;
            }
            match session.apply_text(&text) {
                Ok(count) => tracing::info!("Applied draft {} with {} cards", generation, count),
                Err(e) => tracing::warn!("Draft {} not applied: {}", generation, e),
            }
        });

        generation
    }

    /// Drop any draft still waiting to be applied.
    pub fn cancel(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}
