/*!
 * Timer Control
 * Macrotask-drained timeout and interval callbacks
 */

use dashmap::DashMap;
use log::warn;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Identifier handed back by `set_timeout`/`set_interval`
pub type TimerId = u64;

/// Callback fired when a timer becomes due
pub type TimerCallback = Arc<dyn Fn() + Send + Sync>;

struct TimerEntry {
    deadline: Instant,
    period: Option<Duration>,
    callback: TimerCallback,
}

/// Timer registry drained by the host's event loop
///
/// Callbacks are invoked from the host's task-draining hook, never from the
/// scheduling call itself.
pub struct TimerController {
    timers: DashMap<TimerId, TimerEntry>,
    next_id: AtomicU64,
}

impl std::fmt::Debug for TimerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerController")
            .field("pending", &self.timers.len())
            .finish_non_exhaustive()
    }
}

impl TimerController {
    pub fn new() -> Self {
        Self {
            timers: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Schedule a one-shot callback
    pub fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> TimerId {
        self.schedule(delay, None, callback)
    }

    /// Schedule a repeating callback
    pub fn set_interval(&self, period: Duration, callback: TimerCallback) -> TimerId {
        self.schedule(period, Some(period), callback)
    }

    /// Cancel a pending timeout
    pub fn clear_timeout(&self, id: TimerId) -> bool {
        self.clear(id)
    }

    /// Cancel a repeating callback
    pub fn clear_interval(&self, id: TimerId) -> bool {
        self.clear(id)
    }

    /// Fire every due callback; invoked by the host's task-draining hook
    ///
    /// Returns the number of callbacks fired.
    pub fn handle_timer_macrotask(&self) -> usize {
        let now = Instant::now();
        let due: Vec<TimerId> = self
            .timers
            .iter()
            .filter(|entry| entry.deadline <= now)
            .map(|entry| *entry.key())
            .collect();

        let mut fired = 0;
        for id in due {
            let (callback, repeating) = match self.timers.get_mut(&id) {
                Some(mut entry) => {
                    let callback = Arc::clone(&entry.callback);
                    if let Some(period) = entry.period {
                        entry.deadline = now + period;
                    }
                    (callback, entry.period.is_some())
                }
                // Cleared by an earlier callback in this drain.
                None => continue,
            };
            if !repeating {
                self.timers.remove(&id);
            }
            callback();
            fired += 1;
        }
        fired
    }

    /// Number of scheduled timers
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    fn schedule(
        &self,
        delay: Duration,
        period: Option<Duration>,
        callback: TimerCallback,
    ) -> TimerId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.timers.insert(
            id,
            TimerEntry {
                deadline: Instant::now() + delay,
                period,
                callback,
            },
        );
        id
    }

    fn clear(&self, id: TimerId) -> bool {
        let removed = self.timers.remove(&id).is_some();
        if !removed {
            warn!("Clear of unknown timer {} ignored", id);
        }
        removed
    }
}

impl Default for TimerController {
    fn default() -> Self {
        Self::new()
    }
}
