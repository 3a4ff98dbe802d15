//! Cancellable timers keyed by round generation
//!
//! The game runs on one thread and expresses every delayed effect as an entry in
//! a [`TimerQueue`]. Each entry remembers the round generation that scheduled
//! it, so the owner can tell a stale timer from a live one before acting on it.

use std::time::Duration;
use tracing::trace;

/// Monotonic round counter. Bumped every time a new round starts.
pub type Generation = u64;

/// Handle returned when scheduling, used to cancel a single timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// A timer that came due
#[derive(Debug, Clone, PartialEq)]
pub struct FiredTimer<T> {
    /// Handle it was scheduled under
    pub handle: TimerHandle,
    /// Clock value it was due at
    pub due: Duration,
    /// Round generation that scheduled it
    pub generation: Generation,
    /// What to do
    pub payload: T,
}

#[derive(Debug, Clone)]
struct Entry<T> {
    handle: TimerHandle,
    due: Duration,
    generation: Generation,
    payload: T,
}

/// Pending timers ordered by due time, insertion order on ties
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule `payload` to fire once the clock reaches `due`
    pub fn schedule(&mut self, due: Duration, generation: Generation, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;

        // Keep sorted by (due, handle); handles grow, so equal dues stay FIFO
        let pos = self.entries.partition_point(|e| e.due <= due);
        self.entries.insert(
            pos,
            Entry {
                handle,
                due,
                generation,
                payload,
            },
        );
        trace!("Timer {:?} scheduled at {:?} (gen {})", handle, due, generation);
        handle
    }

    /// Cancel a single timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.entries.iter().position(|e| e.handle == handle) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Cancel every timer scheduled by `generation`
    pub fn cancel_generation(&mut self, generation: Generation) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.generation != generation);
        before - self.entries.len()
    }

    /// Cancel everything
    pub fn cancel_all(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    /// Due time of the earliest pending timer
    pub fn next_due(&self) -> Option<Duration> {
        self.entries.first().map(|e| e.due)
    }

    /// Remove and return the earliest timer due at or before `now`
    pub fn pop_due(&mut self, now: Duration) -> Option<FiredTimer<T>> {
        if self.entries.first()?.due > now {
            return None;
        }
        let entry = self.entries.remove(0);
        Some(FiredTimer {
            handle: entry.handle,
            due: entry.due,
            generation: entry.generation,
            payload: entry.payload,
        })
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is pending
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(1000), 0, "late");
        queue.schedule(ms(400), 0, "early");

        assert!(queue.pop_due(ms(399)).is_none());
        assert_eq!(queue.pop_due(ms(400)).unwrap().payload, "early");
        assert!(queue.pop_due(ms(999)).is_none());
        assert_eq!(queue.pop_due(ms(5000)).unwrap().payload, "late");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_ties_are_fifo() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(10), 0, 1);
        queue.schedule(ms(10), 0, 2);
        queue.schedule(ms(10), 0, 3);

        let order: Vec<i32> = std::iter::from_fn(|| queue.pop_due(ms(10)))
            .map(|t| t.payload)
            .collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_cancel_single() {
        let mut queue = TimerQueue::new();
        let keep = queue.schedule(ms(10), 0, "keep");
        let dropped = queue.schedule(ms(5), 0, "dropped");

        assert!(queue.cancel(dropped));
        assert!(!queue.cancel(dropped));
        let fired = queue.pop_due(ms(10)).unwrap();
        assert_eq!(fired.handle, keep);
    }

    #[test]
    fn test_cancel_generation() {
        let mut queue = TimerQueue::new();
        queue.schedule(ms(400), 1, "reveal");
        queue.schedule(ms(10_000), 1, "advance");
        queue.schedule(ms(11_000), 2, "next");

        assert_eq!(queue.cancel_generation(1), 2);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_due(), Some(ms(11_000)));
        assert_eq!(queue.cancel_all(), 1);
        assert_eq!(queue.next_due(), None);
    }
}
