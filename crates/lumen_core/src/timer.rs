//! # Deferred Work
//!
//! Instead of fire-and-forget timeouts, expiry is data:
//! - `DelayQueue`: min-heap of `(deadline, item)`; a sweep pops what is due
//! - `IntervalTimer`: a fixed-period trigger polled once per frame
//!
//! Both run on virtual time (`Duration` since start), so tests advance a
//! clock instead of sleeping.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

/// Heap entry. Ordered by deadline, then insertion order.
#[derive(Debug)]
struct Scheduled<T> {
    deadline: Duration,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Scheduled<T> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl<T> Eq for Scheduled<T> {}

impl<T> PartialOrd for Scheduled<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Scheduled<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.deadline
            .cmp(&other.deadline)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Items waiting for a deadline.
#[derive(Debug)]
pub struct DelayQueue<T> {
    heap: BinaryHeap<Reverse<Scheduled<T>>>,
    seq: u64,
}

impl<T> DelayQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Creates an empty queue with room for `capacity` items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            seq: 0,
        }
    }

    /// Schedules `item` to come due at `deadline`.
    pub fn schedule(&mut self, deadline: Duration, item: T) {
        self.heap.push(Reverse(Scheduled {
            deadline,
            seq: self.seq,
            item,
        }));
        self.seq += 1;
    }

    /// Pops the earliest item whose deadline is at or before `now`.
    pub fn pop_expired(&mut self, now: Duration) -> Option<T> {
        if self.next_deadline()? > now {
            return None;
        }
        self.heap.pop().map(|Reverse(s)| s.item)
    }

    /// Iterates over every item due at `now`, earliest first.
    pub fn drain_expired(&mut self, now: Duration) -> DrainExpired<'_, T> {
        DrainExpired { queue: self, now }
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse(s)| s.deadline)
    }

    /// Number of pending items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True when nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drops every pending item.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<T> Default for DelayQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator returned by `DelayQueue::drain_expired`.
pub struct DrainExpired<'a, T> {
    queue: &'a mut DelayQueue<T>,
    now: Duration,
}

impl<T> Iterator for DrainExpired<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.queue.pop_expired(self.now)
    }
}

/// Fixed-period trigger.
#[derive(Clone, Debug)]
pub struct IntervalTimer {
    period: Duration,
    next: Duration,
}

impl IntervalTimer {
    /// Shortest accepted period.
    pub const MIN_PERIOD: Duration = Duration::from_millis(1);

    /// Creates a timer whose first trigger is one `period` after `start`.
    ///
    /// Periods below `MIN_PERIOD` are raised to it.
    #[must_use]
    pub fn new(period: Duration, start: Duration) -> Self {
        let period = period.max(Self::MIN_PERIOD);
        Self {
            period,
            next: start + period,
        }
    }

    /// Number of triggers that came due up to `now`.
    ///
    /// A long stall returns every missed trigger, not just one.
    pub fn due(&mut self, now: Duration) -> u32 {
        let mut fired = 0;
        while self.next <= now {
            fired += 1;
            self.next += self.period;
        }
        fired
    }

    /// Time of the next trigger.
    #[must_use]
    pub const fn next_trigger(&self) -> Duration {
        self.next
    }

    /// Trigger period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_delay_queue_orders_by_deadline() {
        let mut q = DelayQueue::new();
        q.schedule(ms(300), "c");
        q.schedule(ms(100), "a");
        q.schedule(ms(200), "b");

        assert_eq!(q.next_deadline(), Some(ms(100)));
        let due: Vec<_> = q.drain_expired(ms(250)).collect();
        assert_eq!(due, vec!["a", "b"]);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_deadline_is_inclusive() {
        let mut q = DelayQueue::new();
        q.schedule(ms(1000), 1);
        assert_eq!(q.pop_expired(ms(999)), None);
        assert_eq!(q.pop_expired(ms(1000)), Some(1));
        assert!(q.is_empty());
    }

    #[test]
    fn test_equal_deadlines_keep_insertion_order() {
        let mut q = DelayQueue::new();
        for i in 0..5 {
            q.schedule(ms(10), i);
        }
        let due: Vec<_> = q.drain_expired(ms(10)).collect();
        assert_eq!(due, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_interval_timer() {
        let mut t = IntervalTimer::new(ms(2000), Duration::ZERO);
        assert_eq!(t.due(ms(1999)), 0);
        assert_eq!(t.due(ms(2000)), 1);
        assert_eq!(t.due(ms(2001)), 0);
        assert_eq!(t.next_trigger(), ms(4000));
    }

    #[test]
    fn test_interval_timer_catches_up() {
        let mut t = IntervalTimer::new(ms(2000), Duration::ZERO);
        assert_eq!(t.due(ms(7000)), 3); // 2000, 4000, 6000
        assert_eq!(t.next_trigger(), ms(8000));
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let mut t = IntervalTimer::new(Duration::ZERO, Duration::ZERO);
        assert_eq!(t.period(), IntervalTimer::MIN_PERIOD);
        assert_eq!(t.due(ms(3)), 3);
    }
}
