use std::time::{Duration, Instant};

/// Single-threaded queue of delayed messages, drained by the UI thread.
///
/// Messages run in deadline order; messages with equal deadlines run in the
/// order they were posted. The queue never reads the clock itself: callers
/// pass `now`, which keeps it deterministic under test.
#[derive(Debug)]
pub struct MessageQueue<M> {
    /// Kept sorted by deadline; equal deadlines in posting order.
    pending: Vec<Pending<M>>,
}

#[derive(Debug)]
struct Pending<M> {
    when: Instant,
    msg: M,
}

impl<M> Default for MessageQueue<M> {
    fn default() -> Self {
        Self { pending: Vec::new() }
    }
}

impl<M> MessageQueue<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts `msg` to run at `when`.
    pub fn post_at(&mut self, when: Instant, msg: M) {
        // Insert after every entry due at or before `when`.
        let idx = self.pending.partition_point(|p| p.when <= when);
        self.pending.insert(idx, Pending { when, msg });
    }

    /// Posts `msg` to run `delay` after `now`.
    #[inline]
    pub fn post_delayed(&mut self, now: Instant, delay: Duration, msg: M) {
        self.post_at(now + delay, msg);
    }

    /// Deadline of the earliest pending message.
    #[inline]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.first().map(|p| p.when)
    }

    /// Removes and returns every message due at or before `now`, in run order.
    pub fn take_due(&mut self, now: Instant) -> Vec<M> {
        let due = self.pending.partition_point(|p| p.when <= now);
        self.pending.drain(..due).map(|p| p.msg).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<M: PartialEq> MessageQueue<M> {
    /// Removes every pending copy of `msg`. Returns how many were removed.
    pub fn remove(&mut self, msg: &M) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| p.msg != *msg);
        before - self.pending.len()
    }

    pub fn contains(&self, msg: &M) -> bool {
        self.pending.iter().any(|p| p.msg == *msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration { Duration::from_millis(v) }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn due_messages_come_out_in_deadline_order() {
        let t0 = Instant::now();
        let mut q = MessageQueue::new();
        q.post_delayed(t0, ms(30), "c");
        q.post_delayed(t0, ms(10), "a");
        q.post_delayed(t0, ms(20), "b");
        assert_eq!(q.take_due(t0 + ms(30)), vec!["a", "b", "c"]);
        assert!(q.is_empty());
    }

    #[test]
    fn equal_deadlines_are_fifo() {
        let t0 = Instant::now();
        let mut q = MessageQueue::new();
        for m in [1, 2, 3] {
            q.post_at(t0, m);
        }
        assert_eq!(q.take_due(t0), vec![1, 2, 3]);
    }

    #[test]
    fn not_yet_due_stays_queued() {
        let t0 = Instant::now();
        let mut q = MessageQueue::new();
        q.post_delayed(t0, ms(5), 'x');
        q.post_delayed(t0, ms(50), 'y');
        assert_eq!(q.take_due(t0 + ms(10)), vec!['x']);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_deadline(), Some(t0 + ms(50)));
    }

    #[test]
    fn nothing_due_before_first_deadline() {
        let t0 = Instant::now();
        let mut q = MessageQueue::new();
        q.post_delayed(t0, ms(1000), ());
        assert!(q.take_due(t0 + ms(999)).is_empty());
    }

    // ── remove ────────────────────────────────────────────────────────────

    #[test]
    fn remove_drops_all_copies() {
        let t0 = Instant::now();
        let mut q = MessageQueue::new();
        q.post_at(t0, 7);
        q.post_at(t0 + ms(1), 8);
        q.post_at(t0 + ms(2), 7);
        assert_eq!(q.remove(&7), 2);
        assert!(!q.contains(&7));
        assert!(q.contains(&8));
    }

    #[test]
    fn remove_missing_is_zero() {
        let mut q: MessageQueue<u8> = MessageQueue::new();
        assert_eq!(q.remove(&1), 0);
        assert_eq!(q.next_deadline(), None);
    }
}
