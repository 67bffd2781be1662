use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use super::{MessageQueue, WallClock, WallTime};

/// Receiver of ticker firings.
pub trait TickTarget {
    /// Called on the UI thread with the wall-clock reading of this firing.
    fn on_tick(&mut self, time: WallTime);
}

/// Message the ticker posts to itself on the UI queue.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TickMsg {
    Update,
}

/// What the host should do after handing a message to the ticker.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TickOutcome {
    /// The target was updated; the host must invalidate (request a redraw).
    Redraw,
    /// The ticker is stopped; the message was stale and ignored.
    Stopped,
    /// The target was mid-update; this second was skipped, the next is armed.
    Skipped,
    /// The target no longer exists; the ticker cancelled itself.
    Detached,
}

/// Once-per-second trigger aligned to wall-clock second boundaries.
///
/// After each firing the next one is posted `1000 - millisecond` ms later, so
/// firings land just after each second boundary and drift does not
/// accumulate.
///
/// The ticker holds only a `Weak` to its target. A target dropped while the
/// ticker runs turns the next firing into a silent self-cancel.
pub struct Ticker<C, T> {
    clock: C,
    target: Weak<RefCell<T>>,
    running: bool,
}

impl<C: WallClock, T: TickTarget> Ticker<C, T> {
    pub fn new(clock: C) -> Self {
        Self { clock, target: Weak::new(), running: false }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts ticking `target`. The first firing is due immediately.
    ///
    /// Restarting a running ticker retargets it; at most one firing is ever pending.
    pub fn start(&mut self, target: &Rc<RefCell<T>>, queue: &mut MessageQueue<TickMsg>, now: Instant) {
        self.target = Rc::downgrade(target);
        self.running = true;

        queue.remove(&TickMsg::Update);
        queue.post_at(now, TickMsg::Update);

        log::debug!("ticker started");
    }

    /// Stops ticking and withdraws the pending firing. Safe to call repeatedly.
    pub fn stop(&mut self, queue: &mut MessageQueue<TickMsg>) {
        if self.running {
            log::debug!("ticker stopped");
        }
        self.running = false;
        self.target = Weak::new();
        queue.remove(&TickMsg::Update);
    }

    /// Handles a due message taken from the UI queue.
    pub fn handle(
        &mut self,
        msg: TickMsg,
        queue: &mut MessageQueue<TickMsg>,
        now: Instant,
    ) -> TickOutcome {
        let TickMsg::Update = msg;

        if !self.running {
            return TickOutcome::Stopped;
        }

        let Some(target) = self.target.upgrade() else {
            log::debug!("tick target dropped; ticker cancelled");
            self.running = false;
            queue.remove(&TickMsg::Update);
            return TickOutcome::Detached;
        };

        let time = self.clock.now();
        let outcome = match target.try_borrow_mut() {
            Ok(mut t) => {
                t.on_tick(time);
                TickOutcome::Redraw
            }
            Err(_) => {
                // Re-entrant firing; skip this second rather than panic.
                log::warn!(
                    "tick target busy; skipping {:02}:{:02}:{:02}",
                    time.hour, time.minute, time.second
                );
                TickOutcome::Skipped
            }
        };

        queue.remove(&TickMsg::Update);
        queue.post_delayed(now, delay_to_next_second(time), TickMsg::Update);

        log::trace!(
            "tick {:02}:{:02}:{:02}.{:03}",
            time.hour, time.minute, time.second, time.millisecond
        );

        outcome
    }
}

/// Delay from `time` to the next wall-clock second boundary, in `(0, 1000]` ms.
pub(crate) fn delay_to_next_second(time: WallTime) -> Duration {
    Duration::from_millis(1000 - u64::from(time.millisecond.min(999)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;

    #[derive(Default)]
    struct Counter {
        ticks: Vec<WallTime>,
    }

    impl TickTarget for Counter {
        fn on_tick(&mut self, time: WallTime) {
            self.ticks.push(time);
        }
    }

    fn ms(v: u64) -> Duration { Duration::from_millis(v) }

    /// Wall time `elapsed_ms` after 10:00:00.`start_ms`.
    fn wall_at(start_ms: u64, elapsed_ms: u64) -> WallTime {
        let total = start_ms + elapsed_ms;
        let secs = total / 1000;
        WallTime::new(10, (secs / 60) as u32, (secs % 60) as u32, (total % 1000) as u32)
    }

    /// Drives the UI queue in 10 ms steps from `t0 + from` to `t0 + until`,
    /// keeping the fixed clock in sync. Returns the number of `Redraw` outcomes.
    fn pump(
        ticker: &mut Ticker<FixedClock, Counter>,
        queue: &mut MessageQueue<TickMsg>,
        t0: Instant,
        start_ms: u64,
        from: u64,
        until: u64,
    ) -> usize {
        let mut redraws = 0;
        let mut elapsed = from;
        while elapsed <= until {
            ticker.clock().set(wall_at(start_ms, elapsed));
            for msg in queue.take_due(t0 + ms(elapsed)) {
                if ticker.handle(msg, queue, t0 + ms(elapsed)) == TickOutcome::Redraw {
                    redraws += 1;
                }
            }
            elapsed += 10;
        }
        redraws
    }

    // ── alignment ─────────────────────────────────────────────────────────

    #[test]
    fn delay_reaches_next_boundary() {
        assert_eq!(delay_to_next_second(WallTime::new(0, 0, 0, 250)), ms(750));
        assert_eq!(delay_to_next_second(WallTime::new(0, 0, 0, 999)), ms(1));
    }

    #[test]
    fn delay_on_boundary_is_full_second() {
        assert_eq!(delay_to_next_second(WallTime::new(0, 0, 0, 0)), ms(1000));
    }

    #[test]
    fn leap_second_rearms_once_not_every_millisecond() {
        let leap = chrono::NaiveTime::from_hms_milli_opt(23, 59, 59, 1_002).unwrap();
        assert_eq!(delay_to_next_second(WallTime::from_timelike(&leap)), ms(998));
    }

    #[test]
    fn start_fires_immediately_then_rearms_at_boundary() {
        let t0 = Instant::now();
        let clock = FixedClock::new(WallTime::new(9, 15, 30, 400));
        let target = Rc::new(RefCell::new(Counter::default()));
        let mut queue = MessageQueue::new();
        let mut ticker = Ticker::new(clock);

        ticker.start(&target, &mut queue, t0);
        assert_eq!(queue.next_deadline(), Some(t0));

        let msgs = queue.take_due(t0);
        assert_eq!(msgs, vec![TickMsg::Update]);
        assert_eq!(ticker.handle(msgs[0], &mut queue, t0), TickOutcome::Redraw);

        assert_eq!(target.borrow().ticks, vec![WallTime::new(9, 15, 30, 400)]);
        assert_eq!(queue.next_deadline(), Some(t0 + ms(600)));
    }

    #[test]
    fn fires_once_per_second() {
        let t0 = Instant::now();
        let clock = FixedClock::new(wall_at(300, 0));
        let target = Rc::new(RefCell::new(Counter::default()));
        let mut queue = MessageQueue::new();
        let mut ticker = Ticker::new(clock);

        ticker.start(&target, &mut queue, t0);
        // Immediate firing plus boundaries at 700, 1700, 2700 ms.
        assert_eq!(pump(&mut ticker, &mut queue, t0, 300, 0, 3000), 4);

        let seconds: Vec<u32> = target.borrow().ticks.iter().map(|t| t.second).collect();
        assert_eq!(seconds, vec![0, 1, 2, 3]);
        assert_eq!(queue.len(), 1);
    }

    // ── stop ──────────────────────────────────────────────────────────────

    #[test]
    fn no_callbacks_after_stop() {
        let t0 = Instant::now();
        let clock = FixedClock::new(wall_at(0, 0));
        let target = Rc::new(RefCell::new(Counter::default()));
        let mut queue = MessageQueue::new();
        let mut ticker = Ticker::new(clock);

        ticker.start(&target, &mut queue, t0);
        assert_eq!(pump(&mut ticker, &mut queue, t0, 0, 0, 1500), 2);

        ticker.stop(&mut queue);
        let before = target.borrow().ticks.len();

        assert_eq!(pump(&mut ticker, &mut queue, t0, 0, 1510, 4510), 0);
        assert_eq!(target.borrow().ticks.len(), before);
        assert!(queue.is_empty());
        assert!(!ticker.is_running());
    }

    #[test]
    fn stop_is_idempotent() {
        let t0 = Instant::now();
        let target = Rc::new(RefCell::new(Counter::default()));
        let mut queue = MessageQueue::new();
        let mut ticker = Ticker::new(FixedClock::default());

        ticker.stop(&mut queue);
        ticker.start(&target, &mut queue, t0);
        ticker.stop(&mut queue);
        ticker.stop(&mut queue);
        assert!(queue.is_empty());
    }

    #[test]
    fn stale_message_after_stop_is_ignored() {
        let t0 = Instant::now();
        let target = Rc::new(RefCell::new(Counter::default()));
        let mut queue = MessageQueue::new();
        let mut ticker = Ticker::new(FixedClock::default());

        ticker.start(&target, &mut queue, t0);
        let msgs = queue.take_due(t0);
        ticker.stop(&mut queue);

        assert_eq!(ticker.handle(msgs[0], &mut queue, t0), TickOutcome::Stopped);
        assert!(target.borrow().ticks.is_empty());
        assert!(queue.is_empty());
    }

    // ── weak target ───────────────────────────────────────────────────────

    #[test]
    fn dropped_target_cancels_ticker() {
        let t0 = Instant::now();
        let target = Rc::new(RefCell::new(Counter::default()));
        let mut queue = MessageQueue::new();
        let mut ticker = Ticker::new(FixedClock::default());

        ticker.start(&target, &mut queue, t0);
        drop(target);

        let msgs = queue.take_due(t0);
        assert_eq!(ticker.handle(msgs[0], &mut queue, t0), TickOutcome::Detached);
        assert!(!ticker.is_running());
        assert!(queue.is_empty());
    }

    #[test]
    fn ticker_does_not_keep_target_alive() {
        let t0 = Instant::now();
        let target = Rc::new(RefCell::new(Counter::default()));
        let mut queue = MessageQueue::new();
        let mut ticker = Ticker::new(FixedClock::default());

        ticker.start(&target, &mut queue, t0);
        assert_eq!(Rc::strong_count(&target), 1);
        assert_eq!(Rc::weak_count(&target), 1);
    }

    #[test]
    fn busy_target_skips_but_keeps_ticking() {
        let t0 = Instant::now();
        let target = Rc::new(RefCell::new(Counter::default()));
        let mut queue = MessageQueue::new();
        let mut ticker = Ticker::new(FixedClock::default());

        ticker.start(&target, &mut queue, t0);
        let msgs = queue.take_due(t0);
        let guard = target.borrow_mut();
        assert_eq!(ticker.handle(msgs[0], &mut queue, t0), TickOutcome::Skipped);
        drop(guard);

        assert_eq!(queue.len(), 1);
        assert!(ticker.is_running());
    }

    // ── restart ───────────────────────────────────────────────────────────

    #[test]
    fn restart_keeps_single_pending_firing() {
        let t0 = Instant::now();
        let target = Rc::new(RefCell::new(Counter::default()));
        let mut queue = MessageQueue::new();
        let mut ticker = Ticker::new(FixedClock::default());

        ticker.start(&target, &mut queue, t0);
        ticker.start(&target, &mut queue, t0 + ms(5));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_deadline(), Some(t0 + ms(5)));
    }
}
