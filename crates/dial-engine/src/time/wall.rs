use std::cell::Cell;
use std::rc::Rc;

use chrono::{Local, Timelike};

/// Local wall-clock reading, split into the fields a clock face needs.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct WallTime {
    /// 0–23.
    pub hour: u32,
    /// 0–59.
    pub minute: u32,
    /// 0–59.
    pub second: u32,
    /// 0–999, position within the current second.
    pub millisecond: u32,
}

impl WallTime {
    #[inline]
    pub const fn new(hour: u32, minute: u32, second: u32, millisecond: u32) -> Self {
        Self { hour, minute, second, millisecond }
    }

    /// Reads any chrono time.
    ///
    /// A leap second arrives as second 59 with nanosecond >= 1e9; it reads as
    /// a second repeat of :59 so the position within it stays in 0–999.
    pub fn from_timelike<T: Timelike>(t: &T) -> Self {
        let millisecond = (t.nanosecond() % 1_000_000_000) / 1_000_000;
        Self::new(t.hour(), t.minute(), t.second(), millisecond)
    }
}

/// Source of wall-clock time.
pub trait WallClock {
    fn now(&self) -> WallTime;
}

/// Local time of the host, via `chrono::Local`.
#[derive(Debug, Copy, Clone, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> WallTime {
        WallTime::from_timelike(&Local::now())
    }
}

/// Settable clock. Clones share the same reading.
#[derive(Debug, Clone, Default)]
pub struct FixedClock(Rc<Cell<WallTime>>);

impl FixedClock {
    pub fn new(time: WallTime) -> Self {
        Self(Rc::new(Cell::new(time)))
    }

    pub fn set(&self, time: WallTime) {
        self.0.set(time);
    }
}

impl WallClock for FixedClock {
    fn now(&self) -> WallTime {
        self.0.get()
    }
}
