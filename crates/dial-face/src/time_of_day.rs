use std::f64::consts::PI;

use dial_engine::time::WallTime;

/// Hour/minute/second snapshot shown by the face.
///
/// Replaced wholesale on every tick. Components are not validated: callers
/// pass wall-clock values (hour 0–23, minute and second 0–59).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl TimeOfDay {
    #[inline]
    pub const fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self { hour, minute, second }
    }

    #[inline]
    pub fn from_wall(time: WallTime) -> Self {
        Self::new(time.hour, time.minute, time.second)
    }

    /// Hour hand angle: `π/6 · (hour mod 12 + minute/60)`.
    pub fn hour_angle(&self) -> f64 {
        PI / 6.0 * ((self.hour % 12) as f64 + self.minute as f64 / 60.0)
    }

    /// Minute hand angle: `π/30 · (minute + second/60)`.
    pub fn minute_angle(&self) -> f64 {
        PI / 30.0 * (self.minute as f64 + self.second as f64 / 60.0)
    }

    /// Second hand angle: `π/30 · second`.
    pub fn second_angle(&self) -> f64 {
        PI / 30.0 * self.second as f64
    }
}

impl From<WallTime> for TimeOfDay {
    fn from(time: WallTime) -> Self {
        Self::from_wall(time)
    }
}
