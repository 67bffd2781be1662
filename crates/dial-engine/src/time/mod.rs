//! Time subsystem.
//!
//! Provides UI-thread scheduling without coupling to the runtime:
//! - `WallClock` reads local wall-clock time (`SystemClock` in production,
//!   `FixedClock` in tests)
//! - `MessageQueue` is the single-threaded delayed-message queue the event loop
//!   drains; anything that wants to run later on the UI thread posts into it
//! - `Ticker` re-arms itself on that queue once per wall-clock second and
//!   drives a `TickTarget` it does not own

mod queue;
mod ticker;
mod wall;

pub use queue::MessageQueue;
pub use ticker::{TickMsg, TickOutcome, TickTarget, Ticker};
pub use wall::{FixedClock, SystemClock, WallClock, WallTime};
