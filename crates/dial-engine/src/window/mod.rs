//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, wires them to the GPU layer, and
//! sleeps between the app's scheduled wakeups.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
