//! Dial engine crate.
//!
//! This crate owns the platform + GPU runtime pieces and the UI-thread timing
//! primitives used by the clock face and its host binary.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
