//! Dial face: an analog clock widget on top of `dial-engine`.
//!
//! The face itself is plain state plus a pure draw function:
//!
//! ```rust,ignore
//! use dial_face::prelude::*;
//!
//! let mut face = ClockFace::new(FaceStyle::default());
//! face.layout(200.0, 300.0);      // measurement pass: forces a square
//! face.set_time(3, 0, 0);         // marks dirty, draws nothing
//! let plan = face.draw().unwrap(); // DrawPlan for this frame
//! plan.record(face.style(), &mut draw_list);
//! ```
//!
//! [`ClockApp`] wires a face to a window and a wall-clock [`Ticker`]
//! (re-exported from the engine) that refreshes it once per second.
//!
//! [`Ticker`]: dial_engine::time::Ticker

pub mod app;
pub mod face;
pub mod geometry;
pub mod plan;
pub mod style;
pub mod time_of_day;

pub use app::ClockApp;

/// Everything needed to build or embed a clock face.
pub mod prelude {
    pub use crate::app::ClockApp;
    pub use crate::face::ClockFace;
    pub use crate::geometry::ViewportGeometry;
    pub use crate::plan::{Disc, DrawPlan, Segment};
    pub use crate::style::{FaceMetrics, FaceStyle, StyleError, StyleOption};
    pub use crate::time_of_day::TimeOfDay;

    pub use dial_engine::coords::Vec2;
    pub use dial_engine::paint::Color;
    pub use dial_engine::scene::DrawList;
    pub use dial_engine::time::{FixedClock, SystemClock, WallClock, WallTime};
}
