//! Paint model shared between the clock face and renderers.
//!
//! Only solid colors exist: every shape the face draws is a single flat fill
//! or stroke. Geometry types remain in `coords`.

pub mod color;

pub use color::{Color, ColorParseError};
