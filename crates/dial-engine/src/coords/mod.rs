//! Coordinate and geometry types shared across renderers and the clock face.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Angles are clock angles: radians measured clockwise from 12 o'clock.
//! Renderers convert to NDC in shaders using a viewport uniform.

mod rotation;
mod vec2;
mod viewport;

pub use rotation::Rotation;
pub use vec2::Vec2;
pub use viewport::Viewport;
