//! GPU rendering.
//!
//! Renderers read a recorded `DrawList` and draw their own command kind with
//! wgpu, one instanced pass per kind. Geometry stays in logical pixels
//! (top-left origin, +Y down) until the vertex shader maps it to NDC.

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
