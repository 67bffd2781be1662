/// Drawable area in logical pixels, uploaded to the shape shaders for the
/// logical px → NDC conversion.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Positive and finite on both axes. Renderers draw nothing otherwise.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimized_or_broken_viewports_are_invalid() {
        assert!(Viewport::new(480.0, 480.0).is_valid());
        assert!(!Viewport::new(0.0, 480.0).is_valid());
        assert!(!Viewport::new(480.0, f32::NAN).is_valid());
        assert!(!Viewport::default().is_valid());
    }
}
