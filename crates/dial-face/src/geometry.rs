use dial_engine::coords::Vec2;

/// Center and radius of the face, derived from the available drawing area.
///
/// The face is always square: the side is the smaller of the two available
/// dimensions and the center sits at half the side on both axes (view-local
/// coordinates). The radius leaves room for half a hand stroke so round caps
/// stay inside the square.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ViewportGeometry {
    pub side: f32,
    pub center: Vec2,
    pub radius: f32,
}

impl ViewportGeometry {
    pub fn from_size(width: f32, height: f32, hand_stroke: f32) -> Self {
        let side = sanitize(width).min(sanitize(height));
        let half = side / 2.0;
        Self {
            side,
            center: Vec2::new(half, half),
            radius: half - hand_stroke / 2.0,
        }
    }

    /// True when there is nothing sensible to draw (empty or negative radius).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.side <= 0.0 || self.radius <= 0.0
    }

    /// Point `length` from the center at clock angle `angle`.
    #[inline]
    pub fn point_at(&self, angle: f64, length: f32) -> Vec2 {
        self.center + Vec2::from_clock_angle(angle, length)
    }
}

fn sanitize(v: f32) -> f32 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tall_area_is_squared_to_width() {
        let g = ViewportGeometry::from_size(200.0, 300.0, 8.0);
        assert_eq!(g.side, 200.0);
        assert_eq!(g.center, Vec2::new(100.0, 100.0));
        assert_eq!(g.radius, 96.0);
    }

    #[test]
    fn wide_area_is_squared_to_height() {
        let g = ViewportGeometry::from_size(640.0, 480.0, 8.0);
        assert_eq!(g.side, 480.0);
        assert_eq!(g.center, Vec2::new(240.0, 240.0));
    }

    #[test]
    fn same_size_gives_same_geometry() {
        let a = ViewportGeometry::from_size(321.0, 123.0, 8.0);
        let b = ViewportGeometry::from_size(321.0, 123.0, 8.0);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_area_is_degenerate() {
        assert!(ViewportGeometry::from_size(0.0, 100.0, 8.0).is_degenerate());
        assert!(ViewportGeometry::from_size(6.0, 6.0, 8.0).is_degenerate());
    }

    #[test]
    fn non_finite_sizes_collapse_to_zero() {
        let g = ViewportGeometry::from_size(f32::NAN, f32::INFINITY, 8.0);
        assert_eq!(g.side, 0.0);
        assert!(g.is_degenerate());
    }
}
