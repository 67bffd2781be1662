use super::Vec2;

/// Rotation about a pivot point, clockwise on screen for positive angles.
///
/// This is the `save / rotate(angle, pivot) / restore` canvas idiom reduced to a
/// value: callers rotate template geometry explicitly instead of mutating a
/// shared transform stack.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rotation {
    pivot: Vec2,
    sin: f64,
    cos: f64,
}

impl Rotation {
    /// Rotation by `angle` radians (clock direction) about `pivot`.
    pub fn about(pivot: Vec2, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { pivot, sin, cos }
    }

    /// Rotation by `degrees` about `pivot`.
    #[inline]
    pub fn about_degrees(pivot: Vec2, degrees: f64) -> Self {
        Self::about(pivot, degrees.to_radians())
    }

    pub fn apply(&self, p: Vec2) -> Vec2 {
        let dx = (p.x - self.pivot.x) as f64;
        let dy = (p.y - self.pivot.y) as f64;

        // +Y is down, so the usual CCW matrix turns clockwise on screen.
        let x = dx * self.cos - dy * self.sin;
        let y = dx * self.sin + dy * self.cos;

        Vec2::new(self.pivot.x + x as f32, self.pivot.y + y as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn quarter_turn_moves_twelve_to_three() {
        let c = Vec2::new(100.0, 100.0);
        let r = Rotation::about_degrees(c, 90.0);
        assert!(close(r.apply(Vec2::new(100.0, 10.0)), Vec2::new(190.0, 100.0)));
    }

    #[test]
    fn pivot_is_fixed() {
        let c = Vec2::new(40.0, 60.0);
        let r = Rotation::about_degrees(c, 123.0);
        assert!(close(r.apply(c), c));
    }

    #[test]
    fn full_turn_is_identity() {
        let c = Vec2::new(0.0, 0.0);
        let p = Vec2::new(3.0, -7.0);
        assert!(close(Rotation::about_degrees(c, 360.0).apply(p), p));
    }

    #[test]
    fn matches_clock_angle_offset() {
        let c = Vec2::new(50.0, 50.0);
        let up = c + Vec2::new(0.0, -20.0);
        let angle = 1.1;
        let rotated = Rotation::about(c, angle).apply(up);
        assert!(close(rotated, c + Vec2::from_clock_angle(angle, 20.0)));
    }
}
