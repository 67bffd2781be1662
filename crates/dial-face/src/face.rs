use dial_engine::time::{TickTarget, WallTime};

use crate::geometry::ViewportGeometry;
use crate::plan::{tick_marks, Disc, DrawPlan, Segment};
use crate::style::FaceStyle;
use crate::time_of_day::TimeOfDay;

/// Analog clock face: current time + layout, and a pure `draw`.
///
/// Nothing here renders. `set_time` only stores the time and marks the face
/// dirty; the host decides when to call `draw` and paint the plan.
#[derive(Debug, Clone)]
pub struct ClockFace {
    style: FaceStyle,
    time: TimeOfDay,
    geometry: Option<ViewportGeometry>,
    /// Tick marks for `geometry`; rebuilt only when geometry or metrics change.
    ticks: [Segment; 12],
    dirty: bool,
}

impl ClockFace {
    pub fn new(style: FaceStyle) -> Self {
        Self {
            style,
            time: TimeOfDay::default(),
            geometry: None,
            ticks: [Segment::default(); 12],
            dirty: true,
        }
    }

    #[inline]
    pub fn style(&self) -> &FaceStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: FaceStyle) {
        let metrics_changed = style.metrics != self.style.metrics;
        self.style = style;

        if metrics_changed {
            if let Some(g) = self.geometry {
                let size = g.side;
                // Hand stroke feeds the radius, so redo the whole layout.
                self.geometry = None;
                self.layout(size, size);
            }
        }
        self.dirty = true;
    }

    /// Stores a new time and marks the face dirty.
    pub fn set_time(&mut self, hour: u32, minute: u32, second: u32) {
        self.set_time_of_day(TimeOfDay::new(hour, minute, second));
    }

    pub fn set_time_of_day(&mut self, time: TimeOfDay) {
        self.time = time;
        self.dirty = true;
    }

    #[inline]
    pub fn time(&self) -> TimeOfDay {
        self.time
    }

    /// Measurement pass. Squares the available area and caches the tick marks.
    ///
    /// Repeating a layout with the same size changes nothing.
    pub fn layout(&mut self, width: f32, height: f32) -> ViewportGeometry {
        let geometry = ViewportGeometry::from_size(width, height, self.style.metrics.hand_stroke);

        if self.geometry != Some(geometry) {
            log::trace!(
                "face layout: side {} radius {} (from {width}x{height})",
                geometry.side, geometry.radius
            );
            self.ticks = tick_marks(&geometry, &self.style.metrics);
            self.geometry = Some(geometry);
            self.dirty = true;
        }

        geometry
    }

    #[inline]
    pub fn geometry(&self) -> Option<ViewportGeometry> {
        self.geometry
    }

    #[inline]
    pub fn tick_marks(&self) -> &[Segment; 12] {
        &self.ticks
    }

    /// Builds this frame's plan.
    ///
    /// Returns `None` before the first layout and for degenerate geometry, in
    /// which case the host skips the draw pass.
    pub fn draw(&self) -> Option<DrawPlan> {
        let g = self.geometry.filter(|g| !g.is_degenerate())?;
        let m = &self.style.metrics;
        let t = &self.time;

        let hand = |angle: f64, length: f32| Segment::new(g.center, g.point_at(angle, length));

        Some(DrawPlan {
            ticks: self.ticks,
            hour_hand: hand(t.hour_angle(), m.short_hand_length),
            minute_hand: hand(t.minute_angle(), m.long_hand_length),
            second_hand: hand(t.second_angle(), m.long_hand_length),
            center: Disc { center: g.center, radius: m.center_dot_radius },
        })
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

impl Default for ClockFace {
    fn default() -> Self {
        Self::new(FaceStyle::default())
    }
}

impl TickTarget for ClockFace {
    fn on_tick(&mut self, time: WallTime) {
        self.set_time_of_day(TimeOfDay::from_wall(time));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::FaceMetrics;
    use dial_engine::coords::Vec2;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    fn laid_out(w: f32, h: f32) -> ClockFace {
        let mut face = ClockFace::default();
        face.layout(w, h);
        face
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn layout_squares_and_insets_radius() {
        let mut face = ClockFace::default();
        let g = face.layout(200.0, 300.0);
        assert_eq!(g.side, 200.0);
        assert_eq!(g.center, Vec2::new(100.0, 100.0));
        assert_eq!(g.radius, 100.0 - face.style().metrics.hand_stroke / 2.0);
        assert_eq!(face.geometry(), Some(g));
    }

    #[test]
    fn layout_is_idempotent() {
        let mut face = ClockFace::default();
        let a = face.layout(300.0, 250.0);
        let ticks = *face.tick_marks();
        face.clear_dirty();

        let b = face.layout(300.0, 250.0);
        assert_eq!(a, b);
        assert_eq!(*face.tick_marks(), ticks);
        assert!(!face.is_dirty());
    }

    #[test]
    fn new_size_rebuilds_ticks() {
        let mut face = laid_out(200.0, 200.0);
        let before = *face.tick_marks();
        face.layout(400.0, 400.0);
        assert_ne!(*face.tick_marks(), before);
    }

    // ── set_time ──────────────────────────────────────────────────────────

    #[test]
    fn set_time_marks_dirty_only() {
        let mut face = laid_out(200.0, 200.0);
        face.clear_dirty();
        face.set_time(7, 8, 9);
        assert!(face.is_dirty());
        assert_eq!(face.time(), TimeOfDay::new(7, 8, 9));
    }

    #[test]
    fn ticking_never_moves_tick_marks() {
        let mut face = laid_out(240.0, 240.0);
        let ticks = *face.tick_marks();
        for second in 0..60 {
            face.set_time(10, 10, second);
            assert_eq!(face.draw().unwrap().ticks, ticks);
        }
        assert_eq!(*face.tick_marks(), ticks);
    }

    #[test]
    fn on_tick_copies_wall_time() {
        let mut face = ClockFace::default();
        face.on_tick(WallTime::new(13, 14, 15, 600));
        assert_eq!(face.time(), TimeOfDay::new(13, 14, 15));
    }

    // ── draw ──────────────────────────────────────────────────────────────

    #[test]
    fn draw_before_layout_is_skipped() {
        assert!(ClockFace::default().draw().is_none());
    }

    #[test]
    fn draw_with_zero_area_is_skipped() {
        assert!(laid_out(0.0, 0.0).draw().is_none());
    }

    #[test]
    fn hands_at_three_oclock() {
        let mut face = laid_out(300.0, 300.0);
        face.set_time(3, 0, 0);
        let plan = face.draw().unwrap();
        let c = Vec2::new(150.0, 150.0);

        assert_eq!(plan.hour_hand.from, c);
        assert!(close(plan.hour_hand.to, Vec2::new(230.0, 150.0)));
        assert!(close(plan.minute_hand.to, Vec2::new(150.0, 30.0)));
        assert!(close(plan.second_hand.to, Vec2::new(150.0, 30.0)));
    }

    #[test]
    fn minute_hand_at_half_past_points_down() {
        let mut face = laid_out(300.0, 300.0);
        face.set_time(0, 30, 0);
        let plan = face.draw().unwrap();
        assert!(close(plan.minute_hand.to, Vec2::new(150.0, 270.0)));
    }

    #[test]
    fn second_hand_at_forty_five_points_left() {
        let mut face = laid_out(300.0, 300.0);
        face.set_time(0, 0, 45);
        let plan = face.draw().unwrap();
        assert!(close(plan.second_hand.to, Vec2::new(30.0, 150.0)));
    }

    #[test]
    fn hand_lengths_follow_metrics() {
        let mut face = laid_out(300.0, 300.0);
        face.set_time(4, 20, 33);
        let plan = face.draw().unwrap();
        let m = FaceMetrics::default();
        assert!((plan.hour_hand.length() - m.short_hand_length).abs() < 1e-3);
        assert!((plan.minute_hand.length() - m.long_hand_length).abs() < 1e-3);
        assert!((plan.second_hand.length() - m.long_hand_length).abs() < 1e-3);
        assert_eq!(plan.center, Disc { center: Vec2::new(150.0, 150.0), radius: m.center_dot_radius });
    }

    #[test]
    fn draw_is_deterministic() {
        let mut face = laid_out(256.0, 256.0);
        face.set_time(11, 59, 59);
        assert_eq!(face.draw(), face.draw());
    }

    // ── style ─────────────────────────────────────────────────────────────

    #[test]
    fn metric_change_relays_out() {
        let mut face = laid_out(200.0, 200.0);
        let style = FaceStyle::default().with_metrics(FaceMetrics {
            hand_stroke: 20.0,
            tick_length: 10.0,
            ..FaceMetrics::default()
        });
        face.set_style(style);

        let g = face.geometry().unwrap();
        assert_eq!(g.radius, 90.0);
        assert!((face.tick_marks()[0].length() - 10.0).abs() < 1e-3);
    }

    #[test]
    fn color_change_keeps_geometry() {
        let mut face = laid_out(200.0, 200.0);
        let before = face.geometry();
        let style = FaceStyle {
            tick_mark_color: dial_engine::paint::Color::WHITE,
            ..FaceStyle::default()
        };
        face.set_style(style);
        assert_eq!(face.geometry(), before);
    }
}
