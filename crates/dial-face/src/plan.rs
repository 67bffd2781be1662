use dial_engine::coords::{Rotation, Vec2};
use dial_engine::scene::{DrawList, LineCap, ZIndex};

use crate::geometry::ViewportGeometry;
use crate::style::{FaceMetrics, FaceStyle};

/// Straight segment between two points (logical px).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
}

impl Segment {
    #[inline]
    pub const fn new(from: Vec2, to: Vec2) -> Self {
        Self { from, to }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.to - self.from).length()
    }

    #[inline]
    fn offset(self, by: Vec2) -> Self {
        Self::new(self.from + by, self.to + by)
    }
}

/// Filled disc.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Disc {
    pub center: Vec2,
    pub radius: f32,
}

/// Everything one frame of the face draws, in paint order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawPlan {
    /// Index 0 is 12 o'clock, then clockwise in 30° steps.
    pub ticks: [Segment; 12],
    pub hour_hand: Segment,
    pub minute_hand: Segment,
    pub second_hand: Segment,
    /// Drawn last, on top of the hands.
    pub center: Disc,
}

// Layers, back to front.
const Z_TICKS: ZIndex = ZIndex::new(0);
const Z_HOUR: ZIndex = ZIndex::new(1);
const Z_MINUTE: ZIndex = ZIndex::new(2);
const Z_SECOND: ZIndex = ZIndex::new(3);
const Z_CENTER: ZIndex = ZIndex::new(4);

impl DrawPlan {
    /// Same plan moved by `by` (view-local → window coordinates).
    pub fn offset(&self, by: Vec2) -> DrawPlan {
        DrawPlan {
            ticks: self.ticks.map(|t| t.offset(by)),
            hour_hand: self.hour_hand.offset(by),
            minute_hand: self.minute_hand.offset(by),
            second_hand: self.second_hand.offset(by),
            center: Disc { center: self.center.center + by, radius: self.center.radius },
        }
    }

    /// Records the plan into `list` with `style`'s colors and strokes.
    pub fn record(&self, style: &FaceStyle, list: &mut DrawList) {
        let m = &style.metrics;

        for tick in &self.ticks {
            list.push_line(Z_TICKS, tick.from, tick.to, m.tick_stroke, style.tick_mark_color, LineCap::Round);
        }

        let h = &self.hour_hand;
        list.push_line(Z_HOUR, h.from, h.to, m.hour_hand_stroke, style.hour_hand_color, LineCap::Round);

        for (z, hand) in [(Z_MINUTE, &self.minute_hand), (Z_SECOND, &self.second_hand)] {
            list.push_line(z, hand.from, hand.to, m.hand_stroke, style.minute_hand_color, LineCap::Round);
        }

        list.push_solid_circle(Z_CENTER, self.center.center, self.center.radius, style.center_dot_color);
    }
}

/// Twelve radial tick marks: a segment from the rim inward by `tick_length`
/// at 12 o'clock, rotated about the center in 30° steps.
pub(crate) fn tick_marks(geometry: &ViewportGeometry, metrics: &FaceMetrics) -> [Segment; 12] {
    let c = geometry.center;
    let rim = Vec2::new(c.x, c.y - geometry.radius);
    let template = Segment::new(rim, rim + Vec2::new(0.0, metrics.tick_length));

    std::array::from_fn(|i| {
        let rot = Rotation::about_degrees(c, 30.0 * i as f64);
        Segment::new(rot.apply(template.from), rot.apply(template.to))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dial_engine::scene::DrawCmd;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    fn geometry() -> ViewportGeometry {
        ViewportGeometry::from_size(200.0, 200.0, 8.0)
    }

    fn plan() -> DrawPlan {
        let seg = Segment::new(Vec2::new(100.0, 100.0), Vec2::new(100.0, 20.0));
        DrawPlan {
            ticks: tick_marks(&geometry(), &FaceMetrics::default()),
            hour_hand: seg,
            minute_hand: seg,
            second_hand: seg,
            center: Disc { center: Vec2::new(100.0, 100.0), radius: 20.0 },
        }
    }

    // ── tick marks ────────────────────────────────────────────────────────

    #[test]
    fn first_tick_hangs_from_twelve() {
        let ticks = tick_marks(&geometry(), &FaceMetrics::default());
        assert!(close(ticks[0].from, Vec2::new(100.0, 4.0)));
        assert!(close(ticks[0].to, Vec2::new(100.0, 34.0)));
    }

    #[test]
    fn third_tick_is_at_three() {
        let ticks = tick_marks(&geometry(), &FaceMetrics::default());
        assert!(close(ticks[3].from, Vec2::new(196.0, 100.0)));
        assert!(close(ticks[3].to, Vec2::new(166.0, 100.0)));
    }

    #[test]
    fn every_tick_has_tick_length_and_starts_on_rim() {
        let g = geometry();
        for tick in tick_marks(&g, &FaceMetrics::default()) {
            assert!((tick.length() - 30.0).abs() < 1e-3);
            assert!(((tick.from - g.center).length() - g.radius).abs() < 1e-3);
        }
    }

    // ── offset ────────────────────────────────────────────────────────────

    #[test]
    fn offset_moves_every_primitive() {
        let p = plan();
        let by = Vec2::new(10.0, -5.0);
        let moved = p.offset(by);
        assert_eq!(moved.center.center, p.center.center + by);
        assert_eq!(moved.center.radius, p.center.radius);
        assert_eq!(moved.ticks[7].to, p.ticks[7].to + by);
        assert_eq!(moved.second_hand.from, p.second_hand.from + by);
    }

    // ── record ────────────────────────────────────────────────────────────

    #[test]
    fn record_emits_ticks_hands_then_center() {
        let mut list = DrawList::new();
        plan().record(&FaceStyle::default(), &mut list);
        assert_eq!(list.len(), 16);

        let cmds: Vec<DrawCmd> = list.iter_in_paint_order().map(|i| i.cmd.clone()).collect();
        assert!(cmds[..15].iter().all(|c| matches!(c, DrawCmd::Line(_))));
        assert!(matches!(cmds[15], DrawCmd::Circle(_)));
    }

    #[test]
    fn record_applies_style() {
        let style = FaceStyle::default();
        let mut list = DrawList::new();
        plan().record(&style, &mut list);

        let DrawCmd::Line(hour) = &list.items()[12].cmd else { panic!("expected hour hand line") };
        assert_eq!(hour.width, style.metrics.hour_hand_stroke);
        assert_eq!(hour.color, style.hour_hand_color);
        assert_eq!(hour.cap, LineCap::Round);

        let DrawCmd::Line(second) = &list.items()[14].cmd else { panic!("expected second hand line") };
        assert_eq!(second.width, style.metrics.hand_stroke);
        assert_eq!(second.color, style.minute_hand_color);

        let DrawCmd::Circle(dot) = &list.items()[15].cmd else { panic!("expected center dot") };
        assert_eq!(dot.color, style.center_dot_color);
        assert_eq!(dot.radius, 20.0);
    }
}
