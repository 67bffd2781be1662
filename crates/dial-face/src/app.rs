use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};

use dial_engine::coords::Vec2;
use dial_engine::core::{App as EngineApp, AppControl, FrameCtx};
use dial_engine::device::GpuInit;
use dial_engine::paint::Color;
use dial_engine::render::shapes::circle::CircleRenderer;
use dial_engine::render::shapes::line::LineRenderer;
use dial_engine::scene::DrawList;
use dial_engine::time::{MessageQueue, SystemClock, TickMsg, TickOutcome, Ticker, WallClock};
use dial_engine::window::{Runtime, RuntimeCtx, RuntimeConfig};

use crate::face::ClockFace;
use crate::style::FaceStyle;

// ── ClockApp ──────────────────────────────────────────────────────────────

/// Window builder for a single clock face.
///
/// ```rust,ignore
/// ClockApp::new()
///     .title("Dial")
///     .size(480.0, 480.0)
///     .style(FaceStyle::default())
///     .run()?;
/// ```
///
/// The face ticks from [`SystemClock`] unless another [`WallClock`] is given
/// via [`clock`](Self::clock).
pub struct ClockApp<C = SystemClock> {
    title:       String,
    width:       f64,
    height:      f64,
    style:       FaceStyle,
    clear_color: Color,
    clock:       C,
}

impl ClockApp<SystemClock> {
    pub fn new() -> Self {
        Self {
            title:       "dial".to_string(),
            width:       480.0,
            height:      480.0,
            style:       FaceStyle::default(),
            clear_color: Color::WHITE,
            clock:       SystemClock,
        }
    }
}

impl Default for ClockApp<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: WallClock + 'static> ClockApp<C> {
    /// Set the window title.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width  = width;
        self.height = height;
        self
    }

    pub fn style(mut self, style: FaceStyle) -> Self {
        self.style = style;
        self
    }

    /// Background behind the face. White by default.
    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Replace the wall clock the face ticks from.
    pub fn clock<D: WallClock + 'static>(self, clock: D) -> ClockApp<D> {
        ClockApp {
            title:       self.title,
            width:       self.width,
            height:      self.height,
            style:       self.style,
            clear_color: self.clear_color,
            clock,
        }
    }

    /// Opens the window and runs until it is closed or Escape is pressed.
    pub fn run(self) -> anyhow::Result<()> {
        let config = RuntimeConfig {
            title:        self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
            ..RuntimeConfig::default()
        };
        log::info!("starting '{}' at {}x{}", self.title, self.width, self.height);

        Runtime::run(config, GpuInit::default(), ClockAppState::new(self))
    }
}

// ── ClockAppState ─────────────────────────────────────────────────────────

/// Engine-facing state: the face, its ticker and the per-frame renderers.
struct ClockAppState<C> {
    face:        Rc<RefCell<ClockFace>>,
    ticker:      Ticker<C, ClockFace>,
    queue:       MessageQueue<TickMsg>,
    clear_color: Color,

    draw_list:       DrawList,
    line_renderer:   LineRenderer,
    circle_renderer: CircleRenderer,
}

impl<C: WallClock> ClockAppState<C> {
    fn new(app: ClockApp<C>) -> Self {
        Self {
            face:            Rc::new(RefCell::new(ClockFace::new(app.style))),
            ticker:          Ticker::new(app.clock),
            queue:           MessageQueue::new(),
            clear_color:     app.clear_color,
            draw_list:       DrawList::new(),
            line_renderer:   LineRenderer::new(),
            circle_renderer: CircleRenderer::new(),
        }
    }
}

/// Records the face centered in a `width x height` area.
///
/// Returns `false` (and records nothing) when there is nothing to draw.
/// Either way the face's current state counts as presented.
fn record_face(face: &mut ClockFace, width: f32, height: f32, list: &mut DrawList) -> bool {
    let geometry = face.layout(width, height);
    let plan = face.draw();
    face.clear_dirty();

    let Some(plan) = plan else {
        return false;
    };

    let inset = Vec2::new((width - geometry.side) / 2.0, (height - geometry.side) / 2.0);
    plan.offset(inset).record(face.style(), list);
    true
}

impl<C: WallClock + 'static> EngineApp for ClockAppState<C> {
    fn on_resumed(&mut self, now: Instant, _runtime: &mut RuntimeCtx) {
        self.ticker.start(&self.face, &mut self.queue, now);
    }

    fn on_resize(&mut self, width: f32, height: f32) {
        self.face.borrow_mut().layout(width, height);
    }

    fn next_wakeup(&self) -> Option<Instant> {
        self.queue.next_deadline()
    }

    fn on_wakeup(&mut self, now: Instant, runtime: &mut RuntimeCtx) {
        for msg in self.queue.take_due(now) {
            match self.ticker.handle(msg, &mut self.queue, now) {
                TickOutcome::Redraw => runtime.request_redraw(),
                TickOutcome::Stopped | TickOutcome::Skipped | TickOutcome::Detached => {}
            }
        }

        // Anything that changed the face since the last frame, not just ticks.
        if self.face.borrow().is_dirty() {
            runtime.request_redraw();
        }
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::Escape) =>
            {
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }

    fn on_exiting(&mut self) {
        self.ticker.stop(&mut self.queue);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let (w, h) = ctx.window.logical_size();

        self.draw_list.clear();
        if !record_face(&mut self.face.borrow_mut(), w, h, &mut self.draw_list) {
            log::trace!("face not drawable at {w}x{h}; clearing only");
        }

        let dl  = &mut self.draw_list;
        let r_l = &mut self.line_renderer;
        let r_c = &mut self.circle_renderer;

        ctx.render(self.clear_color, |rctx, target| {
            r_l.render(rctx, target, dl);
            r_c.render(rctx, target, dl);
        })
    }
}
