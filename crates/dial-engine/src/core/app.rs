use std::time::Instant;

use winit::event::WindowEvent;

use crate::window::RuntimeCtx;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Every callback runs on the event-loop thread, so implementations may hold
/// `Rc`/`RefCell` state without locking. Nothing is redrawn unless the app
/// asks for it through [`RuntimeCtx::request_redraw`] (or the OS exposes or
/// resizes the window).
pub trait App {
    /// Called once the window and GPU context exist.
    fn on_resumed(&mut self, now: Instant, runtime: &mut RuntimeCtx) {
        let _ = (now, runtime);
    }

    /// Measurement pass: the drawable area changed (logical pixels).
    ///
    /// Also called once before [`on_resumed`](Self::on_resumed). A minimized
    /// window reports `0 x 0`.
    fn on_resize(&mut self, width: f32, height: f32) {
        let _ = (width, height);
    }

    /// Earliest instant the app wants [`on_wakeup`](Self::on_wakeup) called.
    fn next_wakeup(&self) -> Option<Instant> {
        None
    }

    /// Called on the event-loop thread once `next_wakeup()` has passed.
    fn on_wakeup(&mut self, now: Instant, runtime: &mut RuntimeCtx) {
        let _ = (now, runtime);
    }

    /// Called for every window event before the runtime handles it.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once when the event loop is shutting down, before the window is dropped.
    fn on_exiting(&mut self) {}

    /// Called for each redraw of the window.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
