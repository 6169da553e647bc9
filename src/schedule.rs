//! Frame scheduling.
//!
//! The render loop never calls a platform "next frame" primitive itself. It asks
//! a [`FrameScheduler`] for the next refresh tick and the host calls back into
//! [`Context::animate`](crate::context::Context::animate) when that tick arrives.

use std::{cell::Cell, sync::Arc};

use winit::window::Window;

pub trait FrameScheduler {
    /// Request one callback on the host's next refresh tick.
    fn request_frame(&self);
}

/// Schedules through winit, which maps to `requestAnimationFrame` on the web.
#[derive(Clone, Debug)]
pub struct WindowScheduler {
    window: Arc<Window>,
}

impl WindowScheduler {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl FrameScheduler for WindowScheduler {
    fn request_frame(&self) {
        self.window.request_redraw();
    }
}

/// Records requests without a display. The caller decides when a tick happens.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    requested: Cell<u64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of frames requested so far.
    pub fn requested(&self) -> u64 {
        self.requested.get()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self) {
        self.requested.set(self.requested.get() + 1);
    }
}
