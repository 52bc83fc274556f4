pub mod decorator;

use std::fmt;
use std::time::Instant;

use crate::boundary::BoundaryContext;
use crate::constants::{
    DEFAULT_WINDOW_POSITION, DEFAULT_WINDOW_SIZE, DEFAULT_WINDOW_TITLE, HEADER_ROWS,
};
use crate::geometry::{Bounds, Point, Size};
use crate::input::PointerEvent;
use crate::registry::ZOrderRegistry;
use crate::session::{PointerSession, SessionOutcome};
use crate::timer::TimerHandle;

/// Identity of a mounted window. Allocated by its boundary and never reused
/// there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u64);

impl WindowId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

#[derive(Debug, Default)]
pub(crate) struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub(crate) fn allocate(&mut self) -> WindowId {
        self.next += 1;
        WindowId(self.next)
    }
}

/// Everything needed to mount a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    pub title: String,
    pub size: Size,
    /// Initial origin, relative to the boundary.
    pub position: Point,
    pub content: String,
}

impl Default for WindowSpec {
    fn default() -> Self {
        Self {
            title: DEFAULT_WINDOW_TITLE.to_string(),
            size: DEFAULT_WINDOW_SIZE,
            position: DEFAULT_WINDOW_POSITION,
            content: String::new(),
        }
    }
}

impl WindowSpec {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.size = Size::new(width, height);
        self
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = Point::new(x, y);
        self
    }
}

/// Render-ready snapshot of one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowView {
    pub id: WindowId,
    pub title: String,
    pub content: String,
    /// Origin relative to the boundary.
    pub position: Point,
    pub size: Size,
    pub z_index: usize,
    pub is_dragging: bool,
}

impl WindowView {
    /// Frame in viewport coordinates for a boundary whose origin is `origin`.
    pub fn frame(&self, origin: Point) -> Bounds {
        Bounds::from_origin_size(origin + self.position, self.size)
    }
}

#[derive(Debug)]
pub struct Window {
    id: WindowId,
    title: String,
    content: String,
    size: Size,
    position: Point,
    session: PointerSession,
}

impl Window {
    pub(crate) fn mount(id: WindowId, spec: WindowSpec, ctx: &mut BoundaryContext<'_>) -> Self {
        ctx.register(id);
        tracing::debug!(window_id = %id, title = %spec.title, "window mounted");
        Self {
            id,
            title: spec.title,
            content: spec.content,
            size: spec.size,
            position: spec.position,
            session: PointerSession::new(id),
        }
    }

    /// Release everything this window holds in the boundary. Safe to call
    /// in any session phase.
    pub(crate) fn unmount(&mut self, ctx: &mut BoundaryContext<'_>) {
        self.session.abort(ctx);
        ctx.unregister(self.id);
        tracing::debug!(window_id = %self.id, "window unmounted");
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn session(&self) -> &PointerSession {
        &self.session
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_dragging()
    }

    pub fn frame(&self, origin: Point) -> Bounds {
        Bounds::from_origin_size(origin + self.position, self.size)
    }

    /// The drag handle: the top rows of the frame.
    pub fn header(&self, origin: Point) -> Bounds {
        let rows = HEADER_ROWS.min(self.size.height);
        Bounds::from_origin_size(origin + self.position, Size::new(self.size.width, rows))
    }

    /// Capture phase of a press: runs before the press is classified.
    pub(crate) fn raise(&self, ctx: &mut BoundaryContext<'_>) -> bool {
        ctx.bring_to_front(self.id)
    }

    pub(crate) fn press(
        &mut self,
        event: &PointerEvent,
        now: Instant,
        ctx: &mut BoundaryContext<'_>,
    ) -> SessionOutcome {
        self.session.press(event, now, ctx)
    }

    pub(crate) fn promote(
        &mut self,
        handle: TimerHandle,
        ctx: &mut BoundaryContext<'_>,
    ) -> SessionOutcome {
        self.session.promote(handle, self.position, ctx)
    }

    pub(crate) fn global_move(
        &mut self,
        event: &PointerEvent,
        ctx: &mut BoundaryContext<'_>,
    ) -> SessionOutcome {
        let outcome = self.session.pointer_move(event, ctx);
        if let SessionOutcome::Moved(position) = outcome {
            self.position = position;
        }
        outcome
    }

    pub(crate) fn global_release(
        &mut self,
        event: &PointerEvent,
        ctx: &mut BoundaryContext<'_>,
    ) -> SessionOutcome {
        self.session.release(event, ctx)
    }

    pub fn view(&self, registry: &ZOrderRegistry<WindowId>) -> WindowView {
        WindowView {
            id: self.id,
            title: self.title.clone(),
            content: self.content.clone(),
            position: self.position,
            size: self.size,
            z_index: registry.z_index(self.id),
            is_dragging: self.is_dragging(),
        }
    }
}
