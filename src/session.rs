//! Per-window pointer state machine.
//!
//! ```text
//! Idle --press--> Pressed --timer--> Dragging
//!   ^               |  \                |
//!   |            jitter  `-- release ---+--> Idle
//!   |               v
//!   |       Pressed (timer cancelled: a click)
//! ```
//!
//! A press records where it happened and schedules a promotion timer. If the
//! pointer stays within the jitter threshold until the timer fires, the
//! session becomes a drag and freezes the offset between the pointer and the
//! window origin. Moving too far first cancels the timer, so the press ends
//! as a click. A release or cancel of the active pointer always returns to
//! idle and drops any pending timer.
//!
//! Only one pointer is tracked at a time. Events from any other pointer are
//! ignored without error.

use std::time::{Duration, Instant};

use crate::boundary::BoundaryContext;
use crate::constants::{JITTER_THRESHOLD, PROMOTION_DELAY};
use crate::geometry::{Point, clamp};
use crate::input::{PointerEvent, PointerId, PointerPhase};
use crate::listeners::ListenerKind;
use crate::timer::TimerHandle;
use crate::window::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub promotion_delay: Duration,
    pub jitter_threshold: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            promotion_delay: PROMOTION_DELAY,
            jitter_threshold: JITTER_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Pressed,
    Dragging,
}

/// What a session call did. Hosts use this to decide on side effects
/// (haptics, redraws) without re-reading the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The event was not for this session.
    Ignored,
    /// Accepted for this session, nothing observable changed.
    Unchanged,
    Pressed,
    PromotionCancelled,
    Promoted,
    Moved(Point),
    Released { was_dragging: bool },
}

#[derive(Debug, Clone)]
pub struct PointerSession {
    owner: WindowId,
    down: bool,
    dragging: bool,
    active_pointer: Option<PointerId>,
    press_position: Point,
    drag_offset: Point,
    pending_promotion: Option<TimerHandle>,
}

impl PointerSession {
    pub fn new(owner: WindowId) -> Self {
        Self {
            owner,
            down: false,
            dragging: false,
            active_pointer: None,
            press_position: Point::ORIGIN,
            drag_offset: Point::ORIGIN,
            pending_promotion: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        if self.dragging {
            SessionPhase::Dragging
        } else if self.down {
            SessionPhase::Pressed
        } else {
            SessionPhase::Idle
        }
    }

    pub fn is_down(&self) -> bool {
        self.down
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn active_pointer(&self) -> Option<PointerId> {
        self.active_pointer
    }

    pub fn press_position(&self) -> Point {
        self.press_position
    }

    pub fn drag_offset(&self) -> Point {
        self.drag_offset
    }

    pub fn pending_promotion(&self) -> Option<TimerHandle> {
        self.pending_promotion
    }

    fn owns(&self, event: &PointerEvent) -> bool {
        self.active_pointer == Some(event.pointer_id())
    }

    /// Idle -> Pressed. Ignored while another pointer is active or for
    /// non-primary mouse buttons.
    pub fn press(
        &mut self,
        event: &PointerEvent,
        now: Instant,
        ctx: &mut BoundaryContext<'_>,
    ) -> SessionOutcome {
        if event.phase != PointerPhase::Down || !event.is_primary() {
            return SessionOutcome::Ignored;
        }
        if let Some(active) = self.active_pointer {
            tracing::trace!(
                window_id = %self.owner,
                active = ?active,
                incoming = ?event.pointer_id(),
                "press ignored: pointer already active"
            );
            return SessionOutcome::Ignored;
        }
        if let Some(stale) = self.pending_promotion.take() {
            ctx.timers.cancel(stale);
        }

        self.active_pointer = Some(event.pointer_id());
        self.down = true;
        self.press_position = event.position;
        let deadline = now + ctx.config.promotion_delay;
        self.pending_promotion = Some(ctx.timers.schedule(self.owner, deadline));
        ctx.listeners.install(self.owner, ListenerKind::PreDragMove);
        ctx.listeners.install(self.owner, ListenerKind::Release);
        tracing::debug!(
            window_id = %self.owner,
            pointer = ?event.pointer_id(),
            x = event.position.x,
            y = event.position.y,
            "press"
        );
        SessionOutcome::Pressed
    }

    /// Pressed -> Dragging when `handle` is the live promotion timer.
    /// `position` is the window origin at this instant.
    pub fn promote(
        &mut self,
        handle: TimerHandle,
        position: Point,
        ctx: &mut BoundaryContext<'_>,
    ) -> SessionOutcome {
        if self.pending_promotion != Some(handle) {
            return SessionOutcome::Ignored;
        }
        self.pending_promotion = None;
        if !self.down {
            return SessionOutcome::Ignored;
        }
        self.dragging = true;
        self.drag_offset = self.press_position - position;
        ctx.listeners.uninstall(self.owner, ListenerKind::PreDragMove);
        ctx.listeners.install(self.owner, ListenerKind::DragMove);
        tracing::debug!(
            window_id = %self.owner,
            offset_x = self.drag_offset.x,
            offset_y = self.drag_offset.y,
            "drag started"
        );
        SessionOutcome::Promoted
    }

    /// Handle a global move. Before promotion this only watches for jitter;
    /// while dragging it yields the new window origin.
    pub fn pointer_move(
        &mut self,
        event: &PointerEvent,
        ctx: &mut BoundaryContext<'_>,
    ) -> SessionOutcome {
        if event.phase != PointerPhase::Move || !self.down || !self.owns(event) {
            return SessionOutcome::Ignored;
        }
        if self.dragging {
            let pointer = clamp(event.position, ctx.bounds);
            return SessionOutcome::Moved(pointer - self.drag_offset);
        }
        let Some(pending) = self.pending_promotion else {
            return SessionOutcome::Unchanged;
        };
        let (dx, dy) = event.position.abs_diff(self.press_position);
        let threshold = ctx.config.jitter_threshold;
        if dx > threshold || dy > threshold {
            ctx.timers.cancel(pending);
            self.pending_promotion = None;
            tracing::debug!(window_id = %self.owner, dx, dy, "promotion cancelled by movement");
            return SessionOutcome::PromotionCancelled;
        }
        SessionOutcome::Unchanged
    }

    /// Pressed | Dragging -> Idle on release or cancel of the active pointer.
    pub fn release(
        &mut self,
        event: &PointerEvent,
        ctx: &mut BoundaryContext<'_>,
    ) -> SessionOutcome {
        if !event.is_release() || !self.owns(event) {
            return SessionOutcome::Ignored;
        }
        let was_dragging = self.dragging;
        self.reset(ctx);
        tracing::debug!(window_id = %self.owner, was_dragging, "release");
        SessionOutcome::Released { was_dragging }
    }

    /// Drop the session unconditionally: timers, listeners and state. Used
    /// when the window goes away mid-interaction.
    pub fn abort(&mut self, ctx: &mut BoundaryContext<'_>) {
        if self.phase() != SessionPhase::Idle {
            tracing::debug!(window_id = %self.owner, phase = ?self.phase(), "session aborted");
        }
        self.reset(ctx);
        ctx.timers.cancel_owner(self.owner);
    }

    fn reset(&mut self, ctx: &mut BoundaryContext<'_>) {
        if let Some(pending) = self.pending_promotion.take() {
            ctx.timers.cancel(pending);
        }
        ctx.listeners.uninstall_all(self.owner);
        self.down = false;
        self.dragging = false;
        self.active_pointer = None;
    }
}
