//! Unified pointer events.
//!
//! Mouse and touch input arrive through the same `PointerEvent` so the
//! session logic never has to care which device produced a press. Terminal
//! hosts feed crossterm mouse events through [`PointerEvent::from_crossterm`];
//! other hosts construct events directly.

use crossterm::event::{MouseButton as CtButton, MouseEvent, MouseEventKind};

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PointerId {
    Mouse,
    Touch(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse(MouseButton),
    Touch(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub position: Point,
    pub kind: PointerKind,
    pub phase: PointerPhase,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, kind: PointerKind, x: i32, y: i32) -> Self {
        Self {
            position: Point::new(x, y),
            kind,
            phase,
        }
    }

    pub fn mouse_down(x: i32, y: i32) -> Self {
        Self::new(
            PointerPhase::Down,
            PointerKind::Mouse(MouseButton::Primary),
            x,
            y,
        )
    }

    pub fn mouse_move(x: i32, y: i32) -> Self {
        Self::new(
            PointerPhase::Move,
            PointerKind::Mouse(MouseButton::Primary),
            x,
            y,
        )
    }

    pub fn mouse_up(x: i32, y: i32) -> Self {
        Self::new(
            PointerPhase::Up,
            PointerKind::Mouse(MouseButton::Primary),
            x,
            y,
        )
    }

    pub fn touch_start(id: u64, x: i32, y: i32) -> Self {
        Self::new(PointerPhase::Down, PointerKind::Touch(id), x, y)
    }

    pub fn touch_move(id: u64, x: i32, y: i32) -> Self {
        Self::new(PointerPhase::Move, PointerKind::Touch(id), x, y)
    }

    pub fn touch_end(id: u64, x: i32, y: i32) -> Self {
        Self::new(PointerPhase::Up, PointerKind::Touch(id), x, y)
    }

    pub fn touch_cancel(id: u64, x: i32, y: i32) -> Self {
        Self::new(PointerPhase::Cancel, PointerKind::Touch(id), x, y)
    }

    pub fn pointer_id(&self) -> PointerId {
        match self.kind {
            PointerKind::Mouse(_) => PointerId::Mouse,
            PointerKind::Touch(id) => PointerId::Touch(id),
        }
    }

    /// Whether a `Down` of this event may start a session: the primary mouse
    /// button, or any touch.
    pub fn is_primary(&self) -> bool {
        matches!(
            self.kind,
            PointerKind::Mouse(MouseButton::Primary) | PointerKind::Touch(_)
        )
    }

    pub fn is_release(&self) -> bool {
        matches!(self.phase, PointerPhase::Up | PointerPhase::Cancel)
    }

    /// Translate a terminal mouse event. Scroll events have no pointer
    /// meaning here and map to `None`.
    pub fn from_crossterm(mouse: &MouseEvent) -> Option<Self> {
        let (phase, button) = match mouse.kind {
            MouseEventKind::Down(button) => (PointerPhase::Down, button),
            MouseEventKind::Up(button) => (PointerPhase::Up, button),
            MouseEventKind::Drag(button) => (PointerPhase::Move, button),
            MouseEventKind::Moved => (PointerPhase::Move, CtButton::Left),
            _ => return None,
        };
        let button = match button {
            CtButton::Left => MouseButton::Primary,
            CtButton::Right => MouseButton::Secondary,
            CtButton::Middle => MouseButton::Middle,
        };
        Some(Self::new(
            phase,
            PointerKind::Mouse(button),
            i32::from(mouse.column),
            i32::from(mouse.row),
        ))
    }
}
