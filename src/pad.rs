//! A window parked in a sized slot.
//!
//! The slot takes `size` worth of room in the page flow so the content after
//! it does not slide underneath. The window it holds starts at `offset` from
//! the slot's top-left corner and is otherwise an ordinary window of the
//! boundary: free to be dragged anywhere inside it.

use crate::boundary::Boundary;
use crate::constants::DEFAULT_PAD_SIZE;
use crate::geometry::{Bounds, Point, Size};
use crate::window::{WindowId, WindowSpec};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PadSpec {
    pub size: Size,
    pub offset: Point,
    pub title: Option<String>,
    pub content: String,
}

impl Default for PadSpec {
    fn default() -> Self {
        Self {
            size: DEFAULT_PAD_SIZE,
            offset: Point::ORIGIN,
            title: None,
            content: String::new(),
        }
    }
}

impl PadSpec {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.size = Size::new(width, height);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.offset = Point::new(x, y);
        self
    }

    /// The window this pad holds when its slot starts at `slot_origin`
    /// (boundary-relative). The window is as large as the slot.
    pub fn window_spec(&self, slot_origin: Point) -> WindowSpec {
        let mut spec = WindowSpec::new(self.content.clone())
            .with_size(self.size.width, self.size.height);
        if let Some(title) = &self.title {
            spec = spec.with_title(title.clone());
        }
        spec.position = slot_origin + self.offset;
        spec
    }

    pub fn mount(&self, boundary: &mut Boundary, slot_origin: Point) -> PadSlot {
        let window = boundary.mount(self.window_spec(slot_origin));
        PadSlot {
            window,
            slot: Bounds::from_origin_size(slot_origin, self.size),
        }
    }
}

/// A mounted pad: the reserved slot (boundary-relative) and its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadSlot {
    pub window: WindowId,
    pub slot: Bounds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_starts_at_slot_plus_offset() {
        let pad = PadSpec::new("I am on a Pad").with_size(30, 8).at(2, 1);
        let spec = pad.window_spec(Point::new(0, 5));
        assert_eq!(spec.position, Point::new(2, 6));
        assert_eq!(spec.size, Size::new(30, 8));
        assert_eq!(spec.content, "I am on a Pad");
    }

    #[test]
    fn mount_reserves_slot_and_registers_window() {
        let mut b = Boundary::default();
        let slot = PadSpec::default().mount(&mut b, Point::new(0, 3));
        assert_eq!(slot.slot, Bounds::new(0, 3, 300, 203));
        assert_eq!(b.order(), &[slot.window]);
        let w = b.window(slot.window).expect("mounted");
        assert_eq!(w.position(), Point::new(0, 3));
        assert_eq!(w.title(), "Window");
    }
}
