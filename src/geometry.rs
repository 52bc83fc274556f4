//! Points, sizes and the container clamp.
//!
//! Coordinates are signed so a window dragged against the container edge can
//! keep a negative origin without wrapping. Sizes stay unsigned, matching the
//! way floating rectangles are stored elsewhere in the crate.

use std::ops::{Add, Sub};

use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Per-axis absolute distance to `other`.
    pub fn abs_diff(self, other: Point) -> (u32, u32) {
        (self.x.abs_diff(other.x), self.y.abs_diff(other.y))
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point {
            x: self.x.saturating_add(rhs.x),
            y: self.y.saturating_add(rhs.y),
        }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point {
            x: self.x.saturating_sub(rhs.x),
            y: self.y.saturating_sub(rhs.y),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Edge coordinates of a rectangle in viewport space. `right` and `bottom`
/// are `left + width` and `top + height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x.saturating_add(i32::from(size.width)),
            bottom: origin.y.saturating_add(i32::from(size.height)),
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Zero (or negative) extent on either axis.
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        !self.is_degenerate()
            && point.x >= self.left
            && point.x < self.right
            && point.y >= self.top
            && point.y < self.bottom
    }

    /// Intersect with an unsigned terminal rectangle, returning the visible
    /// part as a `Rect` (or `None` when nothing overlaps).
    pub fn visible_in(&self, area: Rect) -> Option<Rect> {
        let area = Bounds::from(area);
        let left = self.left.max(area.left);
        let top = self.top.max(area.top);
        let right = self.right.min(area.right);
        let bottom = self.bottom.min(area.bottom);
        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect {
            x: u16::try_from(left).ok()?,
            y: u16::try_from(top).ok()?,
            width: u16::try_from(right - left).ok()?,
            height: u16::try_from(bottom - top).ok()?,
        })
    }
}

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        Bounds {
            left: i32::from(rect.x),
            top: i32::from(rect.y),
            right: i32::from(rect.x) + i32::from(rect.width),
            bottom: i32::from(rect.y) + i32::from(rect.height),
        }
    }
}

/// Constrain `point` to `bounds`, edges inclusive.
///
/// Missing or degenerate bounds leave the point untouched: layout geometry
/// that is not available yet must never stop a drag.
pub fn clamp(point: Point, bounds: Option<Bounds>) -> Point {
    let Some(bounds) = bounds else {
        return point;
    };
    if bounds.is_degenerate() {
        return point;
    }
    Point {
        x: bounds.left.max(point.x.min(bounds.right)),
        y: bounds.top.max(point.y.min(bounds.bottom)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: Bounds = Bounds::new(0, 0, 100, 50);

    #[test]
    fn clamp_pulls_outside_point_to_nearest_edge() {
        assert_eq!(clamp(Point::new(150, -10), Some(RECT)), Point::new(100, 0));
        assert_eq!(clamp(Point::new(-3, 70), Some(RECT)), Point::new(0, 50));
    }

    #[test]
    fn clamp_keeps_inside_point() {
        assert_eq!(clamp(Point::new(40, 20), Some(RECT)), Point::new(40, 20));
        // edges are inclusive
        assert_eq!(clamp(Point::new(100, 50), Some(RECT)), Point::new(100, 50));
    }

    #[test]
    fn clamp_is_idempotent() {
        let rects = [
            RECT,
            Bounds::new(-20, 5, 7, 9),
            Bounds::new(10, 10, 11, 11),
        ];
        for rect in rects {
            for x in (-40..=140).step_by(7) {
                for y in (-40..=90).step_by(9) {
                    let once = clamp(Point::new(x, y), Some(rect));
                    assert_eq!(clamp(once, Some(rect)), once, "rect {rect:?} x {x} y {y}");
                }
            }
        }
    }

    #[test]
    fn clamp_skips_missing_or_degenerate_bounds() {
        let p = Point::new(-500, 900);
        assert_eq!(clamp(p, None), p);
        assert_eq!(clamp(p, Some(Bounds::new(10, 10, 10, 40))), p);
        assert_eq!(clamp(p, Some(Bounds::new(10, 10, 40, 10))), p);
    }

    #[test]
    fn bounds_from_rect_and_contains() {
        let b = Bounds::from(Rect {
            x: 2,
            y: 3,
            width: 4,
            height: 2,
        });
        assert_eq!(b, Bounds::new(2, 3, 6, 5));
        assert!(b.contains(Point::new(2, 3)));
        assert!(b.contains(Point::new(5, 4)));
        assert!(!b.contains(Point::new(6, 4)));
        assert!(!Bounds::new(0, 0, 0, 5).contains(Point::ORIGIN));
    }

    #[test]
    fn visible_in_clips_negative_origin() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 10,
            height: 10,
        };
        let b = Bounds::new(-3, 8, 4, 14);
        assert_eq!(
            b.visible_in(area),
            Some(Rect {
                x: 0,
                y: 8,
                width: 4,
                height: 2
            })
        );
        assert_eq!(Bounds::new(20, 20, 30, 30).visible_in(area), None);
    }
}
