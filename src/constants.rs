//! Shared crate-wide constants.

use std::time::Duration;

use crate::geometry::{Point, Size};

/// How long a press must be held, without disqualifying movement, before it
/// is promoted to a drag.
pub const PROMOTION_DELAY: Duration = Duration::from_millis(100);

/// Largest per-axis movement tolerated before promotion. Moving further than
/// this (strictly greater) turns the press into a plain click.
///
/// Units: the host's pointer units (pixels on the web, cells in a terminal).
pub const JITTER_THRESHOLD: u32 = 3;

/// Length of the haptic pulse emitted when a drag starts.
pub const HAPTIC_PULSE: Duration = Duration::from_millis(50);

pub const DEFAULT_WINDOW_SIZE: Size = Size::new(300, 200);
pub const DEFAULT_WINDOW_POSITION: Point = Point::new(100, 100);
pub const DEFAULT_WINDOW_TITLE: &str = "Window";

/// Rows at the top of a window frame that act as its drag handle: the top
/// border plus the title row.
pub const HEADER_ROWS: u16 = 2;

pub const DEFAULT_PAD_SIZE: Size = Size::new(300, 200);

/// How long a popup stays before it starts leaving.
pub const POPUP_HOLD: Duration = Duration::from_secs(5);

/// Length of the exit animation; the entry is dropped once it ends.
pub const POPUP_EXIT: Duration = Duration::from_millis(300);

/// Most popups shown at once (exiting ones excluded).
pub const POPUP_MAX_VISIBLE: usize = 4;
