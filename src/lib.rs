//! Draggable window panels confined to a bounding box.
//!
//! The core is headless: a [`Boundary`] owns a set of windows, their stacking
//! order and the timers and listeners their pointer sessions need. Hosts feed
//! it [`PointerEvent`]s, call [`Boundary::advance`] as time passes and draw the
//! [`WindowView`]s it hands back. The `app` module hosts the demo page in a
//! terminal on top of `crossterm` and `ratatui`.

pub mod app;
pub mod boundary;
pub mod config;
pub mod constants;
pub mod debug_log;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod geometry;
pub mod input;
pub mod listeners;
pub mod notify;
pub mod pad;
pub mod registry;
pub mod render;
pub mod scene;
pub mod session;
pub mod state;
pub mod timer;
pub mod tracing_sub;
pub mod ui;
pub mod window;

pub use boundary::{Boundary, BoundaryContext, Haptics, NoHaptics};
pub use error::{AppError, BoundaryError, ConfigError, NotifyError, SceneError};
pub use geometry::{Bounds, Point, Size, clamp};
pub use input::{MouseButton, PointerEvent, PointerId, PointerKind, PointerPhase};
pub use notify::{PopupConfig, PopupId, PopupStack};
pub use pad::{PadSlot, PadSpec};
pub use registry::ZOrderRegistry;
pub use scene::{Action, MountedScene, Node, Scene};
pub use session::{SessionConfig, SessionOutcome, SessionPhase};
pub use window::{Window, WindowId, WindowSpec, WindowView};
