//! The container that owns a group of windows.
//!
//! A `Boundary` owns the stacking registry, the promotion timers, the global
//! listener table and the windows themselves. Windows never hold on to any of
//! it: each call hands them a [`BoundaryContext`] borrowed for that call
//! only, so several boundaries can live side by side without sharing state.
//!
//! Pointer dispatch has a fixed order:
//!
//! 1. **Press, capture phase**: the topmost window under the pointer is
//!    raised to the front.
//! 2. **Press, classification**: if the press landed on that window's header
//!    its session evaluates it (and may start a promotion timer).
//! 3. **Move / release**: delivered to every window holding the matching
//!    global listener, wherever the pointer is.
//!
//! Time only moves when the host calls [`Boundary::advance`].

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

use crate::constants::HAPTIC_PULSE;
use crate::error::BoundaryError;
use crate::geometry::{Bounds, Point};
use crate::input::{PointerEvent, PointerPhase};
use crate::listeners::{GlobalListeners, ListenerKind};
use crate::registry::ZOrderRegistry;
use crate::session::{SessionConfig, SessionOutcome};
use crate::timer::TimerQueue;
use crate::window::{IdAllocator, Window, WindowId, WindowSpec, WindowView};

/// Tactile feedback when a drag starts.
pub trait Haptics: fmt::Debug {
    fn pulse(&mut self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn pulse(&mut self, _duration: Duration) {}
}

/// What a boundary exposes to the windows beneath it for the length of one
/// call: its current rectangle and the shared stacking order.
pub struct BoundaryContext<'a> {
    pub(crate) registry: &'a mut ZOrderRegistry<WindowId>,
    pub(crate) timers: &'a mut TimerQueue<WindowId>,
    pub(crate) listeners: &'a mut GlobalListeners<WindowId>,
    pub(crate) bounds: Option<Bounds>,
    pub(crate) config: SessionConfig,
}

impl<'a> BoundaryContext<'a> {
    pub(crate) fn new(
        registry: &'a mut ZOrderRegistry<WindowId>,
        timers: &'a mut TimerQueue<WindowId>,
        listeners: &'a mut GlobalListeners<WindowId>,
        bounds: Option<Bounds>,
        config: SessionConfig,
    ) -> Self {
        Self {
            registry,
            timers,
            listeners,
            bounds,
            config,
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn register(&mut self, id: WindowId) -> bool {
        self.registry.register(id)
    }

    pub fn unregister(&mut self, id: WindowId) -> bool {
        self.registry.unregister(id)
    }

    pub fn bring_to_front(&mut self, id: WindowId) -> bool {
        self.registry.bring_to_front(id)
    }

    pub fn order(&self) -> &[WindowId] {
        self.registry.order()
    }
}

pub struct Boundary {
    ids: IdAllocator,
    registry: ZOrderRegistry<WindowId>,
    timers: TimerQueue<WindowId>,
    listeners: GlobalListeners<WindowId>,
    windows: BTreeMap<WindowId, Window>,
    bounds: Option<Bounds>,
    config: SessionConfig,
    haptics: Box<dyn Haptics>,
}

impl fmt::Debug for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Boundary")
            .field("order", &self.registry.order())
            .field("bounds", &self.bounds)
            .field("windows", &self.windows.len())
            .field("pending_timers", &self.timers.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for Boundary {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Boundary {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            ids: IdAllocator::default(),
            registry: ZOrderRegistry::new(),
            timers: TimerQueue::new(),
            listeners: GlobalListeners::new(),
            windows: BTreeMap::new(),
            bounds: None,
            config,
            haptics: Box::new(NoHaptics),
        }
    }

    pub fn with_haptics(mut self, haptics: Box<dyn Haptics>) -> Self {
        self.haptics = haptics;
        self
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Update the container rectangle. Hosts call this on every layout pass;
    /// `None` means geometry is unavailable and drags go unclamped.
    pub fn set_bounds(&mut self, bounds: Option<Bounds>) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Viewport position of the boundary's top-left corner.
    pub fn origin(&self) -> Point {
        self.bounds.map(|b| b.origin()).unwrap_or(Point::ORIGIN)
    }

    /// Borrow the container contract directly.
    pub fn context(&mut self) -> BoundaryContext<'_> {
        BoundaryContext::new(
            &mut self.registry,
            &mut self.timers,
            &mut self.listeners,
            self.bounds,
            self.config,
        )
    }

    fn parts(
        &mut self,
    ) -> (
        &mut BTreeMap<WindowId, Window>,
        BoundaryContext<'_>,
        &mut dyn Haptics,
    ) {
        let Self {
            registry,
            timers,
            listeners,
            windows,
            bounds,
            config,
            haptics,
            ..
        } = self;
        (
            windows,
            BoundaryContext::new(registry, timers, listeners, *bounds, *config),
            haptics.as_mut(),
        )
    }

    pub fn mount(&mut self, spec: WindowSpec) -> WindowId {
        let id = self.ids.allocate();
        let (windows, mut ctx, _) = self.parts();
        let window = Window::mount(id, spec, &mut ctx);
        windows.insert(id, window);
        id
    }

    /// Remove a window, releasing its stacking slot, pending timer and global
    /// listeners whatever state its session is in.
    pub fn unmount(&mut self, id: WindowId) -> Result<(), BoundaryError> {
        let (windows, mut ctx, _) = self.parts();
        let mut window = windows
            .remove(&id)
            .ok_or(BoundaryError::UnknownWindow(id))?;
        window.unmount(&mut ctx);
        Ok(())
    }

    pub fn window(&self, id: WindowId) -> Result<&Window, BoundaryError> {
        self.windows.get(&id).ok_or(BoundaryError::UnknownWindow(id))
    }

    pub fn windows(&self) -> impl Iterator<Item = &Window> {
        self.windows.values()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn order(&self) -> &[WindowId] {
        self.registry.order()
    }

    pub fn z_index(&self, id: WindowId) -> usize {
        self.registry.z_index(id)
    }

    pub fn bring_to_front(&mut self, id: WindowId) -> Result<bool, BoundaryError> {
        if !self.windows.contains_key(&id) {
            return Err(BoundaryError::UnknownWindow(id));
        }
        Ok(self.registry.bring_to_front(id))
    }

    /// Topmost window whose frame contains `point` (viewport coordinates).
    /// Parts of a window hanging outside the boundary rect are clipped and
    /// never hit.
    pub fn window_at(&self, point: Point) -> Option<WindowId> {
        if let Some(bounds) = self.bounds
            && !bounds.is_degenerate()
            && !bounds.contains(point)
        {
            return None;
        }
        let origin = self.origin();
        self.registry.order().iter().rev().copied().find(|id| {
            self.windows
                .get(id)
                .is_some_and(|w| w.frame(origin).contains(point))
        })
    }

    /// Feed one pointer event. Returns `true` when the event was consumed by
    /// a window of this boundary.
    pub fn handle_pointer(&mut self, event: &PointerEvent, now: Instant) -> bool {
        match event.phase {
            PointerPhase::Down => self.dispatch_press(event, now),
            PointerPhase::Move => self.dispatch_global(
                event,
                &[ListenerKind::PreDragMove, ListenerKind::DragMove],
            ),
            PointerPhase::Up | PointerPhase::Cancel => {
                self.dispatch_global(event, &[ListenerKind::Release])
            }
        }
    }

    fn dispatch_press(&mut self, event: &PointerEvent, now: Instant) -> bool {
        let Some(target) = self.window_at(event.position) else {
            return false;
        };
        let origin = self.origin();
        let (windows, mut ctx, _) = self.parts();
        let Some(window) = windows.get_mut(&target) else {
            return false;
        };
        window.raise(&mut ctx);
        if window.header(origin).contains(event.position) {
            window.press(event, now, &mut ctx);
        }
        true
    }

    fn dispatch_global(&mut self, event: &PointerEvent, kinds: &[ListenerKind]) -> bool {
        let owners = self.listeners.owners(kinds);
        if owners.is_empty() {
            return false;
        }
        let (windows, mut ctx, _) = self.parts();
        let mut consumed = false;
        for owner in owners {
            let Some(window) = windows.get_mut(&owner) else {
                // A listener without a window would be a leak; drop it.
                tracing::warn!(window_id = %owner, "listener outlived its window");
                ctx.listeners.uninstall_all(owner);
                continue;
            };
            let outcome = if event.is_release() {
                window.global_release(event, &mut ctx)
            } else {
                window.global_move(event, &mut ctx)
            };
            consumed |= outcome != SessionOutcome::Ignored;
        }
        consumed
    }

    /// Fire every promotion timer due at `now`. Returns how many windows
    /// started dragging.
    pub fn advance(&mut self, now: Instant) -> usize {
        let due = self.timers.take_due(now);
        if due.is_empty() {
            return 0;
        }
        let (windows, mut ctx, haptics) = self.parts();
        let mut promoted = 0;
        for (handle, owner) in due {
            let Some(window) = windows.get_mut(&owner) else {
                continue;
            };
            if window.promote(handle, &mut ctx) == SessionOutcome::Promoted {
                haptics.pulse(HAPTIC_PULSE);
                promoted += 1;
            }
        }
        promoted
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Views in stacking order, back to front.
    pub fn views(&self) -> Vec<WindowView> {
        let mut views: Vec<WindowView> = self
            .windows
            .values()
            .map(|w| w.view(&self.registry))
            .collect();
        views.sort_by_key(|view| (view.z_index, view.id));
        views
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Owned stand-ins for a boundary's shared state, for exercising the
    /// session on its own.
    pub(crate) struct Harness {
        pub registry: ZOrderRegistry<WindowId>,
        pub timers: TimerQueue<WindowId>,
        pub listeners: GlobalListeners<WindowId>,
        pub bounds: Option<Bounds>,
        pub config: SessionConfig,
    }

    impl Harness {
        pub fn new() -> Self {
            Self {
                registry: ZOrderRegistry::new(),
                timers: TimerQueue::new(),
                listeners: GlobalListeners::new(),
                bounds: None,
                config: SessionConfig::default(),
            }
        }

        pub fn ctx(&mut self) -> BoundaryContext<'_> {
            BoundaryContext::new(
                &mut self.registry,
                &mut self.timers,
                &mut self.listeners,
                self.bounds,
                self.config,
            )
        }
    }

    #[derive(Debug, Default)]
    struct CountingHaptics(Rc<Cell<u32>>);

    impl Haptics for CountingHaptics {
        fn pulse(&mut self, _duration: Duration) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn boundary() -> Boundary {
        let mut b = Boundary::default();
        b.set_bounds(Some(Bounds::new(0, 0, 80, 24)));
        b
    }

    #[test]
    fn press_on_body_raises_without_session() {
        let mut b = boundary();
        let back = b.mount(WindowSpec::new("a").with_size(20, 8).at(0, 0));
        let front = b.mount(WindowSpec::new("b").with_size(20, 8).at(30, 0));
        assert_eq!(b.order(), &[back, front]);

        let t0 = Instant::now();
        assert!(b.handle_pointer(&PointerEvent::mouse_down(5, 5), t0));
        assert_eq!(b.order(), &[front, back]);
        assert_eq!(b.pending_timers(), 0);
        assert_eq!(b.advance(t0 + ms(200)), 0);
    }

    #[test]
    fn press_outside_windows_is_not_consumed() {
        let mut b = boundary();
        b.mount(WindowSpec::new("a").with_size(10, 5).at(0, 0));
        assert!(!b.handle_pointer(&PointerEvent::mouse_down(50, 20), Instant::now()));
    }

    #[test]
    fn press_on_clipped_part_of_window_is_ignored() {
        let mut b = boundary();
        let hanging = b.mount(WindowSpec::new("b").with_size(20, 8).at(70, 0));
        let other = b.mount(WindowSpec::new("a").with_size(20, 8).at(0, 0));
        let t0 = Instant::now();

        assert_eq!(b.window_at(Point::new(85, 1)), None);
        assert!(!b.handle_pointer(&PointerEvent::mouse_down(85, 1), t0));
        assert_eq!(b.order(), &[hanging, other]);
        assert_eq!(b.pending_timers(), 0);
        assert_eq!(b.advance(t0 + ms(100)), 0);

        assert_eq!(b.window_at(Point::new(75, 1)), Some(hanging));
    }

    #[test]
    fn overlapping_press_hits_topmost() {
        let mut b = boundary();
        let under = b.mount(WindowSpec::new("a").with_size(20, 8).at(0, 0));
        let over = b.mount(WindowSpec::new("b").with_size(20, 8).at(5, 0));
        assert_eq!(b.window_at(Point::new(8, 3)), Some(over));
        assert_eq!(b.window_at(Point::new(2, 3)), Some(under));
    }

    #[test]
    fn header_press_held_drags_and_pulses() {
        let pulses = Rc::new(Cell::new(0));
        let mut b = boundary().with_haptics(Box::new(CountingHaptics(pulses.clone())));
        let id = b.mount(WindowSpec::new("a").with_size(20, 8).at(10, 4));
        let t0 = Instant::now();

        b.handle_pointer(&PointerEvent::mouse_down(12, 4), t0);
        assert_eq!(b.next_deadline(), Some(t0 + ms(100)));
        assert_eq!(b.advance(t0 + ms(100)), 1);
        assert_eq!(pulses.get(), 1);
        assert!(b.window(id).expect("mounted").is_dragging());

        assert!(b.handle_pointer(&PointerEvent::mouse_move(30, 10), t0 + ms(120)));
        let w = b.window(id).expect("mounted");
        assert_eq!(w.position(), Point::new(28, 10));

        b.handle_pointer(&PointerEvent::mouse_up(30, 10), t0 + ms(130));
        assert!(!b.window(id).expect("mounted").is_dragging());
        assert_eq!(b.listener_count(), 0);
    }

    #[test]
    fn unmount_mid_drag_releases_everything() {
        let mut b = boundary();
        let doomed = b.mount(WindowSpec::new("a").with_size(20, 8).at(0, 0));
        let survivor = b.mount(WindowSpec::new("b").with_size(20, 8).at(40, 10));
        let t0 = Instant::now();

        b.handle_pointer(&PointerEvent::mouse_down(2, 0), t0);
        b.advance(t0 + ms(100));
        assert!(b.listener_count() > 0);

        b.unmount(doomed).expect("mounted");
        assert_eq!(b.listener_count(), 0);
        assert_eq!(b.pending_timers(), 0);
        assert_eq!(b.order(), &[survivor]);

        assert!(!b.handle_pointer(&PointerEvent::mouse_move(70, 20), t0 + ms(150)));
        assert_eq!(
            b.window(survivor).expect("mounted").position(),
            Point::new(40, 10)
        );
        assert_eq!(
            b.unmount(doomed),
            Err(BoundaryError::UnknownWindow(doomed))
        );
    }

    #[test]
    fn unmount_while_pressed_cancels_timer() {
        let mut b = boundary();
        let id = b.mount(WindowSpec::new("a").with_size(20, 8).at(0, 0));
        let t0 = Instant::now();
        b.handle_pointer(&PointerEvent::touch_start(1, 3, 1), t0);
        assert_eq!(b.pending_timers(), 1);
        b.unmount(id).expect("mounted");
        assert_eq!(b.pending_timers(), 0);
        assert_eq!(b.advance(t0 + ms(500)), 0);
    }

    #[test]
    fn views_are_back_to_front() {
        let mut b = boundary();
        let a = b.mount(WindowSpec::new("a").with_size(4, 4).at(0, 0));
        let c = b.mount(WindowSpec::new("c").with_size(4, 4).at(10, 0));
        b.bring_to_front(a).expect("mounted");
        let ids: Vec<WindowId> = b.views().iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![c, a]);
        assert_eq!(b.views()[1].z_index, 1);
    }

    #[test]
    fn context_exposes_bounds_and_order() {
        let mut b = boundary();
        let a = b.mount(WindowSpec::new("a"));
        let ctx = b.context();
        assert_eq!(ctx.bounds(), Some(Bounds::new(0, 0, 80, 24)));
        assert_eq!(ctx.order(), &[a]);
    }
}
