use std::time::Instant;

use pad_wm::{Boundary, BoundaryError, Bounds, PointerEvent, WindowSpec, ZOrderRegistry};

#[test]
fn registry_stacking_sequence() {
    let mut z = ZOrderRegistry::new();
    for id in ["A", "B", "C"] {
        z.register(id);
    }
    assert!(z.bring_to_front("A"));
    assert_eq!(z.order(), &["B", "C", "A"]);
    assert_eq!(z.z_index("A"), 2);
    assert!(!z.bring_to_front("A"));
    assert_eq!(z.z_index("missing"), 0);
}

#[test]
fn clicking_a_window_raises_it_above_the_others() {
    let mut b = Boundary::default();
    b.set_bounds(Some(Bounds::new(0, 0, 100, 40)));
    let a = b.mount(WindowSpec::new("a").with_size(20, 10).at(0, 0));
    let c = b.mount(WindowSpec::new("c").with_size(20, 10).at(10, 5));
    let d = b.mount(WindowSpec::new("d").with_size(20, 10).at(50, 5));

    // Body click on the visible part of `a`.
    b.handle_pointer(&PointerEvent::mouse_down(2, 8), Instant::now());
    assert_eq!(b.order(), &[c, d, a]);

    let views = b.views();
    assert_eq!(views.last().unwrap().id, a);
    assert_eq!(views.last().unwrap().z_index, 2);

    // `a` is now on top where it overlaps `c`.
    assert_eq!(b.window_at(pad_wm::Point::new(15, 8)), Some(a));
}

#[test]
fn secondary_button_raises_without_a_session() {
    let mut b = Boundary::default();
    let a = b.mount(WindowSpec::new("a").with_size(20, 10).at(0, 0));
    let c = b.mount(WindowSpec::new("c").with_size(20, 10).at(30, 0));
    let press = PointerEvent::new(
        pad_wm::PointerPhase::Down,
        pad_wm::PointerKind::Mouse(pad_wm::MouseButton::Secondary),
        1,
        0,
    );
    b.handle_pointer(&press, Instant::now());
    assert_eq!(b.order(), &[c, a]);
    assert_eq!(b.pending_timers(), 0);
}

#[test]
fn unmounted_ids_are_rejected() {
    let mut b = Boundary::default();
    let a = b.mount(WindowSpec::default());
    b.unmount(a).unwrap();
    assert_eq!(b.bring_to_front(a), Err(BoundaryError::UnknownWindow(a)));
    assert!(b.order().is_empty());

    // Ids are never handed out twice.
    let again = b.mount(WindowSpec::default());
    assert_ne!(again, a);
}

#[test]
fn boundaries_do_not_share_stacking() {
    let mut left = Boundary::default();
    let mut right = Boundary::default();
    let l = left.mount(WindowSpec::default());
    let r = right.mount(WindowSpec::default());
    assert_eq!(left.order(), &[l]);
    assert_eq!(right.order(), &[r]);
}
