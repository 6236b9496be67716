// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn drag_reports_deltas_between_moves() {
    let mut drag = DragState::default();
    drag.begin(7, Vec2::new(10.0, 20.0));

    assert_eq!(drag.move_to(7, Vec2::new(15.0, 18.0)), Some(Vec2::new(5.0, -2.0)));
    assert_eq!(drag.move_to(7, Vec2::new(15.0, 28.0)), Some(Vec2::new(0.0, 10.0)));
}

#[test]
fn moves_without_a_drag_are_ignored() {
    let mut drag = DragState::default();
    assert_eq!(drag.move_to(1, Vec2::new(3.0, 4.0)), None);
}

#[test]
fn other_pointers_do_not_steer_the_drag() {
    let mut drag = DragState::default();
    drag.begin(1, Vec2::ZERO);

    assert_eq!(drag.move_to(2, Vec2::new(50.0, 50.0)), None);
    assert!(!drag.end(2));
    assert!(drag.active);
    // The ignored move did not shift the anchor.
    assert_eq!(drag.move_to(1, Vec2::new(1.0, 1.0)), Some(Vec2::new(1.0, 1.0)));
}

#[test]
fn ending_a_drag_stops_deltas() {
    let mut drag = DragState::default();
    drag.begin(3, Vec2::ZERO);

    assert!(drag.end(3));
    assert!(!drag.active);
    assert_eq!(drag.move_to(3, Vec2::new(4.0, 4.0)), None);
    assert!(!drag.end(3));
}

#[test]
fn wheel_pixels_pass_through() {
    assert_eq!(wheel_delta_px(120.0, 0), 120.0);
    assert_eq!(wheel_delta_px(-4.5, 0), -4.5);
}

#[test]
fn wheel_lines_and_pages_scale_to_pixels() {
    assert_eq!(wheel_delta_px(3.0, 1), 99.0);
    assert_eq!(wheel_delta_px(-1.0, 2), -800.0);
}
