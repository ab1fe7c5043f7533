use std::time::Duration;

use bevy::prelude::*;

use landing::input::{PageScroll, ScrollLock, UserScrolled, ViewportSize};
use landing::page::{
    debounce_scroll, handle_snap_requests, layout_sections, page_height, run_snap_tween,
    ScrollSnapper, SectionMarker, SnapRequest, DEBOUNCE, SECTIONS, SNAP_DURATION,
};

const FRAME: Duration = Duration::from_millis(10);

/// Three sections with midpoints 100, 500 and 1200 in a 600px viewport.
fn snapping_app(offset: f32) -> App {
    let mut app = bare_snapping_app(600.0, PageScroll { offset, max: 900.0 });
    for (index, (top, height)) in [(0.0, 200.0), (300.0, 400.0), (900.0, 600.0)]
        .into_iter()
        .enumerate()
    {
        app.world_mut().spawn(SectionMarker { index, top, height });
    }
    app
}

/// The real page layout, scrolled to the bottom of an 800px viewport.
fn bottom_of_page_app() -> App {
    let viewport = 800.0;
    let max = page_height(&SECTIONS) - viewport;
    let mut app = bare_snapping_app(viewport, PageScroll { offset: max, max });
    for marker in layout_sections(&SECTIONS) {
        app.world_mut().spawn(marker);
    }
    app
}

fn bare_snapping_app(viewport_height: f32, page: PageScroll) -> App {
    let mut app = App::new();
    app.init_resource::<Time>()
        .init_resource::<ScrollSnapper>()
        .init_resource::<ScrollLock>()
        .insert_resource(ViewportSize {
            width: 800.0,
            height: viewport_height,
        })
        .insert_resource(page)
        .add_event::<UserScrolled>()
        .add_event::<SnapRequest>()
        .add_systems(
            Update,
            (handle_snap_requests, debounce_scroll, run_snap_tween).chain(),
        );
    app
}

fn step(app: &mut App, frames: u32) {
    for _ in 0..frames {
        app.world_mut().resource_mut::<Time>().advance_by(FRAME);
        app.update();
    }
}

fn frames(duration: Duration) -> u32 {
    (duration.as_millis() / FRAME.as_millis()) as u32
}

fn offset(app: &App) -> f32 {
    app.world().resource::<PageScroll>().offset
}

fn snapper(app: &App) -> &ScrollSnapper {
    app.world().resource::<ScrollSnapper>()
}

#[test]
fn settled_near_a_section_stays_put() {
    // viewport mid 510 is 10px from the second section
    let mut app = snapping_app(210.0);
    app.world_mut().send_event(UserScrolled);
    step(&mut app, 1 + frames(DEBOUNCE) * 2);

    assert!(!snapper(&app).in_flight());
    assert_eq!(offset(&app), 210.0);
}

#[test]
fn settled_off_centre_snaps_to_nearest_section() {
    // viewport mid 650 is 150px from the second section's midpoint
    let mut app = snapping_app(350.0);
    app.world_mut().send_event(UserScrolled);
    step(&mut app, 1);

    step(&mut app, frames(DEBOUNCE) - 1);
    assert!(!snapper(&app).in_flight(), "snapped before the quiet period");

    step(&mut app, 1);
    assert_eq!(snapper(&app).target(), Some(300.0));
    assert!(app.world().resource::<ScrollLock>().held);

    step(&mut app, frames(SNAP_DURATION));
    assert!(!snapper(&app).in_flight());
    assert_eq!(offset(&app), 300.0);
    assert!(!app.world().resource::<ScrollLock>().held);
}

#[test]
fn scrolling_during_a_snap_does_not_restart_it() {
    let mut app = snapping_app(350.0);
    app.world_mut().send_event(UserScrolled);
    step(&mut app, 1 + frames(DEBOUNCE));
    assert!(snapper(&app).in_flight());

    app.world_mut().send_event(UserScrolled);
    step(&mut app, 1);
    assert!(!snapper(&app).is_armed());

    step(&mut app, frames(SNAP_DURATION) + frames(DEBOUNCE) * 2);
    assert_eq!(offset(&app), 300.0);
    assert!(!snapper(&app).in_flight());
}

#[test]
fn nav_request_scrolls_to_section_top() {
    let mut app = snapping_app(0.0);
    app.world_mut().send_event(SnapRequest { index: 2 });
    step(&mut app, 1);
    assert_eq!(snapper(&app).target(), Some(900.0));

    step(&mut app, frames(SNAP_DURATION));
    assert_eq!(offset(&app), 900.0);
}

#[test]
fn nav_request_for_unknown_section_is_ignored() {
    let mut app = snapping_app(120.0);
    app.world_mut().send_event(SnapRequest { index: 9 });
    step(&mut app, 5);

    assert!(!snapper(&app).in_flight());
    assert_eq!(offset(&app), 120.0);
}

#[test]
fn settling_at_page_bottom_does_not_lock_scrolling() {
    // footer is off-centre but its clamped top is the current offset
    let mut app = bottom_of_page_app();
    let bottom = offset(&app);
    app.world_mut().send_event(UserScrolled);
    step(&mut app, 1 + frames(DEBOUNCE) + 2);

    assert!(!snapper(&app).in_flight());
    assert!(!app.world().resource::<ScrollLock>().held);
    assert_eq!(offset(&app), bottom);
}

#[test]
fn nav_request_for_current_position_is_ignored() {
    let mut app = bottom_of_page_app();
    app.world_mut().send_event(SnapRequest {
        index: SECTIONS.len() - 1,
    });
    step(&mut app, 1);

    assert!(!snapper(&app).in_flight());
    assert!(!app.world().resource::<ScrollLock>().held);
}
