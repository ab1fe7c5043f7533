//! Snaps the page to the nearest section once scrolling settles.

use std::time::Duration;

use bevy::prelude::*;

use crate::input::{PageScroll, ScrollLock, UserScrolled, ViewportSize};
use crate::page::sections::SectionMarker;

/// Quiet period after the last scroll before a snap is considered.
pub const DEBOUNCE: Duration = Duration::from_millis(150);
/// Sections closer than this (or exactly this far) are left alone.
pub const SNAP_THRESHOLD: f32 = 100.0;
pub const SNAP_DURATION: Duration = Duration::from_millis(800);
/// Offsets closer than this count as already in place.
const SETTLED_EPSILON: f32 = 0.5;

/// Nav-bar request to scroll to a section by document index.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnapRequest {
    pub index: usize,
}

/// Eased scroll animation between two offsets.
#[derive(Debug, Clone)]
pub struct SnapTween {
    pub from: f32,
    pub to: f32,
    timer: Timer,
}

impl SnapTween {
    pub fn new(from: f32, to: f32) -> Self {
        Self {
            from,
            to,
            timer: Timer::new(SNAP_DURATION, TimerMode::Once),
        }
    }

    pub fn advance(&mut self, delta: Duration) -> f32 {
        self.timer.tick(delta);
        self.from + (self.to - self.from) * ease_in_out_cubic(self.timer.fraction())
    }

    pub fn finished(&self) -> bool {
        self.timer.finished()
    }
}

/// Debounce timer plus the in-flight snap, if any.
#[derive(Resource, Debug)]
pub struct ScrollSnapper {
    debounce: Timer,
    armed: bool,
    tween: Option<SnapTween>,
}

impl Default for ScrollSnapper {
    fn default() -> Self {
        Self {
            debounce: Timer::new(DEBOUNCE, TimerMode::Once),
            armed: false,
            tween: None,
        }
    }
}

impl ScrollSnapper {
    /// Restarts the quiet period. Ignored while a snap is running.
    pub fn notify_scroll(&mut self) {
        if self.in_flight() {
            return;
        }
        self.debounce.reset();
        self.armed = true;
    }

    /// Returns `true` exactly once per settled burst, when the quiet period
    /// has elapsed.
    pub fn tick_debounce(&mut self, delta: Duration) -> bool {
        if !self.armed {
            return false;
        }
        if self.in_flight() {
            self.armed = false;
            return false;
        }
        self.debounce.tick(delta);
        if self.debounce.finished() {
            self.armed = false;
            return true;
        }
        false
    }

    pub fn start(&mut self, from: f32, to: f32) {
        self.armed = false;
        self.tween = Some(SnapTween::new(from, to));
    }

    /// Next scroll offset while a snap is in flight.
    pub fn advance(&mut self, delta: Duration) -> Option<f32> {
        let tween = self.tween.as_mut()?;
        let offset = tween.advance(delta);
        if tween.finished() {
            self.tween = None;
        }
        Some(offset)
    }

    pub fn in_flight(&self) -> bool {
        self.tween.is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn target(&self) -> Option<f32> {
        self.tween.as_ref().map(|t| t.to)
    }

    /// Drops any pending evaluation and running snap.
    pub fn clear(&mut self) {
        self.armed = false;
        self.debounce.reset();
        self.tween = None;
    }
}

/// Section whose midpoint is closest to `viewport_mid`, with that distance.
/// Ties go to the first section in `sections` order.
pub fn nearest_section(
    sections: &[SectionMarker],
    viewport_mid: f32,
) -> Option<(SectionMarker, f32)> {
    let mut best: Option<(SectionMarker, f32)> = None;
    for section in sections {
        let distance = (section.mid() - viewport_mid).abs();
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((*section, distance));
        }
    }
    best
}

/// Top offset to snap to, if the nearest section is off-centre by more than
/// [`SNAP_THRESHOLD`].
pub fn snap_target(sections: &[SectionMarker], viewport_mid: f32) -> Option<f32> {
    let (section, distance) = nearest_section(sections, viewport_mid)?;
    (distance > SNAP_THRESHOLD).then_some(section.top)
}

fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

pub fn snap_plugin(app: &mut App) {
    app.init_resource::<ScrollSnapper>()
        .add_systems(
            Update,
            (handle_snap_requests, debounce_scroll, run_snap_tween).chain(),
        )
        .add_systems(Last, clear_on_exit);
}

fn ordered_sections(sections: &Query<&SectionMarker>) -> Vec<SectionMarker> {
    let mut markers: Vec<SectionMarker> = sections.iter().copied().collect();
    markers.sort_by_key(|m| m.index);
    markers
}

pub fn debounce_scroll(
    mut scrolled: EventReader<UserScrolled>,
    time: Res<Time>,
    viewport: Res<ViewportSize>,
    page: Res<PageScroll>,
    sections: Query<&SectionMarker>,
    mut snapper: ResMut<ScrollSnapper>,
) {
    // the quiet period starts after this frame's scroll
    if scrolled.read().count() > 0 {
        snapper.notify_scroll();
        return;
    }
    if !snapper.tick_debounce(time.delta()) {
        return;
    }
    let markers = ordered_sections(&sections);
    let Some(target) = snap_target(&markers, page.viewport_mid(&viewport)) else {
        return;
    };
    let target = target.clamp(0.0, page.max);
    // a clamped target can equal the current offset at the page bottom
    if (target - page.offset).abs() < SETTLED_EPSILON {
        return;
    }
    debug!("helios-site: snapping from {:.0} to {target:.0}", page.offset);
    snapper.start(page.offset, target);
}

pub fn handle_snap_requests(
    mut requests: EventReader<SnapRequest>,
    page: Res<PageScroll>,
    sections: Query<&SectionMarker>,
    mut snapper: ResMut<ScrollSnapper>,
) {
    let Some(request) = requests.read().last().copied() else {
        return;
    };
    let Some(section) = sections.iter().find(|m| m.index == request.index) else {
        return;
    };
    let target = section.top.clamp(0.0, page.max);
    if (target - page.offset).abs() < SETTLED_EPSILON {
        return;
    }
    snapper.start(page.offset, target);
}

pub fn run_snap_tween(
    time: Res<Time>,
    mut snapper: ResMut<ScrollSnapper>,
    mut page: ResMut<PageScroll>,
    mut lock: ResMut<ScrollLock>,
) {
    if let Some(offset) = snapper.advance(time.delta()) {
        page.offset = offset.clamp(0.0, page.max);
    }
    lock.held = snapper.in_flight();
}

fn clear_on_exit(
    mut exit: EventReader<AppExit>,
    mut snapper: ResMut<ScrollSnapper>,
    mut lock: ResMut<ScrollLock>,
) {
    if exit.read().next().is_some() {
        snapper.clear();
        lock.held = false;
    }
}
