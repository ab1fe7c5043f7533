//! Pointer, viewport and page-scroll state fed by window input events.

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow, WindowResized};

/// Logical pixels scrolled per wheel "line".
pub const LINE_SCROLL_PX: f32 = 40.0;

/// Cursor position normalized to [-1, 1] on both axes, +y up.
#[derive(Resource, Default, Clone, Copy, Debug, PartialEq)]
pub struct PointerState(pub Vec2);

/// Logical size of the primary window.
#[derive(Resource, Default, Clone, Copy, Debug, PartialEq)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportSize {
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Maps a cursor position in window coordinates (origin top-left, +y
    /// down) into [-1, 1]. `None` until the viewport has a size.
    pub fn normalize(&self, cursor: Vec2) -> Option<Vec2> {
        if self.is_empty() {
            return None;
        }
        let x = (cursor.x / self.width) * 2.0 - 1.0;
        let y = 1.0 - (cursor.y / self.height) * 2.0;
        Some(Vec2::new(x, y).clamp(Vec2::NEG_ONE, Vec2::ONE))
    }
}

/// Vertical page scroll in logical pixels.
#[derive(Resource, Default, Clone, Copy, Debug, PartialEq)]
pub struct PageScroll {
    pub offset: f32,
    pub max: f32,
}

impl PageScroll {
    /// Moves the page by `delta`, staying inside `[0, max]`.
    pub fn scroll_by(&mut self, delta: f32) -> bool {
        let next = (self.offset + delta).clamp(0.0, self.max);
        let moved = next != self.offset;
        self.offset = next;
        moved
    }

    pub fn set_max(&mut self, max: f32) {
        self.max = max.max(0.0);
        self.offset = self.offset.clamp(0.0, self.max);
    }

    /// Vertical midpoint of the viewport in page coordinates.
    pub fn viewport_mid(&self, viewport: &ViewportSize) -> f32 {
        self.offset + viewport.height / 2.0
    }
}

/// Sent whenever user input moved the page; the tween's own writes never
/// produce one.
#[derive(Event, Clone, Copy, Debug)]
pub struct UserScrolled;

/// Blocks wheel input while a programmatic scroll owns the page.
#[derive(Resource, Default)]
pub struct ScrollLock {
    pub held: bool,
}

pub fn input_plugin(app: &mut App) {
    app.init_resource::<PointerState>()
        .init_resource::<ViewportSize>()
        .init_resource::<PageScroll>()
        .init_resource::<ScrollLock>()
        .add_event::<UserScrolled>()
        .add_systems(Startup, init_viewport)
        .add_systems(
            PreUpdate,
            (track_viewport, track_pointer, wheel_scroll).chain(),
        );
}

fn init_viewport(windows: Query<&Window, With<PrimaryWindow>>, mut viewport: ResMut<ViewportSize>) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    viewport.width = window.width();
    viewport.height = window.height();
}

pub fn track_viewport(mut resized: EventReader<WindowResized>, mut viewport: ResMut<ViewportSize>) {
    if let Some(event) = resized.read().last() {
        viewport.width = event.width;
        viewport.height = event.height;
    }
}

pub fn track_pointer(
    mut moved: EventReader<CursorMoved>,
    viewport: Res<ViewportSize>,
    mut pointer: ResMut<PointerState>,
) {
    for event in moved.read() {
        if let Some(normalized) = viewport.normalize(event.position) {
            pointer.0 = normalized;
        }
    }
}

pub fn wheel_scroll(
    mut wheel: EventReader<MouseWheel>,
    lock: Res<ScrollLock>,
    mut page: ResMut<PageScroll>,
    mut scrolled: EventWriter<UserScrolled>,
) {
    let mut delta = 0.0;
    for event in wheel.read() {
        delta -= match event.unit {
            MouseScrollUnit::Line => event.y * LINE_SCROLL_PX,
            MouseScrollUnit::Pixel => event.y,
        };
    }
    if delta == 0.0 || lock.held {
        return;
    }
    if page.scroll_by(delta) {
        scrolled.send(UserScrolled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_maps_corners_and_center() {
        let viewport = ViewportSize {
            width: 800.0,
            height: 600.0,
        };
        assert_eq!(viewport.normalize(Vec2::new(0.0, 0.0)), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(viewport.normalize(Vec2::new(400.0, 300.0)), Some(Vec2::ZERO));
        assert_eq!(viewport.normalize(Vec2::new(800.0, 600.0)), Some(Vec2::new(1.0, -1.0)));
    }

    #[test]
    fn normalize_is_none_before_first_resize() {
        assert_eq!(ViewportSize::default().normalize(Vec2::new(10.0, 10.0)), None);
    }

    #[test]
    fn scroll_by_clamps_to_page_bounds() {
        let mut page = PageScroll::default();
        page.set_max(500.0);
        assert!(page.scroll_by(650.0));
        assert_eq!(page.offset, 500.0);
        assert!(!page.scroll_by(10.0));
        assert!(page.scroll_by(-900.0));
        assert_eq!(page.offset, 0.0);
    }

    fn input_app() -> App {
        let mut app = App::new();
        app.add_event::<MouseWheel>()
            .add_event::<CursorMoved>()
            .add_event::<WindowResized>()
            .add_plugins(input_plugin)
            .insert_resource(PageScroll {
                offset: 0.0,
                max: 1_000.0,
            });
        app
    }

    fn wheel(unit: MouseScrollUnit, y: f32) -> MouseWheel {
        MouseWheel {
            unit,
            x: 0.0,
            y,
            window: Entity::PLACEHOLDER,
        }
    }

    fn cursor(x: f32, y: f32) -> CursorMoved {
        CursorMoved {
            window: Entity::PLACEHOLDER,
            position: Vec2::new(x, y),
            delta: None,
        }
    }

    fn user_scrolls(app: &App) -> usize {
        app.world().resource::<Events<UserScrolled>>().len()
    }

    #[test]
    fn wheel_lines_scroll_forty_pixels_each() {
        let mut app = input_app();
        app.world_mut().send_event(wheel(MouseScrollUnit::Line, -2.0));
        app.update();

        assert_eq!(app.world().resource::<PageScroll>().offset, 2.0 * LINE_SCROLL_PX);
        assert_eq!(user_scrolls(&app), 1);
    }

    #[test]
    fn wheel_pixels_scroll_as_is() {
        let mut app = input_app();
        app.world_mut().send_event(wheel(MouseScrollUnit::Pixel, -15.0));
        app.update();

        assert_eq!(app.world().resource::<PageScroll>().offset, 15.0);
    }

    #[test]
    fn held_lock_drops_wheel_input() {
        let mut app = input_app();
        app.world_mut().resource_mut::<ScrollLock>().held = true;
        app.world_mut().send_event(wheel(MouseScrollUnit::Line, -3.0));
        app.update();

        assert_eq!(app.world().resource::<PageScroll>().offset, 0.0);
        assert_eq!(user_scrolls(&app), 0);
    }

    #[test]
    fn wheel_at_page_top_moves_nothing() {
        let mut app = input_app();
        app.world_mut().send_event(wheel(MouseScrollUnit::Line, 1.0));
        app.update();

        assert_eq!(app.world().resource::<PageScroll>().offset, 0.0);
        assert_eq!(user_scrolls(&app), 0);
    }

    #[test]
    fn pointer_before_first_resize_is_ignored() {
        let mut app = input_app();
        app.world_mut().send_event(cursor(120.0, 80.0));
        app.update();

        assert_eq!(app.world().resource::<PointerState>().0, Vec2::ZERO);
    }

    #[test]
    fn resize_then_pointer_updates_normalized_position() {
        let mut app = input_app();
        app.world_mut().send_event(WindowResized {
            window: Entity::PLACEHOLDER,
            width: 800.0,
            height: 600.0,
        });
        app.world_mut().send_event(cursor(200.0, 150.0));
        app.update();

        assert_eq!(
            *app.world().resource::<ViewportSize>(),
            ViewportSize {
                width: 800.0,
                height: 600.0
            }
        );
        assert_eq!(app.world().resource::<PointerState>().0, Vec2::new(-0.5, 0.5));
    }
}
