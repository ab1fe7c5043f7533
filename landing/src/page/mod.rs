//! The scrolling page: sections, snapping and the examples carousel.

pub(crate) mod carousel;
pub(crate) mod sections;
pub(crate) mod snap;

use bevy::prelude::*;
use bevy::ui::UiSystem;

pub use carousel::{carousel_plugin, Carousel, SLIDES};
pub use sections::{
    layout_sections, page_height, PageRoot, PageText, SectionMarker, SectionSpec, SECTIONS,
};
pub use snap::{
    debounce_scroll, handle_snap_requests, nearest_section, run_snap_tween, snap_plugin,
    snap_target, ScrollSnapper, SnapRequest, SnapTween, DEBOUNCE, SNAP_DURATION, SNAP_THRESHOLD,
};

pub fn page_plugin(app: &mut App) {
    app.add_event::<SnapRequest>()
        .add_systems(Startup, sections::spawn_page)
        .add_systems(
            PostUpdate,
            (sections::sync_page_extent, sections::apply_page_scroll)
                .chain()
                .before(UiSystem::Layout),
        );
}
