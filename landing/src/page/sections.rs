//! Page layout: vertically stacked sections inside one scrolling root node.

use bevy::prelude::*;

use crate::input::{PageScroll, ViewportSize};
use crate::page::carousel::spawn_carousel;

/// Tags a page section the snapper may align to. `top`/`height` are logical
/// pixels in page coordinates; `index` is document order.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct SectionMarker {
    pub index: usize,
    pub top: f32,
    pub height: f32,
}

impl SectionMarker {
    pub fn mid(&self) -> f32 {
        self.top + self.height / 2.0
    }
}

/// Scrolling container holding every section.
#[derive(Component)]
pub struct PageRoot;

/// Text that follows the active theme's foreground colour.
#[derive(Component)]
pub struct PageText;

/// Static description of one section.
#[derive(Clone, Copy, Debug)]
pub struct SectionSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub tagline: &'static str,
    pub height: f32,
    /// Hero keeps a clear background so the chip shows through.
    pub opaque: bool,
}

pub const SECTIONS: [SectionSpec; 5] = [
    SectionSpec {
        id: "hero",
        title: "Helios Engine",
        tagline: "Build LLM agents in Rust: tools, memory, RAG and forests of cooperating agents.",
        height: 900.0,
        opaque: false,
    },
    SectionSpec {
        id: "features",
        title: "Features",
        tagline: "Streaming chat, a typed tool builder, in-memory or Qdrant RAG, an HTTP server.",
        height: 1100.0,
        opaque: true,
    },
    SectionSpec {
        id: "docs",
        title: "Documentation",
        tagline: "Guides and API reference for every building block.",
        height: 700.0,
        opaque: true,
    },
    SectionSpec {
        id: "examples",
        title: "Examples",
        tagline: "Runnable programs from the repository.",
        height: 1000.0,
        opaque: true,
    },
    SectionSpec {
        id: "footer",
        title: "Helios Engine",
        tagline: "MIT licensed. Built in the open.",
        height: 360.0,
        opaque: true,
    },
];

/// Markers for `specs` laid out top to bottom from zero.
pub fn layout_sections(specs: &[SectionSpec]) -> Vec<SectionMarker> {
    let mut top = 0.0;
    specs
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            let marker = SectionMarker {
                index,
                top,
                height: spec.height,
            };
            top += spec.height;
            marker
        })
        .collect()
}

pub fn page_height(specs: &[SectionSpec]) -> f32 {
    specs.iter().map(|s| s.height).sum()
}

pub fn spawn_page(mut commands: Commands) {
    let markers = layout_sections(&SECTIONS);
    commands
        .spawn((
            Name::new("page"),
            PageRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                overflow: Overflow::scroll_y(),
                ..default()
            },
            ScrollPosition::default(),
        ))
        .with_children(|page| {
            for (spec, marker) in SECTIONS.iter().zip(markers) {
                page.spawn((
                    Name::new(spec.id),
                    marker,
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(spec.height),
                        min_height: Val::Px(spec.height),
                        flex_direction: FlexDirection::Column,
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        row_gap: Val::Px(16.0),
                        padding: UiRect::all(Val::Px(48.0)),
                        ..default()
                    },
                    BackgroundColor(Color::NONE),
                ))
                .with_children(|section| {
                    section.spawn((
                        PageText,
                        Text::new(spec.title),
                        TextFont {
                            font_size: if marker.index == 0 { 64.0 } else { 40.0 },
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                    section.spawn((
                        PageText,
                        Text::new(spec.tagline),
                        TextFont {
                            font_size: 20.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                    if spec.id == "examples" {
                        spawn_carousel(section);
                    }
                });
            }
        });
}

/// Keeps `PageScroll::max` in step with the viewport height.
pub fn sync_page_extent(viewport: Res<ViewportSize>, mut page: ResMut<PageScroll>) {
    if !viewport.is_changed() {
        return;
    }
    page.set_max(page_height(&SECTIONS) - viewport.height);
}

pub fn apply_page_scroll(
    page: Res<PageScroll>,
    mut roots: Query<&mut ScrollPosition, With<PageRoot>>,
) {
    if !page.is_changed() {
        return;
    }
    for mut position in &mut roots {
        position.offset_y = page.offset;
    }
}
