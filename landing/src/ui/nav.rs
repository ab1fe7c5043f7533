//! Navigation bar: section links, docs links, theme and motion toggles.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use url::Url;

use crate::page::SnapRequest;
use crate::scene::SceneState;
use crate::theme::{ActiveTheme, ThemePreference, ToggleTheme};

/// Section links shown in the bar, by document index.
const SECTION_LINKS: [(&str, usize); 3] = [("Features", 1), ("Docs", 2), ("Examples", 3)];

/// Pages under the docs base URL linked from the bar.
const DOC_PAGES: [(&str, &str); 3] = [
    ("Agent", "struct.Agent.html"),
    ("ForestBuilder", "struct.ForestBuilder.html"),
    ("Tools", "tools/index.html"),
];

/// Resolved documentation links.
#[derive(Resource, Clone, Debug)]
pub struct DocsLinks {
    pub home: Url,
    pub pages: Vec<(&'static str, Url)>,
}

impl DocsLinks {
    /// Joins the known pages onto `base`; pages that fail to join are dropped.
    pub fn new(base: Url) -> Self {
        let pages = DOC_PAGES
            .iter()
            .filter_map(|(label, path)| base.join(path).ok().map(|url| (*label, url)))
            .collect();
        Self { home: base, pages }
    }
}

pub fn nav_plugin(app: &mut App) {
    app.add_systems(Update, nav_bar_system);
}

#[allow(clippy::too_many_arguments)]
fn nav_bar_system(
    mut contexts: EguiContexts,
    links: Option<Res<DocsLinks>>,
    theme: Res<ActiveTheme>,
    scene: Option<Res<State<SceneState>>>,
    mut next_scene: Option<ResMut<NextState<SceneState>>>,
    mut snaps: EventWriter<SnapRequest>,
    mut toggles: EventWriter<ToggleTheme>,
    mut applied: Local<Option<ThemePreference>>,
) {
    let ctx = contexts.ctx_mut();
    if *applied != Some(theme.current) {
        ctx.set_visuals(match theme.current {
            ThemePreference::Dark => egui::Visuals::dark(),
            ThemePreference::Light => egui::Visuals::light(),
        });
        *applied = Some(theme.current);
    }

    egui::TopBottomPanel::top("nav")
        .frame(
            egui::Frame::default()
                .fill(ctx.style().visuals.panel_fill.gamma_multiply(0.85))
                .inner_margin(egui::Margin::symmetric(16, 8)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let brand = egui::RichText::new("Helios Engine")
                    .strong()
                    .size(18.0)
                    .color(egui::Color32::from_rgb(255, 158, 41));
                if ui
                    .add(egui::Label::new(brand).sense(egui::Sense::click()))
                    .clicked()
                {
                    snaps.send(SnapRequest { index: 0 });
                }
                ui.separator();

                for (label, index) in SECTION_LINKS {
                    if ui.link(label).clicked() {
                        snaps.send(SnapRequest { index });
                    }
                }

                if let Some(links) = links.as_deref() {
                    ui.separator();
                    ui.hyperlink_to("API docs", links.home.as_str());
                    for (label, url) in &links.pages {
                        ui.hyperlink_to(*label, url.as_str());
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_label = match theme.current {
                        ThemePreference::Dark => "Light mode",
                        ThemePreference::Light => "Dark mode",
                    };
                    if ui.button(theme_label).clicked() {
                        toggles.send(ToggleTheme);
                    }

                    if let (Some(state), Some(next)) = (scene.as_deref(), next_scene.as_mut()) {
                        let mut motion = *state.get() == SceneState::Running;
                        if ui.checkbox(&mut motion, "Motion").changed() {
                            next.set(state.get().toggled());
                        }
                    }
                });
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_pages_join_onto_base() {
        let links = DocsLinks::new(
            Url::parse("https://docs.rs/helios-engine/latest/helios_engine/").unwrap(),
        );
        assert_eq!(links.pages.len(), DOC_PAGES.len());
        assert_eq!(
            links.pages[0].1.as_str(),
            "https://docs.rs/helios-engine/latest/helios_engine/struct.Agent.html"
        );
    }

    #[test]
    fn base_without_trailing_slash_replaces_last_segment() {
        let links = DocsLinks::new(Url::parse("https://example.com/docs/helios").unwrap());
        assert_eq!(
            links.pages[2].1.as_str(),
            "https://example.com/docs/tools/index.html"
        );
    }
}
