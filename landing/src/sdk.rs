//! SDK entry points and builder for composing the landing app.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use crate::config::{self, SiteConfig};
use crate::input::input_plugin;
use crate::motion::motion_plugin;
use crate::page::{carousel_plugin, page_plugin, snap_plugin};
use crate::scene::{scene_plugin, SceneSeed, SceneState};
use crate::theme::{theme_plugin, ActiveTheme, Palette, ThemeStore};
use crate::ui::{nav_plugin, DocsLinks};

/// Builder for constructing the landing app with optional pieces switched off.
pub struct LandingBuilder {
    config: Option<SiteConfig>,
    window_title: String,
    window_resolution: (f32, f32),
    enable_background: bool,
    enable_snapping: bool,
    enable_nav: bool,
    enable_carousel: bool,
}

impl Default for LandingBuilder {
    fn default() -> Self {
        Self {
            config: None,
            window_title: "Helios Engine".to_string(),
            window_resolution: (1280.0, 800.0),
            enable_background: true,
            enable_snapping: true,
            enable_nav: true,
            enable_carousel: true,
        }
    }
}

impl LandingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit configuration instead of reading the environment.
    pub fn config(mut self, config: SiteConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn window_resolution(mut self, width: f32, height: f32) -> Self {
        self.window_resolution = (width, height);
        self
    }

    /// Start with the background unmounted (reduced motion). It can still be
    /// switched on from the nav bar or with `M`.
    pub fn disable_background(mut self) -> Self {
        self.enable_background = false;
        self
    }

    pub fn disable_snapping(mut self) -> Self {
        self.enable_snapping = false;
        self
    }

    pub fn disable_nav(mut self) -> Self {
        self.enable_nav = false;
        self
    }

    pub fn disable_carousel(mut self) -> Self {
        self.enable_carousel = false;
        self
    }

    /// Build the Bevy app with the selected configuration and plugins.
    pub fn build(self) -> App {
        let config = self.config.unwrap_or_else(config::site_config);

        let mut app = App::new();
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: self.window_title,
                resolution: self.window_resolution.into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Palette::of(ActiveTheme::default().current).clear))
        .insert_resource(ThemeStore::new(config.prefs_path.clone()))
        .insert_resource(SceneSeed(config.scene_seed))
        .insert_resource(DocsLinks::new(config.docs_url.clone()))
        .insert_state(if self.enable_background {
            SceneState::Running
        } else {
            SceneState::Off
        })
        .add_plugins((
            input_plugin,
            theme_plugin,
            page_plugin,
            scene_plugin,
            motion_plugin,
        ));

        if self.enable_snapping {
            app.add_plugins(snap_plugin);
        }
        if self.enable_carousel {
            app.add_plugins(carousel_plugin);
        }
        if self.enable_nav {
            app.add_plugins((EguiPlugin, nav_plugin));
        }

        app
    }
}
