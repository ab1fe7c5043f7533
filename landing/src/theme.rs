//! Light/dark theme: persisted preference, platform default, colour palette.

use std::fs;
use std::path::PathBuf;

use bevy::prelude::*;
use bevy::window::{WindowTheme, WindowThemeChanged};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::page::{PageText, SectionMarker, SECTIONS};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
}

impl ThemePreference {
    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }
}

impl From<WindowTheme> for ThemePreference {
    fn from(theme: WindowTheme) -> Self {
        match theme {
            WindowTheme::Light => ThemePreference::Light,
            WindowTheme::Dark => ThemePreference::Dark,
        }
    }
}

/// Stored preference wins, then the platform's reported scheme, then dark.
pub fn resolve_theme(
    stored: Option<ThemePreference>,
    platform: Option<ThemePreference>,
) -> ThemePreference {
    stored.or(platform).unwrap_or(ThemePreference::Dark)
}

#[derive(Debug, Error)]
pub enum ThemeStoreError {
    #[error("preference file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("preference file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no config directory available for preferences")]
    NoConfigDir,
}

/// On-disk preferences document. The theme lives under the `theme` key.
#[derive(Serialize, Deserialize, Default, Debug)]
struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<ThemePreference>,
}

/// JSON file holding the user's theme choice.
#[derive(Resource, Clone, Debug)]
pub struct ThemeStore {
    path: Option<PathBuf>,
}

impl ThemeStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// `Ok(None)` when nothing has been saved yet.
    pub fn load(&self) -> Result<Option<ThemePreference>, ThemeStoreError> {
        let path = self.path.as_ref().ok_or(ThemeStoreError::NoConfigDir)?;
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let prefs: Preferences = serde_json::from_str(&raw)?;
        Ok(prefs.theme)
    }

    pub fn save(&self, theme: ThemePreference) -> Result<(), ThemeStoreError> {
        let path = self.path.as_ref().ok_or(ThemeStoreError::NoConfigDir)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let prefs = Preferences { theme: Some(theme) };
        fs::write(path, serde_json::to_string_pretty(&prefs)?)?;
        Ok(())
    }
}

/// Theme currently applied. `explicit` is set once the user picked one, after
/// which platform changes are no longer followed.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct ActiveTheme {
    pub current: ThemePreference,
    pub explicit: bool,
}

impl Default for ActiveTheme {
    fn default() -> Self {
        Self {
            current: ThemePreference::Dark,
            explicit: false,
        }
    }
}

#[derive(Event, Clone, Copy, Debug)]
pub struct ToggleTheme;

/// Colours derived from a theme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub clear: Color,
    pub surface: Color,
    pub text: Color,
}

impl Palette {
    pub fn of(theme: ThemePreference) -> Self {
        match theme {
            ThemePreference::Dark => Self {
                clear: Color::srgb(0.03, 0.035, 0.05),
                surface: Color::srgba(0.06, 0.07, 0.1, 0.92),
                text: Color::srgb(0.9, 0.93, 0.97),
            },
            ThemePreference::Light => Self {
                clear: Color::srgb(0.93, 0.94, 0.96),
                surface: Color::srgba(0.98, 0.98, 1.0, 0.92),
                text: Color::srgb(0.1, 0.11, 0.14),
            },
        }
    }
}

pub fn theme_plugin(app: &mut App) {
    app.init_resource::<ActiveTheme>()
        .add_event::<ToggleTheme>()
        .add_systems(PreStartup, load_theme)
        .add_systems(
            Update,
            (
                toggle_theme_key,
                apply_theme_toggle,
                follow_platform_theme,
                apply_theme,
            )
                .chain(),
        );
}

/// Applies the stored preference at startup. The platform scheme is not known
/// yet; it arrives later as a `WindowThemeChanged` event.
pub fn load_theme(store: Option<Res<ThemeStore>>, mut active: ResMut<ActiveTheme>) {
    let stored = match store.as_deref().map(ThemeStore::load) {
        Some(Ok(stored)) => stored,
        Some(Err(err)) => {
            warn!("helios-site: could not read theme preference: {err}");
            None
        }
        None => None,
    };
    *active = ActiveTheme {
        current: resolve_theme(stored, None),
        explicit: stored.is_some(),
    };
    info!("helios-site: theme {:?}", active.current);
}

fn toggle_theme_key(keys: Res<ButtonInput<KeyCode>>, mut toggles: EventWriter<ToggleTheme>) {
    if keys.just_pressed(KeyCode::KeyT) {
        toggles.send(ToggleTheme);
    }
}

pub fn apply_theme_toggle(
    mut toggles: EventReader<ToggleTheme>,
    store: Option<Res<ThemeStore>>,
    mut active: ResMut<ActiveTheme>,
) {
    let flips = toggles.read().count();
    if flips % 2 == 0 {
        return;
    }
    active.current = active.current.toggled();
    active.explicit = true;
    info!("helios-site: theme switched to {:?}", active.current);
    if let Some(store) = store {
        if let Err(err) = store.save(active.current) {
            warn!("helios-site: could not save theme preference: {err}");
        }
    }
}

pub fn follow_platform_theme(
    mut changed: EventReader<WindowThemeChanged>,
    mut active: ResMut<ActiveTheme>,
) {
    let Some(event) = changed.read().last() else {
        return;
    };
    if active.explicit {
        return;
    }
    let theme = ThemePreference::from(event.theme);
    if active.current != theme {
        active.current = theme;
    }
}

pub fn apply_theme(
    active: Res<ActiveTheme>,
    mut clear: ResMut<ClearColor>,
    mut sections: Query<(&SectionMarker, &mut BackgroundColor)>,
    mut texts: Query<&mut TextColor, With<PageText>>,
) {
    if !active.is_changed() {
        return;
    }
    let palette = Palette::of(active.current);
    clear.0 = palette.clear;
    for (marker, mut background) in &mut sections {
        let opaque = SECTIONS.get(marker.index).is_some_and(|s| s.opaque);
        background.0 = if opaque { palette.surface } else { Color::NONE };
    }
    for mut color in &mut texts {
        color.0 = palette.text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("helios-site-{}-{name}", std::process::id()))
            .join("preferences.json")
    }

    #[test]
    fn stored_preference_wins_over_platform() {
        assert_eq!(
            resolve_theme(Some(ThemePreference::Light), Some(ThemePreference::Dark)),
            ThemePreference::Light
        );
        assert_eq!(
            resolve_theme(None, Some(ThemePreference::Light)),
            ThemePreference::Light
        );
        assert_eq!(resolve_theme(None, None), ThemePreference::Dark);
    }

    #[test]
    fn missing_file_loads_as_none() {
        let store = ThemeStore::new(Some(scratch_path("missing")));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn saved_theme_is_read_back() {
        let path = scratch_path("roundtrip");
        let store = ThemeStore::new(Some(path.clone()));

        store.save(ThemePreference::Light).unwrap();
        assert_eq!(store.load().unwrap(), Some(ThemePreference::Light));

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"theme\": \"light\""), "{raw}");

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = scratch_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ theme: ").unwrap();

        let err = ThemeStore::new(Some(path.clone())).load().unwrap_err();
        assert!(matches!(err, ThemeStoreError::Parse(_)));

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn store_without_path_reports_no_config_dir() {
        let store = ThemeStore::new(None);
        assert!(matches!(store.load(), Err(ThemeStoreError::NoConfigDir)));
        assert!(matches!(
            store.save(ThemePreference::Dark),
            Err(ThemeStoreError::NoConfigDir)
        ));
    }

    #[test]
    fn toggle_event_flips_and_persists() {
        let path = scratch_path("toggle");
        let mut app = App::new();
        app.insert_resource(ThemeStore::new(Some(path.clone())))
            .init_resource::<ActiveTheme>()
            .add_event::<ToggleTheme>()
            .add_systems(Update, apply_theme_toggle);

        app.world_mut().send_event(ToggleTheme);
        app.update();

        let active = *app.world().resource::<ActiveTheme>();
        assert_eq!(active.current, ThemePreference::Light);
        assert!(active.explicit);
        assert_eq!(
            ThemeStore::new(Some(path.clone())).load().unwrap(),
            Some(ThemePreference::Light)
        );

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn stored_preference_is_loaded_as_explicit() {
        let path = scratch_path("load");
        let store = ThemeStore::new(Some(path.clone()));
        store.save(ThemePreference::Light).unwrap();

        let mut app = App::new();
        app.insert_resource(store)
            .init_resource::<ActiveTheme>()
            .add_systems(Startup, load_theme);
        app.update();

        let active = *app.world().resource::<ActiveTheme>();
        assert_eq!(active.current, ThemePreference::Light);
        assert!(active.explicit);

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn missing_preference_loads_dark_and_not_explicit() {
        let mut app = App::new();
        app.insert_resource(ThemeStore::new(Some(scratch_path("absent"))))
            .init_resource::<ActiveTheme>()
            .add_systems(Startup, load_theme);
        app.update();

        assert_eq!(*app.world().resource::<ActiveTheme>(), ActiveTheme::default());
    }

    fn platform_app(active: ActiveTheme) -> App {
        let mut app = App::new();
        app.insert_resource(active)
            .add_event::<WindowThemeChanged>()
            .add_systems(Update, follow_platform_theme);
        app.world_mut().send_event(WindowThemeChanged {
            window: Entity::PLACEHOLDER,
            theme: WindowTheme::Light,
        });
        app.update();
        app
    }

    #[test]
    fn platform_change_is_followed_without_a_stored_choice() {
        let app = platform_app(ActiveTheme::default());
        assert_eq!(
            app.world().resource::<ActiveTheme>().current,
            ThemePreference::Light
        );
    }

    #[test]
    fn platform_change_is_ignored_after_an_explicit_choice() {
        let app = platform_app(ActiveTheme {
            current: ThemePreference::Dark,
            explicit: true,
        });
        assert_eq!(
            app.world().resource::<ActiveTheme>().current,
            ThemePreference::Dark
        );
    }

    #[test]
    fn apply_theme_repaints_clear_colour_sections_and_text() {
        let mut app = App::new();
        app.insert_resource(ActiveTheme {
            current: ThemePreference::Light,
            explicit: true,
        })
        .insert_resource(ClearColor(Color::BLACK))
        .add_systems(Update, apply_theme);

        let hero = app
            .world_mut()
            .spawn((
                SectionMarker {
                    index: 0,
                    top: 0.0,
                    height: 900.0,
                },
                BackgroundColor(Color::WHITE),
            ))
            .id();
        let features = app
            .world_mut()
            .spawn((
                SectionMarker {
                    index: 1,
                    top: 900.0,
                    height: 1100.0,
                },
                BackgroundColor(Color::NONE),
            ))
            .id();
        let text = app
            .world_mut()
            .spawn((PageText, TextColor(Color::BLACK)))
            .id();

        app.update();

        let palette = Palette::of(ThemePreference::Light);
        let world = app.world();
        assert_eq!(world.resource::<ClearColor>().0, palette.clear);
        assert_eq!(world.get::<BackgroundColor>(features).unwrap().0, palette.surface);
        assert_eq!(world.get::<BackgroundColor>(hero).unwrap().0, Color::NONE);
        assert_eq!(world.get::<TextColor>(text).unwrap().0, palette.text);
    }
}
