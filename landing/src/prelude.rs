//! Minimal prelude for SDK consumers.

pub use crate::config::{site_config, SiteConfig};
pub use crate::scene::SceneState;
pub use crate::sdk::LandingBuilder;
pub use crate::theme::{ActiveTheme, ThemePreference};
