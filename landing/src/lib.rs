//! Helios Engine landing site: a scrolling page over an animated chip.
//!
//! Library root: scene, motion, page, theme and SDK builder modules.

pub mod config;
pub mod input;
pub mod motion;
pub mod page;
pub mod scene;
pub mod theme;
mod ui;

pub mod prelude;
pub mod sdk;

pub use config::{site_config, SiteConfig};
pub use sdk::LandingBuilder;
pub use ui::DocsLinks;
