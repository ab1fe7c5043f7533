//! Environment parsing and site-wide constants.

use std::path::PathBuf;

use bevy::log::warn;
use url::Url;

const DOCS_URL_VAR: &str = "HELIOS_DOCS_URL";
const PREFS_PATH_VAR: &str = "HELIOS_PREFS_PATH";
const SCENE_SEED_VAR: &str = "HELIOS_SCENE_SEED";

const DEFAULT_DOCS_URL: &str = "https://docs.rs/helios-engine/latest/helios_engine/";
const PREFS_DIR: &str = "helios-site";
const PREFS_FILE: &str = "preferences.json";

/// Runtime settings read from the environment.
#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub docs_url: Url,
    pub prefs_path: Option<PathBuf>,
    pub scene_seed: u64,
}

/// Reads `HELIOS_*` variables, falling back to defaults for anything missing
/// or malformed.
pub fn site_config() -> SiteConfig {
    SiteConfig {
        docs_url: docs_url(),
        prefs_path: prefs_path(),
        scene_seed: scene_seed(),
    }
}

fn docs_url() -> Url {
    if let Ok(raw) = std::env::var(DOCS_URL_VAR) {
        match raw.parse::<Url>() {
            Ok(url) => return url,
            Err(err) => warn!("helios-site: invalid URL in {DOCS_URL_VAR}: {raw:?} ({err})"),
        }
    }
    default_docs_url()
}

pub fn default_docs_url() -> Url {
    Url::parse(DEFAULT_DOCS_URL).expect("default docs URL is valid")
}

/// Explicit override first, then the platform config directory.
fn prefs_path() -> Option<PathBuf> {
    if let Ok(raw) = std::env::var(PREFS_PATH_VAR) {
        if !raw.trim().is_empty() {
            return Some(PathBuf::from(raw));
        }
    }
    dirs::config_dir().map(|dir| dir.join(PREFS_DIR).join(PREFS_FILE))
}

fn scene_seed() -> u64 {
    match std::env::var(SCENE_SEED_VAR) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("helios-site: ignoring non-numeric {SCENE_SEED_VAR}: {raw:?}");
            rand::random()
        }),
        Err(_) => rand::random(),
    }
}
