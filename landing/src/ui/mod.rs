mod nav;

pub use nav::{nav_plugin, DocsLinks};
