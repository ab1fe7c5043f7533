//! Helios site: runs the landing app.

use bevy::prelude::*;
use landing::LandingBuilder;

fn main() -> AppExit {
    let _ = dotenvy::dotenv();
    LandingBuilder::new().build().run()
}
