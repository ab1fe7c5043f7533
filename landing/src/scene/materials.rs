//! Shared material and colour helpers for the chip.

use bevy::color::Alpha;
use bevy::prelude::*;

/// Helios amber used for glowing elements.
pub const GLOW: Color = Color::srgb(1.0, 0.62, 0.16);
/// Cooler accent for circuit traces.
pub const TRACE: Color = Color::srgb(0.25, 0.75, 1.0);

pub fn slab_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::srgb(0.08, 0.09, 0.12),
        perceptual_roughness: 0.6,
        metallic: 0.3,
        ..default()
    }
}

pub fn trace_material() -> StandardMaterial {
    StandardMaterial {
        base_color: TRACE.with_alpha(0.55),
        emissive: glow_of(TRACE, 1.5),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    }
}

/// Each marker gets its own instance so its alpha can pulse independently.
pub fn marker_material() -> StandardMaterial {
    StandardMaterial {
        base_color: GLOW.with_alpha(0.5),
        emissive: glow_of(GLOW, 3.0),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    }
}

pub fn pin_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::srgb(0.72, 0.6, 0.35),
        metallic: 0.9,
        perceptual_roughness: 0.3,
        ..default()
    }
}

pub fn wire_material(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        emissive: glow_of(color, 1.0),
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

pub fn heat_sink_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::srgb(0.55, 0.58, 0.63),
        metallic: 0.95,
        perceptual_roughness: 0.25,
        ..default()
    }
}

pub fn logo_material() -> StandardMaterial {
    StandardMaterial {
        base_color: GLOW,
        emissive: glow_of(GLOW, 2.0),
        ..default()
    }
}

/// Linear emissive of `color` scaled by `strength`.
pub fn glow_of(color: Color, strength: f32) -> LinearRgba {
    let lin = color.to_linear();
    LinearRgba::rgb(lin.red * strength, lin.green * strength, lin.blue * strength)
}

/// Wire tints cycle through amber, cyan and violet.
pub fn wire_color(index: usize) -> Color {
    match index % 3 {
        0 => GLOW,
        1 => TRACE,
        _ => Color::srgb(0.62, 0.4, 1.0),
    }
}
