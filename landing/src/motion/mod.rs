//! Per-frame animation of the chip: rig pose, glow pulses, wire waves.
//!
//! Each system reads one [`FrameInput`] snapshot. Elements whose mesh or
//! material is gone are skipped; the rest keep animating.

mod pulse;
mod rig;

use bevy::color::Alpha;
use bevy::prelude::*;

use crate::input::{PageScroll, PointerState};
use crate::scene::{ChipRoot, SceneState};

pub use pulse::{EmissiveBase, Pulse, PulseChannel, WireStrand};
pub use rig::{pointer_target, smooth_toward, FrameInput, RigMotion, RigPose, SMOOTHING};

pub fn motion_plugin(app: &mut App) {
    app.add_systems(
        Update,
        (drive_rig, pulse_materials, wave_wires).run_if(in_state(SceneState::Running)),
    );
}

pub fn frame_input(time: &Time, pointer: &PointerState, page: &PageScroll) -> FrameInput {
    FrameInput {
        elapsed: time.elapsed_secs(),
        delta: time.delta_secs(),
        pointer: pointer.0,
        scroll: page.offset,
    }
}

pub fn drive_rig(
    time: Res<Time>,
    pointer: Res<PointerState>,
    page: Res<PageScroll>,
    mut roots: Query<(&mut RigMotion, &mut Transform), With<ChipRoot>>,
) {
    let input = frame_input(&time, &pointer, &page);
    for (mut motion, mut transform) in &mut roots {
        let pose = motion.advance(&input);
        transform.rotation = pose.rotation;
        transform.translation = pose.translation;
    }
}

pub fn pulse_materials(
    time: Res<Time>,
    pulses: Query<(&Pulse, &MeshMaterial3d<StandardMaterial>, Option<&EmissiveBase>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let t = time.elapsed_secs();
    for (pulse, handle, emissive) in &pulses {
        let Some(material) = materials.get_mut(&handle.0) else {
            continue;
        };
        let value = pulse.value(t);
        match (pulse.channel, emissive) {
            (PulseChannel::Opacity, _) => {
                material.base_color = material.base_color.with_alpha(value);
            }
            (PulseChannel::Emissive, Some(base)) => {
                material.emissive = base.0 * value;
            }
            (PulseChannel::Emissive, None) => {}
        }
    }
}

pub fn wave_wires(
    time: Res<Time>,
    strands: Query<(&WireStrand, &Mesh3d)>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let t = time.elapsed_secs();
    for (strand, handle) in &strands {
        let Some(mesh) = meshes.get_mut(&handle.0) else {
            continue;
        };
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, strand.wave_positions(t));
    }
}
