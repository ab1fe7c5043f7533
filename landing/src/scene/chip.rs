//! The decorative processor model: slab, traces, markers, pins, wires, logo
//! and heat sink under a single root, plus its allocation ledger.

use std::f32::consts::{FRAC_PI_2, TAU};

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::motion::{EmissiveBase, Pulse, PulseChannel, RigMotion, WireStrand};
use crate::scene::{geometry, materials};

const REST: Vec3 = Vec3::new(0.0, -0.4, 0.0);

const SLAB_SIZE: f32 = 4.0;
const SLAB_HEIGHT: f32 = 0.25;
const SLAB_TOP: f32 = SLAB_HEIGHT / 2.0;

const TRACES_PER_AXIS: usize = 10;
const TRACE_WIDTH: f32 = 0.02;
const TRACE_HEIGHT: f32 = 0.01;

pub const MARKER_COUNT: usize = 28;
const MARKER_RADIUS: f32 = 0.035;

const PIN_RADIUS: f32 = 0.12;
const PIN_HEIGHT: f32 = 0.5;
const PIN_INSET: f32 = 1.8;

const WIRE_RADIUS: f32 = 0.025;
const WIRE_SEGMENTS: usize = 96;
const WIRE_SIDES: usize = 8;

const SINK_BASE: Vec3 = Vec3::new(2.2, 0.15, 2.2);
pub const FIN_COUNT: usize = 9;
const FIN_SIZE: Vec3 = Vec3::new(0.06, 0.5, 2.0);

const LOGO_POINTS: usize = 8;
const LOGO_OUTER: f32 = 0.55;
const LOGO_INNER: f32 = 0.25;
const LOGO_DEPTH: f32 = 0.08;

/// Control points of each wire strand, in chip space.
const WIRE_PATHS: [&[Vec3]; 5] = [
    &[
        Vec3::new(-2.0, 0.05, -1.2),
        Vec3::new(-2.6, 0.4, -1.5),
        Vec3::new(-3.4, -0.2, -1.0),
        Vec3::new(-4.4, -0.9, -1.6),
    ],
    &[
        Vec3::new(2.0, 0.05, 0.8),
        Vec3::new(2.7, 0.5, 1.1),
        Vec3::new(3.5, -0.1, 0.6),
        Vec3::new(4.6, -0.8, 1.2),
    ],
    &[
        Vec3::new(0.6, 0.05, 2.0),
        Vec3::new(0.9, 0.45, 2.7),
        Vec3::new(0.2, -0.3, 3.6),
        Vec3::new(0.8, -1.0, 4.5),
    ],
    &[
        Vec3::new(-0.8, 0.05, -2.0),
        Vec3::new(-1.1, 0.6, -2.8),
        Vec3::new(-0.4, 0.0, -3.5),
        Vec3::new(-1.0, -0.7, -4.6),
    ],
    &[
        Vec3::new(2.0, 0.05, -1.6),
        Vec3::new(2.5, 0.35, -2.3),
        Vec3::new(3.3, -0.4, -2.6),
        Vec3::new(3.9, -1.1, -3.6),
    ],
];

/// Root of the chip hierarchy.
#[derive(Component)]
pub struct ChipRoot;

/// Seed for marker placement and pulse phases.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct SceneSeed(pub u64);

/// Every mesh and material the builder created. Released one by one on
/// unmount so nothing outlives the scene.
#[derive(Default, Debug)]
pub struct SceneAllocations {
    meshes: Vec<Handle<Mesh>>,
    materials: Vec<Handle<StandardMaterial>>,
}

impl SceneAllocations {
    pub fn mesh(&mut self, assets: &mut Assets<Mesh>, mesh: impl Into<Mesh>) -> Handle<Mesh> {
        let handle = assets.add(mesh);
        self.meshes.push(handle.clone());
        handle
    }

    pub fn material(
        &mut self,
        assets: &mut Assets<StandardMaterial>,
        material: StandardMaterial,
    ) -> Handle<StandardMaterial> {
        let handle = assets.add(material);
        self.materials.push(handle.clone());
        handle
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Removes every recorded asset. Returns how many were removed; a second
    /// call returns 0.
    pub fn release(
        &mut self,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
    ) -> usize {
        let mut released = 0;
        for handle in self.meshes.drain(..) {
            if meshes.remove(handle.id()).is_some() {
                released += 1;
            }
        }
        for handle in self.materials.drain(..) {
            if materials.remove(handle.id()).is_some() {
                released += 1;
            }
        }
        released
    }
}

/// The mounted background scene.
#[derive(Resource, Debug)]
pub struct HeroScene {
    pub root: Option<Entity>,
    pub lights: Vec<Entity>,
    pub allocations: SceneAllocations,
}

/// Builds the chip once. Does nothing if a scene is already mounted.
pub fn mount_chip(
    mut commands: Commands,
    existing: Option<Res<HeroScene>>,
    seed: Option<Res<SceneSeed>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if existing.is_some() {
        return;
    }
    let seed = seed.map_or(0, |s| s.0);
    let mut rng = StdRng::seed_from_u64(seed);
    let scene = build_chip(&mut commands, &mut meshes, &mut materials, &mut rng);
    info!(
        "helios-site: chip mounted ({} meshes, {} materials, seed {seed})",
        scene.allocations.mesh_count(),
        scene.allocations.material_count()
    );
    commands.insert_resource(scene);
}

/// Despawns the chip and releases every asset it allocated. Safe to call
/// repeatedly and before anything was mounted.
pub fn unmount_chip(
    mut commands: Commands,
    scene: Option<ResMut<HeroScene>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(mut scene) = scene else {
        return;
    };
    if let Some(root) = scene.root.take() {
        if let Some(entity) = commands.get_entity(root) {
            entity.despawn_recursive();
        }
    }
    for light in scene.lights.drain(..) {
        if let Some(entity) = commands.get_entity(light) {
            entity.despawn_recursive();
        }
    }
    let released = scene.allocations.release(&mut meshes, &mut materials);
    commands.remove_resource::<HeroScene>();
    info!("helios-site: chip unmounted, released {released} assets");
}

pub fn build_chip(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    rng: &mut impl Rng,
) -> HeroScene {
    let mut alloc = SceneAllocations::default();

    let slab_mesh = alloc.mesh(meshes, Cuboid::new(SLAB_SIZE, SLAB_HEIGHT, SLAB_SIZE));
    let slab_mat = alloc.material(materials, materials::slab_material());

    let trace_span = SLAB_SIZE * 0.9;
    let trace_x = alloc.mesh(meshes, Cuboid::new(trace_span, TRACE_HEIGHT, TRACE_WIDTH));
    let trace_z = alloc.mesh(meshes, Cuboid::new(TRACE_WIDTH, TRACE_HEIGHT, trace_span));
    let trace_mat = alloc.material(materials, materials::trace_material());
    let offsets = geometry::grid_offsets(TRACES_PER_AXIS, trace_span);

    let marker_mesh = alloc.mesh(meshes, Sphere::new(MARKER_RADIUS));
    let markers: Vec<(Vec3, Handle<StandardMaterial>, Pulse)> = (0..MARKER_COUNT)
        .map(|_| {
            let x = offsets[rng.gen_range(0..offsets.len())];
            let z = offsets[rng.gen_range(0..offsets.len())];
            let pulse = Pulse {
                base: 0.5,
                amplitude: 0.5,
                frequency: rng.gen_range(1.5..3.0),
                phase: rng.gen_range(0.0..TAU),
                channel: PulseChannel::Opacity,
            };
            let material = alloc.material(materials, materials::marker_material());
            (Vec3::new(x, SLAB_TOP + MARKER_RADIUS, z), material, pulse)
        })
        .collect();

    let pin_mesh = alloc.mesh(meshes, Cylinder::new(PIN_RADIUS, PIN_HEIGHT));
    let pin_mat = alloc.material(materials, materials::pin_material());

    let wires: Vec<_> = WIRE_PATHS
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let tube = geometry::tube_mesh(path, WIRE_SEGMENTS, WIRE_RADIUS, WIRE_SIDES);
            let color = materials::wire_color(i);
            let emissive = materials::glow_of(color, 1.0);
            let strand = WireStrand {
                original: tube.positions,
                arc: tube.arc,
                amplitude: rng.gen_range(0.04..0.09),
                waves: 1.5,
                speed: rng.gen_range(1.5..2.5),
                phase: rng.gen_range(0.0..TAU),
            };
            let pulse = Pulse {
                base: 1.2,
                amplitude: 0.8,
                frequency: 1.4,
                phase: rng.gen_range(0.0..TAU),
                channel: PulseChannel::Emissive,
            };
            let mesh = alloc.mesh(meshes, tube.mesh);
            let material = alloc.material(materials, materials::wire_material(color));
            (mesh, material, strand, pulse, EmissiveBase(emissive))
        })
        .collect();

    let sink_mat = alloc.material(materials, materials::heat_sink_material());
    let sink_mesh = alloc.mesh(meshes, Cuboid::new(SINK_BASE.x, SINK_BASE.y, SINK_BASE.z));
    let fin_mesh = alloc.mesh(meshes, Cuboid::new(FIN_SIZE.x, FIN_SIZE.y, FIN_SIZE.z));
    let sink_y = SLAB_TOP + SINK_BASE.y / 2.0;
    let fin_y = sink_y + SINK_BASE.y / 2.0 + FIN_SIZE.y / 2.0;
    let fin_span = SINK_BASE.x - FIN_SIZE.x * 2.0;
    let fin_offsets = geometry::grid_offsets(FIN_COUNT, fin_span);

    let outline = geometry::star_outline(LOGO_POINTS, LOGO_OUTER, LOGO_INNER);
    let logo_mesh = alloc.mesh(meshes, geometry::extruded_outline_mesh(&outline, LOGO_DEPTH));
    let logo_mat = alloc.material(materials, materials::logo_material());
    let logo_pulse = Pulse {
        base: 1.0,
        amplitude: 0.6,
        frequency: 0.8,
        phase: rng.gen_range(0.0..TAU),
        channel: PulseChannel::Emissive,
    };
    let logo_y = fin_y + FIN_SIZE.y / 2.0 + 0.25;

    let root = commands
        .spawn((
            Name::new("chip"),
            ChipRoot,
            RigMotion::new(REST),
            Transform::from_translation(REST),
            Visibility::default(),
        ))
        .with_children(|chip| {
            chip.spawn((
                Mesh3d(slab_mesh),
                MeshMaterial3d(slab_mat),
                Transform::IDENTITY,
            ));

            let trace_y = SLAB_TOP + TRACE_HEIGHT / 2.0;
            for &offset in &offsets {
                chip.spawn((
                    Mesh3d(trace_x.clone()),
                    MeshMaterial3d(trace_mat.clone()),
                    Transform::from_xyz(0.0, trace_y, offset),
                ));
                chip.spawn((
                    Mesh3d(trace_z.clone()),
                    MeshMaterial3d(trace_mat.clone()),
                    Transform::from_xyz(offset, trace_y, 0.0),
                ));
            }

            for (position, material, pulse) in markers {
                chip.spawn((
                    Mesh3d(marker_mesh.clone()),
                    MeshMaterial3d(material),
                    Transform::from_translation(position),
                    pulse,
                ));
            }

            for (sx, sz) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
                chip.spawn((
                    Mesh3d(pin_mesh.clone()),
                    MeshMaterial3d(pin_mat.clone()),
                    Transform::from_xyz(sx * PIN_INSET, SLAB_TOP + PIN_HEIGHT / 2.0, sz * PIN_INSET),
                ));
            }

            for (mesh, material, strand, pulse, emissive) in wires {
                chip.spawn((
                    Mesh3d(mesh),
                    MeshMaterial3d(material),
                    Transform::IDENTITY,
                    strand,
                    pulse,
                    emissive,
                ));
            }

            chip.spawn((
                Mesh3d(sink_mesh),
                MeshMaterial3d(sink_mat.clone()),
                Transform::from_xyz(0.0, sink_y, 0.0),
            ));
            for &x in &fin_offsets {
                chip.spawn((
                    Mesh3d(fin_mesh.clone()),
                    MeshMaterial3d(sink_mat.clone()),
                    Transform::from_xyz(x, fin_y, 0.0),
                ));
            }

            chip.spawn((
                Mesh3d(logo_mesh),
                MeshMaterial3d(logo_mat),
                Transform::from_xyz(0.0, logo_y, 0.0)
                    .with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
                logo_pulse,
                EmissiveBase(materials::glow_of(materials::GLOW, 2.0)),
            ));
        })
        .id();

    let lights = vec![
        commands
            .spawn((
                Name::new("chip key light"),
                PointLight {
                    intensity: 2_000_000.0,
                    range: 30.0,
                    shadows_enabled: false,
                    ..default()
                },
                Transform::from_xyz(3.0, 6.0, 4.0),
            ))
            .id(),
        commands
            .spawn((
                Name::new("chip fill light"),
                DirectionalLight {
                    illuminance: 2_500.0,
                    ..default()
                },
                Transform::from_xyz(-4.0, 5.0, -3.0).looking_at(Vec3::ZERO, Vec3::Y),
            ))
            .id(),
    ];

    HeroScene {
        root: Some(root),
        lights,
        allocations: alloc,
    }
}

/// Meshes and materials one mounted chip owns.
pub fn expected_allocations() -> (usize, usize) {
    // slab, two trace bars, marker sphere, pin, wires, sink base, fin, logo
    let meshes = 1 + 2 + 1 + 1 + WIRE_PATHS.len() + 2 + 1;
    // slab, traces, one per marker, pins, one per wire, sink, logo
    let materials = 1 + 1 + MARKER_COUNT + 1 + WIRE_PATHS.len() + 1 + 1;
    (meshes, materials)
}
