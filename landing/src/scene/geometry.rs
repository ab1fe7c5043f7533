//! Procedural meshes for the chip: wire tubes, the extruded logo, trace grid.

use std::f32::consts::{PI, TAU};

use bevy::prelude::*;
use bevy::render::mesh::Indices;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::PrimitiveTopology;

/// Uniform Catmull-Rom through `points`, `t` in [0, 1] across the whole curve.
/// End segments reuse the first/last point as their outer control.
pub fn catmull_rom(points: &[Vec3], t: f32) -> Vec3 {
    match points.len() {
        0 => return Vec3::ZERO,
        1 => return points[0],
        _ => {}
    }
    let segments = points.len() - 1;
    let scaled = t.clamp(0.0, 1.0) * segments as f32;
    let i = (scaled.floor() as usize).min(segments - 1);
    let local = scaled - i as f32;

    let p0 = points[i.saturating_sub(1)];
    let p1 = points[i];
    let p2 = points[i + 1];
    let p3 = points[(i + 2).min(points.len() - 1)];

    let t2 = local * local;
    let t3 = t2 * local;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * local
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// Vertex data of a tube plus the arc-length parameter (0..1) of every vertex,
/// used later to run a wave along the strand.
pub struct TubeGeometry {
    pub mesh: Mesh,
    pub positions: Vec<[f32; 3]>,
    pub arc: Vec<f32>,
}

/// Sweeps a circle of `radius` along the Catmull-Rom curve through
/// `control_points`.
pub fn tube_mesh(
    control_points: &[Vec3],
    tubular_segments: usize,
    radius: f32,
    radial_segments: usize,
) -> TubeGeometry {
    let tubular_segments = tubular_segments.max(1);
    let radial_segments = radial_segments.max(3);

    let centers: Vec<Vec3> = (0..=tubular_segments)
        .map(|i| catmull_rom(control_points, i as f32 / tubular_segments as f32))
        .collect();

    let mut lengths = Vec::with_capacity(centers.len());
    let mut total = 0.0;
    lengths.push(0.0);
    for pair in centers.windows(2) {
        total += pair[0].distance(pair[1]);
        lengths.push(total);
    }

    let ring = radial_segments + 1;
    let mut positions = Vec::with_capacity(centers.len() * ring);
    let mut normals = Vec::with_capacity(centers.len() * ring);
    let mut arc = Vec::with_capacity(centers.len() * ring);

    for (i, center) in centers.iter().enumerate() {
        let prev = centers[i.saturating_sub(1)];
        let next = centers[(i + 1).min(centers.len() - 1)];
        let tangent = (next - prev).try_normalize().unwrap_or(Vec3::X);
        let reference = if tangent.dot(Vec3::Y).abs() > 0.95 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let side = tangent.cross(reference).normalize();
        let up = side.cross(tangent).normalize();
        let u = if total > 0.0 { lengths[i] / total } else { 0.0 };

        for j in 0..ring {
            let theta = j as f32 / radial_segments as f32 * TAU;
            let normal = side * theta.cos() + up * theta.sin();
            positions.push((*center + normal * radius).to_array());
            normals.push(normal.to_array());
            arc.push(u);
        }
    }

    let mut indices = Vec::with_capacity(tubular_segments * radial_segments * 6);
    for i in 0..tubular_segments {
        for j in 0..radial_segments {
            let a = (i * ring + j) as u32;
            let b = ((i + 1) * ring + j) as u32;
            let c = ((i + 1) * ring + j + 1) as u32;
            let d = (i * ring + j + 1) as u32;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    let mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions.clone())
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_indices(Indices::U32(indices));

    TubeGeometry {
        mesh,
        positions,
        arc,
    }
}

/// Star outline with `points` tips, counter-clockwise, starting at +Y.
pub fn star_outline(points: usize, outer: f32, inner: f32) -> Vec<Vec2> {
    let count = points.max(3) * 2;
    (0..count)
        .map(|i| {
            let angle = PI / 2.0 + i as f32 / count as f32 * TAU;
            let radius = if i % 2 == 0 { outer } else { inner };
            Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

/// Extrudes a star-shaped (visible from its centroid) counter-clockwise
/// outline along Z, centred on the origin.
pub fn extruded_outline_mesh(outline: &[Vec2], depth: f32) -> Mesh {
    let half = depth / 2.0;
    let n = outline.len();
    let centroid = outline.iter().copied().sum::<Vec2>() / n.max(1) as f32;

    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for (z, normal, front) in [(half, Vec3::Z, true), (-half, Vec3::NEG_Z, false)] {
        let base = positions.len() as u32;
        positions.push([centroid.x, centroid.y, z]);
        normals.push(normal.to_array());
        for p in outline {
            positions.push([p.x, p.y, z]);
            normals.push(normal.to_array());
        }
        for i in 0..n as u32 {
            let a = base + 1 + i;
            let b = base + 1 + (i + 1) % n as u32;
            if front {
                indices.extend_from_slice(&[base, a, b]);
            } else {
                indices.extend_from_slice(&[base, b, a]);
            }
        }
    }

    for i in 0..n {
        let a = outline[i];
        let b = outline[(i + 1) % n];
        let edge = b - a;
        let normal = Vec3::new(edge.y, -edge.x, 0.0).normalize_or_zero().to_array();
        let base = positions.len() as u32;
        positions.extend_from_slice(&[
            [a.x, a.y, half],
            [b.x, b.y, half],
            [b.x, b.y, -half],
            [a.x, a.y, -half],
        ]);
        normals.extend_from_slice(&[normal; 4]);
        indices.extend_from_slice(&[base, base + 3, base + 2, base, base + 2, base + 1]);
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_indices(Indices::U32(indices))
}

/// Evenly spaced offsets across `span`, centred on zero, endpoints inset by
/// half a step.
pub fn grid_offsets(count: usize, span: f32) -> Vec<f32> {
    if count == 0 {
        return Vec::new();
    }
    let step = span / count as f32;
    (0..count)
        .map(|i| -span / 2.0 + step / 2.0 + i as f32 * step)
        .collect()
}
