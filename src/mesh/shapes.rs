//! Procedural ornament geometry
//!
//! All shapes are centred on the origin with CCW front faces.

use std::f32::consts::{FRAC_PI_2, PI, TAU};
use crate::math::Vec3;
use super::vertex::{Mesh, Vertex};

/// Smooth UV sphere
pub fn sphere(radius: f32, width_segments: usize, height_segments: usize) -> Mesh {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let mut mesh = Mesh::new();

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let theta = v * PI;
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let phi = u * TAU;
            let normal = Vec3::new(
                -phi.cos() * theta.sin(),
                theta.cos(),
                phi.sin() * theta.sin(),
            );
            mesh.add_vertices([Vertex::new(normal.scale(radius), normal)]);
        }
    }

    let row = (width_segments + 1) as u32;
    for iy in 0..height_segments as u32 {
        for ix in 0..width_segments as u32 {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;

            // Poles collapse to a single triangle per segment
            if iy != 0 {
                mesh.add_triangle(a, b, d);
            }
            if iy != height_segments as u32 - 1 {
                mesh.add_triangle(b, c, d);
            }
        }
    }

    mesh
}

/// Axis-aligned cube with flat faces
pub fn cuboid(size: f32) -> Mesh {
    let h = size / 2.0;
    let x = Vec3::new(1.0, 0.0, 0.0);
    let y = Vec3::UP;
    let z = Vec3::new(0.0, 0.0, 1.0);

    // (normal, u, v) with u × v = normal
    let faces = [
        (x, -z, y),
        (-x, z, y),
        (y, x, -z),
        (-y, x, z),
        (z, x, y),
        (-z, -x, y),
    ];

    let mut mesh = Mesh::new();
    for (normal, u, v) in faces {
        let center = normal.scale(h);
        let corners = [
            center - u.scale(h) - v.scale(h),
            center + u.scale(h) - v.scale(h),
            center + u.scale(h) + v.scale(h),
            center - u.scale(h) + v.scale(h),
        ];
        let start = mesh.add_vertices(corners.map(|p| Vertex::new(p, normal)));
        mesh.add_quad(start, start + 1, start + 2, start + 3);
    }

    mesh
}

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

/// Flat-shaded regular icosahedron (the faceted "gem")
pub fn icosahedron(radius: f32) -> Mesh {
    let t = (1.0 + 5.0f32.sqrt()) / 2.0;
    let corners = [
        Vec3::new(-1.0, t, 0.0), Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0), Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t), Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t), Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0), Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0), Vec3::new(-t, 0.0, 1.0),
    ]
    .map(|c| c.normalize().scale(radius));

    let mut mesh = Mesh::new();
    for [a, b, c] in ICOSAHEDRON_FACES {
        mesh.add_facet(corners[a], corners[b], corners[c]);
    }
    mesh
}

/// Star outline in the xy plane, first point straight up
pub fn star_outline(points: usize, outer_radius: f32, inner_radius: f32) -> Vec<Vec3> {
    let count = points * 2;
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * TAU + FRAC_PI_2;
            let r = if i % 2 == 0 { outer_radius } else { inner_radius };
            Vec3::new(angle.cos() * r, angle.sin() * r, 0.0)
        })
        .collect()
}

/// Star outline extruded along z, centred on z = 0
pub fn star_prism(points: usize, outer_radius: f32, inner_radius: f32, depth: f32) -> Mesh {
    let outline = star_outline(points, outer_radius, inner_radius);
    let n = outline.len();
    let front = Vec3::new(0.0, 0.0, depth / 2.0);
    let back = Vec3::new(0.0, 0.0, -depth / 2.0);

    let mut mesh = Mesh::new();

    for i in 0..n {
        let p = outline[i];
        let q = outline[(i + 1) % n];

        // Caps as fans around the centre
        mesh.add_facet(front, p + front, q + front);
        mesh.add_facet(back, q + back, p + back);

        // Side wall
        mesh.add_facet(p + back, q + back, q + front);
        mesh.add_facet(p + back, q + front, p + front);
    }

    mesh
}
