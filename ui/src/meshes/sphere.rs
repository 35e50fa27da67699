use std::f32::consts::{PI, TAU};

use crate::render::renderer::mesh::CpuMesh;
use crate::render::renderer::vertex::Vertex;

/// UV sphere centred on the origin.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> CpuMesh {
    let w = width_segments.max(3);
    let h = height_segments.max(2);

    let mut vertices = Vec::with_capacity(((w + 1) * (h + 1)) as usize);
    let mut indices = Vec::with_capacity((w * h * 6) as usize);

    for y in 0..=h {
        let v = y as f32 / h as f32;
        let (sin_t, cos_t) = (v * PI).sin_cos();

        for x in 0..=w {
            let u = x as f32 / w as f32;
            let (sin_p, cos_p) = (u * TAU).sin_cos();

            let normal = [-cos_p * sin_t, cos_t, sin_p * sin_t];
            let position = [normal[0] * radius, normal[1] * radius, normal[2] * radius];
            vertices.push(Vertex::new(position, normal, [u, 1.0 - v]));
        }
    }

    let row = w + 1;
    for y in 0..h {
        for x in 0..w {
            let a = y * row + x + 1;
            let b = y * row + x;
            let c = (y + 1) * row + x;
            let d = (y + 1) * row + x + 1;

            // the pole rows collapse to a point, skip their degenerate half
            if y != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if y != h - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    CpuMesh::new(vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn every_vertex_sits_on_the_surface() {
        let mesh = sphere(0.2, 12, 8);
        for v in &mesh.vertices {
            assert_relative_eq!(glam::Vec3::from(v.position).length(), 0.2, epsilon = 1e-5);
        }
        assert_relative_eq!(mesh.bounding_radius(), 0.2, epsilon = 1e-5);
    }

    #[test]
    fn poles_are_fans() {
        let mesh = sphere(1.0, 12, 8);
        // two pole rows contribute one triangle per column, the rest two
        assert_eq!(mesh.triangles().count(), 12 * 2 + 12 * 6 * 2);
    }
}
