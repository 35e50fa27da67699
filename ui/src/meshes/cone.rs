use std::f32::consts::TAU;

use glam::Vec3;

use crate::render::renderer::mesh::CpuMesh;
use crate::render::renderer::vertex::Vertex;

/// Closed cone standing on the XZ plane, centred on the origin:
/// base at `-height / 2`, apex at `+height / 2`.
pub fn cone(radius: f32, height: f32, radial_segments: u32) -> CpuMesh {
    let segments = radial_segments.max(3);
    let half_h = height * 0.5;
    let slope = radius / height;

    let mut vertices = Vec::with_capacity((segments as usize + 1) * 4 + 1);
    let mut indices = Vec::with_capacity(segments as usize * 6);

    // side: one apex + one rim vertex per segment edge, so each face gets its own normal
    for i in 0..=segments {
        let u = i as f32 / segments as f32;
        let (sin, cos) = (u * TAU).sin_cos();
        let normal = Vec3::new(sin, slope, cos).normalize().to_array();

        vertices.push(Vertex::new([0.0, half_h, 0.0], normal, [u, 0.0]));
        vertices.push(Vertex::new([radius * sin, -half_h, radius * cos], normal, [u, 1.0]));
    }

    for i in 0..segments {
        let apex = i * 2;
        let rim = apex + 1;
        let next_rim = rim + 2;
        indices.extend_from_slice(&[apex, rim, next_rim]);
    }

    // base cap
    let center = vertices.len() as u32;
    vertices.push(Vertex::new([0.0, -half_h, 0.0], [0.0, -1.0, 0.0], [0.5, 0.5]));

    for i in 0..=segments {
        let (sin, cos) = (i as f32 / segments as f32 * TAU).sin_cos();
        vertices.push(Vertex::new(
            [radius * sin, -half_h, radius * cos],
            [0.0, -1.0, 0.0],
            [sin * 0.5 + 0.5, cos * 0.5 + 0.5],
        ));
    }

    for i in 0..segments {
        let a = center + 1 + i;
        indices.extend_from_slice(&[center, a + 1, a]);
    }

    CpuMesh::new(vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cone_has_side_and_cap_triangles() {
        let mesh = cone(0.3, 0.3, 8);
        assert_eq!(mesh.triangles().count(), 16);

        let max_y = mesh.vertices.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        let min_y = mesh.vertices.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
        assert_eq!(max_y, 0.15);
        assert_eq!(min_y, -0.15);
    }

    #[test]
    fn side_faces_point_outwards() {
        let mesh = cone(0.3, 0.3, 8);
        for [a, b, c] in mesh.triangles().take(8) {
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(Vec3::new(centroid.x, 0.0, centroid.z)) > 0.0);
        }
    }
}
