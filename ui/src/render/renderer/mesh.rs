use glam::Vec3;

use super::vertex::Vertex;

/// Indexed triangle list kept on the CPU. Marker meshes are shared between
/// the GPU upload and ray picking, so both see the same triangles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl CpuMesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            let p = |i: u32| Vec3::from(self.vertices[i as usize].position);
            [p(tri[0]), p(tri[1]), p(tri[2])]
        })
    }

    /// Radius of the smallest origin-centred sphere holding every vertex.
    pub fn bounding_radius(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| Vec3::from(v.position).length())
            .fold(0.0, f32::max)
    }

    /// Smooth normals from area-weighted face normals. Used for imported
    /// geometry that ships without normals.
    pub fn recompute_normals(&mut self) {
        let mut acc = vec![Vec3::ZERO; self.vertices.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from(self.vertices[i as usize].position));
            let face = (b - a).cross(c - a);
            for &i in tri {
                acc[i as usize] += face;
            }
        }

        for (v, n) in self.vertices.iter_mut().zip(acc) {
            v.normal = n.normalize_or(Vec3::Y).to_array();
        }
    }
}

#[cfg(feature = "web")]
pub use gpu::Mesh;

#[cfg(feature = "web")]
mod gpu {
    use wgpu::util::DeviceExt;
    use wgpu::{Buffer, BufferUsages, Device, RenderPass};

    use super::CpuMesh;

    /// Vertex + index buffers of one uploaded `CpuMesh`.
    pub struct Mesh {
        vertex_buf: Buffer,
        index_buf:  Buffer,
        index_count: u32,
    }

    impl Mesh {
        pub fn upload(device: &Device, label: &str, mesh: &CpuMesh) -> Self {
            let vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} vertex buffer")),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: BufferUsages::VERTEX,
            });

            let index_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} index buffer")),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: BufferUsages::INDEX,
            });

            Self {
                vertex_buf,
                index_buf,
                index_count: mesh.index_count(),
            }
        }

        pub fn bind(&self, pass: &mut RenderPass<'_>) {
            pass.set_vertex_buffer(0, self.vertex_buf.slice(..));
            pass.set_index_buffer(self.index_buf.slice(..), wgpu::IndexFormat::Uint32);
        }

        pub fn index_count(&self) -> u32 {
            self.index_count
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normals_follow_winding() {
        let mut mesh = CpuMesh::new(
            vec![
                Vertex::new([0., 0., 0.], [0., 0., 0.], [0., 0.]),
                Vertex::new([1., 0., 0.], [0., 0., 0.], [1., 0.]),
                Vertex::new([0., 1., 0.], [0., 0., 0.], [0., 1.]),
                Vertex::new([5., 5., 5.], [0., 0., 0.], [0., 0.]), // unreferenced
            ],
            vec![0, 1, 2],
        );
        mesh.recompute_normals();

        assert!(mesh.vertices[..3].iter().all(|v| v.normal == [0., 0., 1.]));
        assert_eq!(mesh.vertices[3].normal, [0., 1., 0.]);
        assert_eq!(mesh.triangles().count(), 1);
        assert_eq!(mesh.bounding_radius(), Vec3::splat(5.0).length());
    }
}
