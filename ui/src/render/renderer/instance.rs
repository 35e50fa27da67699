use crate::navigation::Marker;

#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub tint:  [f32; 4],
}

impl InstanceRaw {
    pub fn from_marker(marker: &Marker) -> Self {
        Self {
            model: marker.model().to_cols_array_2d(),
            tint: marker.tint.extend(1.0).to_array(),
        }
    }
}

#[cfg(feature = "web")]
impl InstanceRaw {
    /// column-major model matrix takes up 4 locations (3-6), tint sits at 7
    pub const ATTRIBS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
        7 => Float32x4,
    ];

    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as _,
            step_mode:    wgpu::VertexStepMode::Instance,
            attributes:   &Self::ATTRIBS,
        }
    }
}
