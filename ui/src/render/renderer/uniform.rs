use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::camera::Camera;
use super::light::{AmbientLight, PointLight};

/// Highlight lights beyond this are dropped by the shader loop.
pub const MAX_POINT_LIGHTS: usize = 8;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraRaw {
    pub view_proj:     [[f32; 4]; 4], // 64 bytes @ 0
    pub inv_view_proj: [[f32; 4]; 4], // 64 bytes @ 64, background rays
    pub position:      [f32; 4],      // 16 bytes @ 128
}

impl CameraRaw {
    pub fn new(camera: &Camera) -> Self {
        let view_proj = camera.view_proj();
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            inv_view_proj: view_proj.inverse().to_cols_array_2d(),
            position: camera.position.extend(1.0).to_array(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PointLightRaw {
    pub position: [f32; 4],
    pub color:    [f32; 4], // rgb premultiplied by intensity
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct LightsRaw {
    pub ambient: [f32; 4],
    pub count:   [u32; 4], // x = lights in use, rest is padding
    pub points:  [PointLightRaw; MAX_POINT_LIGHTS],
}

impl LightsRaw {
    pub fn new<'a>(ambient: &AmbientLight, points: impl IntoIterator<Item = &'a PointLight>) -> Self {
        let mut raw = Self {
            ambient: (ambient.color * ambient.intensity).extend(1.0).to_array(),
            count: [0; 4],
            points: [PointLightRaw::default(); MAX_POINT_LIGHTS],
        };

        for (slot, light) in raw.points.iter_mut().zip(points) {
            *slot = PointLightRaw {
                position: light.position.extend(1.0).to_array(),
                color: (light.color * light.intensity).extend(1.0).to_array(),
            };
            raw.count[0] += 1;
        }
        raw
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ModelRaw {
    pub model:      [[f32; 4]; 4],
    pub normal:     [[f32; 4]; 4], // inverse-transpose of `model`
    pub base_color: [f32; 4],
}

impl ModelRaw {
    pub fn new(model: Mat4, base_color: [f32; 4]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal: model.inverse().transpose().to_cols_array_2d(),
            base_color,
        }
    }
}
