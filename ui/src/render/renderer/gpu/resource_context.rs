use glam::Mat4;

use crate::render::renderer::camera::Camera;
use crate::render::renderer::light::AmbientLight;
use crate::render::renderer::uniform::{CameraRaw, LightsRaw, ModelRaw};
use crate::simple_ubo_layout_entry;

use super::surface_context::SurfaceContext;
use super::utils::{create_sampler, create_ubo, sampler_layout_entry, texture_layout_entry, upload_texture, white_texture};

pub struct Group {
    pub group: wgpu::BindGroup,
    pub layout: wgpu::BindGroupLayout,
}

/// Per-part uniforms + texture of the loaded model (bind group 1 of the
/// model pipeline).
pub struct ModelBinding {
    pub ubo: wgpu::Buffer,
    pub group: wgpu::BindGroup,
}

/// Bind group layouts and the resources every frame shares.
///
/// group 0: camera + lights, bound by all three pipelines
/// group 1: model part (model pipeline) or panorama (background pipeline)
pub struct ResourceContext {
    pub camera_ubo: wgpu::Buffer,
    pub lights_ubo: wgpu::Buffer,
    pub frame_group: Group,

    pub model_layout: wgpu::BindGroupLayout,
    pub background_layout: wgpu::BindGroupLayout,

    pub white: wgpu::TextureView,
    pub model_sampler: wgpu::Sampler,
    pub panorama_sampler: wgpu::Sampler,
}

impl ResourceContext {
    pub fn new(sc: &SurfaceContext) -> Self {
        let device = &sc.device;

        let camera_ubo = create_ubo(device, "Camera UBO", &CameraRaw::new(&Camera::default()));
        let lights_ubo = create_ubo(device, "Lights UBO", &LightsRaw::new(&AmbientLight::default(), std::iter::empty()));

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame layout"),
            entries: &[
                simple_ubo_layout_entry!(0, wgpu::ShaderStages::VERTEX_FRAGMENT, CameraRaw),
                simple_ubo_layout_entry!(1, wgpu::ShaderStages::FRAGMENT, LightsRaw),
            ],
        });
        let frame_bind = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame group"),
            layout: &frame_layout,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: camera_ubo.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 1, resource: lights_ubo.as_entire_binding() },
            ],
        });

        let model_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("model layout"),
            entries: &[
                simple_ubo_layout_entry!(0, wgpu::ShaderStages::VERTEX_FRAGMENT, ModelRaw),
                texture_layout_entry(1),
                sampler_layout_entry(2),
            ],
        });

        let background_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("background layout"),
            entries: &[texture_layout_entry(0), sampler_layout_entry(1)],
        });

        ResourceContext {
            camera_ubo,
            lights_ubo,
            frame_group: Group { group: frame_bind, layout: frame_layout },

            model_layout,
            background_layout,

            white: white_texture(device, &sc.queue),
            model_sampler: create_sampler(device, wgpu::AddressMode::Repeat, wgpu::AddressMode::Repeat),
            // wraps around horizontally, clamps at the poles
            panorama_sampler: create_sampler(device, wgpu::AddressMode::Repeat, wgpu::AddressMode::ClampToEdge),
        }
    }

    pub fn pipeline_layout(&self, device: &wgpu::Device, extra: Option<&wgpu::BindGroupLayout>) -> wgpu::PipelineLayout {
        let mut layouts = vec![&self.frame_group.layout];
        layouts.extend(extra);

        device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Pipeline Layout"),
            bind_group_layouts: &layouts,
            push_constant_ranges: &[],
        })
    }

    pub fn model_binding(
        &self,
        sc: &SurfaceContext,
        texture: Option<&wgpu::TextureView>,
        transform: Mat4,
        base_color: [f32; 4],
    ) -> ModelBinding {
        let ubo = create_ubo(&sc.device, "Model UBO", &ModelRaw::new(transform, base_color));
        let group = sc.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("model part group"),
            layout: &self.model_layout,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: ubo.as_entire_binding() },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(texture.unwrap_or(&self.white)),
                },
                wgpu::BindGroupEntry { binding: 2, resource: wgpu::BindingResource::Sampler(&self.model_sampler) },
            ],
        });
        ModelBinding { ubo, group }
    }

    pub fn background_group(&self, sc: &SurfaceContext, panorama: &image::RgbaImage) -> wgpu::BindGroup {
        let view = upload_texture(&sc.device, &sc.queue, "panorama", panorama);
        sc.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("background group"),
            layout: &self.background_layout,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::TextureView(&view) },
                wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::Sampler(&self.panorama_sampler) },
            ],
        })
    }
}
