use glam::Mat4;
use wgpu::{CommandEncoder, StoreOp, SurfaceTexture, TextureView};

use crate::assets::ModelData;
use crate::navigation::{MarkerGeometry, MarkerShape, PreviewRect, SceneRenderer, SceneView};
use crate::render::renderer::camera::Camera;
use crate::render::renderer::instance::InstanceRaw;
use crate::render::renderer::mesh::Mesh;
use crate::render::renderer::uniform::{CameraRaw, LightsRaw, ModelRaw};

use super::instance_buffer::InstanceBuffer;
use super::pipelines::Pipelines;
use super::resource_context::{ModelBinding, ResourceContext};
use super::surface_context::SurfaceContext;
use super::utils::{create_depth_view, upload_texture};

const CLEAR: wgpu::Color = wgpu::Color { r: 0.02, g: 0.02, b: 0.03, a: 1.0 };

struct ModelPartGpu {
    mesh: Mesh,
    binding: ModelBinding,
    local: Mat4, // node transform inside the glTF scene
    base_color: [f32; 4],
}

pub struct GpuState {
    pub surface_context: SurfaceContext,
    pub resource_context: ResourceContext,
    pub pipelines: Pipelines,

    pub depth_view: wgpu::TextureView,

    cone: Mesh,
    sphere: Mesh,
    cone_instances: InstanceBuffer<InstanceRaw>,
    sphere_instances: InstanceBuffer<InstanceRaw>,

    model: Vec<ModelPartGpu>,
    background: Option<wgpu::BindGroup>,

    // acquired by `render_main`, handed back by `present`
    frame: Option<SurfaceTexture>,
}

impl GpuState {
    pub fn new(sc: SurfaceContext, geometry: &MarkerGeometry) -> Self {
        let rc = ResourceContext::new(&sc);
        let pipelines = Pipelines::new(&sc, &rc);
        let depth_view = create_depth_view(&sc.device, &sc.config);

        let cone = Mesh::upload(&sc.device, "cone marker", geometry.mesh(MarkerShape::Cone));
        let sphere = Mesh::upload(&sc.device, "sphere marker", geometry.mesh(MarkerShape::Sphere));
        let cone_instances = InstanceBuffer::new(&sc, "cone instances", 16);
        let sphere_instances = InstanceBuffer::new(&sc, "sphere instances", 4);

        Self {
            surface_context: sc,
            resource_context: rc,
            pipelines,
            depth_view,
            cone,
            sphere,
            cone_instances,
            sphere_instances,
            model: Vec::new(),
            background: None,
            frame: None,
        }
    }

    /// Upload a decoded glTF model, replacing any previous one.
    pub fn set_model(&mut self, data: &ModelData) {
        let sc = &self.surface_context;
        let rc = &self.resource_context;

        let textures: Vec<TextureView> = data
            .textures
            .iter()
            .enumerate()
            .map(|(i, img)| upload_texture(&sc.device, &sc.queue, &format!("model texture {i}"), img))
            .collect();

        self.model = data
            .parts
            .iter()
            .enumerate()
            .map(|(i, part)| {
                let texture = part.texture.and_then(|t| textures.get(t));
                ModelPartGpu {
                    mesh: Mesh::upload(&sc.device, &format!("model part {i}"), &part.mesh),
                    binding: rc.model_binding(sc, texture, part.transform, part.base_color),
                    local: part.transform,
                    base_color: part.base_color,
                }
            })
            .collect();

        log::info!("model uploaded: {} parts, {} textures", self.model.len(), textures.len());
    }

    pub fn set_background(&mut self, panorama: &image::RgbaImage) {
        self.background = Some(self.resource_context.background_group(&self.surface_context, panorama));
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if self.surface_context.resize(width, height) {
            self.depth_view = create_depth_view(&self.surface_context.device, &self.surface_context.config);
        }
    }

    pub fn resolution(&self) -> (u32, u32) {
        (self.surface_context.config.width, self.surface_context.config.height)
    }

    /// Hand the frame drawn this tick to the browser. No-op when nothing was acquired.
    pub fn present(&mut self) {
        if let Some(frame) = self.frame.take() {
            frame.present();
        }
    }

    fn write_camera(&self, camera: &Camera) {
        self.surface_context.queue.write_buffer(
            &self.resource_context.camera_ubo,
            0,
            bytemuck::bytes_of(&CameraRaw::new(camera)),
        );
    }

    fn write_scene(&mut self, scene: &SceneView<'_>) {
        let sc = &self.surface_context;

        let lights = LightsRaw::new(&scene.settings.ambient, scene.point_lights());
        sc.queue.write_buffer(&self.resource_context.lights_ubo, 0, bytemuck::bytes_of(&lights));

        let root = scene.settings.model.matrix();
        for part in &self.model {
            let raw = ModelRaw::new(root * part.local, part.base_color);
            sc.queue.write_buffer(&part.binding.ubo, 0, bytemuck::bytes_of(&raw));
        }

        let markers = scene.registry.markers();
        let (cones, spheres): (Vec<_>, Vec<_>) = markers.partition(|m| m.shape == MarkerShape::Cone);
        self.cone_instances.sync(sc, cones.into_iter().map(InstanceRaw::from_marker));
        self.sphere_instances.sync(sc, spheres.into_iter().map(InstanceRaw::from_marker));
    }

    fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_bind_group(0, &self.resource_context.frame_group.group, &[]);

        if let Some(bg) = &self.background {
            rpass.set_pipeline(&self.pipelines.background);
            rpass.set_bind_group(1, bg, &[]);
            rpass.draw(0..3, 0..1);
        }

        rpass.set_pipeline(&self.pipelines.model);
        for part in &self.model {
            rpass.set_bind_group(1, &part.binding.group, &[]);
            part.mesh.bind(rpass);
            rpass.draw_indexed(0..part.mesh.index_count(), 0, 0..1);
        }

        rpass.set_pipeline(&self.pipelines.markers);
        for (mesh, instances) in [(&self.cone, &self.cone_instances), (&self.sphere, &self.sphere_instances)] {
            if instances.count() == 0 {
                continue;
            }
            mesh.bind(rpass);
            rpass.set_vertex_buffer(1, instances.slice());
            rpass.draw_indexed(0..mesh.index_count(), 0, 0..instances.count());
        }
    }

    fn render_pass(
        &self,
        encoder: &mut CommandEncoder,
        view: &TextureView,
        color: wgpu::LoadOp<wgpu::Color>,
        rect: Option<PreviewRect>,
    ) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(if rect.is_some() { "Preview Pass" } else { "Render Pass" }),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations { load: color, store: StoreOp::Store },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        if let Some(r) = rect {
            rpass.set_viewport(r.x as f32, r.y as f32, r.width as f32, r.height as f32, 0.0, 1.0);
            rpass.set_scissor_rect(r.x, r.y, r.width, r.height);
        }

        self.draw(&mut rpass);
    }

    fn submit(&self, label: &str, record: impl FnOnce(&mut CommandEncoder)) {
        let mut encoder = self
            .surface_context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(label) });
        record(&mut encoder);
        self.surface_context.queue.submit(Some(encoder.finish()));
    }
}

impl SceneRenderer for GpuState {
    fn render_main(&mut self, scene: &SceneView<'_>, camera: &Camera) {
        // a frame left over from a tick that skipped `present` is dropped here
        self.frame = None;

        let frame = match self.surface_context.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(e) => {
                log::warn!("skipping frame: {e}");
                return;
            }
        };
        let view = frame.texture.create_view(&Default::default());

        self.write_camera(camera);
        self.write_scene(scene);
        self.submit("main encoder", |enc| self.render_pass(enc, &view, wgpu::LoadOp::Clear(CLEAR), None));

        self.frame = Some(frame);
    }

    fn render_preview(&mut self, _scene: &SceneView<'_>, camera: &Camera, rect: PreviewRect) {
        let Some(frame) = &self.frame else { return };
        let view = frame.texture.create_view(&Default::default());

        let mut lens = camera.clone();
        lens.set_aspect(rect.width as f32, rect.height as f32);

        // the main pass is already queued, so rewriting the camera only affects this one
        self.write_camera(&lens);
        self.submit("preview encoder", |enc| self.render_pass(enc, &view, wgpu::LoadOp::Load, Some(rect)));
    }
}
