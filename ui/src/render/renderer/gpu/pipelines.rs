use crate::render::renderer::instance::InstanceRaw;
use crate::render::renderer::vertex::Vertex;

use super::resource_context::ResourceContext;
use super::surface_context::SurfaceContext;
use super::utils::{create_shader, DEPTH_FORMAT};

const FRAME_WGSL: &str = include_str!("../shaders/frame.wgsl");
const MODEL_WGSL: &str = include_str!("../shaders/model.wgsl");
const MARKERS_WGSL: &str = include_str!("../shaders/markers.wgsl");
const BACKGROUND_WGSL: &str = include_str!("../shaders/background.wgsl");

pub struct Pipelines {
    pub background: wgpu::RenderPipeline,
    pub model: wgpu::RenderPipeline,
    pub markers: wgpu::RenderPipeline,
}

struct PipelineSpec<'a> {
    label: &'a str,
    body: &'a str,
    group1: Option<&'a wgpu::BindGroupLayout>,
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    depth_write: bool,
    depth_compare: wgpu::CompareFunction,
}

impl Pipelines {
    pub fn new(sc: &SurfaceContext, rc: &ResourceContext) -> Self {
        let background = create_pipeline(sc, rc, &PipelineSpec {
            label: "background",
            body: BACKGROUND_WGSL,
            group1: Some(&rc.background_layout),
            buffers: &[],
            depth_write: false,
            depth_compare: wgpu::CompareFunction::Always,
        });

        let model = create_pipeline(sc, rc, &PipelineSpec {
            label: "model",
            body: MODEL_WGSL,
            group1: Some(&rc.model_layout),
            buffers: &[Vertex::desc()],
            depth_write: true,
            depth_compare: wgpu::CompareFunction::Less, // passes if new depth < old
        });

        let markers = create_pipeline(sc, rc, &PipelineSpec {
            label: "markers",
            body: MARKERS_WGSL,
            group1: None,
            buffers: &[Vertex::desc(), InstanceRaw::desc()],
            depth_write: true,
            depth_compare: wgpu::CompareFunction::Less,
        });

        Self { background, model, markers }
    }
}

fn create_pipeline(sc: &SurfaceContext, rc: &ResourceContext, spec: &PipelineSpec<'_>) -> wgpu::RenderPipeline {
    let device = &sc.device;

    // every pipeline sees the same frame bindings
    let src = format!("{FRAME_WGSL}\n{}", spec.body);
    let module = create_shader(device, &format!("{} shader", spec.label), &src);
    let layout = rc.pipeline_layout(device, spec.group1);

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some(spec.label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            compilation_options: Default::default(),
            module: &module,
            entry_point: Some("vs_main"),
            buffers: spec.buffers,
        },
        fragment: Some(wgpu::FragmentState {
            compilation_options: Default::default(),
            module: &module,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: sc.config.format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: spec.depth_write,
            depth_compare: spec.depth_compare,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: Default::default(),
        multiview: None,
    })
}
